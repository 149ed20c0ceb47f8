//! Window management subsystem
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │  FrameLoop / application code   │
//! └─────────────┬───────────────────┘
//!               │ closures
//!      ┌────────▼────────┐
//!      │ WindowCallbacks │ ← callback table (callbacks.rs)
//!      └────────┬────────┘
//!               │ dispatched by
//!      ┌────────▼────────┐
//!      │   GameWindow    │ ← lifecycle + frame loop (game_window.rs)
//!      └────────┬────────┘
//!               │ drives
//!      ┌────────▼────────┐
//!      │ WindowBackend   │ ← platform boundary (this file)
//!      └────────┬────────┘
//!               │ implemented by
//!   ┌───────────▼───────────┐
//!   │ GlfwWindow            │ ← OpenGL compatibility context (glfw_backend.rs)
//!   │ HeadlessWindow        │ ← recording context, scripted input (headless.rs)
//!   └───────────────────────┘
//! ```

mod callbacks;
mod game_window;
mod glfw_backend;
mod headless;

pub use callbacks::{LoadCallback, RenderCallback, ResizeCallback, UpdateCallback, WindowCallbacks};
pub use game_window::{GameWindow, RunSummary, WindowState};
pub use glfw_backend::GlfwWindow;
pub use headless::HeadlessWindow;

use thiserror::Error;

use crate::input::KeyboardState;
use crate::render::GraphicsContext;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// The window or its context could not be created
    #[error("Window creation failed")]
    CreationFailed,

    /// A required OpenGL function was not exported by the context
    #[error("OpenGL entry point not available: {0}")]
    MissingEntryPoint(&'static str),

    /// Other GLFW failure
    #[error("GLFW error: {0}")]
    GlfwError(String),
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Platform events the runner reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Window was resized
    WindowResized {
        /// New client width
        width: u32,
        /// New client height
        height: u32,
    },

    /// Window close requested
    WindowCloseRequested,
}

/// Payload of a resize callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
}

/// Payload of update and render callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEvent {
    /// Seconds since the previous frame
    pub elapsed: f64,
    /// Zero-based frame number
    pub frame: u64,
}

/// Termination requests issued from update callbacks
///
/// Requesting more than once is harmless; the runner only looks at whether
/// any request was made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExitSignal {
    requests: u64,
}

impl ExitSignal {
    /// No request yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the runner to stop after the current frame
    pub fn request(&mut self) {
        if self.requests == 0 {
            log::info!("Exit requested");
        } else {
            log::trace!("Exit requested again ({} total)", self.requests + 1);
        }
        self.requests += 1;
    }

    /// Whether any request has been made
    pub fn is_requested(&self) -> bool {
        self.requests > 0
    }

    /// How many times exit was requested
    pub fn request_count(&self) -> u64 {
        self.requests
    }
}

/// Platform window that hosts a graphics context
pub trait WindowBackend {
    /// The context frames render into
    fn graphics(&mut self) -> &mut dyn GraphicsContext;

    /// Current keyboard state
    fn keyboard(&self) -> &dyn KeyboardState;

    /// Drain pending platform events
    fn poll_events(&mut self) -> Vec<AppEvent>;

    /// Client area size in pixels
    fn client_size(&self) -> (u32, u32);

    /// Whether the window has been asked to close
    fn should_close(&self) -> bool;

    /// Set or clear the close flag
    fn set_should_close(&mut self, should_close: bool);

    /// Release the context and window; no further calls follow
    fn dispose(&mut self);
}
