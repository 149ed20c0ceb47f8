//! # Frame Engine
//!
//! A small callback-driven frame loop on top of a fixed-function OpenGL
//! context.
//!
//! ## Features
//!
//! - **Callback table**: load, resize, update and render closures instead of a
//!   window base class
//! - **Explicit graphics context**: every GL state change goes through
//!   [`render::GraphicsContext`], so frames can be recorded and inspected
//!   without a live context
//! - **GLFW backend**: an OpenGL 2.1 compatibility window with vsync control
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frame_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let backend = GlfwWindow::new(&config.window)?;
//!     let frame_loop = FrameLoop::new(&config).shared();
//!     let mut callbacks = FrameLoop::bind(&frame_loop);
//!
//!     let mut window = GameWindow::new(backend, config.update_rate_hz);
//!     window.run(&mut callbacks);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod window;

mod frame_loop;

pub use frame_loop::FrameLoop;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{AppConfig, CameraConfig, Config, ConfigError, GraphicsMode, VSyncMode, WindowConfig},
        foundation::math::{Mat4, Point3, Vec3},
        input::{KeyCode, KeyboardSnapshot, KeyboardState},
        render::{
            Capability, ClearMask, Color4, GraphicsContext, MatrixMode, PrimitiveType,
            ProjectionState, QuadGeometry, RecordingContext, ViewState, Viewport,
        },
        window::{
            AppEvent, ExitSignal, FrameEvent, GameWindow, GlfwWindow, HeadlessWindow,
            ResizeEvent, RunSummary, WindowBackend, WindowCallbacks, WindowError, WindowState,
        },
        FrameLoop,
    };
}
