//! Lifecycle runner that delivers callbacks to a window backend

use super::{AppEvent, ExitSignal, FrameEvent, ResizeEvent, WindowBackend, WindowCallbacks};
use crate::foundation::time::FrameTimer;

/// Where a [`GameWindow`] is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Constructed, no callbacks delivered yet
    Created,
    /// Load delivered
    Loaded,
    /// Inside the frame loop
    Running,
    /// Loop finished, backend being released
    Closing,
    /// Backend released
    Destroyed,
}

/// Outcome of a [`GameWindow::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames that went through update and render
    pub frames: u64,
    /// Exit requests made by update callbacks
    pub exit_requests: u64,
    /// Resize callbacks delivered, including the initial one
    pub resizes: u64,
}

/// Drives a [`WindowBackend`] through load, resize, update and render
///
/// Everything runs on the calling thread. Load and the initial resize happen
/// before the first frame; each frame then drains platform events, runs
/// update, and runs render. An exit request from update still lets that
/// frame's render finish. A platform close request stops the loop before the
/// next update.
pub struct GameWindow<B: WindowBackend> {
    backend: B,
    timer: FrameTimer,
    exit: ExitSignal,
    state: WindowState,
}

impl<B: WindowBackend> GameWindow<B> {
    /// Wrap a backend, pacing frames at `update_rate_hz` (0 = unthrottled)
    pub fn new(backend: B, update_rate_hz: f64) -> Self {
        Self {
            backend,
            timer: FrameTimer::new(update_rate_hz),
            exit: ExitSignal::new(),
            state: WindowState::Created,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// The wrapped backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the wrapped backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consume the runner and return its backend
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Run until an exit request or a platform close, then dispose
    ///
    /// Returns immediately with an empty summary if the window already ran.
    pub fn run(&mut self, callbacks: &mut WindowCallbacks) -> RunSummary {
        let mut summary = RunSummary {
            frames: 0,
            exit_requests: 0,
            resizes: 0,
        };
        if self.state != WindowState::Created {
            log::warn!("GameWindow::run called in state {:?}; ignoring", self.state);
            return summary;
        }

        log::info!("Loading window");
        callbacks.load(self.backend.graphics());
        self.state = WindowState::Loaded;

        let (width, height) = self.backend.client_size();
        self.dispatch_resize(callbacks, width, height, &mut summary);

        log::info!("Starting frame loop");
        self.state = WindowState::Running;

        while !self.backend.should_close() {
            let elapsed = self.timer.tick();

            let mut close_requested = false;
            for event in self.backend.poll_events() {
                match event {
                    AppEvent::WindowResized { width, height } => {
                        self.dispatch_resize(callbacks, width, height, &mut summary);
                    }
                    AppEvent::WindowCloseRequested => close_requested = true,
                }
            }
            if close_requested {
                log::info!("Window close requested by platform");
                self.backend.set_should_close(true);
                break;
            }

            let frame = FrameEvent {
                elapsed,
                frame: summary.frames,
            };
            callbacks.update_frame(self.backend.keyboard(), &mut self.exit, frame);
            callbacks.render_frame(self.backend.graphics(), frame);
            summary.frames += 1;

            if self.exit.is_requested() {
                self.backend.set_should_close(true);
            }
        }

        self.state = WindowState::Closing;
        summary.exit_requests = self.exit.request_count();
        self.backend.dispose();
        self.state = WindowState::Destroyed;

        log::info!(
            "Window closed after {} frames ({:.2}s)",
            summary.frames,
            self.timer.total_time()
        );
        summary
    }

    fn dispatch_resize(
        &mut self,
        callbacks: &mut WindowCallbacks,
        width: u32,
        height: u32,
        summary: &mut RunSummary,
    ) {
        log::debug!("Resize to {width}x{height}");
        callbacks.resize(self.backend.graphics(), ResizeEvent { width, height });
        summary.resizes += 1;
    }
}
