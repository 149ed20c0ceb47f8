//! Callback table delivered by the window runner

use super::{ExitSignal, FrameEvent, ResizeEvent};
use crate::input::KeyboardState;
use crate::render::GraphicsContext;

/// Called once before any other callback
pub type LoadCallback = Box<dyn FnMut(&mut dyn GraphicsContext)>;

/// Called with the initial client size and on every resize
pub type ResizeCallback = Box<dyn FnMut(&mut dyn GraphicsContext, ResizeEvent)>;

/// Called once per frame before rendering
pub type UpdateCallback = Box<dyn FnMut(&dyn KeyboardState, &mut ExitSignal, FrameEvent)>;

/// Called once per frame after updating
pub type RenderCallback = Box<dyn FnMut(&mut dyn GraphicsContext, FrameEvent)>;

/// Lifecycle callbacks; empty slots do nothing
#[derive(Default)]
pub struct WindowCallbacks {
    on_load: Option<LoadCallback>,
    on_resize: Option<ResizeCallback>,
    on_update_frame: Option<UpdateCallback>,
    on_render_frame: Option<RenderCallback>,
}

impl WindowCallbacks {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the load callback
    #[must_use]
    pub fn on_load(mut self, callback: impl FnMut(&mut dyn GraphicsContext) + 'static) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    /// Set the resize callback
    #[must_use]
    pub fn on_resize(
        mut self,
        callback: impl FnMut(&mut dyn GraphicsContext, ResizeEvent) + 'static,
    ) -> Self {
        self.on_resize = Some(Box::new(callback));
        self
    }

    /// Set the update callback
    #[must_use]
    pub fn on_update_frame(
        mut self,
        callback: impl FnMut(&dyn KeyboardState, &mut ExitSignal, FrameEvent) + 'static,
    ) -> Self {
        self.on_update_frame = Some(Box::new(callback));
        self
    }

    /// Set the render callback
    #[must_use]
    pub fn on_render_frame(
        mut self,
        callback: impl FnMut(&mut dyn GraphicsContext, FrameEvent) + 'static,
    ) -> Self {
        self.on_render_frame = Some(Box::new(callback));
        self
    }

    pub(crate) fn load(&mut self, gl: &mut dyn GraphicsContext) {
        if let Some(callback) = self.on_load.as_mut() {
            callback(gl);
        }
    }

    pub(crate) fn resize(&mut self, gl: &mut dyn GraphicsContext, event: ResizeEvent) {
        if let Some(callback) = self.on_resize.as_mut() {
            callback(gl, event);
        }
    }

    pub(crate) fn update_frame(
        &mut self,
        keyboard: &dyn KeyboardState,
        exit: &mut ExitSignal,
        event: FrameEvent,
    ) {
        if let Some(callback) = self.on_update_frame.as_mut() {
            callback(keyboard, exit, event);
        }
    }

    pub(crate) fn render_frame(&mut self, gl: &mut dyn GraphicsContext, event: FrameEvent) {
        if let Some(callback) = self.on_render_frame.as_mut() {
            callback(gl, event);
        }
    }
}

impl std::fmt::Debug for WindowCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowCallbacks")
            .field("on_load", &self.on_load.is_some())
            .field("on_resize", &self.on_resize.is_some())
            .field("on_update_frame", &self.on_update_frame.is_some())
            .field("on_render_frame", &self.on_render_frame.is_some())
            .finish()
    }
}
