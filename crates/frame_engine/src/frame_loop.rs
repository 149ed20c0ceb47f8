//! The per-frame state machine of the quad sample
//!
//! Load configures clear color and depth testing. Resize sets the viewport
//! and recomputes the projection. Update polls the exit key. Render clears,
//! loads both transforms, draws the quad and presents, always in that order.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{AppConfig, CameraConfig};
use crate::input::{KeyCode, KeyboardState};
use crate::render::{
    Capability, ClearMask, Color4, GraphicsContext, MatrixMode, ProjectionState, QuadGeometry,
    ViewState, Viewport,
};
use crate::window::{ExitSignal, FrameEvent, ResizeEvent, WindowCallbacks};

/// Frame logic driven by window lifecycle callbacks
#[derive(Debug, Clone)]
pub struct FrameLoop {
    camera: CameraConfig,
    clear_color: Color4,
    exit_key: KeyCode,
    projection: ProjectionState,
    view: ViewState,
    viewport: Viewport,
    loaded: bool,
}

impl FrameLoop {
    /// Create the loop for a window of the configured size
    ///
    /// The projection starts out matching the configured window size so a
    /// render before the first resize still has a sensible transform.
    pub fn new(config: &AppConfig) -> Self {
        let (width, height) = (config.window.width, config.window.height);
        Self {
            camera: config.camera.clone(),
            clear_color: config.clear_color,
            exit_key: KeyCode::Escape,
            projection: ProjectionState::from_camera(&config.camera, width, height),
            view: ViewState::from_camera(&config.camera),
            viewport: Viewport::covering(width, height),
            loaded: false,
        }
    }

    /// Wrap for sharing with a callback table
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Build a callback table that forwards to `frame_loop`
    pub fn bind(frame_loop: &Rc<RefCell<Self>>) -> WindowCallbacks {
        let (load, resize, update, render) = (
            Rc::clone(frame_loop),
            Rc::clone(frame_loop),
            Rc::clone(frame_loop),
            Rc::clone(frame_loop),
        );

        WindowCallbacks::new()
            .on_load(move |gl| load.borrow_mut().on_load(gl))
            .on_resize(move |gl, event| resize.borrow_mut().on_resize(gl, event))
            .on_update_frame(move |keyboard, exit, event| {
                update.borrow_mut().on_update_frame(keyboard, exit, event);
            })
            .on_render_frame(move |gl, event| render.borrow_mut().on_render_frame(gl, event))
    }

    /// Set the clear color and enable depth testing
    pub fn on_load(&mut self, gl: &mut dyn GraphicsContext) {
        gl.clear_color(self.clear_color);
        gl.enable(Capability::DepthTest);

        if !self.loaded {
            log::debug!("Frame loop loaded");
        }
        self.loaded = true;
    }

    /// Cover the new client area and recompute the projection
    pub fn on_resize(&mut self, gl: &mut dyn GraphicsContext, event: ResizeEvent) {
        self.viewport = Viewport::covering(event.width, event.height);
        self.projection = ProjectionState::from_camera(&self.camera, event.width, event.height);
        log::debug!(
            "Viewport {}x{}, aspect {:.4}",
            event.width,
            event.height,
            self.projection.aspect()
        );

        gl.viewport(self.viewport);
        gl.matrix_mode(MatrixMode::Projection);
        gl.load_matrix(self.projection.matrix());
    }

    /// Request exit while the exit key is held
    pub fn on_update_frame(
        &mut self,
        keyboard: &dyn KeyboardState,
        exit: &mut ExitSignal,
        _event: FrameEvent,
    ) {
        if keyboard.is_key_down(self.exit_key) {
            exit.request();
        }
    }

    /// Clear, load transforms, draw the quad, present
    pub fn on_render_frame(&mut self, gl: &mut dyn GraphicsContext, _event: FrameEvent) {
        self.view = ViewState::from_camera(&self.camera);

        gl.clear(ClearMask::COLOR | ClearMask::DEPTH);

        gl.matrix_mode(MatrixMode::Projection);
        gl.load_matrix(self.projection.matrix());
        gl.matrix_mode(MatrixMode::Modelview);
        gl.load_matrix(self.view.matrix());

        QuadGeometry::sample().draw(gl);

        gl.swap_buffers();
    }

    /// Current projection
    pub fn projection(&self) -> &ProjectionState {
        &self.projection
    }

    /// View used by the most recent render
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Viewport set by the most recent resize
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether load has run
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::logging;
    use crate::foundation::math::{constants::QUARTER_PI, Mat4, Mat4Ext, Point3, Vec3};
    use crate::input::KeyboardSnapshot;
    use crate::render::{GlCommand, PrimitiveType, RecordingContext};
    use crate::window::{AppEvent, GameWindow, HeadlessWindow, WindowState};
    use approx::assert_relative_eq;

    const FRAME: FrameEvent = FrameEvent { elapsed: 1.0 / 30.0, frame: 0 };

    fn frame_loop() -> FrameLoop {
        FrameLoop::new(&AppConfig::default())
    }

    #[test]
    fn test_load_sets_state() {
        let mut frame_loop = frame_loop();
        let mut gl = RecordingContext::new();
        assert!(!frame_loop.is_loaded());

        frame_loop.on_load(&mut gl);

        assert!(frame_loop.is_loaded());
        assert_eq!(gl.clear_color_value(), Color4::new(0.0, 0.0, 0.0, 1.0));
        assert!(gl.is_enabled(Capability::DepthTest));
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut once = RecordingContext::new();
        let mut twice = RecordingContext::new();

        frame_loop().on_load(&mut once);
        let mut frame_loop = frame_loop();
        frame_loop.on_load(&mut twice);
        frame_loop.on_load(&mut twice);

        assert_eq!(once.clear_color_value(), twice.clear_color_value());
        assert_eq!(
            once.is_enabled(Capability::DepthTest),
            twice.is_enabled(Capability::DepthTest)
        );
        assert!(frame_loop.is_loaded());
    }

    #[test]
    fn test_resize_end_to_end() {
        let mut frame_loop = frame_loop();
        let mut gl = RecordingContext::new();

        frame_loop.on_load(&mut gl);
        frame_loop.on_resize(&mut gl, ResizeEvent { width: 800, height: 600 });

        assert_eq!(gl.viewport_value(), Viewport { x: 0, y: 0, width: 800, height: 600 });

        let projection = frame_loop.projection();
        assert_relative_eq!(projection.aspect(), 800.0 / 600.0, epsilon = 1e-6);
        assert_relative_eq!(projection.fov_y(), QUARTER_PI, epsilon = 1e-6);
        assert_relative_eq!(projection.near(), 1.0);
        assert_relative_eq!(projection.far(), 64.0);

        let expected = Mat4::perspective_fov(QUARTER_PI, 800.0 / 600.0, 1.0, 64.0);
        assert_relative_eq!(*gl.projection_matrix(), expected, epsilon = 1e-6);
        assert_eq!(gl.current_matrix_mode(), MatrixMode::Projection);
    }

    #[test]
    fn test_resize_aspect_never_stale() {
        let mut frame_loop = frame_loop();
        let mut gl = RecordingContext::new();

        for (width, height) in [(800, 600), (300, 900), (1280, 720), (17, 1)] {
            frame_loop.on_resize(&mut gl, ResizeEvent { width, height });
            assert_relative_eq!(
                frame_loop.projection().aspect(),
                width as f32 / height as f32,
                max_relative = 1e-6
            );
            assert_relative_eq!(
                gl.projection_matrix().projection_aspect(),
                width as f32 / height as f32,
                max_relative = 1e-5
            );
        }
    }

    #[test]
    fn test_resize_zero_height() {
        let mut frame_loop = frame_loop();
        let mut gl = RecordingContext::new();

        frame_loop.on_resize(&mut gl, ResizeEvent { width: 800, height: 0 });

        assert_eq!(gl.viewport_value(), Viewport::covering(800, 0));
        assert_relative_eq!(frame_loop.projection().aspect(), 800.0);
        assert!(gl.projection_matrix().iter().all(|value| value.is_finite()));
    }

    #[test]
    fn test_resize_very_tall_window() {
        let mut frame_loop = frame_loop();
        let mut gl = RecordingContext::new();

        frame_loop.on_resize(&mut gl, ResizeEvent { width: 1, height: 10_000_000 });

        assert_eq!(gl.viewport_value(), Viewport::covering(1, 10_000_000));
        assert!(frame_loop.projection().aspect() > 0.0);
        assert!(gl.projection_matrix().iter().all(|value| value.is_finite()));
    }

    #[test]
    fn test_update_requests_exit_only_when_key_down() {
        let mut frame_loop = frame_loop();

        let mut exit = ExitSignal::new();
        frame_loop.on_update_frame(&KeyboardSnapshot::new(), &mut exit, FRAME);
        frame_loop.on_update_frame(
            &KeyboardSnapshot::with_keys([KeyCode::Space]),
            &mut exit,
            FRAME,
        );
        assert!(!exit.is_requested());

        frame_loop.on_update_frame(&KeyboardSnapshot::with_keys([KeyCode::Escape]), &mut exit, FRAME);
        assert!(exit.is_requested());
    }

    #[test]
    fn test_update_is_level_triggered() {
        let mut frame_loop = frame_loop();
        let mut exit = ExitSignal::new();
        let held = KeyboardSnapshot::with_keys([KeyCode::Escape]);

        for _ in 0..3 {
            frame_loop.on_update_frame(&held, &mut exit, FRAME);
        }

        assert_eq!(exit.request_count(), 3);
    }

    #[test]
    fn test_render_command_order() {
        let mut frame_loop = frame_loop();
        let mut gl = RecordingContext::new();
        frame_loop.on_load(&mut gl);
        frame_loop.on_resize(&mut gl, ResizeEvent { width: 800, height: 600 });
        gl.clear_log();

        frame_loop.on_render_frame(&mut gl, FRAME);

        let view = Mat4::look_at(&Point3::origin(), &Point3::new(0.0, 0.0, 1.0), &Vec3::y());
        let commands = gl.commands();
        assert_eq!(commands[0], GlCommand::Clear(ClearMask::COLOR | ClearMask::DEPTH));
        assert_eq!(commands[1], GlCommand::MatrixMode(MatrixMode::Projection));
        assert_eq!(
            commands[2],
            GlCommand::LoadMatrix(MatrixMode::Projection, *frame_loop.projection().matrix())
        );
        assert_eq!(commands[3], GlCommand::MatrixMode(MatrixMode::Modelview));
        assert!(matches!(commands[4], GlCommand::LoadMatrix(MatrixMode::Modelview, m) if m == view));
        assert_eq!(commands[5], GlCommand::Begin(PrimitiveType::Quads));
        assert_eq!(commands[commands.len() - 2], GlCommand::End);
        assert_eq!(commands[commands.len() - 1], GlCommand::SwapBuffers);
        assert_eq!(commands.len(), 6 + 8 + 2);
    }

    #[test]
    fn test_render_order_holds_every_frame() {
        logging::init_for_tests();
        let mut frame_loop = frame_loop();
        let mut gl = RecordingContext::new();

        // Not loaded, not resized
        for frame in 0..3 {
            gl.clear_log();
            frame_loop.on_render_frame(&mut gl, FrameEvent { elapsed: 0.0, frame });

            let clear = gl.position_of(|c| matches!(c, GlCommand::Clear(_))).expect("clear");
            let begin = gl.position_of(|c| matches!(c, GlCommand::Begin(_))).expect("begin");
            let end = gl.position_of(|c| matches!(c, GlCommand::End)).expect("end");
            let swap = gl.position_of(|c| matches!(c, GlCommand::SwapBuffers)).expect("swap");
            assert!(clear < begin && begin < end && end < swap);
        }

        assert_eq!(gl.frames_presented(), 3);
        assert_eq!(gl.primitives().len(), 1);
    }

    #[test]
    fn test_render_draws_sample_quad() {
        let mut frame_loop = frame_loop();
        let mut gl = RecordingContext::new();

        frame_loop.on_render_frame(&mut gl, FRAME);

        let quad = &gl.primitives()[0];
        assert_eq!(quad.primitive, PrimitiveType::Quads);
        let expected = QuadGeometry::sample();
        for (recorded, vertex) in quad.vertices.iter().zip(expected.vertices.iter()) {
            assert_eq!(recorded.position, vertex.position);
            assert_eq!(recorded.color, vertex.color);
        }
        assert_eq!(*gl.modelview_matrix(), *frame_loop.view().matrix());
    }

    #[test]
    fn test_bound_callbacks_drive_headless_window() {
        logging::init_for_tests();
        let frame_loop = frame_loop().shared();
        let mut callbacks = FrameLoop::bind(&frame_loop);
        let backend = HeadlessWindow::new(800, 600)
            .with_event_at(1, AppEvent::WindowResized { width: 400, height: 400 })
            .with_escape_at(2);

        let mut window = GameWindow::new(backend, 0.0);
        let summary = window.run(&mut callbacks);

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.exit_requests, 1);
        assert_eq!(window.state(), WindowState::Destroyed);

        let frame_loop = frame_loop.borrow();
        assert!(frame_loop.is_loaded());
        assert_eq!(frame_loop.viewport(), Viewport::covering(400, 400));
        assert_relative_eq!(frame_loop.projection().aspect(), 1.0);

        let gl = window.backend().context();
        assert_eq!(gl.frames_presented(), 3);
        assert!(gl.is_enabled(Capability::DepthTest));
        assert_eq!(gl.viewport_value(), Viewport::covering(400, 400));
    }
}
