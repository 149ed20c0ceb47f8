//! Window management using GLFW
//!
//! Creates an OpenGL 2.1 compatibility context so the fixed-function entry
//! points (`glBegin`, `glLoadMatrixf`, ...) are available, and loads them
//! into a function table through the context's proc-address lookup.

use std::ffi::c_void;

use glfw::Context as _;

use super::{AppEvent, WindowBackend, WindowError, WindowResult};
use crate::config::{GraphicsMode, VSyncMode, WindowConfig};
use crate::foundation::math::{Mat4, Mat4Ext, Point3};
use crate::input::{KeyCode, KeyboardState};
use crate::render::{Capability, ClearMask, Color4, GraphicsContext, MatrixMode, PrimitiveType, Viewport};

type GlEnum = u32;

/// Fixed-function GL 1.x entry points
struct FixedFunctionGl {
    clear_color: unsafe extern "system" fn(f32, f32, f32, f32),
    enable: unsafe extern "system" fn(GlEnum),
    disable: unsafe extern "system" fn(GlEnum),
    viewport: unsafe extern "system" fn(i32, i32, i32, i32),
    matrix_mode: unsafe extern "system" fn(GlEnum),
    load_matrix_f: unsafe extern "system" fn(*const f32),
    begin: unsafe extern "system" fn(GlEnum),
    end: unsafe extern "system" fn(),
    color_4f: unsafe extern "system" fn(f32, f32, f32, f32),
    vertex_3f: unsafe extern "system" fn(f32, f32, f32),
    clear: unsafe extern "system" fn(u32),
}

fn proc_address(window: &mut glfw::PWindow, name: &'static str) -> WindowResult<*const c_void> {
    // GLProc is pointer-sized whether glfw exposes it as a raw pointer or as
    // an optional function pointer; null means "not exported".
    #[allow(clippy::useless_transmute)]
    let address: *const c_void = unsafe { std::mem::transmute(window.get_proc_address(name)) };
    if address.is_null() {
        Err(WindowError::MissingEntryPoint(name))
    } else {
        Ok(address)
    }
}

macro_rules! load_entry_points {
    ($window:ident; $($field:ident => $name:literal),* $(,)?) => {
        FixedFunctionGl {
            $($field: {
                let address = proc_address($window, $name)?;
                // SAFETY: non-null export of the current context whose C
                // signature matches the field type.
                unsafe { std::mem::transmute::<*const c_void, _>(address) }
            },)*
        }
    };
}

impl FixedFunctionGl {
    fn load(window: &mut glfw::PWindow) -> WindowResult<Self> {
        Ok(load_entry_points! { window;
            clear_color => "glClearColor",
            enable => "glEnable",
            disable => "glDisable",
            viewport => "glViewport",
            matrix_mode => "glMatrixMode",
            load_matrix_f => "glLoadMatrixf",
            begin => "glBegin",
            end => "glEnd",
            color_4f => "glColor4f",
            vertex_3f => "glVertex3f",
            clear => "glClear",
        })
    }
}

/// Window plus the GL function table bound to its context
struct GlSurface {
    window: glfw::PWindow,
    gl: FixedFunctionGl,
}

// SAFETY (all calls below): the table was loaded from `window`'s context,
// which is made current in `GlfwWindow::new` and stays current on this thread
// until `dispose`.
impl GraphicsContext for GlSurface {
    fn clear_color(&mut self, color: Color4) {
        let [r, g, b, a] = color.clamped().to_array();
        unsafe { (self.gl.clear_color)(r, g, b, a) }
    }

    fn enable(&mut self, capability: Capability) {
        unsafe { (self.gl.enable)(capability.gl_enum()) }
    }

    fn disable(&mut self, capability: Capability) {
        unsafe { (self.gl.disable)(capability.gl_enum()) }
    }

    fn viewport(&mut self, viewport: Viewport) {
        let width = i32::try_from(viewport.width).unwrap_or(i32::MAX);
        let height = i32::try_from(viewport.height).unwrap_or(i32::MAX);
        unsafe { (self.gl.viewport)(viewport.x, viewport.y, width, height) }
    }

    fn matrix_mode(&mut self, mode: MatrixMode) {
        unsafe { (self.gl.matrix_mode)(mode.gl_enum()) }
    }

    fn load_matrix(&mut self, matrix: &Mat4) {
        let elements = matrix.to_column_major();
        unsafe { (self.gl.load_matrix_f)(elements.as_ptr()) }
    }

    fn begin(&mut self, primitive: PrimitiveType) {
        unsafe { (self.gl.begin)(primitive.gl_enum()) }
    }

    fn color(&mut self, color: Color4) {
        let [r, g, b, a] = color.clamped().to_array();
        unsafe { (self.gl.color_4f)(r, g, b, a) }
    }

    fn vertex(&mut self, position: &Point3) {
        unsafe { (self.gl.vertex_3f)(position.x, position.y, position.z) }
    }

    fn end(&mut self) {
        unsafe { (self.gl.end)() }
    }

    fn clear(&mut self, mask: ClearMask) {
        unsafe { (self.gl.clear)(mask.bits()) }
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}

impl KeyboardState for GlSurface {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.window.get_key(glfw_key(key)) != glfw::Action::Release
    }
}

const fn glfw_key(key: KeyCode) -> glfw::Key {
    match key {
        KeyCode::Escape => glfw::Key::Escape,
        KeyCode::Space => glfw::Key::Space,
    }
}

const fn swap_interval(vsync: VSyncMode) -> glfw::SwapInterval {
    match vsync {
        VSyncMode::Off => glfw::SwapInterval::None,
        VSyncMode::On => glfw::SwapInterval::Sync(1),
        VSyncMode::Adaptive => glfw::SwapInterval::Adaptive,
    }
}

fn framebuffer_hints(mode: &GraphicsMode) -> [glfw::WindowHint; 4] {
    [
        glfw::WindowHint::DepthBits(Some(mode.depth_bits)),
        glfw::WindowHint::StencilBits(Some(mode.stencil_bits)),
        glfw::WindowHint::Samples((mode.samples > 0).then_some(mode.samples)),
        glfw::WindowHint::DoubleBuffer(mode.double_buffer),
    ]
}

/// GLFW window with a current fixed-function OpenGL context
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    surface: GlSurface,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    disposed: bool,
}

impl GlfwWindow {
    /// Open a window and make its context current on this thread
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors).map_err(|_| WindowError::InitializationFailed)?;

        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::OpenGl));
        glfw.window_hint(glfw::WindowHint::ContextVersion(2, 1));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));
        for hint in framebuffer_hints(&config.graphics_mode) {
            glfw.window_hint(hint);
        }

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        glfw.set_swap_interval(swap_interval(config.vsync));

        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        let gl = FixedFunctionGl::load(&mut window)?;
        log::info!(
            "Created {}x{} window \"{}\" (vsync {:?})",
            config.width,
            config.height,
            config.title,
            config.vsync
        );

        Ok(Self {
            glfw,
            surface: GlSurface { window, gl },
            events,
            disposed: false,
        })
    }
}

impl WindowBackend for GlfwWindow {
    fn graphics(&mut self) -> &mut dyn GraphicsContext {
        &mut self.surface
    }

    fn keyboard(&self) -> &dyn KeyboardState {
        &self.surface
    }

    fn poll_events(&mut self) -> Vec<AppEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| match event {
                glfw::WindowEvent::FramebufferSize(width, height) => Some(AppEvent::WindowResized {
                    width: u32::try_from(width).unwrap_or(0),
                    height: u32::try_from(height).unwrap_or(0),
                }),
                glfw::WindowEvent::Close => Some(AppEvent::WindowCloseRequested),
                _ => None,
            })
            .collect()
    }

    fn client_size(&self) -> (u32, u32) {
        let (width, height) = self.surface.window.get_framebuffer_size();
        (u32::try_from(width).unwrap_or(0), u32::try_from(height).unwrap_or(0))
    }

    fn should_close(&self) -> bool {
        self.surface.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.surface.window.set_should_close(should_close);
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::info!("Releasing OpenGL context");
        self.surface.window.hide();
        glfw::make_context_current(None);
        self.disposed = true;
    }
}
