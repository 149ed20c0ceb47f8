//! Recording graphics context
//!
//! Applies every call to an in-memory copy of the fixed-function state and
//! appends it to a command log. Used by the headless window backend and by
//! tests that check what a frame submitted and in which order.
//!
//! The log grows with every call until [`RecordingContext::clear_log`] runs,
//! so long or unbounded runs should clear it once per frame (see
//! `HeadlessWindow::with_rolling_log`).

use std::collections::HashSet;

use super::{Capability, ClearMask, Color4, GraphicsContext, MatrixMode, PrimitiveType, Viewport};
use crate::foundation::math::{Mat4, Point3};

/// One call made against a [`RecordingContext`]
#[derive(Debug, Clone, PartialEq)]
pub enum GlCommand {
    /// `clear_color`
    ClearColor(Color4),
    /// `enable`
    Enable(Capability),
    /// `disable`
    Disable(Capability),
    /// `viewport`
    Viewport(Viewport),
    /// `matrix_mode`
    MatrixMode(MatrixMode),
    /// `load_matrix`, tagged with the stage it landed in
    LoadMatrix(MatrixMode, Mat4),
    /// `begin`
    Begin(PrimitiveType),
    /// `color`
    Color(Color4),
    /// `vertex`
    Vertex(Point3),
    /// `end`
    End,
    /// `clear`
    Clear(ClearMask),
    /// `swap_buffers`
    SwapBuffers,
}

/// Vertex captured between `begin` and `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedVertex {
    /// Submitted position
    pub position: Point3,
    /// Current color at submission time
    pub color: Color4,
}

/// A finished `begin`/`end` pair
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPrimitive {
    /// Primitive kind
    pub primitive: PrimitiveType,
    /// Vertices in submission order
    pub vertices: Vec<RecordedVertex>,
}

/// Graphics context that records instead of rendering
#[derive(Debug, Clone)]
pub struct RecordingContext {
    commands: Vec<GlCommand>,
    clear_color: Color4,
    enabled: HashSet<Capability>,
    viewport: Viewport,
    matrix_mode: MatrixMode,
    projection: Mat4,
    modelview: Mat4,
    current_color: Color4,
    open_primitive: Option<RecordedPrimitive>,
    primitives: Vec<RecordedPrimitive>,
    frames_presented: u64,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingContext {
    /// Create a context with GL's initial state
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            clear_color: Color4::TRANSPARENT,
            enabled: HashSet::new(),
            viewport: Viewport::default(),
            matrix_mode: MatrixMode::Modelview,
            projection: Mat4::identity(),
            modelview: Mat4::identity(),
            current_color: Color4::WHITE,
            open_primitive: None,
            primitives: Vec::new(),
            frames_presented: 0,
        }
    }

    /// Every call so far, in order
    pub fn commands(&self) -> &[GlCommand] {
        &self.commands
    }

    /// Forget the command log and captured primitives, keeping state
    pub fn clear_log(&mut self) {
        self.commands.clear();
        self.primitives.clear();
    }

    /// Index of the first command matching `predicate`
    pub fn position_of(&self, predicate: impl Fn(&GlCommand) -> bool) -> Option<usize> {
        self.commands.iter().position(predicate)
    }

    /// Current clear color
    pub fn clear_color_value(&self) -> Color4 {
        self.clear_color
    }

    /// Whether a capability is enabled
    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.enabled.contains(&capability)
    }

    /// Current viewport
    pub fn viewport_value(&self) -> Viewport {
        self.viewport
    }

    /// Currently selected matrix stage
    pub fn current_matrix_mode(&self) -> MatrixMode {
        self.matrix_mode
    }

    /// Matrix loaded into the projection stage
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// Matrix loaded into the modelview stage
    pub fn modelview_matrix(&self) -> &Mat4 {
        &self.modelview
    }

    /// Current vertex color
    pub fn current_color(&self) -> Color4 {
        self.current_color
    }

    /// Primitives completed since the log was last cleared
    pub fn primitives(&self) -> &[RecordedPrimitive] {
        &self.primitives
    }

    /// Number of `swap_buffers` calls
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl GraphicsContext for RecordingContext {
    fn clear_color(&mut self, color: Color4) {
        self.clear_color = color.clamped();
        self.commands.push(GlCommand::ClearColor(color));
    }

    fn enable(&mut self, capability: Capability) {
        self.enabled.insert(capability);
        self.commands.push(GlCommand::Enable(capability));
    }

    fn disable(&mut self, capability: Capability) {
        self.enabled.remove(&capability);
        self.commands.push(GlCommand::Disable(capability));
    }

    fn viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.commands.push(GlCommand::Viewport(viewport));
    }

    fn matrix_mode(&mut self, mode: MatrixMode) {
        self.matrix_mode = mode;
        self.commands.push(GlCommand::MatrixMode(mode));
    }

    fn load_matrix(&mut self, matrix: &Mat4) {
        match self.matrix_mode {
            MatrixMode::Projection => self.projection = *matrix,
            MatrixMode::Modelview => self.modelview = *matrix,
        }
        self.commands.push(GlCommand::LoadMatrix(self.matrix_mode, *matrix));
    }

    fn begin(&mut self, primitive: PrimitiveType) {
        if let Some(open) = self.open_primitive.take() {
            log::warn!("begin({primitive:?}) while {:?} is still open; discarding it", open.primitive);
        }
        self.open_primitive = Some(RecordedPrimitive {
            primitive,
            vertices: Vec::new(),
        });
        self.commands.push(GlCommand::Begin(primitive));
    }

    fn color(&mut self, color: Color4) {
        self.current_color = color.clamped();
        self.commands.push(GlCommand::Color(color));
    }

    fn vertex(&mut self, position: &Point3) {
        match self.open_primitive.as_mut() {
            Some(open) => open.vertices.push(RecordedVertex {
                position: *position,
                color: self.current_color,
            }),
            None => log::warn!("vertex {position} submitted outside begin/end"),
        }
        self.commands.push(GlCommand::Vertex(*position));
    }

    fn end(&mut self) {
        match self.open_primitive.take() {
            Some(done) => self.primitives.push(done),
            None => log::warn!("end() without a matching begin()"),
        }
        self.commands.push(GlCommand::End);
    }

    fn clear(&mut self, mask: ClearMask) {
        self.commands.push(GlCommand::Clear(mask));
    }

    fn swap_buffers(&mut self) {
        if self.open_primitive.is_some() {
            log::warn!("swap_buffers() inside begin/end");
        }
        self.frames_presented += 1;
        self.commands.push(GlCommand::SwapBuffers);
    }
}
