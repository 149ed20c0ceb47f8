//! Rendering
//!
//! The fixed-function context abstraction, its recording implementation, and
//! the transforms and geometry a frame submits.

mod color;
mod context;
mod projection;
mod quad;
mod recording;

pub use color::Color4;
pub use context::{Capability, ClearMask, GraphicsContext, MatrixMode, PrimitiveType, Viewport};
pub use projection::{ProjectionState, ViewState};
pub use quad::{QuadGeometry, QuadVertex};
pub use recording::{GlCommand, RecordedPrimitive, RecordedVertex, RecordingContext};
