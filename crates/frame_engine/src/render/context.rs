//! Fixed-function graphics context abstraction
//!
//! The ambient state of an immediate-mode GL context (current matrix stage,
//! current color, enabled capabilities) is made explicit here: everything a
//! frame does to the driver goes through a [`GraphicsContext`] value. The
//! GLFW backend forwards to real GL entry points; [`super::RecordingContext`]
//! keeps a log instead, so frame logic can be checked without a display.

use bitflags::bitflags;

use super::Color4;
use crate::foundation::math::{Mat4, Point3};

bitflags! {
    /// Buffers cleared by [`GraphicsContext::clear`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearMask: u32 {
        /// Color buffer
        const COLOR = 0x0000_4000;
        /// Depth buffer
        const DEPTH = 0x0000_0100;
        /// Stencil buffer
        const STENCIL = 0x0000_0400;
    }
}

/// Server-side capabilities toggled with enable/disable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Depth testing
    DepthTest,
    /// Back/front face culling
    CullFace,
    /// Alpha blending
    Blend,
    /// Fixed-function lighting
    Lighting,
    /// 2D texturing
    Texture2D,
}

impl Capability {
    /// GL enum value
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::DepthTest => 0x0B71,
            Self::CullFace => 0x0B44,
            Self::Blend => 0x0BE2,
            Self::Lighting => 0x0B50,
            Self::Texture2D => 0x0DE1,
        }
    }
}

/// Matrix stage targeted by [`GraphicsContext::load_matrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixMode {
    /// Object-to-eye transform
    #[default]
    Modelview,
    /// Eye-to-clip transform
    Projection,
}

impl MatrixMode {
    /// GL enum value
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Modelview => 0x1700,
            Self::Projection => 0x1701,
        }
    }
}

/// Immediate-mode primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Independent points
    Points,
    /// Independent line segments
    Lines,
    /// Closed line loop
    LineLoop,
    /// Connected line strip
    LineStrip,
    /// Independent triangles
    Triangles,
    /// Triangle strip
    TriangleStrip,
    /// Triangle fan
    TriangleFan,
    /// Independent quads
    Quads,
    /// Quad strip
    QuadStrip,
    /// Convex polygon
    Polygon,
}

impl PrimitiveType {
    /// GL enum value
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Points => 0x0000,
            Self::Lines => 0x0001,
            Self::LineLoop => 0x0002,
            Self::LineStrip => 0x0003,
            Self::Triangles => 0x0004,
            Self::TriangleStrip => 0x0005,
            Self::TriangleFan => 0x0006,
            Self::Quads => 0x0007,
            Self::QuadStrip => 0x0008,
            Self::Polygon => 0x0009,
        }
    }
}

/// Viewport rectangle in window pixels, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    /// Left edge
    pub x: i32,
    /// Bottom edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Viewport covering a whole client area
    pub const fn covering(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}

/// Fixed-function rasterization API
///
/// Calls never fail from the caller's point of view; a lost context is a
/// platform fault the backend deals with.
pub trait GraphicsContext {
    /// Set the color used by [`clear`](Self::clear) for the color buffer
    fn clear_color(&mut self, color: Color4);

    /// Enable a capability
    fn enable(&mut self, capability: Capability);

    /// Disable a capability
    fn disable(&mut self, capability: Capability);

    /// Set the viewport transform
    fn viewport(&mut self, viewport: Viewport);

    /// Select the matrix stage later loads apply to
    fn matrix_mode(&mut self, mode: MatrixMode);

    /// Replace the current stage's matrix
    fn load_matrix(&mut self, matrix: &Mat4);

    /// Start a primitive
    fn begin(&mut self, primitive: PrimitiveType);

    /// Set the current vertex color
    fn color(&mut self, color: Color4);

    /// Emit a vertex using the current color
    fn vertex(&mut self, position: &Point3);

    /// Finish the current primitive
    fn end(&mut self);

    /// Clear the selected buffers
    fn clear(&mut self, mask: ClearMask);

    /// Present the back buffer
    fn swap_buffers(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_mask_matches_gl_bits() {
        let mask = ClearMask::COLOR | ClearMask::DEPTH;
        assert_eq!(mask.bits(), 0x4100);
        assert!(!mask.contains(ClearMask::STENCIL));
    }

    #[test]
    fn test_enum_values() {
        assert_eq!(Capability::DepthTest.gl_enum(), 0x0B71);
        assert_eq!(MatrixMode::Projection.gl_enum(), 0x1701);
        assert_eq!(PrimitiveType::Quads.gl_enum(), 0x0007);
    }

    #[test]
    fn test_viewport_covering() {
        let viewport = Viewport::covering(800, 600);
        assert_eq!((viewport.x, viewport.y, viewport.width, viewport.height), (0, 0, 800, 600));
    }
}
