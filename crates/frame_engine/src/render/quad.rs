//! The sample's colored quad

use super::{Color4, GraphicsContext, PrimitiveType};
use crate::foundation::math::Point3;

/// Vertex with position and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    /// Position in world space
    pub position: Point3,
    /// Vertex color
    pub color: Color4,
}

/// Four vertices drawn as a single `Quads` primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadGeometry {
    /// Vertices in winding order
    pub vertices: [QuadVertex; 4],
}

impl QuadGeometry {
    /// The quad four units in front of the origin
    ///
    /// Each corner spells its color differently; all of them land on the same
    /// normalized RGBA.
    pub fn sample() -> Self {
        Self {
            vertices: [
                QuadVertex {
                    position: Point3::new(-1.0, 1.0, 4.0),
                    color: Color4::WHITE,
                },
                QuadVertex {
                    position: Point3::new(-1.0, -1.0, 4.0),
                    color: Color4::from([1.0, 0.0, 0.0, 1.0]),
                },
                QuadVertex {
                    position: Point3::new(1.0, -1.0, 4.0),
                    color: Color4::new(0.0, 1.0, 0.0, 1.0),
                },
                QuadVertex {
                    position: Point3::new(1.0, 1.0, 4.0),
                    color: Color4::from_bytes(0, 0, 255, 255),
                },
            ],
        }
    }

    /// Submit the quad as one begin/end pair
    pub fn draw(&self, gl: &mut dyn GraphicsContext) {
        gl.begin(PrimitiveType::Quads);
        for vertex in &self.vertices {
            gl.color(vertex.color);
            gl.vertex(&vertex.position);
        }
        gl.end();
    }
}
