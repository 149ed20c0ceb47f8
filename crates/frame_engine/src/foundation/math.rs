//! Math utilities and types
//!
//! Matrices follow OpenGL fixed-function conventions: right-handed eye space,
//! the camera looking down its local -Z, clip depth in [-1, 1], and
//! column-major storage when handed to the driver.

pub use nalgebra::{Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

/// Extension trait for Mat4 with the fixed-function transforms
pub trait Mat4Ext {
    /// Create an OpenGL perspective projection from a vertical field of view
    fn perspective_fov(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: &Point3, target: &Point3, up: &Vec3) -> Mat4;

    /// Recover the aspect ratio baked into a perspective projection
    fn projection_aspect(&self) -> f32;

    /// Column-major elements, the layout `glLoadMatrixf` expects
    fn to_column_major(&self) -> [f32; 16];
}

impl Mat4Ext for Mat4 {
    fn perspective_fov(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // [ f/a  0    0            0          ]
        // [ 0    f    0            0          ]
        // [ 0    0    (f+n)/(n-f)  2fn/(n-f)  ]
        // [ 0    0   -1            0          ]   with f = 1/tan(fov/2)
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: &Point3, target: &Point3, up: &Vec3) -> Mat4 {
        Mat4::look_at_rh(eye, target, up)
    }

    fn projection_aspect(&self) -> f32 {
        self[(1, 1)] / self[(0, 0)]
    }

    fn to_column_major(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.as_slice());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_perspective_terms() {
        let projection = Mat4::perspective_fov(constants::QUARTER_PI, 2.0, 1.0, 64.0);
        let focal = 1.0 / (constants::QUARTER_PI / 2.0).tan();

        assert_relative_eq!(projection[(0, 0)], focal / 2.0, epsilon = EPSILON);
        assert_relative_eq!(projection[(1, 1)], focal, epsilon = EPSILON);
        assert_relative_eq!(projection[(2, 2)], (64.0 + 1.0) / (1.0 - 64.0), epsilon = EPSILON);
        assert_relative_eq!(projection[(2, 3)], 2.0 * 64.0 * 1.0 / (1.0 - 64.0), epsilon = EPSILON);
        assert_relative_eq!(projection[(3, 2)], -1.0, epsilon = EPSILON);
        assert_relative_eq!(projection.projection_aspect(), 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_look_down_positive_z() {
        let view = Mat4::look_at(&Point3::origin(), &Point3::new(0.0, 0.0, 1.0), &Vec3::y());

        // Looking along +Z with +Y up puts world -X on the camera's right
        let eye_space = view.transform_point(&Point3::new(-1.0, 1.0, 4.0));
        assert_relative_eq!(eye_space, Point3::new(1.0, 1.0, -4.0), epsilon = EPSILON);
    }

    #[test]
    fn test_column_major_layout() {
        let translation = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let elements = translation.to_column_major();

        assert_eq!(&elements[12..15], &[1.0, 2.0, 3.0]);
        assert_relative_eq!(elements[15], 1.0);
    }

    #[test]
    fn test_deg_to_rad() {
        assert_relative_eq!(utils::deg_to_rad(45.0), constants::QUARTER_PI, epsilon = EPSILON);
    }
}
