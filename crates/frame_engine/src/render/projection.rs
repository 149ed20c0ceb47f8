//! Projection and view transforms

use crate::config::CameraConfig;
use crate::foundation::math::{Mat4, Mat4Ext, Point3, Vec3};

/// Smallest aspect handed to the projection; nalgebra treats anything within
/// `f32::EPSILON` of zero as a zero aspect.
const MIN_ASPECT: f32 = 1e-6;

/// Perspective projection derived from a client size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    matrix: Mat4,
}

impl ProjectionState {
    /// Build the projection for a `width` x `height` client area
    ///
    /// Both dimensions are clamped to at least one pixel before the aspect
    /// ratio is taken, and the ratio itself to at least `MIN_ASPECT`, so a
    /// zero-height, minimized or absurdly tall window still yields a finite
    /// matrix.
    pub fn new(fov_y: f32, width: u32, height: u32, near: f32, far: f32) -> Self {
        let aspect = Self::aspect_for(width, height);
        Self {
            fov_y,
            aspect,
            near,
            far,
            matrix: Mat4::perspective_fov(fov_y, aspect, near, far),
        }
    }

    /// Build the projection using a camera's constants
    pub fn from_camera(camera: &CameraConfig, width: u32, height: u32) -> Self {
        Self::new(camera.fov_y(), width, height, camera.near, camera.far)
    }

    /// Aspect ratio used for a client area, after clamping
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_for(width: u32, height: u32) -> f32 {
        (width.max(1) as f32 / height.max(1) as f32).max(MIN_ASPECT)
    }

    /// Vertical field of view in radians
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Near clip distance
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip distance
    pub fn far(&self) -> f32 {
        self.far
    }

    /// The projection matrix
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }
}

/// Look-at view transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    eye: Point3,
    target: Point3,
    up: Vec3,
    matrix: Mat4,
}

impl ViewState {
    /// Build the view looking from `eye` at `target`
    pub fn look_at(eye: Point3, target: Point3, up: Vec3) -> Self {
        Self {
            eye,
            target,
            up,
            matrix: Mat4::look_at(&eye, &target, &up),
        }
    }

    /// Build the view from a camera's constants
    pub fn from_camera(camera: &CameraConfig) -> Self {
        Self::look_at(camera.eye_point(), camera.target_point(), camera.up_vector())
    }

    /// Eye position
    pub fn eye(&self) -> Point3 {
        self.eye
    }

    /// Look-at target
    pub fn target(&self) -> Point3 {
        self.target
    }

    /// Up direction
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// The view matrix
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }
}
