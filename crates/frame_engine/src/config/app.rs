//! Application, window and camera settings

use serde::Deserialize;

use super::{Config, ConfigError};
use crate::foundation::math::{utils, Point3, Vec3};
use crate::render::Color4;

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Projection and view constants
    pub camera: CameraConfig,

    /// Color the framebuffer is cleared to
    pub clear_color: Color4,

    /// Update/render frequency in Hz; 0 runs unthrottled
    pub update_rate_hz: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            clear_color: Color4::BLACK,
            update_rate_hz: 30.0,
        }
    }
}

impl Config for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;

        let rate = self.update_rate_hz;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::Invalid(format!("update_rate_hz must be finite and >= 0, got {rate}")));
        }
        if rate > 0.0 && !(1.0 / rate).is_finite() {
            return Err(ConfigError::Invalid(format!("update_rate_hz {rate} has no representable frame period")));
        }
        Ok(())
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// Window title
    pub title: String,

    /// VSync setting
    pub vsync: VSyncMode,

    /// Whether window is resizable
    pub resizable: bool,

    /// Requested framebuffer format
    pub graphics_mode: GraphicsMode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "0-3:GameWindow".to_string(),
            vsync: VSyncMode::On,
            resizable: true,
            graphics_mode: GraphicsMode::default(),
        }
    }
}

/// Buffer swap synchronization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum VSyncMode {
    /// Swap immediately
    Off,
    /// Wait for vertical blank
    #[default]
    On,
    /// Wait for vertical blank unless the frame is late
    Adaptive,
}

/// Framebuffer format requested from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraphicsMode {
    /// Depth buffer bits
    pub depth_bits: u32,
    /// Stencil buffer bits
    pub stencil_bits: u32,
    /// MSAA samples, 0 disables multisampling
    pub samples: u32,
    /// Double buffering
    pub double_buffer: bool,
}

impl Default for GraphicsMode {
    fn default() -> Self {
        Self {
            depth_bits: 24,
            stencil_bits: 8,
            samples: 0,
            double_buffer: true,
        }
    }
}

/// Projection and view constants
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
    /// Eye position
    pub eye: [f32; 3],
    /// Point the camera looks at
    pub target: [f32; 3],
    /// Up direction
    pub up: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 1.0,
            far: 64.0,
            eye: [0.0, 0.0, 0.0],
            target: [0.0, 0.0, 1.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

impl CameraConfig {
    /// Vertical field of view in radians
    pub fn fov_y(&self) -> f32 {
        utils::deg_to_rad(self.fov_y_degrees)
    }

    /// Eye position as a point
    pub fn eye_point(&self) -> Point3 {
        Point3::from(self.eye)
    }

    /// Target as a point
    pub fn target_point(&self) -> Point3 {
        Point3::from(self.target)
    }

    /// Up direction as a vector
    pub fn up_vector(&self) -> Vec3 {
        Vec3::from(self.up)
    }

    /// Check the values a perspective projection needs
    ///
    /// `near` must be positive, `far` beyond it, and the field of view
    /// strictly between 0 and 180 degrees.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { fov_y_degrees, near, far, .. } = *self;

        if !(near.is_finite() && near > 0.0) {
            return Err(ConfigError::Invalid(format!("camera.near must be > 0, got {near}")));
        }
        if !(far.is_finite() && far > near) {
            return Err(ConfigError::Invalid(format!("camera.far must exceed near ({near}), got {far}")));
        }
        if !(fov_y_degrees > 0.0 && fov_y_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_y_degrees must be within (0, 180), got {fov_y_degrees}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::foundation::math::constants::QUARTER_PI;
    use approx::assert_relative_eq;
    use std::path::Path;

    #[test]
    fn test_defaults_match_sample() {
        let config = AppConfig::default();

        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.vsync, VSyncMode::On);
        assert_eq!(config.clear_color, Color4::BLACK);
        assert_relative_eq!(config.camera.fov_y(), QUARTER_PI, epsilon = 1e-6);
        assert_relative_eq!(config.camera.near, 1.0);
        assert_relative_eq!(config.camera.far, 64.0);
        assert_relative_eq!(config.update_rate_hz, 30.0);
    }

    #[test]
    fn test_parse_partial_toml() {
        let text = r#"
            update_rate_hz = 60.0
            clear_color = [0.5, 0.5, 0.5, 1.0]

            [window]
            title = "quad"
            vsync = "Adaptive"

            [window.graphics_mode]
            samples = 4
        "#;

        let config = AppConfig::parse(Path::new("app.toml"), text).expect("valid toml");

        assert_eq!(config.window.title, "quad");
        assert_eq!(config.window.vsync, VSyncMode::Adaptive);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.graphics_mode.samples, 4);
        assert_eq!(config.window.graphics_mode.depth_bits, 24);
        assert_eq!(config.clear_color, Color4::new(0.5, 0.5, 0.5, 1.0));
        assert_relative_eq!(config.update_rate_hz, 60.0);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_parse_ron() {
        let text = "(window: (width: 1024, height: 768), camera: (far: 100.0))";

        let config = AppConfig::parse(Path::new("app.ron"), text).expect("valid ron");

        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 768);
        assert_relative_eq!(config.camera.far, 100.0);
        assert_relative_eq!(config.camera.near, 1.0);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = AppConfig::parse(Path::new("app.json"), "{}");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = AppConfig::parse(Path::new("app.toml"), "window = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    fn parse_toml(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::parse(Path::new("app.toml"), text)
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_near_equal_to_far_rejected() {
        let result = parse_toml("[camera]\nnear = 5.0\nfar = 5.0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_far_before_near_rejected() {
        let result = parse_toml("[camera]\nnear = 10.0\nfar = 2.0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_positive_near_rejected() {
        for near in ["0.0", "-1.0"] {
            let result = parse_toml(&format!("[camera]\nnear = {near}"));
            assert!(matches!(result, Err(ConfigError::Invalid(_))), "near = {near}");
        }
    }

    #[test]
    fn test_fov_bounds_rejected() {
        for fov in ["0.0", "180.0", "-30.0", "270.0"] {
            let result = parse_toml(&format!("[camera]\nfov_y_degrees = {fov}"));
            assert!(matches!(result, Err(ConfigError::Invalid(_))), "fov = {fov}");
        }
        assert!(parse_toml("[camera]\nfov_y_degrees = 179.0").is_ok());
    }

    #[test]
    fn test_rate_without_period_rejected() {
        let result = parse_toml("update_rate_hz = 1e-320");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = parse_toml("update_rate_hz = -30.0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = parse_toml("update_rate_hz = 0.0").expect("zero runs unthrottled");
        assert_relative_eq!(config.update_rate_hz, 0.0);
    }

    #[test]
    fn test_ron_is_validated_too() {
        let result = AppConfig::parse(Path::new("app.ron"), "(camera: (near: 64.0))");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::load_from_file("/nonexistent/quad_app.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
