//! Configuration system

mod app;

pub use app::{AppConfig, CameraConfig, GraphicsMode, VSyncMode, WindowConfig};
pub use serde::Deserialize;

use std::path::Path;

/// Configuration trait
pub trait Config: for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    ///
    /// The format is picked from the extension: `.toml` or `.ron`.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse(path, &contents)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text, using `path` only to pick the format
    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            Some("ron") => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize but cannot be used
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Value out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
