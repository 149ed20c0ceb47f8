//! Colored quad demo
//!
//! Opens an 800x600 window, draws one quad per frame with immediate-mode
//! calls, and exits on Escape. Set `QUAD_APP_CONFIG` to a `.toml` or `.ron`
//! file to override window, camera or timing settings.

use frame_engine::foundation::logging;
use frame_engine::prelude::*;
use thiserror::Error;

const CONFIG_ENV: &str = "QUAD_APP_CONFIG";

/// Application-level errors
#[derive(Error, Debug)]
enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Window error: {0}")]
    Window(#[from] WindowError),
}

fn load_config() -> Result<AppConfig, AppError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Ok(AppConfig::load_from_file(path)?),
        None => {
            log::debug!("{CONFIG_ENV} not set, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = load_config()?;

    let backend = GlfwWindow::new(&config.window)?;
    let frame_loop = FrameLoop::new(&config).shared();
    let mut callbacks = FrameLoop::bind(&frame_loop);

    let mut window = GameWindow::new(backend, config.update_rate_hz);
    let summary = window.run(&mut callbacks);
    log::info!("Rendered {} frames", summary.frames);

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting quad demo");

    run().map_err(|e| {
        log::error!("Application error: {e}");
        e.into()
    })
}
