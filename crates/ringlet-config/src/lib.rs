//! Configuration for the ringlet animation.
//!
//! Settings live in a TOML file in the platform config directory. Every
//! section falls back to built-in defaults, so a partial file (or none at
//! all) is valid.

mod config;
mod error;

pub use config::{
    CameraConfig, Config, DisplayConfig, LightConfig, LoggingConfig, PlanetConfig, RingConfig,
    StarConfig, TextConfig, default_config_path,
};
pub use error::ConfigError;
