//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use ringlet_config::Config;

/// A ringed planet, orbiting text and shooting stars in your terminal.
///
/// CLI values override settings loaded from `config.toml`.
#[derive(Parser, Debug, Default)]
#[command(name = "ringlet", version, about)]
pub struct CliArgs {
    /// Path to the config file (overrides the default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the star generator, for a repeatable sky.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Number of shooting stars.
    #[arg(long)]
    pub stars: Option<usize>,

    /// Text circling the planet.
    #[arg(long)]
    pub message: Option<String>,

    /// Log filter (error, warn, info, debug, trace, or a RUST_LOG directive).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    pub write_config: bool,
}

impl CliArgs {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.stars.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.display.fps = fps;
        }
        if let Some(count) = self.stars {
            config.stars.count = count;
        }
        if let Some(ref message) = self.message {
            config.text.message = message.clone();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(ref file) = self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}
