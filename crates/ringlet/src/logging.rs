//! File-based tracing setup.
//!
//! The terminal belongs to the animation, so log output always goes to a
//! file: `--log-file`, then `[logging].file`, then `ringlet.log` in the
//! platform data directory.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use ringlet_config::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "ringlet.log";
const FALLBACK_LEVEL: &str = "info";

/// Where logs should be written, if anywhere.
pub fn log_path(config: &LoggingConfig) -> Option<PathBuf> {
    config.file.clone().or_else(|| {
        ProjectDirs::from("", "", "ringlet").map(|dirs| dirs.data_local_dir().join(LOG_FILE))
    })
}

/// Filter from `RUST_LOG`, falling back to the configured level.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(&config.level))
}

/// Filter for a configured level. A bad directive falls back to `info`.
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|err| {
        eprintln!("invalid log level {level:?}: {err}, using {FALLBACK_LEVEL}");
        EnvFilter::new(FALLBACK_LEVEL)
    })
}

/// Install the global subscriber writing to `path`.
pub fn init_logging(config: &LoggingConfig, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(file_layer)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_explicit_file_wins() {
        let config = LoggingConfig {
            file: Some(PathBuf::from("/var/tmp/custom.log")),
            ..LoggingConfig::default()
        };
        assert_eq!(log_path(&config), Some(PathBuf::from("/var/tmp/custom.log")));
    }

    #[test]
    fn test_default_file_name() {
        if let Some(path) = log_path(&LoggingConfig::default()) {
            assert!(path.ends_with(LOG_FILE));
        }
    }

    #[test]
    fn test_filter_directives_parse() {
        let valid_filters = [
            "info",
            "debug,ringlet_scene=trace",
            "warn,ringlet_config=debug",
            "error",
        ];
        for directive in valid_filters {
            let filter = EnvFilter::try_new(directive);
            assert!(filter.is_ok(), "failed to parse {directive}");
        }
    }

    #[test]
    fn test_bad_level_falls_back_to_info() {
        let filter = level_filter("ringlet=loud");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_configured_level_is_kept() {
        let filter = level_filter("debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
