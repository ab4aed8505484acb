//! Configuration structs with defaults and TOML persistence.

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use ringlet_core::Rgb;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the configuration inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Perspective camera.
    pub camera: CameraConfig,
    /// Ambient light.
    pub light: LightConfig,
    /// The planet sphere.
    pub planet: PlanetConfig,
    /// The ring attached to the planet.
    pub ring: RingConfig,
    /// The circling text annotation.
    pub text: TextConfig,
    /// Shooting stars.
    pub stars: StarConfig,
    /// Frame pacing and background.
    pub display: DisplayConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Distance from the planet center along +Z.
    pub distance: f32,
}

/// Ambient light configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    pub color: Rgb,
    pub intensity: f32,
}

/// Planet configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Sphere radius in world units.
    pub radius: f32,
    /// Surface color.
    pub color: Rgb,
    /// Yaw added every frame, in radians. Also drives the text ring.
    pub spin_step: f32,
    /// Strength of the longitude bands that make the spin visible (0 = flat).
    pub band_contrast: f32,
    /// Number of light/dark band pairs around the equator.
    pub bands: u32,
}

/// Ring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RingConfig {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: Rgb,
    /// Rotation about X, applied first.
    pub tilt_x: f32,
    /// Rotation about Y.
    pub tilt_y: f32,
}

/// Text ring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    /// Characters repeated around the ring.
    pub message: String,
    /// Number of glyphs placed on the circle.
    pub count: usize,
    /// Circle radius in world units.
    pub radius: f32,
    pub color: Rgb,
}

/// Starfield configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarConfig {
    /// Number of stars.
    pub count: usize,
    /// Smallest star radius in pixels.
    pub size_min: f32,
    /// Largest star radius in pixels (exclusive).
    pub size_max: f32,
    /// Slowest per-frame movement in pixels.
    pub speed_min: f32,
    /// Fastest per-frame movement in pixels (exclusive).
    pub speed_max: f32,
    pub color: Rgb,
    /// Fixed RNG seed, random when unset.
    pub seed: Option<u64>,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames per second for both animation loops.
    pub fps: u32,
    /// Most frames a loop runs in one go after a stall.
    pub max_catch_up: u32,
    /// Color behind the planet.
    pub background: Rgb,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "ringlet_scene=debug".
    pub level: String,
    /// Log file, defaults to the platform data directory.
    pub file: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            intensity: 1.0,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            color: Rgb::from_u32(0x800080),
            spin_step: 0.002,
            band_contrast: 0.25,
            bands: 6,
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            inner_radius: 1.3,
            outer_radius: 1.6,
            color: Rgb::WHITE,
            tilt_x: PI / 2.2,
            tilt_y: 0.5,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            message: "I\u{2019}m sorry".to_string(),
            count: 50,
            radius: 1.45,
            color: Rgb::WHITE,
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 20,
            size_min: 1.0,
            size_max: 3.0,
            speed_min: 2.0,
            speed_max: 5.0,
            color: Rgb::WHITE,
            seed: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            max_catch_up: 3,
            background: Rgb::BLACK,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Default location of the config file, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ringlet").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

// --- Load / Save / Validate ---

impl Config {
    /// Load and validate the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Config = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the config at `path`, or fall back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, serialized).map_err(ConfigError::Write)?;
        Ok(())
    }

    /// Reject values the animation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_finite()?;
        let camera = &self.camera;
        if !(camera.fov_deg > 0.0 && camera.fov_deg < 180.0) {
            return invalid(format!(
                "camera.fov_deg must be in (0, 180), got {}",
                camera.fov_deg
            ));
        }
        if camera.near <= 0.0 || camera.far <= camera.near {
            return invalid(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            ));
        }
        if self.ring.inner_radius > self.ring.outer_radius {
            return invalid(format!(
                "ring.inner_radius {} exceeds ring.outer_radius {}",
                self.ring.inner_radius, self.ring.outer_radius
            ));
        }
        if self.text.message.is_empty() {
            return invalid("text.message must not be empty".to_string());
        }
        if self.text.count == 0 {
            return invalid("text.count must be at least 1".to_string());
        }
        check_range("stars.size", self.stars.size_min, self.stars.size_max)?;
        check_range("stars.speed", self.stars.speed_min, self.stars.speed_max)?;
        if self.display.fps == 0 {
            return invalid("display.fps must be at least 1".to_string());
        }
        Ok(())
    }

    fn check_finite(&self) -> Result<(), ConfigError> {
        let values = [
            ("camera.fov_deg", self.camera.fov_deg),
            ("camera.near", self.camera.near),
            ("camera.far", self.camera.far),
            ("camera.distance", self.camera.distance),
            ("light.intensity", self.light.intensity),
            ("planet.radius", self.planet.radius),
            ("planet.spin_step", self.planet.spin_step),
            ("planet.band_contrast", self.planet.band_contrast),
            ("ring.inner_radius", self.ring.inner_radius),
            ("ring.outer_radius", self.ring.outer_radius),
            ("ring.tilt_x", self.ring.tilt_x),
            ("ring.tilt_y", self.ring.tilt_y),
            ("text.radius", self.text.radius),
            ("stars.size_min", self.stars.size_min),
            ("stars.size_max", self.stars.size_max),
            ("stars.speed_min", self.stars.speed_min),
            ("stars.speed_max", self.stars.speed_max),
        ];
        match values.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => invalid(format!("{name} must be finite, got {value}")),
            None => Ok(()),
        }
    }
}

fn check_range(name: &str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min < 0.0 {
        return invalid(format!("{name}_min must not be negative, got {min}"));
    }
    if min > max {
        return invalid(format!("{name}_min {min} exceeds {name}_max {max}"));
    }
    Ok(())
}

fn invalid(message: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(message))
}
