//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level renderer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Periodic volume and star population.
    pub field: FieldConfig,
    /// Output raster size.
    pub image: ImageConfig,
    /// Photometry and disc sizing knobs.
    pub render: RenderConfig,
    /// Observer sweep and frame output.
    pub animation: AnimationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Star field configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Period of the volume along field-space x.
    pub size_x: f64,
    /// Period along field-space y. Governs the vertical view axis and the cull radius.
    pub size_y: f64,
    /// Period along field-space z.
    pub size_z: f64,
    /// Number of stars to generate.
    pub num_stars: usize,
    /// Baseline added to the uniform `[-0.5, 0.5]` brightness draw.
    pub brightness_baseline: f64,
    /// RNG seed. `None` seeds from OS entropy, so runs are not reproducible.
    pub seed: Option<u64>,
}

/// Output image configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    /// Raster width in pixels (full 360 degrees of azimuth).
    pub width: u32,
    /// Raster height in pixels (pole to pole).
    pub height: u32,
}

/// Compositing policy for overlapping stars.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlendModeSetting {
    /// Later stars replace earlier coverage.
    #[default]
    Overwrite,
    /// Coverage accumulates with per-channel saturation.
    SaturatingAdd,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Distance at which a unit-brightness star saturates. `None` uses `size_y * 0.15`.
    pub reference_scale: Option<f64>,
    /// Disc radius in pixels for a full-intensity star at or below `reference_width`.
    pub reference_point_size: f64,
    /// Image width above which disc size scales linearly with resolution.
    pub reference_width: u32,
    /// How overlapping discs combine.
    pub blend_mode: BlendModeSetting,
}

/// Animation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Observer position for the first frame.
    pub start: [f64; 3],
    /// Observer advance along x per frame.
    pub step_delta: f64,
    /// The sweep stops once the observer's x exceeds this value.
    pub max_x: f64,
    /// Directory that receives the frame sequence.
    pub output_dir: PathBuf,
    /// File name prefix, frames are written as `<prefix>_<sequence>.png`.
    pub file_prefix: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            size_x: 200.0,
            size_y: 50.0,
            size_z: 200.0,
            num_stars: 2000,
            brightness_baseline: 1.4,
            seed: None,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 800,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            reference_scale: None,
            reference_point_size: 4.0,
            reference_width: 4000,
            blend_mode: BlendModeSetting::Overwrite,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start: [0.0, 0.0, 0.0],
            step_delta: 0.05,
            max_x: 10.0,
            output_dir: PathBuf::from("frames"),
            file_prefix: "image".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Default per-user config directory (`<platform config dir>/starpano`).
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("starpano"))
}

// --- Derived values / validation ---

impl Config {
    /// Reference scale actually used for photometry.
    pub fn effective_reference_scale(&self) -> f64 {
        self.render
            .reference_scale
            .unwrap_or(self.field.size_y * 0.15)
    }

    /// Reject settings the renderer cannot work with.
    ///
    /// Called once at startup; a failure here is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field.size_x", self.field.size_x)?;
        positive("field.size_y", self.field.size_y)?;
        positive("field.size_z", self.field.size_z)?;
        if !self.field.brightness_baseline.is_finite() {
            return Err(invalid("field.brightness_baseline", "must be finite"));
        }
        if self.image.width == 0 {
            return Err(invalid("image.width", "must be greater than zero"));
        }
        if self.image.height == 0 {
            return Err(invalid("image.height", "must be greater than zero"));
        }
        positive("render.reference_scale", self.effective_reference_scale())?;
        positive("render.reference_point_size", self.render.reference_point_size)?;
        if self.render.reference_width == 0 {
            return Err(invalid("render.reference_width", "must be greater than zero"));
        }
        positive("animation.step_delta", self.animation.step_delta)?;
        if !self.animation.max_x.is_finite() {
            return Err(invalid("animation.max_x", "must be finite"));
        }
        if self.animation.start.iter().any(|c| !c.is_finite()) {
            return Err(invalid("animation.start", "must be finite"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and > 0, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1600"));
        assert!(ron_str.contains("size_y: 50.0"));
        assert!(ron_str.contains("Overwrite"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(field: (num_stars: 10), image: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.field.num_stars, 10);
        assert_eq!(config.field.size_y, 50.0);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_blend_mode_parses() {
        let config: Config = ron::from_str("(render: (blend_mode: SaturatingAdd))").unwrap();
        assert_eq!(config.render.blend_mode, BlendModeSetting::SaturatingAdd);
    }

    #[test]
    fn test_reference_scale_defaults_to_fraction_of_size_y() {
        let mut config = Config::default();
        assert!((config.effective_reference_scale() - 7.5).abs() < 1e-12);
        config.render.reference_scale = Some(3.0);
        assert_eq!(config.effective_reference_scale(), 3.0);
    }

    #[test]
    fn test_non_positive_period_rejected() {
        let mut config = Config::default();
        config.field.size_y = 0.0;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "field.size_y"),
            other => panic!("expected invalid size_y, got {other:?}"),
        }

        let mut config = Config::default();
        config.field.size_x = -5.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.field.size_z = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_image_size_rejected() {
        let mut config = Config::default();
        config.image.height = 0;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "image.height"),
            other => panic!("expected invalid image.height, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_stars_is_valid() {
        let mut config = Config::default();
        config.field.num_stars = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_step_rejected() {
        let mut config = Config::default();
        config.animation.step_delta = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.image.width = 3200;
        config.field.seed = Some(7);
        config.render.blend_mode = BlendModeSetting::SaturatingAdd;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }


    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
