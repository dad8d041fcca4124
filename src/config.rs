//! Tunable constants, loadable from TOML.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::tracker::{HysteresisConfig, SizeBounds};

/// Morphology radii are `u8`, so kernels wider than this cannot be built.
const MAX_MORPH_KERNEL: usize = 511;

/// Color preprocessing settings.
///
/// HSV values use the 0..180 hue and 0..255 saturation/value scale.
/// Kernels are window sizes; even sizes round up to the next odd square.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub blur_kernel: usize,
    pub erode_kernel: usize,
    pub dilate_kernel: usize,
    /// Number of erode passes, followed by as many dilate passes.
    pub iterations: usize,
    pub hsv_min: [f32; 3],
    pub hsv_max: [f32; 3],
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            blur_kernel: 7,
            erode_kernel: 12,
            dilate_kernel: 24,
            iterations: 2,
            hsv_min: [84.19, 113.1, 141.0],
            hsv_max: [180.0, 255.0, 255.0],
        }
    }
}

/// Configuration for the tracker and its session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub min_size: i32,
    pub max_size: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub tick_interval_ms: u64,
    /// How long `stop` waits for an in-flight frame before releasing the source.
    pub stop_timeout_ms: u64,
    pub preprocess: PreprocessConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_size: 100,
            max_size: 300,
            offset_x: 100,
            offset_y: 100,
            tick_interval_ms: 16,
            stop_timeout_ms: 33,
            preprocess: PreprocessConfig::default(),
        }
    }
}

impl TrackerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size >= self.max_size {
            return Err(ConfigError::Invalid(format!(
                "min_size ({}) must be below max_size ({})",
                self.min_size, self.max_size
            )));
        }
        if self.offset_x < 0 || self.offset_y < 0 {
            return Err(ConfigError::Invalid(format!(
                "hysteresis offsets must be non-negative, got ({}, {})",
                self.offset_x, self.offset_y
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be positive".to_string(),
            ));
        }

        let pre = &self.preprocess;
        if pre.blur_kernel == 0 || pre.blur_kernel % 2 == 0 {
            return Err(ConfigError::Invalid(format!(
                "blur_kernel must be odd, got {}",
                pre.blur_kernel
            )));
        }
        for (name, k) in [("erode_kernel", pre.erode_kernel), ("dilate_kernel", pre.dilate_kernel)] {
            if k == 0 || k > MAX_MORPH_KERNEL {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within 1..={MAX_MORPH_KERNEL}, got {k}"
                )));
            }
        }
        Ok(())
    }

    pub fn size_bounds(&self) -> SizeBounds {
        SizeBounds::new(self.min_size, self.max_size)
    }

    pub fn hysteresis(&self) -> HysteresisConfig {
        HysteresisConfig {
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}
