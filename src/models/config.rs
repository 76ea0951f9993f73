use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Engine configuration loaded from YAML.
///
/// Every section and field is optional; missing values take their defaults.
///
/// ```yaml
/// cache:
///   max_entries_per_category: 4096
/// enhancer:
///   max_iterations: 24
/// palette:
///   similarity_tolerance: 12.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Color cache sizing
    pub cache: CacheConfig,

    /// Enhancer search tunables
    pub enhancer: EnhancerTuning,

    /// Palette generator tunables
    pub palette: PaletteTuning,
}

/// Color cache sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entries kept per cache category before LRU eviction kicks in
    pub max_entries_per_category: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries_per_category: 1024,
        }
    }
}

/// Enhancer search tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerTuning {
    /// Bisection steps per walk
    pub max_iterations: u32,

    /// LAB distance below which two suggested variants are duplicates
    pub variant_tolerance: f64,

    /// Hue rotations tried per requested variant
    pub variant_attempts_per_color: usize,
}

impl Default for EnhancerTuning {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            variant_tolerance: 5.0,
            variant_attempts_per_color: 3,
        }
    }
}

/// Palette generator tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteTuning {
    /// LAB distance below which a candidate duplicates an accepted color
    pub similarity_tolerance: f64,

    /// Hard cap on candidate attempts per palette
    pub max_iterations: usize,

    /// Hue rotation between candidates, in turns
    pub hue_step: f64,

    /// Saturation floor for every candidate after the seed
    pub min_candidate_saturation: f64,
}

impl Default for PaletteTuning {
    fn default() -> Self {
        Self {
            similarity_tolerance: 10.0,
            max_iterations: 64,
            // Golden-ratio conjugate: successive hues never line up
            hue_step: 0.618034,
            min_candidate_saturation: 0.4,
        }
    }
}

const MIN_CACHE_ENTRIES: usize = 4;
pub(crate) const MAX_BISECTION_STEPS: u32 = 60;
const MAX_VARIANT_ATTEMPTS: usize = 16;
pub(crate) const MAX_PALETTE_ITERATIONS: usize = 4096;

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

impl EngineConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            cache_entries = config.cache.max_entries_per_category,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Map every out-of-range value to the nearest usable one.
    pub fn normalized(self) -> Self {
        Self {
            cache: self.cache.normalized(),
            enhancer: self.enhancer.normalized(),
            palette: self.palette.normalized(),
        }
    }
}

impl CacheConfig {
    pub fn normalized(self) -> Self {
        Self {
            max_entries_per_category: self.max_entries_per_category.max(MIN_CACHE_ENTRIES),
        }
    }
}

impl EnhancerTuning {
    /// Clamp to values that keep every search bounded.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            max_iterations: self.max_iterations.clamp(1, MAX_BISECTION_STEPS),
            variant_tolerance: finite_or(self.variant_tolerance, defaults.variant_tolerance)
                .max(0.0),
            variant_attempts_per_color: self
                .variant_attempts_per_color
                .clamp(1, MAX_VARIANT_ATTEMPTS),
        }
    }
}

impl PaletteTuning {
    /// Clamp to values that keep generation bounded and productive.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let hue_step = finite_or(self.hue_step, defaults.hue_step).rem_euclid(1.0);
        Self {
            similarity_tolerance: finite_or(
                self.similarity_tolerance,
                defaults.similarity_tolerance,
            )
            .max(0.0),
            max_iterations: self.max_iterations.clamp(1, MAX_PALETTE_ITERATIONS),
            // A zero step would retry the same hue forever
            hue_step: if hue_step == 0.0 {
                defaults.hue_step
            } else {
                hue_step
            },
            min_candidate_saturation: finite_or(
                self.min_candidate_saturation,
                defaults.min_candidate_saturation,
            )
            .clamp(0.0, 1.0),
        }
    }
}
