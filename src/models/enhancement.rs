//! Enhancement policy and per-call configuration.

use lumen_color::ContrastLevel;
use serde::{Deserialize, Serialize};

/// Which HSL components the enhancer may move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnhancementStrategy {
    /// Hue is pinned; lightness moves, saturation may be reduced.
    #[default]
    PreserveHue,
    /// Hue and saturation are pinned; only lightness moves.
    PreserveSaturation,
    /// Lightness is pinned; saturation and hue move.
    PreserveLightness,
    /// Any single component, whichever needs the smallest perceptual change.
    MinimumChange,
}

/// Configuration for one enhancement call.
///
/// # Defaults
///
/// - Target level: AA (4.5:1)
/// - Strategy: preserve hue
/// - Max perceptual distance: 25.0 LAB units
/// - Prefer darker: unset (whichever side is closer wins)
///
/// # Example
///
/// ```
/// use lumen::color::ContrastLevel;
/// use lumen::{EnhancementStrategy, EnhancerConfiguration};
///
/// let config = EnhancerConfiguration::new()
///     .target_level(ContrastLevel::Aaa)
///     .strategy(EnhancementStrategy::MinimumChange)
///     .prefer_darker(true);
/// assert_eq!(config.max_perceptual_distance, 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfiguration {
    /// Contrast level the result must meet against the background.
    pub target_level: ContrastLevel,

    /// Which components may change.
    pub strategy: EnhancementStrategy,

    /// LAB distance from the original the result may not exceed.
    pub max_perceptual_distance: f64,

    /// `Some(true)` favors results darker than the background, `Some(false)`
    /// lighter ones. Only applies when candidates exist on that side.
    pub prefer_darker: Option<bool>,
}

impl Default for EnhancerConfiguration {
    fn default() -> Self {
        Self {
            target_level: ContrastLevel::Aa,
            strategy: EnhancementStrategy::PreserveHue,
            max_perceptual_distance: 25.0,
            prefer_darker: None,
        }
    }
}

impl EnhancerConfiguration {
    /// Create a configuration with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn target_level(mut self, level: ContrastLevel) -> Self {
        self.target_level = level;
        self
    }

    #[inline]
    pub fn strategy(mut self, strategy: EnhancementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the LAB distance budget. Negative or NaN budgets count as 0.
    #[inline]
    pub fn max_perceptual_distance(mut self, distance: f64) -> Self {
        self.max_perceptual_distance = distance;
        self
    }

    #[inline]
    pub fn prefer_darker(mut self, darker: bool) -> Self {
        self.prefer_darker = Some(darker);
        self
    }

    /// The distance budget with non-finite and negative values mapped to a
    /// usable number.
    pub(crate) fn distance_budget(&self) -> f64 {
        let d = self.max_perceptual_distance;
        if d.is_nan() {
            0.0
        } else {
            d.max(0.0)
        }
    }
}
