use lumen_color::{Color, ContrastLevel};
use serde::{Deserialize, Serialize};

use super::enhancement::{EnhancementStrategy, EnhancerConfiguration};

/// Smallest palette the generator produces.
pub const MIN_PALETTE_SIZE: usize = 2;

/// Configuration for one palette generation call.
///
/// Out-of-range values are normalized by the generator, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfiguration {
    /// Number of colors to produce (at least 2)
    pub palette_size: usize,

    /// Level every color must meet against `background`
    pub target_level: ContrastLevel,

    /// The surface every palette color is checked against
    pub background: Color,

    /// Seed the palette with black and/or white when they comply
    pub include_black_and_white: bool,

    /// Strategy handed to the enhancer for each candidate
    pub strategy: EnhancementStrategy,

    /// Distance budget handed to the enhancer for each candidate
    pub max_perceptual_distance: f64,
}

impl Default for PaletteConfiguration {
    fn default() -> Self {
        Self {
            palette_size: 5,
            target_level: ContrastLevel::Aa,
            background: Color::WHITE,
            include_black_and_white: false,
            strategy: EnhancementStrategy::PreserveHue,
            max_perceptual_distance: 100.0,
        }
    }
}

impl PaletteConfiguration {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn palette_size(mut self, size: usize) -> Self {
        self.palette_size = size;
        self
    }

    #[inline]
    pub fn target_level(mut self, level: ContrastLevel) -> Self {
        self.target_level = level;
        self
    }

    #[inline]
    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[inline]
    pub fn include_black_and_white(mut self, include: bool) -> Self {
        self.include_black_and_white = include;
        self
    }

    #[inline]
    pub fn strategy(mut self, strategy: EnhancementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn max_perceptual_distance(mut self, distance: f64) -> Self {
        self.max_perceptual_distance = distance;
        self
    }

    /// Clamp the palette size to the supported minimum.
    pub fn normalized(mut self) -> Self {
        if self.palette_size < MIN_PALETTE_SIZE {
            tracing::debug!(
                requested = self.palette_size,
                "Palette size below minimum, using {MIN_PALETTE_SIZE}"
            );
            self.palette_size = MIN_PALETTE_SIZE;
        }
        self
    }

    /// The enhancer configuration used for each candidate.
    pub fn enhancer_configuration(&self) -> EnhancerConfiguration {
        EnhancerConfiguration::new()
            .target_level(self.target_level)
            .strategy(self.strategy)
            .max_perceptual_distance(self.max_perceptual_distance)
    }
}
