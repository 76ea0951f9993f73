//! Test fixtures and constants.

use std::sync::Arc;

use lumen::color::Color;
use lumen::{AccessibilityEnhancer, AccessiblePaletteGenerator, ColorCache, EngineConfig};

/// Colors used across scenarios
pub mod colors {
    use lumen::color::Color;

    pub fn red() -> Color {
        Color::rgb(1.0, 0.0, 0.0)
    }

    /// Light text colors that fail AA on white
    pub fn light_on_white() -> Vec<Color> {
        vec![
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(1.0, 0.6, 0.0),
            Color::rgb(0.9, 0.9, 0.2),
            Color::rgb(0.3, 0.8, 0.4),
            Color::rgb(0.4, 0.7, 1.0),
            Color::rgb(0.8, 0.5, 0.9),
            Color::rgb(0.6, 0.6, 0.6),
        ]
    }

    /// Seeds spread around the wheel, plus gray and the extremes
    pub fn seeds() -> Vec<Color> {
        vec![
            Color::rgb(0.9, 0.1, 0.1),
            Color::rgb(0.1, 0.6, 0.3),
            Color::rgb(0.2, 0.3, 0.9),
            Color::rgb(1.0, 0.85, 0.0),
            Color::rgb(0.5, 0.5, 0.5),
            Color::BLACK,
            Color::WHITE,
        ]
    }
}

/// One cache shared by an enhancer and a palette generator, the way an
/// application would wire them.
pub struct TestEngine {
    pub config: EngineConfig,
    pub cache: Arc<ColorCache>,
    pub enhancer: AccessibilityEnhancer,
    pub generator: AccessiblePaletteGenerator,
}

impl TestEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let cache = Arc::new(ColorCache::new(&config.cache));
        Self {
            enhancer: AccessibilityEnhancer::new(cache.clone(), config.enhancer.clone()),
            generator: AccessiblePaletteGenerator::new(cache.clone(), &config),
            cache,
            config,
        }
    }
}

/// Parse a hex color, panicking on malformed fixtures.
pub fn hex(s: &str) -> Color {
    s.parse().unwrap_or_else(|e| panic!("bad fixture color {s}: {e}"))
}
