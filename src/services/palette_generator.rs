//! Accessible palette generation.
//!
//! Candidates are the seed followed by hue rotations of it in fixed steps
//! (the golden-ratio conjugate by default, so successive hues never line
//! up). Each candidate is enhanced against the background and kept when it
//! complies and is not too close to a color already in the palette. A hard
//! cap on candidate attempts bounds the work; any shortfall is filled from
//! a fixed gray ramp, so the output always has the requested length and is
//! identical for identical inputs.

use std::sync::Arc;

use lumen_color::{contrast_ratio, Color, Hsl};
use serde::Serialize;

use crate::models::{EngineConfig, PaletteConfiguration, PaletteTuning};
use crate::services::color_cache::ColorCache;
use crate::services::enhancer::{is_perceptually_similar, AccessibilityEnhancer};

/// Fallback grays, extremes first, converging on mid gray.
const GRAY_RAMP: [f64; 11] = [0.0, 1.0, 0.1, 0.9, 0.2, 0.8, 0.3, 0.7, 0.4, 0.6, 0.5];

/// A generated palette with the work it took.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteReport {
    pub colors: Vec<Color>,
    /// Candidate attempts made (at most `PaletteTuning::max_iterations`)
    pub iterations: usize,
    /// Colors that came from the fallback fill rather than the search
    pub fallback_count: usize,
}

/// Builds palettes of mutually distinct colors that all meet a contrast
/// level against one background.
pub struct AccessiblePaletteGenerator {
    enhancer: AccessibilityEnhancer,
    tuning: PaletteTuning,
}

impl AccessiblePaletteGenerator {
    pub fn new(cache: Arc<ColorCache>, config: &EngineConfig) -> Self {
        Self::from_parts(
            AccessibilityEnhancer::new(cache, config.enhancer.clone()),
            config.palette.clone(),
        )
    }

    /// Out-of-range tuning is clamped, as when loaded from a config file.
    pub fn from_parts(enhancer: AccessibilityEnhancer, tuning: PaletteTuning) -> Self {
        Self {
            enhancer,
            tuning: tuning.normalized(),
        }
    }

    pub fn enhancer(&self) -> &AccessibilityEnhancer {
        &self.enhancer
    }

    pub fn tuning(&self) -> &PaletteTuning {
        &self.tuning
    }

    /// Generate `config.palette_size` colors from `seed`.
    ///
    /// ```
    /// use lumen::color::{contrast_ratio, Color};
    /// use lumen::{AccessiblePaletteGenerator, PaletteConfiguration};
    ///
    /// let generator = AccessiblePaletteGenerator::default();
    /// let seed = Color::rgb(0.2, 0.4, 0.9);
    /// let palette = generator.generate(seed, &PaletteConfiguration::default());
    /// assert_eq!(palette.len(), 5);
    /// assert!(palette.iter().all(|c| contrast_ratio(*c, Color::WHITE) >= 4.5));
    /// ```
    pub fn generate(&self, seed: Color, config: &PaletteConfiguration) -> Vec<Color> {
        self.generate_with_report(seed, config).colors
    }

    pub fn generate_with_report(
        &self,
        seed: Color,
        config: &PaletteConfiguration,
    ) -> PaletteReport {
        let config = config.normalized();
        let size = config.palette_size;
        let background = config.background;
        let target = config.target_level.min_ratio();
        let tolerance = self.tuning.similarity_tolerance;
        let complies = |c: Color| contrast_ratio(c, background) >= target;
        let distinct = |palette: &[Color], c: Color| {
            !palette
                .iter()
                .any(|accepted| is_perceptually_similar(*accepted, c, tolerance))
        };

        let mut colors: Vec<Color> = Vec::with_capacity(size);
        if config.include_black_and_white {
            for extreme in [Color::BLACK, Color::WHITE] {
                if colors.len() < size
                    && complies(extreme)
                    && distinct(colors.as_slice(), extreme)
                {
                    colors.push(extreme);
                }
            }
        }

        let enhancer_config = config.enhancer_configuration();
        let base = self.enhancer.cache().hsl(seed);
        let mut iterations = 0;
        while colors.len() < size && iterations < self.tuning.max_iterations {
            let candidate = if iterations == 0 {
                seed
            } else {
                Hsl::new(
                    base.hue + iterations as f64 * self.tuning.hue_step,
                    base.saturation.max(self.tuning.min_candidate_saturation),
                    base.lightness,
                )
                .to_color()
                .with_alpha(seed.alpha())
            };
            iterations += 1;

            let enhanced = self.enhancer.enhance(candidate, background, &enhancer_config);
            if complies(enhanced) && distinct(colors.as_slice(), enhanced) {
                colors.push(enhanced);
            }
        }

        let searched = colors.len();
        fill_with_fallbacks(&mut colors, size, &complies, &distinct, background);
        let fallback_count = colors.len() - searched;

        tracing::debug!(
            seed = %seed,
            size,
            iterations,
            fallback_count,
            "Generated palette"
        );
        PaletteReport {
            colors,
            iterations,
            fallback_count,
        }
    }
}

impl Default for AccessiblePaletteGenerator {
    fn default() -> Self {
        Self::new(Arc::new(ColorCache::default()), &EngineConfig::default())
    }
}

/// Top `colors` up to `size`: distinct compliant grays, then compliant
/// grays regardless of distinctness, then whichever of black and white
/// contrasts more with the background.
fn fill_with_fallbacks(
    colors: &mut Vec<Color>,
    size: usize,
    complies: &dyn Fn(Color) -> bool,
    distinct: &dyn Fn(&[Color], Color) -> bool,
    background: Color,
) {
    let grays = || GRAY_RAMP.iter().map(|&v| Color::rgb(v, v, v));

    for gray in grays() {
        if colors.len() >= size {
            return;
        }
        if complies(gray) && distinct(colors.as_slice(), gray) {
            colors.push(gray);
        }
    }

    let compliant: Vec<Color> = grays().filter(|&gray| complies(gray)).collect();
    let missing = size.saturating_sub(colors.len());
    colors.extend(compliant.iter().copied().cycle().take(missing));

    let on_black = contrast_ratio(Color::BLACK, background);
    let on_white = contrast_ratio(Color::WHITE, background);
    let extreme = if on_black >= on_white {
        Color::BLACK
    } else {
        Color::WHITE
    };
    colors.resize(size, extreme);
}
