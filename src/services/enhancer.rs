//! Contrast enhancement by bounded search in HSL.
//!
//! A *walk* is a straight path in HSL from the original color (t = 0) to
//! some extreme (t = 1), for example "lightness to 0" or "saturation to 1 with
//! the hue rotated by 60 degrees". The strategy decides which walks exist.
//! Every walk whose end point meets the target is bisected for the smallest
//! t that still meets it, and the candidate closest to the original in LAB
//! wins.
//!
//! Work is bounded by `walks * (max_iterations + 1) + 1` contrast evaluations.
//! Nothing recurses and no loop depends on the input colors.

use std::sync::Arc;

use lumen_color::{contrast_ratio, contrast_ratio_from_luminance, Color, Hsl, Lab};
use serde::Serialize;

use crate::models::{EnhancementStrategy, EnhancerConfiguration, EnhancerTuning};
use crate::services::color_cache::ColorCache;

/// Saturation factors tried by preserve-hue walks. Zero is excluded so the
/// hue survives.
const PRESERVE_HUE_SATURATION_SCALES: [f64; 4] = [1.0, 0.75, 0.5, 0.25];

/// Hue rotation granularity for walks that may move the hue: 30 degrees.
const HUE_STEP: f64 = 1.0 / 12.0;

/// Ceiling on hue rotations tried by one variant search.
const MAX_VARIANT_SEARCH_ATTEMPTS: usize = 1024;

/// How an enhancement call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnhancementOutcome {
    /// The input already met the target and was returned as is.
    Unchanged,
    /// The target was met within the distance budget.
    Reached,
    /// The target could not be met within the budget; the result is the
    /// highest-contrast point found that stays within it (or the input).
    BestEffort,
}

/// The result of an enhancement together with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnhancementReport {
    pub color: Color,
    /// Contrast of `color` against the background
    pub ratio: f64,
    /// LAB distance of `color` from the input
    pub distance: f64,
    pub outcome: EnhancementOutcome,
    /// Contrast evaluations spent
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Walk {
    start: Hsl,
    hue_delta: f64,
    end_saturation: f64,
    end_lightness: f64,
}

impl Walk {
    fn new(start: Hsl, hue_delta: f64, end_saturation: f64, end_lightness: f64) -> Self {
        Self {
            start,
            hue_delta,
            end_saturation,
            end_lightness,
        }
    }

    /// The grid-snapped color at position `t`, keeping `alpha`.
    fn at(&self, t: f64, alpha: f64) -> Color {
        let Hsl {
            hue,
            saturation,
            lightness,
        } = self.start;
        Hsl::new(
            hue + self.hue_delta * t,
            saturation + (self.end_saturation - saturation) * t,
            lightness + (self.end_lightness - lightness) * t,
        )
        .to_color()
        .with_alpha(alpha)
        .quantized()
    }
}

/// Hue offsets 0, +30, -30, ... +-150, 180 degrees (180 once).
fn hue_offsets(include_zero: bool) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(12);
    if include_zero {
        offsets.push(0.0);
    }
    for step in 1..6 {
        let offset = f64::from(step) * HUE_STEP;
        offsets.push(offset);
        offsets.push(-offset);
    }
    offsets.push(0.5);
    offsets
}

fn walks_for(strategy: EnhancementStrategy, hsl: Hsl) -> Vec<Walk> {
    let lightness_walks = |scales: &[f64]| -> Vec<Walk> {
        scales
            .iter()
            .flat_map(|&scale| {
                [0.0, 1.0].map(|end| Walk::new(hsl, 0.0, hsl.saturation * scale, end))
            })
            .collect()
    };
    let saturation_walks = |offsets: &[f64]| -> Vec<Walk> {
        offsets
            .iter()
            .flat_map(|&offset| [0.0, 1.0].map(|end| Walk::new(hsl, offset, end, hsl.lightness)))
            .collect()
    };

    match strategy {
        EnhancementStrategy::PreserveSaturation => lightness_walks(&[1.0]),
        EnhancementStrategy::PreserveHue => lightness_walks(&PRESERVE_HUE_SATURATION_SCALES),
        EnhancementStrategy::PreserveLightness => saturation_walks(&hue_offsets(true)),
        EnhancementStrategy::MinimumChange => {
            let mut walks = lightness_walks(&[1.0]);
            walks.extend(saturation_walks(&[0.0]));
            walks.extend(
                hue_offsets(false)
                    .into_iter()
                    .map(|offset| Walk::new(hsl, offset, hsl.saturation, hsl.lightness)),
            );
            walks
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    color: Color,
    distance: f64,
    darker: bool,
    walk: usize,
}

/// Per-call search state.
struct Search<'a> {
    cache: &'a ColorCache,
    background_luminance: f64,
    target: f64,
    original: Color,
    original_lab: Lab,
    original_ratio: f64,
    evaluations: usize,
}

impl Search<'_> {
    fn luminance(&self, candidate: Color) -> f64 {
        self.cache.luminance(candidate)
    }

    fn ratio(&mut self, candidate: Color) -> f64 {
        self.evaluations += 1;
        contrast_ratio_from_luminance(self.luminance(candidate), self.background_luminance)
    }

    fn passes(&mut self, candidate: Color) -> bool {
        self.ratio(candidate) >= self.target
    }

    fn distance(&self, candidate: Color) -> f64 {
        self.cache.lab(candidate).distance(self.original_lab)
    }

    /// Smallest passing point of a walk whose end passes.
    fn bisect_for_target(&mut self, walk: &Walk, steps: u32) -> Color {
        let alpha = self.original.alpha();
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..steps {
            let mid = (lo + hi) / 2.0;
            if self.passes(walk.at(mid, alpha)) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        walk.at(hi, alpha)
    }

    /// Farthest point along `walk` within `budget`, or the original when no
    /// point fits or none improves contrast.
    fn bisect_for_budget(&mut self, walk: &Walk, budget: f64, steps: u32) -> Color {
        let alpha = self.original.alpha();
        let end = walk.at(1.0, alpha);
        let best = if self.distance(end) <= budget {
            end
        } else if self.distance(walk.at(0.0, alpha)) > budget {
            return self.original;
        } else {
            let (mut lo, mut hi) = (0.0, 1.0);
            for _ in 0..steps {
                let mid = (lo + hi) / 2.0;
                if self.distance(walk.at(mid, alpha)) <= budget {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            if lo == 0.0 {
                return self.original;
            }
            walk.at(lo, alpha)
        };

        if self.ratio(best) > self.original_ratio {
            best
        } else {
            self.original
        }
    }
}

/// Nudges colors until they meet a WCAG contrast level against a background.
///
/// Never fails: the result either meets the target or stays within the
/// configured perceptual distance of the input.
pub struct AccessibilityEnhancer {
    cache: Arc<ColorCache>,
    tuning: EnhancerTuning,
}

impl AccessibilityEnhancer {
    /// Out-of-range tuning is clamped, as when loaded from a config file.
    pub fn new(cache: Arc<ColorCache>, tuning: EnhancerTuning) -> Self {
        Self {
            cache,
            tuning: tuning.normalized(),
        }
    }

    pub fn cache(&self) -> &Arc<ColorCache> {
        &self.cache
    }

    pub fn tuning(&self) -> &EnhancerTuning {
        &self.tuning
    }

    fn bisection_steps(&self) -> u32 {
        self.tuning.max_iterations
    }

    /// Enhance `color` for legibility on `background`.
    ///
    /// ```
    /// use lumen::color::{contrast_ratio, Color};
    /// use lumen::{AccessibilityEnhancer, EnhancerConfiguration};
    ///
    /// let enhancer = AccessibilityEnhancer::default();
    /// let red = Color::rgb(1.0, 0.0, 0.0);
    /// let fixed = enhancer.enhance(red, Color::WHITE, &EnhancerConfiguration::default());
    /// assert!(contrast_ratio(fixed, Color::WHITE) >= 4.5);
    /// ```
    pub fn enhance(
        &self,
        color: Color,
        background: Color,
        config: &EnhancerConfiguration,
    ) -> Color {
        self.enhance_with_report(color, background, config).color
    }

    /// Like [`enhance`](Self::enhance), with the outcome and search cost.
    pub fn enhance_with_report(
        &self,
        color: Color,
        background: Color,
        config: &EnhancerConfiguration,
    ) -> EnhancementReport {
        let target = config.target_level.min_ratio();
        let initial_ratio = contrast_ratio(color, background);
        if initial_ratio >= target {
            return EnhancementReport {
                color,
                ratio: initial_ratio,
                distance: 0.0,
                outcome: EnhancementOutcome::Unchanged,
                evaluations: 0,
            };
        }

        let budget = config.distance_budget();
        let steps = self.bisection_steps();
        let mut search = Search {
            cache: self.cache.as_ref(),
            background_luminance: lumen_color::relative_luminance(background),
            target,
            original: color,
            original_lab: color.to_lab(),
            original_ratio: initial_ratio,
            evaluations: 0,
        };

        let walks = walks_for(config.strategy, color.to_hsl());
        let mut candidates = Vec::new();
        let mut end_ratios = Vec::with_capacity(walks.len());
        for (index, walk) in walks.iter().enumerate() {
            let end = walk.at(1.0, color.alpha());
            let end_ratio = search.ratio(end);
            end_ratios.push(end_ratio);
            if end_ratio < target {
                continue;
            }
            let found = search.bisect_for_target(walk, steps);
            candidates.push(Candidate {
                color: found,
                distance: search.distance(found),
                darker: search.luminance(found) < search.background_luminance,
                walk: index,
            });
        }

        let within_budget: Vec<Candidate> = candidates
            .iter()
            .copied()
            .filter(|c| c.distance <= budget)
            .collect();

        let (result, outcome) =
            if let Some(winner) = select(&within_budget, config.prefer_darker) {
                (winner.color, EnhancementOutcome::Reached)
            } else {
                // Nothing compliant fits the budget: go as far as it allows
                // along the most promising walk
                let walk = match select(&candidates, config.prefer_darker) {
                    Some(winner) => Some(walks[winner.walk]),
                    None => end_ratios
                        .iter()
                        .enumerate()
                        .fold(None::<(usize, f64)>, |best, (i, &r)| match best {
                            Some((_, best_ratio)) if best_ratio >= r => best,
                            _ => Some((i, r)),
                        })
                        .map(|(i, _)| walks[i]),
                };
                let color = match walk {
                    Some(walk) => search.bisect_for_budget(&walk, budget, steps),
                    None => color,
                };
                (color, EnhancementOutcome::BestEffort)
            };

        let report = EnhancementReport {
            color: result,
            ratio: contrast_ratio(result, background),
            distance: result.perceptual_distance(color),
            outcome,
            evaluations: search.evaluations,
        };
        tracing::debug!(
            input = %color,
            output = %report.color,
            ratio = report.ratio,
            distance = report.distance,
            outcome = ?report.outcome,
            evaluations = report.evaluations,
            strategy = ?config.strategy,
            "Enhanced color"
        );
        report
    }

    /// Up to `count` distinct compliant variants of `color`, found by
    /// enhancing evenly spaced hue rotations with the default configuration.
    ///
    /// Returns fewer when not enough distinct variants exist (for example
    /// for grays, whose rotations are all the same color). At most 1024
    /// rotations are tried, whatever `count` is.
    pub fn suggest_accessible_variants(
        &self,
        color: Color,
        background: Color,
        count: usize,
    ) -> Vec<Color> {
        let config = EnhancerConfiguration::default();
        let target = config.target_level.min_ratio();
        let attempts = count
            .saturating_mul(self.tuning.variant_attempts_per_color)
            .min(MAX_VARIANT_SEARCH_ATTEMPTS);
        let base = color.to_hsl();

        let mut variants: Vec<Color> = Vec::new();
        for attempt in 0..attempts {
            if variants.len() >= count {
                break;
            }
            let rotation = attempt as f64 / attempts as f64;
            let rotated = Hsl::new(base.hue + rotation, base.saturation, base.lightness)
                .to_color()
                .with_alpha(color.alpha());
            let candidate = self.enhance(rotated, background, &config);
            if contrast_ratio(candidate, background) < target {
                continue;
            }
            if variants
                .iter()
                .any(|v| is_perceptually_similar(*v, candidate, self.tuning.variant_tolerance))
            {
                continue;
            }
            variants.push(candidate);
        }

        tracing::debug!(
            requested = count,
            found = variants.len(),
            attempts,
            "Suggested accessible variants"
        );
        variants
    }
}

impl Default for AccessibilityEnhancer {
    fn default() -> Self {
        Self::new(Arc::new(ColorCache::default()), EnhancerTuning::default())
    }
}

/// Pick the closest candidate, restricted to the preferred side of the
/// background when that side has any. Earlier walks win ties.
fn select(candidates: &[Candidate], prefer_darker: Option<bool>) -> Option<Candidate> {
    fn closest<'a>(pool: impl Iterator<Item = &'a Candidate>) -> Option<Candidate> {
        pool.fold(None::<Candidate>, |best, c| match best {
            Some(b) if b.distance <= c.distance => Some(b),
            _ => Some(*c),
        })
    }

    if let Some(darker) = prefer_darker {
        let preferred = closest(candidates.iter().filter(|c| c.darker == darker));
        if preferred.is_some() {
            return preferred;
        }
    }
    closest(candidates.iter())
}

/// Whether two colors are closer than `threshold` in LAB.
pub fn is_perceptually_similar(a: Color, b: Color, threshold: f64) -> bool {
    a.perceptual_distance(b) < threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::MAX_BISECTION_STEPS;
    use lumen_color::ContrastLevel;

    fn enhancer() -> AccessibilityEnhancer {
        AccessibilityEnhancer::default()
    }

    #[test]
    fn test_compliant_input_is_unchanged() {
        let navy = Color::rgb(0.0, 0.0, 0.4);
        let report =
            enhancer().enhance_with_report(navy, Color::WHITE, &EnhancerConfiguration::default());
        assert_eq!(report.outcome, EnhancementOutcome::Unchanged);
        assert_eq!(report.color, navy);
        assert_eq!(report.evaluations, 0);
    }

    #[test]
    fn test_red_on_white_reaches_aa() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let report =
            enhancer().enhance_with_report(red, Color::WHITE, &EnhancerConfiguration::default());
        assert_eq!(report.outcome, EnhancementOutcome::Reached);
        assert!(report.ratio >= 4.5);
        assert!(report.distance <= 25.0);
        // Only darkening helps on white
        assert!(report.color.to_hsl().lightness < 0.5);
    }

    #[test]
    fn test_preserve_saturation_keeps_hue_and_saturation() {
        let orange = Color::rgb(1.0, 0.6, 0.0);
        let config = EnhancerConfiguration::new()
            .strategy(EnhancementStrategy::PreserveSaturation)
            .max_perceptual_distance(60.0);
        let result = enhancer().enhance(orange, Color::WHITE, &config);
        let (before, after) = (orange.to_hsl(), result.to_hsl());
        assert!(contrast_ratio(result, Color::WHITE) >= 4.5);
        assert!((before.hue - after.hue).abs() < 0.01);
        assert!((before.saturation - after.saturation).abs() < 0.02);
    }

    #[test]
    fn test_preserve_lightness_pins_lightness() {
        // Yellow and blue share HSL lightness but not luminance
        let yellow = Color::from_hsl(1.0 / 6.0, 1.0, 0.5);
        let background = Color::from_hsl(1.0 / 6.0, 1.0, 0.5);
        let config = EnhancerConfiguration::new()
            .strategy(EnhancementStrategy::PreserveLightness)
            .target_level(ContrastLevel::AaLarge)
            .max_perceptual_distance(f64::INFINITY);
        let result = enhancer().enhance(yellow, background, &config);
        assert!(contrast_ratio(result, background) >= 3.0);
        assert!((result.to_hsl().lightness - 0.5).abs() < 0.002);
    }

    #[test]
    fn test_zero_budget_returns_original() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let config = EnhancerConfiguration::new().max_perceptual_distance(0.0);
        let report = enhancer().enhance_with_report(red, Color::WHITE, &config);
        assert_eq!(report.outcome, EnhancementOutcome::BestEffort);
        assert_eq!(report.color, red);
    }

    #[test]
    fn test_best_effort_stays_within_budget_and_improves() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let config = EnhancerConfiguration::new().max_perceptual_distance(5.0);
        let report = enhancer().enhance_with_report(red, Color::WHITE, &config);
        assert_eq!(report.outcome, EnhancementOutcome::BestEffort);
        assert!(report.distance <= 5.0 + 1e-9);
        assert!(report.ratio > contrast_ratio(red, Color::WHITE));
    }

    #[test]
    fn test_unreachable_target_is_best_effort() {
        // Nothing reaches 7:1 against mid gray
        let gray = Color::rgb(0.5, 0.5, 0.5);
        let config = EnhancerConfiguration::new()
            .target_level(ContrastLevel::Aaa)
            .max_perceptual_distance(f64::INFINITY);
        let report = enhancer().enhance_with_report(Color::rgb(0.45, 0.45, 0.45), gray, &config);
        assert_eq!(report.outcome, EnhancementOutcome::BestEffort);
        assert!(report.ratio > 1.1);
    }

    #[test]
    fn test_prefer_darker_picks_side() {
        let gray = Color::rgb(0.5, 0.5, 0.5);
        let background = Color::rgb(0.46, 0.46, 0.46);
        let base = EnhancerConfiguration::new()
            .target_level(ContrastLevel::AaLarge)
            .max_perceptual_distance(f64::INFINITY);

        let dark = enhancer().enhance(gray, background, &base.prefer_darker(true));
        let light = enhancer().enhance(gray, background, &base.prefer_darker(false));
        let bg_lum = lumen_color::relative_luminance(background);
        assert!(lumen_color::relative_luminance(dark) < bg_lum);
        assert!(lumen_color::relative_luminance(light) > bg_lum);
        assert!(contrast_ratio(dark, background) >= 3.0);
        assert!(contrast_ratio(light, background) >= 3.0);
    }

    #[test]
    fn test_evaluations_are_bounded() {
        let tuning = EnhancerTuning {
            max_iterations: 8,
            ..EnhancerTuning::default()
        };
        let enhancer = AccessibilityEnhancer::new(Arc::new(ColorCache::default()), tuning);
        let config = EnhancerConfiguration::new().strategy(EnhancementStrategy::PreserveLightness);
        let report = enhancer.enhance_with_report(Color::rgb(0.6, 0.6, 0.2), Color::WHITE, &config);
        let walks =
            walks_for(EnhancementStrategy::PreserveLightness, Hsl::new(0.0, 0.0, 0.0)).len();
        assert!(report.evaluations <= walks * (8 + 1) + 1);
    }

    #[test]
    fn test_walk_counts() {
        let hsl = Hsl::new(0.3, 0.5, 0.5);
        assert_eq!(walks_for(EnhancementStrategy::PreserveSaturation, hsl).len(), 2);
        assert_eq!(walks_for(EnhancementStrategy::PreserveHue, hsl).len(), 8);
        assert_eq!(walks_for(EnhancementStrategy::PreserveLightness, hsl).len(), 24);
        assert_eq!(walks_for(EnhancementStrategy::MinimumChange, hsl).len(), 15);
    }

    #[test]
    fn test_walk_endpoints() {
        let hsl = Hsl::new(0.0, 1.0, 0.5);
        let walk = Walk::new(hsl, 0.0, 1.0, 0.0);
        assert_eq!(walk.at(0.0, 1.0), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(walk.at(1.0, 1.0), Color::BLACK);
        assert_eq!(walk.at(1.0, 0.5).alpha(), 0.5);
    }

    #[test]
    fn test_suggest_variants_are_distinct_and_compliant() {
        let enhancer = enhancer();
        let variants =
            enhancer.suggest_accessible_variants(Color::rgb(0.2, 0.6, 1.0), Color::WHITE, 4);
        assert!(!variants.is_empty() && variants.len() <= 4);
        for (i, a) in variants.iter().enumerate() {
            assert!(contrast_ratio(*a, Color::WHITE) >= 4.5);
            for b in &variants[i + 1..] {
                assert!(!is_perceptually_similar(*a, *b, 5.0));
            }
        }
    }

    #[test]
    fn test_suggest_variants_for_gray_collapses() {
        let gray = Color::rgb(0.4, 0.4, 0.4);
        let variants = enhancer().suggest_accessible_variants(gray, Color::WHITE, 5);
        assert_eq!(variants.len(), 1);
        assert!(enhancer()
            .suggest_accessible_variants(Color::WHITE, Color::WHITE, 0)
            .is_empty());
    }

    #[test]
    fn test_suggest_variants_with_huge_count_returns() {
        let gray = Color::rgb(0.4, 0.4, 0.4);
        let variants = enhancer().suggest_accessible_variants(gray, Color::WHITE, usize::MAX);
        assert_eq!(variants.len(), 1);

        let blue = Color::rgb(0.2, 0.6, 1.0);
        let variants = enhancer().suggest_accessible_variants(blue, Color::WHITE, usize::MAX);
        assert!(!variants.is_empty());
        assert!(variants.len() <= MAX_VARIANT_SEARCH_ATTEMPTS);
    }

    #[test]
    fn test_out_of_range_tuning_is_clamped() {
        let tuning = EnhancerTuning {
            max_iterations: u32::MAX,
            variant_tolerance: f64::NAN,
            variant_attempts_per_color: 0,
        };
        let enhancer = AccessibilityEnhancer::new(Arc::new(ColorCache::default()), tuning);
        assert_eq!(enhancer.tuning().max_iterations, MAX_BISECTION_STEPS);
        assert_eq!(enhancer.tuning().variant_tolerance, 5.0);
        assert_eq!(enhancer.tuning().variant_attempts_per_color, 1);

        let config = EnhancerConfiguration::new().strategy(EnhancementStrategy::PreserveLightness);
        let report =
            enhancer.enhance_with_report(Color::rgb(1.0, 0.0, 0.0), Color::WHITE, &config);
        let walks =
            walks_for(EnhancementStrategy::PreserveLightness, Hsl::new(0.0, 0.0, 0.0)).len();
        let ceiling = walks * (MAX_BISECTION_STEPS as usize + 1) + 1;
        assert!(report.evaluations <= ceiling, "{} evaluations", report.evaluations);
    }

    #[test]
    fn test_is_perceptually_similar_is_strict() {
        let a = Color::rgb(0.5, 0.5, 0.5);
        assert!(is_perceptually_similar(a, a, 0.1));
        assert!(!is_perceptually_similar(a, a, 0.0));
        assert!(!is_perceptually_similar(Color::BLACK, Color::WHITE, 50.0));
    }
}
