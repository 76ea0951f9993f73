//! Tests for the accessibility enhancer.

mod common;

use common::fixtures::{self, colors};
use common::TestEngine;
use lumen::color::{contrast_ratio, Color, ContrastLevel};
use lumen::{
    is_perceptually_similar, EnhancementOutcome, EnhancementStrategy, EnhancerConfiguration,
};
use pretty_assertions::assert_eq;

const STRATEGIES: [EnhancementStrategy; 4] = [
    EnhancementStrategy::PreserveHue,
    EnhancementStrategy::PreserveSaturation,
    EnhancementStrategy::PreserveLightness,
    EnhancementStrategy::MinimumChange,
];

fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(1.0);
    d.min(1.0 - d)
}

#[test]
fn test_contract_holds_across_strategies_levels_and_budgets() {
    let engine = TestEngine::new();
    let backgrounds = [
        Color::WHITE,
        Color::BLACK,
        Color::rgb(0.5, 0.5, 0.5),
        fixtures::hex("#1e293b"),
    ];

    for input in colors::light_on_white() {
        for background in backgrounds {
            for strategy in STRATEGIES {
                for level in [ContrastLevel::Aa, ContrastLevel::Aaa] {
                    for budget in [5.0, 25.0] {
                        let config = EnhancerConfiguration::new()
                            .strategy(strategy)
                            .target_level(level)
                            .max_perceptual_distance(budget);
                        let output = engine.enhancer.enhance(input, background, &config);
                        common::assert_enhancement_contract(
                            input, output, background, level, budget,
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_preserve_hue_keeps_hue_when_reached() {
    let engine = TestEngine::new();
    let config = EnhancerConfiguration::new().max_perceptual_distance(f64::INFINITY);

    for input in colors::light_on_white() {
        let report = engine
            .enhancer
            .enhance_with_report(input, Color::WHITE, &config);
        assert_eq!(report.outcome, EnhancementOutcome::Reached, "{input}");
        common::assert_complies(report.color, Color::WHITE, ContrastLevel::Aa);

        let (before, after) = (input.to_hsl(), report.color.to_hsl());
        if before.saturation > 0.0 {
            assert!(
                hue_distance(before.hue, after.hue) <= 0.05,
                "{input} hue {} moved to {}",
                before.hue,
                after.hue
            );
        }
    }
}

#[test]
fn test_red_on_white_scenario() {
    let engine = TestEngine::new();
    let red = colors::red();
    assert!(contrast_ratio(red, Color::WHITE) < 4.5);

    let report = engine
        .enhancer
        .enhance_with_report(red, Color::WHITE, &EnhancerConfiguration::default());
    assert_eq!(report.outcome, EnhancementOutcome::Reached);
    assert!(report.ratio >= 4.5);
    assert!(report.distance <= 25.0);
    assert!(report.ratio < 5.0, "overshot: {}", report.ratio);
}

#[test]
fn test_results_do_not_depend_on_cache_warmth() {
    let cold = TestEngine::new();
    let warm = TestEngine::new();

    // Warm one cache with unrelated work first
    for seed in colors::seeds() {
        warm.generator
            .generate(seed, &lumen::PaletteConfiguration::default());
    }

    for strategy in STRATEGIES {
        let config = EnhancerConfiguration::new().strategy(strategy);
        for input in colors::light_on_white() {
            assert_eq!(
                cold.enhancer.enhance(input, Color::WHITE, &config),
                warm.enhancer.enhance(input, Color::WHITE, &config),
                "{input} with {strategy:?}"
            );
        }
    }
}

#[test]
fn test_cleared_cache_gives_same_results() {
    let engine = TestEngine::new();
    let config = EnhancerConfiguration::new().strategy(EnhancementStrategy::MinimumChange);
    let first: Vec<Color> = colors::light_on_white()
        .into_iter()
        .map(|c| engine.enhancer.enhance(c, Color::WHITE, &config))
        .collect();

    engine.cache.clear();
    let second: Vec<Color> = colors::light_on_white()
        .into_iter()
        .map(|c| engine.enhancer.enhance(c, Color::WHITE, &config))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_suggested_variants_on_dark_background() {
    let engine = TestEngine::new();
    let background = fixtures::hex("#09090b");
    let variants = engine
        .enhancer
        .suggest_accessible_variants(fixtures::hex("#3b82f6"), background, 5);

    assert!(!variants.is_empty());
    assert!(variants.len() <= 5);
    common::assert_palette_complies(&variants, background, ContrastLevel::Aa);
    for (i, a) in variants.iter().enumerate() {
        for b in &variants[i + 1..] {
            assert!(!is_perceptually_similar(*a, *b, 5.0));
        }
    }
}

#[test]
fn test_report_serializes() {
    let engine = TestEngine::new();
    let report = engine.enhancer.enhance_with_report(
        colors::red(),
        Color::WHITE,
        &EnhancerConfiguration::default(),
    );
    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["outcome"], "reached");
    assert!(json["color"]["red"].as_f64().is_some());
    assert_eq!(json["color"]["alpha"], 1.0);
}
