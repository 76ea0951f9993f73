//! Assertion helpers for tests.

use lumen::color::{contrast_ratio, Color, ContrastLevel};

/// Assert `color` meets `level` against `background`
pub fn assert_complies(color: Color, background: Color, level: ContrastLevel) {
    let ratio = contrast_ratio(color, background);
    assert!(
        ratio >= level.min_ratio(),
        "Expected {} on {} to meet {} ({}:1), got {:.3}:1",
        color,
        background,
        level,
        level.min_ratio(),
        ratio
    );
}

/// Assert every color of a palette meets `level` against `background`
pub fn assert_palette_complies(palette: &[Color], background: Color, level: ContrastLevel) {
    for color in palette {
        assert_complies(*color, background, level);
    }
}

/// Assert no two palette colors are closer than `tolerance` in LAB
pub fn assert_mutually_distinct(palette: &[Color], tolerance: f64) {
    for (i, a) in palette.iter().enumerate() {
        for b in &palette[i + 1..] {
            let distance = a.perceptual_distance(*b);
            assert!(
                distance >= tolerance,
                "Expected {} and {} at least {} apart, got {:.3}",
                a,
                b,
                tolerance,
                distance
            );
        }
    }
}

/// Assert an enhancement result honors its contract: it meets the level or
/// stays within the distance budget of the input
pub fn assert_enhancement_contract(
    input: Color,
    output: Color,
    background: Color,
    level: ContrastLevel,
    max_distance: f64,
) {
    let ratio = contrast_ratio(output, background);
    let distance = input.perceptual_distance(output);
    assert!(
        ratio >= level.min_ratio() || distance <= max_distance + 1e-9,
        "{} -> {} on {}: ratio {:.3} below {} and distance {:.3} above {}",
        input,
        output,
        background,
        ratio,
        level.min_ratio(),
        distance,
        max_distance
    );
}
