//! WCAG 2.x relative luminance and contrast ratio
//!
//! Luminance is computed from linearized sRGB channels with the Rec. 709
//! weights; the contrast ratio between two colors is
//! `(L_lighter + 0.05) / (L_darker + 0.05)`, which ranges from 1.0 (identical
//! luminance) to 21.0 (black on white).
//!
//! Alpha is ignored: both colors are treated as opaque. Callers holding
//! translucent colors should composite them first (see
//! [`blend`](crate::blend::blend)).

mod level;

pub use level::{Compliance, ContrastLevel};

use crate::color::{srgb_to_linear, Color};

const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;

/// Flare term added to both luminances before taking the ratio.
const FLARE: f64 = 0.05;

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// Returns a value in 0.0..=1.0 where 0 is black and 1 is white.
///
/// ```
/// use lumen_color::{relative_luminance, Color};
///
/// assert_eq!(relative_luminance(Color::BLACK), 0.0);
/// assert!((relative_luminance(Color::WHITE) - 1.0).abs() < 1e-12);
/// ```
pub fn relative_luminance(color: Color) -> f64 {
    RED_WEIGHT * srgb_to_linear(color.red())
        + GREEN_WEIGHT * srgb_to_linear(color.green())
        + BLUE_WEIGHT * srgb_to_linear(color.blue())
}

/// Contrast ratio between two luminance values. Symmetric, always >= 1.0.
#[inline]
pub fn contrast_ratio_from_luminance(a: f64, b: f64) -> f64 {
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    (lighter + FLARE) / (darker + FLARE)
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// The result is the same regardless of argument order.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    contrast_ratio_from_luminance(relative_luminance(a), relative_luminance(b))
}

/// Evaluate the contrast between two colors against every WCAG level.
///
/// ```
/// use lumen_color::{compliance, Color, ContrastLevel};
///
/// let report = compliance(Color::from_u8(0x76, 0x76, 0x76), Color::WHITE);
/// assert!(report.passes_aa);
/// assert!(!report.passes_aaa);
/// assert_eq!(report.highest_level, Some(ContrastLevel::AaaLarge));
/// ```
pub fn compliance(a: Color, b: Color) -> Compliance {
    Compliance::from_ratio(contrast_ratio(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_boundaries() {
        assert!(approx_eq(relative_luminance(Color::BLACK), 0.0, 1e-12));
        assert!(approx_eq(relative_luminance(Color::WHITE), 1.0, 1e-12));
    }

    #[test]
    fn luminance_mid_gray() {
        let lum = relative_luminance(Color::rgb(0.5, 0.5, 0.5));
        assert!(approx_eq(lum, 0.214, 0.001), "Mid-gray luminance: {lum}");
    }

    #[test]
    fn luminance_primaries_match_weights() {
        assert!(approx_eq(relative_luminance(Color::rgb(1.0, 0.0, 0.0)), 0.2126, 1e-12));
        assert!(approx_eq(relative_luminance(Color::rgb(0.0, 1.0, 0.0)), 0.7152, 1e-12));
        assert!(approx_eq(relative_luminance(Color::rgb(0.0, 0.0, 1.0)), 0.0722, 1e-12));
    }

    #[test]
    fn luminance_ignores_alpha() {
        let opaque = Color::rgb(0.2, 0.4, 0.6);
        assert_eq!(
            relative_luminance(opaque),
            relative_luminance(opaque.with_alpha(0.1))
        );
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_same_color_is_1() {
        let c = Color::rgb(0.3, 0.6, 0.1);
        assert_eq!(contrast_ratio(c, c), 1.0);
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = Color::rgb(0.8, 0.2, 0.3);
        let b = Color::rgb(0.1, 0.1, 0.4);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn contrast_reference_pairs() {
        // Reference values from established WCAG checkers
        let cases = [
            ("#767676", "#ffffff", 4.54),
            ("#ff0000", "#ffffff", 3.99),
            ("#1e293b", "#ffffff", 14.62),
            ("#a1a1aa", "#09090b", 7.76),
        ];
        for (fg, bg, expected) in cases {
            let ratio = contrast_ratio(fg.parse().unwrap(), bg.parse().unwrap());
            assert!(
                approx_eq(ratio, expected, 0.05),
                "{fg} on {bg}: expected {expected}, got {ratio}"
            );
        }
    }
}
