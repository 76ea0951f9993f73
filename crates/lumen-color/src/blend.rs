//! Blending and interpolation
//!
//! Both operations are order-sensitive: `blend(a, b, mode)` composites `a`
//! over `b`, and `interpolate(a, b, t, space)` walks from `a` toward `b`.

use crate::color::{Color, Lab};

/// Per-channel blend function applied before alpha compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BlendMode {
    /// The top color replaces the bottom
    #[default]
    Normal,
    /// `top * bottom`, always darkens
    Multiply,
    /// `1 - (1 - top) * (1 - bottom)`, always lightens
    Screen,
    /// Multiply on dark bottoms, screen on light bottoms
    Overlay,
    /// Per-channel minimum
    Darken,
    /// Per-channel maximum
    Lighten,
}

impl BlendMode {
    #[inline]
    fn apply(self, top: f64, bottom: f64) -> f64 {
        match self {
            BlendMode::Normal => top,
            BlendMode::Multiply => top * bottom,
            BlendMode::Screen => 1.0 - (1.0 - top) * (1.0 - bottom),
            BlendMode::Overlay => {
                if bottom <= 0.5 {
                    2.0 * top * bottom
                } else {
                    1.0 - 2.0 * (1.0 - top) * (1.0 - bottom)
                }
            }
            BlendMode::Darken => top.min(bottom),
            BlendMode::Lighten => top.max(bottom),
        }
    }
}

/// Space in which [`interpolate`] mixes two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum InterpolationSpace {
    /// Straight lerp of the gamma-encoded channels
    #[default]
    Rgb,
    /// Lerp in CIE LAB, perceptually even steps
    Lab,
}

/// Composite `top` over `bottom` with the given blend function.
///
/// Each channel is `bottom * (1 - a_top) + mode(top, bottom) * a_top`, and the
/// resulting alpha is `a_top + a_bottom * (1 - a_top)`.
///
/// ```
/// use lumen_color::{blend, BlendMode, Color};
///
/// let veil = Color::WHITE.with_alpha(0.5);
/// let mixed = blend(veil, Color::BLACK, BlendMode::Normal);
/// assert_eq!(mixed, Color::rgb(0.5, 0.5, 0.5));
/// ```
pub fn blend(top: Color, bottom: Color, mode: BlendMode) -> Color {
    let alpha = top.alpha();
    let channel = |t: f64, b: f64| b * (1.0 - alpha) + mode.apply(t, b) * alpha;
    Color::new(
        channel(top.red(), bottom.red()),
        channel(top.green(), bottom.green()),
        channel(top.blue(), bottom.blue()),
        alpha + bottom.alpha() * (1.0 - alpha),
    )
}

/// Interpolate from `from` (t = 0) to `to` (t = 1).
///
/// `t` is clamped to 0.0..=1.0; alpha is interpolated linearly. The endpoints
/// are returned unchanged, so a LAB round trip never perturbs them.
pub fn interpolate(from: Color, to: Color, t: f64, space: InterpolationSpace) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t == 0.0 {
        return from;
    }
    if t == 1.0 {
        return to;
    }

    let lerp = |a: f64, b: f64| a + (b - a) * t;
    let alpha = lerp(from.alpha(), to.alpha());
    match space {
        InterpolationSpace::Rgb => Color::new(
            lerp(from.red(), to.red()),
            lerp(from.green(), to.green()),
            lerp(from.blue(), to.blue()),
            alpha,
        ),
        InterpolationSpace::Lab => {
            let (a, b) = (from.to_lab(), to.to_lab());
            let mixed = Lab::new(lerp(a.l, b.l), lerp(a.a, b.a), lerp(a.b, b.b));
            Color::from_lab(mixed.l, mixed.a, mixed.b).with_alpha(alpha)
        }
    }
}
