//! HSL, the cylindrical view of sRGB
//!
//! All three components are normalized to 0.0..=1.0, hue included (one full
//! turn of the color wheel is 1.0).

use super::rgba::Color;

/// Channel spread below which a color counts as achromatic.
const ACHROMATIC_EPSILON: f64 = 1e-12;

/// A color as hue, saturation and lightness.
///
/// Hue is undefined for achromatic colors and reported as 0.0 by convention.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    /// Hue in turns, 0.0..1.0 (0.0 red, 1/3 green, 2/3 blue)
    pub hue: f64,
    /// Saturation, 0.0..=1.0
    pub saturation: f64,
    /// Lightness, 0.0 (black) ..= 1.0 (white)
    pub lightness: f64,
}

impl Hsl {
    /// Create a normalized HSL value.
    ///
    /// Hue wraps modulo 1.0; saturation and lightness are clamped. NaN becomes 0.0.
    ///
    /// ```
    /// use lumen_color::Hsl;
    ///
    /// let hsl = Hsl::new(1.25, 2.0, -1.0);
    /// assert_eq!(hsl, Hsl::new(0.25, 1.0, 0.0));
    /// ```
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        let hue = finite(hue).rem_euclid(1.0);
        Self {
            // rem_euclid may round up to exactly 1.0 for tiny negative inputs
            hue: if hue >= 1.0 { 0.0 } else { hue },
            saturation: finite(saturation).clamp(0.0, 1.0),
            lightness: finite(lightness).clamp(0.0, 1.0),
        }
    }

    /// Signed shortest rotation from `self.hue` to `other_hue`, in -0.5..=0.5 turns.
    pub fn hue_delta(self, other_hue: f64) -> f64 {
        let delta = (other_hue - self.hue).rem_euclid(1.0);
        if delta > 0.5 {
            delta - 1.0
        } else {
            delta
        }
    }

    /// Convert back to an opaque [`Color`].
    pub fn to_color(self) -> Color {
        let Hsl {
            hue,
            saturation: s,
            lightness: l,
        } = self;
        if s <= 0.0 {
            return Color::rgb(l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Color::rgb(
            hue_to_channel(p, q, hue + 1.0 / 3.0),
            hue_to_channel(p, q, hue),
            hue_to_channel(p, q, hue - 1.0 / 3.0),
        )
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Color> for Hsl {
    fn from(color: Color) -> Self {
        let (r, g, b) = (color.red(), color.green(), color.blue());
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;
        let delta = max - min;

        if delta < ACHROMATIC_EPSILON {
            return Self {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }

        let saturation = (delta / (1.0 - (2.0 * lightness - 1.0).abs())).clamp(0.0, 1.0);
        let sector = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Self::new(sector / 6.0, saturation, lightness)
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        hsl.to_color()
    }
}

impl Color {
    /// Convert to HSL. Alpha is dropped.
    #[inline]
    pub fn to_hsl(self) -> Hsl {
        Hsl::from(self)
    }

    /// Build an opaque color from HSL components.
    ///
    /// Hue wraps modulo 1.0 and the other components are clamped, so this
    /// always succeeds.
    ///
    /// ```
    /// use lumen_color::Color;
    ///
    /// assert_eq!(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0));
    /// assert_eq!(Color::from_hsl(1.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0));
    /// ```
    #[inline]
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        Hsl::new(hue, saturation, lightness).to_color()
    }
}
