//! CMYK, the naive subtractive view of sRGB
//!
//! This is the device-independent formula (no ink profile): key is the
//! distance of the brightest channel from white.

use super::rgba::Color;

/// Key values this close to 1.0 are treated as pure black.
const BLACK_EPSILON: f64 = 1e-12;

/// A color as cyan, magenta, yellow and key (black), each 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cmyk {
    /// Cyan ink, 0.0..=1.0
    pub cyan: f64,
    /// Magenta ink, 0.0..=1.0
    pub magenta: f64,
    /// Yellow ink, 0.0..=1.0
    pub yellow: f64,
    /// Key (black) ink, 0.0..=1.0
    pub key: f64,
}

impl Cmyk {
    /// Create a CMYK value, clamping every component (NaN becomes 0.0).
    pub fn new(cyan: f64, magenta: f64, yellow: f64, key: f64) -> Self {
        let clamp = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self {
            cyan: clamp(cyan),
            magenta: clamp(magenta),
            yellow: clamp(yellow),
            key: clamp(key),
        }
    }

    /// Convert back to an opaque [`Color`].
    pub fn to_color(self) -> Color {
        let white = 1.0 - self.key;
        Color::rgb(
            (1.0 - self.cyan) * white,
            (1.0 - self.magenta) * white,
            (1.0 - self.yellow) * white,
        )
    }
}

impl From<Color> for Cmyk {
    fn from(color: Color) -> Self {
        let (r, g, b) = (color.red(), color.green(), color.blue());
        let key = 1.0 - r.max(g).max(b);
        if key >= 1.0 - BLACK_EPSILON {
            return Self {
                cyan: 0.0,
                magenta: 0.0,
                yellow: 0.0,
                key: 1.0,
            };
        }

        let white = 1.0 - key;
        Self::new(
            (1.0 - r - key) / white,
            (1.0 - g - key) / white,
            (1.0 - b - key) / white,
            key,
        )
    }
}

impl From<Cmyk> for Color {
    fn from(cmyk: Cmyk) -> Self {
        cmyk.to_color()
    }
}

impl Color {
    /// Convert to CMYK. Alpha is dropped.
    ///
    /// ```
    /// use lumen_color::{Cmyk, Color};
    ///
    /// assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_cmyk(), Cmyk::new(0.0, 1.0, 1.0, 0.0));
    /// assert_eq!(Color::BLACK.to_cmyk(), Cmyk::new(0.0, 0.0, 0.0, 1.0));
    /// ```
    #[inline]
    pub fn to_cmyk(self) -> Cmyk {
        Cmyk::from(self)
    }

    /// Build an opaque color from CMYK components, clamping each to 0.0..=1.0 first.
    #[inline]
    pub fn from_cmyk(cyan: f64, magenta: f64, yellow: f64, key: f64) -> Self {
        Cmyk::new(cyan, magenta, yellow, key).to_color()
    }
}
