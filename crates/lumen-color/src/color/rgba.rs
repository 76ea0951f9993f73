//! The engine's color value
//!
//! [`Color`] is gamma-encoded sRGB plus straight alpha, every channel in
//! 0.0..=1.0. Fields are private so a `Color` can only be built through
//! constructors that keep it valid.

use std::fmt;
use std::str::FromStr;

use crate::error::{ColorError, ParseColorError};

/// Number of grid steps per unit used by [`Color::quantized`] (three decimal places).
pub const QUANTIZATION_SCALE: f64 = 1000.0;

/// Added before truncation so values like `0.123 * 1000.0 = 122.99999...`
/// land on the intended grid point.
const QUANTIZATION_EPSILON: f64 = 1e-6;

/// A color in gamma-encoded sRGB with alpha.
///
/// Immutable value type: every transform returns a new `Color`.
///
/// # Example
///
/// ```
/// use lumen_color::Color;
///
/// let teal = Color::rgb(0.0, 0.5, 0.5);
/// assert_eq!(teal.green(), 0.5);
/// assert_eq!(teal.alpha(), 1.0);
///
/// // Out-of-range input is clamped, never rejected
/// let clamped = Color::rgb(1.7, -0.2, f64::NAN);
/// assert_eq!(clamped.components(), [1.0, 0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "ColorRepr", into = "ColorRepr"))]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

#[inline]
fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[inline]
fn quantize_channel(value: f64) -> i32 {
    (value * QUANTIZATION_SCALE + QUANTIZATION_EPSILON).floor() as i32
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Opaque white.
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Create a color, clamping every channel to 0.0..=1.0 (NaN becomes 0.0).
    #[inline]
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: sanitize(r),
            g: sanitize(g),
            b: sanitize(b),
            a: sanitize(a),
        }
    }

    /// Create an opaque color, clamping every channel.
    #[inline]
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from externally sourced numbers without clamping.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::NotFinite`] for NaN or infinite channels and
    /// [`ColorError::OutOfRange`] for channels outside 0.0..=1.0.
    ///
    /// ```
    /// use lumen_color::{Color, ColorError};
    ///
    /// assert!(Color::try_new(0.2, 0.4, 0.6, 1.0).is_ok());
    /// assert!(matches!(
    ///     Color::try_new(0.2, 1.4, 0.6, 1.0),
    ///     Err(ColorError::OutOfRange { channel: "green", .. })
    /// ));
    /// ```
    pub fn try_new(r: f64, g: f64, b: f64, a: f64) -> Result<Self, ColorError> {
        for (channel, value) in [("red", r), ("green", g), ("blue", b), ("alpha", a)] {
            if !value.is_finite() {
                return Err(ColorError::NotFinite { channel });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(ColorError::OutOfRange { channel, value });
            }
        }
        Ok(Self { r, g, b, a })
    }

    /// Create an opaque color from 8-bit channels.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, u8::MAX)
    }

    /// Create a color from 8-bit channels including alpha.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: f64::from(a) / 255.0,
        }
    }

    /// Convert to 8-bit RGB, rounding to the nearest step.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        let [r, g, b, _] = self.to_rgba8();
        [r, g, b]
    }

    /// Convert to 8-bit RGBA, rounding to the nearest step.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }

    /// Red channel (gamma-encoded, 0.0..=1.0)
    #[inline]
    pub fn red(self) -> f64 {
        self.r
    }

    /// Green channel (gamma-encoded, 0.0..=1.0)
    #[inline]
    pub fn green(self) -> f64 {
        self.g
    }

    /// Blue channel (gamma-encoded, 0.0..=1.0)
    #[inline]
    pub fn blue(self) -> f64 {
        self.b
    }

    /// Alpha channel (0.0 transparent ..= 1.0 opaque)
    #[inline]
    pub fn alpha(self) -> f64 {
        self.a
    }

    /// All four channels as `[r, g, b, a]`.
    #[inline]
    pub fn components(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Return the same color with a different alpha (clamped).
    #[inline]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: sanitize(alpha),
            ..self
        }
    }

    /// Channels truncated to thousandths, as integers in 0..=1000.
    ///
    /// This is the identity the engine's cache uses for a color.
    #[inline]
    pub fn quantized_components(self) -> [i32; 4] {
        [
            quantize_channel(self.r),
            quantize_channel(self.g),
            quantize_channel(self.b),
            quantize_channel(self.a),
        ]
    }

    /// Rebuild a color from [`quantized_components`](Self::quantized_components).
    pub fn from_quantized(components: [i32; 4]) -> Self {
        let [r, g, b, a] = components.map(|c| f64::from(c) / QUANTIZATION_SCALE);
        Self::new(r, g, b, a)
    }

    /// Snap every channel down to the three-decimal grid.
    ///
    /// ```
    /// use lumen_color::Color;
    ///
    /// let c = Color::rgb(0.12345, 0.5, 0.99999);
    /// assert_eq!(c.quantized().components(), [0.123, 0.5, 0.999, 1.0]);
    /// assert_eq!(c.quantized().quantized(), c.quantized());
    /// ```
    #[inline]
    pub fn quantized(self) -> Self {
        Self::from_quantized(self.quantized_components())
    }

    /// Render as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `RGB`, `RGBA`, `RRGGBB` and `RRGGBBAA`, each with or without
    /// a leading `#`. Parsing is case-insensitive and trims whitespace.
    ///
    /// ```
    /// use lumen_color::Color;
    ///
    /// let red: Color = "#F00".parse().unwrap();
    /// assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));
    ///
    /// let translucent: Color = "00000080".parse().unwrap();
    /// assert_eq!(translucent.to_rgba8(), [0, 0, 0, 0x80]);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        let short = |i: usize| -> Result<u8, ParseColorError> {
            // Expand each digit by multiplying by 17 (0xF -> 0xFF)
            Ok(u8::from_str_radix(&s[i..i + 1], 16)? * 17)
        };
        let long = |i: usize| -> Result<u8, ParseColorError> {
            Ok(u8::from_str_radix(&s[i..i + 2], 16)?)
        };

        match s.len() {
            3 => Ok(Self::from_u8(short(0)?, short(1)?, short(2)?)),
            4 => Ok(Self::from_rgba8(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Ok(Self::from_u8(long(0)?, long(2)?, long(4)?)),
            8 => Ok(Self::from_rgba8(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ColorRepr {
    red: f64,
    green: f64,
    blue: f64,
    #[serde(default = "opaque")]
    alpha: f64,
}

#[cfg(feature = "serde")]
fn opaque() -> f64 {
    1.0
}

#[cfg(feature = "serde")]
impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        Color::new(repr.red, repr.green, repr.blue, repr.alpha)
    }
}

#[cfg(feature = "serde")]
impl From<Color> for ColorRepr {
    fn from(color: Color) -> Self {
        ColorRepr {
            red: color.r,
            green: color.g,
            blue: color.b,
            alpha: color.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_clamp() {
        let c = Color::new(-1.0, 2.0, 0.25, f64::INFINITY);
        assert_eq!(c.components(), [0.0, 1.0, 0.25, 1.0]);

        let c = Color::new(f64::NAN, 0.5, 0.5, f64::NAN);
        assert_eq!(c.components(), [0.0, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_try_new_rejects_malformed() {
        assert_eq!(
            Color::try_new(f64::NAN, 0.0, 0.0, 1.0),
            Err(ColorError::NotFinite { channel: "red" })
        );
        assert_eq!(
            Color::try_new(0.0, 0.0, -0.5, 1.0),
            Err(ColorError::OutOfRange {
                channel: "blue",
                value: -0.5
            })
        );
        assert!(Color::try_new(0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_byte_conversions() {
        let color = Color::from_u8(255, 128, 0);
        assert_eq!(color.red(), 1.0);
        assert!((color.green() - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(color.to_bytes(), [255, 128, 0]);
        assert_eq!(Color::from_rgba8(1, 2, 3, 4).to_rgba8(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_quantization_absorbs_jitter() {
        let exact = Color::rgb(0.123, 0.456, 0.789);
        let jittered = Color::rgb(0.123 + 1e-12, 0.456 - 1e-12, 0.789 + 1e-9);
        assert_eq!(exact.quantized_components(), [123, 456, 789, 1000]);
        assert_eq!(
            exact.quantized_components(),
            jittered.quantized_components()
        );
    }

    #[test]
    fn test_quantization_truncates() {
        let c = Color::rgb(0.1239, 0.0, 1.0);
        assert_eq!(c.quantized_components(), [123, 0, 1000, 1000]);
        assert_eq!(
            Color::from_quantized(c.quantized_components()),
            Color::rgb(0.123, 0.0, 1.0)
        );
    }

    #[test]
    fn test_quantized_is_a_fixed_point() {
        for i in 0..=1000 {
            let v = f64::from(i) / 1000.0;
            let q = Color::rgb(v, v, v).quantized();
            assert_eq!(q.quantized_components()[0], i, "grid point {i} moved");
        }
    }

    #[test]
    fn test_hex_round_trip() {
        let color: Color = "#1e293b".parse().unwrap();
        assert_eq!(color.to_hex(), "#1e293b");
        assert_eq!(color.to_string(), "#1e293b");

        let translucent = Color::from_rgba8(255, 0, 0, 0x80);
        assert_eq!(translucent.to_hex(), "#ff000080");
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Color>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert_eq!(
            "#FFFFF".parse::<Color>(),
            Err(ParseColorError::InvalidLength)
        );
        assert_eq!("".parse::<Color>(), Err(ParseColorError::InvalidLength));
        assert_eq!("#".parse::<Color>(), Err(ParseColorError::InvalidLength));
        assert_eq!("#ééé".parse::<Color>(), Err(ParseColorError::InvalidLength));
    }

    #[test]
    fn test_hex_parsing_shorthand_and_whitespace() {
        let white: Color = "  #fff  ".parse().unwrap();
        assert_eq!(white, Color::WHITE);

        let color: Color = "#ABC".parse().unwrap();
        assert_eq!(color, Color::from_u8(0xAA, 0xBB, 0xCC));

        let with_alpha: Color = "#ABCD".parse().unwrap();
        assert_eq!(with_alpha.to_rgba8(), [0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_with_alpha() {
        let c = Color::WHITE.with_alpha(0.5);
        assert_eq!(c.alpha(), 0.5);
        assert_eq!(c.red(), 1.0);
        assert_eq!(Color::WHITE.with_alpha(3.0).alpha(), 1.0);
    }
}
