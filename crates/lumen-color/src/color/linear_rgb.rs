//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! Relative luminance and the XYZ matrices both operate on linear values.

use super::rgba::Color;

/// Decode one gamma-encoded sRGB channel to linear light (IEC 61966-2-1).
#[inline]
pub fn srgb_to_linear(value: f64) -> f64 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode one linear channel with the sRGB transfer curve (IEC 61966-2-1).
#[inline]
pub fn linear_to_srgb(value: f64) -> f64 {
    if value <= 0.0031308 {
        value * 12.92
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// A color in linear RGB color space.
///
/// Values are typically in the range 0.0..=1.0, but may exceed this range
/// when produced from out-of-gamut XYZ or LAB values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Whether every channel lies within 0.0..=1.0 (with a small tolerance).
    pub fn in_gamut(self) -> bool {
        const TOLERANCE: f64 = 1e-9;
        [self.r, self.g, self.b]
            .iter()
            .all(|c| *c >= -TOLERANCE && *c <= 1.0 + TOLERANCE)
    }
}

impl From<Color> for LinearRgb {
    /// Decode the gamma-encoded channels. Alpha is dropped.
    fn from(color: Color) -> Self {
        Self {
            r: srgb_to_linear(color.red()),
            g: srgb_to_linear(color.green()),
            b: srgb_to_linear(color.blue()),
        }
    }
}

impl From<LinearRgb> for Color {
    /// Clamp to the sRGB gamut, then gamma-encode. The result is opaque.
    fn from(linear: LinearRgb) -> Self {
        let encode = |v: f64| {
            let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
            linear_to_srgb(v)
        };
        Color::rgb(encode(linear.r), encode(linear.g), encode(linear.b))
    }
}
