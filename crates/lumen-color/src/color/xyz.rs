//! CIE 1931 XYZ relative to the D65 white point

use super::linear_rgb::LinearRgb;
use super::rgba::Color;

/// D65 reference white, normalized so that Y = 1.
pub const D65_WHITE: Xyz = Xyz {
    x: 0.95047,
    y: 1.0,
    z: 1.08883,
};

#[rustfmt::skip]
const LINEAR_SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

#[rustfmt::skip]
const XYZ_TO_LINEAR_SRGB: [[f64; 3]; 3] = [
    [ 3.2404542, -1.5371385, -0.4985314],
    [-0.9692660,  1.8760108,  0.0415560],
    [ 0.0556434, -0.2040259,  1.0572252],
];

#[inline]
fn multiply(matrix: &[[f64; 3]; 3], vector: [f64; 3]) -> [f64; 3] {
    let [row1, row2, row3] = matrix;
    let dot = |row: &[f64; 3]| row[0] * vector[0] + row[1] * vector[1] + row[2] * vector[2];
    [dot(row1), dot(row2), dot(row3)]
}

/// A color in CIE XYZ.
///
/// Unbounded in principle; in-gamut sRGB colors stay within roughly
/// `0.0..=1.09` on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xyz {
    /// X tristimulus value
    pub x: f64,
    /// Y tristimulus value (luminance)
    pub y: f64,
    /// Z tristimulus value
    pub z: f64,
}

impl Xyz {
    /// Create a new XYZ value.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<LinearRgb> for Xyz {
    fn from(rgb: LinearRgb) -> Self {
        let [x, y, z] = multiply(&LINEAR_SRGB_TO_XYZ, [rgb.r, rgb.g, rgb.b]);
        Self { x, y, z }
    }
}

impl From<Xyz> for LinearRgb {
    /// Unclamped: out-of-gamut XYZ produces channels outside 0.0..=1.0.
    fn from(xyz: Xyz) -> Self {
        let [r, g, b] = multiply(&XYZ_TO_LINEAR_SRGB, [xyz.x, xyz.y, xyz.z]);
        LinearRgb::new(r, g, b)
    }
}

impl Color {
    /// Convert to CIE XYZ (D65). Alpha is dropped.
    #[inline]
    pub fn to_xyz(self) -> Xyz {
        Xyz::from(LinearRgb::from(self))
    }

    /// Convert from CIE XYZ (D65), clamping to the sRGB gamut. The result is opaque.
    #[inline]
    pub fn from_xyz(xyz: Xyz) -> Self {
        Color::from(LinearRgb::from(xyz))
    }
}
