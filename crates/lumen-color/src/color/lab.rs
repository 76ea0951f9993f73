//! CIE L*a*b* color space
//!
//! LAB is the engine's perceptual metric: the Euclidean distance between two
//! LAB points (CIE76 delta E) decides how different two colors look.
//!
//! # References
//!
//! CIE 15:2004, "Colorimetry", section 8.2.1

use super::rgba::Color;
use super::xyz::{Xyz, D65_WHITE};

/// Threshold between the cube-root and linear segments of f(t).
const EPSILON: f64 = 0.008856;
/// Slope of the linear segment of f(t).
const LINEAR_SLOPE: f64 = 7.787;
const LINEAR_OFFSET: f64 = 16.0 / 116.0;

#[inline]
fn f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        LINEAR_SLOPE * t + LINEAR_OFFSET
    }
}

#[inline]
fn f_inverse(ft: f64) -> f64 {
    let cube = ft * ft * ft;
    if cube > EPSILON {
        cube
    } else {
        (ft - LINEAR_OFFSET) / LINEAR_SLOPE
    }
}

#[inline]
fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}

/// A color in CIE L*a*b* (D65).
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis, -128.0..=127.0
/// - `b`: Blue-yellow axis, -128.0..=127.0
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a new LAB value without clamping.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Clamp to the documented component ranges (NaN becomes 0.0).
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            l: clamp_finite(self.l, 0.0, 100.0),
            a: clamp_finite(self.a, -128.0, 127.0),
            b: clamp_finite(self.b, -128.0, 127.0),
        }
    }

    /// Squared Euclidean distance, for comparisons that can skip the sqrt.
    #[inline]
    pub fn distance_squared(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// Euclidean distance (CIE76 delta E).
    ///
    /// A distance around 2.3 is commonly cited as a just-noticeable difference.
    ///
    /// ```
    /// use lumen_color::Lab;
    ///
    /// let gray = Lab::new(50.0, 0.0, 0.0);
    /// let tinted = Lab::new(50.0, 3.0, 4.0);
    /// assert_eq!(gray.distance(tinted), 5.0);
    /// ```
    #[inline]
    pub fn distance(self, other: Lab) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Chroma, the distance from the neutral axis.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let fx = f(xyz.x / D65_WHITE.x);
        let fy = f(xyz.y / D65_WHITE.y);
        let fz = f(xyz.z / D65_WHITE.z);
        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for Xyz {
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;
        Xyz::new(
            f_inverse(fx) * D65_WHITE.x,
            f_inverse(fy) * D65_WHITE.y,
            f_inverse(fz) * D65_WHITE.z,
        )
    }
}

impl Color {
    /// Convert to CIE LAB via linear RGB and XYZ. Alpha is dropped.
    #[inline]
    pub fn to_lab(self) -> Lab {
        Lab::from(self.to_xyz())
    }

    /// Convert from CIE LAB.
    ///
    /// Inputs are clamped to their documented ranges first. LAB admits colors
    /// outside the sRGB gamut; those are clamped per channel. The result is opaque.
    #[inline]
    pub fn from_lab(l: f64, a: f64, b: f64) -> Self {
        Color::from_xyz(Xyz::from(Lab::new(l, a, b).clamped()))
    }

    /// Perceptual distance to another color (LAB delta E).
    #[inline]
    pub fn perceptual_distance(self, other: Color) -> f64 {
        self.to_lab().distance(other.to_lab())
    }
}
