#![allow(clippy::excessive_precision, clippy::manual_range_contains)]

//! lumen-color: colorimetric transforms and contrast math
//!
//! This crate holds the pure numeric half of the lumen engine: a typed,
//! always-valid [`Color`] and its conversions to and from HSL, CMYK, CIE XYZ
//! and CIE LAB, the WCAG contrast model, and blend/interpolation routines.
//! Nothing here allocates, locks or logs.
//!
//! # Quick Start
//!
//! ```
//! use lumen_color::{contrast_ratio, Color, ContrastLevel};
//!
//! let red = Color::from_hsl(0.0, 1.0, 0.5);
//! assert_eq!(red.to_bytes(), [255, 0, 0]);
//!
//! let ratio = contrast_ratio(Color::WHITE, Color::BLACK);
//! assert!((ratio - 21.0).abs() < 1e-9);
//! assert!(ContrastLevel::Aaa.is_met_by(ratio));
//! ```
//!
//! # Color Spaces
//!
//! - [`Color`]: gamma-encoded sRGB plus alpha, the value every API accepts
//! - [`LinearRgb`]: linear light, used for luminance and XYZ
//! - [`Xyz`]: CIE 1931 XYZ relative to the D65 white point
//! - [`Lab`]: CIE L*a*b*, the perceptual distance metric
//! - [`Hsl`] and [`Cmyk`]: cylindrical and subtractive views of sRGB
//!
//! Conversions out of [`Color`] are total. Conversions into [`Color`] from
//! raw numbers clamp their inputs and never fail; LAB and XYZ values outside
//! the sRGB gamut are clamped per channel.
//!
//! # Numeric Policy
//!
//! All math is `f64`. The sRGB transfer curve uses the IEC 61966-2-1
//! piecewise definition, and the XYZ matrices are the standard sRGB/D65
//! pair. Round trips through HSL and CMYK reproduce the input within 0.1%,
//! and LAB round trips stay within 0.1 units on every axis.

pub mod blend;
pub mod color;
pub mod contrast;
pub mod error;


pub use blend::{blend, interpolate, BlendMode, InterpolationSpace};
pub use color::{Cmyk, Color, Hsl, Lab, LinearRgb, Xyz, QUANTIZATION_SCALE};
pub use contrast::{
    compliance, contrast_ratio, contrast_ratio_from_luminance, relative_luminance, Compliance,
    ContrastLevel,
};
pub use error::{ColorError, ParseColorError};
