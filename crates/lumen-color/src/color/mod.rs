//! Color types and conversions
//!
//! This module provides type-safe color handling with compile-time distinction
//! between the gamma-encoded [`Color`] and every derived representation.
//!
//! # Color Spaces
//!
//! - **Color**: gamma-encoded sRGB with alpha. The only type the engine passes around.
//! - **LinearRgb**: linear light intensity, for luminance and matrix math.
//! - **Xyz / Lab**: CIE spaces relative to D65, LAB being the distance metric.
//! - **Hsl / Cmyk**: alternative views, output-only value tuples.
//!
//! # Example
//!
//! ```
//! use lumen_color::{Color, Lab};
//!
//! let red = Color::rgb(1.0, 0.0, 0.0);
//! let lab = red.to_lab();
//! assert!((lab.l - 53.24).abs() < 0.01);
//!
//! let back = Color::from_lab(lab.l, lab.a, lab.b);
//! assert_eq!(back.to_bytes(), [255, 0, 0]);
//! ```

mod cmyk;
mod hsl;
mod lab;
mod linear_rgb;
mod rgba;
mod xyz;

pub use cmyk::Cmyk;
pub use hsl::Hsl;
pub use lab::Lab;
pub use linear_rgb::{linear_to_srgb, srgb_to_linear, LinearRgb};
pub use rgba::{Color, QUANTIZATION_SCALE};
pub use xyz::{Xyz, D65_WHITE};
