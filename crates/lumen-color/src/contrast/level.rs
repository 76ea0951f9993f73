//! WCAG conformance levels and compliance reports

use std::fmt;

/// WCAG contrast conformance level.
///
/// Levels are ordered by declaration, which agrees with their minimum ratios:
/// `AaLarge (3.0) <= Aa (4.5) == AaaLarge (4.5) <= Aaa (7.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ContrastLevel {
    /// AA for large text (18pt, or 14pt bold): 3.0:1
    AaLarge,
    /// AA for normal text: 4.5:1
    #[default]
    Aa,
    /// AAA for large text: 4.5:1
    AaaLarge,
    /// AAA for normal text: 7.0:1
    Aaa,
}

impl ContrastLevel {
    /// Every level, ascending.
    pub const ALL: [ContrastLevel; 4] = [
        ContrastLevel::AaLarge,
        ContrastLevel::Aa,
        ContrastLevel::AaaLarge,
        ContrastLevel::Aaa,
    ];

    /// The minimum contrast ratio this level requires.
    pub const fn min_ratio(self) -> f64 {
        match self {
            ContrastLevel::AaLarge => 3.0,
            ContrastLevel::Aa | ContrastLevel::AaaLarge => 4.5,
            ContrastLevel::Aaa => 7.0,
        }
    }

    /// Whether `ratio` meets this level.
    #[inline]
    pub fn is_met_by(self, ratio: f64) -> bool {
        ratio >= self.min_ratio()
    }
}

impl fmt::Display for ContrastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContrastLevel::AaLarge => "AA (large text)",
            ContrastLevel::Aa => "AA",
            ContrastLevel::AaaLarge => "AAA (large text)",
            ContrastLevel::Aaa => "AAA",
        })
    }
}

/// Pass/fail of one color pair against every WCAG level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compliance {
    /// The contrast ratio the report was derived from
    pub ratio: f64,
    /// Meets AA for normal text
    pub passes_aa: bool,
    /// Meets AAA for normal text
    pub passes_aaa: bool,
    /// Meets AA for large text
    pub passes_aa_large: bool,
    /// Meets AAA for large text
    pub passes_aaa_large: bool,
    /// Greatest level met, `None` if the ratio is below 3.0
    pub highest_level: Option<ContrastLevel>,
}

impl Compliance {
    /// Derive a report from a contrast ratio.
    pub fn from_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            passes_aa: ContrastLevel::Aa.is_met_by(ratio),
            passes_aaa: ContrastLevel::Aaa.is_met_by(ratio),
            passes_aa_large: ContrastLevel::AaLarge.is_met_by(ratio),
            passes_aaa_large: ContrastLevel::AaaLarge.is_met_by(ratio),
            highest_level: ContrastLevel::ALL
                .into_iter()
                .rev()
                .find(|level| level.is_met_by(ratio)),
        }
    }

    /// Whether the ratio meets `level`.
    #[inline]
    pub fn passes(&self, level: ContrastLevel) -> bool {
        level.is_met_by(self.ratio)
    }
}
