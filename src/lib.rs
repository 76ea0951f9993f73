//! Lumen - perceptual color engine
//!
//! Accessibility enhancement, accessible palette generation and the
//! memoizing cache behind them. The color math itself lives in
//! [`lumen_color`], re-exported here as [`color`].

pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use lumen_color as color;

pub use error::{ConfigError, EngineError};
pub use models::{
    CacheConfig, EngineConfig, EnhancementStrategy, EnhancerConfiguration, EnhancerTuning,
    PaletteConfiguration, PaletteTuning,
};
pub use services::{
    is_perceptually_similar, AccessibilityEnhancer, AccessiblePaletteGenerator, ColorCache,
    EnhancementOutcome, EnhancementReport, PaletteReport, PaletteWorker,
};
