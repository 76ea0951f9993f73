pub mod color_cache;
pub mod enhancer;
pub mod palette_generator;
pub mod worker;

pub use color_cache::{CacheCategory, CacheKey, CacheStats, CachedValue, ColorCache, ColorKey};
pub use enhancer::{
    is_perceptually_similar, AccessibilityEnhancer, EnhancementOutcome, EnhancementReport,
};
pub use palette_generator::{AccessiblePaletteGenerator, PaletteReport};
pub use worker::PaletteWorker;
