pub mod config;
pub mod enhancement;
pub mod palette;

pub use config::{CacheConfig, EngineConfig, EnhancerTuning, PaletteTuning};
pub use enhancement::{EnhancementStrategy, EnhancerConfiguration};
pub use palette::{PaletteConfiguration, MIN_PALETTE_SIZE};
