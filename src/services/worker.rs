//! Off-thread execution for palette generation and enhancement.

use std::sync::Arc;

use lumen_color::Color;

use crate::error::EngineError;
use crate::models::{EngineConfig, EnhancerConfiguration, PaletteConfiguration};
use crate::services::color_cache::ColorCache;
use crate::services::enhancer::EnhancementReport;
use crate::services::palette_generator::{AccessiblePaletteGenerator, PaletteReport};

/// Runs the engine's searches on tokio's blocking pool so they never stall
/// an async runtime or an interactive thread.
#[derive(Clone)]
pub struct PaletteWorker {
    generator: Arc<AccessiblePaletteGenerator>,
}

impl PaletteWorker {
    pub fn new(generator: Arc<AccessiblePaletteGenerator>) -> Self {
        Self { generator }
    }

    /// Build a worker with a fresh cache sized by `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        let cache = Arc::new(ColorCache::new(&config.cache));
        Self::new(Arc::new(AccessiblePaletteGenerator::new(cache, config)))
    }

    pub fn generator(&self) -> &Arc<AccessiblePaletteGenerator> {
        &self.generator
    }

    /// Generate a palette in a blocking context.
    pub async fn generate(
        &self,
        seed: Color,
        configuration: PaletteConfiguration,
    ) -> Result<PaletteReport, EngineError> {
        let generator = self.generator.clone();
        run_blocking(move || generator.generate_with_report(seed, &configuration)).await
    }

    /// Enhance one color in a blocking context.
    pub async fn enhance(
        &self,
        color: Color,
        background: Color,
        configuration: EnhancerConfiguration,
    ) -> Result<EnhancementReport, EngineError> {
        let generator = self.generator.clone();
        run_blocking(move || {
            generator
                .enhancer()
                .enhance_with_report(color, background, &configuration)
        })
        .await
    }
}

/// Execute CPU-bound work on the blocking pool. A panicking job surfaces as
/// [`EngineError::Worker`].
async fn run_blocking<T, F>(job: F) -> Result<T, EngineError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job).await.map_err(|e| {
        tracing::warn!(%e, "Worker task failed");
        EngineError::from(e)
    })
}
