//! Application state management

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::extraction::ExtractionPipeline;
use crate::ocr::{create_engine, OcrEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    pipeline: ExtractionPipeline,
}

impl AppState {
    /// Create application state with the engine named in `config`
    pub fn new(config: Config) -> Self {
        let engine = create_engine(&config.engine_config());
        Self::with_engine(config, engine)
    }

    /// Create application state around an existing OCR engine
    pub fn with_engine(config: Config, engine: Arc<dyn OcrEngine>) -> Self {
        let pipeline = ExtractionPipeline::new(config.pipeline_options(), engine);
        Self {
            inner: Arc::new(AppStateInner { config, pipeline }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the extraction pipeline
    pub fn pipeline(&self) -> &ExtractionPipeline {
        &self.inner.pipeline
    }

    /// Upper bound on a single extraction
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.inner.config.extraction.timeout_secs)
    }
}
