use std::sync::Arc;

use crate::config::Config;
use crate::layout::StyleConfig;
use crate::render::{DocumentSink, DocxSink};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only style policy, resolved once at startup.
    pub style: Arc<StyleConfig>,
    /// Output format. Default: DocxSink.
    pub sink: Arc<dyn DocumentSink>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let style = StyleConfig::from_config(&config);
        AppState {
            config,
            style: Arc::new(style),
            sink: Arc::new(DocxSink),
        }
    }
}
