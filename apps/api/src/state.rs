use std::sync::Arc;

use crate::config::Config;
use crate::layout::TemplateConfig;
use crate::storage::ObjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only; each request builds its own document.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Pluggable document store. Default: S3Store.
    pub store: Arc<dyn ObjectStore>,
    /// Page template — coordinates, colors and fonts used by the layout engine.
    pub template: Arc<TemplateConfig>,
}
