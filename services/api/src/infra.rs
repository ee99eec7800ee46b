use metrics_exporter_prometheus::PrometheusHandle;
use property_scout::error::AppError;
use property_scout::search::{parse_listing_document, WebListing};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reads a saved web search document from disk.
pub(crate) fn load_listings(path: &Path) -> Result<Vec<WebListing>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_listing_document(&raw)?)
}
