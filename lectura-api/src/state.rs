use std::sync::Arc;

use lectura_common::{ModelSet, Settings};
use lectura_document::Analyzer;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(settings: &Settings, models: Arc<ModelSet>) -> Self {
        Self {
            analyzer: Analyzer::new(models, settings.limits, settings.summary),
            max_upload_bytes: settings.max_upload_bytes,
        }
    }
}
