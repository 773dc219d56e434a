use std::path::PathBuf;
use std::sync::Arc;

use lectura_common::format::entity_line;
use lectura_common::{AnalysisLimits, InferenceError, ModelSet, SummaryParams, SummaryRequest};
use log::{debug, info};

use crate::error::ExtractionError;
use crate::extract::{extract_text, extract_text_from_path};
use crate::model::{DocumentReport, ExtractedText, EntityReport, EntityRow, NormalizedText, SummaryReport};
use crate::normalize::normalize;
use crate::slice::{char_prefix, excerpt};

/// Runs the upload → normalize → summarize/recognize flow against a shared [`ModelSet`].
///
/// Holds no per-document state: every call starts again from the normalized text
/// it is given, and nothing is cached between calls.
#[derive(Clone)]
pub struct Analyzer {
    models: Arc<ModelSet>,
    limits: AnalysisLimits,
    summary: SummaryParams,
}

impl Analyzer {
    pub fn new(models: Arc<ModelSet>, limits: AnalysisLimits, summary: SummaryParams) -> Self {
        Self {
            models,
            limits,
            summary,
        }
    }

    pub fn limits(&self) -> AnalysisLimits {
        self.limits
    }

    /// Extracts and normalizes an uploaded PDF on the blocking pool.
    pub async fn ingest(
        &self,
        bytes: Vec<u8>,
    ) -> Result<(NormalizedText, DocumentReport), ExtractionError> {
        debug!("Ingesting {} bytes", bytes.len());
        self.ingest_with(move || extract_text(&bytes)).await
    }

    /// Same as [`Analyzer::ingest`], reading the PDF from disk.
    pub async fn ingest_path(
        &self,
        path: impl Into<PathBuf>,
    ) -> Result<(NormalizedText, DocumentReport), ExtractionError> {
        let path = path.into();
        debug!("Ingesting {}", path.display());
        self.ingest_with(move || extract_text_from_path(&path)).await
    }

    async fn ingest_with<F>(
        &self,
        extract: F,
    ) -> Result<(NormalizedText, DocumentReport), ExtractionError>
    where
        F: FnOnce() -> Result<ExtractedText, ExtractionError> + Send + 'static,
    {
        let (extracted, text) = tokio::task::spawn_blocking(move || {
            extract().map(|extracted| {
                let text = normalize(&extracted.raw);
                (extracted, text)
            })
        })
        .await??;

        info!(
            "Extracted {} characters from {} page(s)",
            text.char_count(),
            extracted.page_count
        );

        let report = self.report(&text, extracted.page_count);
        Ok((text, report))
    }

    pub fn report(&self, text: &NormalizedText, page_count: usize) -> DocumentReport {
        DocumentReport {
            page_count,
            char_count: text.char_count(),
            excerpt: self.excerpt(text),
        }
    }

    pub fn excerpt(&self, text: &NormalizedText) -> String {
        excerpt(text.as_str(), self.limits.excerpt_chars)
    }

    pub async fn summarize(&self, text: &NormalizedText) -> Result<SummaryReport, InferenceError> {
        let input = char_prefix(text.as_str(), self.limits.summary_input_chars).to_string();
        let input_chars = input.chars().count();
        let request = SummaryRequest::new(input, self.summary);
        let summarizer = Arc::clone(&self.models.summarizer);

        info!("Summarizing {input_chars} characters");
        let summary =
            tokio::task::spawn_blocking(move || summarizer.summarize(&request)).await??;

        Ok(SummaryReport {
            input_chars,
            summary,
        })
    }

    pub async fn recognize(&self, text: &NormalizedText) -> Result<EntityReport, InferenceError> {
        let input = char_prefix(text.as_str(), self.limits.entity_input_chars).to_string();
        let input_chars = input.chars().count();
        let recognizer = Arc::clone(&self.models.recognizer);

        info!("Recognizing entities in {input_chars} characters");
        let entities = tokio::task::spawn_blocking(move || recognizer.recognize(&input)).await??;

        Ok(EntityReport {
            input_chars,
            entities: entities
                .into_iter()
                .map(|entity| EntityRow {
                    line: entity_line(&entity),
                    entity,
                })
                .collect(),
        })
    }
}
