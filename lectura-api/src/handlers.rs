use askama::Template;
use axum::Json;
use axum::extract::{Form, Multipart, State};
use axum::response::Html;
use lectura_document::slice::char_prefix;
use lectura_document::{DocumentReport, EntityReport, NormalizedText, SummaryReport, normalize};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, PageError};
use crate::state::AppState;
use crate::views::{DocumentView, EntityView, IndexPage};

struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        // Browsers send an empty filename when no file was chosen.
        let filename = match field.file_name() {
            Some("") => return Err(ApiError::MissingFile),
            name => name.unwrap_or("document.pdf").to_string(),
        };
        let bytes = field.bytes().await?.to_vec();
        return Ok(Upload { filename, bytes });
    }
    Err(ApiError::MissingFile)
}

/// Hidden fields posted back by the summary and entity buttons.
///
/// `text` holds only the prefix the analyzer reads; `chars` is the length of
/// the whole document.
#[derive(Debug, Deserialize)]
pub struct DocumentForm {
    pub text: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub pages: usize,
    #[serde(default)]
    pub chars: Option<usize>,
}

impl DocumentForm {
    fn into_view(self, state: &AppState) -> (DocumentView, NormalizedText) {
        // Re-normalizing is a no-op for text we produced, and restores the
        // invariant for anything a client edited on the way back.
        let text = normalize(&self.text);
        let char_count = self.chars.unwrap_or_else(|| text.char_count());
        let excerpt = state.analyzer.excerpt(&text);
        let view = DocumentView::new(
            self.filename,
            self.pages,
            char_count,
            excerpt,
            carried_text(state, &text),
        );
        (view, text)
    }
}

/// The part of the document the buttons send back.
fn carried_text(state: &AppState, text: &NormalizedText) -> String {
    char_prefix(text.as_str(), state.analyzer.limits().widest()).to_string()
}

pub async fn index() -> Result<Html<String>, PageError> {
    Ok(Html(IndexPage::empty().render()?))
}

pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, PageError> {
    let upload = read_upload(multipart).await?;
    tracing::info!(filename = %upload.filename, bytes = upload.bytes.len(), "PDF uploaded");

    // Extract and normalize; the models are not touched here.
    let (text, report) = state.analyzer.ingest(upload.bytes).await?;
    let view = DocumentView::new(
        upload.filename,
        report.page_count,
        report.char_count,
        report.excerpt,
        carried_text(&state, &text),
    );

    Ok(Html(IndexPage::with_document(view).render()?))
}

pub async fn summary(
    State(state): State<AppState>,
    Form(form): Form<DocumentForm>,
) -> Result<Html<String>, PageError> {
    let (view, text) = form.into_view(&state);
    let report = state.analyzer.summarize(&text).await?;
    tracing::info!(input_chars = report.input_chars, "summary generated");

    let mut page = IndexPage::with_document(view);
    page.summary = Some(report.summary);
    Ok(Html(page.render()?))
}

pub async fn entities(
    State(state): State<AppState>,
    Form(form): Form<DocumentForm>,
) -> Result<Html<String>, PageError> {
    let (view, text) = form.into_view(&state);
    let report = state.analyzer.recognize(&text).await?;
    tracing::info!(
        input_chars = report.input_chars,
        count = report.entities.len(),
        "entities extracted"
    );

    let mut page = IndexPage::with_document(view);
    page.entities = Some(report.entities.iter().map(EntityView::from).collect());
    Ok(Html(page.render()?))
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub filename: String,
    pub text: String,
    pub report: DocumentReport,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

pub async fn api_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    let (text, report) = state.analyzer.ingest(upload.bytes).await?;
    Ok(Json(ExtractResponse {
        filename: upload.filename,
        text: text.into_string(),
        report,
    }))
}

pub async fn api_summary(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<SummaryReport>, ApiError> {
    let text = normalize(&request.text);
    Ok(Json(state.analyzer.summarize(&text).await?))
}

pub async fn api_entities(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<EntityReport>, ApiError> {
    let text = normalize(&request.text);
    Ok(Json(state.analyzer.recognize(&text).await?))
}
