use askama::Template;
use lectura_common::format::confidence_percent;
use lectura_document::EntityRow;

pub const TITLE: &str = "PDF Reading Assistant";
pub const DESCRIPTION: &str =
    "Upload a PDF to get a summary and its key entities (people, places, dates, etc.).";

/// What the page knows about the current upload. Round-trips through hidden form
/// fields so each button press is a fresh, stateless request. `text` is the
/// leading part of the document, not all of it.
#[derive(Debug, Clone)]
pub struct DocumentView {
    pub filename: String,
    pub page_count: usize,
    pub char_count: usize,
    pub excerpt: String,
    pub text: String,
}

impl DocumentView {
    pub fn new(
        filename: String,
        page_count: usize,
        char_count: usize,
        excerpt: String,
        text: String,
    ) -> Self {
        Self {
            filename,
            page_count,
            char_count,
            excerpt,
            text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EntityView {
    pub word: String,
    pub label: String,
    pub percent: String,
}

impl From<&EntityRow> for EntityView {
    fn from(row: &EntityRow) -> Self {
        Self {
            word: row.entity.word.clone(),
            label: row.entity.label.clone(),
            percent: confidence_percent(row.entity.score),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub title: &'static str,
    pub description: &'static str,
    pub document: Option<DocumentView>,
    pub summary: Option<String>,
    pub entities: Option<Vec<EntityView>>,
}

impl IndexPage {
    pub fn empty() -> Self {
        Self {
            title: TITLE,
            description: DESCRIPTION,
            document: None,
            summary: None,
            entities: None,
        }
    }

    pub fn with_document(document: DocumentView) -> Self {
        Self {
            document: Some(document),
            ..Self::empty()
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub message: String,
}
