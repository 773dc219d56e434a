use lectura_common::RecognizedEntity;
use serde::{Deserialize, Serialize};

/// Text pulled from a PDF, one `\n`-terminated segment per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub raw: String,
    pub page_count: usize,
}

/// Whitespace-collapsed text. Only [`crate::normalize`] builds one, so it never
/// holds two adjacent whitespace characters or leading/trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText(pub(crate) String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub page_count: usize,
    pub char_count: usize,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Characters of normalized text handed to the model.
    pub input_chars: usize,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRow {
    #[serde(flatten)]
    pub entity: RecognizedEntity,
    /// Display form, e.g. `• Paris — LOC (confidence: 99.6%)`.
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityReport {
    pub input_chars: usize,
    pub entities: Vec<EntityRow>,
}
