use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to load PDF: {0}")]
    Load(String),

    #[error("failed to extract text from page {page}: {reason}")]
    Page { page: u32, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
