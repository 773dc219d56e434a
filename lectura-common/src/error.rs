use rust_bert::RustBertError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("summary bounds are inverted or negative (min {min}, max {max})")]
    InvalidSummaryBounds { min: i64, max: i64 },
}

/// Failure while constructing the inference capabilities at startup.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to load summarization model: {0}")]
    Summarizer(#[source] RustBertError),

    #[error("failed to load entity recognition model: {0}")]
    Recognizer(#[source] RustBertError),

    #[error("model loading task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Failure of a single summarization or recognition call.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model inference failed: {0}")]
    Model(#[from] RustBertError),

    #[error("summarization produced no output")]
    EmptyOutput,

    #[error("requested {requested} but the loaded model was configured for {loaded}")]
    UnsupportedParameters { requested: String, loaded: String },

    #[error("model is unavailable after a previous call panicked")]
    Poisoned,

    #[error("inference task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Backend(String),
}
