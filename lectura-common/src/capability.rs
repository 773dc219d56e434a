//! Inference capabilities consumed by the analysis pipeline.
//!
//! Both traits are synchronous: implementations are expected to block, and
//! async callers move them onto the blocking pool.

use serde::{Deserialize, Serialize};

use crate::config::SummaryParams;
use crate::error::InferenceError;

/// Input to a single summarization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub text: String,
    pub min_length: i64,
    pub max_length: i64,
    pub do_sample: bool,
}

impl SummaryRequest {
    pub fn new(text: impl Into<String>, params: SummaryParams) -> Self {
        Self {
            text: text.into(),
            min_length: params.min_length,
            max_length: params.max_length,
            do_sample: params.do_sample,
        }
    }

    pub fn params(&self) -> SummaryParams {
        SummaryParams {
            min_length: self.min_length,
            max_length: self.max_length,
            do_sample: self.do_sample,
        }
    }
}

/// One grouped entity span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    /// Surface text as it appears in the input.
    pub word: String,
    /// Category label with any `B-`/`I-` prefix already removed (`PER`, `LOC`, ...).
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f64,
}

pub trait Summarizer: Send + Sync {
    fn summarize(&self, request: &SummaryRequest) -> Result<String, InferenceError>;
}

pub trait EntityRecognizer: Send + Sync {
    /// Returns entities in the order they appear in `text`.
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, InferenceError>;
}
