//! In-memory capabilities for tests in this and downstream crates.

use std::sync::{Arc, Mutex};

use crate::capability::{EntityRecognizer, RecognizedEntity, SummaryRequest, Summarizer};
use crate::error::InferenceError;
use crate::models::ModelSet;

/// Records every request and answers with a fixed summary.
#[derive(Default)]
pub struct RecordingSummarizer {
    pub requests: Mutex<Vec<SummaryRequest>>,
    pub reply: Option<String>,
}

impl RecordingSummarizer {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: Some(reply.into()),
        }
    }

    pub fn recorded(&self) -> Vec<SummaryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Summarizer for RecordingSummarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<String, InferenceError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(InferenceError::EmptyOutput),
        }
    }
}

/// Tags a handful of well-known names, in input order.
#[derive(Default)]
pub struct KeywordRecognizer {
    pub inputs: Mutex<Vec<String>>,
}

const KNOWN: &[(&str, &str, f64)] = &[
    ("Barack Obama", "PER", 0.9987),
    ("Paris", "LOC", 0.9962),
    ("Madrid", "LOC", 0.9911),
    ("2011", "DATE", 0.8149),
];

impl KeywordRecognizer {
    pub fn recorded(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

impl EntityRecognizer for KeywordRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, InferenceError> {
        self.inputs.lock().unwrap().push(text.to_string());

        let mut found: Vec<(usize, RecognizedEntity)> = KNOWN
            .iter()
            .filter_map(|(word, label, score)| {
                text.find(word).map(|at| {
                    (
                        at,
                        RecognizedEntity {
                            word: word.to_string(),
                            label: label.to_string(),
                            score: *score,
                        },
                    )
                })
            })
            .collect();
        found.sort_by_key(|(at, _)| *at);
        Ok(found.into_iter().map(|(_, entity)| entity).collect())
    }
}

/// Always fails, for exercising error paths.
pub struct FailingCapability;

impl Summarizer for FailingCapability {
    fn summarize(&self, _request: &SummaryRequest) -> Result<String, InferenceError> {
        Err(InferenceError::Backend("summarizer offline".into()))
    }
}

impl EntityRecognizer for FailingCapability {
    fn recognize(&self, _text: &str) -> Result<Vec<RecognizedEntity>, InferenceError> {
        Err(InferenceError::Backend("recognizer offline".into()))
    }
}

pub struct MockModels {
    pub summarizer: Arc<RecordingSummarizer>,
    pub recognizer: Arc<KeywordRecognizer>,
    pub set: ModelSet,
}

pub fn mock_models(summary: &str) -> MockModels {
    let summarizer = Arc::new(RecordingSummarizer::replying(summary));
    let recognizer = Arc::new(KeywordRecognizer::default());
    let set = ModelSet::new(summarizer.clone(), recognizer.clone());
    MockModels {
        summarizer,
        recognizer,
        set,
    }
}

pub fn failing_models() -> ModelSet {
    ModelSet::new(Arc::new(FailingCapability), Arc::new(FailingCapability))
}
