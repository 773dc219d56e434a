pub mod capability;
pub mod config;
pub mod error;
pub mod format;
pub mod models;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use capability::{EntityRecognizer, RecognizedEntity, SummaryRequest, Summarizer};
pub use config::{AnalysisLimits, DevicePreference, Settings, SummaryParams};
pub use error::{ConfigError, InferenceError, ModelLoadError};
pub use models::ModelSet;
