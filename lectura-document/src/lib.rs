pub mod analysis;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod slice;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use analysis::Analyzer;
pub use error::ExtractionError;
pub use extract::{extract_text, extract_text_from_path};
pub use model::{DocumentReport, EntityReport, EntityRow, ExtractedText, NormalizedText, SummaryReport};
pub use normalize::normalize;
