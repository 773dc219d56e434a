use std::sync::LazyLock;

use regex::Regex;

use crate::model::NormalizedText;

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapses every whitespace run (newlines included) into one space and trims the ends.
pub fn normalize(text: &str) -> NormalizedText {
    let joined = NEWLINE_RUNS.replace_all(text, " ");
    let collapsed = WHITESPACE_RUNS.replace_all(&joined, " ");
    NormalizedText(collapsed.trim().to_string())
}
