use crate::capability::RecognizedEntity;

/// Confidence as a percentage rounded to one decimal place, e.g. `0.98761` -> `"98.8"`.
pub fn confidence_percent(score: f64) -> String {
    format!("{:.1}", score * 100.0)
}

/// `• Paris — LOC (confidence: 99.7%)`
pub fn entity_line(entity: &RecognizedEntity) -> String {
    format!(
        "• {} — {} (confidence: {}%)",
        entity.word,
        entity.label,
        confidence_percent(entity.score)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(word: &str, label: &str, score: f64) -> RecognizedEntity {
        RecognizedEntity {
            word: word.to_string(),
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn percent_is_rounded_to_one_decimal() {
        assert_eq!(confidence_percent(0.98761), "98.8");
        assert_eq!(confidence_percent(0.5), "50.0");
        assert_eq!(confidence_percent(1.0), "100.0");
        assert_eq!(confidence_percent(0.0), "0.0");
    }

    #[test]
    fn line_layout() {
        assert_eq!(
            entity_line(&entity("Barack Obama", "PER", 0.9991)),
            "• Barack Obama — PER (confidence: 99.9%)"
        );
    }
}
