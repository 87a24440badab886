use std::sync::Arc;

use thiserror::Error;

use crate::models::SentimentResult;
use crate::services::lexicon::LexiconScorer;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassificationError {
    #[error("scorer failed: {0}")]
    Scorer(String),

    #[error("scorer returned a non-finite polarity")]
    NonFinite,
}

/// Pure polarity scoring capability.
///
/// Must be deterministic for a given text. Values outside [-1.0, 1.0] are
/// clamped by the classifier.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<f64, ClassificationError>;
}

/// Maps text to a polarity and its three-valued label
#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(LexiconScorer::new()))
    }
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    /// Classify a headline. Blank text is neutral without consulting the scorer.
    pub fn classify(&self, text: &str) -> Result<SentimentResult, ClassificationError> {
        if text.trim().is_empty() {
            return Ok(SentimentResult::NEUTRAL);
        }

        let polarity = self.scorer.score(text)?;
        if !polarity.is_finite() {
            return Err(ClassificationError::NonFinite);
        }

        Ok(SentimentResult::from_polarity(polarity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentLabel;

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn score(&self, _text: &str) -> Result<f64, ClassificationError> {
            Ok(self.0)
        }
    }

    struct FailingScorer;

    impl PolarityScorer for FailingScorer {
        fn score(&self, _text: &str) -> Result<f64, ClassificationError> {
            Err(ClassificationError::Scorer("unsupported input".to_string()))
        }
    }

    #[test]
    fn test_empty_text_is_neutral_zero() {
        let classifier = SentimentClassifier::default();
        let result = classifier.classify("").unwrap();
        assert_eq!(result.polarity(), 0.0);
        assert_eq!(result.label(), SentimentLabel::Neutral);
    }

    #[test]
    fn test_blank_text_skips_scorer() {
        let classifier = SentimentClassifier::new(Arc::new(FailingScorer));
        assert_eq!(classifier.classify("   ").unwrap(), SentimentResult::NEUTRAL);
    }

    #[test]
    fn test_earnings_beat_is_positive() {
        let classifier = SentimentClassifier::default();
        let result = classifier
            .classify("Company beats earnings expectations")
            .unwrap();
        assert!(result.polarity() > 0.0);
        assert_eq!(result.label(), SentimentLabel::Positive);
    }

    #[test]
    fn test_missed_targets_is_negative() {
        let classifier = SentimentClassifier::default();
        let result = classifier
            .classify("Company misses targets, stock plunges")
            .unwrap();
        assert!(result.polarity() < 0.0);
        assert_eq!(result.label(), SentimentLabel::Negative);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = SentimentClassifier::default();
        for text in [
            "Shares tumble after weak guidance",
            "Apple unveils new iPhone lineup",
            "Analysts upgrade Microsoft on strong cloud growth",
        ] {
            assert_eq!(classifier.classify(text), classifier.classify(text));
        }
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let classifier = SentimentClassifier::new(Arc::new(FixedScorer(4.0)));
        let result = classifier.classify("anything").unwrap();
        assert_eq!(result.polarity(), 1.0);
        assert_eq!(result.label(), SentimentLabel::Positive);
    }

    #[test]
    fn test_non_finite_score_is_error() {
        let classifier = SentimentClassifier::new(Arc::new(FixedScorer(f64::NAN)));
        assert_eq!(
            classifier.classify("anything"),
            Err(ClassificationError::NonFinite)
        );
    }

    #[test]
    fn test_scorer_error_propagates() {
        let classifier = SentimentClassifier::new(Arc::new(FailingScorer));
        assert!(matches!(
            classifier.classify("anything"),
            Err(ClassificationError::Scorer(_))
        ));
    }
}
