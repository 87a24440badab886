use serde::Serialize;

/// Discrete sentiment classification of a headline
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Positive iff polarity > 0, Negative iff < 0, Neutral otherwise.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            SentimentLabel::Positive
        } else if polarity < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Polarity score and the label derived from it.
///
/// Both fields come from a single scoring call; the label is never stored
/// independently of the polarity it was derived from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SentimentResult {
    polarity: f64, // -1.0 to +1.0
    label: SentimentLabel,
}

impl SentimentResult {
    pub const NEUTRAL: SentimentResult = SentimentResult {
        polarity: 0.0,
        label: SentimentLabel::Neutral,
    };

    /// Build a result from a finite polarity, clamped into [-1.0, 1.0].
    pub(crate) fn from_polarity(polarity: f64) -> Self {
        debug_assert!(polarity.is_finite());
        let mut polarity = polarity.clamp(-1.0, 1.0);
        if polarity == 0.0 {
            // folds -0.0 into 0.0
            polarity = 0.0;
        }

        Self {
            polarity,
            label: SentimentLabel::from_polarity(polarity),
        }
    }

    pub fn polarity(&self) -> f64 {
        self.polarity
    }

    pub fn label(&self) -> SentimentLabel {
        self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_thresholds() {
        assert_eq!(SentimentLabel::from_polarity(0.01), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(-0.01), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_polarity(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn test_result_label_matches_polarity() {
        for polarity in [-1.0, -0.5, -1e-9, 0.0, 1e-9, 0.25, 1.0] {
            let result = SentimentResult::from_polarity(polarity);
            assert_eq!(result.label() == SentimentLabel::Positive, result.polarity() > 0.0);
            assert_eq!(result.label() == SentimentLabel::Negative, result.polarity() < 0.0);
            assert_eq!(result.label() == SentimentLabel::Neutral, result.polarity() == 0.0);
        }
    }

    #[test]
    fn test_result_clamps_out_of_range_polarity() {
        assert_eq!(SentimentResult::from_polarity(3.2).polarity(), 1.0);
        assert_eq!(SentimentResult::from_polarity(-7.0).polarity(), -1.0);
    }

    #[test]
    fn test_negative_zero_is_neutral_zero() {
        let result = SentimentResult::from_polarity(-0.0);
        assert!(result.polarity().is_sign_positive());
        assert_eq!(result, SentimentResult::NEUTRAL);
    }

    #[test]
    fn test_label_serializes_lowercase() {
        assert_eq!(serde_json::to_value(SentimentLabel::Positive).unwrap(), "positive");
        assert_eq!(serde_json::to_value(SentimentLabel::Neutral).unwrap(), "neutral");
        assert_eq!(serde_json::to_value(SentimentLabel::Negative).unwrap(), "negative");
    }

    #[test]
    fn test_serializes_lowercase_label() {
        let json = serde_json::to_value(SentimentResult::from_polarity(0.5)).unwrap();
        assert_eq!(json["label"], "positive");
        assert_eq!(json["polarity"], 0.5);
    }
}
