//! Automated classifier capability
//!
//! The coordinator treats the model as a black box: one `predict` call per
//! classify request, no retries, no fallback. [`KeywordSentimentModel`] is
//! the bundled deterministic implementation.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::state::Label;

/// Error type for model predictions
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    #[error("Model returned confidence outside [0, 1]: {0}")]
    InvalidConfidence(f32),
}

/// Result type for model predictions
pub type ModelResult<T> = Result<T, ModelError>;

/// A model's answer for one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    /// In [0, 1]
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: Label, confidence: f32) -> Self {
        Self { label, confidence }
    }

    /// Reject confidences outside [0, 1] (including NaN)
    pub fn validate(self) -> ModelResult<Self> {
        if (0.0..=1.0).contains(&self.confidence) {
            Ok(self)
        } else {
            Err(ModelError::InvalidConfidence(self.confidence))
        }
    }
}

/// Text classifier invoked once per classify request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn predict(&self, text: &str) -> ModelResult<Prediction>;
}

const POSITIVE_WORDS: &[&str] = &["good", "great", "excellent", "love", "amazing"];
const NEGATIVE_WORDS: &[&str] = &["bad", "terrible", "awful", "hate", "poor"];

/// Deterministic keyword-count sentiment model
///
/// Scores distinct positive minus distinct negative keyword hits. Two or more
/// net hits give a confident answer; a single net hit a weak one.
#[derive(Debug, Clone)]
pub struct KeywordSentimentModel {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
}

impl KeywordSentimentModel {
    pub const STRONG_CONFIDENCE: f32 = 0.95;
    pub const WEAK_CONFIDENCE: f32 = 0.6;
    pub const NEUTRAL_CONFIDENCE: f32 = 0.55;

    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
        }
    }

    fn score(&self, text: &str) -> i64 {
        let tokens: HashSet<String> = text
            .split_whitespace()
            .map(|token| {
                token
                    .trim_matches(|c| matches!(c, '.' | ',' | '!' | '?'))
                    .to_lowercase()
            })
            .collect();

        let positive = tokens
            .iter()
            .filter(|t| self.positive.contains(t.as_str()))
            .count() as i64;
        let negative = tokens
            .iter()
            .filter(|t| self.negative.contains(t.as_str()))
            .count() as i64;

        positive - negative
    }

    /// Synchronous prediction; never fails
    pub fn classify(&self, text: &str) -> Prediction {
        match self.score(text) {
            s if s >= 2 => Prediction::new(Label::Positive, Self::STRONG_CONFIDENCE),
            s if s <= -2 => Prediction::new(Label::Negative, Self::STRONG_CONFIDENCE),
            s if s > 0 => Prediction::new(Label::Positive, Self::WEAK_CONFIDENCE),
            s if s < 0 => Prediction::new(Label::Negative, Self::WEAK_CONFIDENCE),
            _ => Prediction::new(Label::Neutral, Self::NEUTRAL_CONFIDENCE),
        }
    }
}

impl Default for KeywordSentimentModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Classifier for KeywordSentimentModel {
    async fn predict(&self, text: &str) -> ModelResult<Prediction> {
        Ok(self.classify(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_positive() {
        let model = KeywordSentimentModel::new();
        let p = model.classify("good excellent amazing");
        assert_eq!(p.label, Label::Positive);
        assert!(p.confidence >= 0.9);
    }

    #[test]
    fn test_strong_negative_with_punctuation() {
        let model = KeywordSentimentModel::new();
        let p = model.classify("Terrible, AWFUL service!");
        assert_eq!(p, Prediction::new(Label::Negative, 0.95));
    }

    #[test]
    fn test_weak_and_neutral() {
        let model = KeywordSentimentModel::new();
        assert_eq!(
            model.classify("pretty good"),
            Prediction::new(Label::Positive, 0.6)
        );
        assert_eq!(
            model.classify("poor choice"),
            Prediction::new(Label::Negative, 0.6)
        );
        assert_eq!(
            model.classify("okay"),
            Prediction::new(Label::Neutral, 0.55)
        );
        // Mixed signals cancel out
        assert_eq!(model.classify("good but bad").label, Label::Neutral);
    }

    #[test]
    fn test_repeated_words_count_once() {
        let model = KeywordSentimentModel::new();
        let p = model.classify("good good good");
        assert_eq!(p, Prediction::new(Label::Positive, 0.6));
    }

    #[test]
    fn test_prediction_validate() {
        assert!(Prediction::new(Label::Neutral, 1.0).validate().is_ok());
        assert!(Prediction::new(Label::Neutral, 0.0).validate().is_ok());
        assert_eq!(
            Prediction::new(Label::Neutral, 1.2).validate(),
            Err(ModelError::InvalidConfidence(1.2))
        );
        assert!(Prediction::new(Label::Neutral, f32::NAN).validate().is_err());
    }

    #[tokio::test]
    async fn test_predict_is_deterministic() {
        let model = KeywordSentimentModel::new();
        let a = model.predict("great love").await.unwrap();
        let b = model.predict("great love").await.unwrap();
        assert_eq!(a, b);
    }
}
