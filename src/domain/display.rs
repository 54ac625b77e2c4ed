//! Presentation of predictions.
//!
//! A [`PredictionSink`] receives finished predictions and can be reset when
//! the drawing surface is cleared.

use super::prediction::Prediction;

/// Placeholder letter shown when nothing has been recognized.
pub const EMPTY_LETTER: &str = "?";

/// Confidence text shown when nothing has been recognized.
pub const EMPTY_CONFIDENCE: &str = "Confidence: 0%";

/// Consumer of prediction results.
pub trait PredictionSink {
    /// Renders a prediction.
    fn show(&mut self, prediction: &Prediction);

    /// Clears any displayed prediction.
    fn reset(&mut self);
}

/// Text readout holding a letter and a confidence line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDisplay {
    letter: String,
    confidence: String,
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self {
            letter: EMPTY_LETTER.to_string(),
            confidence: EMPTY_CONFIDENCE.to_string(),
        }
    }
}

impl TextDisplay {
    /// Creates an empty display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed letter.
    pub fn letter(&self) -> &str {
        &self.letter
    }

    /// Currently displayed confidence line.
    pub fn confidence(&self) -> &str {
        &self.confidence
    }
}

impl PredictionSink for TextDisplay {
    fn show(&mut self, prediction: &Prediction) {
        self.letter = prediction.label.clone();
        self.confidence = format!("Confidence: {:.1}%", prediction.confidence_percent());
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for TextDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  {}", self.letter, self.confidence)
    }
}
