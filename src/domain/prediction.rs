//! Prediction result types.

use serde::{Deserialize, Serialize};

/// A single classification result with class ID, label, and confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The predicted class ID
    pub class_id: usize,
    /// The human-readable label for this class
    pub label: String,
    /// Confidence score for this classification (0.0 to 1.0)
    pub score: f32,
}

impl Classification {
    /// Creates a new classification.
    pub fn new(class_id: usize, label: String, score: f32) -> Self {
        Self {
            class_id,
            label,
            score,
        }
    }
}

/// The outcome of one recognition: the most probable label and its confidence.
///
/// The full probability distribution is kept so ranked alternatives can be
/// derived without running the model again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Index of the winning class
    pub class_id: usize,
    /// Label of the winning class
    pub label: String,
    /// Probability of the winning class (0.0 to 1.0)
    pub confidence: f32,
    /// Softmax distribution over all classes
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Confidence as a percentage.
    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }

    /// The winning class as a [`Classification`].
    pub fn best(&self) -> Classification {
        Classification::new(self.class_id, self.label.clone(), self.confidence)
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.1}%)", self.label, self.confidence_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Prediction {
        Prediction {
            class_id: 2,
            label: "C".to_string(),
            confidence: 0.8734,
            probabilities: vec![0.05, 0.0766, 0.8734],
        }
    }

    #[test]
    fn test_display_uses_one_decimal() {
        assert_eq!(sample().to_string(), "C (87.3%)");
    }

    #[test]
    fn test_best_classification() {
        let best = sample().best();
        assert_eq!(best, Classification::new(2, "C".to_string(), 0.8734));
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["label"], "C");
        assert_eq!(json["class_id"], 2);
    }
}
