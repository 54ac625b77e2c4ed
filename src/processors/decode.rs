//! Logit decoding: softmax, arg-max and ranked alternatives.

use crate::core::errors::{RecognizerError, RecognizerResult};
use crate::domain::{Classification, Prediction};

/// Converts logits to a probability distribution.
///
/// The maximum logit is subtracted before exponentiating, which leaves the
/// result unchanged but keeps large logits from overflowing. A `-inf` logit
/// gets probability 0; if every logit is `-inf` the result is uniform.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if max == f32::NEG_INFINITY {
        let uniform = 1.0 / scores.len() as f32;
        return vec![uniform; scores.len()];
    }
    let exps: Vec<f32> = scores.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index and value of the largest probability.
///
/// Scans once with a strict `>` so the first maximum wins. The running maximum
/// starts at 0, so an empty slice yields `(0, 0.0)`.
pub fn argmax(probabilities: &[f32]) -> (usize, f32) {
    let mut max_prob = 0.0f32;
    let mut max_index = 0usize;
    for (i, &p) in probabilities.iter().enumerate() {
        if p > max_prob {
            max_prob = p;
            max_index = i;
        }
    }
    (max_index, max_prob)
}

/// Turns raw model scores into a labeled [`Prediction`].
#[derive(Debug, Clone)]
pub struct ClassificationDecoder {
    labels: Vec<String>,
}

impl ClassificationDecoder {
    /// Creates a decoder for the given ordered labels.
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Creates a decoder with one label per character of `alphabet`.
    pub fn from_alphabet(alphabet: &str) -> Self {
        Self::new(alphabet.chars().map(|c| c.to_string()).collect())
    }

    /// Ordered class labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    /// Softmaxes `scores` and selects the most probable label.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the decoder has no labels, the score count
    /// differs from the label count, or a score is NaN or `+inf`.
    pub fn decode(&self, scores: &[f32]) -> RecognizerResult<Prediction> {
        if self.labels.is_empty() {
            return Err(RecognizerError::invalid_input(
                "decoder has no labels to select from",
            ));
        }
        if scores.len() != self.labels.len() {
            return Err(RecognizerError::invalid_input(format!(
                "expected {} scores (one per label), got {}",
                self.labels.len(),
                scores.len()
            )));
        }
        if let Some((i, x)) = scores
            .iter()
            .enumerate()
            .find(|(_, x)| x.is_nan() || **x == f32::INFINITY)
        {
            return Err(RecognizerError::invalid_input(format!(
                "score {} is not a usable logit: {}",
                i, x
            )));
        }

        let probabilities = softmax(scores);
        let (class_id, confidence) = argmax(&probabilities);
        let label = self.labels[class_id].clone();

        Ok(Prediction {
            class_id,
            label,
            confidence,
            probabilities,
        })
    }

    /// The `k` most probable classes of `prediction`, best first.
    ///
    /// Equal probabilities keep class order.
    pub fn top_k(&self, prediction: &Prediction, k: usize) -> Vec<Classification> {
        let mut indexed: Vec<(usize, f32)> =
            prediction.probabilities.iter().copied().enumerate().collect();
        // Stable sort keeps the lower class index first on ties
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        indexed
            .into_iter()
            .take(k)
            .map(|(id, score)| {
                let label = self
                    .labels
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| format!("class_{}", id));
                Classification::new(id, label, score)
            })
            .collect()
    }
}
