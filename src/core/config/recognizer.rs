//! Recognizer configuration.
//!
//! The defaults describe the 26-letter EMNIST-style model: a 28x28 single
//! channel input normalized with mean 0.5 and std 0.5, and a 26-way logit
//! output named `output`.

use super::onnx::OrtSessionConfig;
use crate::core::errors::{RecognizerError, RecognizerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Default side length of the square model input.
pub const DEFAULT_INPUT_SIZE: u32 = 28;

/// Default class alphabet, one symbol per model output.
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Configuration for [`LetterRecognizer`](crate::pipeline::LetterRecognizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Side length S of the S x S model input
    pub input_size: u32,
    /// Ordered class symbols; index i labels output score i
    pub alphabet: String,
    /// Name of the model input tensor
    pub input_name: String,
    /// Name of the model output tensor holding the logits
    pub output_name: String,
    /// Scaling factor applied before normalization
    pub normalize_scale: f32,
    /// Mean subtracted after scaling
    pub normalize_mean: f32,
    /// Standard deviation divided out after mean subtraction
    pub normalize_std: f32,
    /// Number of ONNX Runtime sessions to round-robin over
    pub session_pool_size: usize,
    /// ONNX Runtime session options
    pub ort_session: Option<OrtSessionConfig>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            alphabet: DEFAULT_ALPHABET.to_string(),
            input_name: "input".to_string(),
            output_name: "output".to_string(),
            normalize_scale: 1.0 / 255.0,
            normalize_mean: 0.5,
            normalize_std: 0.5,
            session_pool_size: 1,
            ort_session: None,
        }
    }
}

impl RecognizerConfig {
    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> RecognizerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text).map_err(|e| {
            RecognizerError::config_error(format!("{}: {}", path.display(), e))
        })
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(text: &str) -> RecognizerResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| RecognizerError::config_error(format!("invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Number of pixels expected per prediction (S x S).
    pub fn pixel_count(&self) -> usize {
        (self.input_size as usize) * (self.input_size as usize)
    }

    /// Class symbols in model output order.
    pub fn labels(&self) -> Vec<String> {
        self.alphabet.chars().map(|c| c.to_string()).collect()
    }

    /// Number of classes C.
    pub fn num_classes(&self) -> usize {
        self.alphabet.chars().count()
    }

    /// Checks the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> RecognizerResult<()> {
        if self.input_size == 0 {
            return Err(RecognizerError::config_error(
                "input_size must be greater than 0",
            ));
        }
        if self.alphabet.is_empty() {
            return Err(RecognizerError::config_error("alphabet must not be empty"));
        }
        let mut seen = HashSet::new();
        for symbol in self.alphabet.chars() {
            if !seen.insert(symbol) {
                return Err(RecognizerError::config_error(format!(
                    "alphabet contains duplicate symbol '{}'",
                    symbol
                )));
            }
        }
        if self.input_name.trim().is_empty() {
            return Err(RecognizerError::config_error("input_name must not be empty"));
        }
        if self.output_name.trim().is_empty() {
            return Err(RecognizerError::config_error(
                "output_name must not be empty",
            ));
        }
        if !(self.normalize_scale.is_finite() && self.normalize_scale > 0.0) {
            return Err(RecognizerError::config_error(format!(
                "normalize_scale must be greater than 0, got {}",
                self.normalize_scale
            )));
        }
        if !self.normalize_mean.is_finite() {
            return Err(RecognizerError::config_error(format!(
                "normalize_mean must be finite, got {}",
                self.normalize_mean
            )));
        }
        if !(self.normalize_std.is_finite() && self.normalize_std > 0.0) {
            return Err(RecognizerError::config_error(format!(
                "normalize_std must be greater than 0, got {}",
                self.normalize_std
            )));
        }
        if self.session_pool_size == 0 {
            return Err(RecognizerError::config_error(
                "session_pool_size must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RecognizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pixel_count(), 784);
        assert_eq!(config.num_classes(), 26);
        assert_eq!(config.labels()[0], "A");
        assert_eq!(config.labels()[25], "Z");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cases = [
            RecognizerConfig {
                input_size: 0,
                ..Default::default()
            },
            RecognizerConfig {
                alphabet: String::new(),
                ..Default::default()
            },
            RecognizerConfig {
                alphabet: "ABCA".to_string(),
                ..Default::default()
            },
            RecognizerConfig {
                input_name: " ".to_string(),
                ..Default::default()
            },
            RecognizerConfig {
                output_name: String::new(),
                ..Default::default()
            },
            RecognizerConfig {
                normalize_std: 0.0,
                ..Default::default()
            },
            RecognizerConfig {
                normalize_scale: -1.0,
                ..Default::default()
            },
            RecognizerConfig {
                normalize_mean: f32::NAN,
                ..Default::default()
            },
            RecognizerConfig {
                session_pool_size: 0,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(RecognizerError::ConfigError { .. })),
                "expected config error for {:?}",
                config
            );
        }
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = RecognizerConfig::from_json_str(
            r#"{ "alphabet": "0123456789", "output_name": "logits" }"#,
        )
        .unwrap();
        assert_eq!(config.num_classes(), 10);
        assert_eq!(config.output_name, "logits");
        assert_eq!(config.input_size, DEFAULT_INPUT_SIZE);
        assert_eq!(config.input_name, "input");
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(RecognizerConfig::from_json_str("not json").is_err());
        assert!(RecognizerConfig::from_json_str(r#"{ "input_size": 0 }"#).is_err());
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let result = RecognizerConfig::from_json_file("/nonexistent/recognizer.json");
        assert!(matches!(result, Err(RecognizerError::Io(_))));
    }
}
