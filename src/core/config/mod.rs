//! Configuration types for the recognizer and its ONNX Runtime sessions.

pub mod onnx;
pub mod recognizer;

pub use onnx::{OrtExecutionProvider, OrtGraphOptimizationLevel, OrtSessionConfig};
pub use recognizer::{DEFAULT_ALPHABET, DEFAULT_INPUT_SIZE, RecognizerConfig};
