//! The preprocess-infer-decode pipeline.

pub mod recognizer;

pub use recognizer::{LetterRecognizer, LetterRecognizerBuilder};
