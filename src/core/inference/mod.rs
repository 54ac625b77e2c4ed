//! Inference engine abstraction and its ONNX Runtime implementation.
//!
//! The pipeline only depends on [`InferenceEngine`]: give it a named
//! `[1, 1, S, S]` float tensor, get back a map of named float outputs.
//! [`OrtInfer`] implements it on top of ONNX Runtime; tests substitute a
//! fake returning canned scores.

pub mod ort_infer;
pub mod source;

pub use ort_infer::OrtInfer;
pub use source::ModelSource;

use crate::core::errors::RecognizerResult;
use std::collections::HashMap;

/// A 4D float tensor laid out as (batch, channels, height, width).
pub type Tensor4D = ndarray::Array4<f32>;

/// Named output tensors flattened to row-major float vectors.
pub type NamedOutputs = HashMap<String, Vec<f32>>;

/// Capability to run a loaded model on one input tensor.
pub trait InferenceEngine: Send + Sync + std::fmt::Debug {
    /// Runs the model with `input` bound to `input_name`.
    fn run(&self, input_name: &str, input: &Tensor4D) -> RecognizerResult<NamedOutputs>;

    /// Human readable model name, used in logs and errors.
    fn model_name(&self) -> &str;
}
