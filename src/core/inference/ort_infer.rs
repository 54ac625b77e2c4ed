//! ONNX Runtime inference engine with a small pool of sessions.

use crate::core::errors::RecognizerError;
use ort::session::Session;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

#[path = "ort_infer_builders.rs"]
mod ort_infer_builders;
#[path = "ort_infer_config.rs"]
mod ort_infer_config;
#[path = "ort_infer_execution.rs"]
mod ort_infer_execution;
#[cfg(test)]
#[path = "ort_infer_tests.rs"]
mod ort_infer_tests;

/// [`InferenceEngine`](super::InferenceEngine) backed by ONNX Runtime sessions.
///
/// Calls are distributed round-robin over the session pool; each session is
/// guarded by its own mutex.
pub struct OrtInfer {
    pub(super) sessions: Vec<Mutex<Session>>,
    pub(super) next_idx: AtomicUsize,
    pub(super) output_names: Vec<String>,
    pub(super) model_source: String,
    pub(super) model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("sessions", &self.sessions.len())
            .field("output_names", &self.output_names)
            .field("model_source", &self.model_source)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Names of the model outputs, in session order.
    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    /// Where the model was loaded from.
    pub fn model_source(&self) -> &str {
        &self.model_source
    }

    /// Number of sessions in the pool.
    pub fn pool_size(&self) -> usize {
        self.sessions.len()
    }

    fn lock_error(&self, idx: usize) -> RecognizerError {
        RecognizerError::inference_error(
            &self.model_name,
            &format!(
                "Failed to acquire session lock for session {}/{}",
                idx,
                self.sessions.len()
            ),
            crate::core::errors::SimpleError::new("Session lock acquisition failed"),
        )
    }
}
