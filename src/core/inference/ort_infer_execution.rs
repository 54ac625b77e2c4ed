use super::*;
use crate::core::errors::RecognizerResult;
use crate::core::inference::{InferenceEngine, NamedOutputs, Tensor4D};
use ort::value::TensorRef;
use std::sync::atomic::Ordering;
use tracing::debug;

impl InferenceEngine for OrtInfer {
    fn run(&self, input_name: &str, x: &Tensor4D) -> RecognizerResult<NamedOutputs> {
        let input_shape = x.shape().to_vec();

        let input_tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
            RecognizerError::inference_error(
                &self.model_name,
                &format!(
                    "Failed to convert input tensor with shape {:?}",
                    input_shape
                ),
                e,
            )
        })?;

        let inputs = ort::inputs![input_name => input_tensor];

        let idx = self.next_idx.fetch_add(1, Ordering::Relaxed) % self.sessions.len();
        let mut session_guard = self.sessions[idx]
            .lock()
            .map_err(|_| self.lock_error(idx))?;

        let outputs = session_guard.run(inputs).map_err(|e| {
            RecognizerError::inference_error(
                &self.model_name,
                &format!(
                    "ONNX Runtime inference failed with input '{}' of shape {:?}",
                    input_name, input_shape
                ),
                e,
            )
        })?;

        let mut named = NamedOutputs::with_capacity(self.output_names.len());
        for name in &self.output_names {
            match outputs[name.as_str()].try_extract_tensor::<f32>() {
                Ok((shape, data)) => {
                    debug!(output = %name, shape = ?shape, "extracted output tensor");
                    named.insert(name.clone(), data.to_vec());
                }
                Err(e) => {
                    // Non-float outputs are not consumed by the pipeline
                    debug!(output = %name, error = %e, "skipping non-f32 output");
                }
            }
        }

        Ok(named)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
