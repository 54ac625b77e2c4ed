use super::*;
use crate::core::config::OrtSessionConfig;
use crate::core::errors::RecognizerResult;
use crate::core::inference::ModelSource;
use ort::logging::LogLevel;
use tracing::{debug, info};

impl OrtInfer {
    /// Loads a model with default ONNX Runtime settings and a single session.
    pub fn new(source: &ModelSource) -> RecognizerResult<Self> {
        Self::from_config(source, 1, None)
    }

    /// Loads a model, applying the session configuration to every session of
    /// a pool of `pool_size` sessions.
    pub fn from_config(
        source: &ModelSource,
        pool_size: usize,
        ort_config: Option<&OrtSessionConfig>,
    ) -> RecognizerResult<Self> {
        let description = source.describe();
        let bytes = source.read()?;
        let pool_size = pool_size.max(1);

        debug!(
            model = %description,
            bytes = bytes.len(),
            pool_size,
            "creating ONNX Runtime sessions"
        );

        let mut sessions = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let builder = Session::builder()?;
            let builder = if let Some(cfg) = ort_config {
                Self::apply_ort_config(builder, cfg)?
            } else {
                // Keep ORT quiet unless something is actually wrong
                builder.with_log_level(LogLevel::Error)?
            };
            let session = builder.commit_from_memory(&bytes).map_err(|e| {
                RecognizerError::model_load_error(
                    &description,
                    "failed to create ONNX session",
                    Some("verify the file is a valid ONNX model for the selected execution providers"),
                    Some(e),
                )
            })?;
            sessions.push(Mutex::new(session));
        }

        let output_names: Vec<String> = sessions
            .first()
            .and_then(|s| s.lock().ok())
            .map(|s| s.outputs.iter().map(|o| o.name.clone()).collect())
            .unwrap_or_default();

        if output_names.is_empty() {
            return Err(RecognizerError::model_load_error(
                &description,
                "model declares no outputs",
                Some("the model may be invalid or corrupted"),
                None::<ort::Error>,
            ));
        }

        let model_name = source.model_name();
        info!(
            model = %model_name,
            outputs = ?output_names,
            sessions = sessions.len(),
            "model loaded"
        );

        Ok(OrtInfer {
            sessions,
            next_idx: AtomicUsize::new(0),
            output_names,
            model_source: description,
            model_name,
        })
    }
}
