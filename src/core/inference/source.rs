//! Where a model artifact comes from.

use crate::core::errors::{RecognizerError, RecognizerResult};
use std::path::{Path, PathBuf};

/// A binary model artifact, either on disk or already in memory.
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// Model file on disk.
    File(PathBuf),
    /// Model bytes fetched by the caller.
    Bytes {
        /// Name used in logs and errors
        name: String,
        /// Raw ONNX bytes
        data: Vec<u8>,
    },
}

impl ModelSource {
    /// Model source backed by a file.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// Model source backed by an in-memory buffer.
    pub fn bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Bytes {
            name: name.into(),
            data,
        }
    }

    /// Path-like description of the source.
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Bytes { name, .. } => format!("<memory:{}>", name),
        }
    }

    /// Model name derived from the file stem or the buffer name.
    pub fn model_name(&self) -> String {
        match self {
            Self::File(path) => path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown_model")
                .to_string(),
            Self::Bytes { name, .. } => name.clone(),
        }
    }

    /// Reads the full artifact, failing with `ModelLoad` when it cannot be obtained.
    pub fn read(&self) -> RecognizerResult<Vec<u8>> {
        match self {
            Self::File(path) => {
                if !path.is_file() {
                    return Err(RecognizerError::model_load_error(
                        path,
                        "model file not found",
                        Some("verify the model path"),
                        None::<std::io::Error>,
                    ));
                }
                std::fs::read(path).map_err(|e| {
                    RecognizerError::model_load_error(
                        path,
                        "failed to read model file",
                        Some("verify the model file is readable"),
                        Some(e),
                    )
                })
            }
            Self::Bytes { data, .. } => {
                if data.is_empty() {
                    return Err(RecognizerError::model_load_error(
                        self.describe(),
                        "model buffer is empty",
                        None,
                        None::<std::io::Error>,
                    ));
                }
                Ok(data.clone())
            }
        }
    }
}

impl From<PathBuf> for ModelSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for ModelSource {
    fn from(path: &Path) -> Self {
        Self::file(path)
    }
}
