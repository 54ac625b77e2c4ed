//! The core module of the recognizer.
//!
//! This module contains the fundamental components shared by the pipeline:
//! - Configuration management
//! - Error handling
//! - Inference engine integration
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod errors;
pub mod inference;

pub use config::{OrtExecutionProvider, OrtSessionConfig, RecognizerConfig};
pub use errors::{RecognizerError, RecognizerResult, SimpleError};
pub use inference::{InferenceEngine, ModelSource, NamedOutputs, OrtInfer, Tensor4D};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
