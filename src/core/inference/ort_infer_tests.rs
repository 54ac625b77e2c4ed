use super::*;
use crate::core::config::{OrtGraphOptimizationLevel, OrtSessionConfig};
use crate::core::inference::ModelSource;

#[test]
fn test_missing_model_file_fails_to_load() {
    let source = ModelSource::file("dummy_path.onnx");
    let result = OrtInfer::new(&source);
    assert!(matches!(result, Err(RecognizerError::ModelLoad { .. })));
}

#[test]
fn test_pool_config_with_missing_model_fails() {
    let config = OrtSessionConfig::new()
        .with_intra_threads(1)
        .with_optimization_level(OrtGraphOptimizationLevel::Level2);
    let source = ModelSource::file("dummy_path.onnx");
    let result = OrtInfer::from_config(&source, 3, Some(&config));
    assert!(result.is_err());
}

#[test]
fn test_garbage_bytes_fail_to_load() {
    let source = ModelSource::bytes("garbage", b"definitely not an onnx graph".to_vec());
    let result = OrtInfer::new(&source);
    assert!(matches!(result, Err(RecognizerError::ModelLoad { .. })));
}
