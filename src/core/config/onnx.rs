//! ONNX Runtime configuration types and utilities.

use serde::{Deserialize, Serialize};

/// Graph optimization levels for ONNX Runtime.
///
/// This enum represents the different levels of graph optimization that can be applied
/// during ONNX Runtime session creation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum OrtGraphOptimizationLevel {
    /// Disable all optimizations.
    DisableAll,
    /// Enable basic optimizations.
    #[default]
    Level1,
    /// Enable extended optimizations.
    Level2,
    /// Enable all optimizations.
    Level3,
    /// Enable all optimizations (alias for Level3).
    All,
}

/// Execution providers for ONNX Runtime.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum OrtExecutionProvider {
    /// CPU execution provider (always available)
    #[default]
    CPU,
    /// NVIDIA CUDA execution provider
    CUDA {
        /// CUDA device ID (default: 0)
        device_id: Option<i32>,
    },
}

impl OrtExecutionProvider {
    /// Parses a device string such as `cpu`, `cuda` or `cuda:1`.
    pub fn parse_device(device: &str) -> Result<Vec<Self>, String> {
        let device = device.trim().to_lowercase();
        if device == "cpu" {
            return Ok(vec![Self::CPU]);
        }
        if device == "cuda" {
            return Ok(vec![Self::CUDA { device_id: Some(0) }, Self::CPU]);
        }
        if let Some(id) = device.strip_prefix("cuda:") {
            let device_id: i32 = id
                .parse()
                .map_err(|_| format!("Invalid CUDA device id: {}", id))?;
            return Ok(vec![
                Self::CUDA {
                    device_id: Some(device_id),
                },
                Self::CPU,
            ]);
        }
        Err(format!(
            "Unsupported device: {}. Supported devices: cpu, cuda, cuda:N",
            device
        ))
    }
}

/// Configuration for ONNX Runtime sessions.
///
/// Every field is optional; unset fields keep ONNX Runtime's own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrtSessionConfig {
    /// Number of threads used to parallelize execution within nodes
    pub intra_threads: Option<usize>,
    /// Number of threads used to parallelize execution across nodes
    pub inter_threads: Option<usize>,
    /// Graph optimization level
    pub optimization_level: Option<OrtGraphOptimizationLevel>,
    /// Execution providers in order of preference
    pub execution_providers: Option<Vec<OrtExecutionProvider>>,
    /// Log severity level (0=Verbose, 1=Info, 2=Warning, 3=Error, 4=Fatal)
    pub log_severity_level: Option<i32>,
}

impl OrtSessionConfig {
    /// Creates a new OrtSessionConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of intra-op threads.
    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = Some(threads);
        self
    }

    /// Sets the number of inter-op threads.
    pub fn with_inter_threads(mut self, threads: usize) -> Self {
        self.inter_threads = Some(threads);
        self
    }

    /// Sets the graph optimization level.
    pub fn with_optimization_level(mut self, level: OrtGraphOptimizationLevel) -> Self {
        self.optimization_level = Some(level);
        self
    }

    /// Sets the execution providers.
    pub fn with_execution_providers(mut self, providers: Vec<OrtExecutionProvider>) -> Self {
        self.execution_providers = Some(providers);
        self
    }

    /// Sets the log severity level.
    pub fn with_log_severity_level(mut self, level: i32) -> Self {
        self.log_severity_level = Some(level);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device() {
        assert_eq!(
            OrtExecutionProvider::parse_device("CPU").unwrap(),
            vec![OrtExecutionProvider::CPU]
        );
        assert_eq!(
            OrtExecutionProvider::parse_device("cuda:2").unwrap(),
            vec![
                OrtExecutionProvider::CUDA { device_id: Some(2) },
                OrtExecutionProvider::CPU
            ]
        );
        assert!(OrtExecutionProvider::parse_device("cuda:x").is_err());
        assert!(OrtExecutionProvider::parse_device("tpu").is_err());
    }

    #[test]
    fn test_session_config_builder() {
        let config = OrtSessionConfig::new()
            .with_intra_threads(2)
            .with_inter_threads(1)
            .with_optimization_level(OrtGraphOptimizationLevel::All)
            .with_log_severity_level(3);
        assert_eq!(config.intra_threads, Some(2));
        assert_eq!(config.inter_threads, Some(1));
        assert_eq!(
            config.optimization_level,
            Some(OrtGraphOptimizationLevel::All)
        );
        assert_eq!(config.log_severity_level, Some(3));
        assert!(config.execution_providers.is_none());
    }

    #[test]
    fn test_session_config_partial_json() {
        let config: OrtSessionConfig =
            serde_json::from_str(r#"{ "intra_threads": 4 }"#).unwrap();
        assert_eq!(config.intra_threads, Some(4));
        assert_eq!(config.optimization_level, None);
    }
}
