//! Pipeline configuration.
//!
//! Everything the invokers need to find the external tools is an explicit
//! value handed in at construction time, never an ambient lookup. The
//! defaults mirror the stock deployments: a containerized install checked
//! first, then a local checkout under `external/`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use splatrun_scene::SceneLayout;

use crate::error::PipelineError;

/// Iteration count callers should default to when the user gives none.
pub const DEFAULT_ITERATIONS: u32 = 30000;

/// Containerized install location of the gaussian-splatting checkout.
const CONTAINER_TOOL_ROOT: &str = "/home/appuser/gaussian-splatting";
/// Local checkout, relative to the working directory.
const LOCAL_TOOL_ROOT: &str = "external/gaussian-splatting";

/// Where the scenes and external tools live, and how reconstruction
/// failures are recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory scenes are rooted under.
    pub scenes_root: PathBuf,
    /// Interpreter used to run the external tool scripts.
    pub python: PathBuf,
    /// Ordered install locations of the reconstruction wrapper script.
    pub convert_script: Vec<PathBuf>,
    /// Ordered install locations of the training script.
    pub train_script: Vec<PathBuf>,
    /// Output substrings (matched case-insensitively) that identify a GPU
    /// context failure worth one CPU-only retry.
    pub gpu_failure_signatures: Vec<String>,
    /// Whether reconstruction should request GPU acceleration.
    pub use_gpu: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scenes_root: PathBuf::from("scenes"),
            python: PathBuf::from("python"),
            convert_script: vec![
                Path::new(CONTAINER_TOOL_ROOT).join("convert.py"),
                Path::new(LOCAL_TOOL_ROOT).join("convert.py"),
            ],
            train_script: vec![
                Path::new(CONTAINER_TOOL_ROOT).join("train.py"),
                Path::new(LOCAL_TOOL_ROOT).join("train.py"),
            ],
            gpu_failure_signatures: default_gpu_failure_signatures(),
            use_gpu: true,
        }
    }
}

/// The stock GPU/display context failure signatures.
pub fn default_gpu_failure_signatures() -> Vec<String> {
    [
        "could not create OpenGL context",
        "Check failed: context_.create()",
        "could not connect to display",
        "QXcbConnection",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Layout of the named scene under this configuration's root.
    pub fn scene(&self, name: &str) -> SceneLayout {
        SceneLayout::new(&self.scenes_root, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_searches_container_install_first() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.convert_script[0],
            Path::new("/home/appuser/gaussian-splatting/convert.py")
        );
        assert_eq!(
            config.convert_script[1],
            Path::new("external/gaussian-splatting/convert.py")
        );
        assert!(config.use_gpu);
        assert_eq!(config.gpu_failure_signatures.len(), 4);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"scenes_root": "/data/scenes", "use_gpu": false}"#).unwrap();
        assert_eq!(config.scenes_root, Path::new("/data/scenes"));
        assert!(!config.use_gpu);
        // Unspecified fields keep the stock values.
        assert_eq!(config.python, Path::new("python"));
        assert_eq!(config.gpu_failure_signatures.len(), 4);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.convert_script, config.convert_script);
        assert_eq!(back.gpu_failure_signatures, config.gpu_failure_signatures);
    }
}
