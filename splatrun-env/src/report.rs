//! Environment report types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The interpreter that will be used to drive the external tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeInfo {
    /// Configured interpreter path.
    pub executable: PathBuf,
    /// Output of `<executable> --version`, if it could be invoked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Why the version query failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Host platform description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name.
    pub os: String,
    /// CPU architecture.
    pub arch: String,
}

/// Accelerator library (torch) state, probed through the interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceleratorInfo {
    /// Whether the library could be imported at all.
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuda_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_count: Option<u32>,
    /// Why the probe itself failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AcceleratorInfo {
    /// An accelerator that is simply not installed.
    pub fn not_installed() -> Self {
        Self {
            installed: false,
            version: None,
            cuda_available: None,
            device_count: None,
            error: None,
        }
    }

    /// A probe that failed before it could say anything useful.
    pub fn probe_failed(error: String) -> Self {
        Self {
            installed: false,
            version: None,
            cuda_available: None,
            device_count: None,
            error: Some(error),
        }
    }
}

/// Full environment report, produced on demand and never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvReport {
    pub runtime: RuntimeInfo,
    pub system: SystemInfo,
    pub accelerator: AcceleratorInfo,
}
