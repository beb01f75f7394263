//! Environment probing functions.
//!
//! The accelerator check shells out to the configured interpreter with a
//! short snippet that prints JSON, since torch lives in the external tool
//! stack rather than in this process.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::report::{AcceleratorInfo, EnvReport, RuntimeInfo, SystemInfo};

/// Snippet the interpreter runs to describe its torch install.
const ACCELERATOR_PROBE: &str = "\
import json, torch
out = {'version': getattr(torch, '__version__', None)}
try:
    out['cuda_available'] = torch.cuda.is_available()
    out['device_count'] = torch.cuda.device_count()
except Exception as e:
    out['error'] = str(e)
print(json.dumps(out))
";

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    version: Option<String>,
    cuda_available: Option<bool>,
    device_count: Option<u32>,
    error: Option<String>,
}

/// Query the interpreter's version string.
pub fn runtime_info(interpreter: &Path) -> RuntimeInfo {
    match Command::new(interpreter).arg("--version").output() {
        Ok(output) => {
            // Older interpreters print the version on stderr.
            let text = if output.stdout.is_empty() {
                &output.stderr
            } else {
                &output.stdout
            };
            let version = String::from_utf8_lossy(text).trim().to_string();
            debug!("Interpreter version: {}", version);
            RuntimeInfo {
                executable: interpreter.to_path_buf(),
                version: Some(version),
                error: None,
            }
        }
        Err(e) => {
            debug!("Interpreter version query failed: {}", e);
            RuntimeInfo {
                executable: interpreter.to_path_buf(),
                version: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Describe the host platform.
pub fn system_info() -> SystemInfo {
    SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}

/// Probe the accelerator library through the interpreter.
///
/// Never returns an error: a missing interpreter, a missing torch install,
/// or a broken CUDA runtime all land in the returned report fields.
pub fn accelerator_info(interpreter: &Path) -> AcceleratorInfo {
    let output = match Command::new(interpreter)
        .arg("-c")
        .arg(ACCELERATOR_PROBE)
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            debug!("Accelerator probe could not launch interpreter: {}", e);
            return AcceleratorInfo::probe_failed(e.to_string());
        }
    };

    if !output.status.success() {
        // Import failures land here; report "not installed" and keep the
        // interpreter's complaint around for inspection.
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!("Accelerator probe exited nonzero: {}", stderr);
        let mut info = AcceleratorInfo::not_installed();
        if !stderr.is_empty() {
            info.error = Some(stderr);
        }
        return info;
    }

    match serde_json::from_slice::<ProbeOutput>(&output.stdout) {
        Ok(parsed) => AcceleratorInfo {
            installed: true,
            version: parsed.version,
            cuda_available: parsed.cuda_available,
            device_count: parsed.device_count,
            error: parsed.error,
        },
        Err(e) => AcceleratorInfo::probe_failed(format!("unparseable probe output: {}", e)),
    }
}

/// Produce the full environment report.
pub fn full_report(interpreter: &Path) -> EnvReport {
    EnvReport {
        runtime: runtime_info(interpreter),
        system: system_info(),
        accelerator: accelerator_info(interpreter),
    }
}
