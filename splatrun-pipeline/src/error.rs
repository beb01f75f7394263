//! Pipeline errors.
//!
//! Lower-layer failures pass through unchanged: the orchestrator relays
//! scene and exec errors to its caller rather than rewrapping them.

use std::path::PathBuf;

use splatrun_exec::ExecError;
use splatrun_scene::SceneError;
use thiserror::Error;

/// Errors that can terminate a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An external tool exited nonzero and no recovery applied.
    #[error("{tool} failed with exit code {code}, see log: {}", .log.display())]
    ToolFailed {
        tool: &'static str,
        code: i32,
        log: PathBuf,
    },

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
