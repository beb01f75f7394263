//! Errors for external tool invocation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating or running an external tool.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("tool '{name}' not found, searched {searched:?}")]
    ToolNotFound {
        name: String,
        searched: Vec<PathBuf>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
