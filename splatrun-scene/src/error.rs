//! Scene management errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while managing a scene directory.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("images folder missing: {}", .path.display())]
    MissingImages { path: PathBuf },

    #[error("images folder is empty: {}", .path.display())]
    EmptyImages { path: PathBuf },

    #[error("source folder missing: {}", .path.display())]
    MissingSource { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decoding error: {0}")]
    ImageDecode(#[from] image::ImageError),
}
