//! Splatrun Scene Crate
//!
//! Everything about a scene lives on disk: `images/` holds the source
//! photographs, `input/` is what the reconstruction tool reads, `logs/`
//! collects per-step tool output, and the reconstruction/training artifacts
//! land in the scene root. This crate owns that layout:
//!
//! - [`SceneLayout`]: path bookkeeping plus layout creation, image
//!   population, and `input/` materialization (symlink or copy)
//! - [`prepare`]: downscale-and-reencode of camera images into `input/`
//! - [`probe`]: filesystem capability probing (symlink support)

mod error;
mod layout;
pub mod prepare;
pub mod probe;

pub use error::SceneError;
pub use layout::SceneLayout;
pub use prepare::downscale_into_input;
