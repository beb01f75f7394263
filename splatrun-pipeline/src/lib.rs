//! Splatrun Pipeline Crate
//!
//! Sequences the external tools that turn a folder of photographs into a
//! trained scene: COLMAP reconstruction (through the gaussian-splatting
//! `convert.py` wrapper) followed by gaussian-splatting training. All real
//! computation happens out of process; this crate does argument building,
//! log bookkeeping, and one narrow piece of failure handling (a single
//! CPU-only retry when reconstruction hits a GPU context failure).
//!
//! ## Modules
//!
//! - [`config`]: where the tools and scenes live, passed in explicitly
//! - [`reconstruct`]: reconstruction invoker with the GPU→CPU retry
//! - [`train`]: training invoker (single attempt, no retry)
//! - [`orchestrator`]: prepare → reconstruct → train for one scene

pub mod config;
mod error;
pub mod orchestrator;
pub mod reconstruct;
pub mod train;

pub use config::{PipelineConfig, DEFAULT_ITERATIONS};
pub use error::PipelineError;
pub use orchestrator::Pipeline;
pub use reconstruct::{Reconstruction, ReconstructionMode};
pub use train::Training;
