//! Splatrun Exec - logged external process invocation
//!
//! The pipeline delegates all real work to out-of-process tools. This crate
//! provides the two pieces every invocation needs:
//!
//! - [`run_logged`]: launch a tool with its combined output streamed into an
//!   append-mode log file, and get back the exit code plus captured text
//! - [`find_tool`]: resolve a tool from an ordered list of install locations
//!
//! Retries are a caller policy; nothing here retries.

mod error;
mod locate;
mod runner;

pub use error::ExecError;
pub use locate::{find_tool, tool_available};
pub use runner::{run_logged, RunOutcome};
