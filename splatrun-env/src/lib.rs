//! Splatrun Environment Crate
//!
//! Diagnostics for the host the pipeline runs on: which interpreter will
//! drive the external reconstruction/training tools, what platform we are
//! on, and whether the accelerator stack (torch + CUDA) is usable.
//!
//! Probes never fail: a broken interpreter or accelerator install is
//! reported as data inside the report, so diagnostics stay runnable on the
//! machines that need them most.

pub mod probe;
pub mod report;

pub use probe::{accelerator_info, full_report, runtime_info, system_info};
pub use report::{AcceleratorInfo, EnvReport, RuntimeInfo, SystemInfo};
