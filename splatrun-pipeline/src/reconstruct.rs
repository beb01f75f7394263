//! Reconstruction invoker.
//!
//! Drives the external COLMAP wrapper against a scene. GPU feature
//! extraction needs a working display/GL context; on headless hosts the
//! tool dies with a recognizable message, and the one recovery this
//! pipeline performs is a single retry in CPU-only mode when that message
//! shows up. Both attempts append to the same per-scene log.

use std::path::PathBuf;

use splatrun_exec::{find_tool, run_logged};
use splatrun_scene::SceneLayout;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

const SOURCE_PATH_FLAG: &str = "--source_path";
const NO_GPU_FLAG: &str = "--no_gpu";

/// Mode the reconstruction tool ended up succeeding in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructionMode {
    /// GPU mode, as requested.
    Gpu,
    /// CPU mode, as requested.
    Cpu,
    /// CPU mode, after the GPU attempt hit a context failure.
    CpuFallback,
}

/// Invokes the external reconstruction wrapper for one scene.
pub struct Reconstruction {
    python: PathBuf,
    script_candidates: Vec<PathBuf>,
    failure_signatures: Vec<String>,
    use_gpu: bool,
}

impl Reconstruction {
    pub fn new(
        python: PathBuf,
        script_candidates: Vec<PathBuf>,
        failure_signatures: Vec<String>,
        use_gpu: bool,
    ) -> Self {
        Self {
            python,
            script_candidates,
            failure_signatures,
            use_gpu,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            config.python.clone(),
            config.convert_script.clone(),
            config.gpu_failure_signatures.clone(),
            config.use_gpu,
        )
    }

    /// Run reconstruction for `scene`, materializing `input/` first.
    ///
    /// Returns which mode succeeded. A nonzero exit with a GPU context
    /// failure signature in the output triggers exactly one retry with
    /// `--no_gpu` appended; any other nonzero exit is a hard failure
    /// carrying the exit code and the log path.
    #[tracing::instrument(skip_all, fields(scene = %scene.root().display()))]
    pub fn run(&self, scene: &SceneLayout) -> Result<ReconstructionMode, PipelineError> {
        let script = find_tool("convert.py", &self.script_candidates)?;
        scene.link_or_copy_input()?;

        let log = scene.reconstruction_log();
        let mut args = vec![
            script.display().to_string(),
            SOURCE_PATH_FLAG.to_string(),
            scene.root().display().to_string(),
        ];
        if !self.use_gpu {
            args.push(NO_GPU_FLAG.to_string());
        }

        info!(
            "Running reconstruction (GPU {})",
            if self.use_gpu { "enabled" } else { "disabled" }
        );
        let first = run_logged(&self.python, &args, &log)?;
        if first.success() {
            info!("Reconstruction completed, log: {}", log.display());
            return Ok(if self.use_gpu {
                ReconstructionMode::Gpu
            } else {
                ReconstructionMode::Cpu
            });
        }

        if self.use_gpu && self.matches_failure_signature(&first.output) {
            warn!(
                "GPU context failure detected in reconstruction output, retrying CPU-only; log: {}",
                log.display()
            );
            let mut retry_args = args;
            retry_args.push(NO_GPU_FLAG.to_string());
            let retry = run_logged(&self.python, &retry_args, &log)?;
            if retry.success() {
                info!("Reconstruction completed in CPU-only mode");
                return Ok(ReconstructionMode::CpuFallback);
            }
            return Err(PipelineError::ToolFailed {
                tool: "reconstruction",
                code: retry.exit_code,
                log,
            });
        }

        Err(PipelineError::ToolFailed {
            tool: "reconstruction",
            code: first.exit_code,
            log,
        })
    }

    fn matches_failure_signature(&self, output: &str) -> bool {
        let lowered = output.to_lowercase();
        self.failure_signatures
            .iter()
            .any(|sig| lowered.contains(&sig.to_lowercase()))
    }
}
