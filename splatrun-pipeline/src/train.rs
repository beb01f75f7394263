//! Training invoker.
//!
//! One invocation of the external training script, no retry logic. The
//! script reads the reconstruction output from the scene root and writes
//! model artifacts back into it.

use std::path::PathBuf;

use splatrun_exec::{find_tool, run_logged};
use splatrun_scene::SceneLayout;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::PipelineError;

const SCENE_FLAG: &str = "-s";
const ITERATIONS_FLAG: &str = "--iterations";

/// Invokes the external training script for one scene.
pub struct Training {
    python: PathBuf,
    script_candidates: Vec<PathBuf>,
}

impl Training {
    pub fn new(python: PathBuf, script_candidates: Vec<PathBuf>) -> Self {
        Self {
            python,
            script_candidates,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.python.clone(), config.train_script.clone())
    }

    /// Train `scene` for `iterations` optimization steps.
    ///
    /// `iterations` must be positive; callers default it (the CLI uses
    /// 30000) rather than this component picking a policy value.
    #[tracing::instrument(skip_all, fields(scene = %scene.root().display(), iterations))]
    pub fn run(&self, scene: &SceneLayout, iterations: u32) -> Result<(), PipelineError> {
        let script = find_tool("train.py", &self.script_candidates)?;
        let log = scene.training_log();
        let args = vec![
            script.display().to_string(),
            SCENE_FLAG.to_string(),
            scene.root().display().to_string(),
            ITERATIONS_FLAG.to_string(),
            iterations.to_string(),
        ];

        info!("Running training for {} iterations", iterations);
        let outcome = run_logged(&self.python, &args, &log)?;
        if !outcome.success() {
            return Err(PipelineError::ToolFailed {
                tool: "training",
                code: outcome.exit_code,
                log,
            });
        }
        info!("Training completed, log: {}", log.display());
        Ok(())
    }
}
