//! Pipeline orchestrator.
//!
//! Strictly sequential: prepare the scene, reconstruct, train. Each step
//! blocks to completion before the next starts, the first failure stops
//! the run, and there is no partial-success bookkeeping or resume.

use std::path::Path;

use splatrun_scene::SceneLayout;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::reconstruct::{Reconstruction, ReconstructionMode};
use crate::train::Training;

/// Runs the full pipeline for named scenes under one configuration.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run reconstruction and training for `scene_name`.
    ///
    /// If `source_images` is given, its files are copied into the scene
    /// first. Fails fast if `images/` is missing or empty; step failures
    /// propagate unchanged.
    #[tracing::instrument(skip_all, fields(scene = %scene_name))]
    pub fn run(
        &self,
        scene_name: &str,
        source_images: Option<&Path>,
        iterations: u32,
    ) -> Result<ReconstructionMode, PipelineError> {
        let scene = self.config.scene(scene_name);
        if let Some(source) = source_images {
            scene.populate_images(source)?;
        }
        scene.verify()?;

        let mode = Reconstruction::from_config(&self.config).run(&scene)?;
        Training::from_config(&self.config).run(&scene, iterations)?;

        info!("Pipeline complete for scene '{}'", scene_name);
        Ok(mode)
    }

    /// Prepare a scene without running the external tools: create the
    /// layout and copy source images in.
    pub fn prepare(&self, scene_name: &str, source_images: &Path) -> Result<SceneLayout, PipelineError> {
        let scene = self.config.scene(scene_name);
        scene.ensure_layout()?;
        scene.populate_images(source_images)?;
        Ok(scene)
    }
}
