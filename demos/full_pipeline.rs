//! Full pipeline demo
//!
//! Runs scene preparation, reconstruction, and training for a named scene
//! using the stock configuration (containerized tools first, local
//! checkout as fallback).
//!
//! Usage:
//!   cargo run --example full_pipeline -- <scene_name> [source_images_dir]

use std::error::Error;
use std::path::PathBuf;
use tracing::info;

use splatrun_pipeline::{Pipeline, PipelineConfig, DEFAULT_ITERATIONS};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let scene_name = std::env::args()
        .nth(1)
        .expect("Please provide a scene name");
    let source = std::env::args().nth(2).map(PathBuf::from);

    let pipeline = Pipeline::new(PipelineConfig::default());

    info!("Running pipeline for scene '{}'", scene_name);
    let mode = pipeline.run(&scene_name, source.as_deref(), DEFAULT_ITERATIONS)?;
    info!("Reconstruction succeeded in {:?} mode", mode);

    let scene = pipeline.config().scene(&scene_name);
    info!("Artifacts and logs under {}", scene.root().display());
    Ok(())
}
