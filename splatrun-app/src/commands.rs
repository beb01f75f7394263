//! Subcommand implementations.

use std::path::Path;

use splatrun_env::EnvReport;
use splatrun_exec::tool_available;
use splatrun_pipeline::{Pipeline, PipelineConfig, PipelineError, ReconstructionMode};
use splatrun_scene::downscale_into_input;
use tracing::info;

/// Print the environment report, human-readable or as JSON.
pub fn check(config: &PipelineConfig, json: bool) -> Result<(), PipelineError> {
    let report = splatrun_env::full_report(&config.python);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(config, &report);
    }
    Ok(())
}

fn print_human(config: &PipelineConfig, report: &EnvReport) {
    match (&report.runtime.version, &report.runtime.error) {
        (Some(version), _) => {
            println!("Interpreter: {} ({})", report.runtime.executable.display(), version)
        }
        (None, Some(error)) => {
            println!("Interpreter: {} (unavailable: {})", report.runtime.executable.display(), error)
        }
        (None, None) => println!("Interpreter: {}", report.runtime.executable.display()),
    }

    println!("System: {} ({})", report.system.os, report.system.arch);

    let acc = &report.accelerator;
    if acc.installed {
        println!("torch version: {}", acc.version.as_deref().unwrap_or("unknown"));
        if let Some(error) = &acc.error {
            println!("cuda check error: {}", error);
        } else {
            println!("cuda available: {}", acc.cuda_available.unwrap_or(false));
            println!("cuda device count: {}", acc.device_count.unwrap_or(0));
        }
    } else {
        match &acc.error {
            Some(error) => println!("torch not installed ({})", error),
            None => println!("torch not installed"),
        }
    }

    println!(
        "reconstruction tool: {}",
        if tool_available(&config.convert_script) { "found" } else { "missing" }
    );
    println!(
        "training tool: {}",
        if tool_available(&config.train_script) { "found" } else { "missing" }
    );
}

/// Create the scene, copy source images in, optionally downscale them into
/// `input/`.
pub fn prepare(
    config: &PipelineConfig,
    scene_name: &str,
    source: &Path,
    max_dim: Option<u32>,
    quality: u8,
) -> Result<(), PipelineError> {
    let pipeline = Pipeline::new(config.clone());
    let scene = pipeline.prepare(scene_name, source)?;

    if let Some(max_dim) = max_dim {
        let written = downscale_into_input(&scene, max_dim, quality)?;
        info!("Prepared {} downscaled input images", written);
    }

    println!("Scene ready: {}", scene.root().display());
    Ok(())
}

/// Run the full pipeline for one scene.
pub fn run(
    mut config: PipelineConfig,
    scene_name: &str,
    source: Option<&Path>,
    iterations: u32,
    no_gpu: bool,
) -> Result<(), PipelineError> {
    if no_gpu {
        config.use_gpu = false;
    }

    let pipeline = Pipeline::new(config);
    let mode = pipeline.run(scene_name, source, iterations)?;
    if mode == ReconstructionMode::CpuFallback {
        println!("Note: reconstruction fell back to CPU-only mode.");
    }
    println!(
        "Pipeline complete: {}",
        pipeline.config().scene(scene_name).root().display()
    );
    Ok(())
}
