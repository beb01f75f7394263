//! Splatrun CLI
//!
//! Drives the scene pipeline from the terminal:
//! - `check`: environment diagnostics (interpreter, OS, accelerator, tools)
//! - `prepare`: create a scene and copy/downscale source images into it
//! - `run`: full pipeline (reconstruction + training)

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use splatrun_exec::ExecError;
use splatrun_pipeline::{PipelineConfig, PipelineError, DEFAULT_ITERATIONS};
use splatrun_scene::SceneError;

/// Splatrun - Gaussian Splatting scene pipeline runner
#[derive(Parser, Debug)]
#[command(name = "splatrun")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON pipeline configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report interpreter, OS, accelerator, and tool diagnostics
    Check {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a scene and copy source images into it
    Prepare {
        /// Scene name under the configured scenes root
        #[arg(short, long)]
        scene: String,

        /// Folder of source photographs to copy in
        #[arg(long)]
        source: PathBuf,

        /// Also downscale images into input/, capping the longer edge
        #[arg(long)]
        max_dim: Option<u32>,

        /// JPEG quality used when downscaling
        #[arg(long, default_value_t = 90)]
        quality: u8,
    },

    /// Run the full pipeline (reconstruction + training)
    Run {
        /// Scene name under the configured scenes root
        #[arg(short, long)]
        scene: String,

        /// Copy images from this folder into the scene first
        #[arg(long)]
        source: Option<PathBuf>,

        /// Training iteration count
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: u32,

        /// Disable GPU use in the reconstruction tool
        #[arg(long)]
        no_gpu: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Check { json } => commands::check(&config, json),
        Commands::Prepare {
            scene,
            source,
            max_dim,
            quality,
        } => commands::prepare(&config, &scene, &source, max_dim, quality),
        Commands::Run {
            scene,
            source,
            iterations,
            no_gpu,
        } => commands::run(config, &scene, source.as_deref(), iterations, no_gpu),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(exit_code_for(&e));
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<PipelineConfig, PipelineError> {
    match path {
        Some(path) => PipelineConfig::from_file(path),
        None => Ok(PipelineConfig::default()),
    }
}

/// Missing preconditions exit 5, external tool failures 6, anything else 1.
fn exit_code_for(err: &PipelineError) -> i32 {
    match err {
        PipelineError::Scene(
            SceneError::MissingImages { .. }
            | SceneError::EmptyImages { .. }
            | SceneError::MissingSource { .. },
        ) => 5,
        PipelineError::Exec(ExecError::ToolNotFound { .. }) => 5,
        PipelineError::ToolFailed { .. } => 6,
        _ => 1,
    }
}
