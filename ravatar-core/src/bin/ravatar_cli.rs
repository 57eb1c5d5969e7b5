//! Ravatar CLI
//!
//! Commands: describe, render, export, palette
//! Outputs JSON to stdout, logs to stderr (RUST_LOG)
//! Returns 1 on bad input, 2 when a description fails validation

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ravatar_core::{
    AvatarDescription, AvatarPipeline, GradientSet, RenderConfig, RowKind, ENGINE_VERSION,
    compute_fingerprint,
};

#[derive(Parser)]
#[command(name = "ravatar-cli")]
#[command(about = "Ravatar CLI - deterministic avatars from seed strings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a render config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the avatar description for a seed
    Describe {
        #[arg(short, long)]
        seed: String,
    },

    /// Render an avatar to a PNG file
    Render {
        /// Seed string
        #[arg(short, long, conflicts_with = "description", required_unless_present = "description")]
        seed: Option<String>,

        /// JSON description to render instead of a seed
        #[arg(short, long)]
        description: Option<String>,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Canvas size in pixels, overrides the config
        #[arg(long)]
        size: Option<u32>,
    },

    /// Print a PNG export (base64) for a seed
    Export {
        #[arg(short, long)]
        seed: String,

        /// Canvas size in pixels, overrides the config
        #[arg(long)]
        size: Option<u32>,
    },

    /// List row kinds and gradient sets in selection order
    Palette,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match RenderConfig::load_from_file(path) {
            Ok(c) => c,
            Err(e) => return fail(&format!("Failed to load config: {}", e)),
        },
        None => RenderConfig::default(),
    };

    match cli.command {
        Commands::Describe { seed } => {
            let description = AvatarDescription::generate(&seed);
            let fingerprint = match compute_fingerprint(&description) {
                Ok(f) => f,
                Err(e) => return fail(&e.to_string()),
            };
            print_json(&serde_json::json!({
                "seed": seed,
                "engine_version": ENGINE_VERSION,
                "fingerprint": fingerprint,
                "description": description,
            }));
            ExitCode::SUCCESS
        }

        Commands::Render { seed, description, output, size } => {
            let pipeline = match pipeline_for(config, size) {
                Ok(p) => p,
                Err(code) => return code,
            };

            let description = match (seed, description) {
                (Some(seed), _) => pipeline.describe(&seed),
                (None, Some(json)) => match serde_json::from_str::<AvatarDescription>(&json) {
                    Ok(d) => d,
                    Err(e) => {
                        print_json(&serde_json::json!({
                            "success": false,
                            "error": format!("Invalid description: {}", e),
                        }));
                        return ExitCode::from(2);
                    }
                },
                (None, None) => return fail("Either --seed or --description is required"),
            };

            match write_png(&pipeline, &description, &output) {
                Ok(bytes) => {
                    print_json(&serde_json::json!({
                        "success": true,
                        "output": output.display().to_string(),
                        "size": [pipeline.config().size, pipeline.config().size],
                        "bytes": bytes,
                        "description": description,
                    }));
                    ExitCode::SUCCESS
                }
                Err(e) => fail(&e),
            }
        }

        Commands::Export { seed, size } => {
            let pipeline = match pipeline_for(config, size) {
                Ok(p) => p,
                Err(code) => return code,
            };
            match pipeline.export(&seed) {
                Ok(export) => {
                    print_json(&serde_json::json!({
                        "success": true,
                        "avatar": export,
                    }));
                    ExitCode::SUCCESS
                }
                Err(e) => fail(&e.to_string()),
            }
        }

        Commands::Palette => {
            let rows: Vec<_> = RowKind::ALL
                .iter()
                .enumerate()
                .map(|(index, kind)| serde_json::json!({
                    "index": index,
                    "name": kind.name(),
                    "nodes": kind.node_count(),
                    "has_background": kind.has_background(),
                }))
                .collect();
            let gradients: Vec<_> = GradientSet::ALL
                .iter()
                .enumerate()
                .map(|(index, set)| serde_json::json!({
                    "index": index,
                    "name": set.name(),
                    "colors": set.colors(),
                }))
                .collect();
            print_json(&serde_json::json!({
                "row_kinds": rows,
                "gradient_sets": gradients,
            }));
            ExitCode::SUCCESS
        }
    }
}

fn pipeline_for(config: RenderConfig, size: Option<u32>) -> Result<AvatarPipeline, ExitCode> {
    let config = match size {
        Some(size) => config.with_size(size),
        None => config,
    };
    AvatarPipeline::new(config).map_err(|e| fail(&e.to_string()))
}

fn write_png(pipeline: &AvatarPipeline, description: &AvatarDescription, output: &Path) -> Result<usize, String> {
    let png = pipeline.encode_png(description).map_err(|e| e.to_string())?;
    fs::write(output, &png).map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;
    log::info!("wrote {} ({} bytes)", output.display(), png.len());
    Ok(png.len())
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("failed to serialize output: {}", e),
    }
}

fn fail(message: &str) -> ExitCode {
    print_json(&serde_json::json!({
        "success": false,
        "error": message,
    }));
    ExitCode::FAILURE
}
