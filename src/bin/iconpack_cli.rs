//! IconPack CLI - JSON bridge for build scripts
//!
//! Commands: generate, inspect
//! Outputs JSON to stdout, logs to stderr
//! Returns 1 on bad payload/config, 2 on generation failure

use clap::{Parser, Subcommand};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iconpack_core::{
    compute_package_digest, GenerationRequest, GeneratorConfig, ImageSource, PackageGenerator,
    ENGINE_VERSION,
};

#[derive(Parser)]
#[command(name = "iconpack-cli")]
#[command(about = "IconPack CLI - SVG to React component package compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to generator config (JSON); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate package files from a GenerationRequest
    Generate {
        /// Inline JSON payload (GenerationRequest)
        #[arg(short, long, conflicts_with = "request")]
        payload: Option<String>,

        /// File containing the JSON payload
        #[arg(short, long)]
        request: Option<PathBuf>,
    },

    /// Show the symbol and viewBox derived for one image
    Inspect {
        /// Image path, used only for its base name
        #[arg(short, long)]
        path: String,

        /// Raw SVG markup
        #[arg(short, long)]
        source: String,
    },
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => println!(r#"{{"success": false, "error": "Failed to encode output: {}"}}"#, e),
    }
}

fn failure(error: impl std::fmt::Display, code: u8) -> ExitCode {
    print_json(&json!({ "success": false, "error": error.to_string() }));
    ExitCode::from(code)
}

fn read_payload(payload: Option<String>, request: Option<PathBuf>) -> Result<String, String> {
    match (payload, request) {
        (Some(p), _) => Ok(p),
        (None, Some(path)) => fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e)),
        (None, None) => Err("Either --payload or --request is required".to_string()),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iconpack_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match GeneratorConfig::load_from_file(path) {
            Ok(c) => c,
            Err(e) => return failure(e, 1),
        },
        None => GeneratorConfig::default(),
    };

    let generator = PackageGenerator::new(config);

    match cli.command {
        Commands::Generate { payload, request } => {
            let raw = match read_payload(payload, request) {
                Ok(raw) => raw,
                Err(e) => return failure(e, 1),
            };
            let request: GenerationRequest = match serde_json::from_str(&raw) {
                Ok(r) => r,
                Err(e) => return failure(format!("Invalid payload: {}", e), 1),
            };

            let files = match generator.generate(&request) {
                Ok(files) => files,
                Err(e) => return failure(e, 2),
            };

            let digest = match compute_package_digest(&files) {
                Ok(d) => d,
                Err(e) => return failure(e, 1),
            };

            print_json(&json!({
                "success": true,
                "engineVersion": ENGINE_VERSION,
                "digest": digest,
                "files": files,
            }));
            ExitCode::SUCCESS
        }

        Commands::Inspect { path, source } => {
            let image = ImageSource { path, source };
            match generator.build_component(&image) {
                Ok(unit) => {
                    print_json(&json!({
                        "success": true,
                        "symbolName": unit.symbol_name,
                        "filepath": unit.filepath(),
                        "viewBox": unit.view_box,
                    }));
                    ExitCode::SUCCESS
                }
                Err(e) => failure(e, 2),
            }
        }
    }
}
