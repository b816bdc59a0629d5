//! Command-line interface for model-faker
//!
//! # Usage Examples
//!
//! ## Generate
//! ```bash
//! # Five fake scenarios as JSON lines, reproducible with a fixed seed
//! model-faker generate --schema schemas/risk.yaml --record ScenarioDefinition \
//!   --count 5 --seed 42
//!
//! # Drop one branch of a mutually exclusive pair before construction
//! model-faker generate --schema schemas/risk.yaml --record OptionValuationRequest \
//!   --drop-field vol_surface
//! ```
//!
//! ## Verify
//! ```bash
//! # Round-trip selected records through JSON
//! model-faker verify --schema schemas/risk.yaml --records Shock,YieldCurve \
//!   --iterations 500
//!
//! # Round-trip the whole catalog through YAML with custom collection sizes
//! model-faker verify --schema schemas/risk.yaml --codec yaml \
//!   --config faker.yaml --drop-field vol_surface
//! ```
//!
//! Set `RUST_LOG=info` to see progress logs.

use anyhow::Context;
use clap::{Parser, Subcommand};
use model_faker::{run_generate, run_verify, GenerateArgs, VerifyArgs};
use std::io::{self, BufWriter, Write};

#[derive(Parser)]
#[command(name = "model-faker")]
#[command(about = "Generate fake records from a schema catalog and verify codec round trips")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print fake records as JSON lines
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Check that fake records survive an encode/decode round trip
    Verify {
        #[command(flatten)]
        args: VerifyArgs,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            run_generate(&args, &mut out)?;
            out.flush().context("Failed to flush output")?;
        }
        Commands::Verify { args } => {
            let report = run_verify(&args)?;

            for mismatch in &report.mismatches {
                tracing::error!(
                    "'{}' #{} diverged at {}: expected {}, got {}",
                    mismatch.record,
                    mismatch.iteration,
                    mismatch.path,
                    mismatch.expected,
                    mismatch.actual
                );
            }
            for error in &report.errors {
                tracing::error!(
                    "'{}' #{} failed: {}",
                    error.record,
                    error.iteration,
                    error.message
                );
            }
            println!("{}", report.summary());

            if !report.is_success() {
                return Err(anyhow::anyhow!(
                    "Verification failed - some instances did not survive the round trip"
                ));
            }
        }
    }

    Ok(())
}
