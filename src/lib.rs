//! Model Faker
//!
//! Command-line front end for the faker framework: generate fake records
//! from a YAML schema catalog, or check that they survive a codec round trip.
//!
//! # Crates
//!
//! - `faker_core` - type expressions, schemas and value model
//! - `faker_generator` - classifier, generator registry, recursive builder and hooks
//! - `faker_verify` - codecs, structural comparison and the round-trip harness
//!
//! # CLI Usage
//!
//! ```bash
//! # Ten JSON lines of fake Shock records
//! model-faker generate --schema schemas/risk.yaml --record Shock --count 10 --seed 42
//!
//! # Round-trip every record in the catalog through YAML
//! model-faker verify --schema schemas/risk.yaml --codec yaml \
//!   --iterations 100 --drop-field vol_surface
//! ```

use anyhow::Context;
use clap::{Args, ValueEnum};
use faker_core::SchemaCatalog;
use faker_generator::{FakerConfig, ModelFaker, PreConstructionHook, RemoveFields};
use faker_verify::{JsonCodec, RoundTripHarness, RoundTripReport, YamlCodec};
use std::io::Write;
use std::path::PathBuf;

/// Options shared by every subcommand that builds records.
#[derive(Args, Clone, Debug)]
pub struct FakerOpts {
    /// Path to the schema catalog YAML file
    #[arg(long, short = 's', value_name = "PATH")]
    pub schema: PathBuf,

    /// Random seed (omit for a fresh OS-provided seed)
    #[arg(long, env = "MODEL_FAKER_SEED")]
    pub seed: Option<u64>,

    /// Path to a generator configuration YAML file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Top-level fields removed before construction (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub drop_field: Vec<String>,
}

impl FakerOpts {
    /// Load the catalog and configuration and create a faker.
    pub fn faker(&self) -> anyhow::Result<ModelFaker> {
        let catalog = SchemaCatalog::from_file(&self.schema)
            .with_context(|| format!("Failed to load schema from {:?}", self.schema))?;

        let mut config = match &self.config {
            Some(path) => FakerConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {path:?}"))?,
            None => FakerConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }

        ModelFaker::new(catalog, config).context("Failed to create faker")
    }

    /// The hook requested by `--drop-field`, if any.
    pub fn hook(&self) -> Option<RemoveFields> {
        if self.drop_field.is_empty() {
            None
        } else {
            Some(RemoveFields::new(self.drop_field.iter().cloned()))
        }
    }
}

fn as_hook(hook: &Option<RemoveFields>) -> Option<&dyn PreConstructionHook> {
    hook.as_ref().map(|h| h as &dyn PreConstructionHook)
}

/// Arguments for generating fake records.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub faker: FakerOpts,

    /// Record schema to generate
    #[arg(long, short = 'r')]
    pub record: String,

    /// Number of records to generate
    #[arg(long, short = 'n', default_value = "1")]
    pub count: u64,
}

/// Arguments for round-trip verification.
#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub faker: FakerOpts,

    /// Records to verify (comma-separated, empty = all records in the catalog)
    #[arg(long, value_delimiter = ',')]
    pub records: Vec<String>,

    /// Number of fresh instances per record
    #[arg(long, default_value = "100")]
    pub iterations: u64,

    /// Codec under test
    #[arg(long, value_enum, default_value = "json")]
    pub codec: CodecKind,
}

/// Codecs selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CodecKind {
    /// JSON via serde_json
    #[value(name = "json")]
    Json,
    /// YAML via serde_yaml
    #[value(name = "yaml")]
    Yaml,
}

/// Write `args.count` records as JSON lines to `out`.
pub fn run_generate<W: Write>(args: &GenerateArgs, out: &mut W) -> anyhow::Result<u64> {
    let mut faker = args.faker.faker()?;
    let hook = args.faker.hook();

    tracing::info!(
        "Generating {} '{}' records (seed={:?})",
        args.count,
        args.record,
        faker.config().seed
    );

    let mut written = 0;
    let records = faker
        .records(&args.record, args.count, as_hook(&hook))
        .with_context(|| format!("Unknown record '{}'", args.record))?;
    for record in records {
        let record = record.with_context(|| format!("Failed to build '{}'", args.record))?;
        serde_json::to_writer(&mut *out, &record.to_json())
            .context("Failed to write record")?;
        writeln!(out).context("Failed to write record")?;
        written += 1;
    }

    tracing::info!("Generation complete: {} records written", written);
    Ok(written)
}

/// Round-trip the requested records and return the aggregate report.
pub fn run_verify(args: &VerifyArgs) -> anyhow::Result<RoundTripReport> {
    let faker = args.faker.faker()?;
    let hook = args.faker.hook();

    let records: Vec<String> = if args.records.is_empty() {
        faker
            .catalog()
            .record_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        args.records.clone()
    };
    let records: Vec<&str> = records.iter().map(String::as_str).collect();
    let hook = as_hook(&hook);

    let report = match args.codec {
        CodecKind::Json => {
            RoundTripHarness::new(faker, JsonCodec).verify_many(&records, args.iterations, hook)
        }
        CodecKind::Yaml => {
            RoundTripHarness::new(faker, YamlCodec).verify_many(&records, args.iterations, hook)
        }
    };
    Ok(report)
}
