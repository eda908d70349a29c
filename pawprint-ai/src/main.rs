//! pawprint-ai - evidence-fusion scoring harness
//!
//! Reads one evidence vector as JSON (file or stdin), runs it through the
//! analysis service and prints the report, or its summary, as JSON.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pawprint_ai::models::EvidenceVector;
use pawprint_ai::service::{
    AnalysisService, ContentRequest, EvidenceProvider, ServiceConfig, StaticEvidenceProvider,
};
use pawprint_ai::{FusionEngine, ThresholdConfig};
use pawprint_common::config::ConfigResolver;
use pawprint_common::logging::init_tracing;
use tracing::info;

/// Command-line arguments for pawprint-ai
#[derive(Parser, Debug)]
#[command(name = "pawprint-ai")]
#[command(about = "Score AI-generated media evidence")]
#[command(version)]
struct Args {
    /// Evidence JSON file, or '-' for stdin
    #[arg(short, long, default_value = "-")]
    evidence: String,

    /// Service config file (overrides PAWPRINT_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Threshold config file (overrides thresholds_file from the service config)
    #[arg(short, long)]
    thresholds: Option<PathBuf>,

    /// Content identifier for the report cache and record
    #[arg(long)]
    content_id: Option<String>,

    /// Print the summary (percentage, label) instead of the full report
    #[arg(long)]
    summary: bool,
}

fn read_evidence(source: &str) -> Result<EvidenceVector> {
    let content = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read evidence from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read evidence file {}", source))?
    };
    serde_json::from_str(&content).context("Evidence is not a valid evidence JSON object")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Step 1: Resolve service config; a named file that fails to load is fatal
    let resolver = ConfigResolver::new("pawprint-ai");
    let (config, source) = resolver
        .resolve(args.config.as_deref())
        .context("Failed to load service configuration")?;

    init_tracing(&config.logging).context("Failed to initialize logging")?;
    info!("Starting pawprint-ai v{}", env!("CARGO_PKG_VERSION"));
    info!("Config source: {:?}", source);

    // Step 2: Threshold config (compiled defaults unless a file is named)
    let thresholds_path = args.thresholds.clone().or_else(|| config.thresholds_file.clone());
    let thresholds = match &thresholds_path {
        Some(path) => {
            info!("Thresholds: {}", path.display());
            ThresholdConfig::load(path)
                .with_context(|| format!("Invalid threshold config {}", path.display()))?
        }
        None => ThresholdConfig::default(),
    };
    let engine = Arc::new(FusionEngine::new(thresholds).context("Invalid threshold config")?);

    // Step 3: Evidence and service
    let evidence = read_evidence(&args.evidence)?;
    let providers: Vec<Arc<dyn EvidenceProvider>> = vec![Arc::new(StaticEvidenceProvider::new(
        "evidence-input",
        evidence,
    ))];
    let service = AnalysisService::new(engine, providers, ServiceConfig::from(&config));

    let content_id = args.content_id.unwrap_or_else(|| args.evidence.clone());
    let report = service.analyze(&ContentRequest::new(content_id)).await;

    let output = if args.summary {
        serde_json::to_string_pretty(&report.summary())?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", output);

    Ok(())
}
