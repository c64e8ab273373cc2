//! ICD-10-CM encoder binary.
//!
//! Reads a finding-set JSON document (from a file or stdin), runs the
//! rules engine, and writes the encoded output as JSON to stdout.

use std::io::Read;

use icd_engine::{run_rules_engine, CodeMetadataStore, SharedMetadata};
use icd_types::FindingSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Metadata: external TSV when configured, the builtin table
    // otherwise.
    let metadata_path = std::env::var("ICD_METADATA_PATH").ok();
    let shared = SharedMetadata::new();
    let metadata = shared
        .get_or_load(|| async {
            match metadata_path {
                Some(path) => {
                    tracing::info!("Loading code metadata from: {}", path);
                    let mut store = CodeMetadataStore::builtin();
                    let count = store.load_tsv(&path)?;
                    tracing::info!("Loaded {} metadata entries", count);
                    Ok(store)
                }
                None => {
                    tracing::info!("Using builtin code metadata table");
                    Ok(CodeMetadataStore::builtin())
                }
            }
        })
        .await?;

    // Findings: first CLI argument as a path, or stdin.
    let input = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Reading findings from: {}", path);
            std::fs::read_to_string(path)?
        }
        None => {
            tracing::info!("Reading findings from stdin");
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let findings: FindingSet = serde_json::from_str(&input)?;

    let output = run_rules_engine(&findings, &metadata);

    tracing::info!(
        "Encoded {} codes with {} warnings and {} errors",
        output.sequence.len(),
        output.warnings.len(),
        output.errors.len()
    );

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
