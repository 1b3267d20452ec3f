//! Ingest command - merge source requests into a record store.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde_json::Value;
use tracing::info;

use mdm_core::{decode_requests, decode_store, IngestLedger, RequestParser};

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// JSON file with source requests
    #[arg(required = true)]
    input: PathBuf,

    /// Existing record store (JSON array)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Output file for the merged store (default: the store, else stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: IngestArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let requests = decode_requests(&fs::read_to_string(&args.input)?)?;

    let mut store: Vec<Value> = match &args.store {
        Some(path) if path.exists() => decode_store(&fs::read_to_string(path)?)?,
        _ => Vec::new(),
    };
    info!("Loaded {} requests and {} stored records", requests.len(), store.len());

    let parser = RequestParser::from_config(&config.extraction);
    let mut ledger = IngestLedger::new(config).with_store(&store);
    let summary = ledger.ingest(&parser, &requests, chrono::Local::now().naive_local());

    for record in &summary.records {
        store.push(serde_json::to_value(record)?);
    }
    let output = serde_json::to_string_pretty(&store)?;

    match args.output.as_ref().or(args.store.as_ref()) {
        Some(path) => {
            fs::write(path, &output)?;
            eprintln!("{} Store written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", output),
    }

    eprintln!(
        "{} Added {} new requests ({} duplicates, {} blank titles skipped)",
        style("✓").green(),
        style(summary.added()).green(),
        style(summary.duplicates).yellow(),
        summary.skipped_empty
    );

    Ok(())
}
