//! Batch command - parse every request in a set of JSON files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use mdm_core::{decode_requests, parse_batch, ParsedResult, RequestParser, SourceRequest};

use super::parse::{csv_row, CSV_HEADER};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: BatchFormat,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BatchFormat {
    /// JSON array of results
    Json,
    /// One CSV row per request
    Csv,
}

/// One parsed request and where it came from.
#[derive(Debug, Serialize)]
struct BatchRecord {
    file: String,
    title: String,
    #[serde(flatten)]
    result: ParsedResult,
}

/// Requests decoded from one input file.
struct FileRequests {
    path: PathBuf,
    requests: Vec<SourceRequest>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("json")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!("{} Found {} files to process", style("ℹ").blue(), files.len());

    let mut loaded = Vec::with_capacity(files.len());
    let mut failed: Vec<(PathBuf, String)> = Vec::new();

    for path in files {
        match read_requests(&path) {
            Ok(requests) => {
                debug!("Read {} requests from {}", requests.len(), path.display());
                loaded.push(FileRequests { path, requests });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to read {}: {}", path.display(), error_msg);
                    failed.push((path, error_msg));
                } else {
                    error!("Failed to read {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }
    }

    let total: usize = loaded.iter().map(|f| f.requests.len()).sum();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.max(1))
        .build()?;
    let parser = RequestParser::from_config(&config.extraction);

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} requests")?
            .progress_chars("=>-"),
    );

    let chunk_size = config.ingest.batch_size.max(1);
    let mut records = Vec::with_capacity(total);

    for file in &loaded {
        let name = file.path.display().to_string();
        for chunk in file.requests.chunks(chunk_size) {
            let parsed = pool.install(|| parse_batch(&parser, chunk));
            records.extend(chunk.iter().zip(parsed).map(|(req, result)| BatchRecord {
                file: name.clone(),
                title: req.title.clone(),
                result,
            }));
            pb.inc(chunk.len() as u64);
        }
    }

    pb.finish_and_clear();

    let output = match args.format {
        BatchFormat::Json => serde_json::to_string_pretty(&records)?,
        BatchFormat::Csv => format_csv(&records)?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!("{} Output written to {}", style("✓").green(), output_path.display());
    } else {
        println!("{}", output.trim_end());
    }

    eprintln!(
        "{} Parsed {} requests from {} files in {:?}",
        style("✓").green(),
        records.len(),
        loaded.len(),
        start.elapsed()
    );

    if !failed.is_empty() {
        eprintln!("{}", style("Failed files:").red());
        for (path, error) in &failed {
            eprintln!("  - {}: {}", path.display(), error);
        }
    }

    Ok(())
}

fn read_requests(path: &Path) -> anyhow::Result<Vec<SourceRequest>> {
    let content = fs::read_to_string(path)?;
    Ok(decode_requests(&content)?)
}

fn format_csv(records: &[BatchRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["file", "title"];
    header.extend(CSV_HEADER);
    wtr.write_record(&header)?;

    for record in records {
        let mut row = vec![record.file.clone(), record.title.clone()];
        row.extend(csv_row(&record.result));
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
