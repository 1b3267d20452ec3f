//! Parse command - extract fields from a single change request.

use clap::Args;
use tracing::{debug, warn};

use mdm_core::request::rules::ClassificationSource;
use mdm_core::{ParseTrace, ParsedResult, RequestParser};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Request title
    #[arg(required = true)]
    title: String,

    /// Free-text instructions
    #[arg(short, long, default_value = "")]
    instructions: String,

    /// Request type from the source list
    #[arg(short = 't', long = "type", default_value = "")]
    request_type: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which rules and strategies fired
    #[arg(long)]
    explain: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let parser = RequestParser::from_config(&config.extraction);

    let trace = parser.explain(&args.title, &args.instructions, &args.request_type);
    debug!("Parsed request as {}", trace.result.field);

    let output = match (args.format, args.explain) {
        (OutputFormat::Json, true) => serde_json::to_string_pretty(&trace)?,
        (OutputFormat::Json, false) => serde_json::to_string_pretty(&trace.result)?,
        (OutputFormat::Csv, explain) => {
            if explain {
                warn!("--explain has no effect on CSV output");
            }
            format_csv(&trace.result)?
        }
        (OutputFormat::Text, explain) => {
            let mut text = format_text(&trace.result);
            if explain {
                text.push_str(&format_trace(&trace));
            }
            text
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

/// CSV header shared by the parse and batch commands.
pub const CSV_HEADER: [&str; 8] = [
    "field",
    "system",
    "category",
    "items",
    "old_value",
    "new_value",
    "orgs",
    "change_category",
];

/// CSV columns for one result, in [`CSV_HEADER`] order.
pub fn csv_row(result: &ParsedResult) -> Vec<String> {
    vec![
        result.field.to_string(),
        result.system.to_string(),
        result.category.clone(),
        result.items.join(";"),
        result.old_value.clone(),
        result.new_value.clone(),
        result.orgs.iter().cloned().collect::<Vec<_>>().join(";"),
        result.change_category().as_str().to_string(),
    ]
}

fn format_csv(result: &ParsedResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_row(result))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ParsedResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", result.category));
    output.push_str(&format!("Field:    {}\n", result.field));
    output.push_str(&format!("System:   {}\n", result.system));

    if !result.items.is_empty() {
        output.push_str(&format!("Items:    {}\n", result.items.join(", ")));
    }
    if !result.old_value.is_empty() || !result.new_value.is_empty() {
        let old = if result.old_value.is_empty() { "-" } else { &result.old_value };
        output.push_str(&format!("Change:   {} -> {}\n", old, result.new_value));
    }
    if !result.orgs.is_empty() {
        let orgs: Vec<&str> = result.orgs.iter().map(String::as_str).collect();
        output.push_str(&format!("Orgs:     {}\n", orgs.join(", ")));
    }

    output
}

fn format_trace(trace: &ParseTrace) -> String {
    let mut output = String::from("\nExplain:\n");

    let source = match trace.classification {
        ClassificationSource::Hint(keyword) => format!("request type keyword '{}'", keyword),
        ClassificationSource::Rule(name) => format!("rule '{}'", name),
        ClassificationSource::HintFallback(keyword) => format!("request type fallback '{}'", keyword),
        ClassificationSource::Default => "no match, default".to_string(),
    };
    output.push_str(&format!("  Classified by: {}\n", source));
    output.push_str(&format!(
        "  Value strategy: {}\n",
        trace.value_strategy.unwrap_or("none")
    ));

    for m in &trace.item_matches {
        match m.position {
            Some((start, end)) => {
                output.push_str(&format!("  Item {} via {} at {}..{}\n", m.value, m.pattern, start, end))
            }
            None => output.push_str(&format!("  Item {} via {}\n", m.value, m.pattern)),
        }
    }

    output
}
