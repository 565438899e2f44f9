//! Process command - extract and validate a single document.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info, warn};

use logiparse_core::{Field, Pipeline, ProcessingOutput, Status};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (text or PDF), or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Add processing metadata to JSON output
    #[arg(long)]
    metadata: bool,

    /// Exit with an error when validation fails
    #[arg(long)]
    strict: bool,
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

/// Where the document text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SourceType {
    #[serde(rename = "PDF")]
    Pdf,
    Text,
}

/// Characters of input text kept in `raw_text_preview`.
const PREVIEW_CHARS: usize = 300;

#[derive(Serialize)]
struct Metadata {
    processed_at: String,
    source_type: SourceType,
    raw_text_preview: String,
}

/// First [`PREVIEW_CHARS`] characters of the text, with `...` when cut.
fn text_preview(text: &str) -> String {
    let mut chars = text.chars();
    let mut preview: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        preview.push_str("...");
    }
    preview
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
    #[serde(flatten)]
    output: &'a ProcessingOutput,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let (text, source_type) = read_input(&args.input)?;

    if text.trim().is_empty() {
        warn!("Input contains no text");
    }

    let output = Pipeline::with_config(&config).process(&text);
    let report = &output.validation_report;

    let metadata = args.metadata.then(|| Metadata {
        processed_at: chrono::Local::now().to_rfc3339(),
        source_type,
        raw_text_preview: text_preview(&text),
    });

    let rendered = match args.format {
        OutputFormat::Json => format_json(&output, metadata, args.pretty)?,
        OutputFormat::Csv => format_csv(&output)?,
        OutputFormat::Text => format_text(&output),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", rendered);
        if !rendered.ends_with('\n') {
            println!();
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if args.strict && report.is_fail() {
        anyhow::bail!(
            "Validation failed with {} issue(s)",
            report.issues.len()
        );
    }

    Ok(())
}

/// Read document text from a file, a PDF or stdin.
fn read_input(input: &Path) -> anyhow::Result<(String, SourceType)> {
    if input == Path::new("-") {
        info!("Reading text from stdin");
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok((decode_text(buf, "stdin")?, SourceType::Text));
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Processing file: {}", input.display());

    let data = fs::read(input)?;

    if extension == "pdf" {
        let text = pdf_extract::extract_text_from_mem(&data).map_err(|e| {
            anyhow::anyhow!("Failed to extract text from {}: {}", input.display(), e)
        })?;
        debug!("Extracted {} characters from PDF", text.len());
        Ok((text, SourceType::Pdf))
    } else {
        Ok((decode_text(data, &input.display().to_string())?, SourceType::Text))
    }
}

fn decode_text(data: Vec<u8>, name: &str) -> anyhow::Result<String> {
    String::from_utf8(data)
        .map_err(|_| anyhow::anyhow!("{} is not UTF-8 text; only text and PDF input is supported", name))
}

fn format_json(
    output: &ProcessingOutput,
    metadata: Option<Metadata>,
    pretty: bool,
) -> anyhow::Result<String> {
    let document = JsonDocument { metadata, output };
    if pretty {
        Ok(serde_json::to_string_pretty(&document)?)
    } else {
        Ok(serde_json::to_string(&document)?)
    }
}

fn format_csv(output: &ProcessingOutput) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let record = &output.extracted_data.record;
    let report = &output.validation_report;

    let mut header: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
    header.extend(["item_count", "status", "field_coverage"]);
    wtr.write_record(&header)?;

    let mut row: Vec<String> = Field::ALL
        .iter()
        .map(|f| record.get(*f).unwrap_or_default().to_string())
        .collect();
    row.push(output.extracted_data.items.len().to_string());
    row.push(report.status.to_string());
    row.push(report.field_coverage.clone());
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(output: &ProcessingOutput) -> String {
    let record = &output.extracted_data.record;
    let items = &output.extracted_data.items;
    let report = &output.validation_report;

    let mut text = String::new();

    for field in Field::ALL {
        text.push_str(&format!(
            "{:<16} {}\n",
            format!("{}:", field),
            record.get(field).unwrap_or("-")
        ));
    }
    text.push('\n');

    if items.is_empty() {
        text.push_str("Items: none\n");
    } else {
        text.push_str("Items:\n");
        for (i, item) in items.iter().enumerate() {
            text.push_str(&format!(
                "  {}. {}  {} x {} = {}\n",
                i + 1,
                item.description,
                item.quantity.normalize(),
                item.unit_price,
                item.line_total
            ));
        }
    }
    text.push('\n');

    let status = match report.status {
        Status::Pass => style(report.status.as_str()).green(),
        Status::Warn => style(report.status.as_str()).yellow(),
        Status::Fail => style(report.status.as_str()).red(),
    };
    text.push_str(&format!(
        "Validation: {} (coverage {})\n",
        status, report.field_coverage
    ));
    for issue in &report.issues {
        text.push_str(&format!("  issue: {}\n", issue));
    }
    for warning in &report.warnings {
        text.push_str(&format!("  warning: {}\n", warning));
    }

    text
}
