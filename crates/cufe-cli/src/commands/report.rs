//! Report command - print stored records.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use cufe_core::cufe::is_valid_cufe;
use cufe_core::report::write_report;
use cufe_core::{InvoiceRecord, RecordStore};

use super::config::load_config;

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Record store path
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only rows for this file name
    #[arg(long, conflicts_with = "cufe")]
    file: Option<String>,

    /// Only rows carrying this CUFE
    #[arg(long)]
    cufe: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text blocks
    Text,
    /// JSON array
    Json,
    /// CSV with a header row
    Csv,
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if let Some(cufe) = args.cufe.as_deref().filter(|c| !is_valid_cufe(c)) {
        anyhow::bail!("Not a CUFE (expected 95-100 hex characters): {}", cufe);
    }

    let config = load_config(config_path)?;
    let store_path = args.store.unwrap_or_else(|| config.store.path.clone());

    let store = RecordStore::open(&store_path)?;
    let rows = match (&args.file, &args.cufe) {
        (Some(name), _) => store.find_by_file_name(name)?,
        (None, Some(cufe)) => store.find_by_cufe(cufe)?,
        (None, None) => store.select_all()?,
    };
    store.close()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => write_report(&rows, &mut out)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?,
        OutputFormat::Csv => write_csv(&rows, &mut out)?,
    }
    out.flush()?;

    Ok(())
}

fn write_csv<W: Write>(rows: &[InvoiceRecord], out: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record([
        "id",
        "file_name",
        "page_count",
        "cufe",
        "file_size",
        "processed_at",
    ])?;

    for row in rows {
        wtr.write_record([
            &row.id.to_string(),
            &row.file_name,
            &row.page_count.map(|p| p.to_string()).unwrap_or_default(),
            &row.cufe.clone().unwrap_or_default(),
            &row.file_size.map(|s| s.to_string()).unwrap_or_default(),
            &row.processed_at.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
