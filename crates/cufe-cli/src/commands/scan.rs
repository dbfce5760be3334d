//! Scan command - process every invoice PDF in a folder.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use console::style;

use cufe_core::report::write_report;
use cufe_core::{BatchOutcome, BatchProcessor, PdfExtractor, RecordStore};

use super::config::load_config;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Folder to scan (default: configured input folder)
    folder: Option<PathBuf>,

    /// Glob pattern for invoice files
    #[arg(short, long)]
    pattern: Option<String>,

    /// Match the pattern case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Record store path
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Print the stored records afterwards
    #[arg(long)]
    report: bool,
}

pub fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let folder = args.folder.unwrap_or_else(|| config.input.folder.clone());
    let pattern = args.pattern.unwrap_or_else(|| config.input.pattern.clone());
    let case_sensitive = args.case_sensitive || config.input.case_sensitive;
    let store_path = args.store.unwrap_or_else(|| config.store.path.clone());

    let mut store = RecordStore::open(&store_path)?;

    let stdout = io::stdout();
    let mut batch = BatchProcessor::new(PdfExtractor::new(), stdout.lock());
    let outcome = batch.process_directory(&folder, &pattern, case_sensitive, &mut store)?;
    drop(batch);

    match &outcome {
        BatchOutcome::Completed(summary) => {
            println!(
                "{} Recorded {} files: {} with CUFE, {} without, {} with read errors",
                style("✓").green(),
                summary.files,
                style(summary.with_cufe).green(),
                style(summary.without_cufe).yellow(),
                style(summary.failed).red()
            );
        }
        BatchOutcome::FolderMissing(_) | BatchOutcome::NoFiles(_) => {
            println!("{} Nothing recorded.", style("ℹ").blue());
        }
    }

    if args.report {
        let rows = store.select_all()?;
        let mut out = stdout.lock();
        write_report(&rows, &mut out)?;
        out.flush()?;
    }

    store.close()?;
    Ok(())
}
