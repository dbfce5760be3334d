//! Run command - process the list of expected invoice files.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use cufe_core::report::write_report;
use cufe_core::{BatchOutcome, BatchProcessor, PdfExtractor, RecordStore};

use super::config::load_config;

const RULE_WIDTH: usize = 80;

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    /// File names to process instead of the configured list
    files: Vec<String>,

    /// Folder holding the invoice files
    #[arg(short, long)]
    folder: Option<PathBuf>,

    /// Record store path
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Do not print the stored records afterwards
    #[arg(long)]
    no_report: bool,
}

pub fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let folder = args.folder.unwrap_or_else(|| config.input.folder.clone());
    let store_path = args.store.unwrap_or_else(|| config.store.path.clone());
    let names = if args.files.is_empty() {
        config.input.expected_files.clone()
    } else {
        args.files
    };

    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", style("CUFE INVOICE EXTRACTOR").bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!();
    println!("Folder: {}", folder.display());
    println!("Files to process: {}", names.len());
    println!();

    let mut store = RecordStore::open(&store_path)?;

    let stdout = io::stdout();
    let mut batch = BatchProcessor::new(PdfExtractor::new(), stdout.lock());
    let outcome = batch.process_list(&folder, names.as_slice(), &mut store)?;
    drop(batch);

    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Processing finished.");
    println!("{}", "=".repeat(RULE_WIDTH));

    if let BatchOutcome::Completed(summary) = &outcome {
        info!("Run summary: {:?}", summary);
        println!(
            "   {} with CUFE, {} without, {} missing, {} with read errors",
            style(summary.with_cufe).green(),
            style(summary.without_cufe).yellow(),
            style(summary.missing).red(),
            style(summary.failed).red()
        );
    }

    if !args.no_report {
        let rows = store.select_all()?;
        let mut out = stdout.lock();
        write_report(&rows, &mut out)?;
        out.flush()?;
    }

    store.close()?;

    println!();
    println!(
        "{} Database written: {}",
        style("✓").green(),
        store_path.display()
    );

    Ok(())
}
