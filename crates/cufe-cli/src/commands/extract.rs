//! Extract command - print the CUFE of a single PDF.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use cufe_core::cufe::{CufeExtractor, FieldExtractor, MatchStrategy};
use cufe_core::{PdfExtractor, PdfProcessor};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// List every match instead of only the first
    #[arg(long)]
    all: bool,
}

pub fn run(args: ExtractArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting CUFE from {}", args.input.display());

    let mut extractor = PdfExtractor::new();
    extractor.load_file(&args.input)?;
    let text = extractor.extract_text()?;

    let cufe_extractor = CufeExtractor::new();
    let matches = if args.all {
        cufe_extractor.extract_all(&text)
    } else {
        cufe_extractor.extract(&text).into_iter().collect()
    };

    if matches.is_empty() {
        println!("{} No CUFE found in {}", style("ℹ").blue(), args.input.display());
        return Ok(());
    }

    for m in &matches {
        let note = match m.strategy {
            MatchStrategy::LineTolerant if m.source.trim_end_matches('\n').contains('\n') => " (joined across lines)",
            MatchStrategy::LineTolerant => "",
            MatchStrategy::Collapsed => " (after removing line breaks)",
        };
        println!("{}{}", m.value, style(note).dim());
    }

    Ok(())
}
