//! CLI application for scanning invoice PDFs and recording their CUFE.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, report, run, scan};

/// CUFE extractor - Record the CUFE of Colombian electronic invoices
#[derive(Parser)]
#[command(name = "cufe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process the configured list of expected invoice files
    Run(run::RunArgs),

    /// Process every invoice PDF in a folder
    Scan(scan::ScanArgs),

    /// Print the records stored so far
    Report(report::ReportArgs),

    /// Print the CUFE of a single PDF without storing it
    Extract(extract::ExtractArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout carries the progress text and report
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Some(Commands::Run(args)) => run::run(args, cli.config.as_deref()),
        Some(Commands::Scan(args)) => scan::run(args, cli.config.as_deref()),
        Some(Commands::Report(args)) => report::run(args, cli.config.as_deref()),
        Some(Commands::Extract(args)) => extract::run(args),
        Some(Commands::Config(args)) => config::run(args, cli.config.as_deref()),
        None => run::run(run::RunArgs::default(), cli.config.as_deref()),
    }
}
