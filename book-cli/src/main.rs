use std::path::PathBuf;

use book_core::BookConfig;
use clap::{Parser, Subcommand};

mod cmd;
mod logging;
mod terminal;

#[derive(Parser)]
#[command(name = "http-error-book", version)]
#[command(about = "Turn a CSV of HTTP errors into a paged reference book", long_about = None)]
pub struct Cli {
    /// Config file (TOML). Defaults to ./book.toml when present
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write every entry of a CSV as one page of a PDF
    Export(cmd::export::ExportArgs),

    /// Show one page in the terminal or write it as SVG
    Preview(cmd::preview::PreviewArgs),

    /// Print page count, file size and detected columns
    Inspect(cmd::inspect::InspectArgs),

    /// Page through a CSV interactively
    Browse(cmd::browse::BrowseArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cwd = std::env::current_dir()?;
    let config = BookConfig::discover(cli.config.as_deref(), &cwd)?;

    match cli.cmd {
        Commands::Export(args) => cmd::export::run(args, &config),
        Commands::Preview(args) => cmd::preview::run(args, &config),
        Commands::Inspect(args) => cmd::inspect::run(args, &config),
        Commands::Browse(args) => cmd::browse::run(args, &config),
    }
}
