use std::path::PathBuf;

use anyhow::Context;
use book_core::export::ExportOptions;
use book_core::{export_to_path, load_document, BookConfig, ExportOutcome};
use clap::Args;

use super::{SourceArgs, TitleArgs};

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output PDF path (default from config, else http-errors-reference.pdf)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub title: TitleArgs,

    /// Store page content uncompressed
    #[arg(long)]
    pub no_compress: bool,
}

pub fn run(args: ExportArgs, config: &BookConfig) -> anyhow::Result<()> {
    let loaded = load_document(&args.source.csv, args.source.matching(config))?;
    let options = ExportOptions {
        title_size: args.title.resolve(config)?,
        compress: config.compress && !args.no_compress,
        ..config.export_options()
    };
    let dest = args.output.unwrap_or_else(|| config.output.clone());

    let outcome = export_to_path(&loaded.document, &dest, &options)
        .with_context(|| format!("Failed to generate PDF from {}", loaded.name))?;
    match outcome {
        ExportOutcome::Written { path, pages } => {
            println!("Wrote {} pages to {}", pages, path.display());
        }
        ExportOutcome::Skipped => println!("{}", super::EMPTY_MESSAGE),
    }
    Ok(())
}
