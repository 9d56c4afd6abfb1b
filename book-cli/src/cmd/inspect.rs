use book_core::{load_document, BookConfig};
use clap::Args;

use super::SourceArgs;

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: InspectArgs, config: &BookConfig) -> anyhow::Result<()> {
    let loaded = load_document(&args.source.csv, args.source.matching(config))?;

    println!("Book Stats");
    println!("  File:        {}", loaded.name);
    println!("  Total Pages: {}", loaded.document.len());
    println!("  File Size:   {}", loaded.size_label());
    if loaded.columns.is_empty() {
        println!("  Columns:     (none)");
    } else {
        println!("  Columns:     {}", loaded.columns.join(", "));
    }
    Ok(())
}
