use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use book_core::render::render_svg;
use book_core::{load_document, Action, AppState, BookConfig};
use clap::Args;

use super::{SourceArgs, TitleArgs};
use crate::terminal::{use_color, Terminal, DEFAULT_WIDTH};

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Page to show, counting from 1
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Write the page as SVG to this path instead of printing it
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    #[command(flatten)]
    pub title: TitleArgs,

    /// Print without terminal colors
    #[arg(long)]
    pub no_color: bool,

    /// Terminal panel width in columns
    #[arg(long, value_name = "COLS", default_value_t = DEFAULT_WIDTH)]
    pub width: usize,
}

pub fn run(args: PreviewArgs, config: &BookConfig) -> anyhow::Result<()> {
    let loaded = load_document(&args.source.csv, args.source.matching(config))?;
    let mut state = AppState::new(args.title.resolve(config)?);
    state.apply(Action::Loaded(loaded))?;

    let terminal = Terminal::new(use_color(args.no_color), args.width);
    if state.pager().is_empty() {
        println!("{}", terminal.placeholder());
        return Ok(());
    }

    let index = args
        .page
        .checked_sub(1)
        .context("pages are numbered from 1")?;
    state
        .apply(Action::JumpTo(index))
        .with_context(|| format!("cannot show page {}", args.page))?;

    if let Some(path) = args.svg {
        let layout = state
            .current_layout(&config.layout())
            .context("no page to render")?;
        fs::write(&path, render_svg(&layout))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote page {} preview to {}", args.page, path.display());
        return Ok(());
    }

    if let Some(descriptor) = state.current_descriptor() {
        print!("{}", terminal.page(&descriptor));
    }
    if let Some(label) = state.pager().position_label() {
        println!();
        println!(
            "{}",
            terminal.controls(&label, state.pager().has_previous(), state.pager().has_next())
        );
    }
    Ok(())
}
