pub mod browse;
pub mod export;
pub mod inspect;
pub mod preview;

use std::path::PathBuf;

use anyhow::Context;
use book_core::{BookConfig, ColumnMatching, TitlePreset, TitleSize};
use clap::Args;

/// Message shown whenever there is nothing to page through or export.
pub const EMPTY_MESSAGE: &str = "No entries to preview. Please upload a CSV file first.";

/// Where rows come from and how their columns are matched.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// CSV file with one HTTP error per row
    pub csv: PathBuf,

    /// Match column names ignoring case and surrounding spaces
    #[arg(long)]
    pub case_insensitive: bool,
}

impl SourceArgs {
    pub fn matching(&self, config: &BookConfig) -> ColumnMatching {
        if self.case_insensitive {
            ColumnMatching::CaseInsensitive
        } else {
            config.column_matching
        }
    }
}

#[derive(Args, Debug)]
pub struct TitleArgs {
    /// Heading font size in points (16 to 40)
    #[arg(long, value_name = "N", conflicts_with = "preset")]
    pub title_size: Option<u32>,

    /// Heading size preset: small, medium, large, extra-large
    #[arg(long, value_name = "NAME")]
    pub preset: Option<TitlePreset>,
}

impl TitleArgs {
    pub fn resolve(&self, config: &BookConfig) -> anyhow::Result<TitleSize> {
        match (self.title_size, self.preset) {
            (Some(points), _) => TitleSize::new(points).context("invalid --title-size"),
            (None, Some(preset)) => Ok(preset.into()),
            (None, None) => Ok(config.title_size),
        }
    }
}
