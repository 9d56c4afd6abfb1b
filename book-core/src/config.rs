use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::export::{ExportOptions, DEFAULT_FILENAME};
use crate::layout::LayoutConfig;
use crate::normalize::ColumnMatching;
use crate::settings::TitleSize;
use crate::style::PageSize;

/// Looked up in the working directory when no path is given.
pub const CONFIG_FILENAME: &str = "book.toml";

/// Optional `book.toml` configuration. Every key has a default, so an
/// empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookConfig {
    #[serde(default)]
    pub title_size: TitleSize,

    #[serde(default)]
    pub column_matching: ColumnMatching,

    /// Where `export` writes when no output path is passed.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_compress")]
    pub compress: bool,

    #[serde(default)]
    pub page: PageSize,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_FILENAME)
}

fn default_compress() -> bool {
    true
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title_size: TitleSize::default(),
            column_matching: ColumnMatching::default(),
            output: default_output(),
            compress: default_compress(),
            page: PageSize::default(),
        }
    }
}

impl BookConfig {
    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: BookConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `explicit` if given, else `book.toml` in `dir` if it exists,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        debug!("no config file, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let PageSize { width, height } = self.page;
        if !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::Invalid("page size must be finite".into()));
        }
        if !self.page.fits_panel() {
            let min = PageSize::minimum();
            return Err(ConfigError::Invalid(format!(
                "page {}x{} is smaller than the minimum {}x{}",
                width, height, min.width, min.height
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output path is empty".into()));
        }
        Ok(())
    }

    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig { page: self.page }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            title_size: self.title_size,
            layout: self.layout(),
            compress: self.compress,
        }
    }
}
