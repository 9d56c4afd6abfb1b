use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Heading font size in points, always within [`TitleSize::MIN`]..=[`TitleSize::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TitleSize(u32);

impl TitleSize {
    pub const MIN: u32 = 16;
    pub const MAX: u32 = 40;
    pub const DEFAULT: TitleSize = TitleSize(24);

    pub fn new(points: u32) -> Result<Self, SettingsError> {
        if (Self::MIN..=Self::MAX).contains(&points) {
            Ok(TitleSize(points))
        } else {
            Err(SettingsError::TitleSizeOutOfRange(points))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn points(self) -> f64 {
        self.0 as f64
    }
}

impl Default for TitleSize {
    fn default() -> Self {
        TitleSize::DEFAULT
    }
}

impl TryFrom<u32> for TitleSize {
    type Error = SettingsError;

    fn try_from(points: u32) -> Result<Self, Self::Error> {
        TitleSize::new(points)
    }
}

impl From<TitleSize> for u32 {
    fn from(size: TitleSize) -> u32 {
        size.0
    }
}

impl From<TitlePreset> for TitleSize {
    fn from(preset: TitlePreset) -> Self {
        TitleSize(preset.points())
    }
}

impl fmt::Display for TitleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Named shortcuts for common title sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitlePreset {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl TitlePreset {
    pub const ALL: [TitlePreset; 4] = [
        TitlePreset::Small,
        TitlePreset::Medium,
        TitlePreset::Large,
        TitlePreset::ExtraLarge,
    ];

    pub fn points(self) -> u32 {
        match self {
            TitlePreset::Small => 20,
            TitlePreset::Medium => 24,
            TitlePreset::Large => 28,
            TitlePreset::ExtraLarge => 32,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TitlePreset::Small => "Small",
            TitlePreset::Medium => "Medium",
            TitlePreset::Large => "Large",
            TitlePreset::ExtraLarge => "Extra Large",
        }
    }
}

impl fmt::Display for TitlePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TitlePreset {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match folded.as_str() {
            "small" => Ok(TitlePreset::Small),
            "medium" => Ok(TitlePreset::Medium),
            "large" => Ok(TitlePreset::Large),
            "extra large" | "extralarge" => Ok(TitlePreset::ExtraLarge),
            _ => Err(SettingsError::UnknownPreset(s.to_string())),
        }
    }
}
