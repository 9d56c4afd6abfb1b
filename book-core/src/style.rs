use book_pdf::{BuiltinFont, Color};
use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb`, lowercase.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    pub fn to_pdf(self) -> Color {
        Color::from_rgb8(self.0, self.1, self.2)
    }
}

pub mod palette {
    use super::Rgb;

    /// slate-900
    pub const PAGE_BACKGROUND: Rgb = Rgb(15, 23, 42);
    /// slate-800
    pub const PANEL_FILL: Rgb = Rgb(30, 41, 59);
    /// slate-700
    pub const PANEL_BORDER: Rgb = Rgb(51, 65, 85);
    pub const HEADING: Rgb = Rgb(255, 255, 255);
    /// slate-400
    pub const BADGE: Rgb = Rgb(148, 163, 184);
    /// emerald-400
    pub const LABEL: Rgb = Rgb(52, 211, 153);
    pub const VALUE: Rgb = Rgb(255, 255, 255);
    /// slate-500
    pub const FOOTER: Rgb = Rgb(100, 116, 139);
    /// red-500, yellow-500, green-500
    pub const DOTS: [Rgb; 3] = [Rgb(239, 68, 68), Rgb(234, 179, 8), Rgb(34, 197, 94)];
}

pub const PAGE_WIDTH: f64 = 700.0;
pub const PAGE_HEIGHT: f64 = 900.0;
pub const PAGE_PADDING: f64 = 32.0;

pub const HEADING_TEXT: &str = "HTTP Errors";
pub const HEADING_FONT: BuiltinFont = BuiltinFont::HelveticaBold;
pub const HEADING_LETTER_SPACING: f64 = 2.0;
pub const HEADING_GAP: f64 = 32.0;

pub const PANEL_WIDTH: f64 = 512.0;
pub const PANEL_HEIGHT: f64 = 480.0;
pub const PANEL_PADDING: f64 = 32.0;
pub const PANEL_RADIUS: f64 = 12.0;
pub const PANEL_BORDER_WIDTH: f64 = 1.0;
pub const PANEL_OPACITY: f64 = 0.9;

pub const DOT_DIAMETER: f64 = 12.0;
pub const DOT_INSET: f64 = 24.0;
pub const DOT_GAP: f64 = 8.0;

pub const BADGE_FONT: BuiltinFont = BuiltinFont::HelveticaBold;
pub const BADGE_SIZE: f64 = 18.0;
pub const BADGE_INSET: f64 = 24.0;

pub const LABEL_FONT: BuiltinFont = BuiltinFont::HelveticaBold;
pub const VALUE_FONT: BuiltinFont = BuiltinFont::Helvetica;
pub const BODY_SIZE: f64 = 14.0;
pub const LABEL_MIN_WIDTH: f64 = 80.0;
pub const LABEL_GAP: f64 = 8.0;
pub const LINE_HEIGHT: f64 = 1.5;
pub const LONG_TEXT_LINE_HEIGHT: f64 = 1.6;
pub const LONG_TEXT_OFFSET: f64 = 4.0;
pub const ROW_GAP: f64 = 16.0;
pub const BLOCK_TOP_PADDING: f64 = 16.0;

pub const FOOTER_FONT: BuiltinFont = BuiltinFont::Helvetica;
pub const FOOTER_SIZE: f64 = 14.0;
pub const FOOTER_MARGIN: f64 = 32.0;

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// Smallest page that still fits the panel inside the page padding,
    /// with room for a heading and footer.
    pub fn minimum() -> PageSize {
        PageSize {
            width: PANEL_WIDTH + 2.0 * PAGE_PADDING,
            height: PANEL_HEIGHT + 2.0 * (PAGE_PADDING + HEADING_GAP + FOOTER_MARGIN),
        }
    }

    pub fn fits_panel(&self) -> bool {
        let min = PageSize::minimum();
        self.width >= min.width && self.height >= min.height
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
        }
    }
}
