/// The builtin PDF fonts a book page uses. Builtin fonts are
/// available in every viewer and need no embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    pub const ALL: [BuiltinFont; 2] = [BuiltinFont::Helvetica, BuiltinFont::HelveticaBold];

    /// Resource name used in content streams (`/F1 14 Tf`).
    pub fn resource_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
        }
    }

    /// The `/BaseFont` name.
    pub fn base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }
}

// Adobe AFM advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width assumed for characters outside printable ASCII. Close to the
/// average Latin-1 letter width in both faces.
const FALLBACK_WIDTH: u16 = 556;

/// Horizontal metrics for the builtin fonts.
pub struct FontMetrics;

impl FontMetrics {
    /// Advance width of `ch` in 1/1000 em.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        let ch = if ch == '\t' { ' ' } else { ch };
        if !(' '..='~').contains(&ch) {
            return FALLBACK_WIDTH;
        }
        let index = ch as usize - 32;
        match font {
            BuiltinFont::Helvetica => HELVETICA_WIDTHS[index],
            BuiltinFont::HelveticaBold => HELVETICA_BOLD_WIDTHS[index],
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn measure_text(text: &str, font: BuiltinFont, font_size: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|ch| Self::char_width(font, ch) as u32)
            .sum();
        units as f64 * font_size / 1000.0
    }

    /// Width of `text` when every glyph is followed by `spacing` extra
    /// points, which is how the `Tc` operator advances.
    pub fn measure_spaced(text: &str, font: BuiltinFont, font_size: f64, spacing: f64) -> f64 {
        Self::measure_text(text, font, font_size) + spacing * text.chars().count() as f64
    }

    /// Distance from the top of a line box to the baseline.
    pub fn ascent(font_size: f64) -> f64 {
        font_size * 0.8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names_are_stable() {
        assert_eq!(BuiltinFont::Helvetica.resource_name(), "F1");
        assert_eq!(BuiltinFont::HelveticaBold.resource_name(), "F2");
        assert_eq!(BuiltinFont::HelveticaBold.base_name(), "Helvetica-Bold");
    }

    #[test]
    fn measures_ascii() {
        // H=722 e=556 l=222 l=222 o=556
        let w = FontMetrics::measure_text("Hello", BuiltinFont::Helvetica, 10.0);
        assert!((w - 22.78).abs() < 1e-9);
    }

    #[test]
    fn bold_is_wider() {
        let regular = FontMetrics::measure_text("Error Code:", BuiltinFont::Helvetica, 14.0);
        let bold = FontMetrics::measure_text("Error Code:", BuiltinFont::HelveticaBold, 14.0);
        assert!(bold > regular);
    }

    #[test]
    fn spacing_adds_per_glyph() {
        let plain = FontMetrics::measure_text("abc", BuiltinFont::Helvetica, 12.0);
        let spaced = FontMetrics::measure_spaced("abc", BuiltinFont::Helvetica, 12.0, 2.0);
        assert!((spaced - plain - 6.0).abs() < 1e-9);
    }

    #[test]
    fn non_ascii_uses_fallback() {
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, 'é'), FALLBACK_WIDTH);
    }
}
