use std::collections::BTreeSet;

use crate::encoding::encode_win_ansi;
use crate::fonts::BuiltinFont;
use crate::graphics::Color;
use crate::objects::{escape_string_into, format_number};

/// Control-point distance for approximating a quarter circle with a
/// cubic Bézier curve.
const KAPPA: f64 = 0.552_284_749_8;

/// How a run of text is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: BuiltinFont,
    pub font_size: f64,
    pub color: Color,
    /// Extra advance after each glyph (`Tc`), in points.
    pub char_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font: BuiltinFont::Helvetica,
            font_size: 12.0,
            color: Color::BLACK,
            char_spacing: 0.0,
        }
    }
}

/// One page under construction.
///
/// Coordinates use PDF's default user space: origin at the bottom-left
/// corner, y growing upwards, units in points. Drawing methods append
/// content-stream operators and return `&mut Self` for chaining.
#[derive(Debug, Clone)]
pub struct Page {
    width: f64,
    height: f64,
    ops: Vec<u8>,
    fill_alphas: Vec<f64>,
    fonts: BTreeSet<BuiltinFont>,
}

impl Page {
    pub fn new(width: f64, height: f64) -> Self {
        Page {
            width,
            height,
            ops: Vec::new(),
            fill_alphas: Vec::new(),
            fonts: BTreeSet::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The content stream built so far.
    pub fn content(&self) -> &[u8] {
        &self.ops
    }

    /// Fonts referenced by text placed on this page.
    pub fn fonts(&self) -> &BTreeSet<BuiltinFont> {
        &self.fonts
    }

    /// Distinct fill opacities, in the order their graphics states were
    /// named (`GS0`, `GS1`, ...).
    pub fn fill_alphas(&self) -> &[f64] {
        &self.fill_alphas
    }

    fn op(&mut self, s: &str) -> &mut Self {
        self.ops.extend_from_slice(s.as_bytes());
        self.ops.push(b'\n');
        self
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.op("q")
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.op("Q")
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        let s = format!("{} rg", color_components(color));
        self.op(&s)
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        let s = format!("{} RG", color_components(color));
        self.op(&s)
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        let s = format!("{} w", format_number(width));
        self.op(&s)
    }

    /// Set the opacity used by later fills. Registers an ExtGState
    /// resource per distinct value.
    pub fn set_fill_alpha(&mut self, alpha: f64) -> &mut Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let index = match self.fill_alphas.iter().position(|&a| a == alpha) {
            Some(i) => i,
            None => {
                self.fill_alphas.push(alpha);
                self.fill_alphas.len() - 1
            }
        };
        let s = format!("/GS{} gs", index);
        self.op(&s)
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        let s = format!(
            "{} {} {} {} re",
            format_number(x),
            format_number(y),
            format_number(width),
            format_number(height),
        );
        self.op(&s)
    }

    /// Rectangle path with quarter-circle corners. `(x, y)` is the
    /// bottom-left corner. The radius is limited to half the shorter side.
    pub fn rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> &mut Self {
        let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
        if r == 0.0 {
            return self.rect(x, y, width, height);
        }
        let k = r * KAPPA;
        let (right, top) = (x + width, y + height);
        self.move_to(x + r, y)
            .line_to(right - r, y)
            .curve_to(right - r + k, y, right, y + r - k, right, y + r)
            .line_to(right, top - r)
            .curve_to(right, top - r + k, right - r + k, top, right - r, top)
            .line_to(x + r, top)
            .curve_to(x + r - k, top, x, top - r + k, x, top - r)
            .line_to(x, y + r)
            .curve_to(x, y + r - k, x + r - k, y, x + r, y)
            .close_path()
    }

    /// Circle path centered on `(cx, cy)`.
    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> &mut Self {
        let k = radius * KAPPA;
        self.move_to(cx + radius, cy)
            .curve_to(cx + radius, cy + k, cx + k, cy + radius, cx, cy + radius)
            .curve_to(cx - k, cy + radius, cx - radius, cy + k, cx - radius, cy)
            .curve_to(cx - radius, cy - k, cx - k, cy - radius, cx, cy - radius)
            .curve_to(cx + k, cy - radius, cx + radius, cy - k, cx + radius, cy)
            .close_path()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        let s = format!("{} {} m", format_number(x), format_number(y));
        self.op(&s)
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        let s = format!("{} {} l", format_number(x), format_number(y));
        self.op(&s)
    }

    pub fn curve_to(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
    ) -> &mut Self {
        let s = [x1, y1, x2, y2, x3, y3]
            .iter()
            .map(|v| format_number(*v))
            .collect::<Vec<_>>()
            .join(" ");
        self.op(&format!("{} c", s))
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.op("h")
    }

    pub fn fill(&mut self) -> &mut Self {
        self.op("f")
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.op("S")
    }

    pub fn fill_and_stroke(&mut self) -> &mut Self {
        self.op("B")
    }

    /// Show `text` with its baseline starting at `(x, y)`. The fill color
    /// change is scoped to this call.
    pub fn place_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> &mut Self {
        self.fonts.insert(style.font);
        let mut block = format!(
            "q\nBT\n/{} {} Tf\n{} rg\n",
            style.font.resource_name(),
            format_number(style.font_size),
            color_components(style.color),
        );
        if style.char_spacing != 0.0 {
            block.push_str(&format!("{} Tc\n", format_number(style.char_spacing)));
        }
        block.push_str(&format!("{} {} Td\n(", format_number(x), format_number(y)));
        self.ops.extend_from_slice(block.as_bytes());
        escape_string_into(&encode_win_ansi(text), &mut self.ops);
        self.ops.extend_from_slice(b") Tj\nET\nQ\n");
        self
    }
}

fn color_components(color: Color) -> String {
    format!(
        "{} {} {}",
        format_number(color.r),
        format_number(color.g),
        format_number(color.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ops(page: &Page) -> String {
        String::from_utf8_lossy(page.content()).into_owned()
    }

    #[test]
    fn colors_and_line_width() {
        let mut page = Page::new(100.0, 100.0);
        page.set_fill_color(Color::rgb(0.0, 0.5, 1.0))
            .set_stroke_color(Color::rgb(1.0, 0.0, 0.0))
            .set_line_width(1.5);
        assert_eq!(ops(&page), "0 0.5 1 rg\n1 0 0 RG\n1.5 w\n");
    }

    #[test]
    fn alpha_states_are_deduplicated() {
        let mut page = Page::new(100.0, 100.0);
        page.set_fill_alpha(0.9).set_fill_alpha(1.0).set_fill_alpha(0.9);
        assert_eq!(page.fill_alphas(), &[0.9, 1.0]);
        assert_eq!(ops(&page), "/GS0 gs\n/GS1 gs\n/GS0 gs\n");
    }

    #[test]
    fn zero_radius_is_plain_rect() {
        let mut page = Page::new(100.0, 100.0);
        page.rounded_rect(10.0, 20.0, 30.0, 40.0, 0.0);
        assert_eq!(ops(&page), "10 20 30 40 re\n");
    }

    #[test]
    fn rounded_rect_has_four_corners() {
        let mut page = Page::new(100.0, 100.0);
        page.rounded_rect(0.0, 0.0, 50.0, 20.0, 4.0);
        let out = ops(&page);
        assert!(out.starts_with("4 0 m\n"));
        assert_eq!(out.matches(" c\n").count(), 4);
        assert!(out.ends_with("h\n"));
    }

    #[test]
    fn circle_is_closed_curve() {
        let mut page = Page::new(100.0, 100.0);
        page.circle(50.0, 50.0, 6.0).fill();
        let out = ops(&page);
        assert!(out.starts_with("56 50 m\n"));
        assert_eq!(out.matches(" c\n").count(), 4);
        assert!(out.ends_with("h\nf\n"));
    }

    #[test]
    fn text_block_sets_font_color_and_spacing() {
        let mut page = Page::new(100.0, 100.0);
        let style = TextStyle {
            font: BuiltinFont::HelveticaBold,
            font_size: 24.0,
            color: Color::rgb(1.0, 1.0, 1.0),
            char_spacing: 2.0,
        };
        page.place_text("HTTP (Errors)", 10.0, 20.5, &style);
        assert_eq!(
            ops(&page),
            "q\nBT\n/F2 24 Tf\n1 1 1 rg\n2 Tc\n10 20.5 Td\n(HTTP \\(Errors\\)) Tj\nET\nQ\n"
        );
        assert!(page.fonts().contains(&BuiltinFont::HelveticaBold));
    }
}
