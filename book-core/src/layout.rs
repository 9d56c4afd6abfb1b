use book_pdf::{BuiltinFont, FontMetrics};

use crate::entry::{Document, EntryRecord, Field};
use crate::settings::TitleSize;
use crate::style::{self, palette, PageSize, Rgb};

/// Everything needed to draw one page. The title size travels with the
/// descriptor; the layout takes it from here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDescriptor<'a> {
    pub entry: &'a EntryRecord,
    /// One-based.
    pub page_number: usize,
    pub title_size: TitleSize,
}

/// One descriptor per record, in document order.
pub fn describe_document(document: &Document, title_size: TitleSize) -> Vec<PageDescriptor<'_>> {
    document
        .iter()
        .enumerate()
        .map(|(i, entry)| PageDescriptor {
            entry,
            page_number: i + 1,
            title_size,
        })
        .collect()
}

/// Settings that apply to every page of a render.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutConfig {
    pub page: PageSize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Rgb,
    pub opacity: f64,
}

impl Fill {
    pub fn solid(color: Rgb) -> Self {
        Fill { color, opacity: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
}

/// What a text run is for. Back ends that do not draw pixels (the
/// terminal) use this to reassemble the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Heading,
    Badge,
    Label(Field),
    Value(Field),
    Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    /// Baseline.
    pub y: f64,
    pub font: BuiltinFont,
    pub size: f64,
    pub color: Rgb,
    pub letter_spacing: f64,
    pub role: TextRole,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// `(x, y)` is the top-left corner.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Rgb,
    },
    Text(TextRun),
}

/// A page resolved into primitives, in painting order.
///
/// The origin is the top-left corner of the page with y growing
/// downwards. Text positions are baselines.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
    /// Some value lines did not fit inside the panel and were dropped, or
    /// the badge was shortened.
    pub truncated: bool,
}

impl PageLayout {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(run) => Some(run),
            _ => None,
        })
    }

    /// Text runs with the given role, top to bottom.
    pub fn texts_with_role(&self, role: TextRole) -> Vec<&TextRun> {
        self.text_runs().filter(|run| run.role == role).collect()
    }
}

/// Panel placement for a page of the given size and title size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PanelFrame {
    pub fn locate(page: PageSize, title_size: TitleSize) -> Self {
        let content_top = style::PAGE_PADDING + title_size.points() + style::HEADING_GAP;
        let footer_top = page.height - style::FOOTER_MARGIN - style::FOOTER_SIZE;
        let free = footer_top - content_top - style::PANEL_HEIGHT;
        PanelFrame {
            x: (page.width - style::PANEL_WIDTH) / 2.0,
            y: content_top + (free / 2.0).max(0.0),
            width: style::PANEL_WIDTH,
            height: style::PANEL_HEIGHT,
        }
    }

    fn inner(&self) -> (f64, f64, f64, f64) {
        let p = style::PANEL_PADDING;
        (self.x + p, self.y + p, self.width - 2.0 * p, self.height - 2.0 * p)
    }
}

/// Vertical placement of a line of text inside a line box starting at
/// `top`.
fn baseline(top: f64, line_height: f64, size: f64) -> f64 {
    top + (line_height - size) / 2.0 + FontMetrics::ascent(size)
}

fn text(
    role: TextRole,
    text: &str,
    x: f64,
    y: f64,
    font: BuiltinFont,
    size: f64,
    color: Rgb,
) -> Primitive {
    Primitive::Text(TextRun {
        text: text.to_string(),
        x,
        y,
        font,
        size,
        color,
        letter_spacing: 0.0,
        role,
    })
}

/// Resolve one page.
pub fn layout_page(page: &PageDescriptor<'_>, config: &LayoutConfig) -> PageLayout {
    let PageSize { width, height } = config.page;
    let title_size = page.title_size.points();
    let mut primitives = Vec::new();

    primitives.push(Primitive::Rect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        radius: 0.0,
        fill: Some(Fill::solid(palette::PAGE_BACKGROUND)),
        stroke: None,
    });

    let heading_width = FontMetrics::measure_spaced(
        style::HEADING_TEXT,
        style::HEADING_FONT,
        title_size,
        style::HEADING_LETTER_SPACING,
    );
    primitives.push(Primitive::Text(TextRun {
        text: style::HEADING_TEXT.to_string(),
        x: (width - heading_width) / 2.0,
        y: style::PAGE_PADDING + FontMetrics::ascent(title_size),
        font: style::HEADING_FONT,
        size: title_size,
        color: palette::HEADING,
        letter_spacing: style::HEADING_LETTER_SPACING,
        role: TextRole::Heading,
    }));

    let panel = PanelFrame::locate(config.page, page.title_size);
    primitives.push(Primitive::Rect {
        x: panel.x,
        y: panel.y,
        width: panel.width,
        height: panel.height,
        radius: style::PANEL_RADIUS,
        fill: Some(Fill {
            color: palette::PANEL_FILL,
            opacity: style::PANEL_OPACITY,
        }),
        stroke: Some(Stroke {
            color: palette::PANEL_BORDER,
            width: style::PANEL_BORDER_WIDTH,
        }),
    });

    let radius = style::DOT_DIAMETER / 2.0;
    for (i, color) in palette::DOTS.iter().enumerate() {
        primitives.push(Primitive::Circle {
            cx: panel.x + style::DOT_INSET + radius + i as f64 * (style::DOT_DIAMETER + style::DOT_GAP),
            cy: panel.y + style::DOT_INSET + radius,
            radius,
            fill: *color,
        });
    }

    let dots_right = panel.x
        + style::DOT_INSET
        + palette::DOTS.len() as f64 * (style::DOT_DIAMETER + style::DOT_GAP);
    let badge_right = panel.x + panel.width - style::BADGE_INSET;
    let (code, badge_truncated) = fit_text(
        &page.entry.error_code,
        style::BADGE_FONT,
        style::BADGE_SIZE,
        badge_right - dots_right,
    );
    if !code.is_empty() {
        let w = FontMetrics::measure_text(&code, style::BADGE_FONT, style::BADGE_SIZE);
        primitives.push(text(
            TextRole::Badge,
            &code,
            badge_right - w,
            panel.y + style::BADGE_INSET + FontMetrics::ascent(style::BADGE_SIZE),
            style::BADGE_FONT,
            style::BADGE_SIZE,
            palette::BADGE,
        ));
    }

    let truncated = layout_rows(page.entry, &panel, &mut primitives) || badge_truncated;

    let footer = format!("Page {}", page.page_number);
    let footer_width = FontMetrics::measure_text(&footer, style::FOOTER_FONT, style::FOOTER_SIZE);
    let footer_top = height - style::FOOTER_MARGIN - style::FOOTER_SIZE;
    primitives.push(text(
        TextRole::Footer,
        &footer,
        (width - footer_width) / 2.0,
        footer_top + FontMetrics::ascent(style::FOOTER_SIZE),
        style::FOOTER_FONT,
        style::FOOTER_SIZE,
        palette::FOOTER,
    ));

    PageLayout {
        width,
        height,
        primitives,
        truncated,
    }
}

struct RowPlan {
    field: Field,
    lines: Vec<String>,
    line_height: f64,
    offset: f64,
}

impl RowPlan {
    fn height(&self) -> f64 {
        let label = style::BODY_SIZE * style::LINE_HEIGHT;
        let value = self.offset + self.lines.len() as f64 * self.line_height;
        label.max(value)
    }
}

/// Width of the label column: every label gets the same column so values
/// line up.
pub fn label_column_width() -> f64 {
    Field::ALL
        .iter()
        .map(|f| FontMetrics::measure_text(f.label(), style::LABEL_FONT, style::BODY_SIZE))
        .fold(style::LABEL_MIN_WIDTH, f64::max)
}

/// Lay out the five labeled rows inside the panel. Returns whether any
/// line had to be dropped.
fn layout_rows(entry: &EntryRecord, panel: &PanelFrame, out: &mut Vec<Primitive>) -> bool {
    let (ix, iy, iw, ih) = panel.inner();
    let label_width = label_column_width();
    let value_x = ix + label_width + style::LABEL_GAP;
    let value_width = iw - label_width - style::LABEL_GAP;

    let rows: Vec<RowPlan> = entry
        .fields()
        .map(|(field, value)| {
            let (line_height, offset) = if field.is_long_text() {
                (style::BODY_SIZE * style::LONG_TEXT_LINE_HEIGHT, style::LONG_TEXT_OFFSET)
            } else {
                (style::BODY_SIZE * style::LINE_HEIGHT, 0.0)
            };
            RowPlan {
                field,
                lines: wrap_text(value, style::VALUE_FONT, style::BODY_SIZE, value_width),
                line_height,
                offset,
            }
        })
        .collect();

    let block_height = style::BLOCK_TOP_PADDING
        + rows.iter().map(RowPlan::height).sum::<f64>()
        + style::ROW_GAP * (rows.len().saturating_sub(1)) as f64;
    let bottom = iy + ih;
    let mut top = iy + ((ih - block_height) / 2.0).max(0.0) + style::BLOCK_TOP_PADDING;
    let mut truncated = false;
    let label_line = style::BODY_SIZE * style::LINE_HEIGHT;

    for row in &rows {
        if top + label_line > bottom {
            truncated |= row.lines.iter().any(|l| !l.is_empty());
            break;
        }
        out.push(text(
            TextRole::Label(row.field),
            row.field.label(),
            ix,
            baseline(top, label_line, style::BODY_SIZE),
            style::LABEL_FONT,
            style::BODY_SIZE,
            palette::LABEL,
        ));
        let mut line_top = top + row.offset;
        for line in &row.lines {
            if line_top + row.line_height > bottom {
                truncated = true;
                break;
            }
            if !line.is_empty() {
                out.push(text(
                    TextRole::Value(row.field),
                    line,
                    value_x,
                    baseline(line_top, row.line_height, style::BODY_SIZE),
                    style::VALUE_FONT,
                    style::BODY_SIZE,
                    palette::VALUE,
                ));
            }
            line_top += row.line_height;
        }
        top += row.height() + style::ROW_GAP;
    }
    truncated
}

const ELLIPSIS: &str = "...";

/// Shorten `text` with a trailing ellipsis until it is no wider than
/// `max_width`. The flag is set when anything was cut.
pub fn fit_text(text: &str, font: BuiltinFont, size: f64, max_width: f64) -> (String, bool) {
    let width = |s: &str| FontMetrics::measure_text(s, font, size);
    if width(text) <= max_width {
        return (text.to_string(), false);
    }
    let mut kept: String = text.to_string();
    while kept.pop().is_some() {
        let candidate = format!("{}{}", kept.trim_end(), ELLIPSIS);
        if width(&candidate) <= max_width {
            return (candidate, true);
        }
    }
    (String::new(), true)
}

/// Break `text` into lines no wider than `max_width`.
///
/// Embedded newlines start a new line. Words are kept whole where they
/// fit; a word wider than the column is split between characters. Runs
/// of spaces collapse to one. Always returns at least one line.
pub fn wrap_text(text: &str, font: BuiltinFont, size: f64, max_width: f64) -> Vec<String> {
    let width = |s: &str| FontMetrics::measure_text(s, font, size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if width(word) > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = break_word(word, max_width, &width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                continue;
            }
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if width(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    lines
}

fn break_word(word: &str, max_width: f64, width: &dyn Fn(&str) -> f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if width(&piece) > max_width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn measure(s: &str) -> f64 {
        FontMetrics::measure_text(s, BuiltinFont::Helvetica, 14.0)
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(
            wrap_text("Not Found", BuiltinFont::Helvetica, 14.0, 360.0),
            vec!["Not Found"]
        );
    }

    #[test]
    fn wrap_honors_newlines_and_blank_lines() {
        assert_eq!(
            wrap_text("one\n\ntwo", BuiltinFont::Helvetica, 14.0, 360.0),
            vec!["one", "", "two"]
        );
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("", BuiltinFont::Helvetica, 14.0, 100.0), vec![""]);
    }

    #[test]
    fn wrap_splits_at_word_boundaries() {
        let lines = wrap_text(
            "the quick brown fox jumps over the lazy dog",
            BuiltinFont::Helvetica,
            14.0,
            100.0,
        );
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(line) <= 100.0, "{line:?} too wide");
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn long_word_breaks_by_character() {
        let word = "x".repeat(80);
        let lines = wrap_text(&word, BuiltinFont::Helvetica, 14.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(measure(line) <= 100.0);
        }
    }

    #[test]
    fn fit_text_leaves_short_text_alone() {
        assert_eq!(
            fit_text("404", BuiltinFont::HelveticaBold, 18.0, 400.0),
            ("404".to_string(), false)
        );
    }

    #[test]
    fn fit_text_ends_with_ellipsis() {
        let (fitted, cut) = fit_text(&"W".repeat(50), BuiltinFont::HelveticaBold, 18.0, 120.0);
        assert!(cut);
        assert!(fitted.ends_with("..."));
        assert!(FontMetrics::measure_text(&fitted, BuiltinFont::HelveticaBold, 18.0) <= 120.0);
    }

    #[test]
    fn fit_text_gives_up_when_nothing_fits() {
        assert_eq!(
            fit_text("404", BuiltinFont::HelveticaBold, 18.0, 5.0),
            (String::new(), true)
        );
    }

    #[test]
    fn label_column_uses_minimum_width() {
        // "Error Code:" in bold 14 is just under the minimum.
        assert_eq!(label_column_width(), style::LABEL_MIN_WIDTH);
    }

    #[test]
    fn panel_is_centered_horizontally() {
        let frame = PanelFrame::locate(PageSize::default(), TitleSize::default());
        assert_eq!(frame.x, (700.0 - 512.0) / 2.0);
        assert!(frame.y >= style::PAGE_PADDING + 24.0 + style::HEADING_GAP);
    }
}
