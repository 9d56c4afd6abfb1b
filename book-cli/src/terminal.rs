use book_core::entry::Field;
use book_core::layout::PageDescriptor;
use book_core::style::{self, palette, Rgb};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

pub const DEFAULT_WIDTH: usize = 72;
const MIN_WIDTH: usize = 40;
const DOTS: &str = "\u{25cf}";

/// Text rendering of a page: heading, bordered panel with dots and badge,
/// five labeled rows and footer, in the palette's 24-bit colors.
pub struct Terminal {
    color: bool,
    width: usize,
}

/// A run of text on one line with an optional color.
struct Span {
    text: String,
    color: Option<Rgb>,
    bold: bool,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            color: None,
            bold: false,
        }
    }

    fn colored(text: impl Into<String>, color: Rgb) -> Self {
        Span {
            text: text.into(),
            color: Some(color),
            bold: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }
}

impl Terminal {
    pub fn new(color: bool, width: usize) -> Self {
        Terminal {
            color,
            width: width.max(MIN_WIDTH),
        }
    }

    fn paint(&self, span: &Span) -> String {
        match span.color {
            Some(Rgb(r, g, b)) if self.color => {
                if span.bold {
                    span.text.truecolor(r, g, b).bold().to_string()
                } else {
                    span.text.truecolor(r, g, b).to_string()
                }
            }
            _ => span.text.clone(),
        }
    }

    fn line(&self, spans: &[Span]) -> String {
        spans.iter().map(|s| self.paint(s)).collect()
    }

    fn centered(&self, span: Span) -> String {
        let pad = self.width.saturating_sub(span.len()) / 2;
        format!("{}{}", " ".repeat(pad), self.paint(&span))
    }

    /// One panel line: border, `spans` left-aligned, filler, border.
    fn panel_line(&self, spans: Vec<Span>) -> String {
        let inner = self.width - 4;
        let used: usize = spans.iter().map(Span::len).sum();
        let mut all = vec![Span::colored("| ", palette::PANEL_BORDER)];
        all.extend(spans);
        all.push(Span::plain(" ".repeat(inner.saturating_sub(used))));
        all.push(Span::colored(" |", palette::PANEL_BORDER));
        self.line(&all)
    }

    fn border(&self) -> String {
        let edge = format!("+{}+", "-".repeat(self.width - 2));
        self.paint(&Span::colored(edge, palette::PANEL_BORDER))
    }

    /// Render one page, ending with a newline.
    pub fn page(&self, page: &PageDescriptor<'_>) -> String {
        let entry = page.entry;
        let inner = self.width - 4;
        let label_width = Field::ALL
            .iter()
            .map(|f| f.label().len())
            .max()
            .unwrap_or(0)
            + 1;
        let value_width = inner.saturating_sub(label_width).max(1);

        let mut lines = Vec::new();
        lines.push(self.centered(
            Span::colored(style::HEADING_TEXT, palette::HEADING).bold(),
        ));
        lines.push(String::new());
        lines.push(self.border());

        let mut top = Vec::new();
        for (i, color) in palette::DOTS.iter().enumerate() {
            if i > 0 {
                top.push(Span::plain(" "));
            }
            top.push(Span::colored(DOTS, *color));
        }
        let code: String = entry.error_code.chars().take(inner.saturating_sub(6)).collect();
        let gap = inner.saturating_sub(5 + code.chars().count());
        top.push(Span::plain(" ".repeat(gap)));
        top.push(Span::colored(code, palette::BADGE).bold());
        lines.push(self.panel_line(top));
        lines.push(self.panel_line(Vec::new()));

        for (field, value) in entry.fields() {
            if field.is_long_text() {
                lines.push(self.panel_line(Vec::new()));
            }
            for (i, text) in wrap(value, value_width).into_iter().enumerate() {
                let label = if i == 0 { field.label() } else { "" };
                lines.push(self.panel_line(vec![
                    Span::colored(format!("{:<width$}", label, width = label_width), palette::LABEL)
                        .bold(),
                    Span::colored(text, palette::VALUE),
                ]));
            }
        }

        lines.push(self.panel_line(Vec::new()));
        lines.push(self.border());
        lines.push(String::new());
        lines.push(self.centered(Span::colored(
            format!("Page {}", page.page_number),
            palette::FOOTER,
        )));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// The "Page X of N" controls line.
    pub fn controls(&self, label: &str, has_previous: bool, has_next: bool) -> String {
        let prev = if has_previous { "[p] Previous" } else { "            " };
        let next = if has_next { "[n] Next" } else { "" };
        format!("{}   {}   {}", prev, label, next).trim_end().to_string()
    }

    pub fn placeholder(&self) -> String {
        self.paint(&Span::colored(crate::cmd::EMPTY_MESSAGE, palette::FOOTER))
    }
}

/// Colors are used unless disabled by flag or `NO_COLOR`, or stdout is
/// not a terminal.
pub fn use_color(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Wrap `text` to `width` columns at spaces, keeping embedded newlines.
/// Words longer than a line are split. Always yields at least one line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            if current_len > 0 && current_len + 1 + chars.len() <= width {
                current.push(' ');
                current.extend(&chars);
                current_len += 1 + chars.len();
                continue;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
            }
            while chars.len() > width {
                let rest = chars.split_off(width);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }
            current_len = chars.len();
            current = chars.into_iter().collect();
        }
        lines.push(current);
    }
    lines
}
