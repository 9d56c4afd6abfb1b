use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use book_pdf::{Page, PdfDocument, TextStyle};
use tracing::{debug, info, warn};

use crate::entry::Document;
use crate::error::ExportError;
use crate::layout::{describe_document, layout_page, LayoutConfig, PageLayout, Primitive};
use crate::settings::TitleSize;

pub const DEFAULT_FILENAME: &str = "http-errors-reference.pdf";
pub const DOCUMENT_TITLE: &str = "HTTP Errors Reference";
pub const CREATOR: &str = "http-error-book";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub title_size: TitleSize,
    pub layout: LayoutConfig,
    /// Flate-compress page content streams.
    pub compress: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            title_size: TitleSize::default(),
            layout: LayoutConfig::default(),
            compress: true,
        }
    }
}

/// What a render produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub pages: usize,
    /// One-based numbers of pages whose content was cut off.
    pub truncated_pages: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, pages: usize },
    /// The document was empty; nothing was written.
    Skipped,
}

/// Encode `document` as a PDF into `writer`, one page per record, drawn
/// from the same layout as the preview.
pub fn render_pdf<W: Write>(
    writer: W,
    document: &Document,
    options: &ExportOptions,
) -> Result<RenderReport, ExportError> {
    let mut pdf = PdfDocument::new(writer)?;
    pdf.set_info("Title", DOCUMENT_TITLE)
        .set_info("Creator", CREATOR)
        .set_compression(options.compress);

    let mut report = RenderReport::default();
    for descriptor in describe_document(document, options.title_size) {
        let layout = layout_page(&descriptor, &options.layout);
        if layout.truncated {
            warn!(
                page = descriptor.page_number,
                error_code = %descriptor.entry.error_code,
                "entry does not fit the panel; content shortened"
            );
            report.truncated_pages.push(descriptor.page_number);
        }
        pdf.add_page(draw_layout(&layout))?;
        report.pages += 1;
    }
    pdf.finish()?;

    debug!(pages = report.pages, "rendered PDF");
    Ok(report)
}

/// Export `document` to `dest`.
///
/// The PDF is written to a temporary file next to `dest` and moved into
/// place only once complete, so a failed export leaves no file behind.
pub fn export_to_path(
    document: &Document,
    dest: &Path,
    options: &ExportOptions,
) -> Result<ExportOutcome, ExportError> {
    if document.is_empty() {
        info!("document is empty; nothing to export");
        return Ok(ExportOutcome::Skipped);
    }

    let persist_error = |source| ExportError::Persist {
        path: dest.to_path_buf(),
        source,
    };
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".http-errors-")
        .suffix(".pdf.part")
        .tempfile_in(dir)
        .map_err(persist_error)?;

    let report = {
        let mut out = BufWriter::new(tmp.as_file_mut());
        let report = render_pdf(&mut out, document, options)?;
        out.flush()?;
        report
    };
    tmp.persist(dest).map_err(|e| persist_error(e.error))?;

    info!(
        path = %dest.display(),
        pages = report.pages,
        truncated = report.truncated_pages.len(),
        "exported PDF"
    );
    Ok(ExportOutcome::Written {
        path: dest.to_path_buf(),
        pages: report.pages,
    })
}

/// Convert a top-left-origin layout into a PDF page.
pub fn draw_layout(layout: &PageLayout) -> Page {
    let height = layout.height;
    let mut page = Page::new(layout.width, height);

    for primitive in &layout.primitives {
        match primitive {
            Primitive::Rect {
                x,
                y,
                width,
                height: h,
                radius,
                fill,
                stroke,
            } => {
                page.save_state();
                if let Some(fill) = fill {
                    if fill.opacity < 1.0 {
                        page.set_fill_alpha(fill.opacity);
                    }
                    page.set_fill_color(fill.color.to_pdf());
                }
                if let Some(stroke) = stroke {
                    page.set_stroke_color(stroke.color.to_pdf())
                        .set_line_width(stroke.width);
                }
                page.rounded_rect(*x, height - y - h, *width, *h, *radius);
                match (fill.is_some(), stroke.is_some()) {
                    (true, true) => page.fill_and_stroke(),
                    (true, false) => page.fill(),
                    (false, true) => page.stroke(),
                    (false, false) => &mut page,
                };
                page.restore_state();
            }
            Primitive::Circle {
                cx,
                cy,
                radius,
                fill,
            } => {
                page.save_state()
                    .set_fill_color(fill.to_pdf())
                    .circle(*cx, height - cy, *radius)
                    .fill()
                    .restore_state();
            }
            Primitive::Text(run) => {
                let style = TextStyle {
                    font: run.font,
                    font_size: run.size,
                    color: run.color.to_pdf(),
                    char_spacing: run.letter_spacing,
                };
                page.place_text(&run.text, run.x, height - run.y, &style);
            }
        }
    }
    page
}
