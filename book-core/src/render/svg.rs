use std::fmt::{self, Write};

use book_pdf::BuiltinFont;
use book_pdf::objects::format_number;

use crate::layout::{PageLayout, Primitive, TextRun};

/// Render a page as a standalone SVG document, in points.
pub fn render_svg(layout: &PageLayout) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails.
    let _ = write_svg(&mut out, layout);
    out
}

/// Write the SVG document for `layout` to `out`.
pub fn write_svg<W: Write>(out: &mut W, layout: &PageLayout) -> fmt::Result {
    let (w, h) = (format_number(layout.width), format_number(layout.height));
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}pt" height="{h}pt" viewBox="0 0 {w} {h}">"#
    )?;
    for primitive in &layout.primitives {
        match primitive {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                radius,
                fill,
                stroke,
            } => {
                write!(
                    out,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}""#,
                    format_number(*x),
                    format_number(*y),
                    format_number(*width),
                    format_number(*height),
                )?;
                if *radius > 0.0 {
                    write!(out, r#" rx="{}""#, format_number(*radius))?;
                }
                match fill {
                    Some(fill) => {
                        write!(out, r#" fill="{}""#, fill.color.hex())?;
                        if fill.opacity < 1.0 {
                            write!(out, r#" fill-opacity="{}""#, format_number(fill.opacity))?;
                        }
                    }
                    None => out.write_str(r#" fill="none""#)?,
                }
                if let Some(stroke) = stroke {
                    write!(
                        out,
                        r#" stroke="{}" stroke-width="{}""#,
                        stroke.color.hex(),
                        format_number(stroke.width)
                    )?;
                }
                out.write_str("/>\n")?;
            }
            Primitive::Circle {
                cx,
                cy,
                radius,
                fill,
            } => {
                writeln!(
                    out,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    format_number(*cx),
                    format_number(*cy),
                    format_number(*radius),
                    fill.hex()
                )?;
            }
            Primitive::Text(run) => write_text(out, run)?,
        }
    }
    out.write_str("</svg>\n")
}

fn write_text<W: Write>(out: &mut W, run: &TextRun) -> fmt::Result {
    let weight = match run.font {
        BuiltinFont::HelveticaBold => "bold",
        BuiltinFont::Helvetica => "normal",
    };
    write!(
        out,
        r#"  <text x="{}" y="{}" font-family="Helvetica, Arial, sans-serif" font-size="{}" font-weight="{}" fill="{}""#,
        format_number(run.x),
        format_number(run.y),
        format_number(run.size),
        weight,
        run.color.hex(),
    )?;
    if run.letter_spacing != 0.0 {
        write!(out, r#" letter-spacing="{}""#, format_number(run.letter_spacing))?;
    }
    writeln!(out, r#" xml:space="preserve">{}</text>"#, escape(&run.text))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
