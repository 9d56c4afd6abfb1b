use std::fs;
use std::io::Read;

use book_core::export::{ExportOptions, ExportOutcome};
use book_core::{export_to_path, render_pdf, Document, EntryRecord, TitleSize};
use flate2::read::ZlibDecoder;

fn entry(code: &str, meaning: &str) -> EntryRecord {
    EntryRecord {
        error_code: code.into(),
        category: "Client Error".into(),
        meaning: meaning.into(),
        details: "Details here.".into(),
        fix: "Try again.".into(),
    }
}

fn sample() -> Document {
    vec![
        entry("400", "Bad Request"),
        entry("404", "Not Found"),
        entry("404", "Not Found"),
    ]
    .into_iter()
    .collect()
}

fn uncompressed() -> ExportOptions {
    ExportOptions {
        compress: false,
        ..ExportOptions::default()
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn one_page_per_record_with_footer() {
    let mut out = Vec::new();
    let report = render_pdf(&mut out, &sample(), &uncompressed()).unwrap();
    assert_eq!(report.pages, 3);
    assert!(report.truncated_pages.is_empty());

    assert!(contains(&out, b"/Count 3"));
    assert_eq!(count(&out, b"/Type /Page /Parent"), 3);
    assert!(contains(&out, b"(Page 1) Tj"));
    assert!(contains(&out, b"(Page 3) Tj"));
    assert!(contains(&out, b"(HTTP Errors) Tj"));
    assert!(contains(&out, b"(Bad Request) Tj"));
    assert!(contains(&out, b"/Title (HTTP Errors Reference)"));
}

#[test]
fn title_size_reaches_heading_font() {
    let options = ExportOptions {
        title_size: TitleSize::new(36).unwrap(),
        ..uncompressed()
    };
    let mut out = Vec::new();
    render_pdf(&mut out, &sample(), &options).unwrap();
    assert!(contains(&out, b"/F2 36 Tf"));
}

#[test]
fn panel_uses_translucent_fill() {
    let mut out = Vec::new();
    render_pdf(&mut out, &sample(), &uncompressed()).unwrap();
    assert!(contains(&out, b"/ca 0.9"));
    assert!(contains(&out, b"/GS0 gs"));
}

#[test]
fn compressed_streams_inflate_to_page_content() {
    let mut out = Vec::new();
    render_pdf(&mut out, &sample(), &ExportOptions::default()).unwrap();
    assert!(contains(&out, b"/Filter /FlateDecode"));
    assert!(!contains(&out, b"(Page 1) Tj"));

    let start = out
        .windows(7)
        .position(|w| w == b"stream\n")
        .expect("a stream");
    let body = &out[start + 7..];
    let end = body
        .windows(10)
        .position(|w| w == b"\nendstream")
        .expect("stream end");
    let mut content = Vec::new();
    ZlibDecoder::new(&body[..end])
        .read_to_end(&mut content)
        .unwrap();
    assert!(contains(&content, b"(Page 1) Tj"));
}

#[test]
fn export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("book.pdf");
    let outcome = export_to_path(&sample(), &dest, &ExportOptions::default()).unwrap();
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: dest.clone(),
            pages: 3
        }
    );
    let bytes = fs::read(&dest).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path() != dest)
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn empty_document_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("book.pdf");
    let outcome = export_to_path(&Document::empty(), &dest, &ExportOptions::default()).unwrap();
    assert_eq!(outcome, ExportOutcome::Skipped);
    assert!(!dest.exists());
}

#[test]
fn failed_export_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("missing-dir").join("book.pdf");
    assert!(export_to_path(&sample(), &dest, &ExportOptions::default()).is_err());
    assert!(!dest.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn overlong_entries_are_reported() {
    let mut record = entry("431", "Request Header Fields Too Large");
    record.fix = "retry ".repeat(800);
    let doc = Document::new(vec![entry("400", "Bad Request"), record]);
    let mut out = Vec::new();
    let report = render_pdf(&mut out, &doc, &uncompressed()).unwrap();
    assert_eq!(report.truncated_pages, vec![2]);
}

#[test]
fn overlong_badge_is_reported_and_kept_on_page() {
    let doc = Document::new(vec![
        entry("ERR_UPSTREAM_CONNECTION_TIMED_OUT_WHILE_WAITING_FOR_GATEWAY_RESPONSE", "Timeout"),
        entry("404", "Not Found"),
    ]);
    let mut out = Vec::new();
    let report = render_pdf(&mut out, &doc, &uncompressed()).unwrap();
    assert_eq!(report.truncated_pages, vec![1]);
    assert!(contains(&out, b"(ERR_UPSTREAM"));
    assert!(contains(&out, b"...) Tj"));
}
