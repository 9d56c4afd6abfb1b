use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const CSV: &str = "\
Error Code,Category,Meaning,Details,solution
400,Client Error,Bad Request,Malformed syntax.,Fix the request body.
404,Client Error,Not Found,Nothing at this path.,Check the URL.
";

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_http-error-book"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("run http-error-book")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn setup() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("errors.csv"), CSV).unwrap();
    dir
}

#[test]
fn inspect_prints_book_stats() {
    let dir = setup();
    let output = run(dir.path(), &["inspect", "errors.csv"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Book Stats"));
    assert!(text.contains("Total Pages: 2"));
    assert!(text.contains(" KB"));
    assert!(text.contains("Error Code, Category, Meaning, Details, solution"));
}

#[test]
fn export_uses_default_file_name() {
    let dir = setup();
    let output = run(dir.path(), &["export", "errors.csv"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("Wrote 2 pages"));
    let pdf = fs::read(dir.path().join("http-errors-reference.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn export_honors_config_and_flags() {
    let dir = setup();
    fs::write(
        dir.path().join("book.toml"),
        "output = \"from-config.pdf\"\ncompress = false\n",
    )
    .unwrap();
    let output = run(dir.path(), &["export", "errors.csv", "--preset", "large"]);
    assert!(output.status.success());
    let pdf = fs::read(dir.path().join("from-config.pdf")).unwrap();
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/F2 28 Tf"));
    assert!(text.contains("(Page 2) Tj"));
}

#[test]
fn export_rejects_bad_title_size() {
    let dir = setup();
    let output = run(dir.path(), &["export", "errors.csv", "--title-size", "41"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("http-errors-reference.pdf").exists());
}

#[test]
fn preview_prints_requested_page() {
    let dir = setup();
    let output = run(dir.path(), &["preview", "errors.csv", "--page", "2", "--no-color"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("HTTP Errors"));
    assert!(text.contains("Not Found"));
    assert!(text.contains("Page 2 of 2"));
}

#[test]
fn preview_writes_svg() {
    let dir = setup();
    let output = run(dir.path(), &["preview", "errors.csv", "--svg", "page.svg"]);
    assert!(output.status.success());
    let svg = fs::read_to_string(dir.path().join("page.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">Page 1</text>"));
}

#[test]
fn preview_out_of_range_fails() {
    let dir = setup();
    let output = run(dir.path(), &["preview", "errors.csv", "--page", "5"]);
    assert!(!output.status.success());
}

#[test]
fn empty_csv_shows_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("empty.csv"), "errorCode,meaning\n").unwrap();
    let output = run(dir.path(), &["preview", "empty.csv"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No entries to preview. Please upload a CSV file first."));

    let output = run(dir.path(), &["export", "empty.csv"]);
    assert!(output.status.success());
    assert!(!dir.path().join("http-errors-reference.pdf").exists());
}
