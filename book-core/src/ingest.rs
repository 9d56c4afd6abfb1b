use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::entry::{Document, LoadedDocument};
use crate::error::IngestError;
use crate::normalize::{normalize_rows, ColumnMatching, Row};

/// Parsed CSV contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names from the header row, in file order.
    pub headers: Vec<String>,
    /// Data rows keyed by column name. Blank lines are not rows; a line of
    /// empty cells is.
    pub rows: Vec<Row>,
}

/// Read CSV from `reader`. The first record is the header.
///
/// Short rows are accepted and simply lack the trailing columns; extra
/// cells beyond the header are ignored. When a column name repeats, the
/// first column with that name is used.
pub fn read_table<R: Read>(reader: R) -> Result<Table, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let mut row = Row::with_capacity(headers.len());
        for (name, value) in headers.iter().zip(record.iter()) {
            row.entry(name.clone()).or_insert_with(|| value.to_string());
        }
        rows.push(row);
    }

    debug!(columns = headers.len(), rows = rows.len(), "parsed CSV");
    Ok(Table { headers, rows })
}

/// Parse and normalize CSV from any reader.
pub fn parse_document<R: Read>(reader: R, matching: ColumnMatching) -> Result<Document, IngestError> {
    let table = read_table(reader)?;
    Ok(normalize_rows(&table.rows, matching))
}

/// Load the CSV file at `path` into a document.
///
/// Fails as a whole: either every row is normalized or an error is
/// returned and nothing is produced.
pub fn load_document<P: AsRef<Path>>(
    path: P,
    matching: ColumnMatching,
) -> Result<LoadedDocument, IngestError> {
    let path = path.as_ref();
    let io_error = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let size_bytes = file.metadata().map_err(io_error)?.len();
    let table = read_table(BufReader::new(file))?;
    let document = normalize_rows(&table.rows, matching);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info!(file = %name, entries = document.len(), ?matching, "loaded document");

    Ok(LoadedDocument {
        name,
        size_bytes,
        columns: table.headers,
        document,
    })
}
