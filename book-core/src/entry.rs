use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One normalized row: an HTTP error code and its explanation.
///
/// Every field is always present; a value the source did not provide is
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub error_code: String,
    pub category: String,
    pub meaning: String,
    pub details: String,
    pub fix: String,
}

impl EntryRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ErrorCode => &self.error_code,
            Field::Category => &self.category,
            Field::Meaning => &self.meaning,
            Field::Details => &self.details,
            Field::Fix => &self.fix,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::ErrorCode => &mut self.error_code,
            Field::Category => &mut self.category,
            Field::Meaning => &mut self.meaning,
            Field::Details => &mut self.details,
            Field::Fix => &mut self.fix,
        };
        *slot = value;
    }

    /// Fields paired with their values, in page order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

/// The five fields of an entry, in the order they appear on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    ErrorCode,
    Category,
    Meaning,
    Details,
    Fix,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::ErrorCode,
        Field::Category,
        Field::Meaning,
        Field::Details,
        Field::Fix,
    ];

    /// Label printed in front of the value on a page.
    pub fn label(&self) -> &'static str {
        match self {
            Field::ErrorCode => "Error Code:",
            Field::Category => "Category:",
            Field::Meaning => "Meaning:",
            Field::Details => "Details:",
            Field::Fix => "Fix:",
        }
    }

    /// Free-text fields get relaxed leading and sit below a small gap.
    pub fn is_long_text(&self) -> bool {
        matches!(self, Field::Details | Field::Fix)
    }
}

/// An ordered, immutable sequence of entries. Index `i` is page `i + 1`.
///
/// Cloning is cheap; clones share the same entries. A document is never
/// edited in place, only replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    entries: Arc<[EntryRecord]>,
}

impl Document {
    pub fn new(entries: Vec<EntryRecord>) -> Self {
        Document {
            entries: entries.into(),
        }
    }

    pub fn empty() -> Self {
        Document::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EntryRecord> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[EntryRecord] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntryRecord> {
        self.entries.iter()
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::empty()
    }
}

impl FromIterator<EntryRecord> for Document {
    fn from_iter<I: IntoIterator<Item = EntryRecord>>(iter: I) -> Self {
        Document::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a EntryRecord;
    type IntoIter = std::slice::Iter<'a, EntryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A document together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    /// File name shown to the user.
    pub name: String,
    pub size_bytes: u64,
    /// Header row of the source, in file order.
    pub columns: Vec<String>,
    pub document: Document,
}

impl LoadedDocument {
    /// Size in kilobytes with one decimal, e.g. `"1.5 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }
}
