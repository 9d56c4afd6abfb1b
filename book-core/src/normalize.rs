use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entry::{Document, EntryRecord, Field};

/// One parsed CSV row: column name to cell value.
pub type Row = HashMap<String, String>;

/// How column names are compared with the candidate lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnMatching {
    /// Literal, case-sensitive comparison.
    #[default]
    Exact,
    /// Ignore ASCII case and surrounding whitespace in column names.
    /// Literal matches on any candidate still take precedence.
    CaseInsensitive,
}

const ERROR_CODE_KEYS: &[&str] = &["errorCode", "Error Code", "code"];
const CATEGORY_KEYS: &[&str] = &["category", "Category"];
const MEANING_KEYS: &[&str] = &["meaning", "Meaning"];
const DETAILS_KEYS: &[&str] = &["details", "Details"];
const FIX_KEYS: &[&str] = &["fix", "Fix", "solution"];

/// Accepted column names for `field`, in precedence order.
pub fn candidates(field: Field) -> &'static [&'static str] {
    match field {
        Field::ErrorCode => ERROR_CODE_KEYS,
        Field::Category => CATEGORY_KEYS,
        Field::Meaning => MEANING_KEYS,
        Field::Details => DETAILS_KEYS,
        Field::Fix => FIX_KEYS,
    }
}

/// Build one record from one row. The first candidate column holding a
/// non-empty value wins; a field with none is the empty string.
pub fn normalize_row(row: &Row, matching: ColumnMatching) -> EntryRecord {
    let mut record = EntryRecord::default();
    for field in Field::ALL {
        let value = resolve(row, candidates(field), matching).unwrap_or_default();
        record.set(field, value.to_string());
    }
    record
}

/// Normalize every row, preserving order. One record per row.
pub fn normalize_rows<'a, I>(rows: I, matching: ColumnMatching) -> Document
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter()
        .map(|row| normalize_row(row, matching))
        .collect()
}

/// First non-empty value among `keys`. Literal spellings are tried for
/// every key before any case-folded comparison.
fn resolve<'r>(row: &'r Row, keys: &[&str], matching: ColumnMatching) -> Option<&'r str> {
    let exact = keys.iter().find_map(|key| {
        row.get(*key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    });
    match matching {
        ColumnMatching::Exact => exact,
        ColumnMatching::CaseInsensitive => {
            exact.or_else(|| keys.iter().find_map(|key| folded_lookup(row, key)))
        }
    }
}

fn folded_lookup<'r>(row: &'r Row, key: &str) -> Option<&'r str> {
    // Several columns can fold to the same name; take the lexically
    // smallest so the result does not depend on hash order.
    row.iter()
        .filter(|(column, value)| !value.is_empty() && column.trim().eq_ignore_ascii_case(key))
        .min_by(|a, b| a.0.cmp(b.0))
        .map(|(_, value)| value.as_str())
}
