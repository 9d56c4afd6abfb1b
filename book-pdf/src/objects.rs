use crate::encoding::encode_win_ansi;

/// Indirect object number. Everything this crate writes is a fresh
/// document, so the generation is always 0 and is not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u32);

/// The subset of PDF object types (PDF 32000-1:2008 Section 7.3)
/// needed to describe pages, fonts and content streams.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Name object, stored without the leading `/`.
    Name(String),
    /// Literal string, stored as already-encoded bytes.
    String(Vec<u8>),
    Array(Vec<PdfObject>),
    Dictionary(Dictionary),
    Stream(Dictionary, Vec<u8>),
    Reference(ObjId),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    /// A literal string holding `s` in WinAnsiEncoding.
    pub fn text(s: &str) -> Self {
        PdfObject::String(encode_win_ansi(s))
    }

    /// Append the PDF syntax for this object to `out`.
    pub(crate) fn serialize(&self, out: &mut Vec<u8>) {
        match self {
            PdfObject::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
            PdfObject::Real(v) => out.extend_from_slice(format_number(*v).as_bytes()),
            PdfObject::Name(name) => {
                out.push(b'/');
                out.extend_from_slice(name.as_bytes());
            }
            PdfObject::String(bytes) => {
                out.push(b'(');
                escape_string_into(bytes, out);
                out.push(b')');
            }
            PdfObject::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b' ');
                    }
                    item.serialize(out);
                }
                out.push(b']');
            }
            PdfObject::Dictionary(dict) => dict.serialize(out, None),
            PdfObject::Stream(dict, data) => {
                dict.serialize(out, Some(data.len()));
                out.extend_from_slice(b"\nstream\n");
                out.extend_from_slice(data);
                out.extend_from_slice(b"\nendstream");
            }
            PdfObject::Reference(id) => {
                out.extend_from_slice(format!("{} 0 R", id.0).as_bytes());
            }
        }
    }
}

impl From<i64> for PdfObject {
    fn from(n: i64) -> Self {
        PdfObject::Integer(n)
    }
}

impl From<f64> for PdfObject {
    fn from(v: f64) -> Self {
        PdfObject::Real(v)
    }
}

impl From<ObjId> for PdfObject {
    fn from(id: ObjId) -> Self {
        PdfObject::Reference(id)
    }
}

impl From<Dictionary> for PdfObject {
    fn from(dict: Dictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

impl From<Vec<PdfObject>> for PdfObject {
    fn from(items: Vec<PdfObject>) -> Self {
        PdfObject::Array(items)
    }
}

/// Key-value pairs kept in insertion order so output is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: Vec<(String, PdfObject)>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<PdfObject>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace `key`.
    pub fn insert(&mut self, key: &str, value: impl Into<PdfObject>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn serialize(&self, out: &mut Vec<u8>, stream_len: Option<usize>) {
        out.extend_from_slice(b"<<");
        for (key, value) in &self.entries {
            out.extend_from_slice(b" /");
            out.extend_from_slice(key.as_bytes());
            out.push(b' ');
            value.serialize(out);
        }
        if let Some(len) = stream_len {
            out.extend_from_slice(format!(" /Length {}", len).as_bytes());
        }
        out.extend_from_slice(b" >>");
    }
}

/// Escape the delimiters of a PDF literal string.
pub(crate) fn escape_string_into(bytes: &[u8], out: &mut Vec<u8>) {
    for &b in bytes {
        match b {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            _ => out.push(b),
        }
    }
}

/// Format a number for object and content-stream output: integral
/// values without a fraction, others with at most four decimals and
/// never in scientific notation.
pub fn format_number(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
