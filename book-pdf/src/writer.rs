use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::objects::{ObjId, PdfObject};

/// Streams indirect objects to a `Write` target and remembers where
/// each one starts so the cross-reference table can be written last.
pub struct PdfWriter<W: Write> {
    inner: W,
    position: usize,
    offsets: BTreeMap<u32, usize>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(inner: W) -> Self {
        PdfWriter {
            inner,
            position: 0,
            offsets: BTreeMap::new(),
        }
    }

    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.position += bytes.len();
        Ok(())
    }

    /// `%PDF-1.7` plus a comment of high bytes that marks the file as binary.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.emit(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n")
    }

    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        let mut body = format!("{} 0 obj\n", id.0).into_bytes();
        obj.serialize(&mut body);
        body.extend_from_slice(b"\nendobj\n");
        self.offsets.insert(id.0, self.position);
        self.emit(&body)
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Write the xref table and trailer, then hand back the target.
    ///
    /// Object numbers that were never written get free entries, so the
    /// table is always contiguous from 0.
    pub fn finish(mut self, root: ObjId, info: Option<ObjId>) -> io::Result<W> {
        let xref_start = self.position;
        let size = self.offsets.keys().next_back().map_or(1, |last| last + 1);

        let mut table = format!("xref\n0 {}\n", size).into_bytes();
        table.extend_from_slice(b"0000000000 65535 f\r\n");
        for num in 1..size {
            match self.offsets.get(&num) {
                Some(offset) => {
                    table.extend_from_slice(format!("{:010} 00000 n\r\n", offset).as_bytes())
                }
                None => table.extend_from_slice(b"0000000000 00000 f\r\n"),
            }
        }
        self.emit(&table)?;

        let mut trailer = format!("trailer\n<< /Size {} /Root {} 0 R", size, root.0);
        if let Some(info) = info {
            trailer.push_str(&format!(" /Info {} 0 R", info.0));
        }
        trailer.push_str(&format!(" >>\nstartxref\n{}\n%%EOF\n", xref_start));
        self.emit(trailer.as_bytes())?;

        self.inner.flush()?;
        Ok(self.inner)
    }
}
