use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::fonts::BuiltinFont;
use crate::objects::{Dictionary, ObjId, PdfObject};
use crate::page::Page;
use crate::writer::PdfWriter;

const CATALOG_OBJ: ObjId = ObjId(1);
const PAGES_OBJ: ObjId = ObjId(2);
const FIRST_FONT_OBJ: u32 = 3;
const FIRST_FREE_OBJ: u32 = FIRST_FONT_OBJ + BuiltinFont::ALL.len() as u32;

/// Streaming PDF document builder.
///
/// Generic over `Write` so the same code writes to files, in-memory
/// buffers, or anything else. Each page is written out as soon as it is
/// added; only the list of page object ids is kept until `finish`.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    page_ids: Vec<ObjId>,
    next_obj: u32,
    compress: bool,
}

impl<W: Write> PdfDocument<W> {
    /// Start a document on `writer`. The header and the shared font
    /// objects are written immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut writer = PdfWriter::new(writer);
        writer.write_header()?;
        for font in BuiltinFont::ALL {
            let dict = Dictionary::new()
                .with("Type", PdfObject::name("Font"))
                .with("Subtype", PdfObject::name("Type1"))
                .with("BaseFont", PdfObject::name(font.base_name()))
                .with("Encoding", PdfObject::name("WinAnsiEncoding"));
            writer.write_object(font_obj(font), &PdfObject::from(dict))?;
        }
        Ok(PdfDocument {
            writer,
            info: Vec::new(),
            page_ids: Vec::new(),
            next_obj: FIRST_FREE_OBJ,
            compress: true,
        })
    }

    /// Add a document info entry such as "Title" or "Creator".
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Toggle FlateDecode compression of content streams (on by default).
    pub fn set_compression(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn allocate(&mut self) -> ObjId {
        let id = ObjId(self.next_obj);
        self.next_obj += 1;
        id
    }

    /// Write `page` (content stream and page dictionary) to the output.
    pub fn add_page(&mut self, page: Page) -> io::Result<()> {
        let content_id = self.allocate();
        let page_id = self.allocate();

        let (stream_dict, data) = if self.compress {
            let compressed = deflate(page.content())?;
            let dict = Dictionary::new().with("Filter", PdfObject::name("FlateDecode"));
            (dict, compressed)
        } else {
            (Dictionary::new(), page.content().to_vec())
        };
        self.writer
            .write_object(content_id, &PdfObject::Stream(stream_dict, data))?;

        let mut resources = Dictionary::new();
        if !page.fonts().is_empty() {
            let mut fonts = Dictionary::new();
            for font in page.fonts() {
                fonts.insert(font.resource_name(), font_obj(*font));
            }
            resources.insert("Font", fonts);
        }
        if !page.fill_alphas().is_empty() {
            let mut states = Dictionary::new();
            for (i, alpha) in page.fill_alphas().iter().enumerate() {
                let state = Dictionary::new()
                    .with("Type", PdfObject::name("ExtGState"))
                    .with("ca", *alpha);
                states.insert(&format!("GS{}", i), state);
            }
            resources.insert("ExtGState", states);
        }

        let media_box = vec![
            PdfObject::Integer(0),
            PdfObject::Integer(0),
            PdfObject::Real(page.width()),
            PdfObject::Real(page.height()),
        ];
        let page_dict = Dictionary::new()
            .with("Type", PdfObject::name("Page"))
            .with("Parent", PAGES_OBJ)
            .with("MediaBox", media_box)
            .with("Contents", content_id)
            .with("Resources", resources);
        self.writer.write_object(page_id, &PdfObject::from(page_dict))?;

        self.page_ids.push(page_id);
        Ok(())
    }

    /// Write the info dictionary, page tree, catalog and trailer, and
    /// return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = self.allocate();
            let mut dict = Dictionary::new();
            for (key, value) in &self.info {
                dict.insert(key, PdfObject::text(value));
            }
            self.writer.write_object(id, &PdfObject::from(dict))?;
            Some(id)
        };

        let kids: Vec<PdfObject> = self.page_ids.iter().map(|id| (*id).into()).collect();
        let pages = Dictionary::new()
            .with("Type", PdfObject::name("Pages"))
            .with("Kids", kids)
            .with("Count", self.page_ids.len() as i64);
        self.writer.write_object(PAGES_OBJ, &PdfObject::from(pages))?;

        let catalog = Dictionary::new()
            .with("Type", PdfObject::name("Catalog"))
            .with("Pages", PAGES_OBJ);
        self.writer.write_object(CATALOG_OBJ, &PdfObject::from(catalog))?;

        self.writer.finish(CATALOG_OBJ, info_id)
    }
}

fn font_obj(font: BuiltinFont) -> ObjId {
    match font {
        BuiltinFont::Helvetica => ObjId(FIRST_FONT_OBJ),
        BuiltinFont::HelveticaBold => ObjId(FIRST_FONT_OBJ + 1),
    }
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
