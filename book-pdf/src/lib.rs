pub mod document;
pub mod encoding;
pub mod fonts;
pub mod graphics;
pub mod objects;
pub mod page;
pub mod writer;

pub use document::PdfDocument;
pub use fonts::{BuiltinFont, FontMetrics};
pub use graphics::Color;
pub use page::{Page, TextStyle};
