pub mod config;
pub mod entry;
pub mod error;
pub mod export;
pub mod ingest;
pub mod layout;
pub mod normalize;
pub mod pager;
pub mod render;
pub mod settings;
pub mod state;
pub mod style;

pub use config::BookConfig;
pub use entry::{Document, EntryRecord, Field, LoadedDocument};
pub use error::{ConfigError, ExportError, IngestError, NavigationError, SettingsError, StateError};
pub use export::{export_to_path, render_pdf, ExportOptions, ExportOutcome, RenderReport, DEFAULT_FILENAME};
pub use ingest::{load_document, parse_document, read_table, Table};
pub use layout::{describe_document, layout_page, LayoutConfig, PageDescriptor, PageLayout};
pub use normalize::{normalize_row, normalize_rows, ColumnMatching, Row};
pub use pager::Pager;
pub use settings::{TitlePreset, TitleSize};
pub use state::{Action, AppState, ExportTicket, FinishedExport};
