use tracing::{debug, info, warn};

use crate::entry::{Document, EntryRecord, LoadedDocument};
use crate::error::{ExportError, StateError};
use crate::export::{ExportOptions, ExportOutcome};
use crate::layout::{layout_page, LayoutConfig, PageDescriptor, PageLayout};
use crate::pager::Pager;
use crate::settings::{TitlePreset, TitleSize};

#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the current document with a freshly loaded one.
    Loaded(LoadedDocument),
    /// Loading failed; keep whatever was loaded before.
    LoadFailed(String),
    /// Forget the loaded document.
    Remove,
    Next,
    Previous,
    /// Zero-based page index.
    JumpTo(usize),
    SetTitleSize(u32),
    SetPreset(TitlePreset),
}

/// Application state. All changes go through [`AppState::apply`]; a
/// rejected action returns an error and leaves the state as it was.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    loaded: Option<LoadedDocument>,
    pager: Pager,
    title_size: TitleSize,
    last_error: Option<String>,
    /// Bumped whenever the document is replaced or removed.
    generation: u64,
}

/// A snapshot taken when an export starts. It stays valid even if the
/// document is replaced meanwhile; the result is then simply discarded.
#[derive(Debug, Clone)]
pub struct ExportTicket {
    pub generation: u64,
    pub document: Document,
    pub title_size: TitleSize,
}

impl ExportTicket {
    /// `base` with this ticket's title size.
    pub fn options(&self, base: &ExportOptions) -> ExportOptions {
        ExportOptions {
            title_size: self.title_size,
            ..*base
        }
    }
}

/// How [`AppState::finish_export`] handled a result.
#[derive(Debug, PartialEq, Eq)]
pub enum FinishedExport {
    Completed(ExportOutcome),
    /// The export failed; the message is now the state's last error.
    Failed,
    /// The document changed after the export began.
    Discarded,
}

impl AppState {
    pub fn new(title_size: TitleSize) -> Self {
        AppState {
            title_size,
            ..AppState::default()
        }
    }

    pub fn apply(&mut self, action: Action) -> Result<(), StateError> {
        match action {
            Action::Loaded(loaded) => {
                info!(
                    file = %loaded.name,
                    entries = loaded.document.len(),
                    "document replaced"
                );
                self.pager = Pager::new(loaded.document.len());
                self.loaded = Some(loaded);
                self.last_error = None;
                self.generation += 1;
            }
            Action::LoadFailed(message) => {
                warn!(%message, "load failed; keeping previous document");
                self.last_error = Some(message);
            }
            Action::Remove => {
                self.loaded = None;
                self.pager = Pager::default();
                self.last_error = None;
                self.generation += 1;
            }
            Action::Next => self.pager.next(),
            Action::Previous => self.pager.previous(),
            Action::JumpTo(index) => self.pager.jump_to(index)?,
            Action::SetTitleSize(points) => self.title_size = TitleSize::new(points)?,
            Action::SetPreset(preset) => self.title_size = preset.into(),
        }
        Ok(())
    }

    pub fn loaded(&self) -> Option<&LoadedDocument> {
        self.loaded.as_ref()
    }

    /// The current document, empty when nothing is loaded.
    pub fn document(&self) -> Document {
        self.loaded
            .as_ref()
            .map(|l| l.document.clone())
            .unwrap_or_default()
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn title_size(&self) -> TitleSize {
        self.title_size
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_entry(&self) -> Option<&EntryRecord> {
        let index = self.pager.current()?;
        self.loaded.as_ref()?.document.get(index)
    }

    pub fn current_descriptor(&self) -> Option<PageDescriptor<'_>> {
        let index = self.pager.current()?;
        Some(PageDescriptor {
            entry: self.current_entry()?,
            page_number: index + 1,
            title_size: self.title_size,
        })
    }

    /// Layout of the visible page, using the current title size.
    pub fn current_layout(&self, config: &LayoutConfig) -> Option<PageLayout> {
        self.current_descriptor()
            .map(|descriptor| layout_page(&descriptor, config))
    }

    /// Start an export, or `None` when there is nothing to export.
    pub fn begin_export(&self) -> Option<ExportTicket> {
        let document = self.document();
        if document.is_empty() {
            debug!("export requested with no entries");
            return None;
        }
        Some(ExportTicket {
            generation: self.generation,
            document,
            title_size: self.title_size,
        })
    }

    pub fn finish_export(
        &mut self,
        ticket: ExportTicket,
        result: Result<ExportOutcome, ExportError>,
    ) -> FinishedExport {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding export for a replaced document"
            );
            return FinishedExport::Discarded;
        }
        match result {
            Ok(outcome) => FinishedExport::Completed(outcome),
            Err(err) => {
                warn!(error = %err, "export failed");
                self.last_error = Some(format!("Failed to generate PDF: {}", err));
                FinishedExport::Failed
            }
        }
    }
}
