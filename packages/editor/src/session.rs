//! # Builder Session
//!
//! One user's editing session over one document: the history, the active
//! selection, the save indicator and the builder's UI flags.
//!
//! Every edit goes through [`Session::update`] (or [`Session::apply`], which
//! wraps it). The closure gets a deep copy of the current snapshot; whatever it
//! produces is committed to history only if it differs from the current
//! snapshot, and only then does the save indicator flip to `Saving`.
//!
//! Selection lives outside history. Undo and redo move the document but leave
//! the active ids alone; ids that no longer resolve derive to `None`.

use crate::errors::EditorError;
use crate::history::History;
use crate::save_status::{Clock, SaveStatus, SaveTracker, SystemClock, DEFAULT_SAVE_DEBOUNCE};
use crate::selection::{derive, Selection, View};
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use funnel_document::factory::default_funnel;
use funnel_document::{initial_document, Document, IdGenerator, Level, Mutation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session construction options
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Session name; seeds generated ids
    pub name: String,

    /// Maximum undo levels (0 = unlimited)
    pub history_limit: usize,

    /// Quiescence window before a write settles to `Saved`
    pub save_debounce: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            name: "builder".to_string(),
            history_limit: 0,
            save_debounce: DEFAULT_SAVE_DEBOUNCE,
        }
    }
}

/// Preview width the canvas renders at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

/// Builder UI flags owned by the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub create_funnel_open: bool,
    pub media_library_open: bool,
    pub breakpoint: Breakpoint,
}

/// Ids of a funnel made by [`Session::create_funnel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnelCreated {
    pub funnel_id: String,
    pub page_id: String,
}

pub struct Session {
    id: String,
    history: History<Document>,
    selection: Selection,
    save: SaveTracker,
    clock: Box<dyn Clock>,
    ids: IdGenerator,
    store: Option<Box<dyn DocumentStore>>,
    ui: UiState,
}

impl Session {
    /// Start a session on `document` and auto-select a sensible view
    pub fn new(document: Document, options: SessionOptions) -> Self {
        let mut selection = Selection::default();
        selection.bootstrap(&document);

        Self {
            ids: IdGenerator::new(&options.name),
            id: options.name,
            history: History::with_max_levels(document, options.history_limit),
            selection,
            save: SaveTracker::new(options.save_debounce),
            clock: Box::new(SystemClock),
            store: None,
            ui: UiState::default(),
        }
    }

    /// Start a session on whatever `store` holds, or the seed dataset if empty
    pub fn open(
        store: impl DocumentStore + 'static,
        options: SessionOptions,
    ) -> Result<Self, EditorError> {
        let document = match store.load()? {
            Some(doc) => doc,
            None => {
                tracing::info!("No stored document, starting from the initial dataset");
                initial_document()
            }
        };
        Ok(Self::new(document, options).with_store(store))
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_store(mut self, store: impl DocumentStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current snapshot
    pub fn document(&self) -> &Document {
        self.history.current()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Active entities and filtered lists for the current snapshot
    pub fn view(&self) -> View<'_> {
        derive(self.history.current(), &self.selection)
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    // --- History -----------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Snapshots in history, including the initial one
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            tracing::debug!(cursor = self.history.cursor(), "Undo");
            self.after_document_change();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            tracing::debug!(cursor = self.history.cursor(), "Redo");
            self.after_document_change();
        }
        moved
    }

    // --- Mutation gateway --------------------------------------------------

    /// Edit the document. `mutation` receives a deep copy of the current
    /// snapshot and either edits it in place (`Ok(None)`) or returns a
    /// replacement (`Ok(Some(doc))`). An error leaves history untouched.
    ///
    /// Returns whether a new snapshot was committed.
    pub fn update<F, E>(&mut self, mutation: F) -> Result<bool, E>
    where
        F: FnOnce(&mut Document) -> Result<Option<Document>, E>,
    {
        let mut draft = self.history.current().clone();
        let next = mutation(&mut draft)?.unwrap_or(draft);
        Ok(self.commit(next, None))
    }

    /// Infallible in-place edit
    pub fn update_in_place(&mut self, edit: impl FnOnce(&mut Document)) -> bool {
        let mut draft = self.history.current().clone();
        edit(&mut draft);
        self.commit(draft, None)
    }

    /// Apply a semantic mutation. Deleting the selected entity clears the
    /// selection at that level and below.
    pub fn apply(&mut self, mutation: Mutation) -> Result<bool, EditorError> {
        let mut draft = self.history.current().clone();
        if let Err(e) = mutation.apply(&mut draft) {
            tracing::warn!(error = %e, ?mutation, "Rejected mutation");
            return Err(e.into());
        }

        let committed = self.commit(draft, Some(mutation.label()));

        if let Some((level, id)) = mutation.deleted() {
            if self.selection.get(level) == Some(id) {
                self.selection.clear_from(level);
            }
        }

        Ok(committed)
    }

    fn commit(&mut self, next: Document, label: Option<String>) -> bool {
        let committed = match label {
            Some(label) => self.history.commit_labeled(next, label),
            None => self.history.commit(next),
        };

        if committed {
            tracing::debug!(
                snapshots = self.history.len(),
                label = self.history.undo_label().unwrap_or(""),
                "Committed snapshot"
            );
            self.after_document_change();
        } else {
            tracing::trace!("Discarded no-op edit");
        }
        committed
    }

    fn after_document_change(&mut self) {
        self.save.mark_dirty(self.clock.now());
        self.selection.bootstrap(self.history.current());
    }

    // --- Save status -------------------------------------------------------

    pub fn save_status(&self) -> SaveStatus {
        self.save.status()
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.save.last_saved_at()
    }

    /// Drive the save debounce. Call from the host's event loop; once the
    /// quiescence window has passed the current snapshot is handed to the
    /// store (if any) and the status settles.
    pub fn tick(&mut self) -> SaveStatus {
        if self.save.poll(self.clock.now()) {
            self.settle();
        }
        self.save.status()
    }

    fn settle(&mut self) {
        let Some(store) = self.store.as_mut() else {
            self.save.settle_saved();
            return;
        };

        match store.save(self.history.current()) {
            Ok(()) => {
                tracing::info!(session = %self.id, "Saved document");
                self.save.settle_saved();
            }
            Err(e) => {
                tracing::error!(session = %self.id, error = %e, "Failed to save document");
                self.save.settle_failed();
            }
        }
    }

    /// Save right away, bypassing the debounce
    pub fn save_now(&mut self) -> Result<(), EditorError> {
        let store = self.store.as_mut().ok_or(EditorError::NoStore)?;
        self.save.cancel_pending();

        match store.save(self.history.current()) {
            Ok(()) => {
                self.save.settle_saved();
                Ok(())
            }
            Err(e) => {
                self.save.settle_failed();
                Err(e.into())
            }
        }
    }

    // --- Selection ---------------------------------------------------------

    /// Set the active id at one level. Lower levels are not reset; use
    /// [`switch_chain`](Self::switch_chain) or [`clear_selection_from`](Self::clear_selection_from).
    pub fn set_active(&mut self, level: Level, id: Option<String>) {
        self.selection.set(level, id);
        self.selection.bootstrap(self.history.current());
    }

    /// Select a chain and reset every level below it
    pub fn switch_chain(&mut self, id: Option<String>) {
        self.selection.switch_chain(id);
        self.selection.bootstrap(self.history.current());
    }

    /// Select every ancestor of `id` and `id` itself, clearing anything below.
    /// Returns `false` if the id is not in the document.
    pub fn select_entity(&mut self, id: &str) -> bool {
        let Some(path) = self.history.current().path_to(id) else {
            return false;
        };

        let mut selection = Selection::default();
        for (level, id) in path {
            selection.set(level, Some(id.to_string()));
        }
        self.selection = selection;
        true
    }

    pub fn clear_selection_from(&mut self, level: Level) {
        self.selection.clear_from(level);
        self.selection.bootstrap(self.history.current());
    }

    // --- Builder actions ---------------------------------------------------

    /// Create a funnel with one empty page under the active landing page and
    /// select it. Does nothing for a blank name or when no landing page is
    /// active.
    pub fn create_funnel(&mut self, name: &str) -> Result<Option<FunnelCreated>, EditorError> {
        if name.trim().is_empty() {
            return Ok(None);
        }
        let Some(landing_page_id) = self.view().landing_page.map(|lp| lp.id.clone()) else {
            return Ok(None);
        };

        let funnel = default_funnel(&mut self.ids, self.history.current(), name);
        let created = FunnelCreated {
            funnel_id: funnel.id.clone(),
            page_id: funnel.pages[0].id.clone(),
        };

        self.apply(Mutation::InsertFunnel {
            landing_page_id,
            funnel,
        })?;

        self.selection.set(Level::Funnel, Some(created.funnel_id.clone()));
        self.selection.set(Level::Page, Some(created.page_id.clone()));
        self.ui.create_funnel_open = false;

        tracing::info!(funnel = %created.funnel_id, name = name.trim(), "Created funnel");
        Ok(Some(created))
    }

    pub fn open_create_funnel(&mut self) {
        self.ui.create_funnel_open = true;
    }

    pub fn close_create_funnel(&mut self) {
        self.ui.create_funnel_open = false;
    }

    pub fn open_media_library(&mut self) {
        self.ui.media_library_open = true;
    }

    pub fn close_media_library(&mut self) {
        self.ui.media_library_open = false;
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.ui.breakpoint = breakpoint;
    }
}
