//! # Funnel Editor
//!
//! Editing engine behind the funnel builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: chain → ... → block tree          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Session                             │
//! │  - Mutation gateway (copy → edit → commit)  │
//! │  - Linear snapshot history (undo/redo)      │
//! │  - Selection + derived view                 │
//! │  - Debounced save status → DocumentStore    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: UI event loop / CLI                   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One choke point**: every edit is a full-snapshot commit through the session
//! 2. **No-op edits vanish**: an edit that changes nothing never reaches history
//! 3. **Linear history**: writing after an undo discards the redo branch
//! 4. **Selection is not history**: undo moves the document, not the active ids
//! 5. **Derived, never cached**: the view is recomputed from `(document, selection)`
//!
//! ## Usage
//!
//! ```rust
//! use funnel_editor::{Session, SessionOptions};
//! use funnel_document::initial_document;
//!
//! let mut session = Session::new(initial_document(), SessionOptions::default());
//!
//! let created = session.create_funnel("Launch").unwrap().unwrap();
//! assert_eq!(session.view().funnel.map(|f| f.id.as_str()), Some(created.funnel_id.as_str()));
//!
//! session.undo();
//! assert!(session.can_redo());
//! ```

mod errors;
mod history;
mod save_status;
mod selection;
mod session;
mod store;

pub use errors::EditorError;
pub use history::History;
pub use save_status::{Clock, ManualClock, SaveStatus, SaveTracker, SystemClock, DEFAULT_SAVE_DEBOUNCE};
pub use selection::{derive, Selection, View};
pub use session::{Breakpoint, FunnelCreated, Session, SessionOptions, UiState};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreError};

// Re-export document types for convenience
pub use funnel_document::{Document, Level, Mutation, MutationError};
