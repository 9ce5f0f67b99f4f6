//! # Save Status
//!
//! Debounced "saving → saved" indicator.
//!
//! Every real write marks the tracker dirty and restarts a quiescence window.
//! Once the window passes without another write, the host's next `poll`
//! reports the deadline as due and the session settles the status (after
//! handing the snapshot to a store, if one is attached).
//!
//! Time is read through [`Clock`] so an event loop can drive it and tests can
//! step it by hand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Default quiescence window before a write counts as saved
pub const DEFAULT_SAVE_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    #[default]
    Saved,
    Saving,
    Error,
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SaveStatus::Saved => "saved",
            SaveStatus::Saving => "saving",
            SaveStatus::Error => "error",
        })
    }
}

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    start: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.offset.get()
    }
}

/// Debounce state behind [`SaveStatus`]
#[derive(Debug, Clone)]
pub struct SaveTracker {
    status: SaveStatus,
    deadline: Option<Instant>,
    quiescence: Duration,
    last_saved_at: Option<DateTime<Utc>>,
}

impl SaveTracker {
    pub fn new(quiescence: Duration) -> Self {
        Self {
            status: SaveStatus::Saved,
            deadline: None,
            quiescence,
            last_saved_at: None,
        }
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn quiescence(&self) -> Duration {
        self.quiescence
    }

    /// Wall-clock time of the last successful settle
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    /// A write happened: go to `Saving` and restart the window
    pub fn mark_dirty(&mut self, now: Instant) {
        self.status = SaveStatus::Saving;
        self.deadline = Some(now + self.quiescence);
    }

    /// Whether a settle is still scheduled
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` once when the window has passed; the caller must then
    /// call [`settle_saved`](Self::settle_saved) or [`settle_failed`](Self::settle_failed).
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop a scheduled settle, e.g. because the caller saved explicitly
    pub fn cancel_pending(&mut self) {
        self.deadline = None;
    }

    pub fn settle_saved(&mut self) {
        self.status = SaveStatus::Saved;
        self.last_saved_at = Some(Utc::now());
    }

    pub fn settle_failed(&mut self) {
        self.status = SaveStatus::Error;
    }
}

impl Default for SaveTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DEBOUNCE)
    }
}
