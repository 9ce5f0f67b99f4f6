//! # Snapshot History
//!
//! Linear undo/redo over complete snapshots.
//!
//! ## Design
//!
//! - History holds an ordered list of full snapshots and a cursor
//! - It is never empty: it is seeded with the initial value
//! - Committing a value equal to the current snapshot is a no-op
//! - Committing after an undo discards every snapshot past the cursor
//! - Undo/redo only move the cursor; nothing is re-applied
//!
//! ## Example
//!
//! ```rust
//! use funnel_editor::History;
//!
//! let mut history = History::new(vec![1]);
//! history.commit(vec![1, 2]);
//! assert!(history.undo());
//! assert_eq!(history.current(), &vec![1]);
//! assert!(history.redo());
//! assert_eq!(history.current(), &vec![1, 2]);
//! ```

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    /// Description of the change that produced this snapshot
    label: Option<String>,
}

/// Undo/redo history of snapshots
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<Entry<T>>,

    cursor: usize,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl<T: Clone + PartialEq> History<T> {
    /// Create a history seeded with `initial`, with unlimited undo levels
    pub fn new(initial: T) -> Self {
        Self::with_max_levels(initial, 0)
    }

    /// Create a history keeping at most `max_levels` undo steps (0 = unlimited)
    pub fn with_max_levels(initial: T, max_levels: usize) -> Self {
        Self {
            entries: vec![Entry {
                value: initial,
                label: None,
            }],
            cursor: 0,
            max_levels,
        }
    }

    /// Record a new snapshot. Returns `false` when it equals the current one.
    pub fn commit(&mut self, value: T) -> bool {
        self.push(value, None)
    }

    /// Record a new snapshot with a description for undo/redo menus
    pub fn commit_labeled(&mut self, value: T, label: impl Into<String>) -> bool {
        self.push(value, Some(label.into()))
    }

    fn push(&mut self, value: T, label: Option<String>) -> bool {
        if value == self.entries[self.cursor].value {
            return false;
        }

        // New write invalidates the redo branch
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Entry { value, label });
        self.cursor = self.entries.len() - 1;

        if self.max_levels > 0 && self.entries.len() > self.max_levels + 1 {
            let excess = self.entries.len() - (self.max_levels + 1);
            self.entries.drain(..excess);
            self.cursor -= excess;
        }

        true
    }

    /// Step back one snapshot. Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one snapshot. Returns `false` at the end of history.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> &T {
        &self.entries[self.cursor].value
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of snapshots held, including the seed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; history is seeded at construction
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    pub fn redo_levels(&self) -> usize {
        self.entries.len() - 1 - self.cursor
    }

    /// Description of the change the next undo reverts
    pub fn undo_label(&self) -> Option<&str> {
        if self.can_undo() {
            self.entries[self.cursor].label.as_deref()
        } else {
            None
        }
    }

    /// Description of the change the next redo reapplies
    pub fn redo_label(&self) -> Option<&str> {
        self.entries
            .get(self.cursor + 1)
            .and_then(|entry| entry.label.as_deref())
    }

    /// Drop all history, keeping the current snapshot as the new seed
    pub fn clear(&mut self) {
        let current = self.entries.swap_remove(self.cursor);
        self.entries = vec![Entry {
            value: current.value,
            label: None,
        }];
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_creation() {
        let history = History::new("v0");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &"v0");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_undo_redo() {
        let mut history = History::new(0);

        assert!(history.commit(1));
        assert_eq!(history.undo_levels(), 1);
        assert!(history.can_undo());

        assert!(history.undo());
        assert_eq!(history.current(), &0);
        assert_eq!(history.redo_levels(), 1);
        assert!(history.can_redo());

        assert!(history.redo());
        assert_eq!(history.current(), &1);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_at_bounds_are_noops() {
        let mut history = History::new(0);
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_equal_commit_is_ignored() {
        let mut history = History::new(vec!["a"]);
        history.commit(vec!["a", "b"]);

        assert!(!history.commit(vec!["a", "b"]));
        assert_eq!(history.len(), 2);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_equal_commit_keeps_redo_branch() {
        let mut history = History::new(0);
        history.commit(1);
        history.undo();

        assert!(!history.commit(0));
        assert!(history.can_redo());
    }

    #[test]
    fn test_new_commit_discards_redo() {
        let mut history = History::new(0);
        history.commit(1);
        history.commit(2);
        history.undo();
        history.undo();

        assert!(history.commit(10));
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.current(), &10);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut history = History::with_max_levels(0, 2);
        for i in 1..=5 {
            history.commit(i);
        }

        assert_eq!(history.undo_levels(), 2);
        assert_eq!(history.current(), &5);
        history.undo();
        history.undo();
        assert!(!history.undo());
        assert_eq!(history.current(), &3);
    }

    #[test]
    fn test_labels() {
        let mut history = History::new(0);
        history.commit_labeled(1, "Add one");
        history.commit(2);

        assert_eq!(history.undo_label(), None);
        history.undo();
        assert_eq!(history.undo_label(), Some("Add one"));
        assert_eq!(history.redo_label(), None);
        history.undo();
        assert_eq!(history.undo_label(), None);
        assert_eq!(history.redo_label(), Some("Add one"));
    }

    #[test]
    fn test_clear_keeps_current() {
        let mut history = History::new(0);
        history.commit(1);
        history.commit(2);
        history.undo();

        history.clear();
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
