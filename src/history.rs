//! Bounded undo/redo history of snapshots.
//!
//! The history is a window of immutable snapshots plus a cursor pointing at
//! the current one. Recording a new snapshot discards everything after the
//! cursor, and once the window is full the oldest snapshot is dropped.
//!
//! ```
//! use logic_lab::history::History;
//!
//! let mut history = History::new(0);
//! history.record(1);
//! history.record(2);
//! assert_eq!(history.undo(), Some(&1));
//! assert_eq!(history.redo(), Some(&2));
//! assert_eq!(history.redo(), None);
//! ```

use std::collections::VecDeque;

use log::debug;

/// Default number of snapshots kept.
pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: VecDeque<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Clone> History<T> {
    /// Starts a history at `initial` with the default capacity.
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, HISTORY_CAPACITY)
    }

    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        assert!(capacity > 0, "History capacity must be positive");
        let mut snapshots = VecDeque::with_capacity(capacity);
        snapshots.push_back(initial);
        Self {
            snapshots,
            cursor: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of snapshots held, including the current one.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn current(&self) -> &T {
        &self.snapshots[self.cursor]
    }

    /// Makes `state` the current snapshot, discarding the redo branch.
    pub fn record(&mut self, state: T) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(state);
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            debug!("History: dropped oldest snapshot");
        }
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Steps back and returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Steps forward and returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Forgets every snapshot and starts over at `state`.
    pub fn reset(&mut self, state: T) {
        self.snapshots.clear();
        self.snapshots.push_back(state);
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo() {
        let mut h = History::new("a");
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        h.record("b");
        h.record("c");
        assert_eq!(h.undo(), Some(&"b"));
        assert_eq!(h.undo(), Some(&"a"));
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), Some(&"b"));
        assert_eq!(*h.current(), "b");
    }

    #[test]
    fn test_record_discards_redo_branch() {
        let mut h = History::new(0);
        h.record(1);
        h.record(2);
        h.undo();
        h.record(3);
        assert!(!h.can_redo());
        assert_eq!(h.undo(), Some(&1));
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut h = History::with_capacity(0, 3);
        for i in 1..=5 {
            h.record(i);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.undo(), Some(&4));
        assert_eq!(h.undo(), Some(&3));
        assert_eq!(h.undo(), None);
    }

    #[test]
    fn test_default_capacity() {
        let mut h = History::new(0);
        for i in 1..100 {
            h.record(i);
        }
        assert_eq!(h.capacity(), HISTORY_CAPACITY);
        assert_eq!(h.len(), HISTORY_CAPACITY);
        let mut steps = 0;
        while h.undo().is_some() {
            steps += 1;
        }
        assert_eq!(steps, HISTORY_CAPACITY - 1);
        assert_eq!(*h.current(), 99 - (HISTORY_CAPACITY as i32 - 1));
    }

    #[test]
    fn test_reset() {
        let mut h = History::new(1);
        h.record(2);
        h.reset(7);
        assert_eq!(*h.current(), 7);
        assert!(!h.can_undo());
    }
}
