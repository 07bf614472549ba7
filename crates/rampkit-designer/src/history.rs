//! Linear undo/redo over snapshots.
//!
//! Two write modes:
//!
//! - [`HistoryLog::replace_present`] overwrites the live snapshot without
//!   creating an undo step (mid-gesture previews).
//! - [`HistoryLog::commit`] records an undo step and discards the redo branch.
//!
//! While previews are pending the log remembers the last committed present,
//! so the step recorded on commit is the pre-gesture state and
//! [`HistoryLog::cancel_preview`] can roll back to it.
//!
//! Snapshots are owned values. Nothing in `past`, `present` or `future` shares
//! storage with anything else.

use tracing::trace;

use rampkit_core::constants::HISTORY_LIMIT;

use crate::snapshot::Snapshot;

#[derive(Debug, Clone)]
pub struct HistoryLog {
    past: Vec<Snapshot>,
    present: Snapshot,
    future: Vec<Snapshot>,
    /// Last committed present while a preview is showing
    checkpoint: Option<Snapshot>,
    limit: usize,
}

impl HistoryLog {
    pub fn new(present: Snapshot) -> Self {
        Self::with_limit(present, HISTORY_LIMIT)
    }

    /// A limit of zero is treated as one.
    pub fn with_limit(present: Snapshot, limit: usize) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
            checkpoint: None,
            limit: limit.max(1),
        }
    }

    pub fn present(&self) -> &Snapshot {
        &self.present
    }

    /// Oldest first.
    pub fn past(&self) -> &[Snapshot] {
        &self.past
    }

    /// Next redo last.
    pub fn future(&self) -> &[Snapshot] {
        &self.future
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Last committed snapshot, ignoring any pending preview.
    pub fn committed(&self) -> &Snapshot {
        self.checkpoint.as_ref().unwrap_or(&self.present)
    }

    pub fn has_pending_preview(&self) -> bool {
        self.checkpoint.is_some()
    }

    /// Shows `next` without recording an undo step.
    pub fn replace_present(&mut self, next: Snapshot) {
        if self.checkpoint.is_none() {
            self.checkpoint = Some(self.present.clone());
        }
        self.present = next;
        trace!("History preview replaced present");
    }

    /// Records an undo step and makes `next` the present.
    pub fn commit(&mut self, next: Snapshot) {
        let previous = match self.checkpoint.take() {
            Some(checkpoint) => checkpoint,
            None => std::mem::replace(&mut self.present, next.clone()),
        };
        self.present = next;
        self.past.push(previous);
        if self.past.len() > self.limit {
            let excess = self.past.len() - self.limit;
            self.past.drain(..excess);
        }
        self.future.clear();
        trace!("History commit, undo depth {}", self.past.len());
    }

    /// Drops a pending preview, restoring the last committed present.
    /// Returns false when nothing was pending.
    pub fn cancel_preview(&mut self) -> bool {
        match self.checkpoint.take() {
            Some(checkpoint) => {
                self.present = checkpoint;
                trace!("History preview cancelled");
                true
            }
            None => false,
        }
    }

    /// Steps back one commit. A pending preview is discarded first.
    pub fn undo(&mut self) -> bool {
        self.cancel_preview();
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        trace!("History undo, redo depth {}", self.future.len());
        true
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_preview();
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        trace!("History redo, undo depth {}", self.past.len());
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Forgets all undo and redo steps, keeping the present.
    pub fn clear(&mut self) {
        self.cancel_preview();
        self.past.clear();
        self.future.clear();
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}
