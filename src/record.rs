//! The unsynchronized cursor algorithm behind the undo stack.
//!
//! ```text
//!                  +---- index
//! len = 4          |
//! +---+---+---+---+ V
//! | 0 | 1 | 2 | 3 | 4
//! +---+---+---+---+
//! ```
//!
//! Entries before `index` are done and can be undone, entries at or after
//! `index` are undone and can be redone.

use crate::entry::Entry;
use crate::socket::Socket;
use crate::{Direction, Errors, Operation, Slot, State};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use tracing::{debug, trace, warn};

#[derive(Debug)]
pub(crate) struct Record<S> {
    pub entries: VecDeque<Entry>,
    index: usize,
    limit: NonZeroUsize,
    socket: Socket<S>,
}

impl<S> Record<S> {
    pub fn new(capacity: usize, limit: NonZeroUsize, socket: Socket<S>) -> Record<S> {
        Record {
            entries: VecDeque::with_capacity(capacity),
            index: 0,
            limit,
            socket,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.entries.len()
    }

    pub fn state(&self) -> State {
        State {
            undoable: self.index,
            redoable: self.entries.len().saturating_sub(self.index),
        }
    }

    pub fn undo_name(&self) -> Option<String> {
        let index = self.index.checked_sub(1)?;
        self.entries
            .get(index)
            .map(|e| e.operation.name().to_string())
    }

    pub fn redo_name(&self) -> Option<String> {
        self.entries
            .get(self.index)
            .map(|e| e.operation.name().to_string())
    }

    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.replace(slot)
    }

    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.take()
    }

    /// Keeps `0 <= index <= len`, returns `true` if the index was moved.
    fn clamp(&mut self) -> bool {
        let len = self.entries.len();
        if self.index > len {
            self.index = len;
            true
        } else {
            false
        }
    }

    fn heal(&mut self) {
        let old = self.index;
        if self.clamp() {
            warn!(old, index = self.index, "cursor was out of range and has been clamped");
        }
    }

    #[cfg(test)]
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

impl<S: Slot> Record<S> {
    /// Appends the operation and applies it, or redoes the next operation if `None`.
    pub fn apply(&mut self, operation: Option<Operation>) -> Result<(), Errors> {
        self.heal();
        let Some(operation) = operation else {
            return self.redo_next();
        };
        let old = self.state();
        if old.redoable > 0 {
            debug!(dropped = old.redoable, "dropping undone operations");
            self.entries.truncate(self.index);
        }
        // If the limit is reached, pop off the oldest operation.
        if self.entries.len() == self.limit.get() {
            if let Some(evicted) = self.entries.pop_front() {
                debug!(operation = %evicted, "evicting oldest operation");
                self.index -= 1;
            }
        }
        self.entries.push_back(Entry::from(operation));
        if self.index >= self.entries.len() {
            return Ok(());
        }
        let entry = &mut self.entries[self.index];
        let result = entry.apply();
        log_pass(Direction::Apply, entry, self.index, &result);
        self.index += 1;
        self.socket.emit_changes(old, self.state());
        result
    }

    pub fn redo(&mut self) -> Result<(), Errors> {
        self.heal();
        self.redo_next()
    }

    fn redo_next(&mut self) -> Result<(), Errors> {
        if !self.can_redo() {
            trace!("nothing to redo");
            return Ok(());
        }
        let old = self.state();
        let entry = &mut self.entries[self.index];
        let result = entry.redo();
        log_pass(Direction::Redo, entry, self.index, &result);
        self.index += 1;
        self.socket.emit_changes(old, self.state());
        result
    }

    pub fn undo(&mut self) -> Result<(), Errors> {
        self.heal();
        if !self.can_undo() {
            trace!("nothing to undo");
            return Ok(());
        }
        let old = self.state();
        self.index -= 1;
        let entry = &mut self.entries[self.index];
        let result = entry.undo();
        log_pass(Direction::Undo, entry, self.index, &result);
        self.socket.emit_changes(old, self.state());
        result
    }

    pub fn clear(&mut self) {
        let old = self.state();
        debug!(dropped = self.entries.len(), "clearing undo stack");
        self.entries.clear();
        self.clamp();
        self.socket.emit_changes(old, self.state());
    }
}

fn log_pass(direction: Direction, entry: &Entry, index: usize, result: &Result<(), Errors>) {
    match result {
        Ok(()) => debug!(%direction, operation = %entry, index, "operation succeeded"),
        Err(errors) => warn!(
            %direction,
            operation = %entry,
            index,
            failures = errors.len(),
            "operation finished with failures"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::Record;
    use crate::socket::Socket;
    use crate::{from_fn, Operation, State};
    use std::num::NonZeroUsize;
    use tracing_test::traced_test;

    fn record(limit: usize) -> Record<()> {
        Record::new(0, NonZeroUsize::new(limit).unwrap(), Socket::default())
    }

    fn noop(name: &str) -> Operation {
        Operation::new(name).with(from_fn(|| Ok(()), || Ok(())))
    }

    #[test]
    #[traced_test]
    fn heals_out_of_range_index() {
        let mut record = record(usize::MAX);
        record.apply(Some(noop("a"))).unwrap();
        record.apply(Some(noop("b"))).unwrap();
        record.set_index(7);
        record.undo().unwrap();
        assert_eq!(record.state(), State { undoable: 1, redoable: 1 });
        assert!(logs_contain("cursor was out of range and has been clamped"));
    }

    #[test]
    fn heal_before_redo() {
        let mut record = record(usize::MAX);
        record.apply(Some(noop("a"))).unwrap();
        record.set_index(3);
        record.redo().unwrap();
        assert_eq!(record.state(), State { undoable: 1, redoable: 0 });
        record.set_index(9);
        record.apply(None).unwrap();
        assert_eq!(record.index(), 1);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut record = record(2);
        record.apply(Some(noop("a"))).unwrap();
        record.apply(Some(noop("b"))).unwrap();
        record.apply(Some(noop("c"))).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.index(), 2);
        assert_eq!(record.undo_name().as_deref(), Some("c"));
        record.undo().unwrap();
        record.undo().unwrap();
        record.undo().unwrap();
        assert_eq!(record.state(), State { undoable: 0, redoable: 2 });
        assert_eq!(record.redo_name().as_deref(), Some("b"));
    }

    #[test]
    fn truncates_before_evicting() {
        let mut record = record(2);
        record.apply(Some(noop("a"))).unwrap();
        record.apply(Some(noop("b"))).unwrap();
        record.undo().unwrap();
        record.apply(Some(noop("c"))).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.undo_name().as_deref(), Some("c"));
        record.undo().unwrap();
        assert_eq!(record.undo_name().as_deref(), Some("a"));
    }

    #[test]
    #[traced_test]
    fn logs_failures() {
        let mut record = record(usize::MAX);
        let op = Operation::new("broken").with(from_fn(|| Err("boom".into()), || Ok(())));
        assert!(record.apply(Some(op)).is_err());
        assert!(logs_contain("operation finished with failures"));
        assert!(logs_contain("failures=1"));
    }
}
