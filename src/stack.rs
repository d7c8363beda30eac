//! A thread-safe, linear undo stack.

mod builder;
mod display;

pub use builder::Builder;
pub use display::Display;

use crate::record::Record;
use crate::{Errors, Operation, Slot};
use core::fmt::{self, Debug, Formatter};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

/// The number of operations that can be undone and redone.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct State {
    /// Operations before the cursor.
    pub undoable: usize,
    /// Operations at or after the cursor.
    pub redoable: usize,
}

/// A linear history of operations.
///
/// The stack can roll the host's state backwards and forwards by using
/// the undo and redo methods. Applying a new operation drops every
/// operation that has been undone but not redone.
///
/// All methods take `&self` and lock the whole stack for their full
/// duration, including the time spent running the actions. An action that
/// blocks keeps every other caller waiting. Actions must not call back into
/// the stack that runs them.
///
/// # Examples
/// ```
/// # use undostack::{from_fn, Operation, State, UndoStack};
/// # let op = |name: &str| Operation::new(name).with(from_fn(|| Ok(()), || Ok(())));
/// let stack = UndoStack::new();
/// stack.apply(op("a")).unwrap();
/// stack.apply(op("b")).unwrap();
/// stack.undo().unwrap();
/// assert_eq!(stack.state(), State { undoable: 1, redoable: 1 });
///
/// // Applying a new operation drops `b`.
/// stack.apply(op("c")).unwrap();
/// assert_eq!(stack.state(), State { undoable: 2, redoable: 0 });
/// assert_eq!(stack.undo_name().as_deref(), Some("c"));
/// ```
pub struct UndoStack<S = ()> {
    record: Mutex<Record<S>>,
}

impl UndoStack {
    /// Returns a new, empty undo stack.
    pub fn new() -> UndoStack {
        Builder::default().build()
    }

    /// Returns a builder for an undo stack.
    pub fn builder() -> Builder {
        Builder::default()
    }
}

impl<S> UndoStack<S> {
    pub(crate) fn from_record(record: Record<S>) -> UndoStack<S> {
        UndoStack {
            record: Mutex::new(record),
        }
    }

    /// A poisoned lock means an action panicked. The record is still
    /// structurally sound and the next entry point clamps the cursor.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Record<S>> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the number of operations that can be undone and redone.
    pub fn state(&self) -> State {
        self.lock().state()
    }

    /// Returns the number of operations in the stack.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the index of the next operation to redo.
    pub fn index(&self) -> usize {
        self.lock().index()
    }

    /// Returns the maximum number of operations the stack keeps.
    pub fn limit(&self) -> usize {
        self.lock().limit()
    }

    /// Returns `true` if the stack can undo.
    pub fn can_undo(&self) -> bool {
        self.lock().can_undo()
    }

    /// Returns `true` if the stack can redo.
    pub fn can_redo(&self) -> bool {
        self.lock().can_redo()
    }

    /// Returns the name of the operation the next call to [`undo`](UndoStack::undo) would undo.
    pub fn undo_name(&self) -> Option<String> {
        self.lock().undo_name()
    }

    /// Returns the name of the operation the next call to [`redo`](UndoStack::redo) would redo.
    pub fn redo_name(&self) -> Option<String> {
        self.lock().redo_name()
    }

    /// Sets how the signal should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&self, slot: S) -> Option<S> {
        self.lock().connect(slot)
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&self) -> Option<S> {
        self.lock().disconnect()
    }

    /// Returns a structure for configurable formatting of the stack.
    pub fn display(&self) -> Display<'_, S> {
        Display::from(self)
    }
}

impl<S: Slot> UndoStack<S> {
    /// Pushes the operation onto the stack and applies its actions in order.
    ///
    /// Operations that have been undone are dropped before the new operation
    /// is pushed. If the stack is full, the oldest operation is dropped.
    ///
    /// Calling `apply(None)` redoes the next operation, like [`redo`](UndoStack::redo).
    ///
    /// # Errors
    /// If any action fails, every failure is returned. The remaining actions
    /// still run and the operation still counts as done.
    pub fn apply(&self, operation: impl Into<Option<Operation>>) -> Result<(), Errors> {
        self.lock().apply(operation.into())
    }

    /// Undoes the last done operation by undoing its actions in reverse order.
    ///
    /// Does nothing if there is nothing to undo.
    ///
    /// # Errors
    /// If any action fails, every failure is returned. The remaining actions
    /// still run and the operation still counts as undone.
    pub fn undo(&self) -> Result<(), Errors> {
        self.lock().undo()
    }

    /// Redoes the last undone operation by redoing its actions in order.
    ///
    /// Does nothing if there is nothing to redo.
    ///
    /// # Errors
    /// If any action fails, every failure is returned. The remaining actions
    /// still run and the operation still counts as redone.
    pub fn redo(&self) -> Result<(), Errors> {
        self.lock().redo()
    }

    /// Removes all operations from the stack without undoing them.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<S> Default for UndoStack<S> {
    fn default() -> UndoStack<S> {
        Builder::default().build()
    }
}

impl<S> Debug for UndoStack<S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut d = f.debug_struct("UndoStack");
        match self.record.try_lock() {
            Ok(record) => d
                .field("len", &record.len())
                .field("index", &record.index())
                .field("limit", &record.limit()),
            Err(TryLockError::Poisoned(err)) => {
                let record = err.into_inner();
                d.field("len", &record.len())
                    .field("index", &record.index())
                    .field("limit", &record.limit())
            }
            Err(TryLockError::WouldBlock) => d.field("record", &format_args!("<locked>")),
        };
        d.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{State, UndoStack};
    use crate::{from_fn, Operation};
    use std::panic::{self, AssertUnwindSafe};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shareable_between_threads() {
        assert_send_sync::<UndoStack>();
        assert_send_sync::<UndoStack<std::sync::mpsc::Sender<crate::Signal>>>();
    }

    #[test]
    fn recovers_from_panicking_action() {
        let stack = UndoStack::new();
        let op = Operation::new("panics").with(from_fn(|| panic!("boom"), || Ok(())));
        let result = panic::catch_unwind(AssertUnwindSafe(|| stack.apply(op)));
        assert!(result.is_err());
        // The operation was recorded but never finished.
        assert_eq!(stack.state(), State { undoable: 0, redoable: 1 });
        stack.clear();
        assert_eq!(stack.state(), State::default());
    }

    #[test]
    fn debug() {
        let stack = UndoStack::new();
        assert_eq!(
            format!("{stack:?}"),
            format!("UndoStack {{ len: 0, index: 0, limit: {} }}", usize::MAX)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_state() {
        let stack = UndoStack::new();
        stack.apply(Operation::new("a")).unwrap();
        stack.apply(Operation::new("b")).unwrap();
        stack.undo().unwrap();
        let json = serde_json::to_string(&stack.state()).unwrap();
        assert_eq!(json, r#"{"undoable":1,"redoable":1}"#);
        let state: State = serde_json::from_str(&json).unwrap();
        assert_eq!(state, stack.state());
    }
}
