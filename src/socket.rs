//! Notifications about changes to the undo stack.

use crate::State;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Sender, SyncSender};

/// Holds the connected slot, if any.
#[derive(Debug)]
pub(crate) struct Socket<S> {
    slot: Option<S>,
}

impl<S> Socket<S> {
    pub const fn new(slot: S) -> Socket<S> {
        Socket { slot: Some(slot) }
    }

    pub fn replace(&mut self, slot: S) -> Option<S> {
        self.slot.replace(slot)
    }

    pub fn take(&mut self) -> Option<S> {
        self.slot.take()
    }
}

impl<S> Default for Socket<S> {
    fn default() -> Self {
        Socket { slot: None }
    }
}

impl<S: Slot> Socket<S> {
    /// Emits the signals that describe the move from `old` to `new`.
    pub fn emit_changes(&mut self, old: State, new: State) {
        let Some(slot) = &mut self.slot else {
            return;
        };
        let (could_undo, can_undo) = (old.undoable > 0, new.undoable > 0);
        let (could_redo, can_redo) = (old.redoable > 0, new.redoable > 0);
        if could_undo != can_undo {
            slot.on_emit(Signal::Undo(can_undo));
        }
        if could_redo != can_redo {
            slot.on_emit(Signal::Redo(can_redo));
        }
        if old.undoable != new.undoable {
            slot.on_emit(Signal::Index(new.undoable));
        }
    }
}

/// A change to the undo stack, sent to the connected [`Slot`].
///
/// For one call on the stack, signals are sent in the order
/// `Undo`, `Redo`, `Index`, and only for the parts that changed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[non_exhaustive]
pub enum Signal {
    /// The stack can now undo (`true`) or can no longer undo (`false`).
    Undo(bool),
    /// The stack can now redo (`true`) or can no longer redo (`false`).
    Redo(bool),
    /// The cursor moved to the given index.
    Index(usize),
}

/// Receiver of [`Signal`]s, connected through [`Builder::connect`](crate::Builder::connect)
/// or [`UndoStack::connect`](crate::UndoStack::connect).
///
/// Signals are sent while the stack is locked, so a slot must not call
/// back into the stack that sent them.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use undostack::{Operation, Signal, UndoStack};
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let stack = UndoStack::builder().connect(sender).build();
///
/// stack.apply(Operation::new("Nothing")).unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undo(true)));
/// assert_eq!(iter.next(), Some(Signal::Index(1)));
/// assert_eq!(iter.next(), None);
///
/// stack.undo().unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undo(false)));
/// assert_eq!(iter.next(), Some(Signal::Redo(true)));
/// assert_eq!(iter.next(), Some(Signal::Index(0)));
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Called once for every signal.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

// A disconnected receiver is not an error for the stack.
impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        let _ = self.send(signal);
    }
}

impl Slot for SyncSender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        let _ = self.send(signal);
    }
}
