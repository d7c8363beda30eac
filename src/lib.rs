//! Provides a thread-safe, linear undo-redo stack for the command pattern.
//!
//! All modifications are done by grouping [`Action`]s into named
//! [`Operation`]s and handing them to an [`UndoStack`]. Each action knows how
//! to undo the changes it applies, so the stack can roll the host's state
//! backwards and forwards one operation at a time.
//!
//! # Features
//!
//! * [`Action`] provides the base functionality for all actions.
//! * [`Operation`] groups actions into one history entry. Its actions are
//!   applied in order and undone in reverse order.
//! * [`UndoStack`] provides linear undo-redo functionality and can be shared
//!   between threads. Applying a new operation after undoing drops the undone
//!   operations.
//! * Every action in an operation always runs, even if a sibling fails.
//!   All failures are collected into [`Errors`].
//! * The amount of operations being tracked can be configured through the
//!   [`Builder`] so only the `N` most recent operations are stored.
//! * State changes can be observed by connecting a [`Slot`].
//! * Configurable display formatting is provided through [`UndoStack::display`].
//!   Time stamps are shown when the `chrono` feature is enabled and colors
//!   when the `colored` feature is enabled.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use undostack::{Action, Operation, UndoStack};
//!
//! struct Say {
//!     log: Arc<Mutex<Vec<&'static str>>>,
//!     apply: &'static str,
//!     undo: &'static str,
//! }
//!
//! impl Action for Say {
//!     fn apply(&mut self) -> undostack::Result {
//!         self.log.lock().unwrap().push(self.apply);
//!         Ok(())
//!     }
//!
//!     fn undo(&mut self) -> undostack::Result {
//!         self.log.lock().unwrap().push(self.undo);
//!         Ok(())
//!     }
//! }
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let receive = Operation::new("Receive guest")
//!     .with(Say { log: log.clone(), apply: "welcome", undo: "go away" })
//!     .with(Say { log: log.clone(), apply: "sit", undo: "stand" });
//!
//! let stack = UndoStack::new();
//! stack.apply(receive).unwrap();
//! stack.undo().unwrap();
//! stack.redo().unwrap();
//! assert_eq!(
//!     *log.lock().unwrap(),
//!     ["welcome", "sit", "stand", "go away", "welcome", "sit"]
//! );
//! ```

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod entry;
mod error;
mod format;
mod from_fn;
mod operation;
mod record;
mod socket;
mod stack;

pub use self::{
    error::{ActionError, Direction, Errors},
    from_fn::{from_fn, FromFn},
    operation::Operation,
    socket::{Signal, Slot},
    stack::{Builder, Display, State, UndoStack},
};

/// The error type returned by a single action.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A specialized Result type for actions.
pub type Result = core::result::Result<(), BoxError>;

/// Base functionality for all actions.
pub trait Action {
    /// Applies the action and returns `Ok` if everything went fine,
    /// and `Err` if something went wrong.
    fn apply(&mut self) -> Result;

    /// Restores the state as it was before the action was applied
    /// and returns `Ok` if everything went fine, and `Err` if something went wrong.
    fn undo(&mut self) -> Result;

    /// Reapplies the action and returns `Ok` if everything went fine,
    /// and `Err` if something went wrong.
    ///
    /// The default implementation uses the [`apply`](Action::apply) implementation.
    fn redo(&mut self) -> Result {
        self.apply()
    }
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn apply(&mut self) -> Result {
        (**self).apply()
    }

    fn undo(&mut self) -> Result {
        (**self).undo()
    }

    fn redo(&mut self) -> Result {
        (**self).redo()
    }
}
