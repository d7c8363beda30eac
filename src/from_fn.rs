use crate::Action;
use core::fmt::{self, Debug, Formatter};

/// Creates an action from the provided `apply` and `undo` functions.
///
/// # Examples
/// ```
/// # use std::sync::atomic::{AtomicUsize, Ordering};
/// # use std::sync::Arc;
/// # use undostack::{from_fn, Operation, UndoStack};
/// let seats = Arc::new(AtomicUsize::new(0));
/// let (take, give) = (seats.clone(), seats.clone());
/// let op = Operation::new("Take seat").with(from_fn(
///     move || {
///         take.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     },
///     move || {
///         give.fetch_sub(1, Ordering::SeqCst);
///         Ok(())
///     },
/// ));
///
/// let stack = UndoStack::new();
/// stack.apply(op).unwrap();
/// assert_eq!(seats.load(Ordering::SeqCst), 1);
/// stack.undo().unwrap();
/// assert_eq!(seats.load(Ordering::SeqCst), 0);
/// ```
pub fn from_fn<F, G>(apply: F, undo: G) -> FromFn<F, G>
where
    F: FnMut() -> crate::Result,
    G: FnMut() -> crate::Result,
{
    FromFn { apply, undo }
}

/// Action made from a pair of functions.
///
/// Created by the [`from_fn`] function.
#[derive(Clone)]
pub struct FromFn<F, G> {
    apply: F,
    undo: G,
}

impl<F, G> Action for FromFn<F, G>
where
    F: FnMut() -> crate::Result,
    G: FnMut() -> crate::Result,
{
    fn apply(&mut self) -> crate::Result {
        (self.apply)()
    }

    fn undo(&mut self) -> crate::Result {
        (self.undo)()
    }
}

impl<F, G> Debug for FromFn<F, G> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}
