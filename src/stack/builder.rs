use crate::record::Record;
use crate::socket::Socket;
use crate::UndoStack;
use std::num::NonZeroUsize;

/// Builder for an [`UndoStack`].
///
/// # Examples
/// ```
/// # use undostack::{Signal, UndoStack};
/// let stack = UndoStack::builder()
///     .limit(100)
///     .capacity(100)
///     .connect(|s: Signal| { dbg!(s); })
///     .build();
/// assert_eq!(stack.limit(), 100);
/// ```
#[derive(Debug)]
pub struct Builder<S = ()> {
    capacity: usize,
    limit: NonZeroUsize,
    socket: Socket<S>,
}

impl<S> Builder<S> {
    /// Sets the capacity for the stack.
    pub fn capacity(mut self, capacity: usize) -> Builder<S> {
        self.capacity = capacity;
        self
    }

    /// Sets the `limit` of the stack.
    ///
    /// When a new operation is applied to a full stack, the oldest operation is dropped.
    ///
    /// # Panics
    /// Panics if `limit` is `0`.
    pub fn limit(mut self, limit: usize) -> Builder<S> {
        self.limit = NonZeroUsize::new(limit).expect("limit can not be `0`");
        self
    }

    /// Connects the slot.
    pub fn connect<T>(self, slot: T) -> Builder<T> {
        Builder {
            capacity: self.capacity,
            limit: self.limit,
            socket: Socket::new(slot),
        }
    }

    /// Builds the stack.
    pub fn build(self) -> UndoStack<S> {
        UndoStack::from_record(Record::new(self.capacity, self.limit, self.socket))
    }
}

impl<S> Default for Builder<S> {
    fn default() -> Self {
        Builder {
            capacity: 0,
            limit: NonZeroUsize::MAX,
            socket: Socket::default(),
        }
    }
}
