use crate::{Errors, Operation};
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
use core::fmt::{self, Display, Formatter};

/// Wrapper around a recorded operation that contains additional metadata.
#[derive(Debug)]
pub(crate) struct Entry {
    pub operation: Operation,
    #[cfg(feature = "chrono")]
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn apply(&mut self) -> Result<(), Errors> {
        self.operation.apply()
    }

    pub fn undo(&mut self) -> Result<(), Errors> {
        self.operation.undo()
    }

    pub fn redo(&mut self) -> Result<(), Errors> {
        self.operation.redo()
    }
}

impl From<Operation> for Entry {
    #[cfg(not(feature = "chrono"))]
    fn from(operation: Operation) -> Self {
        Entry { operation }
    }

    #[cfg(feature = "chrono")]
    fn from(operation: Operation) -> Self {
        Entry {
            operation,
            created_at: Utc::now(),
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        (&self.operation as &dyn Display).fmt(f)
    }
}
