use crate::BoxError;
use core::fmt::{self, Display, Formatter};
use core::slice;
use std::error::Error as StdError;
use std::vec;
use thiserror::Error;

/// The pass over an operation's actions during which a failure happened.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Direction {
    /// The operation was applied for the first time.
    Apply,
    /// The operation was undone.
    Undo,
    /// The operation was redone.
    Redo,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Direction::Apply => "apply",
            Direction::Undo => "undo",
            Direction::Redo => "redo",
        })
    }
}

/// A failure returned by one action of an operation.
///
/// The message only names the action. The error returned by the action is
/// available through [`source`](StdError::source).
#[derive(Debug, Error)]
#[error("failed to {direction} action {position} of `{operation}`")]
pub struct ActionError {
    operation: String,
    position: usize,
    direction: Direction,
    source: BoxError,
}

impl ActionError {
    pub(crate) fn new(
        operation: &str,
        position: usize,
        direction: Direction,
        source: BoxError,
    ) -> ActionError {
        ActionError {
            operation: operation.to_string(),
            position,
            direction,
            source,
        }
    }

    /// Returns the name of the operation the action belongs to.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Returns the position of the action in its operation.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the pass that failed.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the error returned by the action.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.source
    }

    /// Consumes the error, returning the error returned by the action.
    pub fn into_inner(self) -> BoxError {
        self.source
    }
}

/// All action failures collected during one pass over an operation.
///
/// The `Display` output lists every failure followed by the error returned
/// by its action.
///
/// An empty collection means the pass succeeded, see [`Errors::into_result`].
#[derive(Debug, Default)]
pub struct Errors {
    errors: Vec<ActionError>,
}

impl Errors {
    /// Returns an empty collection.
    pub fn new() -> Errors {
        Errors::default()
    }

    /// Adds a failure to the collection.
    pub fn push(&mut self, error: ActionError) {
        self.errors.push(error);
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if no failures were collected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns an iterator over the failures in the order they happened.
    pub fn iter(&self) -> slice::Iter<'_, ActionError> {
        self.errors.iter()
    }

    /// Returns `Ok` if the collection is empty, otherwise the collection as `Err`.
    pub fn into_result(self) -> Result<(), Errors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for Errors {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.errors.len() == 1 {
            writeln!(f, "1 error occurred:")?;
        } else {
            writeln!(f, "{} errors occurred:", self.errors.len())?;
        }
        for error in &self.errors {
            writeln!(f, "\t* {error}: {}", error.source)?;
        }
        Ok(())
    }
}

impl StdError for Errors {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.errors.first().map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<ActionError> for Errors {
    fn from(error: ActionError) -> Self {
        Errors {
            errors: vec![error],
        }
    }
}

impl Extend<ActionError> for Errors {
    fn extend<I: IntoIterator<Item = ActionError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for Errors {
    type Item = ActionError;
    type IntoIter = vec::IntoIter<ActionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a ActionError;
    type IntoIter = slice::Iter<'a, ActionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionError, Direction, Errors};
    use std::error::Error;

    fn failure(position: usize, msg: &str) -> ActionError {
        ActionError::new("Receive guest", position, Direction::Undo, msg.into())
    }

    #[test]
    fn empty_collapses_to_ok() {
        assert!(Errors::new().into_result().is_ok());
    }

    #[test]
    fn keeps_every_failure() {
        let mut errors = Errors::new();
        errors.push(failure(0, "door is locked"));
        errors.push(failure(1, "no chairs left"));
        let errors = errors.into_result().unwrap_err();
        assert_eq!(errors.len(), 2);
        let positions: Vec<_> = errors.iter().map(ActionError::position).collect();
        assert_eq!(positions, [0, 1]);
        assert_eq!(
            errors.to_string(),
            "2 errors occurred:\n\
             \t* failed to undo action 0 of `Receive guest`: door is locked\n\
             \t* failed to undo action 1 of `Receive guest`: no chairs left\n"
        );
    }

    #[test]
    fn single_failure_message() {
        let errors = Errors::from(failure(3, "boom"));
        assert!(errors.to_string().starts_with("1 error occurred:\n"));
    }

    #[test]
    fn source_chain() {
        let error = failure(0, "door is locked");
        assert_eq!(error.source().unwrap().to_string(), "door is locked");
        assert_eq!(error.inner().to_string(), "door is locked");
        let errors = Errors::from(error);
        let first = errors.source().unwrap();
        assert_eq!(first.to_string(), "failed to undo action 0 of `Receive guest`");
        assert_eq!(first.source().unwrap().to_string(), "door is locked");
    }

    #[test]
    fn chain_names_the_inner_error_once() {
        let error = failure(2, "door is locked");
        let mut messages = vec![error.to_string()];
        let mut source = error.source();
        while let Some(inner) = source {
            messages.push(inner.to_string());
            source = inner.source();
        }
        assert_eq!(
            messages,
            ["failed to undo action 2 of `Receive guest`", "door is locked"]
        );
    }
}
