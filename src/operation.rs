use crate::{Action, ActionError, Direction, Errors};
use core::fmt::{self, Debug, Display, Formatter};

/// A named group of actions that is done, undone, and redone as one step.
///
/// The actions are applied in the order they were added and undone in
/// reverse order. Every action runs during a pass even if an earlier one
/// fails, and all failures are collected into [`Errors`].
///
/// # Examples
/// ```
/// # use undostack::{from_fn, Operation};
/// let op = Operation::new("Receive guest")
///     .with(from_fn(|| Ok(()), || Ok(())))
///     .with(from_fn(|| Ok(()), || Ok(())));
/// assert_eq!(op.name(), "Receive guest");
/// assert_eq!(op.len(), 2);
/// ```
pub struct Operation {
    name: String,
    actions: Vec<Box<dyn Action + Send>>,
}

impl Operation {
    /// Returns a new operation without any actions.
    pub fn new(name: impl Into<String>) -> Operation {
        Operation {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    /// Adds the action to the end of the operation.
    pub fn push(&mut self, action: impl Action + Send + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Adds the action to the end of the operation and returns the operation.
    pub fn with(mut self, action: impl Action + Send + 'static) -> Operation {
        self.push(action);
        self
    }

    /// Returns the display name of the operation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of actions in the operation.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the operation has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub(crate) fn apply(&mut self) -> Result<(), Errors> {
        let mut errors = Errors::new();
        for (i, action) in self.actions.iter_mut().enumerate() {
            if let Err(err) = action.apply() {
                errors.push(ActionError::new(&self.name, i, Direction::Apply, err));
            }
        }
        errors.into_result()
    }

    pub(crate) fn undo(&mut self) -> Result<(), Errors> {
        let mut errors = Errors::new();
        for (i, action) in self.actions.iter_mut().enumerate().rev() {
            if let Err(err) = action.undo() {
                errors.push(ActionError::new(&self.name, i, Direction::Undo, err));
            }
        }
        errors.into_result()
    }

    pub(crate) fn redo(&mut self) -> Result<(), Errors> {
        let mut errors = Errors::new();
        for (i, action) in self.actions.iter_mut().enumerate() {
            if let Err(err) = action.redo() {
                errors.push(ActionError::new(&self.name, i, Direction::Redo, err));
            }
        }
        errors.into_result()
    }
}

impl Debug for Operation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .finish()
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::Operation;
    use crate::{Action, Direction};
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    struct Step {
        id: char,
        log: Log,
        fail_apply: bool,
        fail_undo: bool,
    }

    impl Step {
        fn new(id: char, log: &Log) -> Step {
            Step {
                id,
                log: log.clone(),
                fail_apply: false,
                fail_undo: false,
            }
        }
    }

    impl Action for Step {
        fn apply(&mut self) -> crate::Result {
            self.log.lock().unwrap().push(format!("apply {}", self.id));
            if self.fail_apply {
                return Err(format!("{} cannot apply", self.id).into());
            }
            Ok(())
        }

        fn undo(&mut self) -> crate::Result {
            self.log.lock().unwrap().push(format!("undo {}", self.id));
            if self.fail_undo {
                return Err(format!("{} cannot undo", self.id).into());
            }
            Ok(())
        }
    }

    fn drain(log: &Log) -> Vec<String> {
        log.lock().unwrap().drain(..).collect()
    }

    #[test]
    fn forward_then_reverse() {
        let log = Log::default();
        let mut op = Operation::new("abc")
            .with(Step::new('a', &log))
            .with(Step::new('b', &log))
            .with(Step::new('c', &log));
        op.apply().unwrap();
        assert_eq!(drain(&log), ["apply a", "apply b", "apply c"]);
        op.undo().unwrap();
        assert_eq!(drain(&log), ["undo c", "undo b", "undo a"]);
        op.redo().unwrap();
        assert_eq!(drain(&log), ["apply a", "apply b", "apply c"]);
    }

    #[test]
    fn failure_does_not_stop_siblings() {
        let log = Log::default();
        let mut a = Step::new('a', &log);
        a.fail_apply = true;
        let mut c = Step::new('c', &log);
        c.fail_apply = true;
        c.fail_undo = true;
        let mut op = Operation::new("abc")
            .with(a)
            .with(Step::new('b', &log))
            .with(c);

        let errors = op.apply().unwrap_err();
        assert_eq!(drain(&log), ["apply a", "apply b", "apply c"]);
        assert_eq!(errors.len(), 2);
        let failed: Vec<_> = errors.iter().map(|e| e.position()).collect();
        assert_eq!(failed, [0, 2]);
        assert!(errors.iter().all(|e| e.direction() == Direction::Apply));
        assert!(errors.iter().all(|e| e.operation() == "abc"));

        let errors = op.undo().unwrap_err();
        assert_eq!(drain(&log), ["undo c", "undo b", "undo a"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().inner().to_string(), "c cannot undo");
    }

    #[test]
    fn empty_operation_succeeds() {
        let mut op = Operation::new("nothing");
        assert!(op.is_empty());
        assert!(op.apply().is_ok());
        assert!(op.undo().is_ok());
        assert_eq!(format!("{op}"), "nothing");
        assert_eq!(format!("{op:?}"), r#"Operation { name: "nothing", actions: 0 }"#);
    }
}
