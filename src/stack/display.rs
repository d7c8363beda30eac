use crate::entry::Entry;
use crate::format::{Format, Part};
use crate::UndoStack;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
use core::fmt;
use core::iter;

/// Configurable display formatting for the [`UndoStack`].
///
/// Operations are listed newest first, one per line, prefixed with the
/// number of operations that are done when the cursor is right after them.
/// The line at the cursor is marked with `[HEAD]`. The stack is locked
/// while it is being formatted.
///
/// # Examples
/// ```
/// # use undostack::{Operation, UndoStack};
/// let stack = UndoStack::new();
/// stack.apply(Operation::new("Receive guest")).unwrap();
/// stack.apply(Operation::new("Serve tea")).unwrap();
/// stack.undo().unwrap();
///
/// let mut display = stack.display();
/// display.detailed(false);
/// # #[cfg(feature = "colored")]
/// # display.colored(false);
/// assert_eq!(
///     display.to_string(),
///     "2 Serve tea\n1 [HEAD] Receive guest\n0\n"
/// );
/// ```
pub struct Display<'a, S> {
    stack: &'a UndoStack<S>,
    format: Format,
    #[cfg(feature = "chrono")]
    elapsed_fmt: &'a dyn Fn(DateTime<Utc>, DateTime<Utc>) -> String,
}

impl<'a, S> Display<'a, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show detailed output (on by default).
    ///
    /// With the `chrono` feature this shows the time since each operation
    /// was recorded.
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.format.detailed = on;
        self
    }

    /// Mark the current position in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }

    /// Sets the format used to display the elapsed time.
    ///
    /// The first input parameter is the current time.
    /// The second input parameter is the time the operation was recorded.
    #[cfg(feature = "chrono")]
    pub fn set_elapsed_fmt(
        &mut self,
        elapsed_fmt: &'a dyn Fn(DateTime<Utc>, DateTime<Utc>) -> String,
    ) -> &mut Self {
        self.elapsed_fmt = elapsed_fmt;
        self
    }

    fn line(&self, f: &mut fmt::Formatter, line: Line) -> fmt::Result {
        self.format.write(f, Part::Index, &line.at.to_string())?;
        #[cfg(feature = "chrono")]
        if let Some(entry) = line.entry.filter(|_| self.format.detailed) {
            let elapsed = (self.elapsed_fmt)(line.now, entry.created_at);
            f.write_str(" ")?;
            self.format.write(f, Part::Elapsed, &elapsed)?;
        }
        if self.format.head && line.is_head {
            f.write_str(" [")?;
            self.format.write(f, Part::Head, "HEAD")?;
            f.write_str("]")?;
        }
        if let Some(entry) = line.entry {
            self.format.name(f, entry.operation.name())?;
        }
        writeln!(f)
    }
}

struct Line<'e> {
    at: usize,
    is_head: bool,
    entry: Option<&'e Entry>,
    #[cfg(feature = "chrono")]
    now: DateTime<Utc>,
}

impl<'a, S> From<&'a UndoStack<S>> for Display<'a, S> {
    fn from(stack: &'a UndoStack<S>) -> Self {
        Display {
            stack,
            format: Format::default(),
            #[cfg(feature = "chrono")]
            elapsed_fmt: &crate::format::default_elapsed,
        }
    }
}

impl<S> fmt::Display for Display<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[cfg(feature = "chrono")]
        let now = Utc::now();
        let record = self.stack.lock();
        let head = record.index();
        let lines = record
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i + 1, Some(entry)))
            .rev()
            .chain(iter::once((0, None)));
        for (at, entry) in lines {
            self.line(
                f,
                Line {
                    at,
                    is_head: at == head,
                    entry,
                    #[cfg(feature = "chrono")]
                    now,
                },
            )?;
        }
        Ok(())
    }
}
