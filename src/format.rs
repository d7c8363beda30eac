#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
#[cfg(feature = "colored")]
use colored::Colorize;
use core::fmt;

#[cfg(feature = "chrono")]
pub(crate) fn default_elapsed(now: DateTime<Utc>, at: DateTime<Utc>) -> String {
    let elapsed = (now - at).to_std().unwrap_or_default();
    format!("{elapsed:.1?}")
}

/// The parts of a listed line that can be styled.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Part {
    Index,
    Head,
    #[cfg(feature = "chrono")]
    Elapsed,
    Name,
}

/// Which parts of a listing are shown and how.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Format {
    #[cfg(feature = "colored")]
    pub colored: bool,
    pub detailed: bool,
    pub head: bool,
}

impl Default for Format {
    fn default() -> Self {
        Format {
            #[cfg(feature = "colored")]
            colored: true,
            detailed: true,
            head: true,
        }
    }
}

impl Format {
    pub fn write(self, f: &mut fmt::Formatter, part: Part, text: &str) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            return match part {
                Part::Index => write!(f, "{}", text.yellow().bold()),
                Part::Head => write!(f, "{}", text.cyan().bold()),
                #[cfg(feature = "chrono")]
                Part::Elapsed => write!(f, "{}", text.yellow()),
                Part::Name => f.write_str(text),
            };
        }
        let _ = part;
        f.write_str(text)
    }

    /// Writes ` <line>` where `line` is the first non-empty line of `name`.
    pub fn name(self, f: &mut fmt::Formatter, name: &str) -> fmt::Result {
        let line = name
            .lines()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or_default();
        f.write_str(" ")?;
        self.write(f, Part::Name, line)
    }
}
