pub mod list;
pub mod parser;
pub mod storage;

pub use list::TaskList;
pub use parser::{create_task, parse, Command};
pub use storage::Storage;

use chrono::NaiveDate;
use std::fmt;

/// Dates are entered and stored as `YYYY-MM-DD`.
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Display format for dates in rendered task lines (e.g. `Aug 30 2025`).
const DATE_DISPLAY_FORMAT: &str = "%b %d %Y";

/// What flavor of task this is, and the dates that come with it.
///
/// A date that failed to parse is carried as `None` rather than an error:
/// it renders as `invalid date` and serializes as an empty field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { by: Option<NaiveDate> },
    Event { from: Option<NaiveDate>, to: Option<NaiveDate> },
}

/// A single tracked task: description, done flag, and kind-specific dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

/// Parse a user-supplied date string, degrading failures to `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT).ok()
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Task {
            description: description.into(),
            done: false,
            kind: TaskKind::Todo,
        }
    }

    pub fn deadline(description: impl Into<String>, raw_by: &str) -> Self {
        Task {
            description: description.into(),
            done: false,
            kind: TaskKind::Deadline {
                by: parse_date(raw_by),
            },
        }
    }

    pub fn event(description: impl Into<String>, raw_from: &str, raw_to: &str) -> Self {
        Task {
            description: description.into(),
            done: false,
            kind: TaskKind::Event {
                from: parse_date(raw_from),
                to: parse_date(raw_to),
            },
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// `X` when done, a single space otherwise.
    pub fn status_icon(&self) -> &'static str {
        if self.done {
            "X"
        } else {
            " "
        }
    }

    /// One-letter tag used in rendered lines and the store file.
    pub fn type_tag(&self) -> &'static str {
        match self.kind {
            TaskKind::Todo => "T",
            TaskKind::Deadline { .. } => "D",
            TaskKind::Event { .. } => "E",
        }
    }
}

fn display_date(date: &Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format(DATE_DISPLAY_FORMAT).to_string(),
        None => "invalid date".to_string(),
    }
}

/// ISO form for the store file; empty string for a date that never parsed.
pub(crate) fn iso_date(date: &Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format(DATE_INPUT_FORMAT).to_string(),
        None => String::new(),
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.type_tag(),
            self.status_icon(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", display_date(by)),
            TaskKind::Event { from, to } => {
                write!(f, " (from: {} to: {})", display_date(from), display_date(to))
            }
        }
    }
}
