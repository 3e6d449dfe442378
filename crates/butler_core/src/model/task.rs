//! Task entity and its three variants.
//!
//! # Responsibility
//! - Provide the shared completion state for todos, deadlines and events.
//! - Render tasks for display and expose the derived type tag.
//!
//! # Invariants
//! - Descriptions are stored trimmed and on a single line, so every task
//!   can be written as one storage line and read back unchanged.
//! - Mark/unmark only flip `is_done`.
//! - Reschedule re-validates construction rules and leaves prior values
//!   intact when the new values are rejected.

use chrono::{NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DISPLAY_DATE: &str = "%b %-d %Y";
const DISPLAY_DATETIME: &str = "%b %-d %Y %H:%M";

/// One-letter discriminator of a task variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskTag {
    Todo,
    Deadline,
    Event,
}

impl TaskTag {
    /// Storage code written as the first field of a persisted line.
    pub fn code(self) -> &'static str {
        match self {
            Self::Todo => "T",
            Self::Deadline => "D",
            Self::Event => "E",
        }
    }

    /// Display icon shown in front of the done marker.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Todo => "[T]",
            Self::Deadline => "[D]",
            Self::Event => "[E]",
        }
    }

    /// Parses a storage code back into a tag.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "T" => Some(Self::Todo),
            "D" => Some(Self::Deadline),
            "E" => Some(Self::Event),
            _ => None,
        }
    }
}

/// Variant-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    /// Due on a calendar date.
    Deadline { by: NaiveDate },
    /// Occupies a time range; `to` is never before `from`.
    Event {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
}

impl TaskKind {
    pub fn tag(&self) -> TaskTag {
        match self {
            Self::Todo => TaskTag::Todo,
            Self::Deadline { .. } => TaskTag::Deadline,
            Self::Event { .. } => TaskTag::Event,
        }
    }
}

/// Replacement dates for an existing deadline or event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    By(NaiveDate),
    Window {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
}

/// Construction or reschedule rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyDescription,
    /// Description contains a line break.
    MultilineDescription,
    InvalidEventWindow {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    /// The replacement schedule does not fit the task variant.
    RescheduleMismatch { tag: TaskTag },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Task description cannot be empty."),
            Self::MultilineDescription => {
                write!(f, "Task description must fit on a single line.")
            }
            Self::InvalidEventWindow { .. } => {
                write!(f, "The event end time cannot be before its start time.")
            }
            Self::RescheduleMismatch { tag } => match tag {
                TaskTag::Todo => write!(f, "A todo has no date to reschedule."),
                TaskTag::Deadline => write!(
                    f,
                    "A deadline can only be rescheduled with '/by <yyyy-MM-dd>'."
                ),
                TaskTag::Event => write!(
                    f,
                    "An event can only be rescheduled with '/from <start> /to <end>'."
                ),
            },
        }
    }
}

impl Error for TaskValidationError {}

/// A single trackable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    is_done: bool,
    kind: TaskKind,
}

impl Task {
    /// Creates a plain todo.
    pub fn todo(description: impl Into<String>) -> Result<Self, TaskValidationError> {
        Self::new(description, TaskKind::Todo)
    }

    /// Creates a deadline due on `by`.
    pub fn deadline(
        description: impl Into<String>,
        by: NaiveDate,
    ) -> Result<Self, TaskValidationError> {
        Self::new(description, TaskKind::Deadline { by })
    }

    /// Creates an event spanning `from..=to`.
    ///
    /// # Errors
    /// - `InvalidEventWindow` when `to` is before `from`.
    pub fn event(
        description: impl Into<String>,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Self, TaskValidationError> {
        Self::new(description, TaskKind::Event { from, to })
    }

    /// Creates a task of any variant, enforcing every construction rule.
    ///
    /// Surrounding whitespace is trimmed from `description`.
    ///
    /// # Errors
    /// - `EmptyDescription` when nothing but whitespace is left.
    /// - `MultilineDescription` when it contains `\n` or `\r`.
    /// - `InvalidEventWindow` for an event ending before it starts.
    pub fn new(description: impl Into<String>, kind: TaskKind) -> Result<Self, TaskValidationError> {
        let description = normalize_description(description.into())?;
        if let TaskKind::Event { from, to } = kind {
            validate_window(from, to)?;
        }
        Ok(Self {
            description,
            is_done: false,
            kind,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn tag(&self) -> TaskTag {
        self.kind.tag()
    }

    pub fn mark(&mut self) {
        self.is_done = true;
    }

    pub fn unmark(&mut self) {
        self.is_done = false;
    }

    /// `[X]` when done, `[ ]` otherwise.
    pub fn status_icon(&self) -> &'static str {
        if self.is_done {
            "[X]"
        } else {
            "[ ]"
        }
    }

    /// Replaces the deadline date or the event window.
    ///
    /// # Errors
    /// - `RescheduleMismatch` for todos, or when the schedule shape does not
    ///   match the variant.
    /// - `InvalidEventWindow` when the new window ends before it starts.
    pub fn reschedule(&mut self, schedule: Schedule) -> Result<(), TaskValidationError> {
        match (&mut self.kind, schedule) {
            (TaskKind::Deadline { by }, Schedule::By(new_by)) => {
                *by = new_by;
                Ok(())
            }
            (TaskKind::Event { from, to }, Schedule::Window { from: new_from, to: new_to }) => {
                validate_window(new_from, new_to)?;
                *from = new_from;
                *to = new_to;
                Ok(())
            }
            (kind, _) => Err(TaskValidationError::RescheduleMismatch { tag: kind.tag() }),
        }
    }

    /// One persisted line for this task.
    pub fn serialize(&self) -> String {
        crate::codec::encode(self)
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {}",
            self.tag().icon(),
            self.status_icon(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by.format(DISPLAY_DATE)),
            TaskKind::Event { from, to } => write!(
                f,
                " (from: {}, to: {})",
                from.format(DISPLAY_DATETIME),
                to.format(DISPLAY_DATETIME)
            ),
        }
    }
}

fn normalize_description(description: String) -> Result<String, TaskValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyDescription);
    }
    if trimmed.contains(['\n', '\r']) {
        return Err(TaskValidationError::MultilineDescription);
    }
    if trimmed.len() == description.len() {
        Ok(description)
    } else {
        Ok(trimmed.to_string())
    }
}

fn validate_window(from: NaiveDateTime, to: NaiveDateTime) -> Result<(), TaskValidationError> {
    if to < from {
        return Err(TaskValidationError::InvalidEventWindow { from, to });
    }
    Ok(())
}
