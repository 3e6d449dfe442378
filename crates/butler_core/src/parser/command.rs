//! Typed commands and command-level failures.

use crate::model::task::{Schedule, TaskValidationError};
use chrono::{NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A validated user command.
///
/// Indices are 0-based and already range-checked against the task count
/// the command was parsed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bye,
    List,
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        by: NaiveDate,
    },
    /// Window order is enforced when the task is built, not here.
    Event {
        description: String,
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    Mark {
        index: usize,
    },
    Unmark {
        index: usize,
    },
    Delete {
        index: usize,
    },
    Find {
        keyword: String,
    },
    Reschedule {
        index: usize,
        schedule: Schedule,
    },
}

impl Command {
    /// Whether a successful run changes the task list and must be saved.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Bye | Self::List | Self::Find { .. })
    }

    /// Keyword this command was spelled with.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Bye => "bye",
            Self::List => "list",
            Self::Todo { .. } => "todo",
            Self::Deadline { .. } => "deadline",
            Self::Event { .. } => "event",
            Self::Mark { .. } => "mark",
            Self::Unmark { .. } => "unmark",
            Self::Delete { .. } => "delete",
            Self::Find { .. } => "find",
            Self::Reschedule { .. } => "reschedule",
        }
    }
}

/// User-facing command failure.
///
/// `Display` is exactly the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    UnknownCommand,
    /// Absent delimiter or empty text where content is required.
    MissingField(&'static str),
    /// Index is not an integer, or a date/time matches no accepted spelling.
    MalformedValue(&'static str),
    IndexOutOfRange(&'static str),
    /// Task construction or reschedule rejected the values.
    Task(TaskValidationError),
}

impl CommandError {
    /// Stable failure class for metadata-only logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown_command",
            Self::MissingField(_) => "missing_field",
            Self::MalformedValue(_) => "malformed_value",
            Self::IndexOutOfRange(_) => "index_out_of_range",
            Self::Task(_) => "invalid_task",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand => write!(f, "Sorry, I don't recognize that command."),
            Self::MissingField(message)
            | Self::MalformedValue(message)
            | Self::IndexOutOfRange(message) => write!(f, "{message}"),
            Self::Task(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Task(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for CommandError {
    fn from(value: TaskValidationError) -> Self {
        Self::Task(value)
    }
}
