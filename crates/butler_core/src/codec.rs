//! Line codec for persisted tasks.
//!
//! # Responsibility
//! - Encode one task as one pipe-delimited line.
//! - Decode one line back into a task, reporting why a line is unusable.
//!
//! # Invariants
//! - `decode(encode(task)) == task` for every task; descriptions are stored
//!   trimmed and on one line.
//! - `encode(decode(line)) == line` for every line produced by `encode`.
//! - Header fields come from the left and date fields from the right, so a
//!   description may itself contain `|`.
//!
//! Line shapes:
//! - `T|<0|1>|<description>`
//! - `D|<0|1>|<description>|<yyyy-MM-dd>`
//! - `E|<0|1>|<description>|<yyyy-MM-ddTHH:mm>|<yyyy-MM-ddTHH:mm>`

use crate::datetime::{format_iso_date, format_iso_datetime, parse_iso_date, parse_iso_datetime};
use crate::model::task::{Task, TaskKind, TaskTag, TaskValidationError};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const FIELD_SEPARATOR: &str = "|";

static FIELD_DELIMITER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\|\s*").expect("valid field delimiter regex"));

/// Reason a persisted line could not be turned into a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer fields than the variant requires.
    MissingFields { found: usize },
    UnknownTag(String),
    InvalidDate(String),
    Invalid(TaskValidationError),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields { found } => write!(f, "missing fields (found {found})"),
            Self::UnknownTag(tag) => write!(f, "unknown type tag `{tag}`"),
            Self::InvalidDate(value) => write!(f, "invalid date field `{value}`"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl DecodeError {
    /// Stable reason code for metadata-only logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields { .. } => "missing_fields",
            Self::UnknownTag(_) => "unknown_tag",
            Self::InvalidDate(_) => "invalid_date",
            Self::Invalid(_) => "invalid_task",
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for DecodeError {
    fn from(value: TaskValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Encodes a task as one storage line (no trailing newline).
pub fn encode(task: &Task) -> String {
    let mut fields = vec![
        task.tag().code().to_string(),
        done_flag(task.is_done()).to_string(),
        task.description().to_string(),
    ];
    match task.kind() {
        TaskKind::Todo => {}
        TaskKind::Deadline { by } => fields.push(format_iso_date(*by)),
        TaskKind::Event { from, to } => {
            fields.push(format_iso_datetime(*from));
            fields.push(format_iso_datetime(*to));
        }
    }
    fields.join(FIELD_SEPARATOR)
}

/// Decodes one storage line.
///
/// Whitespace around each `|` and around the whole line is ignored.
pub fn decode(line: &str) -> Result<Task, DecodeError> {
    let line = line.trim();
    let delimiters: Vec<(usize, usize)> = FIELD_DELIMITER_RE
        .find_iter(line)
        .map(|found| (found.start(), found.end()))
        .collect();
    if delimiters.len() < 2 {
        return Err(DecodeError::MissingFields {
            found: delimiters.len() + 1,
        });
    }

    let tag_text = &line[..delimiters[0].0];
    let tag =
        TaskTag::from_code(tag_text).ok_or_else(|| DecodeError::UnknownTag(tag_text.to_string()))?;
    let done_text = &line[delimiters[0].1..delimiters[1].0];
    let is_done = parse_done_flag(done_text);

    let trailing = match tag {
        TaskTag::Todo => 0,
        TaskTag::Deadline => 1,
        TaskTag::Event => 2,
    };
    let payload_delimiters = &delimiters[2..];
    if payload_delimiters.len() < trailing {
        return Err(DecodeError::MissingFields {
            found: delimiters.len() + 1,
        });
    }
    let cuts = &payload_delimiters[payload_delimiters.len() - trailing..];

    let description_end = cuts.first().map_or(line.len(), |cut| cut.0);
    let description = &line[delimiters[1].1..description_end];

    let mut date_fields = Vec::with_capacity(trailing);
    for (idx, cut) in cuts.iter().enumerate() {
        let end = cuts.get(idx + 1).map_or(line.len(), |next| next.0);
        date_fields.push(&line[cut.1..end]);
    }

    let kind = match (tag, date_fields.as_slice()) {
        (TaskTag::Todo, []) => TaskKind::Todo,
        (TaskTag::Deadline, [by]) => TaskKind::Deadline {
            by: parse_iso_date(by).ok_or_else(|| DecodeError::InvalidDate(by.to_string()))?,
        },
        (TaskTag::Event, [from, to]) => TaskKind::Event {
            from: parse_iso_datetime(from)
                .ok_or_else(|| DecodeError::InvalidDate(from.to_string()))?,
            to: parse_iso_datetime(to).ok_or_else(|| DecodeError::InvalidDate(to.to_string()))?,
        },
        _ => {
            return Err(DecodeError::MissingFields {
                found: delimiters.len() + 1,
            })
        }
    };

    let mut task = Task::new(description, kind)?;
    if is_done {
        task.mark();
    }
    Ok(task)
}

fn done_flag(is_done: bool) -> &'static str {
    if is_done {
        "1"
    } else {
        "0"
    }
}

/// Only `1` means done; any other flag keeps the task as not done.
fn parse_done_flag(value: &str) -> bool {
    match value {
        "1" => true,
        "0" => false,
        _ => {
            warn!("event=done_flag_defaulted module=codec status=ok reason=invalid_done_flag");
            false
        }
    }
}
