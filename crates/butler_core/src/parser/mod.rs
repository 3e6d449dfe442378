//! Command parsing and validation.
//!
//! # Responsibility
//! - Turn one raw input line into a typed [`Command`].
//! - Reject malformed input with the exact user-facing message.
//!
//! # Invariants
//! - Pure function of the input text and the current task count.
//! - Delimiters split at their first occurrence only; any later
//!   occurrence is kept verbatim in the right-hand part.
//! - Returned indices are 0-based and within `0..task_count`.

mod command;
mod grammar;

pub use command::{Command, CommandError};

use crate::datetime::{parse_iso_date, parse_user_datetime};
use crate::model::task::Schedule;
use grammar::{
    rule_for, ArgShape, Delimiter, Keyword, DELIM_TO, MSG_DATETIME_FORMAT, MSG_DATE_FORMAT,
    MSG_EVENT_NEEDS_TO, MSG_INVALID_INDEX, MSG_RESCHEDULE_USAGE, PREFIX_BY, PREFIX_FROM,
};

/// Splits input into the command word and the untouched remainder.
///
/// The split happens at the first space; without one the remainder is empty.
pub fn split_command(input: &str) -> (&str, &str) {
    input.split_once(' ').unwrap_or((input, ""))
}

/// Splits `value` at the first occurrence of `delimiter`.
pub fn split_once<'a>(value: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    value.split_once(delimiter)
}

/// Parses and validates one input line against a list of `task_count` tasks.
///
/// Leading and trailing whitespace of `input` is ignored.
pub fn parse(input: &str, task_count: usize) -> Result<Command, CommandError> {
    let (word, rest) = split_command(input.trim());
    let rule = rule_for(word).ok_or(CommandError::UnknownCommand)?;

    match (rule.keyword, &rule.shape) {
        (Keyword::Bye, _) => Ok(Command::Bye),
        (Keyword::List, _) => Ok(Command::List),
        (Keyword::Todo, ArgShape::Text { missing }) => Ok(Command::Todo {
            description: require_text(rest, *missing)?,
        }),
        (Keyword::Find, ArgShape::Text { missing }) => Ok(Command::Find {
            keyword: require_text(rest, *missing)?,
        }),
        (Keyword::Mark, ArgShape::Index { out_of_range }) => Ok(Command::Mark {
            index: parse_index(rest, task_count, *out_of_range)?,
        }),
        (Keyword::Unmark, ArgShape::Index { out_of_range }) => Ok(Command::Unmark {
            index: parse_index(rest, task_count, *out_of_range)?,
        }),
        (Keyword::Delete, ArgShape::Index { out_of_range }) => Ok(Command::Delete {
            index: parse_index(rest, task_count, *out_of_range)?,
        }),
        (
            Keyword::Deadline,
            ArgShape::Delimited {
                delimiters,
                empty_description,
            },
        ) => {
            let (description, fields) = split_delimited(rest, delimiters, *empty_description)?;
            Ok(Command::Deadline {
                description,
                by: parse_date(fields[0])?,
            })
        }
        (
            Keyword::Event,
            ArgShape::Delimited {
                delimiters,
                empty_description,
            },
        ) => {
            let (description, fields) = split_delimited(rest, delimiters, *empty_description)?;
            Ok(Command::Event {
                description,
                from: parse_datetime(fields[0])?,
                to: parse_datetime(fields[1])?,
            })
        }
        (Keyword::Reschedule, ArgShape::IndexedSchedule { out_of_range }) => {
            let trimmed = rest.trim();
            let (index_text, payload) = trimmed
                .split_once(char::is_whitespace)
                .unwrap_or((trimmed, ""));
            let index = parse_index(index_text, task_count, *out_of_range)?;
            let schedule = parse_schedule(payload.trim())?;
            Ok(Command::Reschedule { index, schedule })
        }
        (keyword, shape) => unreachable!("grammar rule {keyword:?} has mismatched shape {shape:?}"),
    }
}

fn require_text(rest: &str, missing: &'static str) -> Result<String, CommandError> {
    let text = rest.trim();
    if text.is_empty() {
        return Err(CommandError::MissingField(missing));
    }
    Ok(text.to_string())
}

/// Parses a 1-based task number and converts it to a 0-based index.
fn parse_index(
    text: &str,
    task_count: usize,
    out_of_range: &'static str,
) -> Result<usize, CommandError> {
    let number = text
        .trim()
        .parse::<i64>()
        .map_err(|_| CommandError::MalformedValue(MSG_INVALID_INDEX))?;
    if number < 1 || number as u64 > task_count as u64 {
        return Err(CommandError::IndexOutOfRange(out_of_range));
    }
    Ok(number as usize - 1)
}

/// Splits the remainder into a trimmed description and trimmed field texts.
///
/// Delimiter presence is checked before the description, matching the
/// order users see in the error messages.
fn split_delimited<'a>(
    rest: &'a str,
    delimiters: &[Delimiter],
    empty_description: &'static str,
) -> Result<(String, Vec<&'a str>), CommandError> {
    let mut pieces = Vec::with_capacity(delimiters.len() + 1);
    let mut remaining = rest;
    for delimiter in delimiters {
        let (left, right) = split_once(remaining, delimiter.token)
            .ok_or(CommandError::MissingField(delimiter.missing))?;
        pieces.push(left.trim());
        remaining = right;
    }
    pieces.push(remaining.trim());

    let description = pieces.remove(0);
    if description.is_empty() {
        return Err(CommandError::MissingField(empty_description));
    }
    Ok((description.to_string(), pieces))
}

fn parse_schedule(payload: &str) -> Result<Schedule, CommandError> {
    if let Some(by) = payload.strip_prefix(PREFIX_BY) {
        return Ok(Schedule::By(parse_date(by.trim())?));
    }
    if let Some(window) = payload.strip_prefix(PREFIX_FROM) {
        let (from, to) = split_once(window, DELIM_TO)
            .ok_or(CommandError::MissingField(MSG_EVENT_NEEDS_TO))?;
        return Ok(Schedule::Window {
            from: parse_datetime(from.trim())?,
            to: parse_datetime(to.trim())?,
        });
    }
    Err(CommandError::MissingField(MSG_RESCHEDULE_USAGE))
}

fn parse_date(text: &str) -> Result<chrono::NaiveDate, CommandError> {
    parse_iso_date(text).ok_or(CommandError::MalformedValue(MSG_DATE_FORMAT))
}

fn parse_datetime(text: &str) -> Result<chrono::NaiveDateTime, CommandError> {
    parse_user_datetime(text).ok_or(CommandError::MalformedValue(MSG_DATETIME_FORMAT))
}
