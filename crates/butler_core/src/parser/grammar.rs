//! Command grammar table.
//!
//! Each keyword maps to one argument shape. Delimited shapes list their
//! delimiters in the order they are split off; every split happens at the
//! first occurrence and later occurrences stay in the right-hand part.

pub(crate) const MSG_TODO_EMPTY: &str = "Please tell me what the todo is about.";
pub(crate) const MSG_DEADLINE_NEEDS_BY: &str =
    "A deadline needs a '/by <date>' part (yyyy-MM-dd).";
pub(crate) const MSG_DEADLINE_EMPTY: &str = "Deadline description cannot be empty.";
pub(crate) const MSG_EVENT_NEEDS_FROM: &str = "An event needs '/from <start>' and '/to <end>'.";
pub(crate) const MSG_EVENT_NEEDS_TO: &str = "Please include the end time using '/to <end>'.";
pub(crate) const MSG_EVENT_EMPTY: &str = "Event description cannot be empty.";
pub(crate) const MSG_DATE_FORMAT: &str = "Please use date format yyyy-MM-dd (e.g., 2019-10-15).";
pub(crate) const MSG_DATETIME_FORMAT: &str =
    "Please use datetime format 'yyyy-MM-dd HHmm' or ISO 'yyyy-MM-ddTHH:mm'.";
pub(crate) const MSG_INVALID_INDEX: &str = "Please provide a valid task number.";
pub(crate) const MSG_MARK_RANGE: &str = "I can't find that task number.";
pub(crate) const MSG_NOT_IN_LIST: &str = "That task number is not in the list.";
pub(crate) const MSG_FIND_EMPTY: &str = "Please provide a keyword to search.";
pub(crate) const MSG_RESCHEDULE_USAGE: &str =
    "Use '/by <yyyy-MM-dd>' or '/from <start> /to <end>' to reschedule a task.";

pub(crate) const DELIM_BY: &str = " /by ";
pub(crate) const DELIM_FROM: &str = " /from ";
pub(crate) const DELIM_TO: &str = " /to ";
/// Reschedule payloads start with the delimiter, so no leading space.
pub(crate) const PREFIX_BY: &str = "/by ";
pub(crate) const PREFIX_FROM: &str = "/from ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Bye,
    List,
    Todo,
    Deadline,
    Event,
    Mark,
    Unmark,
    Delete,
    Find,
    Reschedule,
}

/// A required delimiter and the message used when it is absent.
#[derive(Debug)]
pub(crate) struct Delimiter {
    pub token: &'static str,
    pub missing: &'static str,
}

#[derive(Debug)]
pub(crate) enum ArgShape {
    /// Remainder is not inspected.
    Ignored,
    /// Trimmed remainder must be non-empty.
    Text { missing: &'static str },
    /// Trimmed remainder is a 1-based task number.
    Index { out_of_range: &'static str },
    /// Description followed by delimited fields.
    Delimited {
        delimiters: &'static [Delimiter],
        empty_description: &'static str,
    },
    /// Task number followed by `/by ...` or `/from ... /to ...`.
    IndexedSchedule { out_of_range: &'static str },
}

#[derive(Debug)]
pub(crate) struct Rule {
    pub word: &'static str,
    pub keyword: Keyword,
    pub shape: ArgShape,
}

const DEADLINE_DELIMITERS: &[Delimiter] = &[Delimiter {
    token: DELIM_BY,
    missing: MSG_DEADLINE_NEEDS_BY,
}];

const EVENT_DELIMITERS: &[Delimiter] = &[
    Delimiter {
        token: DELIM_FROM,
        missing: MSG_EVENT_NEEDS_FROM,
    },
    Delimiter {
        token: DELIM_TO,
        missing: MSG_EVENT_NEEDS_TO,
    },
];

pub(crate) const RULES: &[Rule] = &[
    Rule {
        word: "bye",
        keyword: Keyword::Bye,
        shape: ArgShape::Ignored,
    },
    Rule {
        word: "list",
        keyword: Keyword::List,
        shape: ArgShape::Ignored,
    },
    Rule {
        word: "todo",
        keyword: Keyword::Todo,
        shape: ArgShape::Text {
            missing: MSG_TODO_EMPTY,
        },
    },
    Rule {
        word: "deadline",
        keyword: Keyword::Deadline,
        shape: ArgShape::Delimited {
            delimiters: DEADLINE_DELIMITERS,
            empty_description: MSG_DEADLINE_EMPTY,
        },
    },
    Rule {
        word: "event",
        keyword: Keyword::Event,
        shape: ArgShape::Delimited {
            delimiters: EVENT_DELIMITERS,
            empty_description: MSG_EVENT_EMPTY,
        },
    },
    Rule {
        word: "mark",
        keyword: Keyword::Mark,
        shape: ArgShape::Index {
            out_of_range: MSG_MARK_RANGE,
        },
    },
    Rule {
        word: "unmark",
        keyword: Keyword::Unmark,
        shape: ArgShape::Index {
            out_of_range: MSG_NOT_IN_LIST,
        },
    },
    Rule {
        word: "delete",
        keyword: Keyword::Delete,
        shape: ArgShape::Index {
            out_of_range: MSG_NOT_IN_LIST,
        },
    },
    Rule {
        word: "find",
        keyword: Keyword::Find,
        shape: ArgShape::Text {
            missing: MSG_FIND_EMPTY,
        },
    },
    Rule {
        word: "reschedule",
        keyword: Keyword::Reschedule,
        shape: ArgShape::IndexedSchedule {
            out_of_range: MSG_NOT_IN_LIST,
        },
    },
];

/// Looks up the rule for a command word (case-sensitive).
pub(crate) fn rule_for(word: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.word == word)
}

#[cfg(test)]
mod tests {
    use super::{rule_for, RULES};
    use std::collections::HashSet;

    #[test]
    fn command_words_are_unique() {
        let words: HashSet<_> = RULES.iter().map(|rule| rule.word).collect();
        assert_eq!(words.len(), RULES.len());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(rule_for("todo").is_some());
        assert!(rule_for("TODO").is_none());
        assert!(rule_for("").is_none());
    }
}
