use butler_core::{parse, Command, CommandError, Schedule};
use chrono::{NaiveDate, NaiveDateTime};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn message(input: &str, task_count: usize) -> String {
    parse(input, task_count).unwrap_err().to_string()
}

#[test]
fn unknown_and_miscased_words_are_rejected() {
    assert_eq!(parse("blah", 0).unwrap_err(), CommandError::UnknownCommand);
    assert_eq!(parse("LIST", 0).unwrap_err(), CommandError::UnknownCommand);
    assert_eq!(message("dance now", 0), "Sorry, I don't recognize that command.");
}

#[test]
fn list_and_bye_ignore_arguments() {
    assert_eq!(parse("list", 0).unwrap(), Command::List);
    assert_eq!(parse("list everything", 0).unwrap(), Command::List);
    assert_eq!(parse("  bye  ", 0).unwrap(), Command::Bye);
}

#[test]
fn todo_trims_description() {
    assert_eq!(
        parse("todo    read book  ", 0).unwrap(),
        Command::Todo {
            description: "read book".to_string()
        }
    );
    assert_eq!(message("todo   ", 0), "Please tell me what the todo is about.");
    assert_eq!(message("todo", 0), "Please tell me what the todo is about.");
}

#[test]
fn deadline_parses_iso_date() {
    assert_eq!(
        parse("deadline return book /by 2019-10-15", 0).unwrap(),
        Command::Deadline {
            description: "return book".to_string(),
            by: NaiveDate::from_ymd_opt(2019, 10, 15).unwrap(),
        }
    );
}

#[test]
fn deadline_requires_delimiter_and_description() {
    assert!(message("deadline return book", 0).contains("/by"));
    assert!(message("deadline return book /by2019-10-15", 0).contains("/by"));
    assert_eq!(
        message("deadline   /by 2019-10-15", 0),
        "Deadline description cannot be empty."
    );
}

#[test]
fn deadline_rejects_wrong_date_format() {
    let err = parse("deadline report /by 15-10-2019", 0).unwrap_err();
    assert!(matches!(err, CommandError::MalformedValue(_)));
    assert!(err.to_string().contains("yyyy-MM-dd"));
    assert!(message("deadline report /by 2019-10-15 1800", 0).contains("yyyy-MM-dd"));
}

#[test]
fn deadline_splits_at_first_delimiter() {
    let err = parse("deadline a /by 2024-10-10 /by extra", 0).unwrap_err();
    assert!(matches!(err, CommandError::MalformedValue(_)));

    assert_eq!(
        parse("deadline pay /by bill /by 2024-10-10", 0).unwrap_err(),
        parse("deadline pay /by bill", 0).unwrap_err()
    );
}

#[test]
fn event_accepts_three_datetime_spellings() {
    let expected = Command::Event {
        description: "project meeting".to_string(),
        from: at(2019, 12, 2, 14, 0),
        to: at(2019, 12, 2, 16, 0),
    };
    for input in [
        "event project meeting /from 2019-12-02 1400 /to 2019-12-02 1600",
        "event project meeting /from 2019-12-02 14:00 /to 2019-12-02 16:00",
        "event project meeting /from 2019-12-02T14:00 /to 2019-12-02T16:00",
        "event project meeting /from 2019-12-02T14:00 /to 2019-12-02 1600",
    ] {
        assert_eq!(parse(input, 0).unwrap(), expected, "input: {input}");
    }
}

#[test]
fn event_reports_missing_parts_in_order() {
    assert_eq!(
        message("event meeting", 0),
        "An event needs '/from <start>' and '/to <end>'."
    );
    assert_eq!(
        message("event meeting /from 2019-12-02 1400", 0),
        "Please include the end time using '/to <end>'."
    );
    assert_eq!(
        message("event  /from 2019-12-02 1400 /to 2019-12-02 1600", 0),
        "Event description cannot be empty."
    );
    assert!(message("event meeting /from tomorrow /to later", 0).contains("yyyy-MM-dd HHmm"));
}

#[test]
fn event_window_order_is_not_checked_by_parser() {
    assert!(matches!(
        parse("event late /from 2019-12-02 1600 /to 2019-12-02 1400", 0).unwrap(),
        Command::Event { .. }
    ));
}

#[test]
fn index_commands_convert_to_zero_based() {
    assert_eq!(parse("mark 1", 3).unwrap(), Command::Mark { index: 0 });
    assert_eq!(parse("unmark 3", 3).unwrap(), Command::Unmark { index: 2 });
    assert_eq!(parse("delete  2 ", 3).unwrap(), Command::Delete { index: 1 });
}

#[test]
fn index_commands_reject_non_numbers() {
    for input in ["mark", "mark one", "delete 1.5", "unmark 99999999999999999999"] {
        assert_eq!(
            parse(input, 3).unwrap_err(),
            CommandError::MalformedValue("Please provide a valid task number."),
            "input: {input}"
        );
    }
}

#[test]
fn index_commands_reject_out_of_range() {
    assert_eq!(message("mark 99", 0), "I can't find that task number.");
    assert_eq!(message("mark 0", 3), "I can't find that task number.");
    assert_eq!(message("unmark 4", 3), "That task number is not in the list.");
    assert_eq!(message("delete -1", 3), "That task number is not in the list.");
}

#[test]
fn find_requires_keyword() {
    assert_eq!(
        parse("find book", 0).unwrap(),
        Command::Find {
            keyword: "book".to_string()
        }
    );
    assert_eq!(message("find    ", 0), "Please provide a keyword to search.");
}

#[test]
fn reschedule_parses_both_forms() {
    assert_eq!(
        parse("reschedule 2 /by 2019-11-01", 2).unwrap(),
        Command::Reschedule {
            index: 1,
            schedule: Schedule::By(NaiveDate::from_ymd_opt(2019, 11, 1).unwrap()),
        }
    );
    assert_eq!(
        parse("reschedule 1 /from 2019-12-03 0900 /to 2019-12-03T10:30", 1).unwrap(),
        Command::Reschedule {
            index: 0,
            schedule: Schedule::Window {
                from: at(2019, 12, 3, 9, 0),
                to: at(2019, 12, 3, 10, 30),
            },
        }
    );
}

#[test]
fn reschedule_validates_index_then_payload() {
    assert_eq!(message("reschedule 5 /by 2019-11-01", 1), "That task number is not in the list.");
    assert_eq!(message("reschedule x /by 2019-11-01", 1), "Please provide a valid task number.");
    assert!(message("reschedule 1", 1).contains("to reschedule a task"));
    assert!(message("reschedule 1 tomorrow", 1).contains("to reschedule a task"));
    assert_eq!(
        message("reschedule 1 /from 2019-12-03 0900", 1),
        "Please include the end time using '/to <end>'."
    );
    assert!(message("reschedule 1 /by next week", 1).contains("yyyy-MM-dd"));
}

#[test]
fn mutating_commands_are_flagged() {
    assert!(parse("todo x", 0).unwrap().is_mutating());
    assert!(parse("delete 1", 1).unwrap().is_mutating());
    assert!(!parse("list", 0).unwrap().is_mutating());
    assert!(!parse("find x", 0).unwrap().is_mutating());
}
