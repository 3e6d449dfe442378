//! Date and date-time spellings accepted by Butler.
//!
//! # Responsibility
//! - Parse the strict ISO forms used on disk.
//! - Parse the three date-time spellings accepted from user input.
//!
//! # Invariants
//! - Shapes are checked before calendar validation, so `2019-1-5` is
//!   rejected even though the calendar date exists.
//! - Date-times carry minute precision only.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Storage and input format for calendar dates.
pub const ISO_DATE: &str = "%Y-%m-%d";
/// Storage format for date-times.
pub const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M";

const SPACED_COLON_DATETIME: &str = "%Y-%m-%d %H:%M";
const SPACED_COMPACT_DATETIME: &str = "%Y-%m-%d %H%M";

static ISO_DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date regex"));
static ISO_DATETIME_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$").expect("static datetime regex"));
static SPACED_COLON_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").expect("static datetime regex"));
static SPACED_COMPACT_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{4}$").expect("static datetime regex"));

/// Parses a strict `yyyy-MM-dd` calendar date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_SHAPE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE).ok()
}

/// Parses a strict `yyyy-MM-ddTHH:mm` date-time.
pub fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    parse_shaped(value, &ISO_DATETIME_SHAPE, ISO_DATETIME)
}

/// Parses a user-entered date-time.
///
/// Spelling is chosen in priority order:
/// - contains `T` -> `yyyy-MM-ddTHH:mm`
/// - contains `:` -> `yyyy-MM-dd HH:mm`
/// - otherwise -> `yyyy-MM-dd HHmm`
pub fn parse_user_datetime(value: &str) -> Option<NaiveDateTime> {
    if value.contains('T') {
        parse_iso_datetime(value)
    } else if value.contains(':') {
        parse_shaped(value, &SPACED_COLON_SHAPE, SPACED_COLON_DATETIME)
    } else {
        parse_shaped(value, &SPACED_COMPACT_SHAPE, SPACED_COMPACT_DATETIME)
    }
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

pub fn format_iso_datetime(value: NaiveDateTime) -> String {
    value.format(ISO_DATETIME).to_string()
}

fn parse_shaped(value: &str, shape: &Regex, format: &str) -> Option<NaiveDateTime> {
    if !shape.is_match(value) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, format).ok()
}
