//! A single dated entry and the "<when>, <what>" line shape shared by the
//! calendar file and the `add` command.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};

use crate::error::{CalError, CalResult};
use crate::parse::DateTimeParser;

/// Separator between the date/time field and the description.
pub const SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub timestamp: NaiveDateTime,
    pub description: String,
}

impl Event {
    pub fn new(timestamp: NaiveDateTime, description: impl Into<String>) -> Self {
        Event {
            timestamp: truncate_to_minute(timestamp),
            description: description.into(),
        }
    }

    /// Build an event from user input such as `"Thursday 7am, Walk the dog"`.
    ///
    /// The description must be non-empty and fit on one line, otherwise the
    /// calendar file could not read it back.
    pub fn from_entry(text: &str, parser: &impl DateTimeParser) -> CalResult<Self> {
        let (when, what) =
            split_entry(text).ok_or_else(|| CalError::MissingSeparator(text.trim().to_string()))?;

        let what = what.trim_end();
        if what.is_empty() {
            return Err(CalError::InvalidDescription("description is empty".into()));
        }
        if what.contains(['\n', '\r']) {
            return Err(CalError::InvalidDescription(
                "description must not contain line breaks".into(),
            ));
        }

        Ok(Event::new(parser.parse(when)?, what))
    }

    /// `HH:MM, description`, as printed by `ls` and `agenda`.
    pub fn time_line(&self) -> String {
        format_time_line(self.timestamp, &self.description)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time_line())
    }
}

/// Split `"<when>, <what>"` at the first separator, trimming leading spaces
/// from `<what>`. Later commas belong to the description.
pub fn split_entry(text: &str) -> Option<(&str, &str)> {
    let (when, what) = text.split_once(SEPARATOR)?;
    Some((when, what.trim_start_matches(' ')))
}

pub fn format_time_line(timestamp: NaiveDateTime, description: &str) -> String {
    format!("{}, {}", timestamp.format("%H:%M"), description)
}

/// Drop seconds and sub-seconds; the calendar works at minute precision.
pub fn truncate_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}
