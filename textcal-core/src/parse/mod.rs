//! Fuzzy date/time parsing.
//!
//! `FuzzyParser` understands the common shapes people type on a command line
//! ("Thursday 7am", "Jun 14th 10:30", "14/06/24") through a small grammar of
//! its own, so numeric dates follow the configured `DateOrder`. Anything the
//! grammar has no word for is handed to `fuzzydate`.

mod fallback;
mod grammar;

use chrono::{Local, NaiveDateTime};

use crate::error::{CalError, CalResult};
use crate::event::truncate_to_minute;
use grammar::GrammarError;

/// Turns loosely formatted text into a minute-precision local timestamp.
pub trait DateTimeParser {
    fn parse(&self, text: &str) -> CalResult<NaiveDateTime>;
}

/// How to read a numeric date such as `03/04/12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrder {
    /// `DD/MM/YY`
    #[default]
    DayFirst,
    /// `MM/DD/YY`
    MonthFirst,
}

impl DateOrder {
    pub fn from_day_first(day_first: bool) -> Self {
        if day_first {
            DateOrder::DayFirst
        } else {
            DateOrder::MonthFirst
        }
    }

    /// strftime pattern used when writing the calendar file.
    pub fn storage_format(self) -> &'static str {
        match self {
            DateOrder::DayFirst => "%d/%m/%y %H:%M",
            DateOrder::MonthFirst => "%m/%d/%y %H:%M",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FuzzyParser {
    order: DateOrder,
    now: NaiveDateTime,
}

impl FuzzyParser {
    /// Parser anchored at the current local time.
    pub fn new(order: DateOrder) -> Self {
        FuzzyParser {
            order,
            now: Local::now().naive_local(),
        }
    }

    /// Resolve relative terms ("today", "Thursday", missing year) against `now`.
    pub fn relative_to(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }
}

impl DateTimeParser for FuzzyParser {
    fn parse(&self, text: &str) -> CalResult<NaiveDateTime> {
        match grammar::parse(text, self.order, self.now) {
            Ok(dt) => Ok(truncate_to_minute(dt)),
            Err(GrammarError::UnknownWord(word)) => {
                tracing::debug!(input = text, word = %word, "unknown word, trying natural language parser");
                fallback::parse(text, self.now)
                    .map(truncate_to_minute)
                    .ok_or_else(|| CalError::parse(text))
            }
            Err(err) => {
                tracing::debug!(input = text, error = ?err, "date/time rejected");
                Err(CalError::parse(text))
            }
        }
    }
}
