pub mod add;
pub mod agenda;
pub mod init;
pub mod ls;

use chrono::NaiveDateTime;
use textcal_core::calendar_file::CalendarFile;
use textcal_core::parse::FuzzyParser;

/// Parser sharing the command's clock and the calendar's date order.
fn parser_for(calendar: &CalendarFile, now: NaiveDateTime) -> FuzzyParser {
    FuzzyParser::new(calendar.order()).relative_to(now)
}
