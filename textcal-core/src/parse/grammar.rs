//! Token grammar for dates and times typed on the command line.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use super::DateOrder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum GrammarError {
    /// Nothing that looks like a date or a time.
    Empty,
    /// A word the grammar does not know; another parser may.
    UnknownWord(String),
    /// Recognised shape, impossible value (31/02, 25:00, ...).
    Invalid(String),
}

const FILLER: &[&str] = &["at", "on", "the", "of", "and"];

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("mon", Weekday::Mon),
    ("monday", Weekday::Mon),
    ("tue", Weekday::Tue),
    ("tues", Weekday::Tue),
    ("tuesday", Weekday::Tue),
    ("wed", Weekday::Wed),
    ("weds", Weekday::Wed),
    ("wednesday", Weekday::Wed),
    ("thu", Weekday::Thu),
    ("thur", Weekday::Thu),
    ("thurs", Weekday::Thu),
    ("thursday", Weekday::Thu),
    ("fri", Weekday::Fri),
    ("friday", Weekday::Fri),
    ("sat", Weekday::Sat),
    ("saturday", Weekday::Sat),
    ("sun", Weekday::Sun),
    ("sunday", Weekday::Sun),
];

const MONTHS: &[(&str, u32)] = &[
    ("jan", 1),
    ("january", 1),
    ("feb", 2),
    ("february", 2),
    ("mar", 3),
    ("march", 3),
    ("apr", 4),
    ("april", 4),
    ("may", 5),
    ("jun", 6),
    ("june", 6),
    ("jul", 7),
    ("july", 7),
    ("aug", 8),
    ("august", 8),
    ("sep", 9),
    ("sept", 9),
    ("september", 9),
    ("oct", 10),
    ("october", 10),
    ("nov", 11),
    ("november", 11),
    ("dec", 12),
    ("december", 12),
];

#[derive(Debug, Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    weekday: Option<Weekday>,
    skip_today: bool,
    offset_days: Option<i64>,
    hour: Option<u32>,
    minute: Option<u32>,
}

impl Fields {
    fn has_date(&self) -> bool {
        self.year.is_some() || self.month.is_some() || self.day.is_some()
    }

    fn is_empty(&self) -> bool {
        !self.has_date()
            && self.weekday.is_none()
            && self.offset_days.is_none()
            && self.hour.is_none()
    }

    fn set_time(&mut self, hour: u32, minute: u32) -> Result<(), GrammarError> {
        set_once(&mut self.hour, hour, "time")?;
        self.minute = Some(minute);
        Ok(())
    }
}

/// Parse `text` into a timestamp, resolving missing pieces against `now`.
pub(super) fn parse(
    text: &str,
    order: DateOrder,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, GrammarError> {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let mut fields = Fields::default();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i].trim_end_matches('.');
        let next = tokens.get(i + 1).copied();
        i += 1;

        if token.is_empty() || FILLER.contains(&token) {
            continue;
        }

        match token {
            "next" => {
                fields.skip_today = true;
                continue;
            }
            "today" => {
                set_once(&mut fields.offset_days, 0, "relative day")?;
                continue;
            }
            "tomorrow" => {
                set_once(&mut fields.offset_days, 1, "relative day")?;
                continue;
            }
            "yesterday" => {
                set_once(&mut fields.offset_days, -1, "relative day")?;
                continue;
            }
            "noon" => {
                fields.set_time(12, 0)?;
                continue;
            }
            "midnight" => {
                fields.set_time(0, 0)?;
                continue;
            }
            "am" | "pm" => return Err(GrammarError::Invalid(format!("'{token}' without an hour"))),
            _ => {}
        }

        if let Some(weekday) = lookup(WEEKDAYS, token) {
            set_once(&mut fields.weekday, weekday, "weekday")?;
            continue;
        }

        if let Some(month) = lookup(MONTHS, token) {
            set_once(&mut fields.month, month, "month")?;
            continue;
        }

        if let Some((hour, minute, consumed_next)) = clock(token, next)? {
            fields.set_time(hour, minute)?;
            if consumed_next {
                i += 1;
            }
            continue;
        }

        if token.contains(['/', '-', '.']) {
            numeric_date(token, order, now.year(), &mut fields)?;
            continue;
        }

        if let Some(day) = ordinal(token) {
            set_once(&mut fields.day, day, "day")?;
            continue;
        }

        if token.bytes().all(|b| b.is_ascii_digit()) {
            bare_number(token, now.year(), &mut fields)?;
            continue;
        }

        return Err(GrammarError::UnknownWord(token.to_string()));
    }

    if fields.is_empty() {
        return Err(GrammarError::Empty);
    }

    resolve(&fields, now)
}

fn resolve(fields: &Fields, now: NaiveDateTime) -> Result<NaiveDateTime, GrammarError> {
    let today = now.date();
    let base = match fields.offset_days {
        Some(offset) => today
            .checked_add_signed(Duration::days(offset))
            .ok_or_else(|| GrammarError::Invalid("date out of range".into()))?,
        None => today,
    };

    let date = if fields.has_date() {
        let year = fields.year.unwrap_or(base.year());
        let month = fields.month.unwrap_or(base.month());
        let day = match (fields.day, fields.month) {
            (Some(day), _) => day,
            (None, Some(_)) => 1,
            (None, None) => base.day(),
        };
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| GrammarError::Invalid(format!("no such date {year}-{month}-{day}")))?
    } else if let Some(weekday) = fields.weekday {
        let mut ahead = (7 + weekday.num_days_from_monday() - base.weekday().num_days_from_monday()) % 7;
        if ahead == 0 && fields.skip_today {
            ahead = 7;
        }
        base.checked_add_days(Days::new(u64::from(ahead)))
            .ok_or_else(|| GrammarError::Invalid("date out of range".into()))?
    } else {
        base
    };

    let (hour, minute) = (fields.hour.unwrap_or(0), fields.minute.unwrap_or(0));
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| GrammarError::Invalid(format!("no such time {hour}:{minute:02}")))?;

    Ok(date.and_time(time))
}

fn set_once<T>(slot: &mut Option<T>, value: T, what: &str) -> Result<(), GrammarError> {
    if slot.is_some() {
        return Err(GrammarError::Invalid(format!("{what} given twice")));
    }
    *slot = Some(value);
    Ok(())
}

fn lookup<T: Copy>(table: &[(&str, T)], word: &str) -> Option<T> {
    table.iter().find(|(name, _)| *name == word).map(|(_, v)| *v)
}

/// Longest spelling of the weekday or month `word` names ("thurs" -> "thursday").
pub(super) fn full_name(word: &str) -> Option<&'static str> {
    fn longest<T: Copy + PartialEq>(
        table: &[(&'static str, T)],
        word: &str,
    ) -> Option<&'static str> {
        let value = lookup(table, word)?;
        table
            .iter()
            .filter(|(_, v)| *v == value)
            .map(|(name, _)| *name)
            .max_by_key(|name| name.len())
    }

    let word = word.trim_end_matches('.');
    longest(WEEKDAYS, word).or_else(|| longest(MONTHS, word))
}

/// Whether `token` (with `next` for a detached meridiem) reads as a time of
/// day, even an impossible one like `25:00`.
pub(super) fn is_time_of_day(token: &str, next: Option<&str>) -> bool {
    matches!(token, "noon" | "midnight") || !matches!(clock(token, next), Ok(None))
}

/// Digits only, at most four of them.
fn number(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Recognise `7am`, `7 am`, `7:30pm`, `7.30pm`, `18:30` and `18:30:05`.
///
/// Returns the 24-hour time and whether the following token (a detached
/// `am`/`pm`) was used.
fn clock(token: &str, next: Option<&str>) -> Result<Option<(u32, u32, bool)>, GrammarError> {
    let meridiem_of = |s: &str| match s {
        "am" => Some(false),
        "pm" => Some(true),
        _ => None,
    };

    let (body, pm, consumed_next) = if let Some(body) = token.strip_suffix("am") {
        (body, Some(false), false)
    } else if let Some(body) = token.strip_suffix("pm") {
        (body, Some(true), false)
    } else if let Some(pm) = next.and_then(meridiem_of) {
        (token, Some(pm), true)
    } else {
        (token, None, false)
    };

    let pieces: Vec<&str> = match pm {
        Some(_) => body.split([':', '.']).collect(),
        None if body.contains(':') => body.split(':').collect(),
        None => return Ok(None),
    };

    if pieces.len() > 3 || pieces.iter().any(|p| p.is_empty() || p.len() > 2) {
        return Ok(None);
    }
    let Some(values) = pieces.iter().map(|p| number(p)).collect::<Option<Vec<u32>>>() else {
        return Ok(None);
    };

    let hour = values[0];
    let minute = values.get(1).copied().unwrap_or(0);
    let second = values.get(2).copied().unwrap_or(0);

    if minute > 59 || second > 59 {
        return Err(GrammarError::Invalid(format!("no such time '{token}'")));
    }

    let hour = match pm {
        Some(is_pm) => {
            if !(1..=12).contains(&hour) {
                return Err(GrammarError::Invalid(format!("no such time '{token}'")));
            }
            match (hour, is_pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, true) => h + 12,
                (h, false) => h,
            }
        }
        None if hour > 23 => {
            return Err(GrammarError::Invalid(format!("no such time '{token}'")));
        }
        None => hour,
    };

    Ok(Some((hour, minute, consumed_next)))
}

/// `a/b/c`, `a-b-c`, `a.b.c`, `a/b`, with `yyyy-mm-dd` always read as ISO.
fn numeric_date(
    token: &str,
    order: DateOrder,
    this_year: i32,
    fields: &mut Fields,
) -> Result<(), GrammarError> {
    let invalid = || GrammarError::Invalid(format!("unreadable date '{token}'"));

    let pieces: Vec<&str> = token.split(['/', '-', '.']).collect();
    if pieces.iter().any(|p| number(p).is_none()) {
        return Err(invalid());
    }

    let (year, month, day) = match pieces.as_slice() {
        [y, m, d] if y.len() == 4 => (Some(expand_year(y, this_year)?), parse_u32(m)?, parse_u32(d)?),
        [y, m] if y.len() == 4 => (Some(expand_year(y, this_year)?), parse_u32(m)?, 1),
        [a, b, y] => {
            let (day, month) = day_month(parse_u32(a)?, parse_u32(b)?, order);
            (Some(expand_year(y, this_year)?), month, day)
        }
        [a, b] => {
            let (day, month) = day_month(parse_u32(a)?, parse_u32(b)?, order);
            (None, month, day)
        }
        _ => return Err(invalid()),
    };

    if let Some(year) = year {
        set_once(&mut fields.year, year, "year")?;
    }
    set_once(&mut fields.month, month, "month")?;
    set_once(&mut fields.day, day, "day")
}

fn parse_u32(s: &str) -> Result<u32, GrammarError> {
    number(s).ok_or_else(|| GrammarError::Invalid(format!("not a number '{s}'")))
}

/// Apply the configured order, swapping when only the other reading has a
/// valid month.
fn day_month(a: u32, b: u32, order: DateOrder) -> (u32, u32) {
    let (day, month) = match order {
        DateOrder::DayFirst => (a, b),
        DateOrder::MonthFirst => (b, a),
    };
    if month > 12 && day <= 12 {
        (month, day)
    } else {
        (day, month)
    }
}

/// Two-digit years land within 50 years of the current one.
fn expand_year(digits: &str, this_year: i32) -> Result<i32, GrammarError> {
    let value = parse_u32(digits)? as i32;
    match digits.len() {
        4 => Ok(value),
        1 | 2 => {
            let mut year = this_year - this_year.rem_euclid(100) + value;
            if year >= this_year + 50 {
                year -= 100;
            } else if year < this_year - 50 {
                year += 100;
            }
            Ok(year)
        }
        _ => Err(GrammarError::Invalid(format!("unreadable year '{digits}'"))),
    }
}

/// `1st`, `2nd`, `3rd`, `14th`.
fn ordinal(token: &str) -> Option<u32> {
    ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| token.strip_suffix(suffix))
        .filter(|digits| digits.len() <= 2)
        .and_then(number)
}

fn bare_number(token: &str, this_year: i32, fields: &mut Fields) -> Result<(), GrammarError> {
    match token.len() {
        4 => set_once(&mut fields.year, expand_year(token, this_year)?, "year"),
        1 | 2 if fields.day.is_none() => set_once(&mut fields.day, parse_u32(token)?, "day"),
        1 | 2 if fields.month.is_some() => {
            set_once(&mut fields.year, expand_year(token, this_year)?, "year")
        }
        _ => Err(GrammarError::Invalid(format!("stray number '{token}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn run(text: &str) -> Result<NaiveDateTime, GrammarError> {
        parse(text, DateOrder::DayFirst, now())
    }

    #[test]
    fn test_unknown_word_is_reported() {
        assert_eq!(
            run("in three fortnights"),
            Err(GrammarError::UnknownWord("in".to_string()))
        );
    }

    #[test]
    fn test_only_filler_is_empty() {
        assert_eq!(run("at the"), Err(GrammarError::Empty));
        assert_eq!(run(""), Err(GrammarError::Empty));
    }

    #[test]
    fn test_repeated_fields_are_invalid() {
        assert!(matches!(run("monday tuesday"), Err(GrammarError::Invalid(_))));
        assert!(matches!(run("10am 11am"), Err(GrammarError::Invalid(_))));
        assert!(matches!(run("june july"), Err(GrammarError::Invalid(_))));
    }

    #[test]
    fn test_dangling_meridiem_is_invalid() {
        assert!(matches!(run("pm"), Err(GrammarError::Invalid(_))));
    }

    #[test]
    fn test_day_then_year_after_month() {
        let dt = run("June 14 25").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());
    }

    #[test]
    fn test_trailing_dots_on_abbreviations() {
        let dt = run("Thu. 9am").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 6, 13).unwrap());
    }

    #[test]
    fn test_day_month_swap() {
        assert_eq!(day_month(3, 4, DateOrder::DayFirst), (3, 4));
        assert_eq!(day_month(3, 4, DateOrder::MonthFirst), (4, 3));
        assert_eq!(day_month(4, 25, DateOrder::DayFirst), (25, 4));
        assert_eq!(day_month(25, 13, DateOrder::DayFirst), (25, 13));
    }

    #[test]
    fn test_expand_year() {
        assert_eq!(expand_year("24", 2024), Ok(2024));
        assert_eq!(expand_year("99", 2024), Ok(1999));
        assert_eq!(expand_year("2031", 2024), Ok(2031));
        assert!(expand_year("202", 2024).is_err());
    }

    #[test]
    fn test_year_more_than_fifty_ahead_lands_a_century_back() {
        assert_eq!(expand_year("73", 2024), Ok(2073));
        assert_eq!(expand_year("74", 2024), Ok(1974));
        assert_eq!(expand_year("80", 2024), Ok(1980));
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name("thurs"), Some("thursday"));
        assert_eq!(full_name("weds"), Some("wednesday"));
        assert_eq!(full_name("sept."), Some("september"));
        assert_eq!(full_name("may"), Some("may"));
        assert_eq!(full_name("week"), None);
    }

    #[test]
    fn test_is_time_of_day() {
        assert!(is_time_of_day("6pm", None));
        assert!(is_time_of_day("6", Some("pm")));
        assert!(is_time_of_day("18:30", None));
        assert!(is_time_of_day("25:00", None));
        assert!(is_time_of_day("noon", None));
        assert!(!is_time_of_day("3", Some("days")));
        assert!(!is_time_of_day("week", None));
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal("1st"), Some(1));
        assert_eq!(ordinal("22nd"), Some(22));
        assert_eq!(ordinal("14th"), Some(14));
        assert_eq!(ordinal("north"), None);
        assert_eq!(ordinal("th"), None);
    }
}
