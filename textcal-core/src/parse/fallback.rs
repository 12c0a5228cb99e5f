//! Natural language fallback ("next week", "3 days from now") via `fuzzydate`,
//! resolved against the same `now` as the grammar.

use chrono::{NaiveDateTime, NaiveTime};

use super::grammar;

pub(super) fn parse(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let words = words(input);
    let dt = fuzzydate::parse_relative_to(&spell_out(&words), now).ok()?;

    if mentions_time(&words) {
        Some(dt)
    } else {
        Some(dt.date().and_time(NaiveTime::MIN))
    }
}

fn words(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_lowercase).collect()
}

/// fuzzydate only knows full weekday and month names.
fn spell_out(words: &[String]) -> String {
    words
        .iter()
        .map(|word| grammar::full_name(word).unwrap_or(word.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// fuzzydate fills in a time either way; without one the event belongs at
/// midnight.
fn mentions_time(words: &[String]) -> bool {
    words.iter().enumerate().any(|(i, word)| {
        let next = words.get(i + 1).map(String::as_str);
        grammar::is_time_of_day(word, next)
            || (word == "at" && next.is_some_and(|n| n.starts_with(|c: char| c.is_ascii_digit())))
    })
}
