//! Read-only views over an `EventStore`.

use std::fmt;

use chrono::{Days, NaiveDate};

use crate::event::format_time_line;
use crate::store::EventStore;

/// `HH:MM, description` for each event on `day`, in time order.
pub fn list_day(store: &EventStore, day: NaiveDate) -> impl Iterator<Item = String> + '_ {
    store
        .entries_on(day)
        .map(|(timestamp, description)| format_time_line(timestamp, description))
}

/// One day of an agenda: a header and the events on that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBlock {
    pub date: NaiveDate,
    pub lines: Vec<String>,
}

impl DayBlock {
    /// e.g. "Thursday 13 June"
    pub fn header(&self) -> String {
        self.date.format("%A %d %B").to_string()
    }
}

impl fmt::Display for DayBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Day blocks for `[today, today + days_ahead)`, skipping days with no events.
pub fn agenda(
    store: &EventStore,
    today: NaiveDate,
    days_ahead: u32,
) -> impl Iterator<Item = DayBlock> + '_ {
    (0..u64::from(days_ahead))
        .map_while(move |offset| today.checked_add_days(Days::new(offset)))
        .filter_map(move |date| {
            let lines: Vec<String> = list_day(store, date).collect();
            (!lines.is_empty()).then_some(DayBlock { date, lines })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_list_day() {
        let mut store = EventStore::new();
        store.add(at(14, 18, 30), "Dinner");
        store.add(at(14, 10, 0), "Dentist");
        store.add(at(15, 9, 0), "Not today");

        let lines: Vec<_> = list_day(&store, date(14)).collect();
        assert_eq!(lines.join("\n"), "10:00, Dentist\n18:30, Dinner");
    }

    #[test]
    fn test_list_day_empty() {
        let store = EventStore::new();
        assert_eq!(list_day(&store, date(14)).next(), None);
    }

    #[test]
    fn test_agenda_omits_empty_days() {
        let mut store = EventStore::new();
        store.add(at(13, 7, 0), "Walk the dog");

        let blocks: Vec<_> = agenda(&store, date(10), 7).collect();
        assert_eq!(
            blocks,
            vec![DayBlock {
                date: date(13),
                lines: vec!["07:00, Walk the dog".to_string()],
            }]
        );
        assert_eq!(blocks[0].to_string(), "Thursday 13 June\n07:00, Walk the dog\n");
    }

    #[test]
    fn test_agenda_window_is_half_open() {
        let mut store = EventStore::new();
        store.add(at(9, 23, 0), "Yesterday");
        store.add(at(10, 0, 0), "Today");
        store.add(at(16, 23, 59), "Last day");
        store.add(at(17, 0, 0), "Out of range");

        let dates: Vec<_> = agenda(&store, date(10), 7).map(|b| b.date).collect();
        assert_eq!(dates, vec![date(10), date(16)]);
    }

    #[test]
    fn test_agenda_zero_days() {
        let mut store = EventStore::new();
        store.add(at(10, 9, 0), "Today");
        assert_eq!(agenda(&store, date(10), 0).count(), 0);
    }

    #[test]
    fn test_agenda_header_pads_day() {
        let block = DayBlock {
            date: date(3),
            lines: vec![],
        };
        assert_eq!(block.header(), "Monday 03 June");
    }
}
