use anyhow::Result;
use chrono::NaiveDateTime;
use owo_colors::{OwoColorize, Stream::Stdout};
use textcal_core::calendar_file::CalendarFile;
use textcal_core::event::Event;

use super::parser_for;

pub fn run(calendar: &CalendarFile, entry: &str, retention_days: u32, now: NaiveDateTime) -> Result<()> {
    let parser = parser_for(calendar, now);

    let _lock = calendar.lock()?;
    let mut store = calendar.load(&parser)?;

    let event = Event::from_entry(entry, &parser)?;
    let replaced = store.get(event.timestamp).map(str::to_string);
    let line = calendar.format_line(event.timestamp, &event.description);
    store.insert(event);

    calendar.save(&store, retention_days, now)?;

    println!(
        "{}",
        format!("Added: {line}").if_supports_color(Stdout, |text| text.green())
    );
    if let Some(previous) = replaced {
        println!(
            "{}",
            format!("  (replaces: {previous})").if_supports_color(Stdout, |text| text.dimmed())
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use textcal_core::error::CalError;
    use textcal_core::parse::DateOrder;

    fn monday() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn calendar(dir: &TempDir, contents: &str) -> CalendarFile {
        let path = dir.path().join("cal.txt");
        std::fs::write(&path, contents).unwrap();
        CalendarFile::new(path, DateOrder::DayFirst)
    }

    #[test]
    fn test_add_writes_event() {
        let dir = TempDir::new().unwrap();
        let cal = calendar(&dir, "14/06/24 10:00, Dentist\n");

        run(&cal, "Thursday 7am, Walk the dog", 7, monday()).unwrap();

        assert_eq!(
            std::fs::read_to_string(cal.path()).unwrap(),
            "13/06/24 07:00, Walk the dog\n14/06/24 10:00, Dentist\n"
        );
    }

    #[test]
    fn test_add_overwrites_same_slot() {
        let dir = TempDir::new().unwrap();
        let cal = calendar(&dir, "14/06/24 10:00, Dentist\n");

        run(&cal, "14/06/24 10am, Orthodontist", 7, monday()).unwrap();

        assert_eq!(
            std::fs::read_to_string(cal.path()).unwrap(),
            "14/06/24 10:00, Orthodontist\n"
        );
    }

    #[test]
    fn test_add_applies_retention_to_old_entries() {
        let dir = TempDir::new().unwrap();
        let cal = calendar(&dir, "01/06/24 10:00, Long gone\n");

        run(&cal, "tomorrow, Bins", 7, monday()).unwrap();

        assert_eq!(
            std::fs::read_to_string(cal.path()).unwrap(),
            "11/06/24 00:00, Bins\n"
        );
    }

    #[test]
    fn test_add_bad_date_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let cal = calendar(&dir, "01/06/24 10:00, Long gone\n");

        let err = run(&cal, "31/02/24, Nope", 7, monday()).unwrap_err();

        assert!(matches!(err.downcast_ref::<CalError>(), Some(CalError::Parse { .. })));
        assert_eq!(
            std::fs::read_to_string(cal.path()).unwrap(),
            "01/06/24 10:00, Long gone\n"
        );
    }

    #[test]
    fn test_add_without_calendar_file() {
        let dir = TempDir::new().unwrap();
        let cal = CalendarFile::new(dir.path().join("missing.txt"), DateOrder::DayFirst);

        let err = run(&cal, "today, Something", 7, monday()).unwrap_err();
        assert!(matches!(err.downcast_ref::<CalError>(), Some(CalError::FileNotFound(_))));
    }
}
