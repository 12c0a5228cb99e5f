use anyhow::Result;
use chrono::NaiveDateTime;
use textcal_core::calendar_file::CalendarFile;
use textcal_core::parse::DateTimeParser;
use textcal_core::query;

use super::parser_for;

pub fn run(calendar: &CalendarFile, date: &str, now: NaiveDateTime) -> Result<()> {
    for line in lines(calendar, date, now)? {
        println!("{line}");
    }
    Ok(())
}

fn lines(calendar: &CalendarFile, date: &str, now: NaiveDateTime) -> Result<Vec<String>> {
    let parser = parser_for(calendar, now);
    let store = calendar.load(&parser)?;
    let day = parser.parse(date)?.date();

    Ok(query::list_day(&store, day).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use textcal_core::error::CalError;
    use textcal_core::parse::DateOrder;

    fn now() -> NaiveDateTime {
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
    fn test_ls_lists_day_in_time_order() {
        let dir = TempDir::new().unwrap();
        let cal = calendar(
            &dir,
            "14/06/24 18:30, Dinner\n14/06/24 10:00, Dentist\n15/06/24 09:00, Gym\n",
        );

        assert_eq!(
            lines(&cal, "14/06/24", now()).unwrap().join("\n"),
            "10:00, Dentist\n18:30, Dinner"
        );
    }

    #[test]
    fn test_ls_fuzzy_day() {
        let dir = TempDir::new().unwrap();
        let cal = calendar(&dir, "14/06/24 10:00, Dentist\n");

        assert_eq!(lines(&cal, "friday", now()).unwrap(), vec!["10:00, Dentist"]);
        assert!(lines(&cal, "thursday", now()).unwrap().is_empty());
    }

    #[test]
    fn test_ls_malformed_file() {
        let dir = TempDir::new().unwrap();
        let cal = calendar(&dir, "14/06/24 10:00 Dentist\n");

        let err = lines(&cal, "14/06/24", now()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CalError>(),
            Some(CalError::MalformedLine { line_number: 1, .. })
        ));
    }
}
