use anyhow::Result;
use chrono::NaiveDateTime;
use owo_colors::{OwoColorize, Stream::Stdout};
use textcal_core::calendar_file::CalendarFile;
use textcal_core::query::{self, DayBlock};

use super::parser_for;
use crate::render::Render;

pub fn run(calendar: &CalendarFile, days: u32, now: NaiveDateTime) -> Result<()> {
    let blocks = blocks(calendar, days, now)?;

    if blocks.is_empty() {
        println!("{}", "No events".if_supports_color(Stdout, |text| text.dimmed()));
        return Ok(());
    }

    for block in &blocks {
        println!("{}", block.render());
    }

    Ok(())
}

fn blocks(calendar: &CalendarFile, days: u32, now: NaiveDateTime) -> Result<Vec<DayBlock>> {
    let store = calendar.load(&parser_for(calendar, now))?;
    Ok(query::agenda(&store, now.date(), days).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use textcal_core::parse::DateOrder;

    #[test]
    fn test_agenda_single_block() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cal.txt");
        std::fs::write(&path, "13/06/24 07:00, Walk the dog\n20/06/24 08:00, Next week\n").unwrap();
        let cal = CalendarFile::new(path, DateOrder::DayFirst);

        let now = NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        let blocks = blocks(&cal, 7, now).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header(), "Thursday 13 June");
        assert_eq!(blocks[0].lines, vec!["07:00, Walk the dog"]);
    }
}
