use anyhow::Result;
use owo_colors::{OwoColorize, Stream::Stdout};
use textcal_core::calendar_file::CalendarFile;

pub fn run(calendar: &CalendarFile) -> Result<()> {
    let path = calendar.path().display();

    if calendar.create()? {
        println!(
            "{}",
            format!("Created {path}").if_supports_color(Stdout, |text| text.green())
        );
    } else {
        println!(
            "{}",
            format!("{path} already exists").if_supports_color(Stdout, |text| text.dimmed())
        );
    }

    Ok(())
}
