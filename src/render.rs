//! Terminal rendering for textcal-core types.

use owo_colors::{OwoColorize, Stream::Stdout};
use textcal_core::query::DayBlock;

/// Extension trait for colored terminal output.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DayBlock {
    /// Bold header, one line per event, then a blank line.
    fn render(&self) -> String {
        let mut out = self
            .header()
            .if_supports_color(Stdout, |text| text.bold())
            .to_string();
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out
    }
}
