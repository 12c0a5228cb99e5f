//! Core types for textcal.
//!
//! This crate holds everything that has an opinion about events:
//! - `parse`: fuzzy date/time parsing (`DateTimeParser`, `FuzzyParser`)
//! - `store`: the in-memory `EventStore`
//! - `calendar_file`: the plain text file format and the retention policy
//! - `query`: single-day listings and multi-day agendas

pub mod calendar_file;
pub mod config;
pub mod error;
pub mod event;
pub mod lock;
pub mod parse;
pub mod query;
pub mod store;

pub use calendar_file::CalendarFile;
pub use error::{CalError, CalResult};
pub use event::Event;
pub use parse::{DateOrder, DateTimeParser, FuzzyParser};
pub use store::EventStore;
