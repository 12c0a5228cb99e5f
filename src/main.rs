mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use textcal_core::config::CalConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "textcal", version)]
#[command(about = "Keep track of a handful of date-tagged events in a plain text file")]
#[command(long_about = "Keep track of a handful of date-tagged events in a plain text file.\n\n\
    Dates may be fuzzy (\"Thursday\", \"Jun 14th 10am\", \"14/06/24\"); events \
    without a time are placed at 00:00. Past events are dropped from the file \
    a set number of days after they happen.")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Use this calendar file instead of the configured one
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Read configuration from this file instead of ~/.config/textcal/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an event, e.g. `textcal add Thursday 7am, Walk the dog`
    Add {
        /// Date/time and event text, separated by a comma
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        entry: Vec<String>,
    },
    /// Show events for the coming days, starting today
    Agenda {
        /// Number of days to show (default from config, 7)
        days: Option<u32>,
    },
    /// List the events on one day
    Ls {
        /// The day, e.g. "tomorrow" or "14/06/24"
        #[arg(required = true, num_args = 1..)]
        date: Vec<String>,
    },
    /// Create an empty calendar file if there is none
    Init,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CalConfig::load_from(path)?,
        None => CalConfig::load()?,
    };
    if let Some(file) = cli.file {
        config.calendar_file = file;
    }

    let calendar = config.calendar();
    let now = Local::now().naive_local();
    tracing::debug!(calendar = %calendar.path().display(), order = ?calendar.order(), "starting");

    match cli.command {
        Commands::Add { entry } => {
            commands::add::run(&calendar, &entry.join(" "), config.retention_days, now)
        }
        Commands::Agenda { days } => {
            commands::agenda::run(&calendar, days.unwrap_or(config.agenda_days), now)
        }
        Commands::Ls { date } => commands::ls::run(&calendar, &date.join(" "), now),
        Commands::Init => commands::init::run(&calendar),
    }
}
