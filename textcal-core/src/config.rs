//! textcal configuration.
//!
//! Read once at startup from `~/.config/textcal/config.toml` and `TEXTCAL_*`
//! environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::calendar_file::CalendarFile;
use crate::error::{CalError, CalResult};
use crate::parse::DateOrder;

static DEFAULT_CALENDAR_FILE: &str = "~/cal.txt";
const DEFAULT_RETENTION_DAYS: u32 = 7;
const DEFAULT_AGENDA_DAYS: u32 = 7;

fn default_calendar_file() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_FILE)
}

fn default_day_first() -> bool {
    true
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

fn default_agenda_days() -> u32 {
    DEFAULT_AGENDA_DAYS
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CalConfig {
    /// Where events are kept. `~` is expanded.
    #[serde(default = "default_calendar_file")]
    pub calendar_file: PathBuf,

    /// Read and write numeric dates as DD/MM/YY (false: MM/DD/YY).
    #[serde(default = "default_day_first")]
    pub day_first: bool,

    /// Past events older than this many days are dropped on save.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Days shown by `agenda` when no count is given.
    #[serde(default = "default_agenda_days")]
    pub agenda_days: u32,
}

impl Default for CalConfig {
    fn default() -> Self {
        CalConfig {
            calendar_file: default_calendar_file(),
            day_first: default_day_first(),
            retention_days: default_retention_days(),
            agenda_days: default_agenda_days(),
        }
    }
}

impl CalConfig {
    pub fn config_path() -> CalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalError::Config("Could not determine config directory".into()))?
            .join("textcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented-out config file
    /// there on first run.
    pub fn load() -> CalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing), then the environment.
    pub fn load_from(path: &Path) -> CalResult<Self> {
        Self::build(path, Environment::with_prefix("TEXTCAL"))
    }

    fn build(path: &Path, env: Environment) -> CalResult<Self> {
        let config: CalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| CalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalError::Config(e.to_string()))?;

        tracing::debug!(
            calendar_file = %config.calendar_file.display(),
            day_first = config.day_first,
            retention_days = config.retention_days,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalResult<()> {
        let contents = format!(
            "\
# textcal configuration

# Where your events live:
# calendar_file = \"{DEFAULT_CALENDAR_FILE}\"

# Read and write dates as DD/MM/YY (set to false for MM/DD/YY):
# day_first = true

# Drop past events after this many days:
# retention_days = {DEFAULT_RETENTION_DAYS}

# Days shown by `textcal agenda`:
# agenda_days = {DEFAULT_AGENDA_DAYS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn date_order(&self) -> DateOrder {
        DateOrder::from_day_first(self.day_first)
    }

    pub fn calendar_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.calendar_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn calendar(&self) -> CalendarFile {
        CalendarFile::new(self.calendar_path(), self.date_order())
    }
}
