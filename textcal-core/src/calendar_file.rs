//! The plain text calendar file.
//!
//! One event per line:
//!
//! ```text
//! 14/06/24 10:00, Dentist
//! 14/06/24 18:30, Dinner, bring wine
//! ```
//!
//! Only the first comma separates the date/time from the description. Numeric
//! dates are written day-first or month-first according to `DateOrder`.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime};
use tempfile::NamedTempFile;

use crate::error::{CalError, CalResult};
use crate::event::split_entry;
use crate::lock::CalendarLock;
use crate::parse::{DateOrder, DateTimeParser};
use crate::store::EventStore;

#[derive(Debug, Clone)]
pub struct CalendarFile {
    path: PathBuf,
    order: DateOrder,
}

impl CalendarFile {
    pub fn new(path: impl Into<PathBuf>, order: DateOrder) -> Self {
        CalendarFile {
            path: path.into(),
            order,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn order(&self) -> DateOrder {
        self.order
    }

    /// Read every event in the file.
    ///
    /// The whole file must be well formed: a line without a separator or with
    /// an unreadable date fails the load and no events are returned.
    pub fn load(&self, parser: &impl DateTimeParser) -> CalResult<EventStore> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CalError::FileNotFound(self.path.clone()),
            _ => CalError::Unreadable {
                path: self.path.clone(),
                source: e,
            },
        })?;

        let mut store = EventStore::new();

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let (when, what) = split_entry(line).ok_or_else(|| CalError::MalformedLine {
                line_number: index + 1,
                line: line.to_string(),
            })?;

            let timestamp = parser.parse(when).inspect_err(|_| {
                tracing::debug!(path = %self.path.display(), line = index + 1, "unreadable date in calendar file");
            })?;

            store.add(timestamp, what);
        }

        tracing::debug!(path = %self.path.display(), events = store.len(), "calendar loaded");
        Ok(store)
    }

    /// Write the store back, replacing the file.
    ///
    /// Only events later than `now - retention_days` are written; older ones
    /// are dropped without notice. Returns the number of events written.
    pub fn save(
        &self,
        store: &EventStore,
        retention_days: u32,
        now: NaiveDateTime,
    ) -> CalResult<usize> {
        let cutoff = now - Duration::days(i64::from(retention_days));
        let unwritable = |source: std::io::Error| CalError::Unwritable {
            path: self.path.clone(),
            source,
        };

        let mut contents = String::new();
        let mut written = 0;
        for (timestamp, description) in store.retained(cutoff) {
            contents.push_str(&self.format_line(timestamp, description));
            contents.push('\n');
            written += 1;
        }

        // Replace the file a symlink points at, not the link, and keep its mode.
        let (target, permissions) = match std::fs::metadata(&self.path) {
            Ok(metadata) => (
                std::fs::canonicalize(&self.path).map_err(unwritable)?,
                Some(metadata.permissions()),
            ),
            Err(_) => (self.path.clone(), None),
        };

        let mut tmp = NamedTempFile::new_in(parent_dir(&target)).map_err(unwritable)?;
        if let Some(permissions) = permissions {
            tmp.as_file().set_permissions(permissions).map_err(unwritable)?;
        }
        tmp.write_all(contents.as_bytes()).map_err(unwritable)?;
        tmp.as_file().sync_all().map_err(unwritable)?;
        tmp.persist(&target).map_err(|e| unwritable(e.error))?;

        tracing::debug!(path = %self.path.display(), events = written, "calendar saved");
        Ok(written)
    }

    /// Create an empty calendar file. Returns false if one already exists.
    pub fn create(&self) -> CalResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        let unwritable = |source: std::io::Error| CalError::Unwritable {
            path: self.path.clone(),
            source,
        };

        std::fs::create_dir_all(parent_dir(&self.path)).map_err(unwritable)?;
        std::fs::File::create(&self.path).map_err(unwritable)?;
        Ok(true)
    }

    /// Take the advisory lock for a load/change/save cycle. The calendar must
    /// already exist.
    pub fn lock(&self) -> CalResult<CalendarLock> {
        if !self.path.is_file() {
            return Err(CalError::FileNotFound(self.path.clone()));
        }
        CalendarLock::acquire(&self.path)
    }

    /// `<date> <time>, <description>`
    pub fn format_line(&self, timestamp: NaiveDateTime, description: &str) -> String {
        format!(
            "{}, {}",
            timestamp.format(self.order.storage_format()),
            description
        )
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
