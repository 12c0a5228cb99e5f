//! Advisory lock held across load, change and save of a calendar file.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{CalError, CalResult};

/// Releases the lock when dropped.
#[derive(Debug)]
pub struct CalendarLock {
    _file: File,
    path: PathBuf,
}

impl CalendarLock {
    /// Lock `<calendar>.lock` next to the calendar, waiting for any other
    /// textcal process that holds it.
    pub fn acquire(calendar: &Path) -> CalResult<Self> {
        let path = lock_path(calendar);
        let err = |source| CalError::Lock {
            path: path.clone(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(err)?;

        file.lock_exclusive().map_err(err)?;
        tracing::debug!(path = %path.display(), "calendar locked");

        Ok(CalendarLock { _file: file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn lock_path(calendar: &Path) -> PathBuf {
    let mut name = calendar.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}
