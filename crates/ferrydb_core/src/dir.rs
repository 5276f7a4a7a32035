//! Terminal data directory management.
//!
//! This module handles the file system layout for a FerryDB terminal:
//!
//! ```text
//! <data_path>/
//! ├─ LOCK              # Advisory lock for single-process ownership
//! ├─ vessels.dat       # Vessel records
//! ├─ sailings.dat      # Sailing records
//! ├─ vehicles.dat      # Vehicle records
//! └─ reservations.dat  # Reservation records
//! ```
//!
//! Each `.dat` file is a flat array of fixed-size records for one entity
//! type. The LOCK file ensures only one process owns the data directory at
//! a time; the scan-then-mutate sequences in the repositories are not safe
//! under concurrent writers.

use crate::error::{CoreError, CoreResult};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names within the data directory.
const LOCK_FILE: &str = "LOCK";
const VESSELS_FILE: &str = "vessels.dat";
const SAILINGS_FILE: &str = "sailings.dat";
const VEHICLES_FILE: &str = "vehicles.dat";
const RESERVATIONS_FILE: &str = "reservations.dat";

/// Manages the terminal data directory structure and file locking.
///
/// The `TerminalDir` holds an exclusive advisory lock on the data
/// directory for its whole lifetime. Only one `TerminalDir` instance can
/// exist per directory at a time; the lock is released when the value is
/// dropped.
#[derive(Debug)]
pub struct TerminalDir {
    /// Root directory path.
    path: PathBuf,
    /// Lock file handle (held for exclusive access).
    _lock_file: File,
}

impl TerminalDir {
    /// Opens or creates a terminal data directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the data directory
    /// * `create_if_missing` - If true, creates the directory if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory doesn't exist and `create_if_missing` is false
    /// - Another process holds the lock (returns `TerminalLocked`)
    /// - I/O errors occur
    pub fn open(path: &Path, create_if_missing: bool) -> CoreResult<Self> {
        if !path.exists() {
            if create_if_missing {
                fs::create_dir_all(path)?;
            } else {
                return Err(CoreError::validation(format!(
                    "data directory does not exist: {}",
                    path.display()
                )));
            }
        }

        if !path.is_dir() {
            return Err(CoreError::validation(format!(
                "path is not a directory: {}",
                path.display()
            )));
        }

        let lock_path = path.join(LOCK_FILE);
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        // Non-blocking: a held lock means another live process owns the data
        if lock_file.try_lock_exclusive().is_err() {
            return Err(CoreError::TerminalLocked);
        }

        debug!(path = %path.display(), "terminal data directory opened");

        Ok(Self {
            path: path.to_path_buf(),
            _lock_file: lock_file,
        })
    }

    /// Returns the path to the data directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path to the vessel record file.
    #[must_use]
    pub fn vessels_path(&self) -> PathBuf {
        self.path.join(VESSELS_FILE)
    }

    /// Returns the path to the sailing record file.
    #[must_use]
    pub fn sailings_path(&self) -> PathBuf {
        self.path.join(SAILINGS_FILE)
    }

    /// Returns the path to the vehicle record file.
    #[must_use]
    pub fn vehicles_path(&self) -> PathBuf {
        self.path.join(VEHICLES_FILE)
    }

    /// Returns the path to the reservation record file.
    #[must_use]
    pub fn reservations_path(&self) -> PathBuf {
        self.path.join(RESERVATIONS_FILE)
    }

    /// Checks if this is a new (empty) data directory.
    #[must_use]
    pub fn is_new(&self) -> bool {
        !self.vessels_path().exists()
            && !self.sailings_path().exists()
            && !self.vehicles_path().exists()
            && !self.reservations_path().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_creates_directory() {
        let temp = tempdir().unwrap();
        let data_path = temp.path().join("terminal");

        assert!(!data_path.exists());

        let dir = TerminalDir::open(&data_path, true).unwrap();
        assert!(data_path.exists());
        assert!(data_path.is_dir());
        assert!(dir.is_new());
    }

    #[test]
    fn open_fails_if_not_exists_and_no_create() {
        let temp = tempdir().unwrap();
        let data_path = temp.path().join("nonexistent");

        let result = TerminalDir::open(&data_path, false);
        assert!(result.is_err());
    }

    #[test]
    fn lock_prevents_second_open() {
        let temp = tempdir().unwrap();
        let data_path = temp.path().join("locked");

        let _dir1 = TerminalDir::open(&data_path, true).unwrap();

        let result = TerminalDir::open(&data_path, true);
        assert!(matches!(result, Err(CoreError::TerminalLocked)));
    }

    #[test]
    fn lock_released_on_drop() {
        let temp = tempdir().unwrap();
        let data_path = temp.path().join("reopen");

        {
            let _dir = TerminalDir::open(&data_path, true).unwrap();
        }

        let _dir2 = TerminalDir::open(&data_path, true).unwrap();
    }

    #[test]
    fn paths_are_correct() {
        let temp = tempdir().unwrap();
        let data_path = temp.path().join("paths");

        let dir = TerminalDir::open(&data_path, true).unwrap();

        assert_eq!(dir.vessels_path(), data_path.join("vessels.dat"));
        assert_eq!(dir.sailings_path(), data_path.join("sailings.dat"));
        assert_eq!(dir.vehicles_path(), data_path.join("vehicles.dat"));
        assert_eq!(dir.reservations_path(), data_path.join("reservations.dat"));
    }
}
