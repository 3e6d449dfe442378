//! Flat-file task storage.
//!
//! # Responsibility
//! - Seed a `TaskList` from the backing file at startup.
//! - Mirror the whole list back to disk after every mutation.
//!
//! # Invariants
//! - A missing backing file is an empty list, not an error.
//! - Undecodable lines are skipped; loading continues with the rest.
//! - Saves replace the file via rename, so readers see either the old or
//!   the new complete content.
//! - Logs carry counts and line numbers only, never task text.

use crate::codec::decode;
use crate::task_list::TaskList;
use log::{debug, error, info, warn};
use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io { path: PathBuf, source: io::Error },
    /// Path has no file name component (e.g. `/` or `..`).
    InvalidPath(PathBuf),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at `{}`: {source}", path.display()),
            Self::InvalidPath(path) => {
                write!(f, "storage path `{}` has no file name", path.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidPath(_) => None,
        }
    }
}

/// Persistence contract used by the dispatcher.
pub trait TaskStore {
    /// Loads every decodable task. Never fails; problems yield fewer tasks.
    fn load(&self) -> TaskList;
    /// Overwrites the backing store with `tasks`.
    fn save(&self, tasks: &TaskList) -> StorageResult<()>;
}

/// Backing-file implementation of [`TaskStore`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads tasks, surfacing read errors instead of swallowing them.
    ///
    /// Malformed lines are still skipped rather than reported.
    pub fn try_load(&self) -> StorageResult<TaskList> {
        self.ensure_parent_dir()?;
        if !self.path.exists() {
            return Ok(TaskList::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|err| self.io_error(err))?;
        let mut tasks = TaskList::new();
        let mut skipped = 0usize;
        for (idx, raw) in content.lines().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            match decode(raw) {
                Ok(task) => tasks.add(task),
                Err(err) => {
                    skipped += 1;
                    warn!(
                        "event=line_skipped module=storage status=skip line={} reason={}",
                        idx + 1,
                        err.code()
                    );
                }
            }
        }

        if skipped > 0 {
            debug!("event=storage_load module=storage skipped={skipped}");
        }
        Ok(tasks)
    }

    fn ensure_parent_dir(&self) -> StorageResult<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|err| StorageError::Io {
                    path: parent.to_path_buf(),
                    source: err,
                })
            }
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> StorageResult<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| StorageError::InvalidPath(self.path.clone()))?;
        let mut temp_name = OsString::from(file_name);
        temp_name.push(".tmp");
        Ok(self.path.with_file_name(temp_name))
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TaskStore for FileStorage {
    fn load(&self) -> TaskList {
        let started_at = Instant::now();
        match self.try_load() {
            Ok(tasks) => {
                info!(
                    "event=storage_load module=storage status=ok count={} duration_ms={}",
                    tasks.size(),
                    started_at.elapsed().as_millis()
                );
                tasks
            }
            Err(err) => {
                error!(
                    "event=storage_load module=storage status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                TaskList::new()
            }
        }
    }

    fn save(&self, tasks: &TaskList) -> StorageResult<()> {
        let started_at = Instant::now();
        self.ensure_parent_dir()?;

        let mut content = String::new();
        for task in tasks.all() {
            content.push_str(&task.serialize());
            content.push('\n');
        }

        let temp_path = self.temp_path()?;
        fs::write(&temp_path, content).map_err(|err| StorageError::Io {
            path: temp_path.clone(),
            source: err,
        })?;
        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.io_error(err));
        }

        debug!(
            "event=storage_save module=storage status=ok count={} duration_ms={}",
            tasks.size(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}
