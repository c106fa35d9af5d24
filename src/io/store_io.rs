use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::task::Task;

/// Error type for saving the task file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The backing file holding the whole task list as a JSON array.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
    /// Directory for the recovery log; `None` disables it
    log_dir: Option<PathBuf>,
}

impl TaskFile {
    /// A task file with the recovery log kept beside it
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let log_dir = Some(parent_dir(&path));
        TaskFile { path, log_dir }
    }

    /// A task file that never writes a recovery log
    pub fn without_recovery_log(path: impl Into<PathBuf>) -> Self {
        TaskFile {
            path: path.into(),
            log_dir: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Load the task list. A missing or blank file yields an empty list.
    /// So does an undecodable one, after it is copied to `<file>.bak`.
    pub fn load(&self) -> Vec<Task> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                eprintln!("warning: could not read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let decoded = match std::str::from_utf8(&bytes) {
            Ok(text) if text.trim().is_empty() => return Vec::new(),
            Ok(text) => serde_json::from_str::<Vec<Task>>(text).map_err(|e| e.to_string()),
            Err(e) => Err(format!("not valid UTF-8: {}", e)),
        };

        match decoded {
            Ok(tasks) => tasks,
            Err(reason) => {
                self.quarantine(&bytes, &reason);
                Vec::new()
            }
        }
    }

    /// Copy an undecodable file to `<file>.bak` and record it in the
    /// recovery log. Content already sitting in the backup is not recorded
    /// again.
    fn quarantine(&self, bytes: &[u8], reason: &str) {
        let bak = backup_path(&self.path);
        if fs::read(&bak).is_ok_and(|existing| existing == bytes) {
            eprintln!(
                "warning: could not parse {} (already backed up as {}): {}",
                self.path.display(),
                bak.display(),
                reason
            );
            return;
        }

        let backup = match fs::write(&bak, bytes) {
            Ok(()) => {
                eprintln!(
                    "warning: could not parse {} (backed up as {}): {}",
                    self.path.display(),
                    bak.display(),
                    reason
                );
                bak.display().to_string()
            }
            Err(e) => {
                eprintln!(
                    "warning: could not parse {} and could not back it up to {} ({}): {}",
                    self.path.display(),
                    bak.display(),
                    e,
                    reason
                );
                format!("failed: {}", e)
            }
        };

        self.log(RecoveryEntry {
            timestamp: chrono::Utc::now(),
            category: RecoveryCategory::Load,
            description: "unreadable task file".to_string(),
            fields: vec![
                ("Source".to_string(), self.path.display().to_string()),
                ("Backup".to_string(), backup),
                ("Error".to_string(), reason.to_string()),
            ],
            body: String::from_utf8_lossy(bytes).into_owned(),
        });
    }

    /// Overwrite the file with the full task list, pretty-printed.
    /// On failure the content goes to the recovery log.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(tasks)?;
        if let Err(e) = recovery::atomic_write(&self.path, content.as_bytes()) {
            self.log(RecoveryEntry {
                timestamp: chrono::Utc::now(),
                category: RecoveryCategory::Write,
                description: "task file write failed".to_string(),
                fields: vec![
                    ("Target".to_string(), self.path.display().to_string()),
                    ("Error".to_string(), e.to_string()),
                ],
                body: content,
            });
            return Err(StoreError::Write {
                path: self.path.clone(),
                source: e,
            });
        }
        Ok(())
    }

    /// Record a deleted task in the recovery log
    pub fn log_deletion(&self, task: &Task) {
        if let Some(dir) = &self.log_dir {
            let json = serde_json::to_string_pretty(task).unwrap_or_default();
            recovery::log_task_deletion(dir, task.id, &task.task, &json);
        }
    }

    fn log(&self, entry: RecoveryEntry) {
        if let Some(dir) = &self.log_dir {
            recovery::log_recovery(dir, entry);
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}
