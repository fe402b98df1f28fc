// Manages the local task file on disk.
//
// The on-disk format is a bare JSON array of task objects; see
// `model::Task` for the field contract. Reads and writes take an
// exclusive sidecar lock so a second process cannot interleave a
// half-written file, and writes go through a tmp-file rename.
use crate::context::AppContext;
use crate::model::Task;
use anyhow::Result;
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct LocalStorage;

impl LocalStorage {
    /// Sidecar lock file path (tasks.json -> tasks.json.lock).
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: write to a .tmp file then rename over the target.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Loads the task list. A missing file is an empty list; a malformed
    /// file is an error (the store decides how to fail safe).
    pub fn load(ctx: &dyn AppContext) -> Result<Vec<Task>> {
        let path = ctx.get_task_file_path()?;
        if !path.exists() {
            return Ok(vec![]);
        }
        Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;
            let tasks: Vec<Task> = serde_json::from_str(&json)?;
            Ok(tasks)
        })
    }

    /// Saves the full task list, replacing whatever was on disk.
    pub fn save(ctx: &dyn AppContext, tasks: &[Task]) -> Result<()> {
        let path = ctx.get_task_file_path()?;
        Self::with_lock(&path, || {
            let json = serde_json::to_string_pretty(tasks)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }
}
