use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::r#trait::{SnapshotStore, StorageError, StorageResult};

/// File-backed snapshot: one JSON document at a fixed path.
///
/// Writes land in `<path>.tmp` first and are renamed over the target, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }

    /// `<path>.corrupt.<unix-secs>`, with a `.<n>` suffix when that name is
    /// already taken.
    fn quarantine_target(&self) -> PathBuf {
        let base = format!(".corrupt.{}", Utc::now().timestamp());
        let mut target = self.sibling(&base);
        let mut n = 1u32;
        while target.exists() {
            target = self.sibling(&format!("{base}.{n}"));
            n += 1;
        }
        target
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self) -> StorageResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            // Present but not UTF-8 is a corrupt snapshot, not an I/O failure.
            Err(err) if err.kind() == ErrorKind::InvalidData => Err(StorageError::CorruptSnapshot(
                format!("{} is not valid UTF-8", self.location()),
            )),
            Err(err) => Err(StorageError::io(self.location(), err)),
        }
    }

    fn write(&self, contents: &str) -> StorageResult<()> {
        let tmp = self.sibling(".tmp");
        fs::write(&tmp, contents).map_err(|e| StorageError::io(tmp.display().to_string(), e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::io(self.location(), e))?;
        Ok(())
    }

    fn quarantine(&self) -> StorageResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let target = self.quarantine_target();
        fs::rename(&self.path, &target).map_err(|e| StorageError::io(self.location(), e))?;
        Ok(Some(target.display().to_string()))
    }
}
