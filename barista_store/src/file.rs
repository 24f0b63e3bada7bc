//! One JSON document per key under a data directory.
//!
//! Writes go to a uniquely named temp file in the same directory, are synced to
//! disk, then renamed into place, so a crash mid-write leaves the previous
//! document intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use barista_traits::KeyValueStore;
use tempfile::NamedTempFile;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, BoxError> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !valid {
            return Err(format!("invalid storage key {key:?}").into());
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, BoxError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("read {}: {e}", path.display()).into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BoxError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .map_err(|e| format!("create {}: {e}", self.dir.display()))?;
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| format!("create temp file in {}: {e}", self.dir.display()))?;
        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.flush())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| format!("write {}: {e}", tmp.path().display()))?;
        tmp.persist(&path)
            .map_err(|e| format!("rename to {}: {}", path.display(), e.error))?;
        tracing::trace!(path = %path.display(), bytes = value.len(), "document written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BoxError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("remove {}: {e}", path.display()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let store = FileStore::new("/tmp/unused");
        assert!(store.get("../etc/passwd").is_err());
        assert!(store.get("").is_err());
        assert!(store.path_for("barista-mate-settings").is_ok());
    }
}
