/// File-backed store backend
///
/// Persists each bucket as a single file named after its key under a data
/// directory, giving local-storage durability: values survive process
/// restarts. Writes replace the whole file; reads of absent files return
/// `None`.
///
/// # Example
///
/// ```no_run
/// use tasklight::store::{FileStore, Store};
///
/// # fn example() -> Result<(), tasklight::store::StoreError> {
/// let store = FileStore::open("/var/lib/tasklight")?;
/// store.set("app_users", "[]")?;
/// assert_eq!(store.get("app_users")?.as_deref(), Some("[]"));
/// # Ok(())
/// # }
/// ```
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Store, StoreError};

/// Durable key-value store over a directory of bucket files
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened file store");
        Ok(Self { dir })
    }

    fn bucket_path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers (see store::keys), never user input.
        self.dir.join(format!("{key}.json"))
    }

    /// Root directory of this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.bucket_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.bucket_path(key), value)?;
        debug!(key, bytes = value.len(), "wrote bucket");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.bucket_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.dir(), dir.path());
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("app_users", "[\"alice\"]").unwrap();
        }

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("app_users").unwrap().as_deref(),
            Some("[\"alice\"]")
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("auth_token", "tok").unwrap();
        store.remove("auth_token").unwrap();
        store.remove("auth_token").unwrap();
        assert_eq!(store.get("auth_token").unwrap(), None);
    }
}
