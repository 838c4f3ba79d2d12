use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::Status;

/// Shared key-value storage backing the widget snapshot and related state.
///
/// One file per key under a common directory. Commits are synchronous and
/// all-or-nothing: the value is written to a temp file in the same directory,
/// synced, then renamed over the key's file. Widget renderers running in a
/// separate process never observe a write in progress.
pub struct SharedPrefs {
    root: PathBuf,
}

impl SharedPrefs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SharedPrefs { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_root(&self) -> Result<(), Status> {
        if self.root.is_file() {
            return Err(Status::invalid_argument(format!(
                "prefs root '{}' is a file",
                self.root.display()
            )));
        }
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn read(&self, key: &str) -> Result<Option<String>, Status> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Status::from(e)),
        }
    }

    pub fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, Status> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Status::from(e)),
        }
    }

    pub fn commit(&self, key: &str, value: &str) -> Result<(), Status> {
        self.commit_bytes(key, value.as_bytes())
    }

    pub fn commit_bytes(&self, key: &str, value: &[u8]) -> Result<(), Status> {
        self.ensure_root()?;

        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key))
            .map_err(|e| Status::new("prefs commit error", e))?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), Status> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Status::from(e)),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_key_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SharedPrefs::new(dir.path());
        assert_eq!(prefs.read("widget_data").unwrap(), None);
    }

    #[test]
    fn commit_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SharedPrefs::new(dir.path());

        prefs.commit("widget_data", r#"{"games": []}"#).unwrap();
        assert_eq!(
            prefs.read("widget_data").unwrap().unwrap(),
            r#"{"games": []}"#
        );
    }

    #[test]
    fn commit_replaces_previous_value_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SharedPrefs::new(dir.path());

        prefs.commit("widget_data", "first value, quite long").unwrap();
        prefs.commit("widget_data", "second").unwrap();
        assert_eq!(prefs.read("widget_data").unwrap().unwrap(), "second");
    }

    #[test]
    fn commit_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SharedPrefs::new(dir.path().join("nested").join("store"));

        prefs.commit("key", "value").unwrap();
        assert_eq!(prefs.read("key").unwrap().unwrap(), "value");
    }

    #[test]
    fn ensure_root_rejects_file_in_the_way() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store");
        std::fs::write(&path, "not a directory").unwrap();

        let prefs = SharedPrefs::new(&path);
        assert!(prefs.ensure_root().is_err());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SharedPrefs::new(dir.path());

        prefs.commit("key", "value").unwrap();
        prefs.remove("key").unwrap();
        prefs.remove("key").unwrap();
        assert_eq!(prefs.read("key").unwrap(), None);
    }
}
