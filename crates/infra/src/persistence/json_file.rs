use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::{FORMAT_VERSION, PersistenceError, Snapshot, SnapshotStore};

/// JSON file-backed snapshot store.
///
/// Saves go to a sibling temp file that is then renamed over the target, so a
/// crash mid-write leaves the previous snapshot intact. A file that cannot be
/// parsed is moved aside to `<path>.corrupt-<timestamp>` on load.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    fn quarantine(&self, reason: String) -> Result<Option<Snapshot>, PersistenceError> {
        let target = self.sibling(&format!(".corrupt-{}", Utc::now().format("%Y%m%dT%H%M%SZ")));
        fs::rename(&self.path, &target)?;
        tracing::error!(
            path = %self.path.display(),
            moved_to = %target.display(),
            reason = %reason,
            "snapshot unreadable, moved aside"
        );
        Err(PersistenceError::Corrupt(format!(
            "{reason} (moved to {})",
            target.display()
        )))
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Snapshot>(&bytes) {
            Ok(snapshot) if snapshot.format_version <= FORMAT_VERSION => {
                tracing::debug!(
                    path = %self.path.display(),
                    products = snapshot.products.len(),
                    sales = snapshot.sales.len(),
                    users = snapshot.users.len(),
                    "snapshot loaded"
                );
                Ok(Some(snapshot))
            }
            Ok(snapshot) => self.quarantine(format!(
                "unsupported format_version {}",
                snapshot.format_version
            )),
            Err(e) => self.quarantine(e.to_string()),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.sibling(".tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), bytes = data.len(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("omnistock_{}", uuid::Uuid::now_v7()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn empty_snapshot() -> Snapshot {
        Snapshot {
            format_version: FORMAT_VERSION,
            products: vec![],
            sales: vec![],
            users: vec![],
        }
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = temp_dir();
        let store = JsonFileSnapshotStore::new(dir.join("state.json"));
        assert!(store.load().unwrap().is_none());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn save_then_load_and_no_temp_file_left() {
        let dir = temp_dir();
        let store = JsonFileSnapshotStore::new(dir.join("nested").join("state.json"));

        store.save(&empty_snapshot()).unwrap();
        assert_eq!(store.load().unwrap(), Some(empty_snapshot()));
        assert!(!store.sibling(".tmp").exists());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn document_has_the_expected_top_level_keys() {
        let dir = temp_dir();
        let store = JsonFileSnapshotStore::new(dir.join("state.json"));
        store.save(&empty_snapshot()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        for key in ["format_version", "products", "sales", "users"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupt_file_is_moved_aside() {
        let dir = temp_dir();
        let store = JsonFileSnapshotStore::new(dir.join("state.json"));
        fs::write(store.path(), b"{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt(_)));
        assert!(!store.path().exists());

        let quarantined = fs::read_dir(&dir)
            .unwrap()
            .filter_map(Result::ok)
            .any(|e| e.file_name().to_string_lossy().starts_with("state.json.corrupt-"));
        assert!(quarantined);

        // Next load starts fresh.
        assert!(store.load().unwrap().is_none());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn newer_format_is_treated_as_corrupt() {
        let dir = temp_dir();
        let store = JsonFileSnapshotStore::new(dir.join("state.json"));
        fs::write(store.path(), br#"{"format_version": 99}"#).unwrap();

        assert!(matches!(store.load(), Err(PersistenceError::Corrupt(_))));
        let _ = fs::remove_dir_all(dir);
    }
}
