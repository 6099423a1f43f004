use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{PersistenceError, Snapshot, SnapshotStore};

/// In-memory snapshot store for tests/dev.
///
/// `fail_writes` makes every save fail, to exercise rollback paths.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshot: Mutex<Option<Snapshot>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> Option<Snapshot> {
        self.snapshot.lock().ok().and_then(|s| s.clone())
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|_| PersistenceError::Io(std::io::Error::other("snapshot lock poisoned")))?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Io(std::io::Error::other("simulated write failure")));
        }
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| PersistenceError::Io(std::io::Error::other("snapshot lock poisoned")))?;
        *guard = Some(snapshot.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
