/// Test utilities shared by the storage, domain and REST tests.
///
/// `TestEnvironment` hands out a fresh store per test. The file-backed
/// variant keeps its `TempDir` alive so the directory is removed on drop,
/// even if the test panics.
use std::sync::Arc;
use tempfile::TempDir;

use super::{FileStore, JsonStore, MemoryStore};

pub struct TestEnvironment {
    pub store: JsonStore,
    /// Direct access to the raw blobs for assertions
    pub memory: MemoryStore,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let memory = MemoryStore::new();
        let store = JsonStore::new(Arc::new(memory.clone()));
        Self { store, memory }
    }
}

/// File-backed environment for tests that care about what lands on disk
pub struct FileTestEnvironment {
    pub store: JsonStore,
    pub file_store: FileStore,
    _temp_dir: TempDir,
}

impl FileTestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_store = FileStore::new(temp_dir.path()).expect("Failed to create file store");
        let store = JsonStore::new(Arc::new(file_store.clone()));
        Self {
            store,
            file_store,
            _temp_dir: temp_dir,
        }
    }
}
