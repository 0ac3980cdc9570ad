// Shared helpers for integration tests

#![allow(dead_code)]

use moodleorg::{CacheError, CatalogCache};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const FIXTURE: &str = include_str!("../fixtures/pluglist.json");

/// In-memory cache with controllable entry ages
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, (Vec<u8>, Duration)>>>,
    writes: Arc<AtomicUsize>,
    read_only: bool,
    fail_writes: bool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, contents: &[u8], age: Duration) -> Self {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (contents.to_vec(), age));
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of write attempts, successful or not
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn contents(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(bytes, _)| bytes.clone())
    }
}

impl CatalogCache for MemoryCache {
    fn age(&self, key: &str) -> Option<Duration> {
        self.entries.lock().unwrap().get(key).map(|(_, age)| *age)
    }

    fn read(&self, key: &str) -> Option<Vec<u8>> {
        self.contents(key)
    }

    fn write(&self, key: &str, contents: &[u8]) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(CacheError::Io {
                path: PathBuf::from(key),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (contents.to_vec(), Duration::ZERO));
        Ok(())
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}
