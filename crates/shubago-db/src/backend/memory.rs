//! In-process key-value storage, for tests and throwaway ledgers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::Mutex;

use super::KvBackend;
use crate::error::{DbError, DbResult};

/// `HashMap` backend that records how many writes it has seen.
#[derive(Debug, Default)]
pub struct MemoryKv {
    values: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with one value.
    pub fn with_value(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.into());
        MemoryKv {
            values: Mutex::new(values),
            ..Self::default()
        }
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every following `set` fail, until switched back.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KvBackend for MemoryKv {
    async fn get(&self, key: &str) -> DbResult<Option<Vec<u8>>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> DbResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::WriteFailed(format!("writes disabled for {}", key)));
        }

        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self, key: &str) -> DbResult<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}
