//! # Key-Value Backends
//!
//! The ledger sees its storage as a blob store with three operations. Any
//! medium that can keep one byte string per key can host a ledger.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KvBackend                                                              │
//! │    get(key)        → Some(bytes) | None                                 │
//! │    set(key, bytes) → replaces any previous value in full                │
//! │    clear(key)      → removes the value (absent afterwards)              │
//! │                                                                         │
//! │  ├── SqliteKv   kv_store table, one upsert per save                     │
//! │  └── MemoryKv   HashMap, counts writes, can be told to fail             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use crate::error::DbResult;

mod memory;
mod sqlite;

pub use memory::MemoryKv;
pub use sqlite::SqliteKv;

/// Storage for opaque documents keyed by name.
///
/// # Implementation Notes
///
/// - `set` must replace the whole value atomically; readers never observe a
///   mix of the old and new document
/// - Implementations must be `Send + Sync` so a ledger can move across tasks
pub trait KvBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = DbResult<Option<Vec<u8>>>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> impl Future<Output = DbResult<()>> + Send;

    /// Remove the value under `key`. Clearing a missing key is not an error.
    fn clear(&self, key: &str) -> impl Future<Output = DbResult<()>> + Send;
}
