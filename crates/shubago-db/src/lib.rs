//! # shubago-db: Persistence Layer for the Shubago Ledger
//!
//! Keeps the ledger document in a key-value backend and runs the
//! load / mutate / save cycle around the pure [`shubago_core::Store`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shubago Data Flow                                │
//! │                                                                         │
//! │  CLI command (shubago sale ...)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shubago-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Ledger     │    │   KvBackend   │    │   Database   │  │   │
//! │  │   │  (ledger.rs)  │───►│  SqliteKv     │───►│  (pool.rs)   │  │   │
//! │  │   │ clone/persist │    │  MemoryKv     │    │  migrations  │  │   │
//! │  │   │ /swap         │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: kv_store["shubago_pharma_v1"] = { products, ... }     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shubago_db::{Database, Ledger, LedgerConfig};
//!
//! let config = LedgerConfig::load(None)?;
//! let db = Database::new(config.db_config()).await?;
//! let mut ledger = Ledger::open(db.kv(), config.store_key.clone(), config.policy()).await?;
//!
//! let invoice = ledger.record_sale(None, &lines).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod config;
pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{KvBackend, MemoryKv, SqliteKv};
pub use config::{LedgerConfig, DEFAULT_STORE_KEY};
pub use error::{DbError, DbResult, LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use pool::{Database, DbConfig};
