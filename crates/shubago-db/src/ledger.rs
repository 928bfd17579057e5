//! # Ledger
//!
//! A [`Store`] bound to a [`KvBackend`]: the load / mutate / save cycle.
//!
//! ## Commit Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Mutating Operation                             │
//! │                                                                         │
//! │   self.store ──clone──► next                                           │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                 op(&mut next) ──Err──► return, nothing written         │
//! │                          │                                              │
//! │                          ▼                                              │
//! │             backend.set(key, encode(next)) ──Err──► return,            │
//! │                          │                    memory + storage intact  │
//! │                          ▼                                              │
//! │                  self.store = next                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Memory and storage therefore always hold the same document, and the
//! document is rewritten in full after each successful mutation.

use shubago_core::snapshot;
use shubago_core::{
    CoreError, CoreResult, DashboardSummary, Invoice, LedgerPolicy, LineRequest, Product,
    ProductInput, Purchase, Settings, Store,
};
use tracing::{debug, info, warn};

use crate::backend::KvBackend;
use crate::error::LedgerResult;

/// Suffix of the key a corrupt document is copied to before recovery.
pub const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt";

/// A persisted store.
#[derive(Debug)]
pub struct Ledger<B: KvBackend> {
    backend: B,
    key: String,
    policy: LedgerPolicy,
    store: Store,
}

impl<B: KvBackend> Ledger<B> {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Loads the document under `key`.
    ///
    /// ## Behavior
    /// - Absent: starts from the seeded store and persists it immediately
    /// - Present: parses it; an unreadable document fails with `CorruptState`
    pub async fn open(backend: B, key: impl Into<String>, policy: LedgerPolicy) -> LedgerResult<Self> {
        let key = key.into();

        match backend.get(&key).await? {
            Some(bytes) => {
                let store = snapshot::decode_stored(&bytes)?;
                info!(key = %key, products = store.products().len(), "Ledger loaded");
                Ok(Ledger {
                    backend,
                    key,
                    policy,
                    store,
                })
            }
            None => Self::start_fresh(backend, key, policy).await,
        }
    }

    /// Like [`Ledger::open`], but a corrupt document doesn't stop startup.
    ///
    /// The unreadable bytes are copied to `{key}.corrupt`, a fresh seeded
    /// store replaces them, and the parse error is handed back so the caller
    /// can tell the user. Partial data is never merged.
    pub async fn open_or_recover(
        backend: B,
        key: impl Into<String>,
        policy: LedgerPolicy,
    ) -> LedgerResult<(Self, Option<CoreError>)> {
        let key = key.into();

        let Some(bytes) = backend.get(&key).await? else {
            return Ok((Self::start_fresh(backend, key, policy).await?, None));
        };

        match snapshot::decode_stored(&bytes) {
            Ok(store) => Ok((
                Ledger {
                    backend,
                    key,
                    policy,
                    store,
                },
                None,
            )),
            Err(err) => {
                let backup_key = format!("{}{}", key, CORRUPT_BACKUP_SUFFIX);
                warn!(key = %key, backup = %backup_key, error = %err, "Stored ledger is corrupt, starting fresh");
                backend.set(&backup_key, &bytes).await?;
                let ledger = Self::start_fresh(backend, key, policy).await?;
                Ok((ledger, Some(err)))
            }
        }
    }

    async fn start_fresh(backend: B, key: String, policy: LedgerPolicy) -> LedgerResult<Self> {
        let ledger = Ledger {
            backend,
            key,
            policy,
            store: Store::seeded(),
        };
        ledger.persist().await?;
        info!(key = %ledger.key, "New ledger created");
        Ok(ledger)
    }

    /// Writes the whole current store, replacing the stored document.
    pub async fn persist(&self) -> LedgerResult<()> {
        self.write(&self.store).await
    }

    /// Discards all data and starts over from the seeded store.
    ///
    /// The fresh document overwrites the stored one in a single write, so a
    /// failed reset leaves both copies on the old data.
    pub async fn reset(&mut self) -> LedgerResult<()> {
        let fresh = Store::seeded();
        self.write(&fresh).await?;
        self.store = fresh;
        warn!(key = %self.key, "Ledger reset");
        Ok(())
    }

    async fn write(&self, store: &Store) -> LedgerResult<()> {
        let bytes = snapshot::encode(store)?;
        self.backend.set(&self.key, &bytes).await?;
        debug!(key = %self.key, bytes = bytes.len(), "Ledger persisted");
        Ok(())
    }

    /// Runs `op` against a copy of the store and swaps it in only after the
    /// copy has been written.
    async fn commit<T, F>(&mut self, op: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut Store, &LedgerPolicy) -> CoreResult<T>,
    {
        let mut next = self.store.clone();
        let out = op(&mut next, &self.policy)?;
        self.write(&next).await?;
        self.store = next;
        Ok(out)
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Dashboard using the configured recent-invoice limit.
    pub fn dashboard(&self) -> DashboardSummary {
        self.store.dashboard_summary(self.policy.recent_limit)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub async fn upsert_product(&mut self, input: ProductInput) -> LedgerResult<Product> {
        self.commit(|store, _| Ok(store.upsert_product(input))).await
    }

    pub async fn delete_product(&mut self, id: &str) -> LedgerResult<Product> {
        self.commit(|store, _| store.delete_product(id)).await
    }

    pub async fn record_sale(
        &mut self,
        customer: Option<String>,
        lines: &[LineRequest],
    ) -> LedgerResult<Invoice> {
        self.commit(|store, policy| store.record_sale(customer, lines, policy))
            .await
    }

    pub async fn record_purchase(
        &mut self,
        supplier: Option<String>,
        lines: &[LineRequest],
    ) -> LedgerResult<Purchase> {
        self.commit(|store, policy| store.record_purchase(supplier, lines, policy))
            .await
    }

    pub async fn update_settings(&mut self, business_name: &str, currency: &str) -> LedgerResult<Settings> {
        self.commit(|store, _| Ok(store.update_settings(business_name, currency).clone()))
            .await
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// The whole store as indented JSON, for backups.
    pub fn export_snapshot(&self) -> LedgerResult<Vec<u8>> {
        Ok(snapshot::encode_pretty(&self.store)?)
    }

    /// Replaces the whole store with a backup and persists it.
    ///
    /// Bytes that don't parse fail with `InvalidSnapshot` and leave both the
    /// in-memory store and the stored document untouched.
    pub async fn import_snapshot(&mut self, bytes: &[u8]) -> LedgerResult<()> {
        let imported = snapshot::decode_snapshot(bytes)?;
        self.write(&imported).await?;
        info!(
            products = imported.products().len(),
            invoices = imported.invoices().len(),
            purchases = imported.purchases().len(),
            "Snapshot imported"
        );
        self.store = imported;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
