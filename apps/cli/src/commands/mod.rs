//! Command implementations. Each one calls into the ledger and prints the
//! result; no ledger rules live here.

use std::path::PathBuf;

use shubago_db::{Database, Ledger, LedgerConfig, LedgerResult, SqliteKv};
use tracing::warn;

pub mod data;
pub mod product;
pub mod report;
pub mod trade;

/// Loads config, connects, and opens the ledger, recovering from a corrupt
/// document instead of refusing to start.
pub async fn open_ledger(config_path: Option<PathBuf>) -> LedgerResult<Ledger<SqliteKv>> {
    let config = LedgerConfig::load(config_path)?;
    let db = Database::new(config.db_config()).await?;

    let (ledger, condition) =
        Ledger::open_or_recover(db.kv(), config.store_key.clone(), config.policy()).await?;

    if let Some(err) = condition {
        warn!(error = %err, "Ledger recovered from a corrupt document");
        eprintln!(
            "warning: {err}. Started a fresh ledger; the unreadable data was kept under '{}{}'.",
            config.store_key,
            shubago_db::ledger::CORRUPT_BACKUP_SUFFIX
        );
    }

    Ok(ledger)
}
