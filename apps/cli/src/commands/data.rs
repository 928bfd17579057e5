//! `shubago init|settings|export|import`

use std::path::Path;

use shubago_db::{Ledger, LedgerResult, SqliteKv};
use tracing::info;

pub async fn init(ledger: &mut Ledger<SqliteKv>, reset: bool) -> LedgerResult<()> {
    if reset {
        ledger.reset().await?;
        println!("Ledger reset.");
    }

    let store = ledger.store();
    println!(
        "Ledger '{}' ready: {} products, {} invoices, {} purchases",
        ledger.key(),
        store.products().len(),
        store.invoices().len(),
        store.purchases().len()
    );
    Ok(())
}

pub async fn settings(
    ledger: &mut Ledger<SqliteKv>,
    name: Option<String>,
    currency: Option<String>,
) -> LedgerResult<()> {
    if name.is_some() || currency.is_some() {
        let current = ledger.store().settings().clone();
        let name = name.unwrap_or(current.business_name);
        let currency = currency.unwrap_or(current.currency);
        ledger.update_settings(&name, &currency).await?;
    }

    let settings = ledger.store().settings();
    println!("Business: {}", settings.business_name);
    println!("Currency: {}", settings.currency);
    Ok(())
}

pub fn export(ledger: &Ledger<SqliteKv>, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = ledger.export_snapshot()?;
    std::fs::write(file, &bytes)?;
    info!(path = %file.display(), bytes = bytes.len(), "Snapshot exported");
    println!("Exported to {}", file.display());
    Ok(())
}

pub async fn import(
    ledger: &mut Ledger<SqliteKv>,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(file)?;
    ledger.import_snapshot(&bytes).await?;

    let store = ledger.store();
    println!(
        "Imported {}: {} products, {} invoices, {} purchases",
        file.display(),
        store.products().len(),
        store.invoices().len(),
        store.purchases().len()
    );
    Ok(())
}
