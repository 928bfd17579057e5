//! `shubago product add|list|delete`

use shubago_core::{Product, ProductInput, Settings};
use shubago_db::{Ledger, LedgerResult, SqliteKv};

pub async fn add(ledger: &mut Ledger<SqliteKv>, input: ProductInput) -> LedgerResult<()> {
    let product = ledger.upsert_product(input).await?;
    println!("Saved {}", describe(&product, ledger.store().settings()));
    println!("  id: {}", product.id);
    Ok(())
}

pub fn list(ledger: &Ledger<SqliteKv>, query: &str) {
    let store = ledger.store();
    let matches = store.find_products(query);

    if matches.is_empty() {
        println!("No products match '{}'", query);
        return;
    }

    for product in matches {
        let flag = if product.is_low_stock() { "  LOW" } else { "" };
        println!("{}{}", describe(product, store.settings()), flag);
        println!("  id: {}", product.id);
    }
}

pub async fn delete(ledger: &mut Ledger<SqliteKv>, id: &str) -> LedgerResult<()> {
    let removed = ledger.delete_product(id).await?;
    println!("Deleted {} ({})", removed.name, removed.sku);
    Ok(())
}

/// `PARA500  Paracetamol 500mg  ₹25.00  stock 50`
fn describe(product: &Product, settings: &Settings) -> String {
    format!(
        "{}  {}  {}  stock {}",
        product.sku,
        product.name,
        settings.format_money(product.price),
        product.stock
    )
}
