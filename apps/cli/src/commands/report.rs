//! Read-only views: dashboard, ledger, invoice search and text reports.

use shubago_core::{render_sales_report, render_stock_report};
use shubago_db::{Ledger, SqliteKv};

pub fn dashboard(ledger: &Ledger<SqliteKv>) {
    let store = ledger.store();
    let settings = store.settings();
    let summary = ledger.dashboard();

    println!("{}", settings.business_name);
    println!("  Sales (lifetime)  {}", settings.format_money(summary.total_sales));
    println!("  Stock value       {}", settings.format_money(summary.stock_value));
    println!("  Low stock items   {}", summary.low_stock_count);

    if summary.recent_invoices.is_empty() {
        println!("  No invoices yet");
        return;
    }

    println!("  Recent invoices");
    for invoice in &summary.recent_invoices {
        println!(
            "    {} • {} • {}",
            invoice.reference(),
            invoice.customer_label(),
            settings.format_money(invoice.total)
        );
    }
}

pub fn ledger(ledger: &Ledger<SqliteKv>) {
    let store = ledger.store();
    for entry in store.ledger() {
        println!("{}", entry.render(store.settings()));
    }
}

pub fn invoices(ledger: &Ledger<SqliteKv>, query: &str) {
    let store = ledger.store();
    for invoice in store.find_invoices(query) {
        println!(
            "{} • {} • {} • {} items",
            invoice.reference(),
            invoice.created_at.format("%Y-%m-%d %H:%M"),
            invoice.customer_label(),
            invoice.items.len()
        );
    }
}

pub fn sales(ledger: &Ledger<SqliteKv>) {
    let store = ledger.store();
    println!("{}", render_sales_report(&store.sales_report(), store.settings()));
}

pub fn stock(ledger: &Ledger<SqliteKv>) {
    let store = ledger.store();
    println!("{}", render_stock_report(&store.stock_report(), store.settings()));
}
