//! `shubago sale` and `shubago purchase`

use shubago_core::LineRequest;
use shubago_db::{Ledger, LedgerResult, SqliteKv};

/// Parses a `PRODUCT_ID:QTY` argument. The id may itself contain colons;
/// the quantity is whatever follows the last one.
pub fn parse_line(raw: &str) -> Result<LineRequest, String> {
    let (id, qty) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected PRODUCT_ID:QTY, got '{}'", raw))?;

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing product id in '{}'", raw));
    }

    let qty: i64 = qty
        .trim()
        .parse()
        .map_err(|_| format!("quantity must be a whole number in '{}'", raw))?;

    Ok(LineRequest::new(id, qty))
}

pub async fn sale(
    ledger: &mut Ledger<SqliteKv>,
    customer: Option<String>,
    lines: &[LineRequest],
) -> LedgerResult<()> {
    let invoice = ledger.record_sale(customer, lines).await?;
    let settings = ledger.store().settings();

    println!("{} • {}", invoice.reference(), invoice.customer_label());
    for item in &invoice.items {
        println!(
            "  {} x{} @ {} = {}",
            item.name,
            item.qty,
            settings.format_money(item.price),
            settings.format_money(item.line_total())
        );
    }
    println!("  subtotal {}", settings.format_money(invoice.subtotal));
    println!(
        "  tax ({}%) {}",
        ledger.policy().tax_rate.percentage(),
        settings.format_money(invoice.tax)
    );
    println!("  total {}", settings.format_money(invoice.total));

    if invoice.items.len() < lines.len() {
        println!(
            "  note: {} line(s) skipped for unknown products",
            lines.len() - invoice.items.len()
        );
    }
    Ok(())
}

pub async fn purchase(
    ledger: &mut Ledger<SqliteKv>,
    supplier: Option<String>,
    lines: &[LineRequest],
) -> LedgerResult<()> {
    let purchase = ledger.record_purchase(supplier, lines).await?;

    println!("{} • {}", purchase.reference(), purchase.supplier_label());
    for item in &purchase.items {
        let stock = ledger
            .store()
            .product(&item.product_id)
            .map(|p| p.stock)
            .unwrap_or_default();
        println!("  {} +{} (now {})", item.name, item.qty, stock);
    }

    if purchase.items.len() < lines.len() {
        println!(
            "  note: {} line(s) skipped for unknown products",
            lines.len() - purchase.items.len()
        );
    }
    Ok(())
}
