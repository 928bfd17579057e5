//! # Snapshot Encoding
//!
//! The Store travels as one JSON document, both to the key-value backend
//! and as an exported backup file. The two directions differ only in which
//! error a bad document produces:
//!
//! ```text
//! stored bytes   ──► decode_stored()   ──✗──► CoreError::CorruptState
//! imported bytes ──► decode_snapshot() ──✗──► CoreError::InvalidSnapshot
//! ```
//!
//! Decoding always builds a brand new [`Store`]; callers swap it in only on
//! success, so a failed import never leaves a half-written store behind.

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::store::Store;

/// Compact encoding used for persistence.
pub fn encode(store: &Store) -> CoreResult<Vec<u8>> {
    serde_json::to_vec(store).map_err(|e| CoreError::Encode(e.to_string()))
}

/// Indented encoding used for exported backups.
pub fn encode_pretty(store: &Store) -> CoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(store).map_err(|e| CoreError::Encode(e.to_string()))
}

/// Decodes a document read back from the persistence backend.
pub fn decode_stored(bytes: &[u8]) -> CoreResult<Store> {
    decode(bytes).map_err(CoreError::CorruptState)
}

/// Decodes a user-supplied backup.
pub fn decode_snapshot(bytes: &[u8]) -> CoreResult<Store> {
    decode(bytes).map_err(CoreError::InvalidSnapshot)
}

fn decode(bytes: &[u8]) -> Result<Store, String> {
    let mut store: Store = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    store.normalize();
    debug!(
        products = store.products().len(),
        invoices = store.invoices().len(),
        purchases = store.purchases().len(),
        "Decoded store document"
    );
    Ok(store)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LedgerPolicy;
    use crate::store::LineRequest;

    fn populated() -> Store {
        let mut store = Store::seeded();
        let id = store.products()[0].id.clone();
        store
            .record_sale(Some("Asha".into()), &[LineRequest::new(&id, 3)], &LedgerPolicy::default())
            .unwrap();
        store
            .record_purchase(None, &[LineRequest::new(&id, 20)], &LedgerPolicy::default())
            .unwrap();
        store.update_settings("Green Cross", "$");
        store
    }

    #[test]
    fn test_export_then_import_is_identity() {
        let store = populated();
        let bytes = encode_pretty(&store).unwrap();
        assert_eq!(decode_snapshot(&bytes).unwrap(), store);

        let compact = encode(&store).unwrap();
        assert_eq!(decode_stored(&compact).unwrap(), store);
    }

    #[test]
    fn test_document_has_exactly_four_fields() {
        let bytes = encode(&Store::seeded()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();

        assert_eq!(keys, ["invoices", "products", "purchases", "settings"]);
    }

    #[test]
    fn test_bad_bytes_map_to_the_right_error() {
        assert!(matches!(
            decode_snapshot(b"not json"),
            Err(CoreError::InvalidSnapshot(_))
        ));
        assert!(matches!(
            decode_stored(b"{\"products\": []}"),
            Err(CoreError::CorruptState(_))
        ));
    }

    #[test]
    fn test_negative_stock_is_clamped_on_load() {
        let json = r#"{
            "products": [{"id":"p1","sku":"X","name":"X","price":100,"cost":50,"stock":-4,"low":5}],
            "invoices": [],
            "purchases": [],
            "settings": {"business_name":"X","currency":"$"}
        }"#;

        let store = decode_snapshot(json.as_bytes()).unwrap();
        assert_eq!(store.products()[0].stock, 0);
    }
}
