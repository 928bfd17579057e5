//! SQLite-backed key-value storage (`kv_store` table).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::KvBackend;
use crate::error::DbResult;

/// Key-value backend over the `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteKv {
    pool: SqlitePool,
}

impl SqliteKv {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteKv { pool }
    }

    /// Keys currently stored, alphabetically.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

impl KvBackend for SqliteKv {
    async fn get(&self, key: &str) -> DbResult<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, found = value.is_some(), "kv get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> DbResult<()> {
        // single statement: the row is replaced whole or not at all
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "kv set");
        Ok(())
    }

    async fn clear(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, "kv clear");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn kv() -> SqliteKv {
        Database::new(DbConfig::in_memory()).await.unwrap().kv()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let kv = kv().await;
        assert_eq!(kv.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_whole_value() {
        let kv = kv().await;
        kv.set("doc", b"first version, longer").await.unwrap();
        kv.set("doc", b"second").await.unwrap();

        assert_eq!(kv.get("doc").await.unwrap(), Some(b"second".to_vec()));
        assert_eq!(kv.keys().await.unwrap(), vec!["doc".to_string()]);
    }

    #[tokio::test]
    async fn test_clear() {
        let kv = kv().await;
        kv.set("doc", b"{}").await.unwrap();
        kv.clear("doc").await.unwrap();
        kv.clear("doc").await.unwrap();

        assert_eq!(kv.get("doc").await.unwrap(), None);
    }
}
