// src/infrastructure/repositories/sqlite_fingerprint.rs
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::error::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::fingerprint::{ContentFingerprint, FingerprintRecord, FingerprintRepository};

#[derive(Clone)]
pub struct SqliteFingerprintRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteFingerprintRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FingerprintRepository for SqliteFingerprintRepository {
    async fn exists(&self, title: &str, fingerprint: &ContentFingerprint) -> DomainResult<bool> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM content_fingerprints WHERE title = ? OR fingerprint = ? LIMIT 1",
        )
        .bind(title)
        .bind(fingerprint.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(found.is_some())
    }

    async fn insert_if_absent(&self, record: &FingerprintRecord) -> DomainResult<bool> {
        // Both columns are UNIQUE, so a clash on either one inserts nothing.
        let result = sqlx::query(
            "INSERT INTO content_fingerprints (title, fingerprint, recorded_at) VALUES (?, ?, ?) ON CONFLICT DO NOTHING",
        )
        .bind(&record.title)
        .bind(record.fingerprint.as_str())
        .bind(record.recorded_at)
        .execute(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected() == 1)
    }
}
