// src/infrastructure/repositories/sqlite_keyphrase.rs
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::error::map_sqlx;
use crate::domain::article::FocusKeyphrase;
use crate::domain::errors::DomainResult;
use crate::domain::keyphrase::{KeyphraseRecord, KeyphraseRepository};

#[derive(Clone)]
pub struct SqliteKeyphraseRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteKeyphraseRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyphraseRepository for SqliteKeyphraseRepository {
    async fn try_reserve(&self, record: &KeyphraseRecord) -> DomainResult<bool> {
        let result = sqlx::query(
            "INSERT INTO keyphrases (phrase_key, phrase, subject, reserved_at) VALUES (?, ?, ?, ?) ON CONFLICT(phrase_key) DO NOTHING",
        )
        .bind(record.key())
        .bind(record.phrase.as_str())
        .bind(&record.subject)
        .bind(record.reserved_at)
        .execute(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected() == 1)
    }

    async fn is_reserved(&self, phrase: &FocusKeyphrase) -> DomainResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM keyphrases WHERE phrase_key = ? LIMIT 1")
            .bind(phrase.as_str().to_lowercase())
            .fetch_optional(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(found.is_some())
    }
}
