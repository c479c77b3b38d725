// src/domain/fingerprint/mod.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::domain::article::Article;
use crate::domain::errors::DomainResult;

const BODY_PREFIX_CHARS: usize = 200;

/// blake3 digest of a title and the first 200 characters of the stripped body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContentFingerprint(String);

impl ContentFingerprint {
    pub fn compute(title: &str, plain_body: &str) -> Self {
        let prefix: String = plain_body.chars().take(BODY_PREFIX_CHARS).collect();
        let mut hasher = blake3::Hasher::new();
        hasher.update(title.as_bytes());
        hasher.update(b"\0");
        hasher.update(prefix.as_bytes());
        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn of(article: &Article) -> Self {
        Self::compute(&article.title, &article.plain_body())
    }

    pub fn from_hex(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintRecord {
    pub title: String,
    pub fingerprint: ContentFingerprint,
    pub recorded_at: DateTime<Utc>,
}

impl FingerprintRecord {
    pub fn for_article(article: &Article, recorded_at: DateTime<Utc>) -> Self {
        Self {
            title: article.title.clone(),
            fingerprint: ContentFingerprint::of(article),
            recorded_at,
        }
    }
}

#[async_trait]
pub trait FingerprintRepository: Send + Sync {
    /// `true` if the exact title or the fingerprint is already recorded.
    async fn exists(&self, title: &str, fingerprint: &ContentFingerprint) -> DomainResult<bool>;
    /// Records the entry unless its title or fingerprint is known, as one atomic step.
    /// Returns `true` when this call inserted it.
    async fn insert_if_absent(&self, record: &FingerprintRecord) -> DomainResult<bool>;
}
