// src/domain/keyphrase/mod.rs
pub mod extractor;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::article::FocusKeyphrase;
use crate::domain::errors::DomainResult;

pub use extractor::KeyphraseExtractor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyphraseRecord {
    pub phrase: FocusKeyphrase,
    pub subject: String,
    pub reserved_at: DateTime<Utc>,
}

impl KeyphraseRecord {
    pub fn new(phrase: FocusKeyphrase, subject: impl Into<String>, reserved_at: DateTime<Utc>) -> Self {
        Self {
            phrase,
            subject: subject.into(),
            reserved_at,
        }
    }

    /// Case-insensitive lookup key.
    pub fn key(&self) -> String {
        self.phrase.as_str().to_lowercase()
    }
}

#[async_trait]
pub trait KeyphraseRepository: Send + Sync {
    /// Stores the record unless its phrase is already taken, as one atomic step.
    /// Returns `true` when this call made the reservation.
    async fn try_reserve(&self, record: &KeyphraseRecord) -> DomainResult<bool>;
    async fn is_reserved(&self, phrase: &FocusKeyphrase) -> DomainResult<bool>;
}
