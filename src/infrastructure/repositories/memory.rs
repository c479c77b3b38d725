// src/infrastructure/repositories/memory.rs
//! Process-local stores used when no database is configured.
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::article::FocusKeyphrase;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::fingerprint::{ContentFingerprint, FingerprintRecord, FingerprintRepository};
use crate::domain::keyphrase::{KeyphraseRecord, KeyphraseRepository};

fn lock<T>(mutex: &Mutex<T>) -> DomainResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
}

#[derive(Default)]
pub struct InMemoryKeyphraseRepository {
    keys: Mutex<HashSet<String>>,
}

impl InMemoryKeyphraseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyphraseRepository for InMemoryKeyphraseRepository {
    async fn try_reserve(&self, record: &KeyphraseRecord) -> DomainResult<bool> {
        Ok(lock(&self.keys)?.insert(record.key()))
    }

    async fn is_reserved(&self, phrase: &FocusKeyphrase) -> DomainResult<bool> {
        Ok(lock(&self.keys)?.contains(&phrase.as_str().to_lowercase()))
    }
}

#[derive(Default)]
struct FingerprintSets {
    titles: HashSet<String>,
    fingerprints: HashSet<String>,
}

#[derive(Default)]
pub struct InMemoryFingerprintRepository {
    sets: Mutex<FingerprintSets>,
}

impl InMemoryFingerprintRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FingerprintRepository for InMemoryFingerprintRepository {
    async fn exists(&self, title: &str, fingerprint: &ContentFingerprint) -> DomainResult<bool> {
        let sets = lock(&self.sets)?;
        Ok(sets.titles.contains(title) || sets.fingerprints.contains(fingerprint.as_str()))
    }

    async fn insert_if_absent(&self, record: &FingerprintRecord) -> DomainResult<bool> {
        let mut sets = lock(&self.sets)?;
        if sets.titles.contains(&record.title) || sets.fingerprints.contains(record.fingerprint.as_str()) {
            return Ok(false);
        }
        sets.titles.insert(record.title.clone());
        sets.fingerprints.insert(record.fingerprint.as_str().to_string());
        Ok(true)
    }
}
