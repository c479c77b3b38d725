// tests/support/mocks/repos.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use seo_forge::domain::article::FocusKeyphrase;
use seo_forge::domain::errors::{DomainError, DomainResult};
use seo_forge::domain::fingerprint::{ContentFingerprint, FingerprintRecord, FingerprintRepository};
use seo_forge::domain::keyphrase::{KeyphraseRecord, KeyphraseRepository};
use seo_forge::infrastructure::repositories::InMemoryKeyphraseRepository;

fn outage() -> DomainError {
    DomainError::Persistence("connection refused".into())
}

/* -------------------------------- failing -------------------------------- */

pub struct FailingKeyphraseRepo;

#[async_trait]
impl KeyphraseRepository for FailingKeyphraseRepo {
    async fn try_reserve(&self, _record: &KeyphraseRecord) -> DomainResult<bool> {
        Err(outage())
    }

    async fn is_reserved(&self, _phrase: &FocusKeyphrase) -> DomainResult<bool> {
        Err(outage())
    }
}

pub struct FailingFingerprintRepo;

#[async_trait]
impl FingerprintRepository for FailingFingerprintRepo {
    async fn exists(&self, _title: &str, _fingerprint: &ContentFingerprint) -> DomainResult<bool> {
        Err(outage())
    }

    async fn insert_if_absent(&self, _record: &FingerprintRecord) -> DomainResult<bool> {
        Err(outage())
    }
}

/* -------------------------------- slow -------------------------------- */

/// Sleeps for `delay` before answering, so callers with a shorter timeout give up.
pub struct SlowKeyphraseRepo {
    pub delay: Duration,
}

#[async_trait]
impl KeyphraseRepository for SlowKeyphraseRepo {
    async fn try_reserve(&self, _record: &KeyphraseRecord) -> DomainResult<bool> {
        tokio::time::sleep(self.delay).await;
        Ok(true)
    }

    async fn is_reserved(&self, _phrase: &FocusKeyphrase) -> DomainResult<bool> {
        tokio::time::sleep(self.delay).await;
        Ok(false)
    }
}

pub struct SlowFingerprintRepo {
    pub delay: Duration,
}

#[async_trait]
impl FingerprintRepository for SlowFingerprintRepo {
    async fn exists(&self, _title: &str, _fingerprint: &ContentFingerprint) -> DomainResult<bool> {
        tokio::time::sleep(self.delay).await;
        Ok(false)
    }

    async fn insert_if_absent(&self, _record: &FingerprintRecord) -> DomainResult<bool> {
        tokio::time::sleep(self.delay).await;
        Ok(true)
    }
}

/* -------------------------------- flaky -------------------------------- */

/// Serves `healthy_calls` reservations from memory, then fails every call.
pub struct FlakyKeyphraseRepo {
    inner: InMemoryKeyphraseRepository,
    remaining: AtomicUsize,
}

impl FlakyKeyphraseRepo {
    pub fn new(healthy_calls: usize) -> Self {
        Self {
            inner: InMemoryKeyphraseRepository::new(),
            remaining: AtomicUsize::new(healthy_calls),
        }
    }

    fn take_call(&self) -> DomainResult<()> {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .map(|_| ())
            .map_err(|_| outage())
    }
}

#[async_trait]
impl KeyphraseRepository for FlakyKeyphraseRepo {
    async fn try_reserve(&self, record: &KeyphraseRecord) -> DomainResult<bool> {
        self.take_call()?;
        self.inner.try_reserve(record).await
    }

    async fn is_reserved(&self, phrase: &FocusKeyphrase) -> DomainResult<bool> {
        self.inner.is_reserved(phrase).await
    }
}
