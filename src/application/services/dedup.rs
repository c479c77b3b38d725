// src/application/services/dedup.rs
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::time::Clock;
use crate::domain::article::Article;
use crate::domain::errors::DomainResult;
use crate::domain::fingerprint::{ContentFingerprint, FingerprintRecord, FingerprintRepository};

/// Rejects articles whose title or content fingerprint was already accepted.
pub struct ContentDeduplicator {
    repo: Arc<dyn FingerprintRepository>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl ContentDeduplicator {
    pub fn new(repo: Arc<dyn FingerprintRepository>, clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            repo,
            clock,
            timeout,
        }
    }

    pub fn fingerprint(&self, article: &Article) -> ContentFingerprint {
        ContentFingerprint::of(article)
    }

    /// Read-only check; does not record anything.
    pub async fn is_duplicate(&self, article: &Article) -> ApplicationResult<bool> {
        let fingerprint = self.fingerprint(article);
        self.bounded(self.repo.exists(&article.title, &fingerprint)).await
    }

    /// Records the article unless it duplicates a known one. Returns `true` when
    /// the article was new. Check and insert happen in one store operation.
    pub async fn accept(&self, article: &Article) -> ApplicationResult<bool> {
        let record = FingerprintRecord::for_article(article, self.clock.now());
        let inserted = self.bounded(self.repo.insert_if_absent(&record)).await?;
        if inserted {
            tracing::info!(title = %article.title, fingerprint = %record.fingerprint, "fingerprint recorded");
        } else {
            tracing::warn!(title = %article.title, "duplicate article rejected");
        }
        Ok(inserted)
    }

    async fn bounded<T>(&self, call: impl Future<Output = DomainResult<T>>) -> ApplicationResult<T> {
        match timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                tracing::error!(error = %err, "fingerprint store failed");
                Err(ApplicationError::store_unavailable(err.to_string()))
            }
            Err(_) => {
                tracing::error!(timeout_ms = self.timeout.as_millis() as u64, "fingerprint store timed out");
                Err(ApplicationError::store_unavailable(format!(
                    "no answer within {} ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}
