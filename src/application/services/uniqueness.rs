// src/application/services/uniqueness.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::time::Clock;
use crate::domain::article::FocusKeyphrase;
use crate::domain::keyphrase::{KeyphraseRecord, KeyphraseRepository};
use crate::domain::vocabulary::Vocabulary;

const MAX_SUFFIX_ATTEMPTS: u32 = 16;

/// Hands out focus keyphrases so that no two articles share one.
pub struct UniquenessRegistry {
    repo: Arc<dyn KeyphraseRepository>,
    clock: Arc<dyn Clock>,
    vocabulary: Arc<Vocabulary>,
    timeout: Duration,
}

impl UniquenessRegistry {
    pub fn new(
        repo: Arc<dyn KeyphraseRepository>,
        clock: Arc<dyn Clock>,
        vocabulary: Arc<Vocabulary>,
        timeout: Duration,
    ) -> Self {
        Self {
            repo,
            clock,
            vocabulary,
            timeout,
        }
    }

    /// The phrase itself, then the phrase with the current year, then with each qualifier.
    pub fn candidates(&self, phrase: &FocusKeyphrase) -> Vec<FocusKeyphrase> {
        let year = self.clock.current_year().to_string();
        std::iter::once(phrase.clone())
            .chain(
                std::iter::once(year.as_str())
                    .chain(self.vocabulary.qualifiers.iter().map(String::as_str))
                    .map(|suffix| FocusKeyphrase::new(format!("{} {suffix}", phrase.as_str()))),
            )
            .collect()
    }

    /// Reserves `phrase` or the first free variant of it.
    pub async fn reserve(&self, phrase: &FocusKeyphrase, subject: &str) -> ApplicationResult<FocusKeyphrase> {
        for (attempt, candidate) in self.candidates(phrase).into_iter().enumerate() {
            if self.try_reserve(&candidate, subject).await? {
                if attempt > 0 {
                    tracing::warn!(
                        original = %phrase,
                        reserved = %candidate,
                        "keyphrase taken, reserved a qualified variant"
                    );
                } else {
                    tracing::info!(phrase = %candidate, "keyphrase reserved");
                }
                return Ok(candidate);
            }
        }

        let stamp = self.clock.now().format("%m%d%H%M%S").to_string();
        for counter in 0..MAX_SUFFIX_ATTEMPTS {
            let suffix = if counter == 0 {
                stamp.clone()
            } else {
                format!("{stamp}{counter}")
            };
            let candidate = FocusKeyphrase::new(format!("{} {suffix}", phrase.as_str()));
            if self.try_reserve(&candidate, subject).await? {
                tracing::warn!(
                    original = %phrase,
                    reserved = %candidate,
                    "qualifiers exhausted, reserved a time-suffixed keyphrase"
                );
                return Ok(candidate);
            }
        }

        Err(ApplicationError::conflict(format!(
            "no free variant of keyphrase \"{phrase}\""
        )))
    }

    pub async fn is_reserved(&self, phrase: &FocusKeyphrase) -> ApplicationResult<bool> {
        match timeout(self.timeout, self.repo.is_reserved(phrase)).await {
            Ok(result) => result.map_err(|err| ApplicationError::registry_unavailable(err.to_string())),
            Err(_) => Err(self.timed_out()),
        }
    }

    async fn try_reserve(&self, phrase: &FocusKeyphrase, subject: &str) -> ApplicationResult<bool> {
        let record = KeyphraseRecord::new(phrase.clone(), subject, self.clock.now());
        match timeout(self.timeout, self.repo.try_reserve(&record)).await {
            Ok(Ok(reserved)) => Ok(reserved),
            Ok(Err(err)) => {
                tracing::error!(error = %err, phrase = %phrase, "keyphrase registry failed");
                Err(ApplicationError::registry_unavailable(err.to_string()))
            }
            Err(_) => {
                tracing::error!(phrase = %phrase, timeout_ms = self.timeout.as_millis() as u64, "keyphrase registry timed out");
                Err(self.timed_out())
            }
        }
    }

    fn timed_out(&self) -> ApplicationError {
        ApplicationError::registry_unavailable(format!(
            "no answer within {} ms",
            self.timeout.as_millis()
        ))
    }
}
