// tests/support/helpers.rs
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use tokio::task::JoinSet;

use super::mocks::FixedClock;
use seo_forge::application::ports::time::Clock;
use seo_forge::application::services::{ArticlePipeline, ContentDeduplicator, UniquenessRegistry};
use seo_forge::application::transform::ContentTransformer;
use seo_forge::domain::article::{Article, FocusKeyphrase};
use seo_forge::domain::fingerprint::FingerprintRepository;
use seo_forge::domain::grammar::NounGenderTable;
use seo_forge::domain::keyphrase::KeyphraseRepository;
use seo_forge::domain::rules::Thresholds;
use seo_forge::domain::selection::SelectionStrategy;
use seo_forge::domain::vocabulary::Vocabulary;
use seo_forge::infrastructure::repositories::{
    InMemoryFingerprintRepository, InMemoryKeyphraseRepository,
};
use seo_forge::infrastructure::util::DefaultSlugGenerator;
use seo_forge::telemetry::init_tracing;

pub const TEST_TIMEOUT: Duration = Duration::from_millis(200);

/// Installs the fmt subscriber once per test binary, only when `RUST_LOG` is set.
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var_os("RUST_LOG").is_some() {
        init_tracing();
    }
});

pub fn vocabulary() -> Arc<Vocabulary> {
    Arc::new(Vocabulary::pt_br())
}

pub fn registry_with(repo: Arc<dyn KeyphraseRepository>, timeout: Duration) -> UniquenessRegistry {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);
    UniquenessRegistry::new(repo, clock, vocabulary(), timeout)
}

pub fn deduplicator_with(repo: Arc<dyn FingerprintRepository>, timeout: Duration) -> ContentDeduplicator {
    ContentDeduplicator::new(repo, Arc::new(FixedClock), timeout)
}

pub fn pipeline_with(
    keyphrases: Arc<dyn KeyphraseRepository>,
    fingerprints: Arc<dyn FingerprintRepository>,
    timeout: Duration,
) -> Arc<ArticlePipeline> {
    Lazy::force(&TRACING);
    Arc::new(ArticlePipeline::new(
        vocabulary(),
        Thresholds::default(),
        SelectionStrategy::RoundRobin,
        registry_with(keyphrases, timeout),
        deduplicator_with(fingerprints, timeout),
        ContentTransformer::standard(),
        Arc::new(DefaultSlugGenerator),
        Arc::new(NounGenderTable::pt_br()),
    ))
}

pub fn in_memory_pipeline() -> Arc<ArticlePipeline> {
    pipeline_with(
        Arc::new(InMemoryKeyphraseRepository::new()),
        Arc::new(InMemoryFingerprintRepository::new()),
        TEST_TIMEOUT,
    )
}

/// Reserves `phrase` from `tasks` tasks at once and returns every granted keyphrase.
pub async fn reserve_concurrently(
    registry: Arc<UniquenessRegistry>,
    phrase: &str,
    tasks: usize,
) -> Vec<FocusKeyphrase> {
    let mut set = JoinSet::new();
    for _ in 0..tasks {
        let registry = Arc::clone(&registry);
        let phrase = FocusKeyphrase::new(phrase);
        set.spawn(async move { registry.reserve(&phrase, "HP").await });
    }
    let mut granted = Vec::with_capacity(tasks);
    while let Some(joined) = set.join_next().await {
        granted.push(joined.unwrap().unwrap());
    }
    granted
}

/// Accepts the same article from `tasks` tasks at once and counts the acceptances.
pub async fn accept_concurrently(dedup: Arc<ContentDeduplicator>, article: &Article, tasks: usize) -> usize {
    let mut set = JoinSet::new();
    for _ in 0..tasks {
        let dedup = Arc::clone(&dedup);
        let article = article.clone();
        set.spawn(async move { dedup.accept(&article).await });
    }
    let mut accepted = 0;
    while let Some(joined) = set.join_next().await {
        if joined.unwrap().unwrap() {
            accepted += 1;
        }
    }
    accepted
}
