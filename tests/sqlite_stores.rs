// tests/sqlite_stores.rs
mod support;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use seo_forge::domain::article::FocusKeyphrase;
use seo_forge::domain::fingerprint::{ContentFingerprint, FingerprintRecord, FingerprintRepository};
use seo_forge::domain::keyphrase::{KeyphraseRecord, KeyphraseRepository};
use seo_forge::infrastructure::database;
use seo_forge::infrastructure::repositories::{
    SqliteFingerprintRepository, SqliteKeyphraseRepository,
};

use support::{
    DraftBuilder, TEST_TIMEOUT, accept_concurrently, deduplicator_with, fixed_now, in_memory_pipeline,
    pipeline_with, registry_with, reserve_concurrently,
};

// Concurrent callers queue on the single in-memory connection.
const CONTENDED_TIMEOUT: Duration = Duration::from_secs(5);

async fn pool() -> Arc<SqlitePool> {
    let pool = database::init_pool("sqlite::memory:").await.unwrap();
    database::run_migrations(&pool).await.unwrap();
    Arc::new(pool)
}

fn fingerprint_record(title: &str, body: &str) -> FingerprintRecord {
    FingerprintRecord {
        title: title.to_string(),
        fingerprint: ContentFingerprint::compute(title, body),
        recorded_at: fixed_now(),
    }
}

#[tokio::test]
async fn keyphrase_reservation_is_atomic_and_case_insensitive() {
    let repo = SqliteKeyphraseRepository::new(pool().await);
    let record = KeyphraseRecord::new(FocusKeyphrase::new("hp laserjet m404n"), "HP", fixed_now());
    let shouted = KeyphraseRecord::new(FocusKeyphrase::new("HP LaserJet M404n"), "HP", fixed_now());

    assert!(repo.try_reserve(&record).await.unwrap());
    assert!(!repo.try_reserve(&shouted).await.unwrap());
    assert!(repo.is_reserved(&FocusKeyphrase::new("hp laserjet m404n")).await.unwrap());
    assert!(!repo.is_reserved(&FocusKeyphrase::new("canon pixma g3111")).await.unwrap());
}

#[tokio::test]
async fn fingerprints_match_on_title_or_digest() {
    let repo = SqliteFingerprintRepository::new(pool().await);
    let record = fingerprint_record("Hp Laserjet M404n: Guia", "corpo do artigo");

    assert!(repo.insert_if_absent(&record).await.unwrap());
    assert!(!repo.insert_if_absent(&record).await.unwrap());

    let same_title = fingerprint_record("Hp Laserjet M404n: Guia", "outro corpo");
    assert!(repo.exists(&same_title.title, &same_title.fingerprint).await.unwrap());
    assert!(!repo.insert_if_absent(&same_title).await.unwrap());

    let unrelated = fingerprint_record("Canon Pixma G3111: Guia", "corpo novo");
    assert!(!repo.exists(&unrelated.title, &unrelated.fingerprint).await.unwrap());
    assert!(repo.exists("outro", &record.fingerprint).await.unwrap());
}

#[tokio::test]
async fn pipeline_runs_on_sqlite_stores() {
    let pool = pool().await;
    let pipeline = pipeline_with(
        Arc::new(SqliteKeyphraseRepository::new(Arc::clone(&pool))),
        Arc::new(SqliteFingerprintRepository::new(pool)),
        TEST_TIMEOUT,
    );
    let draft = DraftBuilder::new("HP LaserJet Pro M404n").build();

    let first = pipeline.process(&draft).await.unwrap();
    let second = pipeline.process(&draft).await.unwrap();

    assert!(first.is_accepted());
    assert_eq!(second.article.focus_keyphrase.as_str(), "hp laserjet m404n 2025");
    assert!(pipeline.deduplicator().is_duplicate(&first.article).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reservations_get_distinct_rows() {
    let repo = Arc::new(SqliteKeyphraseRepository::new(pool().await));
    let registry = Arc::new(registry_with(repo, CONTENDED_TIMEOUT));
    let granted = reserve_concurrently(registry, "canon pixma g3111", 10).await;

    let distinct: HashSet<_> = granted.iter().collect();
    assert_eq!(distinct.len(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_accepts_insert_one_fingerprint() {
    let (article, _) = in_memory_pipeline()
        .transform_and_validate(&DraftBuilder::new("Epson EcoTank L3250").build())
        .await
        .unwrap();
    let repo = Arc::new(SqliteFingerprintRepository::new(pool().await));
    let dedup = Arc::new(deduplicator_with(repo, CONTENDED_TIMEOUT));

    assert_eq!(accept_concurrently(Arc::clone(&dedup), &article, 8).await, 1);
    assert!(dedup.is_duplicate(&article).await.unwrap());
}
