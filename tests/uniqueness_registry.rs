// tests/uniqueness_registry.rs
mod support;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use seo_forge::application::ApplicationError;
use seo_forge::domain::article::FocusKeyphrase;
use seo_forge::infrastructure::repositories::InMemoryKeyphraseRepository;

use support::{
    FailingKeyphraseRepo, SlowKeyphraseRepo, TEST_TIMEOUT, registry_with, reserve_concurrently,
};

#[tokio::test]
async fn taken_phrase_falls_back_to_year_then_qualifier() {
    let registry = registry_with(Arc::new(InMemoryKeyphraseRepository::new()), TEST_TIMEOUT);
    let phrase = FocusKeyphrase::new("hp laserjet m404n");

    let first = registry.reserve(&phrase, "HP LaserJet Pro M404n").await.unwrap();
    let second = registry.reserve(&phrase, "HP LaserJet Pro M404n").await.unwrap();
    let third = registry.reserve(&phrase, "HP LaserJet Pro M404n").await.unwrap();

    assert_eq!(first.as_str(), "hp laserjet m404n");
    assert_eq!(second.as_str(), "hp laserjet m404n 2025");
    assert_eq!(third.as_str(), "hp laserjet m404n nova");
    for reserved in [&first, &second, &third] {
        assert!(registry.is_reserved(reserved).await.unwrap());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reservations_never_share_a_phrase() {
    let registry = Arc::new(registry_with(Arc::new(InMemoryKeyphraseRepository::new()), TEST_TIMEOUT));
    let granted = reserve_concurrently(registry, "hp laserjet m404n", 12).await;

    let distinct: HashSet<_> = granted.iter().collect();
    assert_eq!(granted.len(), 12);
    assert_eq!(distinct.len(), 12);
    assert!(granted.contains(&FocusKeyphrase::new("hp laserjet m404n")));
}

#[tokio::test]
async fn reservation_ignores_case() {
    let registry = registry_with(Arc::new(InMemoryKeyphraseRepository::new()), TEST_TIMEOUT);
    registry
        .reserve(&FocusKeyphrase::new("canon pixma g3111"), "Canon")
        .await
        .unwrap();
    assert!(
        registry
            .is_reserved(&FocusKeyphrase::new("Canon PIXMA G3111"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn exhausted_qualifiers_use_a_time_suffix() {
    let registry = registry_with(Arc::new(InMemoryKeyphraseRepository::new()), TEST_TIMEOUT);
    let phrase = FocusKeyphrase::new("hp laserjet m404n");
    let candidates = registry.candidates(&phrase).len();

    for _ in 0..candidates {
        registry.reserve(&phrase, "HP").await.unwrap();
    }
    let stamped = registry.reserve(&phrase, "HP").await.unwrap();
    assert_eq!(stamped.as_str(), "hp laserjet m404n 0601120000");
}

#[tokio::test]
async fn failing_store_reports_registry_unavailable() {
    let registry = registry_with(Arc::new(FailingKeyphraseRepo), TEST_TIMEOUT);
    let err = registry
        .reserve(&FocusKeyphrase::new("hp laserjet m404n"), "HP")
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::RegistryUnavailable(_)), "{err:?}");
    assert!(err.is_infrastructure());
}

#[tokio::test(start_paused = true)]
async fn slow_store_times_out() {
    let registry = registry_with(
        Arc::new(SlowKeyphraseRepo {
            delay: Duration::from_secs(30),
        }),
        Duration::from_millis(50),
    );
    let err = registry
        .reserve(&FocusKeyphrase::new("hp laserjet m404n"), "HP")
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::RegistryUnavailable(_)), "{err:?}");
}
