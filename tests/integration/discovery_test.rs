// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{words_config, ScriptedProbeClient};
use dirhound::config::discovery::DiscoveryConfig;
use dirhound::domain::models::baseline::{Baseline, BaselineMode};
use dirhound::domain::models::entity::EntityType;
use dirhound::domain::repositories::entity_repository::EntityRepository;
use dirhound::domain::services::discovery_service::DiscoveryService;
use dirhound::infrastructure::repositories::memory_entity_repo::InMemoryEntityRepository;
use dirhound::utils::errors::DiscoveryError;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn service(
    client: ScriptedProbeClient,
) -> (
    DiscoveryService<ScriptedProbeClient, InMemoryEntityRepository>,
    Arc<ScriptedProbeClient>,
    Arc<InMemoryEntityRepository>,
) {
    let client = Arc::new(client);
    let store = Arc::new(InMemoryEntityRepository::new());
    (
        DiscoveryService::new(client.clone(), store.clone()),
        client,
        store,
    )
}

#[tokio::test]
async fn test_status_baseline_emits_confirmed_page() {
    let (service, _, store) = service(
        ScriptedProbeClient::new()
            .fallback(404, "")
            .respond("http://x.test/admin", 200, "Admin Panel"),
    );

    let report = service
        .run(
            "http://x.test",
            &words_config(&["admin", "login"]),
            &CancellationToken::new(),
        )
        .await;

    assert!(report.is_success());
    assert_eq!(report.baseline.as_ref().map(Baseline::mode), Some(BaselineMode::StatusBased));
    assert_eq!(report.stats.probed, 2);
    assert_eq!(report.stats.absent, 1);
    assert_eq!(report.entities.len(), 1);

    let admin = store
        .find(EntityType::Uri, "http://x.test/admin")
        .await
        .unwrap()
        .expect("admin page should be stored");
    assert_eq!(admin.attributes["response_code"], "200");
    assert_eq!(admin.attributes["uri"], "http://x.test/admin");
    assert_eq!(admin.attributes["kind"], "confirmed");
}

#[tokio::test]
async fn test_content_baseline_separates_soft_404s() {
    let (service, _, store) = service(
        ScriptedProbeClient::new()
            .fallback(200, "Not Found Page...")
            .respond("http://x.test/secrets", 200, "Not Found Page...")
            .respond("http://x.test/dashboard", 200, "Welcome to the dashboard"),
    );

    let report = service
        .run(
            "http://x.test/",
            &words_config(&["secrets", "dashboard"]),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(report.baseline.as_ref().map(Baseline::mode), Some(BaselineMode::ContentBased));
    assert_eq!(report.stats.absent, 1);
    assert!(!store.exists(EntityType::Uri, "http://x.test/secrets").await.unwrap());

    let dashboard = store
        .find(EntityType::Uri, "http://x.test/dashboard")
        .await
        .unwrap()
        .expect("dashboard should be stored");
    assert_eq!(dashboard.attributes["kind"], "newContent");
    assert_eq!(dashboard.attributes["content"], "Welcome to the dashboard");
}

#[tokio::test]
async fn test_empty_page_on_soft_404_host_is_new_content() {
    let (service, _, store) = service(
        ScriptedProbeClient::new()
            .fallback(200, "Not Found Page...")
            .respond("http://x.test/api/health", 200, ""),
    );

    let report = service
        .run(
            "http://x.test",
            &words_config(&["api/health"]),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(report.stats.exists, 1);
    assert_eq!(report.entities.len(), 1);
    let health = store
        .find(EntityType::Uri, "http://x.test/api/health")
        .await
        .unwrap()
        .expect("empty page should be stored");
    assert_eq!(health.attributes["kind"], "newContent");
    assert_eq!(health.attributes["content"], "");
}

#[tokio::test]
async fn test_calibration_failure_aborts_without_probing() {
    let (service, client, store) = service(ScriptedProbeClient::new());

    let report = service
        .run(
            "http://x.test",
            &words_config(&["admin", "login"]),
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(
        report.error,
        Some(DiscoveryError::CalibrationFailed { .. })
    ));
    assert!(report.entities.is_empty());
    assert!(report.baseline.is_none());
    assert_eq!(report.stats.probed, 0);
    assert_eq!(client.calls().len(), 1);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_probe_failure_does_not_stop_the_loop() {
    let words: Vec<String> = (1..=10).map(|i| format!("w{}", i)).collect();
    let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();

    let (service, client, store) = service(
        ScriptedProbeClient::new()
            .fallback(404, "")
            .fail("http://x.test/w5")
            .respond("http://x.test/w7", 200, "found"),
    );

    let report = service
        .run("http://x.test", &words_config(&word_refs), &CancellationToken::new())
        .await;

    assert!(report.is_success());
    assert_eq!(report.stats.probed, 10);
    assert_eq!(report.stats.failed, 1);
    for word in &words[5..] {
        assert!(client.was_probed(&format!("http://x.test/{}", word)));
    }
    assert!(store.exists(EntityType::Uri, "http://x.test/w7").await.unwrap());
    assert!(matches!(
        report.warnings.as_slice(),
        [DiscoveryError::ProbeFailed { uri, .. }] if uri == "http://x.test/w5"
    ));
}

#[tokio::test]
async fn test_unrecognized_status_is_flagged() {
    let (service, _, store) = service(
        ScriptedProbeClient::new()
            .fallback(404, "")
            .respond("http://x.test/old", 302, ""),
    );

    let report = service
        .run("http://x.test", &words_config(&["old"]), &CancellationToken::new())
        .await;

    assert_eq!(
        report.warnings,
        vec![DiscoveryError::UnrecognizedStatus {
            uri: "http://x.test/old".to_string(),
            status: 302
        }]
    );
    let old = store
        .find(EntityType::Uri, "http://x.test/old")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(old.attributes["flagged"], true);
    assert_eq!(old.attributes["kind"], "unknown");
}

#[tokio::test]
async fn test_cancellation_stops_new_candidates() {
    let cancel = CancellationToken::new();
    let (service, client, _) = service(
        ScriptedProbeClient::new()
            .fallback(404, "")
            .cancel_on("http://x.test/c3", cancel.clone()),
    );

    let report = service
        .run(
            "http://x.test",
            &words_config(&["c1", "c2", "c3", "c4", "c5"]),
            &cancel,
        )
        .await;

    assert!(report.cancelled);
    assert_eq!(report.stats.probed, 3);
    assert!(client.was_probed("http://x.test/c3"));
    assert!(!client.was_probed("http://x.test/c4"));
    assert!(!client.was_probed("http://x.test/c5"));
}

#[tokio::test]
async fn test_concurrent_runs_share_one_store() {
    let client = Arc::new(
        ScriptedProbeClient::new()
            .fallback(404, "")
            .respond("http://x.test/admin", 200, "Admin")
            .respond("http://x.test/backup", 200, "Backup")
            .respond("http://x.test/login", 500, "boom")
            .delay(Duration::from_millis(5)),
    );
    let store = Arc::new(InMemoryEntityRepository::new());
    let first = DiscoveryService::new(client.clone(), store.clone());
    let second = DiscoveryService::new(client.clone(), store.clone());

    let config = DiscoveryConfig {
        concurrency: 8,
        ..words_config(&["admin", "backup", "login", "images", "cgi-bin", "tmp"])
    };
    let cancel = CancellationToken::new();

    let (a, b) = tokio::join!(
        first.run("http://x.test", &config, &cancel),
        second.run("http://x.test", &config, &cancel)
    );

    assert_eq!(store.len(), 3);
    assert_eq!(a.entities.len() + b.entities.len(), 3);
    assert_eq!(a.stats.duplicates + b.stats.duplicates, 3);
    assert_eq!(a.stats.probed, 6);
    assert_eq!(b.stats.probed, 6);
}

#[tokio::test]
async fn test_permutations_and_alphanumeric_candidates_are_probed() {
    let (service, client, _) = service(ScriptedProbeClient::new().fallback(404, ""));

    let config = DiscoveryConfig {
        brute_alphanumeric_size: 1,
        use_permutations: true,
        ..words_config(&["admin"])
    };
    let report = service
        .run("http://x.test", &config, &CancellationToken::new())
        .await;

    // admin, ADMIN, Admin, four suffixed variants, then a-z0-9
    assert_eq!(report.stats.probed, 1 + 2 + 4 + 36);
    assert!(client.was_probed("http://x.test/ADMIN"));
    assert!(client.was_probed("http://x.test/admin.bak"));
    assert!(client.was_probed("http://x.test/z"));
    assert!(client.was_probed("http://x.test/9"));
}
