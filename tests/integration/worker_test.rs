// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{ScriptedProbeClient, StaticResolver};
use dirhound::config::settings::Settings;
use dirhound::domain::models::entity::{Attributes, Entity, EntityType};
use dirhound::domain::models::invocation::TaskInvocation;
use dirhound::domain::repositories::entity_repository::EntityRepository;
use dirhound::domain::services::recursion::RecursionOutcome;
use dirhound::infrastructure::repositories::memory_entity_repo::InMemoryEntityRepository;
use dirhound::queue::task_queue::{InMemoryTaskQueue, TaskQueue};
use dirhound::utils::errors::WorkerError;
use dirhound::workers::{DiscoveryWorker, Worker};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

type TestWorker =
    DiscoveryWorker<ScriptedProbeClient, StaticResolver, InMemoryEntityRepository, InMemoryTaskQueue>;

struct Harness {
    worker: TestWorker,
    queue: Arc<InMemoryTaskQueue>,
    store: Arc<InMemoryEntityRepository>,
}

fn harness(client: ScriptedProbeClient, resolver: StaticResolver) -> Harness {
    let mut settings = Settings::defaults().unwrap();
    settings.discovery.brute_list = Some(vec!["admin".to_string(), "login".to_string()]);

    let queue = Arc::new(InMemoryTaskQueue::new());
    let store = Arc::new(InMemoryEntityRepository::new());
    let worker = DiscoveryWorker::new(
        queue.clone(),
        Arc::new(client),
        Arc::new(resolver),
        store.clone(),
        Arc::new(settings),
        CancellationToken::new(),
    );
    Harness {
        worker,
        queue,
        store,
    }
}

#[tokio::test]
async fn test_uri_target_runs_once() {
    let h = harness(
        ScriptedProbeClient::new()
            .fallback(404, "")
            .respond("http://x.test/admin", 200, "Admin Panel"),
        StaticResolver::new(),
    );

    let seeded = h
        .worker
        .seed(Entity::from_target("http://x.test"), 3)
        .await
        .unwrap();
    assert!(matches!(seeded, RecursionOutcome::Dispatched(_)));

    h.worker.run().await.unwrap();

    let stats = h.queue.stats();
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.pending, 0);
    assert!(h
        .store
        .exists(EntityType::Uri, "http://x.test/admin")
        .await
        .unwrap());
    // Seed plus the discovered page; Uri results are not recursed into
    assert_eq!(h.store.len(), 2);
}

#[tokio::test]
async fn test_dns_recursion_stops_at_depth() {
    let h = harness(
        ScriptedProbeClient::new(),
        StaticResolver::new()
            .record("www.x.test", "10.0.0.1")
            .record("dev.www.x.test", "10.0.0.2")
            .record("api.dev.www.x.test", "10.0.0.3"),
    );

    h.worker
        .seed(Entity::from_target("x.test"), 2)
        .await
        .unwrap();
    h.worker.run().await.unwrap();

    // x.test (depth 1) then www.x.test (depth 0); dev.www.x.test is found but not expanded
    assert_eq!(h.queue.stats().completed, 2);
    assert!(h.store.exists(EntityType::DnsRecord, "www.x.test").await.unwrap());
    assert!(h
        .store
        .exists(EntityType::DnsRecord, "dev.www.x.test")
        .await
        .unwrap());
    assert!(!h
        .store
        .exists(EntityType::DnsRecord, "api.dev.www.x.test")
        .await
        .unwrap());
    assert!(h.store.exists(EntityType::IpAddress, "10.0.0.2").await.unwrap());
}

#[tokio::test]
async fn test_zero_depth_dns_target_schedules_nothing() {
    let h = harness(
        ScriptedProbeClient::new(),
        StaticResolver::new().record("www.x.test", "10.0.0.1"),
    );

    let seeded = h
        .worker
        .seed(Entity::from_target("x.test"), 0)
        .await
        .unwrap();
    assert_eq!(seeded, RecursionOutcome::DepthExhausted);

    h.worker.run().await.unwrap();
    assert_eq!(h.queue.stats().completed, 0);
    assert!(!h.store.exists(EntityType::DnsRecord, "www.x.test").await.unwrap());
}

#[tokio::test]
async fn test_unknown_task_fails_the_invocation() {
    let h = harness(ScriptedProbeClient::new(), StaticResolver::new());
    let invocation = TaskInvocation::new(
        "port_scan",
        Entity::new(EntityType::Host, "x.test"),
        1,
        Attributes::new(),
    );

    assert!(matches!(
        h.worker.process(&invocation).await,
        Err(WorkerError::UnknownTask(name)) if name == "port_scan"
    ));

    h.queue.enqueue(invocation).await.unwrap();
    h.worker.run().await.unwrap();
    assert_eq!(h.queue.stats().failed, 1);
}

#[tokio::test]
async fn test_task_rejects_mismatched_target() {
    let h = harness(ScriptedProbeClient::new(), StaticResolver::new());
    let invocation = TaskInvocation::new(
        "dns_brute_sub",
        Entity::new(EntityType::Uri, "http://x.test"),
        1,
        Attributes::new(),
    );

    assert!(matches!(
        h.worker.process(&invocation).await,
        Err(WorkerError::InvalidTarget(_))
    ));
}

#[tokio::test]
async fn test_ip_targets_are_not_scannable() {
    let h = harness(ScriptedProbeClient::new(), StaticResolver::new());
    assert!(matches!(
        h.worker
            .seed(Entity::new(EntityType::IpAddress, "10.0.0.1"), 1)
            .await,
        Err(WorkerError::InvalidTarget(_))
    ));
}

#[tokio::test]
async fn test_malformed_uri_target_is_rejected() {
    let h = harness(ScriptedProbeClient::new(), StaticResolver::new());
    assert!(matches!(
        h.worker.seed(Entity::from_target("http://"), 1).await,
        Err(WorkerError::InvalidTarget(_))
    ));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_cancelled_worker_leaves_queue_untouched() {
    let queue = Arc::new(InMemoryTaskQueue::new());
    let cancel = CancellationToken::new();
    let worker = DiscoveryWorker::new(
        queue.clone(),
        Arc::new(ScriptedProbeClient::new().fallback(404, "")),
        Arc::new(StaticResolver::new()),
        Arc::new(InMemoryEntityRepository::new()),
        Arc::new(Settings::defaults().unwrap()),
        cancel.clone(),
    );

    worker
        .seed(Entity::from_target("http://x.test"), 1)
        .await
        .unwrap();
    cancel.cancel();
    worker.run().await.unwrap();

    assert_eq!(queue.stats().pending, 1);
    assert_eq!(worker.name(), "discovery_worker");
}
