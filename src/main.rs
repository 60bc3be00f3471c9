// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use clap::Parser;
use dirhound::config::settings::Settings;
use dirhound::domain::models::entity::Entity;
use dirhound::domain::repositories::entity_repository::EntityRepository;
use dirhound::domain::services::recursion::RecursionOutcome;
use dirhound::engines::dns_resolver::TokioResolver;
use dirhound::engines::reqwest_engine::ReqwestProbeClient;
use dirhound::infrastructure::repositories::memory_entity_repo::InMemoryEntityRepository;
use dirhound::queue::task_queue::InMemoryTaskQueue;
use dirhound::utils::telemetry;
use dirhound::workers::{DiscoveryWorker, Worker};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "dirhound", version)]
#[command(about = "Adaptive content discovery for web paths and subdomains", long_about = None)]
struct Args {
    /// http(s) URI or domain name to scan
    target: String,

    /// Recursion depth, defaults to recursion.max_depth from the configuration
    #[arg(allow_negative_numbers = true)]
    depth: Option<i32>,
}

/// 主函数
///
/// 用法：`dirhound <target> [depth]`，目标为 http(s) URI 或域名
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let args = Args::parse();

    // 2. Initialize logging
    telemetry::init_telemetry();

    // 3. Load configuration
    let settings = Arc::new(Settings::new().context("failed to load configuration")?);
    let target = args.target;
    let depth = args.depth.unwrap_or(settings.recursion.max_depth);
    info!("Starting dirhound against {} with depth {}", target, depth);

    // 4. Build collaborators
    let store = Arc::new(InMemoryEntityRepository::new());
    let queue = Arc::new(InMemoryTaskQueue::new());
    let probe_client = Arc::new(ReqwestProbeClient::new(&settings.probe)?);
    let resolver = Arc::new(TokioResolver::new(Duration::from_secs(
        settings.dns.timeout_secs,
    )));

    let cancel = CancellationToken::new();
    let worker = DiscoveryWorker::new(
        queue.clone(),
        probe_client,
        resolver,
        store.clone(),
        settings.clone(),
        cancel.clone(),
    );

    // 5. Seed the target
    let seeded = worker.seed(Entity::from_target(&target), depth).await?;
    if seeded == RecursionOutcome::DepthExhausted {
        warn!("Depth {} leaves nothing to scan for {}", depth, target);
    }

    // 6. Cancel on Ctrl-C
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing in-flight probes");
            signal_token.cancel();
        }
    });

    // 7. Run until the queue drains
    info!("Starting {}", worker.name());
    worker.run().await?;

    let stats = queue.stats();
    info!(
        "Done: {} entities known, {} invocations completed, {} failed",
        store.len(),
        stats.completed,
        stats.failed
    );
    for entity in store.list().await? {
        info!("{}", entity);
    }

    Ok(())
}
