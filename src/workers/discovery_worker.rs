// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::discovery::DiscoveryConfig;
use crate::config::settings::Settings;
use crate::domain::models::entity::{Entity, EntityType};
use crate::domain::models::invocation::{TaskInvocation, DNS_BRUTE_SUB, URI_DIRBUSTER};
use crate::domain::repositories::entity_repository::{EntityRepository, RepositoryError};
use crate::domain::services::discovery_service::{DiscoveryReport, DiscoveryService};
use crate::domain::services::dns_brute_service::DnsBruteService;
use crate::domain::services::recursion::{RecursionController, RecursionOutcome};
use crate::engines::traits::{DnsResolver, ProbeClient};
use crate::queue::task_queue::TaskQueue;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};
use url::Url;
use uuid::Uuid;

/// 发现工作器
///
/// 从队列取出任务调用并执行对应的发现任务，
/// 再把新发现的实体交给递归控制器，直到队列为空或被取消
pub struct DiscoveryWorker<P, R, S, Q>
where
    P: ProbeClient,
    R: DnsResolver,
    S: EntityRepository,
    Q: TaskQueue,
{
    queue: Arc<Q>,
    store: Arc<S>,
    discovery: DiscoveryService<P, S>,
    dns: DnsBruteService<R, S>,
    recursion: RecursionController<Q>,
    settings: Arc<Settings>,
    cancel: CancellationToken,
    worker_id: Uuid,
}

impl<P, R, S, Q> DiscoveryWorker<P, R, S, Q>
where
    P: ProbeClient,
    R: DnsResolver,
    S: EntityRepository,
    Q: TaskQueue,
{
    /// 创建新的发现工作器实例
    pub fn new(
        queue: Arc<Q>,
        probe_client: Arc<P>,
        resolver: Arc<R>,
        store: Arc<S>,
        settings: Arc<Settings>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            recursion: RecursionController::new(queue.clone()),
            discovery: DiscoveryService::new(probe_client, store.clone()),
            dns: DnsBruteService::new(resolver, store.clone()),
            queue,
            store,
            settings,
            cancel,
            worker_id: Uuid::new_v4(),
        }
    }

    /// 提交扫描目标
    ///
    /// URI目标直接调度URI发现任务，DNS目标交给递归控制器决定
    pub async fn seed(&self, target: Entity, depth: i32) -> Result<RecursionOutcome, WorkerError> {
        if !matches!(target.entity_type, EntityType::Uri | EntityType::DnsRecord) {
            return Err(WorkerError::InvalidTarget(format!(
                "cannot scan a {} target",
                target.entity_type
            )));
        }
        if target.entity_type == EntityType::Uri {
            Url::parse(&target.name)
                .map_err(|e| WorkerError::InvalidTarget(format!("{}: {}", target.name, e)))?;
        }

        match self
            .store
            .create(target.entity_type, target.attributes.clone())
            .await
        {
            Ok(_) | Err(RepositoryError::AlreadyExists(_)) => {}
            Err(e) => return Err(WorkerError::RepositoryError(e.to_string())),
        }

        match target.entity_type {
            EntityType::Uri => {
                let invocation =
                    TaskInvocation::new(URI_DIRBUSTER, target, depth, Default::default());
                let invocation = self
                    .queue
                    .enqueue(invocation)
                    .await
                    .map_err(|e| WorkerError::QueueError(e.to_string()))?;
                Ok(RecursionOutcome::Dispatched(invocation))
            }
            _ => self
                .recursion
                .recurse(&target, depth)
                .await
                .map_err(|e| WorkerError::QueueError(e.to_string())),
        }
    }

    /// 执行一个任务调用，并对新实体执行递归决策
    #[instrument(skip(self, invocation), fields(invocation_id = %invocation.id, task = %invocation.task_name, entity = %invocation.target))]
    pub async fn process(&self, invocation: &TaskInvocation) -> Result<DiscoveryReport, WorkerError> {
        info!("Processing invocation with depth {}", invocation.depth);

        let report = match invocation.task_name.as_str() {
            URI_DIRBUSTER => {
                let target = self.expect_target(invocation, EntityType::Uri)?;
                let target_uri = target
                    .attribute("uri")
                    .and_then(|v| v.as_str())
                    .unwrap_or(&target.name);
                let config = DiscoveryConfig::from(&self.settings.discovery)
                    .with_overrides(&invocation.option_overrides);
                self.discovery.run(target_uri, &config, &self.cancel).await
            }
            DNS_BRUTE_SUB => {
                let target = self.expect_target(invocation, EntityType::DnsRecord)?;
                let config = DiscoveryConfig::for_dns(&self.settings.dns)
                    .with_overrides(&invocation.option_overrides);
                self.dns.run(&target.name, &config, &self.cancel).await
            }
            other => return Err(WorkerError::UnknownTask(other.to_string())),
        };

        for entity in &report.entities {
            self.recursion
                .recurse(entity, invocation.depth)
                .await
                .map_err(|e| WorkerError::QueueError(e.to_string()))?;
        }

        Ok(report)
    }

    fn expect_target<'a>(
        &self,
        invocation: &'a TaskInvocation,
        expected: EntityType,
    ) -> Result<&'a Entity, WorkerError> {
        if invocation.target.entity_type == expected {
            Ok(&invocation.target)
        } else {
            Err(WorkerError::InvalidTarget(format!(
                "{} expects a {} target, got {}",
                invocation.task_name, expected, invocation.target
            )))
        }
    }
}

#[async_trait]
impl<P, R, S, Q> Worker for DiscoveryWorker<P, R, S, Q>
where
    P: ProbeClient,
    R: DnsResolver,
    S: EntityRepository,
    Q: TaskQueue,
{
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Discovery worker {} started", self.worker_id);

        while !self.cancel.is_cancelled() {
            let invocation = match self
                .queue
                .dequeue()
                .await
                .map_err(|e| WorkerError::QueueError(e.to_string()))?
            {
                Some(invocation) => invocation,
                None => break,
            };

            let finished = match self.process(&invocation).await {
                Ok(report) => {
                    if let Some(e) = &report.error {
                        warn!("Invocation {} ended early: {}", invocation.id, e);
                    }
                    self.queue.complete(invocation.id).await
                }
                Err(e) => {
                    error!("Invocation {} failed: {}", invocation.id, e);
                    self.queue.fail(invocation.id).await
                }
            };
            finished.map_err(|e| WorkerError::QueueError(e.to_string()))?;
        }

        if self.cancel.is_cancelled() {
            warn!("Discovery worker {} cancelled", self.worker_id);
        } else {
            info!("Discovery worker {} finished, queue is empty", self.worker_id);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "discovery_worker"
    }
}
