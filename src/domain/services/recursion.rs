// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::entity::{Attributes, Entity, EntityType};
use crate::domain::models::invocation::{TaskInvocation, DNS_BRUTE_SUB};
use crate::queue::task_queue::{QueueError, TaskQueue};
use crate::utils::errors::DiscoveryError;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// 一次递归决策的结果
#[derive(Debug, Clone, PartialEq)]
pub enum RecursionOutcome {
    /// 已调度新的任务调用
    Dispatched(TaskInvocation),
    /// 深度已耗尽
    DepthExhausted,
    /// 实体类型无对应任务
    Unhandled(EntityType),
}

/// 递归控制器
///
/// 根据实体类型和剩余深度决定是否调度后续发现任务。
/// 深度在调度时递减，调度出的调用携带 `depth - 1`，
/// 因此任意调用链在有限步内终止。
pub struct RecursionController<Q: TaskQueue> {
    queue: Arc<Q>,
}

impl<Q: TaskQueue> RecursionController<Q> {
    pub fn new(queue: Arc<Q>) -> Self {
        Self { queue }
    }

    /// 对实体执行一次递归决策
    ///
    /// # 参数
    ///
    /// * `entity` - 目标实体
    /// * `depth` - 剩余深度
    ///
    /// # 返回值
    ///
    /// * `Ok(RecursionOutcome)` - 决策结果
    /// * `Err(QueueError)` - 入队失败
    pub async fn recurse(
        &self,
        entity: &Entity,
        depth: i32,
    ) -> Result<RecursionOutcome, QueueError> {
        if depth <= 0 {
            info!("Returning, depth @ {}", depth);
            return Ok(RecursionOutcome::DepthExhausted);
        }

        match entity.entity_type {
            EntityType::DnsRecord => {
                let invocation = TaskInvocation::new(
                    DNS_BRUTE_SUB,
                    entity.clone(),
                    depth - 1,
                    dns_brute_overrides(),
                );
                debug!(
                    "Scheduling {} on {} with depth {}",
                    DNS_BRUTE_SUB, entity, invocation.depth
                );
                let invocation = self.queue.enqueue(invocation).await?;
                Ok(RecursionOutcome::Dispatched(invocation))
            }
            other => {
                let skipped = DiscoveryError::UnhandledEntityType {
                    entity_type: other,
                    name: entity.name.clone(),
                };
                info!("SKIP {}", skipped);
                Ok(RecursionOutcome::Unhandled(other))
            }
        }
    }
}

/// 子域名爆破的固定参数：使用词表文件、最小字母数字爆破、开启变体
pub fn dns_brute_overrides() -> Attributes {
    let mut overrides = Attributes::new();
    overrides.insert("use_file".to_string(), Value::Bool(true));
    overrides.insert("brute_alphanumeric_size".to_string(), Value::from(1));
    overrides.insert("use_permutations".to_string(), Value::Bool(true));
    overrides
}
