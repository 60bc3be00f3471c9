// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::entity::{Attributes, Entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// URI目录爆破任务名
pub const URI_DIRBUSTER: &str = "uri_dirbuster";

/// DNS子域名爆破任务名
pub const DNS_BRUTE_SUB: &str = "dns_brute_sub";

/// 任务调用
///
/// 递归控制器产生的延迟发现工作单元，由外部调度器执行。
/// `depth` 是该调用产生的实体还能继续展开的剩余深度。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInvocation {
    /// 调用唯一标识符
    pub id: Uuid,
    /// 任务名称
    pub task_name: String,
    /// 目标实体
    pub target: Entity,
    /// 剩余递归深度
    pub depth: i32,
    /// 选项覆盖
    pub option_overrides: Attributes,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl TaskInvocation {
    /// 创建一个新的任务调用
    ///
    /// # 参数
    ///
    /// * `task_name` - 任务名称
    /// * `target` - 目标实体
    /// * `depth` - 剩余递归深度
    /// * `option_overrides` - 选项覆盖
    pub fn new(
        task_name: impl Into<String>,
        target: Entity,
        depth: i32,
        option_overrides: Attributes,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_name: task_name.into(),
            target,
            depth,
            option_overrides,
            created_at: Utc::now(),
        }
    }
}
