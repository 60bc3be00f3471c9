// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::entity::EntityType;
use thiserror::Error;

/// 发现错误类型
///
/// 只有 `CalibrationFailed` 会终止一次发现循环，其余错误都只影响单个候选或实体。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// 基线校准失败，整个目标的发现被放弃
    #[error("Calibration failed for {uri}: {reason}")]
    CalibrationFailed { uri: String, reason: String },

    /// 单个候选探测失败
    #[error("Probe failed for {uri}: {reason}")]
    ProbeFailed { uri: String, reason: String },

    /// 无法识别的状态码
    #[error("Unrecognized status {status} for {uri}")]
    UnrecognizedStatus { uri: String, status: u16 },

    /// 递归控制器无法处理的实体类型
    #[error("unhandled entity type: {entity_type}#{name}")]
    UnhandledEntityType {
        entity_type: EntityType,
        name: String,
    },
}

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("仓库错误: {0}")]
    RepositoryError(String),

    #[error("队列错误: {0}")]
    QueueError(String),

    #[error("未知任务: {0}")]
    UnknownTask(String),

    #[error("无效目标: {0}")]
    InvalidTarget(String),
}
