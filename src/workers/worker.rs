// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::WorkerError;
use async_trait::async_trait;

/// Worker trait定义
///
/// 工作器从任务队列中消费任务调用，直到队列耗尽或收到取消信号
#[async_trait]
pub trait Worker: Send + Sync {
    /// 运行工作器，返回时队列已空或已被取消
    async fn run(&self) -> Result<(), WorkerError>;

    /// 获取工作器名称，用于日志
    fn name(&self) -> &str;
}
