// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::invocation::TaskInvocation;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// 队列错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// 调用不在执行中
    #[error("Unknown invocation: {0}")]
    UnknownInvocation(Uuid),
}

/// 任务队列特质
///
/// 接收递归控制器产生的任务调用，由Worker取出执行
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// 入队任务调用
    async fn enqueue(&self, invocation: TaskInvocation) -> Result<TaskInvocation, QueueError>;

    /// 出队任务调用
    async fn dequeue(&self) -> Result<Option<TaskInvocation>, QueueError>;

    /// 完成任务调用
    async fn complete(&self, invocation_id: Uuid) -> Result<(), QueueError>;

    /// 失败任务调用
    async fn fail(&self, invocation_id: Uuid) -> Result<(), QueueError>;
}

/// 队列统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub pending: usize,
    pub active: usize,
    pub completed: usize,
    pub failed: usize,
}

/// 内存任务队列实现
///
/// 先进先出，执行中的调用单独记录直到完成或失败
#[derive(Debug, Default)]
pub struct InMemoryTaskQueue {
    pending: Mutex<VecDeque<TaskInvocation>>,
    active: DashMap<Uuid, TaskInvocation>,
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl InMemoryTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            pending: self.pending.lock().len(),
            active: self.active.len(),
            completed: self.completed.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
        }
    }

    fn finish(&self, invocation_id: Uuid, counter: &AtomicUsize) -> Result<(), QueueError> {
        self.active
            .remove(&invocation_id)
            .ok_or(QueueError::UnknownInvocation(invocation_id))?;
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl TaskQueue for InMemoryTaskQueue {
    async fn enqueue(&self, invocation: TaskInvocation) -> Result<TaskInvocation, QueueError> {
        self.pending.lock().push_back(invocation.clone());
        Ok(invocation)
    }

    async fn dequeue(&self) -> Result<Option<TaskInvocation>, QueueError> {
        let invocation = self.pending.lock().pop_front();
        if let Some(invocation) = &invocation {
            self.active.insert(invocation.id, invocation.clone());
        }
        Ok(invocation)
    }

    async fn complete(&self, invocation_id: Uuid) -> Result<(), QueueError> {
        self.finish(invocation_id, &self.completed)
    }

    async fn fail(&self, invocation_id: Uuid) -> Result<(), QueueError> {
        self.finish(invocation_id, &self.failed)
    }
}

#[async_trait]
impl<T: TaskQueue + ?Sized> TaskQueue for Arc<T> {
    async fn enqueue(&self, invocation: TaskInvocation) -> Result<TaskInvocation, QueueError> {
        (**self).enqueue(invocation).await
    }

    async fn dequeue(&self) -> Result<Option<TaskInvocation>, QueueError> {
        (**self).dequeue().await
    }

    async fn complete(&self, invocation_id: Uuid) -> Result<(), QueueError> {
        (**self).complete(invocation_id).await
    }

    async fn fail(&self, invocation_id: Uuid) -> Result<(), QueueError> {
        (**self).fail(invocation_id).await
    }
}
