// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供任务调用队列，负责递归产生的发现任务的排队与执行状态管理
pub mod task_queue;
