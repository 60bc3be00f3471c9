// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供任务调用的消费与执行，包括发现任务的分派和递归结果回灌
pub mod discovery_worker;
pub mod worker;

pub use discovery_worker::DiscoveryWorker;
pub use worker::Worker;
