// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置、环境变量和内置词表
pub mod config;

/// 领域模块
///
/// 包含实体、基线、分类结果等模型，以及发现与递归服务
pub mod domain;

/// 引擎模块
///
/// 实现HTTP探测客户端和DNS解析器
pub mod engines;

/// 基础设施模块
///
/// 提供实体仓库等外部协作者的实现
pub mod infrastructure;

/// 队列模块
///
/// 实现任务调用队列
pub mod queue;

/// 工具模块
///
/// 提供错误类型、重试策略、URI拼接、词表加载和日志初始化
pub mod utils;

/// 工作器模块
///
/// 消费任务调用并执行发现任务
pub mod workers;
