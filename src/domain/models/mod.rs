// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心数据结构，包括：
/// - 实体（entity）：已发现的资源，以 (类型, 名称) 唯一标识
/// - 基线（baseline）：目标表达“资源不存在”的方式
/// - 分类（classification）：单次探测的判定结果
/// - 任务调用（invocation）：带剩余深度的延迟发现任务
pub mod baseline;
pub mod classification;
pub mod entity;
pub mod invocation;
