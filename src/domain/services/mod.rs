// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 基线校准（calibrator）：探测随机资源，记录目标表达“不存在”的方式
/// - 候选生成（candidates）：静态词表、变体与字母数字爆破的惰性序列
/// - 分类器（classifier）：依据基线判定探测结果
/// - URI发现（discovery_service）：完整的发现循环
/// - 子域名爆破（dns_brute_service）：基于解析结果的发现循环
/// - 递归控制（recursion）：按实体类型和剩余深度调度后续任务
pub mod calibrator;
pub mod candidates;
pub mod classifier;
pub mod discovery_service;
pub mod dns_brute_service;
pub mod recursion;
