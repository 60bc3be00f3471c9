// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心发现逻辑，包括：
/// - 领域模型（models）：实体、基线、分类与任务调用
/// - 仓库接口（repositories）：实体存储抽象接口
/// - 服务（services）：基线校准、候选生成、分类、发现循环与递归控制
pub mod models;
pub mod repositories;
pub mod services;
