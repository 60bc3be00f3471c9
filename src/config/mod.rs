// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置，包括探测客户端、发现任务和递归深度等配置
pub mod discovery;
pub mod settings;
pub mod wordlists;
