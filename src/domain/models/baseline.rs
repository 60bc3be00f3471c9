// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::ProbeResponse;
use bytes::Bytes;
use std::fmt;

/// 内容比较时使用的响应体前缀长度
pub const BASELINE_PREFIX_LEN: usize = 51;

/// 取响应体的比较前缀
pub fn body_prefix(body: &[u8]) -> &[u8] {
    &body[..body.len().min(BASELINE_PREFIX_LEN)]
}

/// 判别模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineMode {
    /// 基于状态码判别
    StatusBased,
    /// 基于内容判别
    ContentBased,
}

impl fmt::Display for BaselineMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BaselineMode::StatusBased => write!(f, "code"),
            BaselineMode::ContentBased => write!(f, "content"),
        }
    }
}

/// 基线
///
/// 描述目标如何表达“资源不存在”。每次发现循环只校准一次，
/// 之后在整个循环期间保持不变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Baseline {
    /// 基于状态码：404 总是表示不存在，`reference_status` 为目标自己的“不存在”状态码
    StatusBased { reference_status: Option<u16> },
    /// 基于内容：与不存在页面的响应体前缀比较
    ContentBased { reference_prefix: Bytes },
}

impl Baseline {
    /// 根据不存在资源的探测响应推导基线
    ///
    /// * 404 → 状态码模式，无参考状态码
    /// * 200 → 内容模式，记录响应体前缀
    /// * 其他 → 状态码模式，以该状态码作为参考
    pub fn from_probe(response: &ProbeResponse) -> Self {
        match response.status_code {
            404 => Baseline::StatusBased {
                reference_status: None,
            },
            200 => Baseline::ContentBased {
                reference_prefix: response
                    .body
                    .slice(..response.body.len().min(BASELINE_PREFIX_LEN)),
            },
            status => Baseline::StatusBased {
                reference_status: Some(status),
            },
        }
    }

    pub fn mode(&self) -> BaselineMode {
        match self {
            Baseline::StatusBased { .. } => BaselineMode::StatusBased,
            Baseline::ContentBased { .. } => BaselineMode::ContentBased,
        }
    }
}
