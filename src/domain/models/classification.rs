// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 存在类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistsKind {
    /// 200，确认存在
    Confirmed,
    /// 500，服务端错误，保留响应内容
    ServerError,
    /// 无法识别的状态码，标记待复核
    Unknown,
    /// 内容模式下的新页面
    NewContent,
}

impl ExistsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExistsKind::Confirmed => "confirmed",
            ExistsKind::ServerError => "serverError",
            ExistsKind::Unknown => "unknown",
            ExistsKind::NewContent => "newContent",
        }
    }

    /// 是否需要在实体中保留内容摘录
    pub fn retains_content(&self) -> bool {
        matches!(self, ExistsKind::ServerError | ExistsKind::NewContent)
    }
}

impl fmt::Display for ExistsKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 判定为不存在的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentReason {
    /// 404 状态码
    NotFoundStatus,
    /// 与目标的“不存在”状态码相同
    BaselineStatus,
    /// 响应体前缀与不存在页面相同
    BaselinePrefix,
    /// 响应体包含 "404"
    NotFoundMarker,
}

impl fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AbsentReason::NotFoundStatus => write!(f, "404 status"),
            AbsentReason::BaselineStatus => write!(f, "same as missing page code"),
            AbsentReason::BaselinePrefix => write!(f, "same prefix as missing page"),
            AbsentReason::NotFoundMarker => write!(f, "body contains 404"),
        }
    }
}

/// 分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Exists(ExistsKind),
    Absent(AbsentReason),
    /// 探测本身失败
    Error,
}

impl Classification {
    pub fn is_exists(&self) -> bool {
        matches!(self, Classification::Exists(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Classification::Absent(_))
    }
}
