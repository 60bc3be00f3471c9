// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::baseline::{body_prefix, Baseline};
use crate::domain::models::classification::{AbsentReason, Classification, ExistsKind};
use crate::engines::traits::{ProbeResponse, ProbeResult};

/// 软404页面中常见的标记
pub const NOT_FOUND_MARKER: &[u8] = b"404";

/// 按基线对一次探测结果分类
///
/// 探测失败返回 `Error`，该候选被跳过，不计为不存在。
pub fn classify(result: &ProbeResult, baseline: &Baseline) -> Classification {
    match result {
        Ok(response) => classify_response(response, baseline),
        Err(_) => Classification::Error,
    }
}

/// 按基线对一个响应分类
pub fn classify_response(response: &ProbeResponse, baseline: &Baseline) -> Classification {
    match baseline {
        Baseline::StatusBased { reference_status } => {
            classify_status(response.status_code, *reference_status)
        }
        Baseline::ContentBased { reference_prefix } => {
            classify_content(&response.body, reference_prefix)
        }
    }
}

/// 状态码模式，按顺序匹配，先匹配者生效：
/// 404 → 200 → 500 → 参考状态码 → 其他
fn classify_status(status: u16, reference_status: Option<u16>) -> Classification {
    match status {
        404 => Classification::Absent(AbsentReason::NotFoundStatus),
        200 => Classification::Exists(ExistsKind::Confirmed),
        500 => Classification::Exists(ExistsKind::ServerError),
        s if Some(s) == reference_status => Classification::Absent(AbsentReason::BaselineStatus),
        _ => Classification::Exists(ExistsKind::Unknown),
    }
}

/// 内容模式，状态码不参与判定
///
/// 空响应体只要与参考前缀不同即视为新内容
fn classify_content(body: &[u8], reference_prefix: &[u8]) -> Classification {
    if body_prefix(body) == reference_prefix {
        return Classification::Absent(AbsentReason::BaselinePrefix);
    }
    if contains_marker(body) {
        return Classification::Absent(AbsentReason::NotFoundMarker);
    }
    Classification::Exists(ExistsKind::NewContent)
}

fn contains_marker(body: &[u8]) -> bool {
    body.windows(NOT_FOUND_MARKER.len())
        .any(|window| window == NOT_FOUND_MARKER)
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
