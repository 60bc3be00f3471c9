// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 拼接基础URI与候选名称，保证两者之间恰好一个路径分隔符
pub fn build_candidate_uri(base_uri: &str, candidate: &str) -> String {
    format!(
        "{}/{}",
        base_uri.trim_end_matches('/'),
        candidate.trim_start_matches('/')
    )
}

/// 拼接候选子域名与父域名
pub fn build_candidate_domain(domain: &str, candidate: &str) -> String {
    format!(
        "{}.{}",
        candidate.trim_end_matches('.'),
        domain.trim_start_matches('.').trim_end_matches('.')
    )
}
