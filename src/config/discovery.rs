// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{DiscoverySettings, DnsSettings};
use crate::config::wordlists::{to_owned_list, DEFAULT_BRUTE_LIST, DEFAULT_SUBDOMAIN_LIST};
use crate::domain::models::entity::Attributes;
use serde_json::Value;
use tracing::warn;

/// 单次发现调用的配置
///
/// 由全局配置生成，再叠加任务调用携带的选项覆盖
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryConfig {
    /// 静态词表
    pub brute_list: Vec<String>,
    /// 是否从文件加载词表
    pub use_file: bool,
    /// 词表文件路径
    pub wordlist_path: Option<String>,
    /// 字母数字爆破的最大长度
    pub brute_alphanumeric_size: usize,
    /// 是否生成词表变体
    pub use_permutations: bool,
    /// 随机种子
    pub seed: Option<u64>,
    /// 并发探测数
    pub concurrency: usize,
    /// 内容摘录长度
    pub content_excerpt_len: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            brute_list: to_owned_list(DEFAULT_BRUTE_LIST),
            use_file: false,
            wordlist_path: None,
            brute_alphanumeric_size: 0,
            use_permutations: false,
            seed: None,
            concurrency: 1,
            content_excerpt_len: 1024,
        }
    }
}

impl From<&DiscoverySettings> for DiscoveryConfig {
    fn from(settings: &DiscoverySettings) -> Self {
        Self {
            brute_list: settings
                .brute_list
                .clone()
                .unwrap_or_else(|| to_owned_list(DEFAULT_BRUTE_LIST)),
            use_file: settings.use_file,
            wordlist_path: settings.wordlist_path.clone(),
            brute_alphanumeric_size: settings.brute_alphanumeric_size,
            use_permutations: settings.use_permutations,
            seed: settings.seed,
            concurrency: settings.concurrency.max(1),
            content_excerpt_len: settings.content_excerpt_len,
        }
    }
}

impl DiscoveryConfig {
    /// 子域名爆破的配置
    pub fn for_dns(settings: &DnsSettings) -> Self {
        Self {
            brute_list: to_owned_list(DEFAULT_SUBDOMAIN_LIST),
            wordlist_path: settings.wordlist_path.clone(),
            concurrency: settings.concurrency.max(1),
            ..Self::default()
        }
    }

    /// 叠加选项覆盖
    ///
    /// 类型不匹配的覆盖会被忽略并记录警告。`brute_list` 可以是字符串数组，
    /// 也可以是逗号分隔的字符串。
    pub fn with_overrides(mut self, overrides: &Attributes) -> Self {
        for (key, value) in overrides {
            let applied = match key.as_str() {
                "brute_list" => parse_word_list(value).map(|list| self.brute_list = list),
                "use_file" => value.as_bool().map(|v| self.use_file = v),
                "wordlist_path" => value
                    .as_str()
                    .map(|v| self.wordlist_path = Some(v.to_string())),
                "brute_alphanumeric_size" => value
                    .as_u64()
                    .map(|v| self.brute_alphanumeric_size = v as usize),
                "use_permutations" => value.as_bool().map(|v| self.use_permutations = v),
                "seed" => value.as_u64().map(|v| self.seed = Some(v)),
                "concurrency" => value.as_u64().map(|v| self.concurrency = (v as usize).max(1)),
                "content_excerpt_len" => value
                    .as_u64()
                    .map(|v| self.content_excerpt_len = v as usize),
                _ => None,
            };

            if applied.is_none() {
                warn!("Ignoring option override {}={}", key, value);
            }
        }
        self
    }
}

fn parse_word_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|word| !word.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}
