// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含探测客户端、URI发现、DNS爆破和递归深度等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 探测客户端配置
    pub probe: ProbeSettings,
    /// URI发现配置
    pub discovery: DiscoverySettings,
    /// 递归配置
    pub recursion: RecursionSettings,
    /// DNS爆破配置
    pub dns: DnsSettings,
}

/// 探测客户端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
    /// User-Agent
    pub user_agent: String,
    /// 是否跳过TLS验证
    pub skip_tls_verification: bool,
    /// 是否跟随重定向
    pub follow_redirects: bool,
    /// 可重试失败的最大重试次数，0 表示单次尝试
    pub max_retries: u32,
}

/// URI发现配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySettings {
    /// 静态词表，未设置时使用内置的常见路径列表
    pub brute_list: Option<Vec<String>>,
    /// 是否从文件加载词表
    pub use_file: bool,
    /// 词表文件路径
    pub wordlist_path: Option<String>,
    /// 字母数字爆破的最大长度，0 表示关闭
    pub brute_alphanumeric_size: usize,
    /// 是否生成词表变体
    pub use_permutations: bool,
    /// 打乱词表顺序的随机种子
    pub seed: Option<u64>,
    /// 并发探测数
    pub concurrency: usize,
    /// 实体中保留的内容摘录长度（字节）
    pub content_excerpt_len: usize,
}

/// 递归配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RecursionSettings {
    /// 默认递归深度
    pub max_depth: i32,
}

/// DNS爆破配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DnsSettings {
    /// 子域名词表文件路径
    pub wordlist_path: Option<String>,
    /// 并发解析数
    pub concurrency: usize,
    /// 单次解析超时时间（秒）
    pub timeout_secs: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从默认值、配置文件和环境变量加载配置。
    /// `DIRHOUND__DISCOVERY__BRUTE_LIST` 接受逗号分隔的词表
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("DIRHOUND")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("discovery.brute_list"),
            )
            .build()?
            .try_deserialize()
    }

    /// 只包含默认值的配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Probe client
            .set_default("probe.timeout_secs", 10)?
            .set_default("probe.user_agent", "Mozilla/5.0 (compatible; dirhound/0.1)")?
            .set_default("probe.skip_tls_verification", false)?
            .set_default("probe.follow_redirects", false)?
            .set_default("probe.max_retries", 0)?
            // URI discovery
            .set_default("discovery.use_file", false)?
            .set_default("discovery.brute_alphanumeric_size", 0)?
            .set_default("discovery.use_permutations", false)?
            .set_default("discovery.concurrency", 1)?
            .set_default("discovery.content_excerpt_len", 1024)?
            // Recursion
            .set_default("recursion.max_depth", 2)?
            // DNS
            .set_default("dns.concurrency", 16)?
            .set_default("dns.timeout_secs", 5)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
