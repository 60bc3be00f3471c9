// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use bytes::Bytes;
use std::net::IpAddr;
use std::sync::Arc;
use thiserror::Error;

/// 探测错误类型
#[derive(Error, Debug)]
pub enum ProbeError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 域名解析失败
    #[error("Resolution failed: {0}")]
    Resolution(#[from] std::io::Error),
    /// 无效的URI
    #[error("Invalid uri: {0}")]
    InvalidUri(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl ProbeError {
    /// 判断错误是否可重试
    ///
    /// # 返回值
    ///
    /// 如果错误是可重试的则返回true，否则返回false
    pub fn is_retryable(&self) -> bool {
        match self {
            ProbeError::RequestFailed(e) => e.is_timeout() || e.is_connect(),
            ProbeError::Timeout => true,
            _ => false,
        }
    }
}

/// 探测响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub body: Bytes,
}

impl ProbeResponse {
    pub fn new(status_code: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}

/// 单次探测的结果
pub type ProbeResult = Result<ProbeResponse, ProbeError>;

/// 探测客户端特质
///
/// 对一个URI发起一次GET请求，返回状态码与响应体。
/// 单次请求的超时由实现负责，超时与其他失败一样返回错误。
#[async_trait]
pub trait ProbeClient: Send + Sync {
    /// 执行探测
    async fn get(&self, uri: &str) -> ProbeResult;

    /// 客户端名称
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: ProbeClient + ?Sized> ProbeClient for Arc<T> {
    async fn get(&self, uri: &str) -> ProbeResult {
        (**self).get(uri).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// DNS解析器特质
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// 解析域名，返回去重排序后的地址列表
    async fn resolve(&self, name: &str) -> Result<Vec<IpAddr>, ProbeError>;
}

#[async_trait]
impl<T: DnsResolver + ?Sized> DnsResolver for Arc<T> {
    async fn resolve(&self, name: &str) -> Result<Vec<IpAddr>, ProbeError> {
        (**self).resolve(name).await
    }
}
