// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ProbeSettings;
use crate::engines::traits::{ProbeClient, ProbeError, ProbeResponse, ProbeResult};
use crate::utils::retry_policy::RetryPolicy;
use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;

/// 探测客户端
///
/// 基于reqwest实现的HTTP探测客户端，所有探测共享一个连接池
pub struct ReqwestProbeClient {
    client: reqwest::Client,
    retry_policy: RetryPolicy,
}

impl ReqwestProbeClient {
    /// 根据配置创建探测客户端
    ///
    /// # 参数
    ///
    /// * `settings` - 探测客户端配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestProbeClient)` - 探测客户端
    /// * `Err(ProbeError)` - 构建HTTP客户端失败
    pub fn new(settings: &ProbeSettings) -> Result<Self, ProbeError> {
        let redirect = if settings.follow_redirects {
            Policy::limited(10)
        } else {
            Policy::none()
        };

        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .redirect(redirect)
            .danger_accept_invalid_certs(settings.skip_tls_verification)
            .build()?;

        Ok(Self {
            client,
            retry_policy: RetryPolicy::probe(settings.max_retries),
        })
    }

    /// 替换重试策略
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    async fn get_once(&self, uri: &str) -> ProbeResult {
        let response = self.client.get(uri).send().await.map_err(map_error)?;
        let status_code = response.status().as_u16();
        let body = response.bytes().await.map_err(map_error)?;

        Ok(ProbeResponse { status_code, body })
    }
}

fn map_error(e: reqwest::Error) -> ProbeError {
    if e.is_timeout() {
        ProbeError::Timeout
    } else if e.is_builder() {
        ProbeError::InvalidUri(e.to_string())
    } else {
        ProbeError::RequestFailed(e)
    }
}

#[async_trait]
impl ProbeClient for ReqwestProbeClient {
    /// 执行HTTP探测，可重试的失败按重试策略重试
    async fn get(&self, uri: &str) -> ProbeResult {
        let mut attempt = 0;
        loop {
            match self.get_once(uri).await {
                Ok(response) => return Ok(response),
                Err(e) if self.retry_policy.should_retry_error(attempt, &e) => {
                    attempt += 1;
                    let backoff = self.retry_policy.calculate_backoff(attempt);
                    debug!("Retrying {} in {:?} after error: {}", uri, backoff, e);
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
