// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use dirhound::config::discovery::DiscoveryConfig;
use dirhound::engines::traits::{DnsResolver, ProbeClient, ProbeError, ProbeResponse, ProbeResult};
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// 按URI脚本化应答的探测客户端
///
/// 未登记的URI（包括校准探测的随机路径）按 `fallback` 应答，
/// 未设置 `fallback` 时返回连接失败
#[derive(Default)]
pub struct ScriptedProbeClient {
    responses: HashMap<String, (u16, String)>,
    failures: HashSet<String>,
    fallback: Option<(u16, String)>,
    cancel_on: Option<(String, CancellationToken)>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedProbeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, uri: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(uri.to_string(), (status, body.to_string()));
        self
    }

    pub fn fail(mut self, uri: &str) -> Self {
        self.failures.insert(uri.to_string());
        self
    }

    pub fn fallback(mut self, status: u16, body: &str) -> Self {
        self.fallback = Some((status, body.to_string()));
        self
    }

    /// 探测到 `uri` 时触发取消
    pub fn cancel_on(mut self, uri: &str, token: CancellationToken) -> Self {
        self.cancel_on = Some((uri.to_string(), token));
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_probed(&self, uri: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|call| call == uri)
    }
}

#[async_trait]
impl ProbeClient for ScriptedProbeClient {
    async fn get(&self, uri: &str) -> ProbeResult {
        self.calls.lock().unwrap().push(uri.to_string());

        if let Some((trigger, token)) = &self.cancel_on {
            if trigger == uri {
                token.cancel();
            }
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failures.contains(uri) {
            return Err(ProbeError::Other(format!("connection reset by {}", uri)));
        }
        match self.responses.get(uri).or(self.fallback.as_ref()) {
            Some((status, body)) => Ok(ProbeResponse::new(*status, body.clone())),
            None => Err(ProbeError::Other("connection refused".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// 固定映射的DNS解析器，未登记的名称解析失败
#[derive(Default)]
pub struct StaticResolver {
    records: HashMap<String, Vec<IpAddr>>,
}

#[allow(dead_code)]
impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(mut self, name: &str, ip: &str) -> Self {
        self.records
            .entry(name.to_string())
            .or_default()
            .push(ip.parse().unwrap());
        self
    }
}

#[async_trait]
impl DnsResolver for StaticResolver {
    async fn resolve(&self, name: &str) -> Result<Vec<IpAddr>, ProbeError> {
        self.records
            .get(name)
            .cloned()
            .ok_or_else(|| ProbeError::Other(format!("NXDOMAIN {}", name)))
    }
}

/// 只包含给定词表的发现配置
pub fn words_config(words: &[&str]) -> DiscoveryConfig {
    DiscoveryConfig {
        brute_list: words.iter().map(|w| w.to_string()).collect(),
        ..DiscoveryConfig::default()
    }
}
