// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{DnsResolver, ProbeError};
use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;

/// 基于系统解析器的DNS解析器
pub struct TokioResolver {
    timeout: Duration,
}

impl TokioResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl DnsResolver for TokioResolver {
    async fn resolve(&self, name: &str) -> Result<Vec<IpAddr>, ProbeError> {
        let lookup = tokio::net::lookup_host((name, 0));
        let addrs = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| ProbeError::Timeout)??;

        let mut ips: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
        ips.sort();
        ips.dedup();
        Ok(ips)
    }
}
