// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::discovery::DiscoveryConfig;
use crate::config::wordlists::DNS_PERMUTATION_SUFFIXES;
use crate::domain::models::entity::{Attributes, EntityType};
use crate::domain::repositories::entity_repository::{EntityRepository, RepositoryError};
use crate::domain::services::candidates::CandidateGenerator;
use crate::domain::services::discovery_service::{resolve_words, DiscoveryReport};
use crate::engines::traits::{DnsResolver, ProbeError};
use crate::utils::url_utils::build_candidate_domain;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 子域名爆破服务
///
/// 先解析一个随机子域名检测泛解析，再逐个解析候选子域名。
/// 只解析到泛解析地址的候选视为不存在。
pub struct DnsBruteService<R: DnsResolver, S: EntityRepository> {
    resolver: Arc<R>,
    store: Arc<S>,
}

impl<R: DnsResolver, S: EntityRepository> DnsBruteService<R, S> {
    pub fn new(resolver: Arc<R>, store: Arc<S>) -> Self {
        Self { resolver, store }
    }

    /// 检测泛解析，返回泛解析地址集合
    pub async fn wildcard_addresses(&self, domain: &str) -> Option<BTreeSet<IpAddr>> {
        let probe = build_candidate_domain(domain, &Uuid::new_v4().simple().to_string());
        match self.resolver.resolve(&probe).await {
            Ok(addresses) if !addresses.is_empty() => {
                warn!("Wildcard DNS detected on {}: {:?}", domain, addresses);
                Some(addresses.into_iter().collect())
            }
            _ => None,
        }
    }

    /// 对域名执行子域名爆破
    pub async fn run(
        &self,
        domain: &str,
        config: &DiscoveryConfig,
        cancel: &CancellationToken,
    ) -> DiscoveryReport {
        let mut report = DiscoveryReport::new(domain);
        let wildcard = self.wildcard_addresses(domain).await;

        let generator = CandidateGenerator::new(
            resolve_words(config).await,
            config.brute_alphanumeric_size,
            config.use_permutations,
            config.seed,
        )
        .with_suffixes(DNS_PERMUTATION_SUFFIXES);

        let candidates = generator.iter().take_while(|_| !cancel.is_cancelled());
        let lookups = stream::iter(candidates)
            .map(|candidate| {
                let name = build_candidate_domain(domain, &candidate);
                async move {
                    let result = self.resolver.resolve(&name).await;
                    (name, result)
                }
            })
            .buffer_unordered(config.concurrency.max(1));
        futures::pin_mut!(lookups);

        while let Some((name, result)) = lookups.next().await {
            self.record(&mut report, wildcard.as_ref(), name, result).await;
        }

        report.cancelled = cancel.is_cancelled();
        info!(
            "Subdomain bruteforce for {} finished: resolved={} absent={} failed={} new={}",
            domain,
            report.stats.exists,
            report.stats.absent,
            report.stats.failed,
            report.entities.len()
        );

        report
    }

    async fn record(
        &self,
        report: &mut DiscoveryReport,
        wildcard: Option<&BTreeSet<IpAddr>>,
        name: String,
        result: Result<Vec<IpAddr>, ProbeError>,
    ) {
        report.stats.probed += 1;

        let addresses: BTreeSet<IpAddr> = match result {
            Ok(addresses) => addresses.into_iter().collect(),
            Err(e) => {
                debug!("No record for {}: {}", name, e);
                report.stats.failed += 1;
                return;
            }
        };

        if addresses.is_empty() {
            report.stats.absent += 1;
            return;
        }
        if wildcard.is_some_and(|wildcard| addresses.is_subset(wildcard)) {
            debug!("{} only resolves to wildcard addresses", name);
            report.stats.absent += 1;
            return;
        }

        report.stats.exists += 1;
        info!("Resolved {} to {:?}", name, addresses);

        let mut attributes = Attributes::new();
        attributes.insert("name".to_string(), Value::from(name.as_str()));
        attributes.insert(
            "addresses".to_string(),
            Value::from(
                addresses
                    .iter()
                    .map(|ip| ip.to_string())
                    .collect::<Vec<_>>(),
            ),
        );

        match self.store.create(EntityType::DnsRecord, attributes).await {
            Ok(entity) => report.entities.push(entity),
            Err(RepositoryError::AlreadyExists(_)) => report.stats.duplicates += 1,
            Err(e) => warn!("Unable to store {}: {}", name, e),
        }

        for ip in &addresses {
            let mut attributes = Attributes::new();
            attributes.insert("name".to_string(), Value::from(ip.to_string()));
            attributes.insert("resolved_from".to_string(), Value::from(name.as_str()));

            match self.store.create(EntityType::IpAddress, attributes).await {
                Ok(entity) => report.entities.push(entity),
                Err(RepositoryError::AlreadyExists(_)) => {}
                Err(e) => warn!("Unable to store {}: {}", ip, e),
            }
        }
    }
}
