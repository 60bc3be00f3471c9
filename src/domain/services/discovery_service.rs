// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::discovery::DiscoveryConfig;
use crate::config::wordlists::URI_PERMUTATION_SUFFIXES;
use crate::domain::models::baseline::Baseline;
use crate::domain::models::classification::{Classification, ExistsKind};
use crate::domain::models::entity::{Attributes, Entity, EntityType};
use crate::domain::repositories::entity_repository::{EntityRepository, RepositoryError};
use crate::domain::services::calibrator::BaselineCalibrator;
use crate::domain::services::candidates::CandidateGenerator;
use crate::domain::services::classifier::classify;
use crate::engines::traits::{ProbeClient, ProbeResponse, ProbeResult};
use crate::utils::errors::DiscoveryError;
use crate::utils::url_utils::build_candidate_uri;
use crate::utils::wordlist::load_wordlist;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// 发现统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    /// 已探测的候选数
    pub probed: usize,
    /// 判定为存在的候选数
    pub exists: usize,
    /// 判定为不存在的候选数
    pub absent: usize,
    /// 探测失败的候选数
    pub failed: usize,
    /// 存在但实体已在仓库中的候选数
    pub duplicates: usize,
}

/// 一次发现循环的报告
///
/// 校准失败时 `error` 为 `CalibrationFailed`，其余字段为空；
/// 报告本身仍作为正常结果返回
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    /// 发现目标
    pub target: String,
    /// 校准得到的基线
    pub baseline: Option<Baseline>,
    /// 本次新创建的实体
    pub entities: Vec<Entity>,
    /// 统计
    pub stats: DiscoveryStats,
    /// 非致命问题：探测失败、无法识别的状态码
    pub warnings: Vec<DiscoveryError>,
    /// 终止循环的错误
    pub error: Option<DiscoveryError>,
    /// 是否被取消
    pub cancelled: bool,
}

impl DiscoveryReport {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            baseline: None,
            entities: Vec::new(),
            stats: DiscoveryStats::default(),
            warnings: Vec::new(),
            error: None,
            cancelled: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// 加载本次发现使用的静态词表
///
/// `use_file` 打开且配置了词表文件时从文件加载，文件不可读时退回配置中的词表
pub async fn resolve_words(config: &DiscoveryConfig) -> Vec<String> {
    if config.use_file {
        if let Some(path) = &config.wordlist_path {
            match load_wordlist(path).await {
                Ok(words) => {
                    info!("Loaded {} words from {}", words.len(), path);
                    return words;
                }
                Err(e) => warn!("Unable to load wordlist {}: {}, using built-in list", path, e),
            }
        }
    }
    config.brute_list.clone()
}

/// URI发现服务
///
/// 对一个目标执行：基线校准 → 候选生成 → 探测 → 分类 → 实体创建
pub struct DiscoveryService<P: ProbeClient, S: EntityRepository> {
    client: Arc<P>,
    store: Arc<S>,
}

impl<P: ProbeClient, S: EntityRepository> DiscoveryService<P, S> {
    /// 创建新的发现服务实例
    ///
    /// # 参数
    ///
    /// * `client` - 探测客户端
    /// * `store` - 实体仓库
    pub fn new(client: Arc<P>, store: Arc<S>) -> Self {
        Self { client, store }
    }

    /// 对目标执行一次发现循环
    ///
    /// 基线校准完成前不会发出任何候选探测。取消后不再开始新的候选，
    /// 已发出的探测允许完成。
    ///
    /// # 参数
    ///
    /// * `target_uri` - 目标基础URI
    /// * `config` - 本次调用的配置
    /// * `cancel` - 取消令牌
    ///
    /// # 返回值
    ///
    /// 发现报告
    pub async fn run(
        &self,
        target_uri: &str,
        config: &DiscoveryConfig,
        cancel: &CancellationToken,
    ) -> DiscoveryReport {
        let mut report = DiscoveryReport::new(target_uri);

        let baseline = match BaselineCalibrator::new(self.client.clone())
            .calibrate(target_uri)
            .await
        {
            Ok(baseline) => baseline,
            Err(e) => {
                error!("Aborting discovery for {}: {}", target_uri, e);
                report.error = Some(e);
                return report;
            }
        };
        report.baseline = Some(baseline.clone());

        let words = resolve_words(config).await;
        let generator = CandidateGenerator::new(
            words,
            config.brute_alphanumeric_size,
            config.use_permutations,
            config.seed,
        )
        .with_suffixes(URI_PERMUTATION_SUFFIXES);

        let candidates = generator.iter().take_while(|_| !cancel.is_cancelled());
        let probes = stream::iter(candidates)
            .map(|candidate| {
                let uri = build_candidate_uri(target_uri, &candidate);
                async move {
                    let result = self.client.get(&uri).await;
                    (uri, result)
                }
            })
            .buffer_unordered(config.concurrency.max(1));
        futures::pin_mut!(probes);

        while let Some((uri, result)) = probes.next().await {
            self.record(&mut report, &baseline, config, uri, result).await;
        }

        report.cancelled = cancel.is_cancelled();
        info!(
            "Discovery for {} finished: probed={} exists={} absent={} failed={} new={}{}",
            target_uri,
            report.stats.probed,
            report.stats.exists,
            report.stats.absent,
            report.stats.failed,
            report.entities.len(),
            if report.cancelled { " (cancelled)" } else { "" }
        );

        report
    }

    async fn record(
        &self,
        report: &mut DiscoveryReport,
        baseline: &Baseline,
        config: &DiscoveryConfig,
        uri: String,
        result: ProbeResult,
    ) {
        report.stats.probed += 1;

        let kind = match classify(&result, baseline) {
            Classification::Exists(kind) => kind,
            Classification::Absent(reason) => {
                debug!("{} looks like a missing page: {}", uri, reason);
                report.stats.absent += 1;
                return;
            }
            Classification::Error => {
                // Probe failures are candidate-local
                let reason = result.err().map(|e| e.to_string()).unwrap_or_default();
                debug!("Skipping {}: {}", uri, reason);
                report.stats.failed += 1;
                report
                    .warnings
                    .push(DiscoveryError::ProbeFailed { uri, reason });
                return;
            }
        };
        let Ok(response) = result else {
            return;
        };

        report.stats.exists += 1;
        if kind == ExistsKind::Unknown {
            warn!(
                "Don't know this response code? {} ({})",
                response.status_code, uri
            );
            report.warnings.push(DiscoveryError::UnrecognizedStatus {
                uri: uri.clone(),
                status: response.status_code,
            });
        }

        let attributes = uri_attributes(&uri, &response, kind, config.content_excerpt_len);
        match self.store.create(EntityType::Uri, attributes).await {
            Ok(entity) => {
                info!("{}! Creating a page for {}", kind, uri);
                report.entities.push(entity);
            }
            Err(RepositoryError::AlreadyExists(_)) => {
                debug!("{} already known", uri);
                report.stats.duplicates += 1;
            }
            Err(e) => warn!("Unable to store {}: {}", uri, e),
        }
    }
}

/// URI实体的属性：名称、URI、状态码、类型，以及按需保留的内容摘录
pub fn uri_attributes(
    uri: &str,
    response: &ProbeResponse,
    kind: ExistsKind,
    excerpt_len: usize,
) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("name".to_string(), Value::from(uri));
    attributes.insert("uri".to_string(), Value::from(uri));
    attributes.insert(
        "response_code".to_string(),
        Value::from(response.status_code.to_string()),
    );
    attributes.insert("kind".to_string(), Value::from(kind.as_str()));

    if kind.retains_content() {
        let excerpt = &response.body[..response.body.len().min(excerpt_len)];
        attributes.insert(
            "content".to_string(),
            Value::from(String::from_utf8_lossy(excerpt).into_owned()),
        );
    }
    if kind == ExistsKind::Unknown {
        attributes.insert("flagged".to_string(), Value::Bool(true));
    }

    attributes
}
