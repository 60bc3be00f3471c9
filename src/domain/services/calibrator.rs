// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::baseline::Baseline;
use crate::engines::traits::ProbeClient;
use crate::utils::errors::DiscoveryError;
use crate::utils::url_utils::build_candidate_uri;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// 基线校准器
///
/// 探测一个几乎不可能存在的资源，记录目标表达“不存在”的方式
pub struct BaselineCalibrator<P: ProbeClient> {
    client: Arc<P>,
}

impl<P: ProbeClient> BaselineCalibrator<P> {
    pub fn new(client: Arc<P>) -> Self {
        Self { client }
    }

    /// 校准基线
    ///
    /// # 参数
    ///
    /// * `base_uri` - 目标基础URI
    ///
    /// # 返回值
    ///
    /// * `Ok(Baseline)` - 校准得到的基线
    /// * `Err(DiscoveryError::CalibrationFailed)` - 校准探测失败
    pub async fn calibrate(&self, base_uri: &str) -> Result<Baseline, DiscoveryError> {
        let probe_uri = missing_resource_uri(base_uri);

        match self.client.get(&probe_uri).await {
            Ok(response) => {
                let baseline = Baseline::from_probe(&response);
                info!(
                    "Missing page test for {}: {} (status {})",
                    base_uri,
                    baseline.mode(),
                    response.status_code
                );
                Ok(baseline)
            }
            Err(e) => {
                error!("Unable to connect to site {}: {}", base_uri, e);
                Err(DiscoveryError::CalibrationFailed {
                    uri: base_uri.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// 构造一个随机的、几乎不可能存在的资源URI
pub fn missing_resource_uri(base_uri: &str) -> String {
    build_candidate_uri(base_uri, &Uuid::new_v4().simple().to_string())
}
