//! 业务逻辑服务层

mod conflict_resolver;
mod distribution_provisioner;
mod dns_orchestrator;
pub mod ownership;

pub use conflict_resolver::{ALTERNATIVE_SUFFIXES, ConflictResolver};
pub use distribution_provisioner::{CreationAttempt, DistributionProvisioner, MAX_CREATION_ATTEMPTS};
pub use dns_orchestrator::{DEFAULT_POLL_INTERVAL, DnsOrchestrator};

use std::sync::Arc;

use tenant_cdn_provider::{CdnProvider, DnsProvider};

use crate::config::CdnSettings;
use crate::error::CoreError;
use crate::traits::{DistributionRecordRepository, RandomSuffixSource, SuffixSource};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入控制面客户端和存储实现。
pub struct ServiceContext {
    /// CDN 控制面
    pub cdn_provider: Arc<dyn CdnProvider>,
    /// DNS 控制面
    pub dns_provider: Arc<dyn DnsProvider>,
    /// 租户分发记录仓库
    pub distribution_repository: Arc<dyn DistributionRecordRepository>,
    /// 别名随机后缀来源
    pub suffix_source: Arc<dyn SuffixSource>,
    /// 开通配置
    pub settings: CdnSettings,
}

impl ServiceContext {
    /// 创建服务上下文，随机后缀使用默认实现
    #[must_use]
    pub fn new(
        cdn_provider: Arc<dyn CdnProvider>,
        dns_provider: Arc<dyn DnsProvider>,
        distribution_repository: Arc<dyn DistributionRecordRepository>,
        settings: CdnSettings,
    ) -> Self {
        Self {
            cdn_provider,
            dns_provider,
            distribution_repository,
            suffix_source: Arc::new(RandomSuffixSource),
            settings,
        }
    }

    /// 替换随机后缀来源
    #[must_use]
    pub fn with_suffix_source(mut self, suffix_source: Arc<dyn SuffixSource>) -> Self {
        self.suffix_source = suffix_source;
        self
    }
}

/// 按错误是否"预期"选择日志级别
pub(crate) fn log_core_error(operation: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{operation}: {err}");
    } else {
        log::error!("{operation}: {err}");
    }
}
