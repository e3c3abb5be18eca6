use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    ChangeInfo, CreateDistributionRequest, Distribution, DistributionConfig, DistributionPage,
    DistributionSummary, DnsRecordSet, DnsRecordType, HostedZone, InvalidationRequest,
    RecordChange, RecordSetQuery, ResourceTag, VersionedConfig,
};

/// 原始 API 错误（内部使用）
#[cfg(feature = "aws")]
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（如 `NoSuchDistribution`）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

#[cfg(feature = "aws")]
impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: Option<&str>, message: Option<&str>) -> Self {
        Self {
            code: code.map(str::to_string),
            message: message.unwrap_or("Unknown error").to_string(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[cfg(feature = "aws")]
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 分发 ID（用于 `DistributionNotFound`）
    pub distribution_id: Option<String>,
    /// 托管区 ID（用于 `HostedZoneNotFound`）
    pub zone_id: Option<String>,
    /// 别名（用于 `AliasConflict`）
    pub alias: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
#[cfg(feature = "aws")]
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> crate::ProviderError;

    /// 快捷方法：请求构建失败
    fn build_error(&self, detail: impl ToString) -> crate::ProviderError {
        crate::ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：响应缺字段
    fn parse_error(&self, detail: impl ToString) -> crate::ProviderError {
        crate::ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> crate::ProviderError {
        crate::ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// CDN 控制面 Trait
#[async_trait]
pub trait CdnProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 列出分发（按 marker 分页）
    async fn list_distributions(&self, marker: Option<&str>) -> Result<DistributionPage>;

    /// 获取分发详情
    ///
    /// 分发不存在时返回 `ProviderError::DistributionNotFound`。
    async fn get_distribution(&self, distribution_id: &str) -> Result<Distribution>;

    /// 获取分发配置及其 `ETag`
    async fn get_distribution_config(&self, distribution_id: &str) -> Result<VersionedConfig>;

    /// 创建分发，并在创建后打上 `req.tags`
    async fn create_distribution(&self, req: &CreateDistributionRequest) -> Result<Distribution>;

    /// 以 `ETag` 做乐观并发控制更新分发配置
    async fn update_distribution(
        &self,
        distribution_id: &str,
        config: &DistributionConfig,
        etag: &str,
    ) -> Result<Distribution>;

    /// 创建缓存失效请求，返回失效 ID
    async fn create_invalidation(&self, req: &InvalidationRequest) -> Result<String>;

    /// 获取资源标签
    async fn list_tags(&self, arn: &str) -> Result<Vec<ResourceTag>>;

    /// 列出全部分发
    ///
    /// 默认实现沿 `next_marker` 逐页拉取直到结束。任何一页失败都会原样返回错误。
    async fn list_all_distributions(&self) -> Result<Vec<DistributionSummary>> {
        let mut all = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let page = self.list_distributions(marker.as_deref()).await?;
            all.extend(page.items);
            match page.next_marker {
                Some(next) if !next.is_empty() => marker = Some(next),
                _ => break,
            }
        }

        Ok(all)
    }
}

/// DNS 控制面 Trait
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取托管区信息
    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZone>;

    /// 批量提交记录变更
    async fn change_record_sets(
        &self,
        zone_id: &str,
        changes: &[RecordChange],
        comment: Option<&str>,
    ) -> Result<ChangeInfo>;

    /// 查询变更状态
    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo>;

    /// 列出记录集
    async fn list_record_sets(
        &self,
        zone_id: &str,
        query: &RecordSetQuery,
    ) -> Result<Vec<DnsRecordSet>>;

    /// 精确查找单个记录集
    ///
    /// 默认实现从 `name` 开始列出一条记录并做名称/类型精确比对，
    /// 因为列表接口返回的是"从该名称起"的记录而不是精确匹配。
    async fn find_record_set(
        &self,
        zone_id: &str,
        name: &str,
        record_type: DnsRecordType,
    ) -> Result<Option<DnsRecordSet>> {
        let query = RecordSetQuery {
            start_name: Some(name.to_string()),
            record_type: Some(record_type),
            max_items: 1,
        };
        let wanted = crate::providers::common::normalize_domain_name(name);
        let records = self.list_record_sets(zone_id, &query).await?;
        Ok(records.into_iter().find(|r| {
            r.record_type == record_type
                && crate::providers::common::normalize_domain_name(&r.name) == wanted
        }))
    }
}
