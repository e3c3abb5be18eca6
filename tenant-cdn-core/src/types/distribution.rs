use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tenant_cdn_provider::{DeploymentState, Distribution, DistributionSummary};

/// 租户分发状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionStatus {
    /// 配置仍在向边缘节点下发
    Provisioning,
    /// 已在全部边缘节点生效
    Deployed,
    /// 已停用（删除流程）
    Disabled,
}

impl DistributionStatus {
    /// 由控制面状态推导；停用的分发一律视为 `Disabled`
    pub fn from_provider(state: &DeploymentState, enabled: bool) -> Self {
        if !enabled {
            return Self::Disabled;
        }
        match state {
            DeploymentState::Deployed => Self::Deployed,
            DeploymentState::InProgress | DeploymentState::Unknown(_) => Self::Provisioning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Provisioning => "Provisioning",
            Self::Deployed => "Deployed",
            Self::Disabled => "Disabled",
        }
    }

    /// 解析持久化的状态字符串，未知值按 `Provisioning` 处理
    pub fn parse(value: &str) -> Self {
        match value {
            "Deployed" => Self::Deployed,
            "Disabled" => Self::Disabled,
            _ => Self::Provisioning,
        }
    }
}

impl std::fmt::Display for DistributionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 租户分发记录
///
/// 以 `tenant_id` 为唯一键，只由 `DistributionProvisioner` 写入。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDistributionRecord {
    pub tenant_id: String,
    pub distribution_id: String,
    /// 控制面分配的域名（如 `d111111abcdef8.cloudfront.net`）
    pub cdn_domain: String,
    /// 绑定的自定义别名
    pub custom_alias: Option<String>,
    pub status: DistributionStatus,
    /// 创建时生成的唯一令牌，同时用作 caller reference 的一部分
    pub unique_token: String,
    /// 最近一次 DNS 变更的引用
    pub dns_change_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TenantDistributionRecord {
    /// 基于刚创建或刚找到的分发构建记录
    pub fn for_distribution(
        tenant_id: impl Into<String>,
        distribution: &Distribution,
        custom_alias: Option<String>,
        unique_token: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            distribution_id: distribution.id.clone(),
            cdn_domain: distribution.domain_name.clone(),
            custom_alias,
            status: DistributionStatus::from_provider(
                &distribution.status,
                distribution.config.enabled,
            ),
            unique_token: unique_token.into(),
            dns_change_ref: None,
            created_at: Utc::now(),
        }
    }

    /// 基于列表条目构建记录（孤儿分发回收）
    pub fn for_summary(
        tenant_id: impl Into<String>,
        summary: &DistributionSummary,
        unique_token: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            distribution_id: summary.id.clone(),
            cdn_domain: summary.domain_name.clone(),
            custom_alias: summary.aliases.first().cloned(),
            status: DistributionStatus::from_provider(&summary.status, summary.enabled),
            unique_token: unique_token.into(),
            dns_change_ref: None,
            created_at: Utc::now(),
        }
    }

    /// 对外主域名：有别名时用别名，否则用控制面域名
    pub fn primary_domain(&self) -> &str {
        self.custom_alias.as_deref().unwrap_or(&self.cdn_domain)
    }

    pub fn deployment_url(&self) -> String {
        format!("https://{}", self.primary_domain())
    }
}

/// `get_or_create` 的返回值
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionResult {
    pub distribution_id: String,
    /// 控制面分配的域名
    pub domain: String,
    pub custom_domain: Option<String>,
    pub deployment_url: String,
    pub status: DistributionStatus,
    /// 记录是否已写入存储；`false` 表示远端已就绪但本地写入失败
    pub persisted: bool,
}

impl ProvisionResult {
    pub fn from_record(record: &TenantDistributionRecord, persisted: bool) -> Self {
        Self {
            distribution_id: record.distribution_id.clone(),
            domain: record.cdn_domain.clone(),
            custom_domain: record.custom_alias.clone(),
            deployment_url: record.deployment_url(),
            status: record.status,
            persisted,
        }
    }
}
