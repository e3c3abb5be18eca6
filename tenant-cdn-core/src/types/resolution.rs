use serde::{Deserialize, Serialize};

use tenant_cdn_provider::{DeploymentState, DistributionSummary};

/// 别名冲突检查结果（仅在一次开通流程内使用，不持久化）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasConflict {
    pub alias: String,
    pub has_conflict: bool,
    pub conflicting_distribution_id: Option<String>,
    pub conflicting_status: Option<DeploymentState>,
    /// 占用该别名的分发，用于归属判断
    pub conflicting_distribution: Option<DistributionSummary>,
}

impl AliasConflict {
    pub fn none(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            has_conflict: false,
            conflicting_distribution_id: None,
            conflicting_status: None,
            conflicting_distribution: None,
        }
    }

    pub fn with(alias: impl Into<String>, distribution: DistributionSummary) -> Self {
        Self {
            alias: alias.into(),
            has_conflict: true,
            conflicting_distribution_id: Some(distribution.id.clone()),
            conflicting_status: Some(distribution.status.clone()),
            conflicting_distribution: Some(distribution),
        }
    }
}

/// 冲突处理策略，按优先级排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    NoConflict,
    ReuseExisting,
    AlternativeAlias,
    CdnDomainOnly,
}

impl std::fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NoConflict => "no_conflict",
            Self::ReuseExisting => "reuse_existing",
            Self::AlternativeAlias => "alternative_alias",
            Self::CdnDomainOnly => "cdn_domain_only",
        };
        f.write_str(name)
    }
}

/// 冲突处理结论
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionDecision {
    pub strategy: ResolutionStrategy,
    /// 最终使用的别名，`CdnDomainOnly` 时为 `None`
    pub resulting_alias: Option<String>,
    /// `ReuseExisting` 时为被复用的分发 ID
    pub resulting_distribution_id: Option<String>,
}

impl ResolutionDecision {
    pub fn no_conflict(alias: impl Into<String>) -> Self {
        Self {
            strategy: ResolutionStrategy::NoConflict,
            resulting_alias: Some(alias.into()),
            resulting_distribution_id: None,
        }
    }

    pub fn reuse_existing(alias: impl Into<String>, distribution_id: impl Into<String>) -> Self {
        Self {
            strategy: ResolutionStrategy::ReuseExisting,
            resulting_alias: Some(alias.into()),
            resulting_distribution_id: Some(distribution_id.into()),
        }
    }

    pub fn alternative_alias(alias: impl Into<String>) -> Self {
        Self {
            strategy: ResolutionStrategy::AlternativeAlias,
            resulting_alias: Some(alias.into()),
            resulting_distribution_id: None,
        }
    }

    pub fn cdn_domain_only() -> Self {
        Self {
            strategy: ResolutionStrategy::CdnDomainOnly,
            resulting_alias: None,
            resulting_distribution_id: None,
        }
    }
}
