//! 类型定义模块

mod distribution;
mod dns;
mod resolution;

pub use distribution::{DistributionStatus, ProvisionResult, TenantDistributionRecord};
pub use dns::DnsConfigurationReport;
pub use resolution::{AliasConflict, ResolutionDecision, ResolutionStrategy};

// Re-export provider 库的公共类型
pub use tenant_cdn_provider::{
    DeploymentState, Distribution, DistributionConfig, DistributionSummary, DnsRecordSet,
    DnsRecordType, ResourceTag,
};
