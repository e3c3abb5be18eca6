//! # tenant-cdn-provider
//!
//! Control-plane abstraction for per-tenant content delivery endpoints: a CDN
//! control plane (distributions, aliases, invalidations, tags) and a DNS
//! control plane (hosted zones, record-set changes, change propagation).
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Trait |
//! |----------|-------------|-------|
//! | [Amazon CloudFront](https://aws.amazon.com/cloudfront/) | `aws` | [`CdnProvider`] |
//! | [Amazon Route 53](https://aws.amazon.com/route53/) | `aws` | [`DnsProvider`] |
//!
//! ## Feature Flags
//!
//! - **`aws`**: Enable the CloudFront and Route 53 implementations and
//!   [`create_aws_providers`]. Off by default: the traits and types alone are
//!   enough for orchestration logic and its tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tenant_cdn_provider::{create_aws_providers, DnsProvider, DnsRecordSet, DnsRecordType};
//!
//! let providers = create_aws_providers(None).await;
//! let existing = providers
//!     .dns
//!     .find_record_set("Z123", "acme.example.com", DnsRecordType::Cname)
//!     .await?;
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Variants
//! of interest to callers:
//!
//! - [`ProviderError::AliasConflict`] / [`ProviderError::AliasValidation`]: the
//!   control plane refused an alias binding ([`ProviderError::is_alias_rejection`])
//! - [`ProviderError::DistributionNotFound`]: the distribution is gone
//! - [`ProviderError::RateLimited`]: throttled ([`ProviderError::is_retryable`])

mod error;
#[cfg(feature = "aws")]
mod factory;
mod providers;
mod traits;
mod types;

// Re-export error types
pub use error::{ProviderError, Result};

#[cfg(feature = "aws")]
pub use factory::{AwsProviders, create_aws_providers};

pub use traits::{CdnProvider, DnsProvider};

pub use types::{
    CacheBehavior, ChangeAction, ChangeInfo, ChangeStatus, CreateDistributionRequest,
    DeploymentState, Distribution, DistributionConfig, DistributionPage, DistributionSummary,
    DnsRecordSet, DnsRecordType, ErrorDocument, HostedZone, HttpMethod, InvalidationRequest,
    OriginSpec, RecordChange, RecordSetQuery, ResourceTag, VersionedConfig, ViewerProtocol,
};

pub use providers::common::{bare_change_id, bare_zone_id, normalize_domain_name, to_fqdn};

#[cfg(feature = "aws")]
pub use providers::{CloudFrontProvider, Route53Provider};
