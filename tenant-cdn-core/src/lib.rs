//! Tenant CDN Core Library
//!
//! Provides the provisioning logic for per-tenant CDN delivery endpoints:
//! - Alias conflict resolution across the distribution fleet (Conflict Resolver)
//! - Alias CNAME management and propagation polling (DNS Orchestrator)
//! - Create-or-reuse, cache invalidation and teardown (Distribution Provisioner)
//!
//! The control planes and the record store are reached through traits, so the
//! same services run against AWS, `SQLite` or in-memory test doubles.

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::CdnSettings;
pub use error::{CoreError, CoreResult};
pub use services::{ConflictResolver, DistributionProvisioner, DnsOrchestrator, ServiceContext};
pub use traits::{DistributionRecordRepository, RandomSuffixSource, SuffixSource};
