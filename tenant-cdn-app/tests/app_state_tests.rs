#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and `AppState`.

use std::sync::Arc;

use async_trait::async_trait;
use tenant_cdn_app::AppStateBuilder;
use tenant_cdn_app::adapters::InMemoryDistributionRepository;
use tenant_cdn_core::CdnSettings;
use tenant_cdn_core::error::CoreError;
use tenant_cdn_core::traits::DistributionRecordRepository;
use tenant_cdn_core::types::DistributionStatus;
use tenant_cdn_provider::{
    CdnProvider, ChangeInfo, ChangeStatus, CreateDistributionRequest, DeploymentState,
    Distribution, DistributionConfig, DistributionPage, DistributionSummary, DnsProvider,
    DnsRecordSet, HostedZone, InvalidationRequest, ProviderError, RecordChange, RecordSetQuery,
    ResourceTag, Result, VersionedConfig,
};
use tokio::sync::RwLock;

// ===== Stub Providers =====

/// Minimal CDN control plane: keeps created distributions in memory.
#[derive(Default)]
struct StubCdnProvider {
    distributions: RwLock<Vec<(Distribution, Vec<ResourceTag>)>>,
}

impl StubCdnProvider {
    async fn count(&self) -> usize {
        self.distributions.read().await.len()
    }

    fn not_found(id: &str) -> ProviderError {
        ProviderError::DistributionNotFound {
            provider: "stub".to_string(),
            distribution_id: id.to_string(),
            raw_message: None,
        }
    }
}

#[async_trait]
impl CdnProvider for StubCdnProvider {
    fn id(&self) -> &'static str {
        "stub"
    }

    async fn list_distributions(&self, _marker: Option<&str>) -> Result<DistributionPage> {
        let items = self
            .distributions
            .read()
            .await
            .iter()
            .map(|(d, _)| DistributionSummary {
                id: d.id.clone(),
                arn: d.arn.clone(),
                domain_name: d.domain_name.clone(),
                aliases: d.config.aliases.clone(),
                status: d.status.clone(),
                enabled: d.config.enabled,
                comment: d.config.comment.clone(),
                origin_paths: vec![d.config.origin.origin_path.clone()],
            })
            .collect();
        Ok(DistributionPage {
            items,
            next_marker: None,
        })
    }

    async fn get_distribution(&self, distribution_id: &str) -> Result<Distribution> {
        self.distributions
            .read()
            .await
            .iter()
            .find(|(d, _)| d.id == distribution_id)
            .map(|(d, _)| d.clone())
            .ok_or_else(|| Self::not_found(distribution_id))
    }

    async fn get_distribution_config(&self, distribution_id: &str) -> Result<VersionedConfig> {
        let distribution = self.get_distribution(distribution_id).await?;
        Ok(VersionedConfig {
            config: distribution.config,
            etag: "etag".to_string(),
        })
    }

    async fn create_distribution(&self, req: &CreateDistributionRequest) -> Result<Distribution> {
        let mut distributions = self.distributions.write().await;
        let n = distributions.len() + 1;
        let distribution = Distribution {
            id: format!("ESTUB{n}"),
            arn: format!("arn:aws:cloudfront::000000000000:distribution/ESTUB{n}"),
            domain_name: format!("d{n}.cloudfront.net"),
            status: DeploymentState::Deployed,
            config: req.config.clone(),
            etag: Some("etag".to_string()),
        };
        distributions.push((distribution.clone(), req.tags.clone()));
        Ok(distribution)
    }

    async fn update_distribution(
        &self,
        distribution_id: &str,
        config: &DistributionConfig,
        _etag: &str,
    ) -> Result<Distribution> {
        let mut distributions = self.distributions.write().await;
        let (distribution, _) = distributions
            .iter_mut()
            .find(|(d, _)| d.id == distribution_id)
            .ok_or_else(|| Self::not_found(distribution_id))?;
        distribution.config = config.clone();
        Ok(distribution.clone())
    }

    async fn create_invalidation(&self, _req: &InvalidationRequest) -> Result<String> {
        Ok("ISTUB1".to_string())
    }

    async fn list_tags(&self, arn: &str) -> Result<Vec<ResourceTag>> {
        Ok(self
            .distributions
            .read()
            .await
            .iter()
            .find(|(d, _)| d.arn == arn)
            .map(|(_, tags)| tags.clone())
            .unwrap_or_default())
    }
}

/// DNS control plane with a single empty zone.
struct StubDnsProvider;

#[async_trait]
impl DnsProvider for StubDnsProvider {
    fn id(&self) -> &'static str {
        "stub"
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZone> {
        Ok(HostedZone {
            id: zone_id.to_string(),
            name: "example.com".to_string(),
            record_count: Some(2),
        })
    }

    async fn change_record_sets(
        &self,
        _zone_id: &str,
        _changes: &[RecordChange],
        _comment: Option<&str>,
    ) -> Result<ChangeInfo> {
        Ok(ChangeInfo {
            id: "C1".to_string(),
            status: ChangeStatus::InSync,
            submitted_at: None,
        })
    }

    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo> {
        Ok(ChangeInfo {
            id: change_id.to_string(),
            status: ChangeStatus::InSync,
            submitted_at: None,
        })
    }

    async fn list_record_sets(
        &self,
        _zone_id: &str,
        _query: &RecordSetQuery,
    ) -> Result<Vec<DnsRecordSet>> {
        Ok(Vec::new())
    }
}

fn settings() -> CdnSettings {
    CdnSettings {
        origin_domain: "tenant-sites.s3.amazonaws.com".to_string(),
        ..CdnSettings::default()
    }
}

// ===== Builder =====

#[test]
fn build_without_cdn_provider_fails() {
    let result = AppStateBuilder::new()
        .dns_provider(Arc::new(StubDnsProvider))
        .build();
    assert!(matches!(result, Err(CoreError::ValidationError(msg)) if msg.contains("cdn_provider")));
}

#[test]
fn build_without_dns_provider_fails() {
    let result = AppStateBuilder::new()
        .cdn_provider(Arc::new(StubCdnProvider::default()))
        .build();
    assert!(matches!(result, Err(CoreError::ValidationError(msg)) if msg.contains("dns_provider")));
}

#[tokio::test]
async fn default_repository_keeps_records_in_memory() {
    let cdn = Arc::new(StubCdnProvider::default());
    let state = AppStateBuilder::new()
        .cdn_provider(cdn.clone())
        .dns_provider(Arc::new(StubDnsProvider))
        .settings(settings())
        .build()
        .unwrap();

    let first = state.provisioner.get_or_create("acme").await.unwrap();
    let second = state.provisioner.get_or_create("acme").await.unwrap();

    assert_eq!(first.distribution_id, second.distribution_id);
    assert!(first.persisted);
    assert_eq!(first.status, DistributionStatus::Deployed);
    assert_eq!(cdn.count().await, 1);
    assert_eq!(state.list_records().await.unwrap().len(), 1);
}

#[tokio::test]
async fn injected_repository_is_used() {
    let repo = Arc::new(InMemoryDistributionRepository::new());
    let state = AppStateBuilder::new()
        .cdn_provider(Arc::new(StubCdnProvider::default()))
        .dns_provider(Arc::new(StubDnsProvider))
        .distribution_repository(repo.clone())
        .settings(settings())
        .build()
        .unwrap();

    state.provisioner.get_or_create("zeta").await.unwrap();
    state.provisioner.get_or_create("acme").await.unwrap();

    let ids: Vec<_> = state
        .list_records()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.tenant_id)
        .collect();
    assert_eq!(ids, vec!["acme", "zeta"]);
    assert!(repo.find_by_tenant("acme").await.unwrap().is_some());
}

// ===== Configuration check =====

#[tokio::test]
async fn configuration_check_reports_disabled_dns() {
    let state = AppStateBuilder::new()
        .cdn_provider(Arc::new(StubCdnProvider::default()))
        .dns_provider(Arc::new(StubDnsProvider))
        .build()
        .unwrap();

    let report = state.check_configuration().await;
    assert!(!report.enabled);
    assert!(report.errors.is_empty());
    assert_eq!(report.warnings.len(), 1);
}

#[tokio::test]
async fn configuration_check_probes_hosted_zone() {
    let state = AppStateBuilder::new()
        .cdn_provider(Arc::new(StubCdnProvider::default()))
        .dns_provider(Arc::new(StubDnsProvider))
        .settings(CdnSettings {
            custom_domain_enabled: true,
            base_domain: Some("sites.example.com".to_string()),
            dns_automation_enabled: true,
            hosted_zone_id: Some("Z123".to_string()),
            certificate_arn: Some("arn:aws:acm:us-east-1:000000000000:certificate/x".to_string()),
            ..settings()
        })
        .build()
        .unwrap();

    let report = state.check_configuration().await;
    assert!(report.enabled);
    assert!(report.is_clean());
}
