//! Application bootstrap for tenant CDN provisioning.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection). Frontends build one `AppState` at startup and drive the
//! provisioner through it.

pub mod adapters;

use std::sync::Arc;
use std::time::Duration;

use tenant_cdn_core::error::{CoreError, CoreResult};
use tenant_cdn_core::services::{DistributionProvisioner, DnsOrchestrator, ServiceContext};
use tenant_cdn_core::traits::{DistributionRecordRepository, SuffixSource};
use tenant_cdn_core::types::{DnsConfigurationReport, TenantDistributionRecord};
use tenant_cdn_core::CdnSettings;
use tenant_cdn_provider::{CdnProvider, DnsProvider};

use adapters::InMemoryDistributionRepository;

/// Platform-agnostic application state.
pub struct AppState {
    /// Service context (providers, repository, settings)
    pub ctx: Arc<ServiceContext>,
    /// Distribution provisioner (owns the conflict resolver and DNS orchestrator)
    pub provisioner: DistributionProvisioner,
}

impl AppState {
    /// Run the DNS configuration check and log its findings.
    pub async fn check_configuration(&self) -> DnsConfigurationReport {
        let report = self.provisioner.dns().validate_configuration().await;
        for warning in &report.warnings {
            log::warn!("DNS configuration: {warning}");
        }
        for error in &report.errors {
            log::error!("DNS configuration: {error}");
        }
        if report.is_clean() {
            log::info!("DNS configuration check passed");
        }
        report
    }

    /// All stored tenant records, sorted by tenant id.
    pub async fn list_records(&self) -> CoreResult<Vec<TenantDistributionRecord>> {
        let mut records = self.ctx.distribution_repository.find_all().await?;
        records.sort_by(|a, b| a.tenant_id.cmp(&b.tenant_id));
        Ok(records)
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `cdn_provider`
/// - `dns_provider`
///
/// # Optional
/// - `distribution_repository`: defaults to `InMemoryDistributionRepository`
/// - `settings`: defaults to `CdnSettings::default()` (all features off)
/// - `suffix_source`: defaults to random suffixes
/// - `dns_poll_interval`: propagation poll interval
#[derive(Default)]
pub struct AppStateBuilder {
    cdn_provider: Option<Arc<dyn CdnProvider>>,
    dns_provider: Option<Arc<dyn DnsProvider>>,
    distribution_repository: Option<Arc<dyn DistributionRecordRepository>>,
    settings: Option<CdnSettings>,
    suffix_source: Option<Arc<dyn SuffixSource>>,
    dns_poll_interval: Option<Duration>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cdn_provider(mut self, provider: Arc<dyn CdnProvider>) -> Self {
        self.cdn_provider = Some(provider);
        self
    }

    #[must_use]
    pub fn dns_provider(mut self, provider: Arc<dyn DnsProvider>) -> Self {
        self.dns_provider = Some(provider);
        self
    }

    #[must_use]
    pub fn distribution_repository(mut self, repo: Arc<dyn DistributionRecordRepository>) -> Self {
        self.distribution_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: CdnSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    #[must_use]
    pub fn suffix_source(mut self, source: Arc<dyn SuffixSource>) -> Self {
        self.suffix_source = Some(source);
        self
    }

    #[must_use]
    pub fn dns_poll_interval(mut self, interval: Duration) -> Self {
        self.dns_poll_interval = Some(interval);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if a provider is missing.
    pub fn build(self) -> CoreResult<AppState> {
        let cdn_provider = self
            .cdn_provider
            .ok_or_else(|| CoreError::ValidationError("cdn_provider is required".to_string()))?;
        let dns_provider = self
            .dns_provider
            .ok_or_else(|| CoreError::ValidationError("dns_provider is required".to_string()))?;
        let distribution_repository = self.distribution_repository.unwrap_or_else(|| {
            log::debug!("No distribution repository configured, records are kept in memory");
            Arc::new(InMemoryDistributionRepository::new())
        });

        let mut ctx = ServiceContext::new(
            cdn_provider,
            dns_provider,
            distribution_repository,
            self.settings.unwrap_or_default(),
        );
        if let Some(source) = self.suffix_source {
            ctx = ctx.with_suffix_source(source);
        }
        let ctx = Arc::new(ctx);

        let mut provisioner = DistributionProvisioner::new(Arc::clone(&ctx));
        if let Some(interval) = self.dns_poll_interval {
            provisioner = provisioner.with_dns_orchestrator(
                DnsOrchestrator::new(Arc::clone(&ctx)).with_poll_interval(interval),
            );
        }

        Ok(AppState { ctx, provisioner })
    }
}
