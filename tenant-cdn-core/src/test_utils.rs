//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tenant_cdn_provider::{
    CacheBehavior, CdnProvider, ChangeAction, ChangeInfo, ChangeStatus,
    CreateDistributionRequest, DeploymentState, Distribution, DistributionConfig,
    DistributionPage, DistributionSummary, DnsProvider, DnsRecordSet, DnsRecordType, HostedZone,
    HttpMethod, InvalidationRequest, OriginSpec, ProviderError, RecordChange, RecordSetQuery,
    ResourceTag, Result, VersionedConfig, ViewerProtocol, normalize_domain_name,
};
use tokio::sync::RwLock;

use crate::config::CdnSettings;
use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::services::ownership::{owner_from_conventions, ownership_tags};
use crate::traits::{DistributionRecordRepository, SuffixSource};
use crate::types::TenantDistributionRecord;

pub const TEST_ZONE_ID: &str = "Z123";
pub const TEST_CERTIFICATE: &str = "arn:aws:acm:us-east-1:123:certificate/abc";

// ===== Fixtures =====

/// 构造一个带归属约定的分发列表条目
pub fn summary(id: &str, aliases: &[&str], tenant: &str) -> DistributionSummary {
    DistributionSummary {
        id: id.to_string(),
        arn: format!("arn:aws:cloudfront::123456789012:distribution/{id}"),
        domain_name: format!("{}.cloudfront.net", id.to_ascii_lowercase()),
        aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
        status: DeploymentState::Deployed,
        enabled: true,
        comment: format!("tenant:{tenant}"),
        origin_paths: vec![format!("/tenants/{tenant}")],
    }
}

/// 别名 + DNS 自动化全部开启
pub fn dns_settings() -> CdnSettings {
    CdnSettings {
        custom_domain_enabled: true,
        base_domain: Some("example.com".to_string()),
        dns_automation_enabled: true,
        hosted_zone_id: Some(TEST_ZONE_ID.to_string()),
        certificate_arn: Some(TEST_CERTIFICATE.to_string()),
        origin_domain: "tenant-sites.s3.amazonaws.com".to_string(),
        ..CdnSettings::default()
    }
}

/// 开启别名但 DNS 手动维护
pub fn alias_settings() -> CdnSettings {
    CdnSettings {
        dns_automation_enabled: false,
        hosted_zone_id: None,
        ..dns_settings()
    }
}

fn mock_error_provider() -> String {
    "mock".to_string()
}

// ===== FixedSuffixSource =====

pub struct FixedSuffixSource(pub String);

impl SuffixSource for FixedSuffixSource {
    fn random_suffix(&self) -> String {
        self.0.clone()
    }
}

// ===== MockCdnProvider =====

struct MockDistribution {
    distribution: Distribution,
    version: u32,
    tags: Vec<ResourceTag>,
}

impl MockDistribution {
    fn etag(&self) -> String {
        format!("etag-{}", self.version)
    }

    fn snapshot(&self) -> Distribution {
        Distribution {
            etag: Some(self.etag()),
            ..self.distribution.clone()
        }
    }

    fn summary(&self) -> DistributionSummary {
        let d = &self.distribution;
        DistributionSummary {
            id: d.id.clone(),
            arn: d.arn.clone(),
            domain_name: d.domain_name.clone(),
            aliases: d.config.aliases.clone(),
            status: d.status.clone(),
            enabled: d.config.enabled,
            comment: d.config.comment.clone(),
            origin_paths: vec![d.config.origin.origin_path.clone()],
        }
    }
}

#[derive(Default)]
struct CdnState {
    distributions: Vec<MockDistribution>,
    next_id: u32,
    page_size: Option<usize>,
    fail_listing: bool,
    fail_invalidations: bool,
    create_errors: VecDeque<ProviderError>,
    update_errors: VecDeque<ProviderError>,
    created: Vec<CreateDistributionRequest>,
    create_attempts: usize,
    invalidations: Vec<InvalidationRequest>,
}

fn config_from_summary(summary: &DistributionSummary) -> DistributionConfig {
    DistributionConfig {
        caller_reference: format!("seed-{}", summary.id),
        comment: summary.comment.clone(),
        enabled: summary.enabled,
        aliases: summary.aliases.clone(),
        origin: OriginSpec {
            id: "origin".to_string(),
            domain_name: "tenant-sites.s3.amazonaws.com".to_string(),
            origin_path: summary.origin_paths.first().cloned().unwrap_or_default(),
            origin_access_identity: String::new(),
        },
        cache_behavior: CacheBehavior {
            target_origin_id: "origin".to_string(),
            allowed_methods: vec![HttpMethod::Get, HttpMethod::Head],
            viewer_protocol: ViewerProtocol::RedirectToHttps,
            forward_cookies: false,
            forward_query_string: false,
            compress: true,
            min_ttl: 0,
            default_ttl: 86_400,
            max_ttl: 31_536_000,
        },
        default_root_object: "index.html".to_string(),
        error_documents: Vec::new(),
        certificate_arn: None,
        price_class: "PriceClass_100".to_string(),
    }
}

/// 内存中的 CDN 控制面，支持分页、`ETag` 校验、别名冲突和错误注入
pub struct MockCdnProvider {
    state: RwLock<CdnState>,
}

impl MockCdnProvider {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CdnState::default()),
        }
    }

    /// 以列表条目预置一个分发
    pub async fn insert_summary(&self, summary: DistributionSummary, tags: Vec<ResourceTag>) {
        let distribution = Distribution {
            id: summary.id.clone(),
            arn: summary.arn.clone(),
            domain_name: summary.domain_name.clone(),
            status: summary.status.clone(),
            config: config_from_summary(&summary),
            etag: None,
        };
        self.state.write().await.distributions.push(MockDistribution {
            distribution,
            version: 1,
            tags,
        });
    }

    /// 预置分发，并按 comment 约定打上归属标签
    pub async fn insert_tagged(&self, summary: DistributionSummary) {
        let tags = owner_from_conventions(&summary)
            .map(ownership_tags)
            .unwrap_or_default();
        self.insert_summary(summary, tags).await;
    }

    pub async fn set_page_size(&self, size: usize) {
        self.state.write().await.page_size = Some(size);
    }

    pub async fn fail_listing(&self, fail: bool) {
        self.state.write().await.fail_listing = fail;
    }

    pub async fn fail_invalidations(&self, fail: bool) {
        self.state.write().await.fail_invalidations = fail;
    }

    pub async fn push_create_error(&self, err: ProviderError) {
        self.state.write().await.create_errors.push_back(err);
    }

    pub async fn push_update_error(&self, err: ProviderError) {
        self.state.write().await.update_errors.push_back(err);
    }

    pub async fn remove_distribution(&self, id: &str) {
        self.state
            .write()
            .await
            .distributions
            .retain(|d| d.distribution.id != id);
    }

    pub async fn set_status(&self, id: &str, status: DeploymentState) {
        self.update_entry(id, |d| d.distribution.status = status).await;
    }

    pub async fn set_enabled(&self, id: &str, enabled: bool) {
        self.update_entry(id, |d| d.distribution.config.enabled = enabled)
            .await;
    }

    async fn update_entry(&self, id: &str, f: impl FnOnce(&mut MockDistribution)) {
        let mut state = self.state.write().await;
        if let Some(entry) = state
            .distributions
            .iter_mut()
            .find(|d| d.distribution.id == id)
        {
            f(entry);
        }
    }

    /// 成功创建的次数
    pub async fn create_count(&self) -> usize {
        self.state.read().await.created.len()
    }

    /// 创建调用次数（含失败）
    pub async fn create_attempts(&self) -> usize {
        self.state.read().await.create_attempts
    }

    pub async fn created_requests(&self) -> Vec<CreateDistributionRequest> {
        self.state.read().await.created.clone()
    }

    pub async fn current_config(&self, id: &str) -> Option<DistributionConfig> {
        self.state
            .read()
            .await
            .distributions
            .iter()
            .find(|d| d.distribution.id == id)
            .map(|d| d.distribution.config.clone())
    }

    pub async fn invalidations(&self) -> Vec<InvalidationRequest> {
        self.state.read().await.invalidations.clone()
    }

    fn not_found(id: &str) -> ProviderError {
        ProviderError::DistributionNotFound {
            provider: mock_error_provider(),
            distribution_id: id.to_string(),
            raw_message: None,
        }
    }

    fn alias_taken(state: &CdnState, aliases: &[String], except: Option<&str>) -> Option<ProviderError> {
        aliases.iter().find_map(|alias| {
            state
                .distributions
                .iter()
                .filter(|d| Some(d.distribution.id.as_str()) != except)
                .any(|d| {
                    d.distribution
                        .config
                        .aliases
                        .iter()
                        .any(|a| a.eq_ignore_ascii_case(alias))
                })
                .then(|| ProviderError::AliasConflict {
                    provider: mock_error_provider(),
                    alias: Some(alias.clone()),
                    raw_message: None,
                })
        })
    }
}

#[async_trait]
impl CdnProvider for MockCdnProvider {
    fn id(&self) -> &'static str {
        "mock-cdn"
    }

    async fn list_distributions(&self, marker: Option<&str>) -> Result<DistributionPage> {
        let state = self.state.read().await;
        if state.fail_listing {
            return Err(ProviderError::RateLimited {
                provider: mock_error_provider(),
                raw_message: Some("listing throttled".to_string()),
            });
        }

        let total = state.distributions.len();
        let start = marker.and_then(|m| m.parse::<usize>().ok()).unwrap_or(0).min(total);
        let end = state
            .page_size
            .map_or(total, |size| (start + size).min(total));

        Ok(DistributionPage {
            items: state.distributions[start..end]
                .iter()
                .map(MockDistribution::summary)
                .collect(),
            next_marker: (end < total).then(|| end.to_string()),
        })
    }

    async fn get_distribution(&self, distribution_id: &str) -> Result<Distribution> {
        self.state
            .read()
            .await
            .distributions
            .iter()
            .find(|d| d.distribution.id == distribution_id)
            .map(MockDistribution::snapshot)
            .ok_or_else(|| Self::not_found(distribution_id))
    }

    async fn get_distribution_config(&self, distribution_id: &str) -> Result<VersionedConfig> {
        self.state
            .read()
            .await
            .distributions
            .iter()
            .find(|d| d.distribution.id == distribution_id)
            .map(|d| VersionedConfig {
                config: d.distribution.config.clone(),
                etag: d.etag(),
            })
            .ok_or_else(|| Self::not_found(distribution_id))
    }

    async fn create_distribution(&self, req: &CreateDistributionRequest) -> Result<Distribution> {
        let mut state = self.state.write().await;
        state.create_attempts += 1;
        if let Some(err) = state.create_errors.pop_front() {
            return Err(err);
        }
        if let Some(err) = Self::alias_taken(&state, &req.config.aliases, None) {
            return Err(err);
        }

        state.next_id += 1;
        let n = state.next_id;
        let id = format!("EMOCK{n}");
        let distribution = Distribution {
            arn: format!("arn:aws:cloudfront::123456789012:distribution/{id}"),
            domain_name: format!("d{n}.cloudfront.net"),
            status: DeploymentState::InProgress,
            config: req.config.clone(),
            etag: None,
            id,
        };
        let entry = MockDistribution {
            distribution,
            version: 1,
            tags: req.tags.clone(),
        };
        let snapshot = entry.snapshot();
        state.distributions.push(entry);
        state.created.push(req.clone());
        Ok(snapshot)
    }

    async fn update_distribution(
        &self,
        distribution_id: &str,
        config: &DistributionConfig,
        etag: &str,
    ) -> Result<Distribution> {
        let mut state = self.state.write().await;
        if let Some(err) = state.update_errors.pop_front() {
            return Err(err);
        }
        if let Some(err) = Self::alias_taken(&state, &config.aliases, Some(distribution_id)) {
            return Err(err);
        }

        let entry = state
            .distributions
            .iter_mut()
            .find(|d| d.distribution.id == distribution_id)
            .ok_or_else(|| Self::not_found(distribution_id))?;
        if entry.etag() != etag {
            return Err(ProviderError::PreconditionFailed {
                provider: mock_error_provider(),
                raw_message: Some(format!("expected {}, got {etag}", entry.etag())),
            });
        }
        entry.distribution.config = config.clone();
        entry.version += 1;
        Ok(entry.snapshot())
    }

    async fn create_invalidation(&self, req: &InvalidationRequest) -> Result<String> {
        let mut state = self.state.write().await;
        if state.fail_invalidations {
            return Err(ProviderError::RateLimited {
                provider: mock_error_provider(),
                raw_message: None,
            });
        }
        state.invalidations.push(req.clone());
        Ok(format!("I{}", state.invalidations.len()))
    }

    async fn list_tags(&self, arn: &str) -> Result<Vec<ResourceTag>> {
        Ok(self
            .state
            .read()
            .await
            .distributions
            .iter()
            .find(|d| d.distribution.arn == arn)
            .map(|d| d.tags.clone())
            .unwrap_or_default())
    }
}

// ===== MockDnsProvider =====

#[derive(Default)]
struct DnsState {
    records: BTreeMap<(String, &'static str), DnsRecordSet>,
    change_ids: Vec<String>,
    call_count: usize,
    fail_changes: bool,
    pending_polls: usize,
    poll_errors: VecDeque<ProviderError>,
}

/// 内存中的 DNS 控制面，托管区 `Z123` = `example.com`
pub struct MockDnsProvider {
    state: RwLock<DnsState>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DnsState::default()),
        }
    }

    pub async fn fail_changes(&self, fail: bool) {
        self.state.write().await.fail_changes = fail;
    }

    /// 之后的 `get_change` 先返回 `n` 次 `PENDING`
    pub async fn set_pending_polls(&self, n: usize) {
        self.state.write().await.pending_polls = n;
    }

    /// 之后的 `get_change` 依次返回这些错误
    pub async fn push_poll_error(&self, err: ProviderError) {
        self.state.write().await.poll_errors.push_back(err);
    }

    /// 所有控制面调用次数
    pub async fn call_count(&self) -> usize {
        self.state.read().await.call_count
    }

    /// 已提交的变更批次数
    pub async fn change_count(&self) -> usize {
        self.state.read().await.change_ids.len()
    }

    /// 直接读取记录（不计入调用次数）
    pub async fn record(&self, name: &str, record_type: DnsRecordType) -> Option<DnsRecordSet> {
        self.state
            .read()
            .await
            .records
            .get(&(normalize_domain_name(name), record_type.as_str()))
            .cloned()
    }

    fn invalid(detail: impl Into<String>) -> ProviderError {
        ProviderError::InvalidParameter {
            provider: mock_error_provider(),
            param: "change_batch".to_string(),
            detail: detail.into(),
        }
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock-dns"
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZone> {
        let mut state = self.state.write().await;
        state.call_count += 1;
        if zone_id != TEST_ZONE_ID {
            return Err(ProviderError::HostedZoneNotFound {
                provider: mock_error_provider(),
                zone_id: zone_id.to_string(),
                raw_message: None,
            });
        }
        Ok(HostedZone {
            id: TEST_ZONE_ID.to_string(),
            name: "example.com.".to_string(),
            record_count: Some(i64::try_from(state.records.len()).unwrap_or(i64::MAX)),
        })
    }

    async fn change_record_sets(
        &self,
        _zone_id: &str,
        changes: &[RecordChange],
        _comment: Option<&str>,
    ) -> Result<ChangeInfo> {
        let mut state = self.state.write().await;
        state.call_count += 1;
        if state.fail_changes {
            return Err(Self::invalid("changes rejected"));
        }

        for change in changes {
            let key = (
                normalize_domain_name(&change.record.name),
                change.record.record_type.as_str(),
            );
            match change.action {
                ChangeAction::Upsert => {
                    state.records.insert(key, change.record.clone());
                }
                ChangeAction::Delete => {
                    if state.records.get(&key) != Some(&change.record) {
                        return Err(Self::invalid(format!("{} not found", change.record.name)));
                    }
                    state.records.remove(&key);
                }
            }
        }

        let id = format!("C{}", state.change_ids.len() + 1);
        state.change_ids.push(id.clone());
        Ok(ChangeInfo {
            id,
            status: ChangeStatus::Pending,
            submitted_at: None,
        })
    }

    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo> {
        let mut state = self.state.write().await;
        state.call_count += 1;
        if let Some(err) = state.poll_errors.pop_front() {
            return Err(err);
        }
        if !state.change_ids.iter().any(|id| id == change_id) {
            return Err(Self::invalid(format!("no such change {change_id}")));
        }
        let status = if state.pending_polls > 0 {
            state.pending_polls -= 1;
            ChangeStatus::Pending
        } else {
            ChangeStatus::InSync
        };
        Ok(ChangeInfo {
            id: change_id.to_string(),
            status,
            submitted_at: None,
        })
    }

    async fn list_record_sets(
        &self,
        _zone_id: &str,
        query: &RecordSetQuery,
    ) -> Result<Vec<DnsRecordSet>> {
        let mut state = self.state.write().await;
        state.call_count += 1;
        let start = query
            .start_name
            .as_deref()
            .map(normalize_domain_name)
            .unwrap_or_default();
        let limit = usize::try_from(query.max_items).unwrap_or(0);
        Ok(state
            .records
            .iter()
            .filter(|((name, _), _)| *name >= start)
            .take(limit)
            .map(|(_, record)| record.clone())
            .collect())
    }
}

// ===== MockDistributionRepository =====

pub struct MockDistributionRepository {
    records: RwLock<HashMap<String, TenantDistributionRecord>>,
    /// 如果 Some，save 时返回此错误（用于测试降级路径）
    save_error: RwLock<Option<String>>,
}

impl MockDistributionRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            save_error: RwLock::new(None),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn get(&self, tenant_id: &str) -> Option<TenantDistributionRecord> {
        self.records.read().await.get(tenant_id).cloned()
    }
}

#[async_trait]
impl DistributionRecordRepository for MockDistributionRepository {
    async fn find_by_tenant(&self, tenant_id: &str) -> CoreResult<Option<TenantDistributionRecord>> {
        Ok(self.records.read().await.get(tenant_id).cloned())
    }

    async fn find_all(&self) -> CoreResult<Vec<TenantDistributionRecord>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn save(&self, record: &TenantDistributionRecord) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.records
            .write()
            .await
            .insert(record.tenant_id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, tenant_id: &str) -> CoreResult<()> {
        self.records.write().await.remove(tenant_id);
        Ok(())
    }
}

// ===== Factory =====

/// 一组共享的 mock 依赖
pub struct TestHarness {
    pub cdn: Arc<MockCdnProvider>,
    pub dns: Arc<MockDnsProvider>,
    pub repo: Arc<MockDistributionRepository>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            cdn: Arc::new(MockCdnProvider::new()),
            dns: Arc::new(MockDnsProvider::new()),
            repo: Arc::new(MockDistributionRepository::new()),
        }
    }

    /// 以给定配置创建服务上下文，随机后缀固定为 `abc123`
    pub fn context(&self, settings: CdnSettings) -> Arc<ServiceContext> {
        Arc::new(
            ServiceContext::new(self.cdn.clone(), self.dns.clone(), self.repo.clone(), settings)
                .with_suffix_source(Arc::new(FixedSuffixSource("abc123".to_string()))),
        )
    }
}

/// 只关心 CDN 控制面的测试使用
pub fn create_test_context(cdn: Arc<MockCdnProvider>) -> Arc<ServiceContext> {
    let harness = TestHarness {
        cdn,
        dns: Arc::new(MockDnsProvider::new()),
        repo: Arc::new(MockDistributionRepository::new()),
    };
    harness.context(dns_settings())
}
