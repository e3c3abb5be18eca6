//! 租户分发开通服务
//!
//! 编排 CDN 控制面、DNS 控制面和记录存储三方状态。三者之间没有事务，
//! 每一步失败都不能破坏下一次调用：
//! - 本地记录指向已不存在的分发时清除记录并重新创建
//! - 远端创建成功但本地写入失败时返回降级结果，分发带有归属标签，
//!   下一次调用会在创建前扫描并认领它
//! - 别名不可用时退化为只使用控制面域名

use std::sync::Arc;

use futures::future::join_all;
use tenant_cdn_provider::{
    CacheBehavior, CreateDistributionRequest, Distribution, DistributionConfig,
    DistributionSummary, ErrorDocument, HttpMethod, InvalidationRequest, OriginSpec,
    ProviderError, ViewerProtocol,
};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::services::ownership::{
    is_owned_by, owner_from_conventions, ownership_comment, ownership_tags, tenant_origin_path,
};
use crate::services::{ConflictResolver, DnsOrchestrator, ServiceContext, log_core_error};
use crate::types::{
    DistributionStatus, ProvisionResult, ResolutionStrategy, TenantDistributionRecord,
};

/// 创建尝试列表的长度上限
pub const MAX_CREATION_ATTEMPTS: usize = 3;

/// 默认错误页（相对租户源站路径）
const CURRENT_INDEX_DOCUMENT: &str = "/deployments/current/index.html";
const ORIGIN_ID_PREFIX: &str = "tenant-origin-";
const MIN_TENANT_ID_LEN: usize = 3;
const MAX_TENANT_ID_LEN: usize = 63;

/// 平台保留的子域名标签，不能作为租户 ID
pub const RESERVED_TENANT_IDS: [&str; 5] = ["www", "api", "admin", "cdn", "mail"];

/// 一次创建尝试
///
/// 尝试按顺序执行，只有别名/DNS 校验类拒绝会进入下一个尝试。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationAttempt {
    /// 创建分发后写入 CNAME 并绑定别名
    WithAlias(String),
    /// 只使用控制面分配的域名
    WithoutAlias,
}

impl CreationAttempt {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WithAlias(_) => "with-alias",
            Self::WithoutAlias => "without-alias",
        }
    }

    /// 由别名计划生成有序尝试列表，最后一项总是 `WithoutAlias`
    pub fn plan(alias: Option<String>) -> Vec<Self> {
        let mut attempts = Vec::with_capacity(MAX_CREATION_ATTEMPTS);
        if let Some(alias) = alias {
            attempts.push(Self::WithAlias(alias));
        }
        attempts.push(Self::WithoutAlias);
        attempts.truncate(MAX_CREATION_ATTEMPTS);
        attempts
    }
}

/// 一次成功尝试的产物
struct BoundDistribution {
    distribution: Distribution,
    alias: Option<String>,
    dns_change_ref: Option<String>,
}

/// 租户分发开通服务
pub struct DistributionProvisioner {
    ctx: Arc<ServiceContext>,
    resolver: ConflictResolver,
    dns: DnsOrchestrator,
}

impl DistributionProvisioner {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            resolver: ConflictResolver::new(ctx.clone()),
            dns: DnsOrchestrator::new(ctx.clone()),
            ctx,
        }
    }

    /// 替换 DNS 编排器（调整轮询间隔等）
    #[must_use]
    pub fn with_dns_orchestrator(mut self, dns: DnsOrchestrator) -> Self {
        self.dns = dns;
        self
    }

    pub fn dns(&self) -> &DnsOrchestrator {
        &self.dns
    }

    pub fn resolver(&self) -> &ConflictResolver {
        &self.resolver
    }

    // ===== 开通 =====

    /// 获取或创建租户分发
    ///
    /// 幂等：已有记录且远端分发仍存在时直接返回，不会重复创建。
    /// 已停用的分发会被重新启用并恢复别名 CNAME。
    pub async fn get_or_create(&self, tenant_id: &str) -> CoreResult<ProvisionResult> {
        let tenant_id = normalize_tenant_id(tenant_id)?;

        if let Some(record) = self
            .ctx
            .distribution_repository
            .find_by_tenant(&tenant_id)
            .await?
            && let Some((record, persisted)) = self.revalidate(record).await?
        {
            if record.status == DistributionStatus::Disabled {
                return self.reactivate(record).await;
            }
            return Ok(ProvisionResult::from_record(&record, persisted));
        }

        if let Some(result) = self.recover_orphan(&tenant_id).await? {
            return Ok(result);
        }

        self.create(&tenant_id).await
    }

    /// 按控制面状态刷新租户记录
    ///
    /// 没有记录返回 `None`；远端分发已不存在时清除记录并返回 `None`。
    pub async fn refresh_status(&self, tenant_id: &str) -> CoreResult<Option<ProvisionResult>> {
        let tenant_id = normalize_tenant_id(tenant_id)?;
        match self
            .ctx
            .distribution_repository
            .find_by_tenant(&tenant_id)
            .await?
        {
            Some(record) => Ok(self
                .revalidate(record)
                .await?
                .map(|(record, persisted)| ProvisionResult::from_record(&record, persisted))),
            None => Ok(None),
        }
    }

    /// 以控制面为准校验本地记录，返回更新后的记录和是否已写入
    async fn revalidate(
        &self,
        mut record: TenantDistributionRecord,
    ) -> CoreResult<Option<(TenantDistributionRecord, bool)>> {
        match self
            .ctx
            .cdn_provider
            .get_distribution(&record.distribution_id)
            .await
        {
            Ok(distribution) => {
                let status = DistributionStatus::from_provider(
                    &distribution.status,
                    distribution.config.enabled,
                );
                if status == record.status {
                    return Ok(Some((record, true)));
                }
                log::info!(
                    "Tenant {} distribution {}: {} -> {status}",
                    record.tenant_id,
                    record.distribution_id,
                    record.status
                );
                record.status = status;
                let persisted = self.persist(&record).await;
                Ok(Some((record, persisted)))
            }
            Err(e) if e.is_not_found() => {
                log::warn!(
                    "Distribution {} of tenant {} no longer exists, purging local record",
                    record.distribution_id,
                    record.tenant_id
                );
                if let Err(err) = self
                    .ctx
                    .distribution_repository
                    .delete(&record.tenant_id)
                    .await
                {
                    log_core_error("Failed to purge stale record", &err);
                }
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 重新启用已停用的租户分发，并恢复别名 CNAME
    async fn reactivate(
        &self,
        mut record: TenantDistributionRecord,
    ) -> CoreResult<ProvisionResult> {
        let distribution = self
            .set_enabled(&record.distribution_id, true)
            .await
            .map_err(|e| CoreError::ProvisioningFailed {
                tenant_id: record.tenant_id.clone(),
                attempt: "reactivate".to_string(),
                error: e,
            })?;
        log::info!(
            "Distribution {} of tenant {} re-enabled",
            record.distribution_id,
            record.tenant_id
        );

        record.status =
            DistributionStatus::from_provider(&distribution.status, distribution.config.enabled);
        if let Some(alias) = &record.custom_alias {
            record.dns_change_ref = self.dns.upsert_alias(alias, &record.cdn_domain).await;
        }
        let persisted = self.persist(&record).await;
        Ok(ProvisionResult::from_record(&record, persisted))
    }

    /// 认领带有本租户归属标记、但没有本地记录的分发
    ///
    /// 先按 comment / 源站路径约定筛选，再逐个以标签确认。
    async fn recover_orphan(&self, tenant_id: &str) -> CoreResult<Option<ProvisionResult>> {
        let cdn = self.ctx.cdn_provider.as_ref();
        let candidates: Vec<DistributionSummary> = cdn
            .list_all_distributions()
            .await?
            .into_iter()
            .filter(|d| {
                d.enabled
                    && owner_from_conventions(d).is_some_and(|o| o.eq_ignore_ascii_case(tenant_id))
            })
            .collect();
        if candidates.is_empty() {
            return Ok(None);
        }

        let confirmed = join_all(candidates.iter().map(|d| is_owned_by(cdn, d, tenant_id))).await;
        let mut owned: Vec<&DistributionSummary> = candidates
            .iter()
            .zip(confirmed)
            .filter_map(|(d, ok)| ok.then_some(d))
            .collect();
        // 已绑定别名的优先
        owned.sort_by_key(|d| d.aliases.is_empty());

        let Some(summary) = owned.first() else {
            return Ok(None);
        };
        if owned.len() > 1 {
            log::warn!(
                "Tenant {tenant_id} owns {} distributions, adopting {}",
                owned.len(),
                summary.id
            );
        }
        log::info!(
            "Adopting distribution {} for tenant {tenant_id} (no local record)",
            summary.id
        );

        // 上一次开通在绑定别名前中断：重新走别名流程
        if summary.aliases.is_empty()
            && let Some(desired) = self.ctx.settings.desired_alias(tenant_id)
        {
            return self.rebind_orphan(tenant_id, &summary.id, &desired).await.map(Some);
        }

        let record = TenantDistributionRecord::for_summary(tenant_id, summary, new_token());
        let persisted = self.persist(&record).await;
        Ok(Some(ProvisionResult::from_record(&record, persisted)))
    }

    /// 为认领的无别名分发重新解析并绑定别名
    async fn rebind_orphan(
        &self,
        tenant_id: &str,
        distribution_id: &str,
        desired: &str,
    ) -> CoreResult<ProvisionResult> {
        let decision = self.resolver.resolve_alias(tenant_id, desired).await?;
        log::info!("Alias resolution for tenant {tenant_id}: {}", decision.strategy);
        if decision.strategy == ResolutionStrategy::ReuseExisting
            && let Some(id) = &decision.resulting_distribution_id
        {
            return self
                .adopt_existing(tenant_id, id, decision.resulting_alias.clone())
                .await;
        }

        let distribution = self
            .ctx
            .cdn_provider
            .get_distribution(distribution_id)
            .await?;
        let mut last_rejection: Option<(&'static str, ProviderError)> = None;
        for attempt in CreationAttempt::plan(decision.resulting_alias) {
            match self.run_attempt(&attempt, &distribution).await {
                Ok(bound) => return Ok(self.finish(tenant_id, bound, new_token()).await),
                Err(e) if e.is_alias_rejection() => {
                    log::warn!("Attempt {} rejected for tenant {tenant_id}: {e}", attempt.name());
                    last_rejection = Some((attempt.name(), e));
                }
                Err(e) => return Err(provisioning_failed(tenant_id, &attempt, e)),
            }
        }
        Err(exhausted(tenant_id, last_rejection))
    }

    async fn create(&self, tenant_id: &str) -> CoreResult<ProvisionResult> {
        let alias = match self.ctx.settings.desired_alias(tenant_id) {
            None => None,
            Some(desired) => {
                let decision = self.resolver.resolve_alias(tenant_id, &desired).await?;
                log::info!("Alias resolution for tenant {tenant_id}: {}", decision.strategy);
                if decision.strategy == ResolutionStrategy::ReuseExisting
                    && let Some(id) = &decision.resulting_distribution_id
                {
                    return self
                        .adopt_existing(tenant_id, id, decision.resulting_alias.clone())
                        .await;
                }
                decision.resulting_alias
            }
        };

        let unique_token = new_token();
        let mut created: Option<Distribution> = None;
        let mut last_rejection: Option<(&'static str, ProviderError)> = None;

        for attempt in CreationAttempt::plan(alias) {
            let distribution = match &created {
                Some(d) => d.clone(),
                None => match self.create_distribution(tenant_id, &unique_token).await {
                    Ok(d) => {
                        log::info!(
                            "Created distribution {} ({}) for tenant {tenant_id}",
                            d.id,
                            d.domain_name
                        );
                        created = Some(d.clone());
                        d
                    }
                    Err(e) if e.is_alias_rejection() => {
                        log::warn!("Attempt {} rejected for tenant {tenant_id}: {e}", attempt.name());
                        last_rejection = Some((attempt.name(), e));
                        continue;
                    }
                    Err(e) => return Err(provisioning_failed(tenant_id, &attempt, e)),
                },
            };

            match self.run_attempt(&attempt, &distribution).await {
                Ok(bound) => return Ok(self.finish(tenant_id, bound, unique_token).await),
                Err(e) if e.is_alias_rejection() => {
                    log::warn!("Attempt {} rejected for tenant {tenant_id}: {e}", attempt.name());
                    last_rejection = Some((attempt.name(), e));
                }
                Err(e) => return Err(provisioning_failed(tenant_id, &attempt, e)),
            }
        }

        Err(exhausted(tenant_id, last_rejection))
    }

    async fn run_attempt(
        &self,
        attempt: &CreationAttempt,
        distribution: &Distribution,
    ) -> Result<BoundDistribution, ProviderError> {
        match attempt {
            CreationAttempt::WithoutAlias => Ok(BoundDistribution {
                distribution: distribution.clone(),
                alias: None,
                dns_change_ref: None,
            }),
            CreationAttempt::WithAlias(alias) => self.bind_alias(alias, distribution).await,
        }
    }

    /// 写入 CNAME 后再把别名绑到分发上
    async fn bind_alias(
        &self,
        alias: &str,
        distribution: &Distribution,
    ) -> Result<BoundDistribution, ProviderError> {
        let dns_change_ref = self
            .dns
            .upsert_alias(alias, &distribution.domain_name)
            .await;
        if self.dns.is_enabled() && dns_change_ref.is_none() {
            return Err(ProviderError::AliasValidation {
                provider: self.ctx.dns_provider.id().to_string(),
                raw_message: Some(format!("CNAME {alias} could not be written")),
            });
        }

        match self.attach_alias(&distribution.id, alias).await {
            Ok(updated) => Ok(BoundDistribution {
                distribution: updated,
                alias: Some(alias.to_string()),
                dns_change_ref,
            }),
            Err(e) => {
                if dns_change_ref.is_some()
                    && let Err(err) = self
                        .dns
                        .delete_alias(alias, &distribution.domain_name)
                        .await
                {
                    log_core_error(&format!("Failed to remove CNAME {alias}"), &err);
                }
                Err(e)
            }
        }
    }

    /// 以 `ETag` 更新分发配置，加入别名和证书
    async fn attach_alias(
        &self,
        distribution_id: &str,
        alias: &str,
    ) -> Result<Distribution, ProviderError> {
        let cdn = &self.ctx.cdn_provider;
        let mut versioned = cdn.get_distribution_config(distribution_id).await?;
        if !versioned
            .config
            .aliases
            .iter()
            .any(|a| a.eq_ignore_ascii_case(alias))
        {
            versioned.config.aliases.push(alias.to_string());
        }
        versioned.config.certificate_arn = self.ctx.settings.certificate_arn.clone();

        let updated = cdn
            .update_distribution(distribution_id, &versioned.config, &versioned.etag)
            .await?;
        log::info!("Alias {alias} attached to distribution {distribution_id}");
        Ok(updated)
    }

    async fn create_distribution(
        &self,
        tenant_id: &str,
        unique_token: &str,
    ) -> Result<Distribution, ProviderError> {
        let request = CreateDistributionRequest {
            config: self.distribution_config(tenant_id, &format!("{tenant_id}-{unique_token}")),
            tags: ownership_tags(tenant_id),
        };
        self.ctx.cdn_provider.create_distribution(&request).await
    }

    /// 租户分发配置（不含别名）
    fn distribution_config(&self, tenant_id: &str, caller_reference: &str) -> DistributionConfig {
        let settings = &self.ctx.settings;
        let origin_id = format!("{ORIGIN_ID_PREFIX}{tenant_id}");
        let error_document = |code: u16| ErrorDocument {
            error_code: code,
            response_code: 200,
            response_page_path: CURRENT_INDEX_DOCUMENT.to_string(),
            caching_min_ttl: 10,
        };

        DistributionConfig {
            caller_reference: caller_reference.to_string(),
            comment: ownership_comment(tenant_id),
            enabled: true,
            aliases: Vec::new(),
            origin: OriginSpec {
                id: origin_id.clone(),
                domain_name: settings.origin_domain.clone(),
                origin_path: tenant_origin_path(tenant_id),
                origin_access_identity: settings.origin_access_identity.clone(),
            },
            cache_behavior: CacheBehavior {
                target_origin_id: origin_id,
                allowed_methods: vec![HttpMethod::Get, HttpMethod::Head],
                viewer_protocol: ViewerProtocol::RedirectToHttps,
                forward_cookies: false,
                forward_query_string: false,
                compress: true,
                min_ttl: 0,
                default_ttl: 86_400,
                max_ttl: 31_536_000,
            },
            default_root_object: settings.default_root_object.clone(),
            error_documents: vec![error_document(403), error_document(404)],
            certificate_arn: None,
            price_class: settings.price_class.clone(),
        }
    }

    /// 复用冲突检查中发现的本租户分发
    async fn adopt_existing(
        &self,
        tenant_id: &str,
        distribution_id: &str,
        alias: Option<String>,
    ) -> CoreResult<ProvisionResult> {
        let mut distribution = self
            .ctx
            .cdn_provider
            .get_distribution(distribution_id)
            .await?;
        if !distribution.config.enabled {
            distribution = self.set_enabled(distribution_id, true).await?;
            log::info!("Distribution {distribution_id} re-enabled for tenant {tenant_id}");
        }
        log::info!("Reusing distribution {distribution_id} for tenant {tenant_id}");

        let mut record =
            TenantDistributionRecord::for_distribution(tenant_id, &distribution, alias, new_token());
        if let Some(alias) = &record.custom_alias {
            record.dns_change_ref = self.dns.upsert_alias(alias, &record.cdn_domain).await;
        }
        let persisted = self.persist(&record).await;
        Ok(ProvisionResult::from_record(&record, persisted))
    }

    async fn finish(
        &self,
        tenant_id: &str,
        bound: BoundDistribution,
        unique_token: String,
    ) -> ProvisionResult {
        let mut record = TenantDistributionRecord::for_distribution(
            tenant_id,
            &bound.distribution,
            bound.alias,
            unique_token,
        );
        record.dns_change_ref = bound.dns_change_ref;

        let persisted = self.persist(&record).await;
        log::info!(
            "Tenant {tenant_id} provisioned: {} ({})",
            record.deployment_url(),
            record.status
        );
        ProvisionResult::from_record(&record, persisted)
    }

    /// 写入记录；失败只记录日志
    async fn persist(&self, record: &TenantDistributionRecord) -> bool {
        match self.ctx.distribution_repository.save(record).await {
            Ok(()) => true,
            Err(e) => {
                log::error!(
                    "Failed to persist record for tenant {} (distribution {} stays tagged and will be adopted on retry): {e}",
                    record.tenant_id,
                    record.distribution_id
                );
                false
            }
        }
    }

    // ===== 缓存失效 =====

    /// 失效租户缓存
    ///
    /// 指定 `build_id` 时失效该构建目录和 `current` 目录，否则失效全部部署目录。
    /// 没有记录或请求失败时返回 `None`。
    pub async fn invalidate_cache(&self, tenant_id: &str, build_id: Option<&str>) -> Option<String> {
        let record = match self.find_record(tenant_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                log::debug!("No distribution for tenant {tenant_id}, skipping invalidation");
                return None;
            }
            Err(e) => {
                log_core_error(&format!("Failed to load record of tenant {tenant_id}"), &e);
                return None;
            }
        };

        let request = InvalidationRequest {
            distribution_id: record.distribution_id.clone(),
            paths: invalidation_paths(&record.tenant_id, build_id),
            caller_reference: format!("{}-{}", record.tenant_id, new_token()),
        };
        match self.ctx.cdn_provider.create_invalidation(&request).await {
            Ok(id) => {
                log::info!(
                    "Invalidation {id} created for tenant {tenant_id}: {:?}",
                    request.paths
                );
                Some(id)
            }
            Err(e) => {
                log_core_error(
                    &format!("Failed to invalidate cache of tenant {tenant_id}"),
                    &e.into(),
                );
                None
            }
        }
    }

    // ===== 停用 =====

    /// 停用租户分发
    ///
    /// 先删除 CNAME（失败不影响后续），再停用分发并把记录标记为 `Disabled`。
    /// 停用请求被接受后返回 `true`；没有记录或停用失败返回 `false`。
    pub async fn delete(&self, tenant_id: &str) -> bool {
        let mut record = match self.find_record(tenant_id).await {
            Ok(Some(record)) => record,
            Ok(None) => return false,
            Err(e) => {
                log_core_error(&format!("Failed to load record of tenant {tenant_id}"), &e);
                return false;
            }
        };

        if let Some(alias) = &record.custom_alias
            && let Err(e) = self.dns.delete_alias(alias, &record.cdn_domain).await
        {
            log_core_error(&format!("Failed to delete CNAME {alias}"), &e);
        }

        match self.set_enabled(&record.distribution_id, false).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                log::warn!(
                    "Distribution {} is already gone, purging record of tenant {tenant_id}",
                    record.distribution_id
                );
                if let Err(err) = self
                    .ctx
                    .distribution_repository
                    .delete(&record.tenant_id)
                    .await
                {
                    log_core_error("Failed to purge stale record", &err);
                }
                return true;
            }
            Err(e) => {
                log_core_error(
                    &format!("Failed to disable distribution {}", record.distribution_id),
                    &e.into(),
                );
                return false;
            }
        }

        record.status = DistributionStatus::Disabled;
        record.dns_change_ref = None;
        self.persist(&record).await;
        log::info!(
            "Distribution {} of tenant {tenant_id} disabled",
            record.distribution_id
        );
        true
    }

    /// 以 `ETag` 切换分发的启用状态；已是目标状态时不提交更新
    async fn set_enabled(
        &self,
        distribution_id: &str,
        enabled: bool,
    ) -> Result<Distribution, ProviderError> {
        let cdn = &self.ctx.cdn_provider;
        let mut versioned = cdn.get_distribution_config(distribution_id).await?;
        if versioned.config.enabled == enabled {
            return cdn.get_distribution(distribution_id).await;
        }
        versioned.config.enabled = enabled;
        cdn.update_distribution(distribution_id, &versioned.config, &versioned.etag)
            .await
    }

    async fn find_record(&self, tenant_id: &str) -> CoreResult<Option<TenantDistributionRecord>> {
        let tenant_id = normalize_tenant_id(tenant_id)?;
        self.ctx
            .distribution_repository
            .find_by_tenant(&tenant_id)
            .await
    }
}

fn provisioning_failed(tenant_id: &str, attempt: &CreationAttempt, error: ProviderError) -> CoreError {
    CoreError::ProvisioningFailed {
        tenant_id: tenant_id.to_string(),
        attempt: attempt.name().to_string(),
        error,
    }
}

fn exhausted(tenant_id: &str, last_rejection: Option<(&'static str, ProviderError)>) -> CoreError {
    match last_rejection {
        Some((attempt, error)) => CoreError::ProvisioningFailed {
            tenant_id: tenant_id.to_string(),
            attempt: attempt.to_string(),
            error,
        },
        None => CoreError::ValidationError(format!("no creation attempts for tenant {tenant_id}")),
    }
}

fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// 租户 ID 用于别名标签和源站路径，规则与边缘路由一致：
/// 3-63 个小写字母、数字或连字符，首尾不能是连字符，且不是保留标签
fn normalize_tenant_id(raw: &str) -> CoreResult<String> {
    let tenant_id = raw.trim().to_ascii_lowercase();
    if !(MIN_TENANT_ID_LEN..=MAX_TENANT_ID_LEN).contains(&tenant_id.len()) {
        return Err(CoreError::ValidationError(format!(
            "tenant id must be {MIN_TENANT_ID_LEN}-{MAX_TENANT_ID_LEN} characters: {raw:?}"
        )));
    }
    if !tenant_id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        || tenant_id.starts_with('-')
        || tenant_id.ends_with('-')
    {
        return Err(CoreError::ValidationError(format!(
            "tenant id may only contain a-z, 0-9 and inner '-': {raw:?}"
        )));
    }
    if RESERVED_TENANT_IDS.contains(&tenant_id.as_str()) {
        return Err(CoreError::ValidationError(format!(
            "tenant id {tenant_id:?} is reserved"
        )));
    }
    Ok(tenant_id)
}

fn invalidation_paths(tenant_id: &str, build_id: Option<&str>) -> Vec<String> {
    let root = format!("{}/deployments", tenant_origin_path(tenant_id));
    match build_id.map(str::trim).filter(|b| !b.is_empty()) {
        Some(build) => vec![format!("{root}/{build}/*"), format!("{root}/current/*")],
        None => vec![format!("{root}/*")],
    }
}
