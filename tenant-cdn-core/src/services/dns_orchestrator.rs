//! 租户别名 DNS 记录编排
//!
//! DNS 只是增强项：这里的写操作失败只记录日志，不会让开通失败。

use std::sync::Arc;
use std::time::Duration;

use tenant_cdn_provider::{
    ChangeAction, ChangeStatus, DnsRecordSet, DnsRecordType, RecordChange, normalize_domain_name,
};

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, log_core_error};
use crate::types::DnsConfigurationReport;

/// 默认的变更状态轮询间隔
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// 记录已是目标状态时返回的变更引用前缀
const NOOP_CHANGE_PREFIX: &str = "noop:";
const CHANGE_COMMENT: &str = "tenant-cdn alias record";

/// 租户别名 DNS 编排服务
pub struct DnsOrchestrator {
    ctx: Arc<ServiceContext>,
    poll_interval: Duration,
}

impl DnsOrchestrator {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// DNS 自动化已开启且托管区、基础域名齐全
    pub fn is_enabled(&self) -> bool {
        self.zone().is_some()
    }

    fn zone(&self) -> Option<&str> {
        self.ctx.settings.base_domain()?;
        self.ctx.settings.active_hosted_zone()
    }

    /// 租户的标准别名 `{tenant_id}.{base_domain}`
    pub fn canonical_alias(&self, tenant_id: &str) -> Option<String> {
        self.ctx
            .settings
            .base_domain()
            .map(|base| format!("{}.{base}", tenant_id.to_ascii_lowercase()))
    }

    /// 让租户标准别名的 CNAME 指向 `target`
    ///
    /// 返回变更引用；DNS 自动化关闭、配置不全或变更失败时返回 `None`。
    pub async fn upsert(&self, tenant_id: &str, target: &str) -> Option<String> {
        let alias = self.canonical_alias(tenant_id)?;
        self.upsert_alias(&alias, target).await
    }

    /// 让指定别名的 CNAME 指向 `target`
    ///
    /// 先读后写：记录已是目标值时不提交变更，返回一个可直接视为已同步的引用。
    pub async fn upsert_alias(&self, alias: &str, target: &str) -> Option<String> {
        let Some(zone) = self.zone() else {
            log::debug!("DNS automation disabled, not writing record for {alias}");
            return None;
        };

        let desired = DnsRecordSet::cname(
            normalize_domain_name(alias),
            normalize_domain_name(target),
            self.ctx.settings.dns_ttl,
        );

        match self
            .ctx
            .dns_provider
            .find_record_set(zone, alias, DnsRecordType::Cname)
            .await
        {
            Ok(Some(existing)) if same_record(&existing, &desired) => {
                log::debug!("CNAME {alias} already points at {target}");
                return Some(format!("{NOOP_CHANGE_PREFIX}{}", desired.name));
            }
            Ok(Some(existing)) => {
                log::info!(
                    "Repointing CNAME {alias} from {:?} to {target}",
                    existing.target()
                );
            }
            Ok(None) => {}
            Err(e) => {
                // UPSERT 本身不依赖读取结果，读取失败仍继续写入
                log_core_error(&format!("Failed to read CNAME {alias}"), &e.into());
            }
        }

        let change = RecordChange {
            action: ChangeAction::Upsert,
            record: desired,
        };
        match self
            .ctx
            .dns_provider
            .change_record_sets(zone, &[change], Some(CHANGE_COMMENT))
            .await
        {
            Ok(info) => {
                log::info!("CNAME {alias} -> {target} submitted (change {})", info.id);
                Some(info.id)
            }
            Err(e) => {
                log_core_error(&format!("Failed to upsert CNAME {alias}"), &e.into());
                None
            }
        }
    }

    /// 删除租户标准别名的 CNAME
    pub async fn delete(&self, tenant_id: &str, target: &str) -> CoreResult<bool> {
        let Some(alias) = self.canonical_alias(tenant_id) else {
            return Ok(false);
        };
        self.delete_alias(&alias, target).await
    }

    /// 删除指向 `target` 的别名 CNAME
    ///
    /// 记录不存在时返回 `Ok(false)`；记录指向其他目标时保持不动。
    pub async fn delete_alias(&self, alias: &str, target: &str) -> CoreResult<bool> {
        let Some(zone) = self.zone() else {
            return Ok(false);
        };

        let Some(existing) = self
            .ctx
            .dns_provider
            .find_record_set(zone, alias, DnsRecordType::Cname)
            .await?
        else {
            log::debug!("CNAME {alias} does not exist, nothing to delete");
            return Ok(false);
        };

        let target = normalize_domain_name(target);
        if existing.target().map(normalize_domain_name).as_deref() != Some(target.as_str()) {
            log::warn!(
                "CNAME {alias} points at {:?}, not {target}; leaving it in place",
                existing.target()
            );
            return Ok(false);
        }

        // DELETE 必须与现有记录完全一致
        let change = RecordChange {
            action: ChangeAction::Delete,
            record: existing,
        };
        self.ctx
            .dns_provider
            .change_record_sets(zone, &[change], Some(CHANGE_COMMENT))
            .await?;
        log::info!("CNAME {alias} deleted");
        Ok(true)
    }

    /// 租户标准别名的 CNAME 是否存在
    pub async fn exists(&self, tenant_id: &str) -> CoreResult<bool> {
        Ok(self.get(tenant_id).await?.is_some())
    }

    /// 读取租户标准别名的 CNAME
    pub async fn get(&self, tenant_id: &str) -> CoreResult<Option<DnsRecordSet>> {
        let Some(alias) = self.canonical_alias(tenant_id) else {
            return Ok(None);
        };
        self.get_alias(&alias).await
    }

    pub async fn get_alias(&self, alias: &str) -> CoreResult<Option<DnsRecordSet>> {
        let Some(zone) = self.zone() else {
            return Ok(None);
        };
        Ok(self
            .ctx
            .dns_provider
            .find_record_set(zone, alias, DnsRecordType::Cname)
            .await?)
    }

    /// 轮询变更状态直到 `INSYNC`
    ///
    /// 瞬时错误（限流、网络、超时）继续轮询；超时或其它查询失败返回 `false`。
    pub async fn wait_for_propagation(&self, change_ref: &str, timeout: Duration) -> bool {
        if change_ref.starts_with(NOOP_CHANGE_PREFIX) {
            return true;
        }

        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match self.ctx.dns_provider.get_change(change_ref).await {
                Ok(info) if info.status == ChangeStatus::InSync => {
                    log::debug!("Change {change_ref} is in sync");
                    return true;
                }
                Ok(_) => {}
                Err(e) if e.is_retryable() => {
                    log::debug!("Transient error polling change {change_ref}, retrying: {e}");
                }
                Err(e) => {
                    log::warn!("Failed to poll change {change_ref}: {e}");
                    return false;
                }
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                log::info!("Change {change_ref} still pending after {timeout:?}");
                return false;
            }
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    /// 检查 DNS 自动化配置（管理操作，不在请求路径上调用）
    pub async fn validate_configuration(&self) -> DnsConfigurationReport {
        let settings = &self.ctx.settings;
        let mut report = DnsConfigurationReport::default();

        if !settings.dns_automation_enabled {
            report
                .warnings
                .push("DNS automation is disabled; alias records must be managed manually".to_string());
            return report;
        }

        let base_domain = settings.base_domain();
        if base_domain.is_none() {
            report
                .errors
                .push("base domain is not configured".to_string());
        }
        if !settings.custom_domain_enabled {
            report
                .warnings
                .push("custom domains are disabled; no alias records will be written".to_string());
        }
        if settings.custom_domain_enabled && settings.certificate_arn.is_none() {
            report
                .warnings
                .push("no certificate configured; aliases cannot be attached over TLS".to_string());
        }
        if settings.dns_ttl < 60 {
            report
                .warnings
                .push(format!("DNS TTL {}s is unusually low", settings.dns_ttl));
        }

        match settings.active_hosted_zone() {
            None => report
                .errors
                .push("hosted zone id is not configured".to_string()),
            Some(zone_id) => match self.ctx.dns_provider.get_hosted_zone(zone_id).await {
                Ok(zone) => {
                    if let Some(base) = &base_domain {
                        let zone_name = normalize_domain_name(&zone.name);
                        if *base != zone_name && !base.ends_with(&format!(".{zone_name}")) {
                            report.errors.push(format!(
                                "base domain {base} is not inside hosted zone {zone_name}"
                            ));
                        }
                    }
                }
                Err(e) => {
                    let err = CoreError::from(e);
                    report
                        .errors
                        .push(format!("hosted zone {zone_id} is not reachable: {err}"));
                }
            },
        }

        report.enabled = report.errors.is_empty();
        report
    }
}

fn same_record(existing: &DnsRecordSet, desired: &DnsRecordSet) -> bool {
    existing.ttl == desired.ttl
        && existing.values.len() == 1
        && existing.target().map(normalize_domain_name).as_deref() == desired.target()
}
