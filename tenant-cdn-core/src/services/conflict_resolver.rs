//! 别名冲突检测与处理

use std::sync::Arc;

use tenant_cdn_provider::normalize_domain_name;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::services::ownership::is_owned_by;
use crate::types::{AliasConflict, ResolutionDecision};

/// 备选别名后缀，按顺序尝试
pub const ALTERNATIVE_SUFFIXES: [&str; 5] = ["-v2", "-alt", "-new", "-app", "-site"];

/// 别名冲突处理服务
///
/// 处理阶梯（固定优先级）：
/// `no_conflict` → `reuse_existing` → `alternative_alias` → `cdn_domain_only`
pub struct ConflictResolver {
    ctx: Arc<ServiceContext>,
}

impl ConflictResolver {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 在全部分发中查找占用 `alias` 的分发（大小写不敏感）
    ///
    /// 列表错误原样返回。
    pub async fn check_alias_conflict(&self, alias: &str) -> CoreResult<AliasConflict> {
        let wanted = normalize_domain_name(alias);
        let fleet = self.ctx.cdn_provider.list_all_distributions().await?;

        let holder = fleet.into_iter().find(|d| {
            d.aliases
                .iter()
                .any(|a| normalize_domain_name(a) == wanted)
        });

        Ok(match holder {
            Some(distribution) => {
                log::debug!(
                    "Alias {alias} is bound to distribution {}",
                    distribution.id
                );
                AliasConflict::with(alias, distribution)
            }
            None => AliasConflict::none(alias),
        })
    }

    /// 检查并处理 `alias`
    pub async fn resolve_alias(
        &self,
        tenant_id: &str,
        alias: &str,
    ) -> CoreResult<ResolutionDecision> {
        let conflict = self.check_alias_conflict(alias).await?;
        self.resolve(tenant_id, alias, &conflict).await
    }

    /// 根据冲突检查结果选择处理策略
    pub async fn resolve(
        &self,
        tenant_id: &str,
        alias: &str,
        conflict: &AliasConflict,
    ) -> CoreResult<ResolutionDecision> {
        if !conflict.has_conflict {
            return Ok(ResolutionDecision::no_conflict(alias));
        }

        if let Some(id) = self.owned_distribution(tenant_id, conflict).await {
            log::info!("Alias {alias} already belongs to tenant {tenant_id} (distribution {id})");
            return Ok(ResolutionDecision::reuse_existing(alias, id));
        }

        for suffix in ALTERNATIVE_SUFFIXES {
            let candidate = with_suffix(alias, suffix);
            let candidate_conflict = self.check_alias_conflict(&candidate).await?;
            if !candidate_conflict.has_conflict {
                log::info!("Alias {alias} is taken, using {candidate} for tenant {tenant_id}");
                return Ok(ResolutionDecision::alternative_alias(candidate));
            }
            // 之前的请求已经以该备选别名建好了分发
            if let Some(id) = self.owned_distribution(tenant_id, &candidate_conflict).await {
                return Ok(ResolutionDecision::reuse_existing(candidate, id));
            }
        }

        let random_suffix = format!("-{}", self.ctx.suffix_source.random_suffix());
        let candidate = with_suffix(alias, &random_suffix);
        if !self.check_alias_conflict(&candidate).await?.has_conflict {
            log::info!("Alias {alias} is taken, using {candidate} for tenant {tenant_id}");
            return Ok(ResolutionDecision::alternative_alias(candidate));
        }

        log::warn!("No free alias for tenant {tenant_id}, serving from the CDN domain only");
        Ok(ResolutionDecision::cdn_domain_only())
    }

    async fn owned_distribution(&self, tenant_id: &str, conflict: &AliasConflict) -> Option<String> {
        let distribution = conflict.conflicting_distribution.as_ref()?;
        is_owned_by(self.ctx.cdn_provider.as_ref(), distribution, tenant_id)
            .await
            .then(|| distribution.id.clone())
    }
}

/// 在别名的第一个标签后追加后缀：`t1.example.com` + `-v2` → `t1-v2.example.com`
fn with_suffix(alias: &str, suffix: &str) -> String {
    match alias.split_once('.') {
        Some((head, rest)) => format!("{head}{suffix}.{rest}"),
        None => format!("{alias}{suffix}"),
    }
}
