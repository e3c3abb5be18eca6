//! 分发归属约定
//!
//! 判断一个分发属于哪个租户，优先级：
//! 1. 结构化标签 `tenant-id=<id>`
//! 2. comment 约定 `tenant:<id>`（取到第一个空白字符为止）
//! 3. 源站路径约定 `/tenants/<id>`（取第一段）
//!
//! 标签存在时以标签为准，约定只在没有标签时参与判断。

use tenant_cdn_provider::{CdnProvider, DistributionSummary, ResourceTag};

/// 租户归属标签键
pub const TENANT_TAG_KEY: &str = "tenant-id";
/// 管理方标签
pub const MANAGED_BY_TAG_KEY: &str = "managed-by";
pub const MANAGED_BY_TAG_VALUE: &str = "tenant-cdn";

const COMMENT_PREFIX: &str = "tenant:";
const ORIGIN_PATH_PREFIX: &str = "/tenants/";

/// 写入分发 comment 的归属字符串
pub fn ownership_comment(tenant_id: &str) -> String {
    format!("{COMMENT_PREFIX}{tenant_id}")
}

/// 租户在源站中的根路径
pub fn tenant_origin_path(tenant_id: &str) -> String {
    format!("{ORIGIN_PATH_PREFIX}{tenant_id}")
}

/// 创建分发时附带的标签
pub fn ownership_tags(tenant_id: &str) -> Vec<ResourceTag> {
    vec![
        ResourceTag::new(TENANT_TAG_KEY, tenant_id),
        ResourceTag::new(MANAGED_BY_TAG_KEY, MANAGED_BY_TAG_VALUE),
    ]
}

pub fn owner_from_tags(tags: &[ResourceTag]) -> Option<&str> {
    tags.iter()
        .find(|t| t.key == TENANT_TAG_KEY)
        .map(|t| t.value.trim())
        .filter(|v| !v.is_empty())
}

pub fn owner_from_comment(comment: &str) -> Option<&str> {
    comment
        .trim()
        .strip_prefix(COMMENT_PREFIX)?
        .split_whitespace()
        .next()
}

pub fn owner_from_origin_path(origin_path: &str) -> Option<&str> {
    origin_path
        .strip_prefix(ORIGIN_PATH_PREFIX)?
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
}

/// 仅依据 comment / 源站路径约定判断归属
pub fn owner_from_conventions(summary: &DistributionSummary) -> Option<&str> {
    owner_from_comment(&summary.comment).or_else(|| {
        summary
            .origin_paths
            .iter()
            .find_map(|p| owner_from_origin_path(p))
    })
}

/// 判断分发归属：先查标签，标签缺失或查询失败时退回约定
pub async fn resolve_owner(
    cdn: &dyn CdnProvider,
    summary: &DistributionSummary,
) -> Option<String> {
    match cdn.list_tags(&summary.arn).await {
        Ok(tags) => {
            if let Some(owner) = owner_from_tags(&tags) {
                return Some(owner.to_string());
            }
        }
        Err(e) => {
            log::warn!(
                "Failed to read tags of distribution {}, falling back to comment/origin path: {e}",
                summary.id
            );
        }
    }
    owner_from_conventions(summary).map(str::to_string)
}

/// 分发是否属于指定租户
pub async fn is_owned_by(
    cdn: &dyn CdnProvider,
    summary: &DistributionSummary,
    tenant_id: &str,
) -> bool {
    resolve_owner(cdn, summary)
        .await
        .is_some_and(|owner| owner.eq_ignore_ascii_case(tenant_id))
}
