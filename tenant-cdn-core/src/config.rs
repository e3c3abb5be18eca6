//! 运行配置
//!
//! 每个选项缺失时只会关闭对应功能，不会让开通失败。
//! 配置问题只在 `DnsOrchestrator::validate_configuration` 中集中报告。

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "TENANT_CDN_";

/// CDN / DNS 开通配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CdnSettings {
    /// 是否为租户绑定 `{tenant}.{base_domain}` 别名
    pub custom_domain_enabled: bool,
    /// 租户别名的基础域名（如 `sites.example.com`）
    pub base_domain: Option<String>,
    /// 是否自动维护别名的 CNAME 记录
    pub dns_automation_enabled: bool,
    /// 托管区 ID
    pub hosted_zone_id: Option<String>,
    /// 别名绑定使用的 TLS 证书 ARN
    pub certificate_arn: Option<String>,
    /// 价格等级
    pub price_class: String,
    /// SDK 签名区域
    pub region: Option<String>,
    /// 源站（存储桶）域名
    pub origin_domain: String,
    /// 源站访问身份，空字符串表示不使用
    pub origin_access_identity: String,
    /// CNAME 记录 TTL（秒）
    pub dns_ttl: i64,
    /// `/` 对应的默认对象
    pub default_root_object: String,
}

impl Default for CdnSettings {
    fn default() -> Self {
        Self {
            custom_domain_enabled: false,
            base_domain: None,
            dns_automation_enabled: false,
            hosted_zone_id: None,
            certificate_arn: None,
            price_class: "PriceClass_100".to_string(),
            region: None,
            origin_domain: String::new(),
            origin_access_identity: String::new(),
            dns_ttl: 300,
            default_root_object: "index.html".to_string(),
        }
    }
}

impl CdnSettings {
    /// 从 `TENANT_CDN_*` 环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// 从 JSON 文件读取配置
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::ConfigError(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| CoreError::ConfigError(format!("{}: {e}", path.display())))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let flag = |key: &str| {
            non_empty(key).is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes" | "on"))
        };

        Self {
            custom_domain_enabled: flag("CUSTOM_DOMAIN_ENABLED"),
            base_domain: non_empty("BASE_DOMAIN"),
            dns_automation_enabled: flag("DNS_AUTOMATION_ENABLED"),
            hosted_zone_id: non_empty("HOSTED_ZONE_ID"),
            certificate_arn: non_empty("CERTIFICATE_ARN"),
            price_class: non_empty("PRICE_CLASS").unwrap_or(defaults.price_class),
            region: non_empty("REGION"),
            origin_domain: non_empty("ORIGIN_DOMAIN").unwrap_or(defaults.origin_domain),
            origin_access_identity: non_empty("ORIGIN_ACCESS_IDENTITY")
                .unwrap_or(defaults.origin_access_identity),
            dns_ttl: non_empty("DNS_TTL")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.dns_ttl),
            default_root_object: non_empty("DEFAULT_ROOT_OBJECT")
                .unwrap_or(defaults.default_root_object),
        }
    }

    /// 规范化后的基础域名（去掉首尾的点，小写）
    pub fn base_domain(&self) -> Option<String> {
        self.base_domain
            .as_deref()
            .map(|d| d.trim().trim_matches('.').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
    }

    /// 租户期望的别名，自定义域名关闭或缺少基础域名时为 `None`
    pub fn desired_alias(&self, tenant_id: &str) -> Option<String> {
        if !self.custom_domain_enabled {
            return None;
        }
        self.base_domain()
            .map(|base| format!("{}.{base}", tenant_id.to_ascii_lowercase()))
    }

    /// DNS 自动化可用时返回托管区 ID
    pub fn active_hosted_zone(&self) -> Option<&str> {
        if !self.dns_automation_enabled {
            return None;
        }
        self.hosted_zone_id
            .as_deref()
            .map(str::trim)
            .filter(|z| !z.is_empty())
    }
}
