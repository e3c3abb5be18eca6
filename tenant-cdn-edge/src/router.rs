//! 边缘请求路由
//!
//! 纯函数，不做任何网络或存储访问。任何畸形输入都落到"租户不存在"分支。

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 不能作为租户 ID 的子域名
pub const RESERVED_LABELS: [&str; 5] = ["www", "api", "admin", "cdn", "mail"];

/// 租户不存在时改写到的文档
pub const NOT_FOUND_DOCUMENT: &str = "/_errors/tenant-not-found.html";

/// 携带基础域名的请求头
pub const BASE_DOMAIN_HEADER: &str = "x-tenant-base-domain";
/// 注入的租户 ID 请求头
pub const TENANT_ID_HEADER: &str = "x-tenant-id";
pub const CACHE_CONTROL_HEADER: &str = "cache-control";

const DEFAULT_WILDCARD_DOMAIN: &str = "cloudfront.net";
const DEFAULT_CACHE_CONTROL: &str = "public, max-age=300";
const PATH_TENANT_PREFIX: &str = "/tenant-";
const MIN_LABEL_LEN: usize = 3;
const MAX_LABEL_LEN: usize = 63;

static TENANT_LABEL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$").ok());

/// 路由配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouterConfig {
    /// 请求头未携带基础域名时使用
    pub default_base_domain: Option<String>,
    /// 控制面通配域名（`*.cloudfront.net` 中的 `cloudfront.net`）
    pub wildcard_domain: String,
    /// 注入的 `Cache-Control`（请求已带时不覆盖）
    pub cache_control: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_base_domain: None,
            wildcard_domain: DEFAULT_WILDCARD_DOMAIN.to_string(),
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
        }
    }
}

/// 路由结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingDecision {
    pub tenant_id: Option<String>,
    pub rewritten_path: String,
    /// 需要写入请求的头（小写名称）
    pub injected_headers: Vec<(String, String)>,
}

impl RoutingDecision {
    fn not_found() -> Self {
        Self {
            tenant_id: None,
            rewritten_path: NOT_FOUND_DOCUMENT.to_string(),
            injected_headers: Vec::new(),
        }
    }

    fn tenant(tenant_id: &str, uri: &str, config: &RouterConfig) -> Self {
        Self {
            tenant_id: Some(tenant_id.to_string()),
            rewritten_path: format!("/tenants/{tenant_id}/deployments/current{uri}"),
            injected_headers: vec![
                (TENANT_ID_HEADER.to_string(), tenant_id.to_string()),
                (CACHE_CONTROL_HEADER.to_string(), config.cache_control.clone()),
            ],
        }
    }
}

/// 边缘请求（查看器请求事件中路由关心的部分）
///
/// 头名称统一小写。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRequest {
    pub method: String,
    pub uri: String,
    pub headers: BTreeMap<String, String>,
}

impl EdgeRequest {
    pub fn new(method: impl Into<String>, host: &str, uri: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("host".to_string(), host.to_string());
        Self {
            method: method.into(),
            uri: uri.into(),
            headers,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// 为一个请求选择路由
pub fn route(host: &str, uri: &str, base_domain: Option<&str>, config: &RouterConfig) -> RoutingDecision {
    let host = normalize_host(host);
    let base_domain = base_domain
        .map(normalize_host)
        .filter(|b| !b.is_empty())
        .or_else(|| config.default_base_domain.as_deref().map(normalize_host))
        .filter(|b| !b.is_empty());

    if let Some(base) = base_domain
        && let Some(label) = host
            .strip_suffix(base.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
    {
        return match (is_valid_tenant_id(label), normalize_uri(uri)) {
            (true, Some(uri)) => RoutingDecision::tenant(label, &uri, config),
            _ => RoutingDecision::not_found(),
        };
    }

    if is_wildcard_host(&host, &config.wildcard_domain)
        && let Some((tenant_id, rest)) = tenant_from_path(uri)
        && let Some(uri) = normalize_uri(rest)
    {
        return RoutingDecision::tenant(tenant_id, &uri, config);
    }

    RoutingDecision::not_found()
}

/// 路由并改写请求
///
/// 只修改 URI 和注入的头；`Cache-Control` 已存在时保留原值。
/// 方法、其他头原样保留。
pub fn route_request(mut request: EdgeRequest, config: &RouterConfig) -> (EdgeRequest, RoutingDecision) {
    let host = request.header("host").unwrap_or_default().to_string();
    let decision = route(
        &host,
        &request.uri,
        request.header(BASE_DOMAIN_HEADER),
        config,
    );

    request.uri.clone_from(&decision.rewritten_path);
    for (name, value) in &decision.injected_headers {
        if name == CACHE_CONTROL_HEADER && request.headers.contains_key(CACHE_CONTROL_HEADER) {
            continue;
        }
        request.headers.insert(name.clone(), value.clone());
    }
    (request, decision)
}

/// 租户 ID 校验：非保留名、`[a-z0-9-]`、首尾非连字符、长度 3..=63
pub fn is_valid_tenant_id(label: &str) -> bool {
    (MIN_LABEL_LEN..=MAX_LABEL_LEN).contains(&label.len())
        && !RESERVED_LABELS.contains(&label)
        && TENANT_LABEL
            .as_ref()
            .is_some_and(|re| re.is_match(label))
}

/// 小写、去掉端口和末尾的点
fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    };
    host.trim_end_matches('.').to_ascii_lowercase()
}

fn is_wildcard_host(host: &str, wildcard_domain: &str) -> bool {
    let wildcard = wildcard_domain.trim_start_matches("*.");
    !wildcard.is_empty()
        && host
            .strip_suffix(wildcard)
            .and_then(|rest| rest.strip_suffix('.'))
            .is_some_and(|label| !label.is_empty() && !label.contains('.'))
}

/// `/tenant-{id}/rest` → `(id, "/rest")`
fn tenant_from_path(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix(PATH_TENANT_PREFIX)?;
    let (tenant_id, remainder) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    is_valid_tenant_id(tenant_id).then_some((tenant_id, remainder))
}

/// `''`/`'/'` → `/index.html`，补齐前导 `/`；含 `..` 段或控制字符视为畸形
fn normalize_uri(uri: &str) -> Option<String> {
    if uri.chars().any(char::is_control) || uri.split('/').any(|segment| segment == "..") {
        return None;
    }
    Some(match uri {
        "" | "/" => "/index.html".to_string(),
        u if u.starts_with('/') => u.to_string(),
        u => format!("/{u}"),
    })
}
