use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Distribution Types ============

/// Deployment state reported by the CDN control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentState {
    /// Configuration is still propagating to edge locations.
    InProgress,
    /// Configuration is live on all edge locations.
    Deployed,
    /// Unrecognized status string.
    Unknown(String),
}

impl DeploymentState {
    /// Parse the provider's status string (`"InProgress"`, `"Deployed"`).
    pub fn parse(status: &str) -> Self {
        match status {
            "InProgress" => Self::InProgress,
            "Deployed" => Self::Deployed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "InProgress"),
            Self::Deployed => write!(f, "Deployed"),
            Self::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// A fleet listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSummary {
    /// Provider-assigned distribution ID.
    pub id: String,
    /// Resource ARN (used for tag lookups).
    pub arn: String,
    /// Provider-assigned domain (e.g. `d111111abcdef8.cloudfront.net`).
    pub domain_name: String,
    /// Alternate domain names bound to this distribution.
    pub aliases: Vec<String>,
    /// Deployment state.
    pub status: DeploymentState,
    /// Whether the distribution serves traffic.
    pub enabled: bool,
    /// Free-text comment.
    pub comment: String,
    /// Origin paths of all origins.
    pub origin_paths: Vec<String>,
}

/// One page of the fleet listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionPage {
    /// Items in the current page.
    pub items: Vec<DistributionSummary>,
    /// Marker for the next page, `None` on the last page.
    pub next_marker: Option<String>,
}

/// HTTP methods a cache behavior accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Options,
}

/// Viewer protocol policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocol {
    AllowAll,
    RedirectToHttps,
    HttpsOnly,
}

/// Default cache behavior of a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheBehavior {
    /// Origin this behavior routes to.
    pub target_origin_id: String,
    /// Allowed (and cached) methods.
    pub allowed_methods: Vec<HttpMethod>,
    /// Viewer protocol policy.
    pub viewer_protocol: ViewerProtocol,
    /// Forward cookies to the origin.
    pub forward_cookies: bool,
    /// Forward query strings to the origin.
    pub forward_query_string: bool,
    /// Compress responses at the edge.
    pub compress: bool,
    /// Minimum TTL in seconds.
    pub min_ttl: i64,
    /// Default TTL in seconds.
    pub default_ttl: i64,
    /// Maximum TTL in seconds.
    pub max_ttl: i64,
}

/// Origin definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginSpec {
    /// Origin identifier, unique within the distribution.
    pub id: String,
    /// Origin host (storage bucket endpoint).
    pub domain_name: String,
    /// Path prefix prepended to every origin request.
    pub origin_path: String,
    /// Origin access identity (`origin-access-identity/cloudfront/XXXX`), empty for none.
    pub origin_access_identity: String,
}

/// Mapping of an origin error status to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDocument {
    /// HTTP status from the origin (403, 404).
    pub error_code: u16,
    /// HTTP status returned to the viewer.
    pub response_code: u16,
    /// Document path, relative to the origin path.
    pub response_page_path: String,
    /// Seconds the error response is cached.
    pub caching_min_ttl: i64,
}

/// Full distribution configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionConfig {
    /// Idempotency key for creation.
    pub caller_reference: String,
    /// Free-text comment (carries the ownership convention).
    pub comment: String,
    /// Whether the distribution serves traffic.
    pub enabled: bool,
    /// Alternate domain names.
    pub aliases: Vec<String>,
    /// Single origin.
    pub origin: OriginSpec,
    /// Default cache behavior.
    pub cache_behavior: CacheBehavior,
    /// Object served for `/`.
    pub default_root_object: String,
    /// Custom error responses.
    pub error_documents: Vec<ErrorDocument>,
    /// Certificate for alias bindings; `None` uses the provider default certificate.
    pub certificate_arn: Option<String>,
    /// Price tier (`PriceClass_100`, `PriceClass_200`, `PriceClass_All`).
    pub price_class: String,
}

/// A configuration paired with its optimistic-concurrency token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedConfig {
    pub config: DistributionConfig,
    pub etag: String,
}

/// A distribution as returned by get/create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub id: String,
    pub arn: String,
    pub domain_name: String,
    pub status: DeploymentState,
    pub config: DistributionConfig,
    /// `ETag` of the returned configuration, when the provider sent one.
    pub etag: Option<String>,
}

/// Key/value resource tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

impl ResourceTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Create-distribution request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDistributionRequest {
    pub config: DistributionConfig,
    /// Ownership tags, applied right after creation.
    pub tags: Vec<ResourceTag>,
}

/// Cache invalidation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidationRequest {
    pub distribution_id: String,
    /// Path patterns (may end with `*`).
    pub paths: Vec<String>,
    /// Idempotency key.
    pub caller_reference: String,
}

// ============ DNS Types ============

/// DNS record type. Only the types this system manages are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    Cname,
    A,
    Aaaa,
    Txt,
}

impl DnsRecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cname => "CNAME",
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Txt => "TXT",
        }
    }
}

/// A record set (name + type + values).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordSet {
    /// Fully qualified name without the trailing dot.
    pub name: String,
    pub record_type: DnsRecordType,
    pub ttl: i64,
    pub values: Vec<String>,
}

impl DnsRecordSet {
    /// Build a single-value CNAME.
    pub fn cname(name: impl Into<String>, target: impl Into<String>, ttl: i64) -> Self {
        Self {
            name: name.into(),
            record_type: DnsRecordType::Cname,
            ttl,
            values: vec![target.into()],
        }
    }

    /// First value, if any.
    pub fn target(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// Change action inside a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Upsert,
    Delete,
}

/// A single record-set change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordChange {
    pub action: ChangeAction,
    pub record: DnsRecordSet,
}

/// Propagation status of a submitted change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeStatus {
    Pending,
    #[serde(rename = "INSYNC")]
    InSync,
}

/// Submitted change reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    /// Change identifier, used to poll propagation.
    pub id: String,
    pub status: ChangeStatus,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Hosted zone summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZone {
    pub id: String,
    /// Zone apex without the trailing dot.
    pub name: String,
    pub record_count: Option<i64>,
}

/// Query parameters for record-set listing.
///
/// Listing starts at `start_name` (lexicographic, provider order) and returns at
/// most `max_items` entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetQuery {
    pub start_name: Option<String>,
    pub record_type: Option<DnsRecordType>,
    pub max_items: i32,
}

impl Default for RecordSetQuery {
    fn default() -> Self {
        Self {
            start_name: None,
            record_type: None,
            max_items: 100,
        }
    }
}
