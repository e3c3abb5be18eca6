use serde::{Deserialize, Serialize};

/// Unified error type for all CDN and DNS control-plane operations.
///
/// Every variant carries `provider` (`"cloudfront"`, `"route53"`); `raw_message`
/// is the control plane's own message when it sent one.
///
/// [`is_retryable`](Self::is_retryable) marks the transient variants. Nothing in
/// this crate retries them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection-level failure talking to the control plane.
    NetworkError {
        provider: String,
        detail: String,
    },

    /// The configured credentials are invalid or expired.
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// The distribution does not exist (deleted out of band, wrong account, ...).
    DistributionNotFound {
        provider: String,
        /// ID of the distribution that was not found.
        distribution_id: String,
        raw_message: Option<String>,
    },

    /// The hosted zone does not exist.
    HostedZoneNotFound {
        provider: String,
        /// Hosted zone identifier.
        zone_id: String,
        raw_message: Option<String>,
    },

    /// The alias is already bound to another distribution.
    AliasConflict {
        provider: String,
        /// The conflicting alias, if the provider reported it.
        alias: Option<String>,
        raw_message: Option<String>,
    },

    /// The provider rejected the alias set during validation
    /// (certificate does not cover it, DNS does not point at the distribution, ...).
    AliasValidation {
        provider: String,
        raw_message: Option<String>,
    },

    /// The optimistic-concurrency token (`ETag`) is stale.
    PreconditionFailed {
        provider: String,
        raw_message: Option<String>,
    },

    /// A request parameter is invalid.
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    /// Account limit reached (distributions per account, aliases per distribution).
    QuotaExceeded {
        provider: String,
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (throttling).
    RateLimited {
        provider: String,
        raw_message: Option<String>,
    },

    /// The request timed out.
    Timeout {
        provider: String,
        detail: String,
    },

    /// The authenticated principal lacks permission for the requested operation.
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// Failed to interpret the provider's API response.
    ParseError {
        provider: String,
        detail: String,
    },

    /// Failed to build a request.
    SerializationError {
        provider: String,
        detail: String,
    },

    /// Error code this crate does not map.
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（资源不存在、别名冲突等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::DistributionNotFound { .. }
                | Self::HostedZoneNotFound { .. }
                | Self::AliasConflict { .. }
                | Self::AliasValidation { .. }
                | Self::PreconditionFailed { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::PermissionDenied { .. }
        )
    }

    /// 是否为瞬时错误（网络、超时、限流）
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// 是否为别名相关的拒绝（冲突或校验失败）
    ///
    /// 创建分发时命中此类错误可以退化为不带别名重试。
    #[must_use]
    pub fn is_alias_rejection(&self) -> bool {
        matches!(
            self,
            Self::AliasConflict { .. } | Self::AliasValidation { .. }
        )
    }

    /// 是否为"资源不存在"
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DistributionNotFound { .. } | Self::HostedZoneNotFound { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::DistributionNotFound {
                provider,
                distribution_id,
                ..
            } => {
                write!(f, "[{provider}] Distribution '{distribution_id}' not found")
            }
            Self::HostedZoneNotFound {
                provider, zone_id, ..
            } => {
                write!(f, "[{provider}] Hosted zone '{zone_id}' not found")
            }
            Self::AliasConflict {
                provider,
                alias,
                raw_message,
            } => match (alias, raw_message) {
                (Some(alias), _) => {
                    write!(f, "[{provider}] Alias '{alias}' is already in use")
                }
                (None, Some(msg)) => write!(f, "[{provider}] Alias conflict: {msg}"),
                (None, None) => write!(f, "[{provider}] Alias conflict"),
            },
            Self::AliasValidation {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Alias validation failed: {msg}")
                } else {
                    write!(f, "[{provider}] Alias validation failed")
                }
            }
            Self::PreconditionFailed { provider, .. } => {
                write!(f, "[{provider}] Precondition failed (stale ETag)")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::QuotaExceeded { provider, .. } => {
                write!(f, "[{provider}] Quota exceeded")
            }
            Self::RateLimited { provider, .. } => {
                write!(f, "[{provider}] Rate limited")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

pub type Result<T> = std::result::Result<T, ProviderError>;
