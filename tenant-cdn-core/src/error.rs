//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use tenant_cdn_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Distribution record not found
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Distribution creation failed for reasons unrelated to aliasing
    #[error("Provisioning failed for tenant {tenant_id} ({attempt}): {error}")]
    ProvisioningFailed {
        tenant_id: String,
        /// Name of the creation attempt that failed
        attempt: String,
        error: ProviderError,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::RecordNotFound(_) | Self::ValidationError(_) | Self::ConfigError(_) => true,
            Self::Provider(e) | Self::ProvisioningFailed { error: e, .. } => e.is_expected(),
            Self::SerializationError(_) | Self::StorageError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
