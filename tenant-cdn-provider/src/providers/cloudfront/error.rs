//! CloudFront 错误映射

use aws_sdk_cloudfront::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudFrontProvider;

/// CloudFront 错误码映射
/// 参考: <https://docs.aws.amazon.com/cloudfront/latest/APIReference/CommonErrors.html>
impl ProviderErrorMapper for CloudFrontProvider {
    fn provider_name(&self) -> &'static str {
        "cloudfront"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            Some("NoSuchDistribution" | "NoSuchResource") => ProviderError::DistributionNotFound {
                provider,
                distribution_id: context.distribution_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // 别名已被其他分发占用
            Some("CNAMEAlreadyExists") => ProviderError::AliasConflict {
                provider,
                alias: context.alias,
                raw_message: Some(raw.message),
            },

            // 证书不覆盖别名 / 别名未指向本分发
            Some("InvalidViewerCertificate" | "IllegalUpdate") => ProviderError::AliasValidation {
                provider,
                raw_message: Some(raw.message),
            },
            Some("InvalidArgument") if mentions_alias(&raw.message) => {
                ProviderError::AliasValidation {
                    provider,
                    raw_message: Some(raw.message),
                }
            }
            Some("InvalidArgument" | "InconsistentQuantities" | "MissingBody") => {
                ProviderError::InvalidParameter {
                    provider,
                    param: "distribution_config".to_string(),
                    detail: raw.message,
                }
            }

            // ETag 过期
            Some("PreconditionFailed" | "InvalidIfMatchVersion") => {
                ProviderError::PreconditionFailed {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            Some(
                "TooManyDistributions"
                | "TooManyDistributionCNAMEs"
                | "TooManyInvalidationsInProgress"
                | "BatchTooLarge",
            ) => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            Some("Throttling" | "ThrottlingException" | "RequestLimitExceeded") => {
                ProviderError::RateLimited {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            Some("AccessDenied" | "AccessDeniedException") => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            Some(
                "InvalidClientTokenId"
                | "SignatureDoesNotMatch"
                | "ExpiredToken"
                | "UnrecognizedClientException",
            ) => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}

/// `InvalidArgument` 的消息是否与别名（CNAME）有关
fn mentions_alias(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("cname") || lower.contains("alternate domain")
}

impl CloudFrontProvider {
    /// 将 SDK 错误转换为统一错误类型
    pub(crate) fn sdk_error<E>(&self, err: SdkError<E>, context: ErrorContext) -> ProviderError
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
    {
        match &err {
            SdkError::TimeoutError(_) => ProviderError::Timeout {
                provider: self.provider_name().to_string(),
                detail: format!("{}", DisplayErrorContext(&err)),
            },
            SdkError::DispatchFailure(_) => ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!("{}", DisplayErrorContext(&err)),
            },
            SdkError::ServiceError(service) => {
                let e = service.err();
                log::debug!(
                    "[{}] API error: code={:?} message={:?}",
                    self.provider_name(),
                    e.code(),
                    e.message()
                );
                self.map_error(RawApiError::with_code(e.code(), e.message()), context)
            }
            _ => self.unknown_error(RawApiError::new(format!(
                "{}",
                DisplayErrorContext(&err)
            ))),
        }
    }
}
