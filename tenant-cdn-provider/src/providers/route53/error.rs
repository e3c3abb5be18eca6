//! Route 53 错误映射

use aws_sdk_route53::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::Route53Provider;

/// Route 53 错误码映射
/// 参考: <https://docs.aws.amazon.com/Route53/latest/APIReference/CommonErrors.html>
impl ProviderErrorMapper for Route53Provider {
    fn provider_name(&self) -> &'static str {
        "route53"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            Some("NoSuchHostedZone") => ProviderError::HostedZoneNotFound {
                provider,
                zone_id: context.zone_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            Some("InvalidChangeBatch" | "InvalidInput" | "NoSuchChange") => {
                ProviderError::InvalidParameter {
                    provider,
                    param: "change_batch".to_string(),
                    detail: raw.message,
                }
            }

            // PriorRequestNotComplete: 同一托管区上一批变更尚未处理完
            Some("Throttling" | "ThrottlingException" | "PriorRequestNotComplete") => {
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

impl Route53Provider {
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
                self.map_error(RawApiError::with_code(e.code(), e.message()), context)
            }
            _ => self.unknown_error(RawApiError::new(format!(
                "{}",
                DisplayErrorContext(&err)
            ))),
        }
    }
}
