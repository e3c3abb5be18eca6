//! Provider factory functions.

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};

use crate::providers::{CloudFrontProvider, Route53Provider};
use crate::traits::{CdnProvider, DnsProvider};

/// Control-plane clients sharing one AWS configuration.
#[derive(Clone)]
pub struct AwsProviders {
    pub cdn: Arc<dyn CdnProvider>,
    pub dns: Arc<dyn DnsProvider>,
}

/// Creates the CloudFront and Route 53 providers from the ambient AWS
/// configuration (environment, profile, instance metadata).
///
/// `region` overrides the region resolved from the environment. CloudFront
/// and Route 53 are global services, so the region only selects the
/// signing endpoint.
///
/// # Examples
///
/// ```rust,no_run
/// # use tenant_cdn_provider::CdnProvider;
/// # async fn example() {
/// let providers = tenant_cdn_provider::create_aws_providers(Some("us-east-1".to_string())).await;
/// let fleet = providers.cdn.list_all_distributions().await;
/// # }
/// ```
pub async fn create_aws_providers(region: Option<String>) -> AwsProviders {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }
    let sdk_config = loader.load().await;

    AwsProviders {
        cdn: Arc::new(CloudFrontProvider::new(&sdk_config)),
        dns: Arc::new(Route53Provider::new(&sdk_config)),
    }
}
