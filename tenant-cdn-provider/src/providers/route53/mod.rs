//! Amazon Route 53 DNS Provider

mod error;
mod provider;

use aws_sdk_route53::Client;

/// Amazon Route 53 DNS Provider
pub struct Route53Provider {
    pub(crate) client: Client,
}

impl Route53Provider {
    /// 基于已加载的 AWS SDK 配置创建
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// 使用现成的 SDK 客户端创建
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}
