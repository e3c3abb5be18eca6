//! Amazon CloudFront CDN Provider

mod convert;
mod error;
mod provider;

use aws_sdk_cloudfront::Client;

/// 列表接口单页最大条数
pub(crate) const MAX_PAGE_SIZE_DISTRIBUTIONS: i32 = 100;

/// Amazon CloudFront CDN Provider
pub struct CloudFrontProvider {
    pub(crate) client: Client,
}

impl CloudFrontProvider {
    /// 基于已加载的 AWS SDK 配置创建
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// 使用现成的 SDK 客户端创建（自定义 endpoint、测试桩等）
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}
