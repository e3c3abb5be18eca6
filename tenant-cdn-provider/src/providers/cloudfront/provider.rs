//! CloudFront `CdnProvider` trait 实现

use async_trait::async_trait;
use aws_sdk_cloudfront::types as cf;

use crate::error::Result;
use crate::traits::{CdnProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{
    CreateDistributionRequest, Distribution, DistributionConfig, DistributionPage,
    InvalidationRequest, ResourceTag, VersionedConfig,
};

use super::convert::{
    config_from_sdk, config_to_sdk, distribution_from_sdk, summary_from_sdk, tags_from_sdk,
    tags_to_sdk,
};
use super::{CloudFrontProvider, MAX_PAGE_SIZE_DISTRIBUTIONS};

impl CloudFrontProvider {
    fn distribution_context(distribution_id: &str) -> ErrorContext {
        ErrorContext {
            distribution_id: Some(distribution_id.to_string()),
            ..Default::default()
        }
    }

    /// 给新建分发打标签
    ///
    /// 标签失败不影响创建结果：comment 中仍带有归属信息。
    async fn tag_distribution(&self, arn: &str, tags: &[ResourceTag]) {
        if tags.is_empty() {
            return;
        }
        let sdk_tags = match tags_to_sdk(tags) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("[{}] Failed to build tags for {arn}: {e}", self.provider_name());
                return;
            }
        };
        if let Err(e) = self
            .client
            .tag_resource()
            .resource(arn)
            .tags(sdk_tags)
            .send()
            .await
        {
            let err = self.sdk_error(e, ErrorContext::default());
            log::warn!("[{}] Failed to tag {arn}: {err}", self.provider_name());
        }
    }
}

#[async_trait]
impl CdnProvider for CloudFrontProvider {
    fn id(&self) -> &'static str {
        "cloudfront"
    }

    async fn list_distributions(&self, marker: Option<&str>) -> Result<DistributionPage> {
        log::debug!("[{}] ListDistributions marker={marker:?}", self.provider_name());

        let output = self
            .client
            .list_distributions()
            .set_marker(marker.map(str::to_string))
            .max_items(MAX_PAGE_SIZE_DISTRIBUTIONS)
            .send()
            .await
            .map_err(|e| self.sdk_error(e, ErrorContext::default()))?;

        let Some(list) = output.distribution_list() else {
            return Ok(DistributionPage::default());
        };

        let next_marker = if list.is_truncated() {
            list.next_marker().map(str::to_string)
        } else {
            None
        };

        Ok(DistributionPage {
            items: list.items().iter().map(summary_from_sdk).collect(),
            next_marker,
        })
    }

    async fn get_distribution(&self, distribution_id: &str) -> Result<Distribution> {
        log::debug!("[{}] GetDistribution {distribution_id}", self.provider_name());

        let output = self
            .client
            .get_distribution()
            .id(distribution_id)
            .send()
            .await
            .map_err(|e| self.sdk_error(e, Self::distribution_context(distribution_id)))?;

        output
            .distribution()
            .and_then(|d| distribution_from_sdk(d, output.e_tag()))
            .ok_or_else(|| self.parse_error("响应中缺少 Distribution 字段"))
    }

    async fn get_distribution_config(&self, distribution_id: &str) -> Result<VersionedConfig> {
        log::debug!(
            "[{}] GetDistributionConfig {distribution_id}",
            self.provider_name()
        );

        let output = self
            .client
            .get_distribution_config()
            .id(distribution_id)
            .send()
            .await
            .map_err(|e| self.sdk_error(e, Self::distribution_context(distribution_id)))?;

        let config = output
            .distribution_config()
            .ok_or_else(|| self.parse_error("响应中缺少 DistributionConfig 字段"))?;
        let etag = output
            .e_tag()
            .ok_or_else(|| self.parse_error("响应中缺少 ETag"))?;

        Ok(VersionedConfig {
            config: config_from_sdk(config),
            etag: etag.to_string(),
        })
    }

    async fn create_distribution(&self, req: &CreateDistributionRequest) -> Result<Distribution> {
        log::debug!(
            "[{}] CreateDistribution caller_reference={} aliases={:?}",
            self.provider_name(),
            req.config.caller_reference,
            req.config.aliases
        );

        let sdk_config = config_to_sdk(&req.config).map_err(|e| self.build_error(e))?;
        let context = ErrorContext {
            alias: req.config.aliases.first().cloned(),
            ..Default::default()
        };

        let output = self
            .client
            .create_distribution()
            .distribution_config(sdk_config)
            .send()
            .await
            .map_err(|e| self.sdk_error(e, context))?;

        let distribution = output
            .distribution()
            .and_then(|d| distribution_from_sdk(d, output.e_tag()))
            .ok_or_else(|| self.parse_error("响应中缺少 Distribution 字段"))?;

        self.tag_distribution(&distribution.arn, &req.tags).await;

        Ok(distribution)
    }

    async fn update_distribution(
        &self,
        distribution_id: &str,
        config: &DistributionConfig,
        etag: &str,
    ) -> Result<Distribution> {
        log::debug!(
            "[{}] UpdateDistribution {distribution_id} enabled={} aliases={:?}",
            self.provider_name(),
            config.enabled,
            config.aliases
        );

        let sdk_config = config_to_sdk(config).map_err(|e| self.build_error(e))?;
        let context = ErrorContext {
            distribution_id: Some(distribution_id.to_string()),
            alias: config.aliases.first().cloned(),
            ..Default::default()
        };

        let output = self
            .client
            .update_distribution()
            .id(distribution_id)
            .if_match(etag)
            .distribution_config(sdk_config)
            .send()
            .await
            .map_err(|e| self.sdk_error(e, context))?;

        output
            .distribution()
            .and_then(|d| distribution_from_sdk(d, output.e_tag()))
            .ok_or_else(|| self.parse_error("响应中缺少 Distribution 字段"))
    }

    async fn create_invalidation(&self, req: &InvalidationRequest) -> Result<String> {
        log::debug!(
            "[{}] CreateInvalidation {} paths={:?}",
            self.provider_name(),
            req.distribution_id,
            req.paths
        );

        let paths = cf::Paths::builder()
            .quantity(i32::try_from(req.paths.len()).unwrap_or(i32::MAX))
            .set_items(Some(req.paths.clone()))
            .build()
            .map_err(|e| self.build_error(e))?;
        let batch = cf::InvalidationBatch::builder()
            .paths(paths)
            .caller_reference(&req.caller_reference)
            .build()
            .map_err(|e| self.build_error(e))?;

        let output = self
            .client
            .create_invalidation()
            .distribution_id(&req.distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|e| self.sdk_error(e, Self::distribution_context(&req.distribution_id)))?;

        output
            .invalidation()
            .map(|i| i.id().to_string())
            .ok_or_else(|| self.parse_error("响应中缺少 Invalidation 字段"))
    }

    async fn list_tags(&self, arn: &str) -> Result<Vec<ResourceTag>> {
        let output = self
            .client
            .list_tags_for_resource()
            .resource(arn)
            .send()
            .await
            .map_err(|e| self.sdk_error(e, ErrorContext::default()))?;

        Ok(tags_from_sdk(output.tags()))
    }
}
