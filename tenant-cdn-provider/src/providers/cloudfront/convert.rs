//! CloudFront SDK 类型与统一类型之间的转换

use aws_sdk_cloudfront::error::BuildError;
use aws_sdk_cloudfront::types as cf;

use crate::types::{
    CacheBehavior, DeploymentState, Distribution, DistributionConfig, DistributionSummary,
    ErrorDocument, HttpMethod, OriginSpec, ResourceTag, ViewerProtocol,
};

/// 集合长度转为 CloudFront 的 `Quantity`
fn quantity(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

fn method_to_sdk(method: HttpMethod) -> cf::Method {
    match method {
        HttpMethod::Get => cf::Method::from("GET"),
        HttpMethod::Head => cf::Method::from("HEAD"),
        HttpMethod::Options => cf::Method::from("OPTIONS"),
    }
}

fn method_from_sdk(method: &cf::Method) -> Option<HttpMethod> {
    match method.as_str() {
        "GET" => Some(HttpMethod::Get),
        "HEAD" => Some(HttpMethod::Head),
        "OPTIONS" => Some(HttpMethod::Options),
        _ => None,
    }
}

fn viewer_protocol_to_sdk(policy: ViewerProtocol) -> cf::ViewerProtocolPolicy {
    match policy {
        ViewerProtocol::AllowAll => cf::ViewerProtocolPolicy::from("allow-all"),
        ViewerProtocol::RedirectToHttps => cf::ViewerProtocolPolicy::from("redirect-to-https"),
        ViewerProtocol::HttpsOnly => cf::ViewerProtocolPolicy::from("https-only"),
    }
}

fn viewer_protocol_from_sdk(policy: &cf::ViewerProtocolPolicy) -> ViewerProtocol {
    match policy.as_str() {
        "allow-all" => ViewerProtocol::AllowAll,
        "https-only" => ViewerProtocol::HttpsOnly,
        _ => ViewerProtocol::RedirectToHttps,
    }
}

/// 别名列表 -> `Aliases`（空列表时不带 `Items`）
fn aliases_to_sdk(aliases: &[String]) -> Result<cf::Aliases, BuildError> {
    let items = if aliases.is_empty() {
        None
    } else {
        Some(aliases.to_vec())
    };
    cf::Aliases::builder()
        .quantity(quantity(aliases.len()))
        .set_items(items)
        .build()
}

fn origin_to_sdk(origin: &OriginSpec) -> Result<cf::Origins, BuildError> {
    let s3 = cf::S3OriginConfig::builder()
        .origin_access_identity(&origin.origin_access_identity)
        .build();
    let origin = cf::Origin::builder()
        .id(&origin.id)
        .domain_name(&origin.domain_name)
        .origin_path(&origin.origin_path)
        .s3_origin_config(s3)
        .build()?;
    cf::Origins::builder().quantity(1).items(origin).build()
}

fn cache_behavior_to_sdk(behavior: &CacheBehavior) -> Result<cf::DefaultCacheBehavior, BuildError> {
    let methods: Vec<cf::Method> = behavior
        .allowed_methods
        .iter()
        .copied()
        .map(method_to_sdk)
        .collect();

    let cached = cf::CachedMethods::builder()
        .quantity(quantity(methods.len()))
        .set_items(Some(methods.clone()))
        .build()?;
    let allowed = cf::AllowedMethods::builder()
        .quantity(quantity(methods.len()))
        .set_items(Some(methods))
        .cached_methods(cached)
        .build()?;

    let cookies = cf::CookiePreference::builder()
        .forward(if behavior.forward_cookies {
            cf::ItemSelection::from("all")
        } else {
            cf::ItemSelection::from("none")
        })
        .build()?;
    let forwarded = cf::ForwardedValues::builder()
        .query_string(behavior.forward_query_string)
        .cookies(cookies)
        .build()?;

    cf::DefaultCacheBehavior::builder()
        .target_origin_id(&behavior.target_origin_id)
        .viewer_protocol_policy(viewer_protocol_to_sdk(behavior.viewer_protocol))
        .allowed_methods(allowed)
        .forwarded_values(forwarded)
        .compress(behavior.compress)
        .min_ttl(behavior.min_ttl)
        .default_ttl(behavior.default_ttl)
        .max_ttl(behavior.max_ttl)
        .build()
}

fn error_documents_to_sdk(docs: &[ErrorDocument]) -> Result<cf::CustomErrorResponses, BuildError> {
    let items = docs
        .iter()
        .map(|doc| {
            cf::CustomErrorResponse::builder()
                .error_code(i32::from(doc.error_code))
                .response_code(doc.response_code.to_string())
                .response_page_path(&doc.response_page_path)
                .error_caching_min_ttl(doc.caching_min_ttl)
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let items = if items.is_empty() { None } else { Some(items) };
    cf::CustomErrorResponses::builder()
        .quantity(quantity(docs.len()))
        .set_items(items)
        .build()
}

/// 有别名且配置了证书时使用 SNI 证书，否则使用默认证书
fn viewer_certificate_to_sdk(config: &DistributionConfig) -> cf::ViewerCertificate {
    match config.certificate_arn.as_deref() {
        Some(arn) if !config.aliases.is_empty() => cf::ViewerCertificate::builder()
            .acm_certificate_arn(arn)
            .ssl_support_method(cf::SslSupportMethod::from("sni-only"))
            .minimum_protocol_version(cf::MinimumProtocolVersion::from("TLSv1.2_2021"))
            .build(),
        _ => cf::ViewerCertificate::builder()
            .cloud_front_default_certificate(true)
            .build(),
    }
}

/// 统一配置 -> SDK 配置
pub(crate) fn config_to_sdk(config: &DistributionConfig) -> Result<cf::DistributionConfig, BuildError> {
    cf::DistributionConfig::builder()
        .caller_reference(&config.caller_reference)
        .comment(&config.comment)
        .enabled(config.enabled)
        .aliases(aliases_to_sdk(&config.aliases)?)
        .origins(origin_to_sdk(&config.origin)?)
        .default_cache_behavior(cache_behavior_to_sdk(&config.cache_behavior)?)
        .default_root_object(&config.default_root_object)
        .custom_error_responses(error_documents_to_sdk(&config.error_documents)?)
        .viewer_certificate(viewer_certificate_to_sdk(config))
        .price_class(cf::PriceClass::from(config.price_class.as_str()))
        .build()
}

/// SDK 配置 -> 统一配置
///
/// 只取本系统建模的字段；多源站分发只保留第一个源站。
pub(crate) fn config_from_sdk(config: &cf::DistributionConfig) -> DistributionConfig {
    let origin = config
        .origins()
        .and_then(|o| o.items().first())
        .map(|o| OriginSpec {
            id: o.id().to_string(),
            domain_name: o.domain_name().to_string(),
            origin_path: o.origin_path().unwrap_or_default().to_string(),
            origin_access_identity: o
                .s3_origin_config()
                .map(|s| s.origin_access_identity().to_string())
                .unwrap_or_default(),
        })
        .unwrap_or_else(|| OriginSpec {
            id: String::new(),
            domain_name: String::new(),
            origin_path: String::new(),
            origin_access_identity: String::new(),
        });

    let cache_behavior = config.default_cache_behavior().map_or_else(
        || CacheBehavior {
            target_origin_id: origin.id.clone(),
            allowed_methods: vec![HttpMethod::Get, HttpMethod::Head],
            viewer_protocol: ViewerProtocol::RedirectToHttps,
            forward_cookies: false,
            forward_query_string: false,
            compress: true,
            min_ttl: 0,
            default_ttl: 86_400,
            max_ttl: 31_536_000,
        },
        |b| CacheBehavior {
            target_origin_id: b.target_origin_id().to_string(),
            allowed_methods: b
                .allowed_methods()
                .map(|m| m.items().iter().filter_map(method_from_sdk).collect())
                .unwrap_or_default(),
            viewer_protocol: viewer_protocol_from_sdk(b.viewer_protocol_policy()),
            forward_cookies: b
                .forwarded_values()
                .and_then(|f| f.cookies())
                .is_some_and(|c| c.forward().as_str() != "none"),
            forward_query_string: b.forwarded_values().is_some_and(|f| f.query_string()),
            compress: b.compress().unwrap_or(false),
            min_ttl: b.min_ttl().unwrap_or(0),
            default_ttl: b.default_ttl().unwrap_or(86_400),
            max_ttl: b.max_ttl().unwrap_or(31_536_000),
        },
    );

    let error_documents = config
        .custom_error_responses()
        .map(|r| {
            r.items()
                .iter()
                .map(|item| ErrorDocument {
                    error_code: u16::try_from(item.error_code()).unwrap_or_default(),
                    response_code: item
                        .response_code()
                        .and_then(|c| c.parse().ok())
                        .unwrap_or_default(),
                    response_page_path: item.response_page_path().unwrap_or_default().to_string(),
                    caching_min_ttl: item.error_caching_min_ttl().unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    DistributionConfig {
        caller_reference: config.caller_reference().to_string(),
        comment: config.comment().to_string(),
        enabled: config.enabled(),
        aliases: config
            .aliases()
            .map(|a| a.items().to_vec())
            .unwrap_or_default(),
        origin,
        cache_behavior,
        default_root_object: config.default_root_object().unwrap_or_default().to_string(),
        error_documents,
        certificate_arn: config
            .viewer_certificate()
            .and_then(|v| v.acm_certificate_arn())
            .map(str::to_string),
        price_class: config
            .price_class()
            .map_or_else(|| "PriceClass_All".to_string(), |p| p.as_str().to_string()),
    }
}

/// SDK 分发 -> 统一分发
pub(crate) fn distribution_from_sdk(
    distribution: &cf::Distribution,
    etag: Option<&str>,
) -> Option<Distribution> {
    let config = distribution.distribution_config()?;
    Some(Distribution {
        id: distribution.id().to_string(),
        arn: distribution.arn().to_string(),
        domain_name: distribution.domain_name().to_string(),
        status: DeploymentState::parse(distribution.status()),
        config: config_from_sdk(config),
        etag: etag.map(str::to_string),
    })
}

/// SDK 列表项 -> 统一列表项
pub(crate) fn summary_from_sdk(summary: &cf::DistributionSummary) -> DistributionSummary {
    DistributionSummary {
        id: summary.id().to_string(),
        arn: summary.arn().to_string(),
        domain_name: summary.domain_name().to_string(),
        aliases: summary
            .aliases()
            .map(|a| a.items().to_vec())
            .unwrap_or_default(),
        status: DeploymentState::parse(summary.status()),
        enabled: summary.enabled(),
        comment: summary.comment().to_string(),
        origin_paths: summary
            .origins()
            .map(|o| {
                o.items()
                    .iter()
                    .filter_map(|origin| origin.origin_path())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// 统一标签 -> SDK 标签集合
pub(crate) fn tags_to_sdk(tags: &[ResourceTag]) -> Result<cf::Tags, BuildError> {
    let items = tags
        .iter()
        .map(|t| cf::Tag::builder().key(&t.key).value(&t.value).build())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(cf::Tags::builder().set_items(Some(items)).build())
}

/// SDK 标签集合 -> 统一标签
pub(crate) fn tags_from_sdk(tags: Option<&cf::Tags>) -> Vec<ResourceTag> {
    tags.map(|t| {
        t.items()
            .iter()
            .map(|tag| ResourceTag::new(tag.key(), tag.value().unwrap_or_default()))
            .collect()
    })
    .unwrap_or_default()
}
