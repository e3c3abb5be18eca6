//! CDN / DNS control-plane implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "aws")]
mod cloudfront;
#[cfg(feature = "aws")]
mod route53;

#[cfg(feature = "aws")]
pub use cloudfront::CloudFrontProvider;
#[cfg(feature = "aws")]
pub use route53::Route53Provider;
