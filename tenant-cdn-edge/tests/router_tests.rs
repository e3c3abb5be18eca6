#![allow(clippy::unwrap_used)]

use tenant_cdn_edge::{
    EdgeRequest, NOT_FOUND_DOCUMENT, RouterConfig, TENANT_ID_HEADER, route, route_request,
};

fn config() -> RouterConfig {
    RouterConfig::default()
}

#[test]
fn subdomain_root_rewrites_to_index() {
    let decision = route("acme.example.com", "/", Some("example.com"), &config());

    assert_eq!(decision.tenant_id.as_deref(), Some("acme"));
    assert_eq!(
        decision.rewritten_path,
        "/tenants/acme/deployments/current/index.html"
    );
    assert!(
        decision
            .injected_headers
            .contains(&(TENANT_ID_HEADER.to_string(), "acme".to_string()))
    );
}

#[test]
fn subdomain_keeps_the_requested_path() {
    let decision = route("acme.example.com", "/assets/app.js", Some("example.com"), &config());
    assert_eq!(
        decision.rewritten_path,
        "/tenants/acme/deployments/current/assets/app.js"
    );
}

#[test]
fn reserved_label_is_not_found() {
    let decision = route("www.example.com", "/", Some("example.com"), &config());
    assert_eq!(decision.tenant_id, None);
    assert_eq!(decision.rewritten_path, NOT_FOUND_DOCUMENT);
    assert!(decision.injected_headers.is_empty());
}

#[test]
fn malformed_label_is_not_found() {
    let decision = route("-bad-.example.com", "/", Some("example.com"), &config());
    assert_eq!(decision.tenant_id, None);
    assert_eq!(decision.rewritten_path, NOT_FOUND_DOCUMENT);
}

#[test]
fn wildcard_path_prefix_is_stripped() {
    let decision = route("d111abc.cloudfront.net", "/tenant-acme/about.html", None, &config());
    assert_eq!(decision.tenant_id.as_deref(), Some("acme"));
    assert_eq!(
        decision.rewritten_path,
        "/tenants/acme/deployments/current/about.html"
    );
}

#[test]
fn wildcard_prefix_without_rest_serves_index() {
    let decision = route("d111abc.cloudfront.net", "/tenant-acme", None, &config());
    assert_eq!(
        decision.rewritten_path,
        "/tenants/acme/deployments/current/index.html"
    );
}

#[test]
fn wildcard_without_tenant_prefix_is_not_found() {
    let decision = route("d111abc.cloudfront.net", "/about.html", None, &config());
    assert_eq!(decision.rewritten_path, NOT_FOUND_DOCUMENT);
}

#[test]
fn unknown_host_is_not_found() {
    let decision = route("acme.other.org", "/", Some("example.com"), &config());
    assert_eq!(decision.tenant_id, None);
}

#[test]
fn host_is_case_and_port_insensitive() {
    let decision = route("ACME.Example.COM:8443", "/", Some("example.com"), &config());
    assert_eq!(decision.tenant_id.as_deref(), Some("acme"));
}

#[test]
fn traversal_is_not_found() {
    let decision = route("acme.example.com", "/../secrets", Some("example.com"), &config());
    assert_eq!(decision.rewritten_path, NOT_FOUND_DOCUMENT);
}

#[test]
fn default_base_domain_is_used_without_header() {
    let cfg = RouterConfig {
        default_base_domain: Some("example.com".to_string()),
        ..RouterConfig::default()
    };
    let decision = route("acme.example.com", "/", None, &cfg);
    assert_eq!(decision.tenant_id.as_deref(), Some("acme"));
}

#[test]
fn blank_base_domain_header_falls_back_to_default() {
    let cfg = RouterConfig {
        default_base_domain: Some("example.com".to_string()),
        ..RouterConfig::default()
    };

    for header in ["", "   "] {
        let decision = route("acme.example.com", "/", Some(header), &cfg);
        assert_eq!(decision.tenant_id.as_deref(), Some("acme"), "{header:?}");
    }

    let request = EdgeRequest::new("GET", "acme.example.com", "/")
        .with_header("x-tenant-base-domain", "");
    let (rewritten, _) = route_request(request, &cfg);
    assert_eq!(rewritten.header("x-tenant-id"), Some("acme"));
}

#[test]
fn request_rewrite_injects_headers() {
    let request = EdgeRequest::new("GET", "acme.example.com", "/")
        .with_header("X-Tenant-Base-Domain", "example.com")
        .with_header("Accept", "text/html");

    let (rewritten, decision) = route_request(request, &config());

    assert_eq!(decision.tenant_id.as_deref(), Some("acme"));
    assert_eq!(rewritten.method, "GET");
    assert_eq!(rewritten.uri, "/tenants/acme/deployments/current/index.html");
    assert_eq!(rewritten.header("x-tenant-id"), Some("acme"));
    assert_eq!(rewritten.header("cache-control"), Some("public, max-age=300"));
    assert_eq!(rewritten.header("accept"), Some("text/html"));
}

#[test]
fn existing_cache_control_is_kept() {
    let request = EdgeRequest::new("GET", "acme.example.com", "/index.html")
        .with_header("x-tenant-base-domain", "example.com")
        .with_header("Cache-Control", "no-cache");

    let (rewritten, _) = route_request(request, &config());

    assert_eq!(rewritten.header("cache-control"), Some("no-cache"));
    assert_eq!(rewritten.header("x-tenant-id"), Some("acme"));
}

#[test]
fn not_found_request_keeps_headers_untouched() {
    let request = EdgeRequest::new("GET", "www.example.com", "/")
        .with_header("x-tenant-base-domain", "example.com");

    let (rewritten, _) = route_request(request, &config());

    assert_eq!(rewritten.uri, NOT_FOUND_DOCUMENT);
    assert_eq!(rewritten.header("x-tenant-id"), None);
    assert_eq!(rewritten.header("cache-control"), None);
}

#[test]
fn decision_serializes_in_camel_case() {
    let decision = route("acme.example.com", "/", Some("example.com"), &config());
    let json = serde_json::to_value(&decision).unwrap();

    assert_eq!(json["tenantId"], "acme");
    assert_eq!(
        json["rewrittenPath"],
        "/tenants/acme/deployments/current/index.html"
    );
    assert_eq!(json["injectedHeaders"][0][0], "x-tenant-id");
}

#[test]
fn config_fills_missing_fields_with_defaults() {
    let cfg: RouterConfig =
        serde_json::from_str(r#"{ "defaultBaseDomain": "example.com" }"#).unwrap();

    assert_eq!(cfg.default_base_domain.as_deref(), Some("example.com"));
    assert_eq!(cfg.wildcard_domain, "cloudfront.net");
    assert_eq!(cfg.cache_control, "public, max-age=300");
}
