//! Tenant CDN Edge Router
//!
//! Maps an incoming viewer request (host + URI) to the tenant's storage
//! prefix and injects the tenant headers. Runs per request at the edge, so it
//! is a pure function with no I/O.
//!
//! Two routing paths are supported:
//! - `{tenant}.{base-domain}` custom aliases
//! - `/tenant-{id}/...` paths on the control plane's wildcard domain
//!
//! ```
//! use tenant_cdn_edge::{RouterConfig, route};
//!
//! let config = RouterConfig::default();
//! let decision = route("acme.example.com", "/", Some("example.com"), &config);
//! assert_eq!(decision.tenant_id.as_deref(), Some("acme"));
//! assert_eq!(decision.rewritten_path, "/tenants/acme/deployments/current/index.html");
//! ```

mod router;

pub use router::{
    BASE_DOMAIN_HEADER, CACHE_CONTROL_HEADER, EdgeRequest, NOT_FOUND_DOCUMENT, RESERVED_LABELS,
    RouterConfig, RoutingDecision, TENANT_ID_HEADER, is_valid_tenant_id, route, route_request,
};
