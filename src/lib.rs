//! # gwvalidate
//!
//! Semantic validation for Gateway-API-style routing configuration:
//! HTTP/gRPC/TCP/UDP routes, Gateways and their listeners, GatewayClasses,
//! ListenerSets and BackendTrafficPolicies.
//!
//! ## Architecture
//!
//! ```text
//! YAML/JSON documents → ConfigDocument → object validators → ErrorList
//!                                             ↓
//!                          field-group validators → primitives
//! ```
//!
//! Documents are assumed to be structurally valid already. The validators
//! check what a schema cannot: consistency between sibling fields, across
//! list entries and across levels. Every violation is collected with the
//! path of the offending field; nothing stops at the first problem.
//!
//! ## Example Usage
//!
//! ```rust
//! use gwvalidate::domain::{HttpRoute, HttpRouteMatch, HttpRouteRule, PathMatchType};
//! use gwvalidate::validate_http_route;
//!
//! let mut route = HttpRoute::default();
//! route.spec.rules.push(HttpRouteRule {
//!     matches: vec![HttpRouteMatch::path(PathMatchType::PathPrefix, "/.")],
//!     ..Default::default()
//! });
//!
//! let errs = validate_http_route(&route);
//! assert_eq!(errs.len(), 1);
//! assert_eq!(errs[0].field.to_string(), "spec.rules[0].matches[0].path.value");
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod validation;

// Re-export commonly used types and entry points
pub use config::{load_settings, Settings};
pub use document::{
    load_documents, parse_documents, validate_document, validate_document_update, ConfigDocument,
};
pub use errors::{GwValidateError, Result};
pub use validation::{
    validate_backend_traffic_policy, validate_gateway, validate_gateway_class,
    validate_gateway_class_update, validate_grpc_route, validate_http_route, validate_listener_set,
    validate_tcp_route, validate_udp_route, ErrorKind, ErrorList, FieldError, FieldPath,
};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_available() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "gwvalidate");
    }
}
