//! # Validation Module
//!
//! Semantic validation of decoded gateway configuration objects. Shape
//! checks (required fields, string formats, lengths) are assumed to have
//! happened at decode time; the rules here look at relationships across
//! fields, across list entries and across levels of the configuration.
//!
//! Validation is layered:
//! 1. Primitive predicates (`primitives`)
//! 2. Field-group validators (path matches, filters, timeouts, parent
//!    references, listeners, ...)
//! 3. One object-level entry point per kind
//!
//! Every entry point walks the whole object and returns all violations as
//! an [`ErrorList`], ordered outer-to-inner and left-to-right. Nothing is
//! fatal to further checking, with one exception: parent reference
//! disambiguation stops at the first collision.

pub mod field;
pub mod primitives;

mod backend_policy;
mod backends;
mod filters;
mod gateway;
mod gateway_class;
mod grpc_route;
mod http_route;
mod l4_route;
mod listener_set;
mod listeners;
mod matches;
mod parent_refs;
mod timeouts;

pub use field::{ErrorKind, ErrorList, FieldError, FieldPath};

// Object-level entry points
pub use backend_policy::validate_backend_traffic_policy;
pub use gateway::validate_gateway;
pub use gateway_class::{validate_gateway_class, validate_gateway_class_update};
pub use grpc_route::validate_grpc_route;
pub use http_route::validate_http_route;
pub use l4_route::{validate_tcp_route, validate_udp_route};
pub use listener_set::validate_listener_set;

// Field-group validators
pub use backends::validate_backend_port;
pub use filters::{validate_header_modifier, validate_http_route_filters, validate_path_modifier};
pub use gateway::validate_addresses;
pub use grpc_route::validate_grpc_route_filters;
pub use listeners::validate_listeners;
pub use matches::{validate_header_match_names, validate_path_match, validate_query_param_match_names};
pub use parent_refs::validate_parent_refs;
pub use timeouts::validate_timeouts;
