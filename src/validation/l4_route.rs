//! TCPRoute and UDPRoute validation.
//!
//! Layer-4 routes only forward to backends, so the checks are limited to
//! backend ports and parent reference disambiguation.

use crate::domain::{L4RouteSpec, ObjectMeta, TcpRoute, UdpRoute};

use super::backends::validate_rule_backend_ports;
use super::field::{ErrorList, FieldPath};
use super::parent_refs::validate_parent_refs;

pub fn validate_tcp_route(route: &TcpRoute) -> ErrorList {
    validate_l4_route(&route.metadata, &route.spec)
}

pub fn validate_udp_route(route: &UdpRoute) -> ErrorList {
    validate_l4_route(&route.metadata, &route.spec)
}

fn validate_l4_route(metadata: &ObjectMeta, spec: &L4RouteSpec) -> ErrorList {
    let spec_path = FieldPath::new("spec");
    let mut errs = ErrorList::new();

    let backends = spec.rules.iter().map(|rule| rule.backend_refs.iter().map(|b| &b.object));
    errs.append(validate_rule_backend_ports(backends, &spec_path.child("rules")));
    errs.append(validate_parent_refs(
        &spec.parent_refs,
        metadata.namespace_or(""),
        &spec_path.child("parentRefs"),
    ));

    errs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BackendRef, L4RouteRule, ParentReference};

    #[test]
    fn tcp_route_checks_every_rule() {
        let mut route = TcpRoute::default();
        route.spec.rules = vec![
            L4RouteRule { name: None, backend_refs: vec![BackendRef::service("a", Some(9000))] },
            L4RouteRule { name: None, backend_refs: vec![BackendRef::service("b", None)] },
        ];
        route.spec.parent_refs = vec![ParentReference::new("gw"), ParentReference::new("gw")];

        let errs = validate_tcp_route(&route);
        let fields: Vec<_> = errs.iter().map(|e| e.field.to_string()).collect();
        assert_eq!(fields, vec!["spec.rules[1].backendRefs[0].port", "spec.parentRefs"]);
    }

    #[test]
    fn valid_udp_route() {
        let mut route = UdpRoute::default();
        route.spec.rules = vec![L4RouteRule { name: None, backend_refs: vec![BackendRef::service("dns", Some(53))] }];
        route.spec.parent_refs = vec![
            ParentReference::new("gw").with_section_name("udp-a"),
            ParentReference::new("gw").with_section_name("udp-b"),
        ];
        assert!(validate_udp_route(&route).is_empty());
    }
}
