//! BackendTrafficPolicy and L4 route validation through decoded documents.

mod common;

use common::{document, fields, rendered};
use gwvalidate::domain::{BackendRef, L4RouteRule, ParentReference, TcpRoute, UdpRoute};
use gwvalidate::{validate_document, validate_tcp_route, validate_udp_route, ErrorKind};

#[test]
fn test_valid_policy() {
    let doc = document(
        r#"
apiVersion: gateway.networking.x-k8s.io/v1alpha1
kind: BackendTrafficPolicy
metadata:
  name: lb-policy
spec:
  targetRefs:
    - group: ""
      kind: Service
      name: foo
  retryConstraint:
    budget:
      percent: 20
      interval: 10s
    minRetryRate:
      count: 3
      interval: 1s
  sessionPersistence:
    sessionName: foo
    absoluteTimeout: 1h
    idleTimeout: 30m
    type: Cookie
    cookieConfig:
      lifetimeType: Permanent
"#,
    );
    let errs = validate_document(&doc);
    assert!(errs.is_empty(), "{errs}");
}

#[test]
fn test_policy_violations_in_order() {
    let doc = document(
        r#"
kind: BackendTrafficPolicy
metadata:
  name: lb-policy
spec:
  targetRefs:
    - {group: "", kind: Service, name: foo}
    - {group: "", kind: Service, name: foo}
  retry:
    budget:
      percent: 120
      interval: 2h
    minRetryRate:
      count: 3
      interval: 2h
  sessionPersistence:
    type: Header
    cookieConfig:
      lifetimeType: Permanent
"#,
    );
    let errs = validate_document(&doc);
    assert_eq!(
        fields(&errs),
        vec![
            "spec.targetRefs[1]",
            "spec.retryConstraint.budget.percent",
            "spec.retryConstraint.budget.interval",
            "spec.retryConstraint.minRetryRate.interval",
            "spec.sessionPersistence.cookieConfig",
            "spec.sessionPersistence.absoluteTimeout",
        ]
    );
    let kinds: Vec<_> = errs.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::Duplicate,
            ErrorKind::Invalid,
            ErrorKind::Invalid,
            ErrorKind::Invalid,
            ErrorKind::Forbidden,
            ErrorKind::Required,
        ]
    );
}

#[test]
fn test_l4_routes() {
    let mut tcp = TcpRoute::default();
    tcp.spec.rules = vec![L4RouteRule {
        name: None,
        backend_refs: vec![BackendRef::service("db", None), BackendRef::service("db", Some(5432))],
    }];
    tcp.spec.parent_refs = vec![
        ParentReference::new("gw").with_section_name("tcp"),
        ParentReference::new("gw").with_section_name("tcp"),
    ];
    assert_eq!(
        rendered(&validate_tcp_route(&tcp)),
        vec![
            "spec.rules[0].backendRefs[0].port: Required value: missing port for Service reference",
            "spec.parentRefs[1].sectionName: Invalid value: \"tcp\": must be unique when ParentRefs includes 2 or more references to the same parent",
        ]
    );

    let udp = document(
        "kind: UDPRoute\nmetadata:\n  name: dns\nspec:\n  rules:\n    - backendRefs:\n        - name: coredns\n          port: 53\n",
    );
    assert!(validate_document(&udp).is_empty());
    assert!(validate_udp_route(&UdpRoute::default()).is_empty());
}
