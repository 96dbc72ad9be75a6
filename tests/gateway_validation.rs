//! Gateway, GatewayClass and ListenerSet validation.

mod common;

use common::{document, fields, rendered};
use gwvalidate::domain::{
    AddressType, Gateway, GatewayAddress, GatewayClass, Listener, ListenerTlsConfig, ProtocolType,
    SecretObjectReference,
};
use gwvalidate::{
    validate_document, validate_document_update, validate_gateway, validate_gateway_class_update,
    ErrorKind,
};

fn gateway(listeners: Vec<Listener>, addresses: Vec<GatewayAddress>) -> Gateway {
    let mut gateway = Gateway::default();
    gateway.spec.gateway_class_name = "example".into();
    gateway.spec.listeners = listeners;
    gateway.spec.addresses = addresses;
    gateway
}

fn certificate() -> ListenerTlsConfig {
    ListenerTlsConfig::terminate(vec![SecretObjectReference::new("example-com")])
}

#[test]
fn test_valid_gateway_from_yaml() {
    let doc = document(
        r#"
apiVersion: gateway.networking.k8s.io/v1
kind: Gateway
metadata:
  name: gw
spec:
  gatewayClassName: example
  listeners:
    - name: http
      port: 80
      protocol: HTTP
    - name: https
      port: 443
      protocol: HTTPS
      hostname: "*.example.com"
      tls:
        mode: Terminate
        certificateRefs:
          - name: wildcard
    - name: passthrough
      port: 8443
      protocol: TLS
      tls:
        mode: Passthrough
  addresses:
    - value: 10.0.0.1
    - type: Hostname
      value: gw.example.com
    - type: example.com/pool
      value: pool-a
"#,
    );
    let errs = validate_document(&doc);
    assert!(errs.is_empty(), "{errs}");
}

#[test]
fn test_listeners_then_addresses() {
    let gw = gateway(
        vec![
            Listener::new("web", ProtocolType::Https, 443),
            Listener::new("web", ProtocolType::Tcp, 9000).with_hostname("tcp.example.com"),
        ],
        vec![
            GatewayAddress::new(AddressType::IpAddress, "10.0.0.300"),
            GatewayAddress::new(AddressType::Hostname, "gw.example.com"),
            GatewayAddress::new(AddressType::Hostname, "gw.example.com"),
        ],
    );
    let errs = validate_gateway(&gw);
    assert_eq!(
        fields(&errs),
        vec![
            "spec.listeners[0].tls",
            "spec.listeners[1].hostname",
            "spec.listeners[1].name",
            "spec.addresses[0]",
            "spec.addresses[2]",
        ]
    );
    let kinds: Vec<_> = errs.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::Forbidden,
            ErrorKind::Forbidden,
            ErrorKind::Duplicate,
            ErrorKind::Invalid,
            ErrorKind::Duplicate,
        ]
    );
}

#[test]
fn test_address_values_are_unique_per_type() {
    let gw = gateway(
        vec![],
        vec![
            GatewayAddress::new(AddressType::IpAddress, "10.0.0.1"),
            GatewayAddress { address_type: None, value: "10.0.0.1".into() },
            GatewayAddress::new(AddressType::Hostname, "example.com"),
            GatewayAddress::new(AddressType::Hostname, "Example.com"),
        ],
    );
    let errs = validate_gateway(&gw);
    assert_eq!(fields(&errs), vec!["spec.addresses[1]", "spec.addresses[3]"]);
    assert_eq!(errs[0].to_string(), "spec.addresses[1]: Duplicate value: \"10.0.0.1\"");
    assert_eq!(errs[1].kind, ErrorKind::Invalid);
    assert!(errs[1].detail.starts_with("must only contain valid characters"));
}

#[test]
fn test_certificates_required_for_terminate() {
    let gw = gateway(
        vec![
            Listener::new("https", ProtocolType::Https, 443).with_tls(ListenerTlsConfig::default()),
            Listener::new("tls", ProtocolType::Tls, 443)
                .with_hostname("tls.example.com")
                .with_tls(certificate()),
        ],
        vec![],
    );
    let errs = validate_gateway(&gw);
    assert_eq!(fields(&errs), vec!["spec.listeners[0].tls.certificateRefs"]);
    assert_eq!(errs[0].kind, ErrorKind::Required);
}

#[test]
fn test_non_tls_protocols_skip_certificate_check() {
    let gw = gateway(
        vec![
            Listener::new("http", ProtocolType::Http, 80).with_tls(ListenerTlsConfig::default()),
            Listener::new("quic", ProtocolType::from("example.com/quic"), 9001)
                .with_tls(ListenerTlsConfig::default()),
        ],
        vec![],
    );
    let errs = validate_gateway(&gw);
    assert_eq!(fields(&errs), vec!["spec.listeners[0].tls"]);
    assert_eq!(errs[0].kind, ErrorKind::Forbidden);
}

#[test]
fn test_port_protocol_hostname_must_be_unique() {
    let gw = gateway(
        vec![
            Listener::new("a", ProtocolType::Https, 443).with_hostname("a.example.com").with_tls(certificate()),
            Listener::new("b", ProtocolType::Https, 443).with_hostname("b.example.com").with_tls(certificate()),
            Listener::new("c", ProtocolType::Https, 443).with_hostname("a.example.com").with_tls(certificate()),
        ],
        vec![],
    );
    assert_eq!(
        rendered(&validate_gateway(&gw)),
        vec![
            "spec.listeners[2]: Duplicate value: \"a.example.com:HTTPS:443\": combination of port, protocol, and hostname must be unique for each listener"
        ]
    );
}

#[test]
fn test_gateway_class_controller_is_immutable() {
    let old = GatewayClass::new("gc", "example.com/gateway");
    let renamed = GatewayClass::new("gc", "example.com/other");

    assert!(validate_gateway_class_update(Some(&old), Some(&old.clone())).is_empty());
    assert!(validate_gateway_class_update(None, Some(&renamed)).is_empty());
    assert!(validate_gateway_class_update(Some(&old), None).is_empty());

    let errs = validate_gateway_class_update(Some(&old), Some(&renamed));
    assert_eq!(
        rendered(&errs),
        vec!["spec.controllerName: Invalid value: \"example.com/other\": cannot update an immutable field"]
    );
}

#[test]
fn test_gateway_class_update_through_documents() {
    let old = document("kind: GatewayClass\nmetadata:\n  name: gc\nspec:\n  controllerName: example.com/a\n");
    let new = document("kind: GatewayClass\nmetadata:\n  name: gc\nspec:\n  controllerName: example.com/a\n  description: same controller\n");
    assert!(validate_document_update(&old, &new).unwrap().is_empty());
}

#[test]
fn test_listener_set() {
    let doc = document(
        r#"
kind: ListenerSet
metadata:
  name: extra
spec:
  parentRef:
    name: gw
    kind: Gateway
    group: gateway.networking.k8s.io
  listeners:
    - name: udp
      port: 53
      protocol: UDP
      hostname: dns.example.com
"#,
    );
    let errs = validate_document(&doc);
    assert_eq!(fields(&errs), vec!["spec.listeners[0].hostname"]);

    let doc = document("kind: ListenerSet\nmetadata:\n  name: extra\nspec:\n  parentRef:\n    name: gw\n    kind: Service\n");
    let errs = validate_document(&doc);
    assert_eq!(
        rendered(&errs),
        vec!["spec.parentRef.kind: Unsupported value: \"Service\": supported values: \"Gateway\""]
    );
}
