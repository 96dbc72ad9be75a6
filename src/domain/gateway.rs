//! Gateway domain types
//!
//! Gateways, their listeners and addresses, the GatewayClass that names the
//! controller responsible for a Gateway, and ListenerSets that attach extra
//! listeners to an existing Gateway.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::meta::ObjectMeta;
use super::references::SecretObjectReference;

string_enum! {
    /// Listener protocol. Values outside the core set are
    /// implementation-specific (domain-prefixed) and carry no constraints.
    ProtocolType {
        Http => "HTTP",
        Https => "HTTPS",
        Tls => "TLS",
        Tcp => "TCP",
        Udp => "UDP",
    }
}

impl ProtocolType {
    /// Protocols that terminate or pass through TLS and need a `tls` block.
    pub fn requires_tls(&self) -> bool {
        matches!(self, Self::Https | Self::Tls)
    }

    /// Protocols that must not carry a `tls` block.
    pub fn forbids_tls(&self) -> bool {
        matches!(self, Self::Http | Self::Tcp | Self::Udp)
    }

    /// Protocols where a listener hostname is meaningless.
    pub fn forbids_hostname(&self) -> bool {
        matches!(self, Self::Tcp | Self::Udp)
    }
}

string_enum! {
    /// What a listener does with TLS connections.
    TlsModeType {
        Terminate => "Terminate",
        Passthrough => "Passthrough",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerTlsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TlsModeType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificate_refs: Vec<SecretObjectReference>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl ListenerTlsConfig {
    pub fn terminate(certificate_refs: Vec<SecretObjectReference>) -> Self {
        Self { mode: Some(TlsModeType::Terminate), certificate_refs, options: BTreeMap::new() }
    }

    pub fn passthrough() -> Self {
        Self { mode: Some(TlsModeType::Passthrough), ..Default::default() }
    }

    /// The mode, defaulting to Terminate.
    pub fn effective_mode(&self) -> TlsModeType {
        self.mode.clone().unwrap_or(TlsModeType::Terminate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listener {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub port: u16,
    pub protocol: ProtocolType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ListenerTlsConfig>,
}

impl Listener {
    pub fn new(name: impl Into<String>, protocol: ProtocolType, port: u16) -> Self {
        Self { name: name.into(), hostname: None, port, protocol, tls: None }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_tls(mut self, tls: ListenerTlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }
}

string_enum! {
    /// Kind of a Gateway address.
    AddressType {
        IpAddress => "IPAddress",
        Hostname => "Hostname",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayAddress {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<AddressType>,
    pub value: String,
}

impl GatewayAddress {
    pub fn new(address_type: AddressType, value: impl Into<String>) -> Self {
        Self { address_type: Some(address_type), value: value.into() }
    }

    /// The type, defaulting to IPAddress.
    pub fn effective_type(&self) -> AddressType {
        self.address_type.clone().unwrap_or(AddressType::IpAddress)
    }
}

/// A Gateway object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gateway {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: GatewaySpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySpec {
    #[serde(default)]
    pub gateway_class_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<Listener>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<GatewayAddress>,
}

/// A GatewayClass object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayClass {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: GatewayClassSpec,
}

impl GatewayClass {
    pub fn new(name: impl Into<String>, controller_name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::new(name),
            spec: GatewayClassSpec { controller_name: controller_name.into(), description: None },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayClassSpec {
    #[serde(default)]
    pub controller_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The Gateway a ListenerSet attaches to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentGatewayReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
}

/// A ListenerSet object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerSet {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ListenerSetSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerSetSpec {
    #[serde(default)]
    pub parent_ref: ParentGatewayReference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<Listener>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_capabilities() {
        assert!(ProtocolType::Https.requires_tls());
        assert!(ProtocolType::Tls.requires_tls());
        assert!(ProtocolType::Http.forbids_tls());
        assert!(ProtocolType::Udp.forbids_hostname());
        assert!(!ProtocolType::Tls.forbids_hostname());

        let custom = ProtocolType::from("example.com/quic");
        assert!(!custom.is_known());
        assert!(!custom.requires_tls());
        assert!(!custom.forbids_tls());
        assert!(!custom.forbids_hostname());
    }

    #[test]
    fn defaults() {
        assert_eq!(ListenerTlsConfig::default().effective_mode(), TlsModeType::Terminate);
        assert_eq!(ListenerTlsConfig::passthrough().effective_mode(), TlsModeType::Passthrough);
        let address: GatewayAddress = serde_json::from_str(r#"{"value":"10.0.0.1"}"#).unwrap();
        assert_eq!(address.effective_type(), AddressType::IpAddress);
    }

    #[test]
    fn decodes_listener() {
        let listener: Listener = serde_yaml::from_str(
            "name: https\nport: 443\nprotocol: HTTPS\nhostname: foo.example.com\ntls:\n  certificateRefs:\n    - name: cert\n",
        )
        .unwrap();
        assert_eq!(listener.protocol, ProtocolType::Https);
        assert_eq!(listener.tls.unwrap().certificate_refs[0].name, "cert");
    }
}
