//! References from one configuration object to another.

use serde::{Deserialize, Serialize};

/// API group of the Gateway resources.
pub const GATEWAY_GROUP: &str = "gateway.networking.k8s.io";

/// Kind assumed for a parent reference without one.
pub const DEFAULT_PARENT_KIND: &str = "Gateway";

/// Kind assumed for a backend reference without one.
pub const DEFAULT_BACKEND_KIND: &str = "Service";

/// A route's attachment point: a Gateway or one of its listeners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl ParentReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_section_name(mut self, section_name: impl Into<String>) -> Self {
        self.section_name = Some(section_name.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// The kind, defaulting to `Gateway`.
    pub fn effective_kind(&self) -> &str {
        non_empty(self.kind.as_deref()).unwrap_or(DEFAULT_PARENT_KIND)
    }

    /// The section name, treating an empty string as unset.
    pub fn section(&self) -> Option<&str> {
        non_empty(self.section_name.as_deref())
    }
}

/// A reference to a backend object, typically a Service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl BackendObjectReference {
    pub fn service(name: impl Into<String>, port: Option<u16>) -> Self {
        Self { name: name.into(), port, ..Default::default() }
    }

    /// True for a core Service: no group (or the empty core group) and no
    /// kind or kind `Service`.
    pub fn is_core_service(&self) -> bool {
        non_empty(self.group.as_deref()).is_none()
            && self.kind.as_deref().map_or(true, |kind| kind == DEFAULT_BACKEND_KIND)
    }
}

/// A weighted backend reference as used by route rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendRef {
    #[serde(flatten)]
    pub object: BackendObjectReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

impl BackendRef {
    pub fn service(name: impl Into<String>, port: Option<u16>) -> Self {
        Self { object: BackendObjectReference::service(name, port), weight: None }
    }
}

/// A reference to an object in the same namespace, e.g. an extension filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalObjectReference {
    #[serde(default)]
    pub group: String,
    pub kind: String,
    pub name: String,
}

/// The object a policy applies to.
pub type LocalPolicyTargetReference = LocalObjectReference;

/// A reference to a certificate Secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl SecretObjectReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
