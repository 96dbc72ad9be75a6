//! GRPCRoute domain types

use serde::{Deserialize, Serialize};

use super::http_route::{HttpHeaderFilter, HttpRequestMirrorFilter};
use super::meta::ObjectMeta;
use super::references::{BackendRef, LocalObjectReference, ParentReference};

/// A GRPCRoute object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcRoute {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: GrpcRouteSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcRouteSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_refs: Vec<ParentReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<GrpcRouteRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcRouteRule {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<GrpcRouteMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<GrpcRouteFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backend_refs: Vec<GrpcBackendRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcRouteMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<GrpcMethodMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<GrpcHeaderMatch>,
}

string_enum! {
    /// How the service and method of a gRPC request are compared.
    GrpcMethodMatchType {
        Exact => "Exact",
        RegularExpression => "RegularExpression",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrpcMethodMatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<GrpcMethodMatchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl GrpcMethodMatch {
    pub fn exact(service: Option<&str>, method: Option<&str>) -> Self {
        Self {
            match_type: Some(GrpcMethodMatchType::Exact),
            service: service.map(str::to_string),
            method: method.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrpcHeaderMatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

string_enum! {
    /// Filter kinds a GRPCRoute rule may carry.
    GrpcRouteFilterType {
        RequestHeaderModifier => "RequestHeaderModifier",
        ResponseHeaderModifier => "ResponseHeaderModifier",
        RequestMirror => "RequestMirror",
        ExtensionRef => "ExtensionRef",
    }
}

impl GrpcRouteFilterType {
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Self::ExtensionRef)
    }
}

impl Default for GrpcRouteFilterType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// Wire shape of a GRPCRoute filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcRouteFilter {
    #[serde(rename = "type", default)]
    pub filter_type: GrpcRouteFilterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_header_modifier: Option<HttpHeaderFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_header_modifier: Option<HttpHeaderFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_mirror: Option<HttpRequestMirrorFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_ref: Option<LocalObjectReference>,
}

/// Typed GRPCRoute filter.
#[derive(Debug, Clone, PartialEq)]
pub enum GrpcFilter {
    RequestHeaderModifier(HttpHeaderFilter),
    ResponseHeaderModifier(HttpHeaderFilter),
    RequestMirror(HttpRequestMirrorFilter),
    ExtensionRef(LocalObjectReference),
}

impl From<GrpcFilter> for GrpcRouteFilter {
    fn from(filter: GrpcFilter) -> Self {
        match filter {
            GrpcFilter::RequestHeaderModifier(payload) => Self {
                filter_type: GrpcRouteFilterType::RequestHeaderModifier,
                request_header_modifier: Some(payload),
                ..Default::default()
            },
            GrpcFilter::ResponseHeaderModifier(payload) => Self {
                filter_type: GrpcRouteFilterType::ResponseHeaderModifier,
                response_header_modifier: Some(payload),
                ..Default::default()
            },
            GrpcFilter::RequestMirror(payload) => Self {
                filter_type: GrpcRouteFilterType::RequestMirror,
                request_mirror: Some(payload),
                ..Default::default()
            },
            GrpcFilter::ExtensionRef(payload) => Self {
                filter_type: GrpcRouteFilterType::ExtensionRef,
                extension_ref: Some(payload),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcBackendRef {
    #[serde(flatten)]
    pub backend_ref: BackendRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<GrpcRouteFilter>,
}

impl GrpcBackendRef {
    pub fn service(name: impl Into<String>, port: Option<u16>) -> Self {
        Self { backend_ref: BackendRef::service(name, port), filters: Vec::new() }
    }
}
