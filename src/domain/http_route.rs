//! HTTPRoute domain types
//!
//! Filters and path modifiers are decoded in their wire shape: a `type` tag
//! next to one optional payload field per kind. The validators decode them
//! into their typed views and report tag/payload disagreement when that
//! fails. Code constructing routes should go through
//! [`HttpFilter`] and [`PathModifier`], whose `From` conversions always
//! produce a consistent wire value.

use serde::{Deserialize, Serialize};

use super::duration::GatewayDuration;
use super::meta::ObjectMeta;
use super::references::{BackendObjectReference, BackendRef, LocalObjectReference, ParentReference};

/// An HTTPRoute object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRoute {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: HttpRouteSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_refs: Vec<ParentReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<HttpRouteRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<HttpRouteMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<HttpRouteFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backend_refs: Vec<HttpBackendRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeouts: Option<HttpRouteTimeouts>,
}

impl HttpRouteRule {
    /// True when any rule-level filter is tagged RequestRedirect.
    pub fn has_redirect_filter(&self) -> bool {
        self.filters.iter().any(|f| f.filter_type == HttpRouteFilterType::RequestRedirect)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HttpPathMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HttpHeaderMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<HttpQueryParamMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl HttpRouteMatch {
    pub fn path(match_type: PathMatchType, value: impl Into<String>) -> Self {
        Self { path: Some(HttpPathMatch::new(match_type, value)), ..Default::default() }
    }
}

string_enum! {
    /// How a request path is compared with a path match value.
    PathMatchType {
        Exact => "Exact",
        PathPrefix => "PathPrefix",
        RegularExpression => "RegularExpression",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpPathMatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<PathMatchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl HttpPathMatch {
    pub fn new(match_type: PathMatchType, value: impl Into<String>) -> Self {
        Self { match_type: Some(match_type), value: Some(value.into()) }
    }

    pub fn is_prefix(&self) -> bool {
        self.match_type == Some(PathMatchType::PathPrefix)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpHeaderMatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl HttpHeaderMatch {
    pub fn exact(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { match_type: None, name: name.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpQueryParamMatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl HttpQueryParamMatch {
    pub fn exact(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { match_type: None, name: name.into(), value: value.into() }
    }
}

string_enum! {
    /// Filter kinds an HTTPRoute rule may carry.
    HttpRouteFilterType {
        RequestHeaderModifier => "RequestHeaderModifier",
        ResponseHeaderModifier => "ResponseHeaderModifier",
        RequestMirror => "RequestMirror",
        RequestRedirect => "RequestRedirect",
        UrlRewrite => "URLRewrite",
        ExtensionRef => "ExtensionRef",
    }
}

impl HttpRouteFilterType {
    /// Only extension filters may appear more than once in a rule.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Self::ExtensionRef)
    }

    /// True for the empty tag.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Other(value) if value.is_empty())
    }
}

impl Default for HttpRouteFilterType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// Wire shape of an HTTPRoute filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteFilter {
    #[serde(rename = "type", default)]
    pub filter_type: HttpRouteFilterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_header_modifier: Option<HttpHeaderFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_header_modifier: Option<HttpHeaderFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_mirror: Option<HttpRequestMirrorFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_redirect: Option<HttpRequestRedirectFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_rewrite: Option<HttpUrlRewriteFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_ref: Option<LocalObjectReference>,
}

impl HttpRouteFilter {
    /// Typed view of the filter, available only when exactly the payload
    /// matching the tag is populated.
    pub fn typed(&self) -> Option<HttpFilter> {
        let populated = [
            self.request_header_modifier.is_some(),
            self.response_header_modifier.is_some(),
            self.request_mirror.is_some(),
            self.request_redirect.is_some(),
            self.url_rewrite.is_some(),
            self.extension_ref.is_some(),
        ];
        if populated.iter().filter(|set| **set).count() != 1 {
            return None;
        }

        match &self.filter_type {
            HttpRouteFilterType::RequestHeaderModifier => {
                self.request_header_modifier.clone().map(HttpFilter::RequestHeaderModifier)
            }
            HttpRouteFilterType::ResponseHeaderModifier => {
                self.response_header_modifier.clone().map(HttpFilter::ResponseHeaderModifier)
            }
            HttpRouteFilterType::RequestMirror => {
                self.request_mirror.clone().map(HttpFilter::RequestMirror)
            }
            HttpRouteFilterType::RequestRedirect => {
                self.request_redirect.clone().map(HttpFilter::RequestRedirect)
            }
            HttpRouteFilterType::UrlRewrite => self.url_rewrite.clone().map(HttpFilter::UrlRewrite),
            HttpRouteFilterType::ExtensionRef => {
                self.extension_ref.clone().map(HttpFilter::ExtensionRef)
            }
            HttpRouteFilterType::Other(_) => None,
        }
    }
}

/// Typed HTTPRoute filter.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpFilter {
    RequestHeaderModifier(HttpHeaderFilter),
    ResponseHeaderModifier(HttpHeaderFilter),
    RequestMirror(HttpRequestMirrorFilter),
    RequestRedirect(HttpRequestRedirectFilter),
    UrlRewrite(HttpUrlRewriteFilter),
    ExtensionRef(LocalObjectReference),
}

impl From<HttpFilter> for HttpRouteFilter {
    fn from(filter: HttpFilter) -> Self {
        match filter {
            HttpFilter::RequestHeaderModifier(payload) => Self {
                filter_type: HttpRouteFilterType::RequestHeaderModifier,
                request_header_modifier: Some(payload),
                ..Default::default()
            },
            HttpFilter::ResponseHeaderModifier(payload) => Self {
                filter_type: HttpRouteFilterType::ResponseHeaderModifier,
                response_header_modifier: Some(payload),
                ..Default::default()
            },
            HttpFilter::RequestMirror(payload) => Self {
                filter_type: HttpRouteFilterType::RequestMirror,
                request_mirror: Some(payload),
                ..Default::default()
            },
            HttpFilter::RequestRedirect(payload) => Self {
                filter_type: HttpRouteFilterType::RequestRedirect,
                request_redirect: Some(payload),
                ..Default::default()
            },
            HttpFilter::UrlRewrite(payload) => Self {
                filter_type: HttpRouteFilterType::UrlRewrite,
                url_rewrite: Some(payload),
                ..Default::default()
            },
            HttpFilter::ExtensionRef(payload) => Self {
                filter_type: HttpRouteFilterType::ExtensionRef,
                extension_ref: Some(payload),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeader {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl HttpHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Header add/set/remove actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeaderFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set: Vec<HttpHeader>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<HttpHeader>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestMirrorFilter {
    pub backend_ref: BackendObjectReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestRedirectFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HttpPathModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpUrlRewriteFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HttpPathModifier>,
}

string_enum! {
    /// How a redirect or rewrite replaces the request path.
    PathModifierType {
        ReplaceFullPath => "ReplaceFullPath",
        ReplacePrefixMatch => "ReplacePrefixMatch",
    }
}

impl Default for PathModifierType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// Wire shape of a path modifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpPathModifier {
    #[serde(rename = "type", default)]
    pub modifier_type: PathModifierType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_full_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_prefix_match: Option<String>,
}

impl HttpPathModifier {
    /// Typed view, available only when tag and payload agree.
    pub fn typed(&self) -> Option<PathModifier> {
        match (&self.modifier_type, &self.replace_full_path, &self.replace_prefix_match) {
            (PathModifierType::ReplaceFullPath, Some(path), None) => {
                Some(PathModifier::ReplaceFullPath(path.clone()))
            }
            (PathModifierType::ReplacePrefixMatch, None, Some(prefix)) => {
                Some(PathModifier::ReplacePrefixMatch(prefix.clone()))
            }
            _ => None,
        }
    }
}

/// Typed path modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathModifier {
    ReplaceFullPath(String),
    ReplacePrefixMatch(String),
}

impl From<PathModifier> for HttpPathModifier {
    fn from(modifier: PathModifier) -> Self {
        match modifier {
            PathModifier::ReplaceFullPath(path) => Self {
                modifier_type: PathModifierType::ReplaceFullPath,
                replace_full_path: Some(path),
                replace_prefix_match: None,
            },
            PathModifier::ReplacePrefixMatch(prefix) => Self {
                modifier_type: PathModifierType::ReplacePrefixMatch,
                replace_full_path: None,
                replace_prefix_match: Some(prefix),
            },
        }
    }
}

/// A backend reference with its own filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpBackendRef {
    #[serde(flatten)]
    pub backend_ref: BackendRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<HttpRouteFilter>,
}

impl HttpBackendRef {
    pub fn service(name: impl Into<String>, port: Option<u16>) -> Self {
        Self { backend_ref: BackendRef::service(name, port), filters: Vec::new() }
    }
}

/// Request and backend request timeouts of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteTimeouts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<GatewayDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_request: Option<GatewayDuration>,
}
