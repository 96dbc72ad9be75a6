//! Shared helpers for the integration tests.
#![allow(dead_code)]

use gwvalidate::domain::{
    HttpFilter, HttpHeader, HttpHeaderFilter, HttpPathModifier, HttpRequestRedirectFilter,
    HttpRoute, HttpRouteFilter, HttpRouteRule, HttpUrlRewriteFilter, ObjectMeta, PathModifier,
};
use gwvalidate::{parse_documents, ConfigDocument, ErrorList};

/// Rendered field paths, in report order.
pub fn fields(errs: &ErrorList) -> Vec<String> {
    errs.iter().map(|e| e.field.to_string()).collect()
}

/// Rendered errors, in report order.
pub fn rendered(errs: &ErrorList) -> Vec<String> {
    errs.iter().map(ToString::to_string).collect()
}

/// Decode exactly one document.
pub fn document(content: &str) -> ConfigDocument {
    let mut documents = parse_documents(content).expect("document should decode");
    assert_eq!(documents.len(), 1, "expected a single document");
    documents.remove(0)
}

pub fn http_route(rules: Vec<HttpRouteRule>) -> HttpRoute {
    let mut route = HttpRoute {
        metadata: ObjectMeta::new("web").with_namespace("default"),
        ..Default::default()
    };
    route.spec.rules = rules;
    route
}

pub fn redirect(modifier: Option<PathModifier>) -> HttpRouteFilter {
    HttpFilter::RequestRedirect(HttpRequestRedirectFilter {
        path: modifier.map(HttpPathModifier::from),
        ..Default::default()
    })
    .into()
}

pub fn rewrite(modifier: Option<PathModifier>) -> HttpRouteFilter {
    HttpFilter::UrlRewrite(HttpUrlRewriteFilter {
        path: modifier.map(HttpPathModifier::from),
        ..Default::default()
    })
    .into()
}

pub fn set_headers(names: &[&str]) -> HttpRouteFilter {
    HttpFilter::RequestHeaderModifier(HttpHeaderFilter {
        set: names.iter().map(|name| HttpHeader::new(*name, "v")).collect(),
        ..Default::default()
    })
    .into()
}
