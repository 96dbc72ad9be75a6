//! Route filter validation
//!
//! Checks shared by HTTPRoute and GRPCRoute filter lists: tag/payload
//! agreement, header modifier actions, path modifiers, repeatability and
//! the redirect/rewrite mutual exclusion.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{
    HttpHeaderFilter, HttpPathModifier, HttpRouteFilter, HttpRouteFilterType, HttpRouteMatch,
    HttpRouteRule, PathModifier, PathModifierType,
};

use super::field::{ErrorList, FieldError, FieldPath};
use super::primitives::count_in_order;

/// Validate the filters of an HTTPRoute rule or backend reference.
///
/// `path` points at the filter list itself (e.g. `spec.rules[0].filters`);
/// `matches` are the sibling matches of the enclosing rule.
pub fn validate_http_route_filters(
    filters: &[HttpRouteFilter],
    matches: &[HttpRouteMatch],
    path: &FieldPath,
) -> ErrorList {
    let mut errs = ErrorList::new();

    for (i, filter) in filters.iter().enumerate() {
        let filter_path = path.index(i);
        if let Some(modifier) = filter.request_redirect.as_ref().and_then(|r| r.path.as_ref()) {
            errs.append(validate_path_modifier(
                modifier,
                matches,
                &filter_path.child("requestRedirect").child("path"),
            ));
        }
        if let Some(modifier) = filter.url_rewrite.as_ref().and_then(|r| r.path.as_ref()) {
            errs.append(validate_path_modifier(
                modifier,
                matches,
                &filter_path.child("urlRewrite").child("path"),
            ));
        }
        if let Some(modifier) = &filter.request_header_modifier {
            errs.append(validate_header_modifier(modifier, &filter_path.child("requestHeaderModifier")));
        }
        if let Some(modifier) = &filter.response_header_modifier {
            errs.append(validate_header_modifier(modifier, &filter_path.child("responseHeaderModifier")));
        }
        if filter.typed().is_none() {
            errs.append(validate_http_filter_payload(filter, &filter_path));
        }
    }

    let has_tag = |tag: HttpRouteFilterType| filters.iter().any(|f| f.filter_type == tag);
    if has_tag(HttpRouteFilterType::RequestRedirect) && has_tag(HttpRouteFilterType::UrlRewrite) {
        errs.push(FieldError::invalid(
            path.clone(),
            HttpRouteFilterType::RequestRedirect.as_str(),
            "may specify either httpRouteFilterRequestRedirect or httpRouteFilterRequestRewrite, but not both",
        ));
    }

    let tags = filters
        .iter()
        .map(|f| &f.filter_type)
        .filter(|tag| !tag.is_unset() && !tag.is_repeatable());
    errs.extend(repeated_filter_errors(tags.map(|tag| tag.as_str()), path));

    errs
}

/// Tag and payload agreement for one HTTPRoute filter.
fn validate_http_filter_payload(filter: &HttpRouteFilter, path: &FieldPath) -> ErrorList {
    use HttpRouteFilterType as Kind;

    let tag = &filter.filter_type;
    let mut check = PayloadCheck::new("HTTPRouteFilter", path);
    check.slot("ExtensionRef", *tag == Kind::ExtensionRef, filter.extension_ref.as_ref());
    check.slot(
        "RequestHeaderModifier",
        *tag == Kind::RequestHeaderModifier,
        filter.request_header_modifier.as_ref(),
    );
    check.slot(
        "ResponseHeaderModifier",
        *tag == Kind::ResponseHeaderModifier,
        filter.response_header_modifier.as_ref(),
    );
    check.slot("RequestMirror", *tag == Kind::RequestMirror, filter.request_mirror.as_ref());
    check.slot("RequestRedirect", *tag == Kind::RequestRedirect, filter.request_redirect.as_ref());
    check.slot("URLRewrite", *tag == Kind::UrlRewrite, filter.url_rewrite.as_ref());
    check.finish()
}

/// Collects tag/payload disagreements for a union in wire shape.
pub(crate) struct PayloadCheck<'a> {
    union: &'static str,
    path: &'a FieldPath,
    errs: ErrorList,
}

impl<'a> PayloadCheck<'a> {
    pub(crate) fn new(union: &'static str, path: &'a FieldPath) -> Self {
        Self { union, path, errs: ErrorList::new() }
    }

    /// Record a mismatch for one payload slot. `tagged` says whether the tag
    /// selects this slot.
    pub(crate) fn slot<T: Serialize>(&mut self, kind: &str, tagged: bool, payload: Option<&T>) {
        match (payload, tagged) {
            (Some(payload), false) => self.errs.push(FieldError::invalid(
                self.path.clone(),
                payload,
                format!("must be nil if the {}.Type is not {}", self.union, kind),
            )),
            (None, true) => self.errs.push(FieldError::required(
                self.path.clone(),
                format!("filter.{} must be specified for {} {}.Type", kind, kind, self.union),
            )),
            _ => {}
        }
    }

    pub(crate) fn finish(self) -> ErrorList {
        self.errs
    }
}

/// One Invalid per non-repeatable tag used more than once, in first-seen order.
pub(crate) fn repeated_filter_errors<'t>(
    tags: impl Iterator<Item = &'t str>,
    path: &FieldPath,
) -> Vec<FieldError> {
    count_in_order(tags)
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(tag, _)| {
            FieldError::invalid(path.clone(), tag, "cannot be used multiple times in the same rule")
        })
        .collect()
}

/// A header may be the target of only one add, set or remove action.
///
/// Names compare case-insensitively. The second action on a name is
/// reported; later ones are not.
pub fn validate_header_modifier(filter: &HttpHeaderFilter, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    // name -> whether a repeat should still be reported
    let mut seen: HashMap<String, bool> = HashMap::new();
    let mut record = |name: &str| -> bool {
        match seen.get_mut(&name.to_ascii_lowercase()) {
            Some(report) => std::mem::replace(report, false),
            None => {
                seen.insert(name.to_ascii_lowercase(), true);
                false
            }
        }
    };

    const DETAIL: &str = "cannot specify multiple actions for header";
    for header in &filter.add {
        if record(&header.name) {
            errs.push(FieldError::invalid(path.child("add"), header, DETAIL));
        }
    }
    for header in &filter.set {
        if record(&header.name) {
            errs.push(FieldError::invalid(path.child("set"), header, DETAIL));
        }
    }
    for name in &filter.remove {
        if record(name) {
            errs.push(FieldError::invalid(path.child("remove"), name, DETAIL));
        }
    }
    errs
}

/// Validate a redirect or rewrite path modifier.
///
/// Tag and replacement must agree, and ReplacePrefixMatch is only valid
/// when the rule has exactly one match and that match is a PathPrefix.
pub fn validate_path_modifier(
    modifier: &HttpPathModifier,
    matches: &[HttpRouteMatch],
    path: &FieldPath,
) -> ErrorList {
    let mut errs = ErrorList::new();
    let prefix = match modifier.typed() {
        Some(PathModifier::ReplacePrefixMatch(prefix)) => Some(prefix),
        Some(PathModifier::ReplaceFullPath(_)) => None,
        None => {
            errs.append(path_modifier_mismatches(modifier, path));
            modifier
                .replace_prefix_match
                .clone()
                .filter(|_| modifier.modifier_type == PathModifierType::ReplacePrefixMatch)
        }
    };

    if let Some(prefix) = prefix {
        let single_prefix_match = matches!(
            matches,
            [only] if only.path.as_ref().is_some_and(|p| p.is_prefix())
        );
        if !single_prefix_match {
            errs.push(FieldError::invalid(
                path.clone(),
                &prefix,
                "exactly one PathPrefix match must be specified to use this path modifier",
            ));
        }
    }

    errs
}

/// Tag and replacement disagreements of a path modifier that did not decode.
fn path_modifier_mismatches(modifier: &HttpPathModifier, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    let tag = &modifier.modifier_type;

    let full_path = path.child("replaceFullPath");
    match (&modifier.replace_full_path, *tag == PathModifierType::ReplaceFullPath) {
        (Some(value), false) => errs.push(FieldError::invalid(
            full_path,
            value,
            "must be nil when type is not set to 'ReplaceFullPath'",
        )),
        (None, true) => errs.push(FieldError::required(
            full_path,
            "must be specified when type is set to 'ReplaceFullPath'",
        )),
        _ => {}
    }

    let prefix_path = path.child("replacePrefixMatch");
    match (&modifier.replace_prefix_match, *tag == PathModifierType::ReplacePrefixMatch) {
        (Some(value), false) => errs.push(FieldError::invalid(
            prefix_path,
            value,
            "must be nil when type is not set to 'ReplacePrefixMatch'",
        )),
        (None, true) => errs.push(FieldError::required(
            prefix_path,
            "must be specified when type is set to 'ReplacePrefixMatch'",
        )),
        _ => {}
    }

    errs
}

/// A redirect answers the request itself, so the rule must not also
/// forward to backends.
pub fn validate_redirect_without_backends(rule: &HttpRouteRule, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    if rule.has_redirect_filter() && !rule.backend_refs.is_empty() {
        errs.push(FieldError::invalid(
            path.child("filters"),
            HttpRouteFilterType::RequestRedirect.as_str(),
            "RequestRedirect filter must not be used with backendRefs",
        ));
    }
    errs
}
