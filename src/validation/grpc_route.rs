//! GRPCRoute validation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::{GrpcMethodMatch, GrpcMethodMatchType, GrpcRoute, GrpcRouteFilter, GrpcRouteFilterType};

use super::backends::validate_rule_backend_ports;
use super::field::{ErrorList, FieldError, FieldPath};
use super::filters::{repeated_filter_errors, validate_header_modifier, PayloadCheck};
use super::matches::validate_header_match_names;
use super::parent_refs::validate_parent_refs;
use super::primitives::matches_pattern;

/// Fully qualified protobuf service name, optionally with a leading dot.
pub const VALID_SERVICE_NAME: &str = r"^(?i)\.?[a-z_][a-z_0-9]*(\.[a-z_][a-z_0-9]*)*$";

/// Protobuf method name.
pub const VALID_METHOD_NAME: &str = r"^[A-Za-z_][A-Za-z_0-9]*$";

lazy_static! {
    static ref SERVICE_NAME_REGEX: Result<Regex, regex::Error> = Regex::new(VALID_SERVICE_NAME);
    static ref METHOD_NAME_REGEX: Result<Regex, regex::Error> = Regex::new(VALID_METHOD_NAME);
}

/// Validate a GRPCRoute.
pub fn validate_grpc_route(route: &GrpcRoute) -> ErrorList {
    let spec = FieldPath::new("spec");
    let rules_path = spec.child("rules");
    let mut errs = ErrorList::new();

    for (i, rule) in route.spec.rules.iter().enumerate() {
        let rule_path = rules_path.index(i);

        for (j, route_match) in rule.matches.iter().enumerate() {
            let match_path = rule_path.child("matches").index(j);
            if let Some(method) = &route_match.method {
                errs.append(validate_method_match(method, &match_path.child("method")));
            }
            if !route_match.headers.is_empty() {
                let names = route_match.headers.iter().map(|h| h.name.as_str());
                errs.append(validate_header_match_names(names, &match_path.child("headers")));
            }
        }

        errs.append(validate_grpc_route_filters(&rule.filters, &rule_path.child("filters")));
        for (j, backend) in rule.backend_refs.iter().enumerate() {
            let filters_path = rule_path.child("backendRefs").index(j).child("filters");
            errs.append(validate_grpc_route_filters(&backend.filters, &filters_path));
        }
    }

    let backends = route
        .spec
        .rules
        .iter()
        .map(|rule| rule.backend_refs.iter().map(|b| &b.backend_ref.object));
    errs.append(validate_rule_backend_ports(backends, &rules_path));

    errs.append(validate_parent_refs(
        &route.spec.parent_refs,
        route.metadata.namespace_or(""),
        &spec.child("parentRefs"),
    ));

    errs
}

/// At least one of service and method must be set; for exact matches
/// (the default) both must be valid protobuf identifiers.
fn validate_method_match(method: &GrpcMethodMatch, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();

    if method.service.is_none() && method.method.is_none() {
        errs.push(FieldError::required(path.clone(), "one or both of `service` or `method` must be specified"));
    }

    let exact = matches!(method.match_type, None | Some(GrpcMethodMatchType::Exact));
    if !exact {
        return errs;
    }
    let checks = [
        (method.service.as_deref(), &*SERVICE_NAME_REGEX, VALID_SERVICE_NAME),
        (method.method.as_deref(), &*METHOD_NAME_REGEX, VALID_METHOD_NAME),
    ];
    for (value, pattern, source) in checks {
        let Some(value) = value else { continue };
        match matches_pattern(pattern, value) {
            Ok(true) => {}
            Ok(false) => errs.push(FieldError::invalid(
                path.clone(),
                value,
                format!("must only contain valid characters (matching {})", source),
            )),
            Err(error) => errs.push(FieldError::internal(path.clone(), error)),
        }
    }

    errs
}

/// Validate the filters of a GRPCRoute rule or backend reference.
pub fn validate_grpc_route_filters(filters: &[GrpcRouteFilter], path: &FieldPath) -> ErrorList {
    use GrpcRouteFilterType as Kind;

    let mut errs = ErrorList::new();
    for (i, filter) in filters.iter().enumerate() {
        let filter_path = path.index(i);
        if let Some(modifier) = &filter.request_header_modifier {
            errs.append(validate_header_modifier(modifier, &filter_path.child("requestHeaderModifier")));
        }
        if let Some(modifier) = &filter.response_header_modifier {
            errs.append(validate_header_modifier(modifier, &filter_path.child("responseHeaderModifier")));
        }

        let tag = &filter.filter_type;
        let mut check = PayloadCheck::new("GRPCRouteFilter", &filter_path);
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
        errs.append(check.finish());
    }

    let tags = filters
        .iter()
        .map(|f| &f.filter_type)
        .filter(|tag| !tag.as_str().is_empty() && !tag.is_repeatable());
    errs.extend(repeated_filter_errors(tags.map(|tag| tag.as_str()), path));

    errs
}
