//! HTTPRoute validation.

use crate::domain::HttpRoute;

use super::backends::validate_rule_backend_ports;
use super::field::{ErrorList, FieldPath};
use super::filters::{validate_http_route_filters, validate_redirect_without_backends};
use super::matches::{validate_header_match_names, validate_path_match, validate_query_param_match_names};
use super::parent_refs::validate_parent_refs;
use super::timeouts::validate_timeouts;

/// Validate an HTTPRoute.
///
/// Rules are walked in order; within a rule the filters come first, then the
/// filters of each backend reference, the matches, the timeouts and finally
/// the redirect/backend exclusion. Backend ports and parent references are
/// checked after all rules.
pub fn validate_http_route(route: &HttpRoute) -> ErrorList {
    let spec = FieldPath::new("spec");
    let rules_path = spec.child("rules");
    let mut errs = ErrorList::new();

    for (i, rule) in route.spec.rules.iter().enumerate() {
        let rule_path = rules_path.index(i);

        errs.append(validate_http_route_filters(&rule.filters, &rule.matches, &rule_path.child("filters")));
        for (j, backend) in rule.backend_refs.iter().enumerate() {
            let filters_path = rule_path.child("backendRefs").index(j).child("filters");
            errs.append(validate_http_route_filters(&backend.filters, &rule.matches, &filters_path));
        }

        for (j, route_match) in rule.matches.iter().enumerate() {
            let match_path = rule_path.child("matches").index(j);
            if let Some(path_match) = &route_match.path {
                errs.append(validate_path_match(path_match, &match_path.child("path")));
            }
            if !route_match.headers.is_empty() {
                let names = route_match.headers.iter().map(|h| h.name.as_str());
                errs.append(validate_header_match_names(names, &match_path.child("headers")));
            }
            if !route_match.query_params.is_empty() {
                let names = route_match.query_params.iter().map(|q| q.name.as_str());
                errs.append(validate_query_param_match_names(names, &match_path.child("queryParams")));
            }
        }

        if let Some(timeouts) = &rule.timeouts {
            errs.append(validate_timeouts(timeouts, &rule_path.child("timeouts")));
        }
        errs.append(validate_redirect_without_backends(rule, &rule_path));
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
