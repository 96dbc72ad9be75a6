//! Backend reference checks.

use crate::domain::BackendObjectReference;

use super::field::{ErrorList, FieldError, FieldPath};

/// A core Service reference must name a port.
///
/// `path` points at the backend reference (e.g. `spec.rules[0].backendRefs[1]`).
pub fn validate_backend_port(backend: &BackendObjectReference, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    if backend.is_core_service() && backend.port.is_none() {
        errs.push(FieldError::required(path.child("port"), "missing port for Service reference"));
    }
    errs
}

/// Run [`validate_backend_port`] over the backends of every rule.
///
/// `rules` yields, per rule, the backend references in order.
pub(crate) fn validate_rule_backend_ports<'a, R, B>(rules: R, path: &FieldPath) -> ErrorList
where
    R: IntoIterator<Item = B>,
    B: IntoIterator<Item = &'a BackendObjectReference>,
{
    let mut errs = ErrorList::new();
    for (i, backends) in rules.into_iter().enumerate() {
        let backends_path = path.index(i).child("backendRefs");
        for (j, backend) in backends.into_iter().enumerate() {
            errs.append(validate_backend_port(backend, &backends_path.index(j)));
        }
    }
    errs
}
