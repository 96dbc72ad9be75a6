//! Timeout consistency.

use crate::domain::HttpRouteTimeouts;

use super::field::{ErrorList, FieldError, FieldPath};
use super::primitives::exceeds_enabled_timeout;

/// The backend request timeout must not exceed the overall request timeout
/// when both are set and enabled.
///
/// `path` points at the `timeouts` field of a rule.
pub fn validate_timeouts(timeouts: &HttpRouteTimeouts, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();

    let request_path = path.child("request");
    let backend_path = path.child("backendRequest");
    let request = timeouts.request.as_ref().and_then(|d| match d.parse() {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            errs.push(FieldError::internal(request_path.clone(), error));
            None
        }
    });
    let backend = timeouts.backend_request.as_ref().and_then(|d| match d.parse() {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            errs.push(FieldError::internal(backend_path.clone(), error));
            None
        }
    });

    if let (Some(request), Some(backend)) = (request, backend) {
        if exceeds_enabled_timeout(request, backend) {
            errs.push(FieldError::invalid(
                backend_path,
                &timeouts.backend_request,
                "backendRequest timeout cannot be longer than request timeout",
            ));
        }
    }

    errs
}
