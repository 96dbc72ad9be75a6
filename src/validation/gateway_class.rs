//! GatewayClass validation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::GatewayClass;

use super::field::{ErrorList, FieldError, FieldPath};
use super::primitives::matches_pattern;

/// A domain-prefixed path such as `example.com/gateway-controller`.
pub const CONTROLLER_NAME_FORMAT: &str =
    r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*/[A-Za-z0-9/\-._~%!$&'()*+,;=:]+$";

lazy_static! {
    static ref CONTROLLER_NAME_REGEX: Result<Regex, regex::Error> = Regex::new(CONTROLLER_NAME_FORMAT);
}

fn controller_name_path() -> FieldPath {
    FieldPath::new("spec").child("controllerName")
}

/// Validate a GatewayClass on creation.
pub fn validate_gateway_class(class: &GatewayClass) -> ErrorList {
    let mut errs = ErrorList::new();
    let controller = class.spec.controller_name.as_str();
    if controller.is_empty() {
        errs.push(FieldError::required(controller_name_path(), "must be a domain prefixed path"));
        return errs;
    }
    match matches_pattern(&CONTROLLER_NAME_REGEX, controller) {
        Ok(true) => {}
        Ok(false) => errs.push(FieldError::invalid(
            controller_name_path(),
            controller,
            format!("must be a domain prefixed path (matching {})", CONTROLLER_NAME_FORMAT),
        )),
        Err(error) => errs.push(FieldError::internal(controller_name_path(), error)),
    }
    errs
}

/// The controller name is immutable. Nothing is checked unless both
/// versions are present.
pub fn validate_gateway_class_update(old: Option<&GatewayClass>, new: Option<&GatewayClass>) -> ErrorList {
    let mut errs = ErrorList::new();
    let (Some(old), Some(new)) = (old, new) else {
        return errs;
    };
    if old.spec.controller_name != new.spec.controller_name {
        errs.push(FieldError::invalid(
            controller_name_path(),
            &new.spec.controller_name,
            "cannot update an immutable field",
        ));
    }
    errs
}
