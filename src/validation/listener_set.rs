//! ListenerSet validation.

use crate::domain::{ListenerSet, DEFAULT_PARENT_KIND, GATEWAY_GROUP};

use super::field::{ErrorList, FieldError, FieldPath};
use super::listeners::validate_listeners;

/// Validate a ListenerSet: the Gateway it attaches to, then its listeners.
pub fn validate_listener_set(listener_set: &ListenerSet) -> ErrorList {
    let spec = FieldPath::new("spec");
    let parent = &listener_set.spec.parent_ref;
    let parent_path = spec.child("parentRef");
    let mut errs = ErrorList::new();

    if let Some(kind) = parent.kind.as_deref() {
        if kind != DEFAULT_PARENT_KIND {
            errs.push(FieldError::not_supported(parent_path.child("kind"), kind, &[DEFAULT_PARENT_KIND]));
        }
    }
    if let Some(group) = parent.group.as_deref().filter(|g| !g.is_empty()) {
        if group != GATEWAY_GROUP {
            errs.push(FieldError::not_supported(parent_path.child("group"), group, &[GATEWAY_GROUP]));
        }
    }

    errs.append(validate_listeners(&listener_set.spec.listeners, &spec.child("listeners")));
    errs
}
