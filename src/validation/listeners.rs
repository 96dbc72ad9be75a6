//! Listener validation, shared by Gateways and ListenerSets.

use std::collections::HashSet;

use crate::domain::{Listener, TlsModeType};

use super::field::{ErrorList, FieldError, FieldPath};

/// Validate `listeners` located at `path` (e.g. `spec.listeners`).
///
/// Per-listener protocol checks run first over the whole list, then the
/// name and (port, protocol, hostname) uniqueness checks.
pub fn validate_listeners(listeners: &[Listener], path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    errs.append(validate_tls_presence(listeners, path));
    errs.append(validate_hostnames(listeners, path));
    errs.append(validate_certificate_refs(listeners, path));
    errs.append(validate_unique_names(listeners, path));
    errs.append(validate_unique_port_protocol_hostname(listeners, path));
    errs
}

fn validate_tls_presence(listeners: &[Listener], path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    for (i, listener) in listeners.iter().enumerate() {
        let protocol = &listener.protocol;
        if protocol.requires_tls() && listener.tls.is_none() {
            errs.push(FieldError::forbidden(
                path.index(i).child("tls"),
                format!("must be set for protocol {}", protocol),
            ));
        }
        if protocol.forbids_tls() && listener.tls.is_some() {
            errs.push(FieldError::forbidden(
                path.index(i).child("tls"),
                format!("should be empty for protocol {}", protocol),
            ));
        }
    }
    errs
}

fn validate_hostnames(listeners: &[Listener], path: &FieldPath) -> ErrorList {
    listeners
        .iter()
        .enumerate()
        .filter(|(_, l)| l.protocol.forbids_hostname() && l.hostname.is_some())
        .map(|(i, l)| {
            FieldError::forbidden(
                path.index(i).child("hostname"),
                format!("should be empty for protocol {}", l.protocol),
            )
        })
        .collect()
}

/// Terminating listeners of a TLS-carrying protocol need certificates.
fn validate_certificate_refs(listeners: &[Listener], path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    for (i, listener) in listeners.iter().enumerate() {
        if !listener.protocol.requires_tls() {
            continue;
        }
        let Some(tls) = &listener.tls else { continue };
        if tls.effective_mode() == TlsModeType::Terminate && tls.certificate_refs.is_empty() {
            errs.push(FieldError::required(
                path.index(i).child("tls").child("certificateRefs"),
                "should be set and not empty when TLSModeType is Terminate",
            ));
        }
    }
    errs
}

fn validate_unique_names(listeners: &[Listener], path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    let mut names = HashSet::new();
    for (i, listener) in listeners.iter().enumerate() {
        if !names.insert(listener.name.as_str()) {
            errs.push(FieldError::duplicate(
                path.index(i).child("name"),
                &listener.name,
                "must be unique within the Gateway",
            ));
        }
    }
    errs
}

fn validate_unique_port_protocol_hostname(listeners: &[Listener], path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    let mut seen = HashSet::new();
    for (i, listener) in listeners.iter().enumerate() {
        let hostname = listener.hostname.as_deref().unwrap_or_default();
        let key = format!("{}:{}:{}", hostname, listener.protocol, listener.port);
        if seen.contains(&key) {
            errs.push(FieldError::duplicate(
                path.index(i),
                &key,
                "combination of port, protocol, and hostname must be unique for each listener",
            ));
        } else {
            seen.insert(key);
        }
    }
    errs
}
