//! Gateway validation.

use std::collections::HashSet;
use std::net::IpAddr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::{AddressType, Gateway, GatewayAddress};

use super::field::{ErrorList, FieldError, FieldPath};
use super::listeners::validate_listeners;
use super::primitives::matches_pattern;

/// RFC-1123 hostname, optionally with a leading wildcard label.
pub const VALID_HOSTNAME_ADDRESS: &str =
    r"^(\*\.)?[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";

lazy_static! {
    static ref HOSTNAME_ADDRESS_REGEX: Result<Regex, regex::Error> = Regex::new(VALID_HOSTNAME_ADDRESS);
}

/// Validate a Gateway: its listeners, then its addresses.
pub fn validate_gateway(gateway: &Gateway) -> ErrorList {
    let spec = FieldPath::new("spec");
    let mut errs = ErrorList::new();
    errs.append(validate_listeners(&gateway.spec.listeners, &spec.child("listeners")));
    errs.append(validate_addresses(&gateway.spec.addresses, &spec.child("addresses")));
    errs
}

/// IP addresses must parse, hostnames must be well formed, and no value may
/// repeat within its address type. Implementation-specific types are not
/// checked.
pub fn validate_addresses(addresses: &[GatewayAddress], path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    let mut ip_addresses = HashSet::new();
    let mut hostnames = HashSet::new();

    for (i, address) in addresses.iter().enumerate() {
        let value = address.value.as_str();
        let seen = match address.effective_type() {
            AddressType::IpAddress => {
                if value.parse::<IpAddr>().is_err() {
                    errs.push(FieldError::invalid(path.index(i), value, "invalid ip address"));
                }
                &mut ip_addresses
            }
            AddressType::Hostname => {
                match matches_pattern(&HOSTNAME_ADDRESS_REGEX, value) {
                    Ok(true) => {}
                    Ok(false) => errs.push(FieldError::invalid(
                        path.index(i),
                        value,
                        format!("must only contain valid characters (matching {})", VALID_HOSTNAME_ADDRESS),
                    )),
                    Err(error) => errs.push(FieldError::internal(path.index(i), error)),
                }
                &mut hostnames
            }
            AddressType::Other(_) => continue,
        };
        if !seen.insert(value) {
            errs.push(FieldError::duplicate(path.index(i), value, ""));
        }
    }

    errs
}
