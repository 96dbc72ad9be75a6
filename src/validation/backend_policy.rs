//! BackendTrafficPolicy validation.

use std::collections::HashSet;
use std::time::Duration;

use crate::domain::{
    BackendTrafficPolicy, CookieLifetimeType, GatewayDuration, RetryConstraint, SessionPersistence,
    SessionPersistenceType,
};

use super::field::{ErrorList, FieldError, FieldPath};

const ONE_SECOND: Duration = Duration::from_secs(1);
const ONE_HOUR: Duration = Duration::from_secs(3600);

/// Validate a BackendTrafficPolicy: target references, retry constraint,
/// then session persistence.
pub fn validate_backend_traffic_policy(policy: &BackendTrafficPolicy) -> ErrorList {
    let spec = FieldPath::new("spec");
    let mut errs = ErrorList::new();

    let targets_path = spec.child("targetRefs");
    let mut targets = HashSet::new();
    for (i, target) in policy.spec.target_refs.iter().enumerate() {
        if !targets.insert(target) {
            errs.push(FieldError::duplicate(targets_path.index(i), target, ""));
        }
    }

    if let Some(retry) = &policy.spec.retry_constraint {
        errs.append(validate_retry_constraint(retry, &spec.child("retryConstraint")));
    }
    if let Some(session) = &policy.spec.session_persistence {
        errs.append(validate_session_persistence(session, &spec.child("sessionPersistence")));
    }

    errs
}

fn validate_retry_constraint(retry: &RetryConstraint, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();

    if let Some(budget) = &retry.budget {
        let budget_path = path.child("budget");
        if let Some(percent) = budget.percent.filter(|p| !(0..=100).contains(p)) {
            errs.push(FieldError::invalid(
                budget_path.child("percent"),
                &percent,
                "must be between 0 and 100",
            ));
        }
        let interval_path = budget_path.child("interval");
        if let Some(interval) = parse(&budget.interval, &interval_path, &mut errs) {
            if !(ONE_SECOND..=ONE_HOUR).contains(&interval) {
                errs.push(FieldError::invalid(
                    interval_path,
                    &budget.interval,
                    "interval cannot be greater than one hour or less than one second",
                ));
            }
        }
    }

    if let Some(rate) = &retry.min_retry_rate {
        let interval_path = path.child("minRetryRate").child("interval");
        if let Some(interval) = parse(&rate.interval, &interval_path, &mut errs) {
            if interval.is_zero() || interval > ONE_HOUR {
                errs.push(FieldError::invalid(
                    interval_path,
                    &rate.interval,
                    "interval cannot be greater than one hour",
                ));
            }
        }
    }

    errs
}

fn validate_session_persistence(session: &SessionPersistence, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();

    parse(&session.absolute_timeout, &path.child("absoluteTimeout"), &mut errs);
    parse(&session.idle_timeout, &path.child("idleTimeout"), &mut errs);

    if let Some(cookie) = &session.cookie_config {
        if session.effective_type() != SessionPersistenceType::Cookie {
            errs.push(FieldError::forbidden(
                path.child("cookieConfig"),
                "cookieConfig can only be set with type Cookie",
            ));
        }
        if cookie.lifetime_type == Some(CookieLifetimeType::Permanent) && session.absolute_timeout.is_none() {
            errs.push(FieldError::required(
                path.child("absoluteTimeout"),
                "AbsoluteTimeout must be specified when cookie lifetimeType is Permanent",
            ));
        }
    }

    errs
}

/// Parse an optional duration, recording an internal error when it does not
/// parse.
fn parse(value: &Option<GatewayDuration>, path: &FieldPath, errs: &mut ErrorList) -> Option<Duration> {
    match value.as_ref()?.parse() {
        Ok(duration) => Some(duration),
        Err(error) => {
            errs.push(FieldError::internal(path.clone(), error));
            None
        }
    }
}
