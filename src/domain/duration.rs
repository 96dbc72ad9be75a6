//! Gateway API duration strings.
//!
//! Durations are written as one to four `<amount><unit>` groups, where the
//! amount has at most five digits and the unit is one of `h`, `m`, `s` or
//! `ms` (for example `1h30m`, `500ms`, `0s`). A zero duration disables
//! whatever timeout it configures.

use std::fmt;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Accepted duration syntax.
pub const DURATION_FORMAT: &str = r"^([0-9]{1,5}(h|m|s|ms)){1,4}$";

lazy_static! {
    static ref DURATION_REGEX: Result<Regex, regex::Error> = Regex::new(DURATION_FORMAT);
}

/// Reasons a duration string could not be interpreted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration {value:?}: must match {}", DURATION_FORMAT)]
    Format { value: String },

    #[error("invalid duration {value:?}: value out of range")]
    Overflow { value: String },

    #[error("could not compile duration regex: {message}")]
    Pattern { message: String },
}

/// A duration exactly as written in a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayDuration(String);

impl GatewayDuration {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to a [`Duration`].
    pub fn parse(&self) -> Result<Duration, DurationError> {
        parse_duration(&self.0)
    }
}

impl From<&str> for GatewayDuration {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for GatewayDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a Gateway API duration string.
pub fn parse_duration(value: &str) -> Result<Duration, DurationError> {
    let regex = DURATION_REGEX
        .as_ref()
        .map_err(|e| DurationError::Pattern { message: e.to_string() })?;
    if !regex.is_match(value) {
        return Err(DurationError::Format { value: value.to_string() });
    }

    let overflow = || DurationError::Overflow { value: value.to_string() };
    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let amount: u64 = rest[..digits].parse().map_err(|_| overflow())?;
        rest = &rest[digits..];

        let (unit_millis, unit_len) = if rest.starts_with("ms") {
            (1, 2)
        } else if rest.starts_with('h') {
            (3_600_000, 1)
        } else if rest.starts_with('m') {
            (60_000, 1)
        } else if rest.starts_with('s') {
            (1_000, 1)
        } else {
            return Err(DurationError::Format { value: value.to_string() });
        };
        rest = &rest[unit_len..];

        let millis = amount.checked_mul(unit_millis).ok_or_else(overflow)?;
        total = total.checked_add(Duration::from_millis(millis)).ok_or_else(overflow)?;
    }
    Ok(total)
}
