//! Primitive predicates shared by the field-group validators.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

/// Substrings that are never allowed in an Exact or PathPrefix path.
pub const INVALID_PATH_SEQUENCES: [&str; 6] = ["//", "/./", "/../", "%2f", "%2F", "#"];

/// Suffixes that are never allowed in an Exact or PathPrefix path.
pub const INVALID_PATH_SUFFIXES: [&str; 2] = ["/..", "/."];

/// RFC-3986 path characters, plus percent-encoded octets.
pub const VALID_PATH_CHARACTERS: &str = r"^(?:[A-Za-z0-9/._~!$&'()*+,;=:@-]|%[0-9a-fA-F]{2})+$";

lazy_static! {
    // Compilation failures surface as internal field errors rather than panics.
    static ref VALID_PATH_REGEX: Result<Regex, regex::Error> = Regex::new(VALID_PATH_CHARACTERS);
}

/// True when `path` starts with `/`.
pub fn is_absolute_path(path: &str) -> bool {
    path.starts_with('/')
}

/// Forbidden sequences contained in `path`, in declaration order.
pub fn forbidden_sequences(path: &str) -> impl Iterator<Item = &'static str> + '_ {
    INVALID_PATH_SEQUENCES.into_iter().filter(move |seq| path.contains(seq))
}

/// Forbidden suffixes `path` ends with, in declaration order.
pub fn forbidden_suffixes(path: &str) -> impl Iterator<Item = &'static str> + '_ {
    INVALID_PATH_SUFFIXES.into_iter().filter(move |suffix| path.ends_with(suffix))
}

/// Whether every character of `path` is a legal path character.
///
/// Returns the regex compilation error as a string if the pattern could not
/// be built.
pub fn has_valid_path_characters(path: &str) -> Result<bool, String> {
    matches_pattern(&VALID_PATH_REGEX, path)
}

/// Evaluate a lazily compiled pattern against `value`.
pub(crate) fn matches_pattern(pattern: &Result<Regex, regex::Error>, value: &str) -> Result<bool, String> {
    match pattern {
        Ok(regex) => Ok(regex.is_match(value)),
        Err(error) => Err(format!("could not compile matching regex: {}", error)),
    }
}

/// Count occurrences of each key, preserving first-seen order.
pub fn count_in_order<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match positions.get(&key) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

/// Keys that occur more than once, each reported once in first-seen order.
pub fn duplicates_in_order<K, I>(keys: I) -> Vec<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    count_in_order(keys).into_iter().filter(|(_, count)| *count > 1).map(|(key, _)| key).collect()
}

/// Canonical MIME header form: the first letter and every letter following
/// a hyphen upper-cased, all others lower-cased.
///
/// Names containing a space or a byte that is not a valid header token
/// character are returned unchanged.
pub fn canonical_header_key(name: &str) -> String {
    if !name.bytes().all(is_token_byte) {
        return name.to_string();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let mapped = if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() };
            upper = c == '-';
            mapped
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// Whether a backend timeout exceeds the overall request timeout.
///
/// A zero duration disables the timeout it belongs to, so either side
/// being zero never counts as exceeding.
pub fn exceeds_enabled_timeout(request: Duration, backend: Duration) -> bool {
    !request.is_zero() && !backend.is_zero() && backend > request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths() {
        assert!(is_absolute_path("/"));
        assert!(is_absolute_path("/foo"));
        assert!(!is_absolute_path("foo"));
        assert!(!is_absolute_path(""));
    }

    #[test]
    fn forbidden_fragments() {
        assert_eq!(forbidden_sequences("/foo/./bar").collect::<Vec<_>>(), vec!["/./"]);
        assert_eq!(forbidden_sequences("//a/../b#").collect::<Vec<_>>(), vec!["//", "/../", "#"]);
        assert_eq!(forbidden_sequences("/a%2fb%2F").collect::<Vec<_>>(), vec!["%2f", "%2F"]);
        assert_eq!(forbidden_suffixes("/foo/..").collect::<Vec<_>>(), vec!["/.."]);
        assert_eq!(forbidden_suffixes("/.").collect::<Vec<_>>(), vec!["/."]);
        assert_eq!(forbidden_suffixes("/foo").count(), 0);
    }

    #[test]
    fn path_characters() {
        assert_eq!(has_valid_path_characters("/foo/bar-baz_~!$&'()*+,;=:@"), Ok(true));
        assert_eq!(has_valid_path_characters("/caf%C3%A9"), Ok(true));
        assert_eq!(has_valid_path_characters("/foo bar"), Ok(false));
        assert_eq!(has_valid_path_characters("/foo%zz"), Ok(false));
        assert_eq!(has_valid_path_characters("/foo?bar"), Ok(false));
    }

    #[test]
    fn counting_keeps_first_seen_order() {
        let counts = count_in_order(["b", "a", "b", "c", "a", "b"]);
        assert_eq!(counts, vec![("b", 3), ("a", 2), ("c", 1)]);
        assert_eq!(duplicates_in_order(["x", "y", "y", "x", "z"]), vec!["x", "y"]);
        assert!(duplicates_in_order(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn canonical_keys() {
        assert_eq!(canonical_header_key("header-name-2"), "Header-Name-2");
        assert_eq!(canonical_header_key("HEADER-NAME-2"), "Header-Name-2");
        assert_eq!(canonical_header_key("x-request-id"), "X-Request-Id");
        assert_eq!(canonical_header_key("bad header"), "bad header");
    }

    #[test]
    fn timeout_ordering() {
        let ms = Duration::from_millis;
        assert!(exceeds_enabled_timeout(ms(200), ms(1000)));
        assert!(!exceeds_enabled_timeout(ms(1000), ms(200)));
        assert!(!exceeds_enabled_timeout(ms(1000), ms(1000)));
        assert!(!exceeds_enabled_timeout(Duration::ZERO, ms(100)));
        assert!(!exceeds_enabled_timeout(ms(100), Duration::ZERO));
    }
}
