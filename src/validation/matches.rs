//! Request match validation: path matches and duplicate header or query
//! parameter matches.

use crate::domain::{HttpPathMatch, PathMatchType};

use super::field::{ErrorList, FieldError, FieldPath};
use super::primitives::{
    canonical_header_key, duplicates_in_order, forbidden_sequences, forbidden_suffixes,
    has_valid_path_characters, is_absolute_path, VALID_PATH_CHARACTERS,
};

/// Validate a path match located at `path` (e.g. `spec.rules[0].matches[0].path`).
pub fn validate_path_match(path_match: &HttpPathMatch, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();

    let Some(match_type) = &path_match.match_type else {
        errs.push(FieldError::required(path.child("type"), "must be specified"));
        return errs;
    };
    let Some(value) = &path_match.value else {
        errs.push(FieldError::required(path.child("value"), "must not be nil"));
        return errs;
    };

    match match_type {
        PathMatchType::Exact | PathMatchType::PathPrefix => {
            let value_path = path.child("value");
            if !is_absolute_path(value) {
                errs.push(FieldError::invalid(value_path.clone(), value, "must be an absolute path"));
            }
            for sequence in forbidden_sequences(value) {
                errs.push(FieldError::invalid(
                    value_path.clone(),
                    value,
                    format!("must not contain {:?}", sequence),
                ));
            }
            for suffix in forbidden_suffixes(value) {
                errs.push(FieldError::invalid(
                    value_path.clone(),
                    value,
                    format!("cannot end with '{}'", suffix),
                ));
            }
            match has_valid_path_characters(value) {
                Ok(true) => {}
                Ok(false) => errs.push(FieldError::invalid(
                    value_path,
                    value,
                    format!("must only contain valid characters (matching {})", VALID_PATH_CHARACTERS),
                )),
                Err(error) => errs.push(FieldError::internal(value_path, error)),
            }
        }
        PathMatchType::RegularExpression => {}
        PathMatchType::Other(_) => {
            errs.push(FieldError::not_supported(path.child("type"), match_type.as_str(), PathMatchType::KNOWN));
        }
    }

    errs
}

/// Header names compare case-insensitively; each duplicated name is
/// reported once in its canonical form.
pub fn validate_header_match_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
    path: &FieldPath,
) -> ErrorList {
    duplicates_in_order(names.into_iter().map(str::to_ascii_lowercase))
        .into_iter()
        .map(|name| {
            FieldError::invalid(
                path.clone(),
                &canonical_header_key(&name),
                "cannot match the same header multiple times in the same rule",
            )
        })
        .collect()
}

/// Query parameter names compare case-sensitively.
pub fn validate_query_param_match_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
    path: &FieldPath,
) -> ErrorList {
    duplicates_in_order(names)
        .into_iter()
        .map(|name| {
            FieldError::invalid(
                path.clone(),
                name,
                "cannot match the same query parameter multiple times in the same rule",
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;

    fn match_path() -> FieldPath {
        FieldPath::new("spec").child("rules").index(0).child("matches").index(0).child("path")
    }

    fn check(match_type: PathMatchType, value: &str) -> ErrorList {
        validate_path_match(&HttpPathMatch::new(match_type, value), &match_path())
    }

    #[test]
    fn valid_paths() {
        assert!(check(PathMatchType::PathPrefix, "/").is_empty());
        assert!(check(PathMatchType::Exact, "/foo/bar").is_empty());
        assert!(check(PathMatchType::PathPrefix, "/foo%20bar").is_empty());
        assert!(check(PathMatchType::RegularExpression, "^/(foo|bar)$").is_empty());
    }

    #[test]
    fn trailing_dot_segment() {
        let errs = check(PathMatchType::PathPrefix, "/.");
        assert_eq!(errs.len(), 1, "{errs}");
        assert_eq!(errs[0].detail, "cannot end with '/.'");
        assert_eq!(errs[0].field.to_string(), "spec.rules[0].matches[0].path.value");
    }

    #[test]
    fn dot_segment_inside_path() {
        let errs = check(PathMatchType::Exact, "/foo/./bar");
        assert_eq!(errs.len(), 1, "{errs}");
        assert_eq!(errs[0].detail, "must not contain \"/./\"");
    }

    #[test]
    fn every_violated_rule_is_reported() {
        let errs = check(PathMatchType::Exact, "foo//bar#");
        let details: Vec<_> = errs.iter().map(|e| e.detail.as_str()).collect();
        assert_eq!(
            details,
            vec![
                "must be an absolute path",
                "must not contain \"//\"",
                "must not contain \"#\"",
                "must only contain valid characters (matching ^(?:[A-Za-z0-9/._~!$&'()*+,;=:@-]|%[0-9a-fA-F]{2})+$)",
            ]
        );
    }

    #[test]
    fn missing_type_or_value() {
        let errs = validate_path_match(&HttpPathMatch::default(), &match_path());
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ErrorKind::Required);
        assert_eq!(errs[0].field.to_string(), "spec.rules[0].matches[0].path.type");

        let no_value = HttpPathMatch { match_type: Some(PathMatchType::Exact), value: None };
        let errs = validate_path_match(&no_value, &match_path());
        assert_eq!(errs[0].field.to_string(), "spec.rules[0].matches[0].path.value");
    }

    #[test]
    fn unknown_match_type() {
        let errs = check(PathMatchType::from("Glob"), "/foo*");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ErrorKind::NotSupported);
        assert_eq!(
            errs[0].to_string(),
            "spec.rules[0].matches[0].path.type: Unsupported value: \"Glob\": supported values: \"Exact\", \"PathPrefix\", \"RegularExpression\""
        );
    }

    #[test]
    fn duplicate_header_names_ignore_case() {
        let path = FieldPath::new("spec").child("rules").index(0).child("matches").index(0).child("headers");
        let errs = validate_header_match_names(["Header-Name-1", "Header-Name-2", "HEADER-NAME-2"], &path);
        assert_eq!(errs.len(), 1);
        assert_eq!(
            errs[0].to_string(),
            "spec.rules[0].matches[0].headers: Invalid value: \"Header-Name-2\": cannot match the same header multiple times in the same rule"
        );
    }

    #[test]
    fn query_param_names_are_case_sensitive() {
        let path = FieldPath::new("queryParams");
        assert!(validate_query_param_match_names(["q1", "q2", "Q1"], &path).is_empty());

        let errs = validate_query_param_match_names(["b", "a", "a", "b", "b"], &path);
        let values: Vec<_> = errs.iter().map(|e| e.value.clone()).collect();
        assert_eq!(values, vec![Some(serde_json::json!("b")), Some(serde_json::json!("a"))]);
    }
}
