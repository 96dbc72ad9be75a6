//! Parent reference disambiguation.
//!
//! A route may attach to the same parent more than once, but each
//! reference to that parent must then name a distinct section or port.
//! Unlike the other validators this one stops at the first collision.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::domain::ParentReference;

use super::field::{ErrorList, FieldError, FieldPath};

#[derive(Debug, PartialEq, Eq, Hash)]
struct ParentKey<'a> {
    name: &'a str,
    namespace: &'a str,
    kind: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Disambiguator<'a> {
    section: Option<&'a str>,
    port: Option<u16>,
}

impl Disambiguator<'_> {
    fn is_empty(&self) -> bool {
        self.section.is_none() && self.port.is_none()
    }
}

/// Validate `parent_refs` located at `path` (normally `spec.parentRefs`).
///
/// References without a namespace resolve to `route_namespace`; references
/// without a kind resolve to `Gateway`.
pub fn validate_parent_refs(
    parent_refs: &[ParentReference],
    route_namespace: &str,
    path: &FieldPath,
) -> ErrorList {
    let mut errs = ErrorList::new();
    let mut seen: HashMap<ParentKey<'_>, Vec<Disambiguator<'_>>> = HashMap::new();

    for (i, parent) in parent_refs.iter().enumerate() {
        let key = ParentKey {
            name: &parent.name,
            namespace: parent
                .namespace
                .as_deref()
                .filter(|ns| !ns.is_empty())
                .unwrap_or(route_namespace),
            kind: parent.effective_kind(),
        };
        let current = Disambiguator { section: parent.section(), port: parent.port.filter(|p| *p != 0) };

        let recorded = match seen.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(vec![current]);
                continue;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        if recorded[0].is_empty() || current.is_empty() {
            errs.push(FieldError::required(
                path.clone(),
                "sectionNames or ports must be specified when more than one parentRef refers to the same parent",
            ));
            return errs;
        }

        if recorded.contains(&current) {
            const DETAIL: &str =
                "must be unique when ParentRefs includes 2 or more references to the same parent";
            let error = match current.section {
                Some(section) => FieldError::invalid(path.index(i).child("sectionName"), section, DETAIL),
                None => FieldError::invalid(path.index(i).child("port"), &current.port, DETAIL),
            };
            errs.push(error);
            return errs;
        }

        recorded.push(current);
    }

    errs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;

    fn path() -> FieldPath {
        FieldPath::new("spec").child("parentRefs")
    }

    fn example(section: Option<&str>) -> ParentReference {
        let parent = ParentReference::new("example").with_namespace("example-ns");
        match section {
            Some(section) => parent.with_section_name(section),
            None => parent,
        }
    }

    #[test]
    fn distinct_sections_are_fine() {
        let refs = vec![example(Some("a")), example(Some("b"))];
        assert!(validate_parent_refs(&refs, "default", &path()).is_empty());
    }

    #[test]
    fn different_parents_need_no_disambiguator() {
        let refs = vec![ParentReference::new("a"), ParentReference::new("b")];
        assert!(validate_parent_refs(&refs, "default", &path()).is_empty());

        let refs = vec![
            ParentReference::new("a"),
            ParentReference::new("a").with_kind("ListenerSet"),
            ParentReference::new("a").with_namespace("other"),
        ];
        assert!(validate_parent_refs(&refs, "default", &path()).is_empty());
    }

    #[test]
    fn missing_disambiguator_stops_scanning() {
        let refs = vec![example(Some("a")), example(None), example(Some("b")), example(Some("a"))];
        let errs = validate_parent_refs(&refs, "default", &path());
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ErrorKind::Required);
        assert_eq!(errs[0].field.to_string(), "spec.parentRefs");

        let refs = vec![example(None), example(Some("a"))];
        assert_eq!(validate_parent_refs(&refs, "default", &path()).len(), 1);
    }

    #[test]
    fn repeated_section_name() {
        let refs = vec![example(Some("a")), example(Some("b")), example(Some("a")), example(Some("b"))];
        let errs = validate_parent_refs(&refs, "default", &path());
        assert_eq!(errs.len(), 1);
        assert_eq!(
            errs[0].to_string(),
            "spec.parentRefs[2].sectionName: Invalid value: \"a\": must be unique when ParentRefs includes 2 or more references to the same parent"
        );
    }

    #[test]
    fn repeated_port() {
        let refs = vec![
            ParentReference::new("gw").with_port(80),
            ParentReference::new("gw").with_port(443),
            ParentReference::new("gw").with_port(80),
        ];
        let errs = validate_parent_refs(&refs, "default", &path());
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field.to_string(), "spec.parentRefs[2].port");
        assert_eq!(errs[0].value, Some(serde_json::json!(80)));
    }

    #[test]
    fn unset_namespace_matches_route_namespace() {
        let refs = vec![ParentReference::new("gw"), ParentReference::new("gw").with_namespace("team-a")];
        assert_eq!(validate_parent_refs(&refs, "team-a", &path()).len(), 1);
        assert!(validate_parent_refs(&refs, "team-b", &path()).is_empty());
    }
}
