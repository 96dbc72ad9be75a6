//! Field locations and accumulated violations.
//!
//! Every validator reports into an [`ErrorList`]. Each [`FieldError`] carries
//! the [`FieldPath`] of the offending field, the [`ErrorKind`], the offending
//! value (when there is one) and a human readable detail. Rendering follows
//! the familiar `spec.rules[0].matches[0].headers: Invalid value: "X": detail`
//! layout so callers can point users at the exact field to fix.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

#[derive(Debug)]
struct Node {
    parent: FieldPath,
    segment: Segment,
}

/// Immutable location of a field inside a configuration object.
///
/// Appending a segment returns a new path and never touches the receiver, so
/// sibling validators can share a parent path freely. Segments are shared
/// through `Arc`, which makes cloning cheap and keeps paths `Send + Sync`.
#[derive(Clone, Default)]
pub struct FieldPath {
    tail: Option<Arc<Node>>,
}

impl FieldPath {
    /// Create a path rooted at `root` (e.g. `spec`).
    pub fn new(root: impl Into<String>) -> Self {
        Self::default().child(root)
    }

    /// Append a named field.
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.push(Segment::Field(name.into()))
    }

    /// Append a list index.
    pub fn index(&self, index: usize) -> Self {
        self.push(Segment::Index(index))
    }

    /// Append a map key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.push(Segment::Key(key.into()))
    }

    fn push(&self, segment: Segment) -> Self {
        Self { tail: Some(Arc::new(Node { parent: self.clone(), segment })) }
    }

    fn segments(&self) -> Vec<&Segment> {
        let mut segments = Vec::new();
        let mut cursor = self.tail.as_deref();
        while let Some(node) = cursor {
            segments.push(&node.segment);
            cursor = node.parent.tail.as_deref();
        }
        segments.reverse();
        segments
    }
}

impl PartialEq for FieldPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments() == other.segments()
    }
}

impl Eq for FieldPath {}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments().into_iter().enumerate() {
            match segment {
                Segment::Field(name) if position == 0 => write!(f, "{}", name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Key(key) => write!(f, "[{}]", key)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldPath({})", self)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Violation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A conditionally mandatory field is absent.
    Required,
    /// A field is present but its content breaks a rule.
    Invalid,
    /// A field is present but must not be, given its siblings.
    Forbidden,
    /// A value that must be unique appears more than once.
    Duplicate,
    /// An enumerated field holds a value outside its closed set.
    NotSupported,
    /// The validator hit a state it assumed impossible.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Required => "Required value",
            ErrorKind::Invalid => "Invalid value",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::Duplicate => "Duplicate value",
            ErrorKind::NotSupported => "Unsupported value",
            ErrorKind::Internal => "Internal error",
        };
        f.write_str(label)
    }
}

/// A single path-qualified violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub field: FieldPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub detail: String,
}

impl FieldError {
    /// A conditionally mandatory field is missing.
    pub fn required(field: FieldPath, detail: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Required, field, value: None, detail: detail.into() }
    }

    /// A present field holds an offending value.
    pub fn invalid<V: Serialize + ?Sized>(
        field: FieldPath,
        value: &V,
        detail: impl Into<String>,
    ) -> Self {
        Self { kind: ErrorKind::Invalid, field, value: Some(to_value(value)), detail: detail.into() }
    }

    /// A field is set where it is not allowed.
    pub fn forbidden(field: FieldPath, detail: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Forbidden, field, value: None, detail: detail.into() }
    }

    /// A value that must be unique is repeated.
    pub fn duplicate<V: Serialize + ?Sized>(
        field: FieldPath,
        value: &V,
        detail: impl Into<String>,
    ) -> Self {
        Self { kind: ErrorKind::Duplicate, field, value: Some(to_value(value)), detail: detail.into() }
    }

    /// An enumerated field holds an unknown value.
    pub fn not_supported<V: Serialize + ?Sized>(field: FieldPath, value: &V, supported: &[&str]) -> Self {
        let supported = supported.iter().map(|s| format!("{:?}", s)).collect::<Vec<_>>().join(", ");
        Self {
            kind: ErrorKind::NotSupported,
            field,
            value: Some(to_value(value)),
            detail: format!("supported values: {}", supported),
        }
    }

    /// The validator itself could not evaluate a rule.
    pub fn internal(field: FieldPath, error: impl fmt::Display) -> Self {
        Self { kind: ErrorKind::Internal, field, value: None, detail: error.to_string() }
    }
}

fn to_value<V: Serialize + ?Sized>(value: &V) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)?;
        if let Some(value) = &self.value {
            write!(f, ": {}", value)?;
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

/// Ordered collection of violations.
///
/// Validators build one list each and the object-level validators
/// concatenate them in walk order, outer to inner and left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Append every error of `other`, keeping its order.
    pub fn append(&mut self, other: ErrorList) {
        self.0.extend(other.0);
    }

}

impl Deref for ErrorList {
    type Target = [FieldError];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<FieldError>> for ErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => Ok(()),
            [only] => write!(f, "{}", only),
            errors => {
                let joined = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
                write!(f, "[{}]", joined)
            }
        }
    }
}
