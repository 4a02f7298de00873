//! # Generation Errors
//!
//! Every failure the generator reports is a [`GenerationError`]: an [`ErrorKind`]
//! from the fixed taxonomy, the [`SchemaLocation`] it is attributable to, and a
//! human-readable message.
//!
//! Loader and generator passes collect errors instead of stopping at the first
//! one, so a single run reports every problem it can find. Collections are
//! returned as [`SchemaIssues`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Taxonomy of generation-time failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// An extension is misplaced, malformed, or the schema graph is structurally invalid
    MalformedSchema,
    /// A type or field reference cannot be found in the loaded schema set
    UnresolvedReference,
    /// A path-bound field carries an explicit, different binding location
    ConflictingBinding,
    /// A field's tag set would contain the same key twice
    DuplicateTagKey,
    /// A path template cannot be translated
    InvalidPathTemplate,
    /// Two enum values share a numeric error code
    DuplicateErrorCode,
    /// Two methods resolve to the same operation identifier or route
    DuplicateOperation,
    /// A nested field reference exceeds the configured depth
    SchemaTooDeep,
    /// A method has neither an HTTP mapping nor generic options
    UnmappedMethod,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::MalformedSchema => "MalformedSchema",
            ErrorKind::UnresolvedReference => "UnresolvedReference",
            ErrorKind::ConflictingBinding => "ConflictingBinding",
            ErrorKind::DuplicateTagKey => "DuplicateTagKey",
            ErrorKind::InvalidPathTemplate => "InvalidPathTemplate",
            ErrorKind::DuplicateErrorCode => "DuplicateErrorCode",
            ErrorKind::DuplicateOperation => "DuplicateOperation",
            ErrorKind::SchemaTooDeep => "SchemaTooDeep",
            ErrorKind::UnmappedMethod => "UnmappedMethod",
        };
        f.write_str(s)
    }
}

/// Path to the schema element an error is attributed to
///
/// Rendered as `/`-joined `kind:name` parts, e.g.
/// `service:UserService/method:GetUser/field:user_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SchemaLocation {
    parts: Vec<String>,
}

impl SchemaLocation {
    /// The schema root, used for document-wide failures
    pub fn root() -> Self {
        Self::default()
    }

    pub fn service(name: &str) -> Self {
        Self::root().push("service", name)
    }

    pub fn message(name: &str) -> Self {
        Self::root().push("message", name)
    }

    pub fn enumeration(name: &str) -> Self {
        Self::root().push("enum", name)
    }

    pub fn method(self, name: &str) -> Self {
        self.push("method", name)
    }

    pub fn field(self, name: &str) -> Self {
        self.push("field", name)
    }

    pub fn oneof(self, name: &str) -> Self {
        self.push("oneof", name)
    }

    pub fn value(self, name: &str) -> Self {
        self.push("value", name)
    }

    pub fn extension(self, name: &str) -> Self {
        self.push("extension", name)
    }

    fn push(mut self, kind: &str, name: &str) -> Self {
        self.parts.push(format!("{kind}:{name}"));
        self
    }
}

impl fmt::Display for SchemaLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parts.is_empty() {
            f.write_str("schema")
        } else {
            f.write_str(&self.parts.join("/"))
        }
    }
}

/// A single attributable generation failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("[{kind}] {location}: {message}")]
pub struct GenerationError {
    pub kind: ErrorKind,
    pub location: SchemaLocation,
    pub message: String,
}

impl GenerationError {
    pub fn new(kind: ErrorKind, location: SchemaLocation, message: impl Into<String>) -> Self {
        GenerationError {
            kind,
            location,
            message: message.into(),
        }
    }

    pub fn malformed(location: SchemaLocation, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedSchema, location, message)
    }

    pub fn unresolved(location: SchemaLocation, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedReference, location, message)
    }
}

/// A non-empty collection of generation failures that stopped the run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} schema issue(s) found", .0.len())]
pub struct SchemaIssues(pub Vec<GenerationError>);

impl SchemaIssues {
    pub fn issues(&self) -> &[GenerationError] {
        &self.0
    }

    /// Whether any issue has the given kind
    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }
}

impl From<GenerationError> for SchemaIssues {
    fn from(err: GenerationError) -> Self {
        SchemaIssues(vec![err])
    }
}

/// Print issues to stderr in `[Kind] location: message` form
pub fn print_issues(issues: &[GenerationError]) {
    eprintln!(
        "\n❌ Schema generation failed. {} issue(s) found:\n",
        issues.len()
    );
    for issue in issues {
        eprintln!("{issue}");
    }
    eprintln!("\nPlease fix the issues in your schema before generating.\n");
}
