//! Failure model for command and query handlers.
//!
//! Handlers report expected, domain-level failures as values rather than
//! through the dispatcher. A request whose `Response` is [`Outcome<T>`]
//! receives either the handler's value or a [`Failure`], and the dispatcher
//! passes both through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type returned by command and query handlers.
pub type Outcome<T> = Result<T, Failure>;

/// Classification of a handler failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request was malformed or failed validation.
    RequestInvalid,
    /// The caller may not perform the request.
    RequestNotAllowed,
    /// A resource named by the request does not exist.
    ResourceNotFound,
    /// The request conflicts with the current state of a resource.
    ResourceConflict,
    /// Any other failure.
    Internal,
}

impl FailureKind {
    /// Returns the HTTP-style status code conventionally used for the kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::RequestInvalid => 400,
            Self::RequestNotAllowed => 403,
            Self::ResourceNotFound => 404,
            Self::ResourceConflict => 409,
            Self::Internal => 500,
        }
    }

    /// Returns the reason phrase matching [`status_code`](Self::status_code).
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::RequestInvalid => "Bad Request",
            Self::RequestNotAllowed => "Forbidden",
            Self::ResourceNotFound => "Not Found",
            Self::ResourceConflict => "Conflict",
            Self::Internal => "Internal Server Error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// An expected failure reported by a handler.
///
/// # Examples
///
/// ```
/// use switchboard::outcome::{Failure, FailureKind};
///
/// let failure = Failure::resource_not_found("item.missing", ["item 42 does not exist"]);
/// assert_eq!(failure.kind(), FailureKind::ResourceNotFound);
/// assert_eq!(failure.kind().status_code(), 404);
/// assert_eq!(failure.issues(), ["item 42 does not exist"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    kind: FailureKind,
    code: String,
    issues: Vec<String>,
}

impl Failure {
    /// Creates a failure of the given kind.
    #[must_use]
    pub fn new(
        kind: FailureKind,
        code: impl Into<String>,
        issues: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            issues: issues.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a [`FailureKind::RequestInvalid`] failure.
    #[must_use]
    pub fn request_invalid(
        code: impl Into<String>,
        issues: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(FailureKind::RequestInvalid, code, issues)
    }

    /// Creates a [`FailureKind::RequestNotAllowed`] failure.
    #[must_use]
    pub fn request_not_allowed(
        code: impl Into<String>,
        issues: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(FailureKind::RequestNotAllowed, code, issues)
    }

    /// Creates a [`FailureKind::ResourceNotFound`] failure.
    #[must_use]
    pub fn resource_not_found(
        code: impl Into<String>,
        issues: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(FailureKind::ResourceNotFound, code, issues)
    }

    /// Creates a [`FailureKind::ResourceConflict`] failure.
    #[must_use]
    pub fn resource_conflict(
        code: impl Into<String>,
        issues: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(FailureKind::ResourceConflict, code, issues)
    }

    /// Creates a [`FailureKind::Internal`] failure.
    #[must_use]
    pub fn internal(
        code: impl Into<String>,
        issues: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(FailureKind::Internal, code, issues)
    }

    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the machine-readable failure code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the human-readable issues.
    #[must_use]
    pub fn issues(&self) -> &[String] {
        &self.issues
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.kind)?;
        if !self.issues.is_empty() {
            write!(f, ": {}", self.issues.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for Failure {}
