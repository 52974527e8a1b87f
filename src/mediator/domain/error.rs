//! Build-time configuration errors for the request registry.

use super::{HandlerDescriptor, RequestDescriptor, TypeKey};
use std::collections::BTreeSet;
use thiserror::Error;

/// A single inconsistency between declared requests and handlers.
#[derive(Debug, Clone, Error, PartialEq, Eq, PartialOrd, Ord)]
pub enum BindingViolation {
    /// A declared request has no handler bound to it.
    #[error("no request handler found for request type '{}'", .request.request())]
    MissingHandler {
        /// The unhandled request.
        request: RequestDescriptor,
    },

    /// A declared request has two or more handlers bound to it.
    #[error(
        "multiple request handlers found for request type '{}': {}",
        .request.request(),
        quoted(.handlers)
    )]
    AmbiguousHandlers {
        /// The ambiguously bound request.
        request: RequestDescriptor,
        /// Every competing handler type, in name order.
        handlers: Vec<TypeKey>,
    },

    /// A type declares itself as both a result-bearing and a void request.
    #[error("request type '{request}' declares both a result-bearing and a void request capability")]
    ConflictingRequestFamilies {
        /// The conflicting request type.
        request: TypeKey,
    },

    /// A handler is bound to a request that no manifest declares.
    #[error("request handler '{}' is bound to undeclared request type '{}'", .handler.handler(), .handler.binding().request())]
    OrphanedHandler {
        /// The orphaned handler.
        handler: HandlerDescriptor,
    },
}

impl BindingViolation {
    /// Returns the request type the violation concerns.
    #[must_use]
    pub const fn request_type(&self) -> TypeKey {
        match self {
            Self::MissingHandler { request } | Self::AmbiguousHandlers { request, .. } => {
                request.request()
            }
            Self::ConflictingRequestFamilies { request } => *request,
            Self::OrphanedHandler { handler } => handler.binding().request(),
        }
    }
}

/// Raised when declared requests and handlers do not form a total,
/// unambiguous mapping.
///
/// Every violation found is reported at once. No registry exists for a
/// configuration that produced this error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid request handler configuration: {}", describe(.violations))]
pub struct ConfigurationError {
    violations: Vec<BindingViolation>,
}

impl ConfigurationError {
    /// Creates an error from the collected violations, sorted so that
    /// missing handlers are reported before ambiguous ones.
    #[must_use]
    pub fn new(mut violations: Vec<BindingViolation>) -> Self {
        violations.sort();
        violations.dedup();
        Self { violations }
    }

    /// Returns every violation.
    #[must_use]
    pub fn violations(&self) -> &[BindingViolation] {
        &self.violations
    }

    /// Returns the request types with no handler.
    #[must_use]
    pub fn missing_requests(&self) -> BTreeSet<TypeKey> {
        self.collect(|violation| matches!(violation, BindingViolation::MissingHandler { .. }))
    }

    /// Returns the request types with more than one handler.
    #[must_use]
    pub fn ambiguous_requests(&self) -> BTreeSet<TypeKey> {
        self.collect(|violation| matches!(violation, BindingViolation::AmbiguousHandlers { .. }))
    }

    /// Returns the request types declared in both request families.
    #[must_use]
    pub fn conflicting_requests(&self) -> BTreeSet<TypeKey> {
        self.collect(|violation| {
            matches!(violation, BindingViolation::ConflictingRequestFamilies { .. })
        })
    }

    /// Returns the handler types bound to undeclared requests.
    #[must_use]
    pub fn orphaned_handlers(&self) -> BTreeSet<TypeKey> {
        self.violations
            .iter()
            .filter_map(|violation| match violation {
                BindingViolation::OrphanedHandler { handler } => Some(handler.handler()),
                _ => None,
            })
            .collect()
    }

    /// Returns the competing handlers of an ambiguously bound request.
    #[must_use]
    pub fn competing_handlers(&self, request: TypeKey) -> Option<&[TypeKey]> {
        self.violations.iter().find_map(|violation| match violation {
            BindingViolation::AmbiguousHandlers {
                request: descriptor,
                handlers,
            } if descriptor.request() == request => Some(handlers.as_slice()),
            _ => None,
        })
    }

    /// Returns every request type named by a violation.
    #[must_use]
    pub fn offending_types(&self) -> BTreeSet<TypeKey> {
        self.collect(|_| true)
    }

    fn collect(&self, predicate: impl Fn(&BindingViolation) -> bool) -> BTreeSet<TypeKey> {
        self.violations
            .iter()
            .filter(|violation| predicate(violation))
            .map(BindingViolation::request_type)
            .collect()
    }
}

fn quoted(types: &[TypeKey]) -> String {
    types
        .iter()
        .map(|ty| format!("'{ty}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe(violations: &[BindingViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
