//! Discovery of request and handler declarations.
//!
//! A [`Manifest`] names the types a unit of code contributes to dispatch.
//! [`scan`] walks one or more manifests, classifies every concrete
//! declaration exactly once, and returns the discovered descriptors as sets.
//! Types declared in both request families are recorded as conflicts and
//! reported by the registry builder alongside every other violation.

use crate::mediator::domain::{
    HandlerDescriptor, RequestDescriptor, TypeDeclaration, TypeKey, classify,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::builder::REGISTRY_TARGET;

/// A named set of type declarations.
///
/// # Examples
///
/// ```
/// use switchboard::mediator::domain::{Request, TypeDeclaration};
/// use switchboard::mediator::services::{Manifest, scan};
///
/// struct Ping;
/// impl Request for Ping {
///     type Response = ();
/// }
///
/// let manifest = Manifest::new("diagnostics").with(TypeDeclaration::of::<Ping>().request());
/// let discovery = scan(&[manifest]);
/// assert_eq!(discovery.requests().len(), 1);
/// assert!(discovery.handlers().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    name: String,
    declarations: Vec<TypeDeclaration>,
}

impl Manifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
        }
    }

    /// Adds a declaration.
    #[must_use]
    pub fn with(mut self, declaration: impl Into<TypeDeclaration>) -> Self {
        self.declarations.push(declaration.into());
        self
    }

    /// Adds a declaration in place.
    pub fn declare(&mut self, declaration: impl Into<TypeDeclaration>) -> &mut Self {
        self.declarations.push(declaration.into());
        self
    }

    /// Returns the manifest name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declarations in insertion order.
    #[must_use]
    pub fn declarations(&self) -> &[TypeDeclaration] {
        &self.declarations
    }
}

/// Descriptors discovered across a set of manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    requests: BTreeSet<RequestDescriptor>,
    handlers: BTreeSet<HandlerDescriptor>,
    conflicts: BTreeSet<TypeKey>,
}

impl Discovery {
    /// Returns the discovered request descriptors.
    #[must_use]
    pub const fn requests(&self) -> &BTreeSet<RequestDescriptor> {
        &self.requests
    }

    /// Returns the discovered handler descriptors.
    #[must_use]
    pub const fn handlers(&self) -> &BTreeSet<HandlerDescriptor> {
        &self.handlers
    }

    /// Returns the types declared as both a result-bearing and a void
    /// request.
    #[must_use]
    pub const fn conflicts(&self) -> &BTreeSet<TypeKey> {
        &self.conflicts
    }

    /// Returns whether `request` belongs to a conflicting type.
    #[must_use]
    pub fn is_conflicting(&self, request: &RequestDescriptor) -> bool {
        self.conflicts.contains(&request.request())
    }
}

/// Scans manifests for request and handler declarations.
///
/// Declarations of the same type are merged, so each type is classified
/// once. Abstract declarations are skipped. Types declared as both a
/// result-bearing and a void request are listed in
/// [`Discovery::conflicts`].
#[must_use]
pub fn scan<'a>(manifests: impl IntoIterator<Item = &'a Manifest>) -> Discovery {
    let mut merged: BTreeMap<TypeKey, TypeDeclaration> = BTreeMap::new();
    for manifest in manifests {
        debug!(
            target: REGISTRY_TARGET,
            manifest = manifest.name(),
            declarations = manifest.declarations().len(),
            "scanning manifest"
        );
        for declaration in manifest.declarations() {
            merged
                .entry(declaration.ty())
                .and_modify(|existing| existing.merge(declaration.clone()))
                .or_insert_with(|| declaration.clone());
        }
    }

    let mut discovery = Discovery::default();
    for declaration in merged.values().filter(|declaration| declaration.is_concrete()) {
        let (requests, handlers) = classify(declaration).into_parts();
        discovery.requests.extend(requests);
        discovery.handlers.extend(handlers);
    }

    discovery.conflicts = conflicting_requests(&discovery.requests);
    if !discovery.conflicts.is_empty() {
        debug!(
            target: REGISTRY_TARGET,
            conflicts = discovery.conflicts.len(),
            "types declared in both request families"
        );
    }
    discovery
}

fn conflicting_requests(requests: &BTreeSet<RequestDescriptor>) -> BTreeSet<TypeKey> {
    let mut families: BTreeMap<TypeKey, usize> = BTreeMap::new();
    for request in requests {
        *families.entry(request.request()).or_default() += 1;
    }
    families
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(request, _)| request)
        .collect()
}
