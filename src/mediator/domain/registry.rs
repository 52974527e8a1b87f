//! The validated request-to-handler registry.

use super::{HandlerDescriptor, RequestDescriptor};
use std::collections::HashMap;

/// Immutable mapping from each declared request to its single handler.
///
/// A registry is only produced by
/// [`RegistryBuilder`](crate::mediator::services::RegistryBuilder) after
/// validation succeeds. It has no mutation API and is shared read-only,
/// typically behind an [`Arc`](std::sync::Arc).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    bindings: HashMap<RequestDescriptor, HandlerDescriptor>,
}

impl Registry {
    pub(crate) const fn from_bindings(
        bindings: HashMap<RequestDescriptor, HandlerDescriptor>,
    ) -> Self {
        Self { bindings }
    }

    /// Returns the handler bound to `request`, if any.
    #[must_use]
    pub fn get(&self, request: &RequestDescriptor) -> Option<&HandlerDescriptor> {
        self.bindings.get(request)
    }

    /// Returns whether `request` has a bound handler.
    #[must_use]
    pub fn contains(&self, request: &RequestDescriptor) -> bool {
        self.bindings.contains_key(request)
    }

    /// Returns the number of bound requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns whether no request is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over every binding in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&RequestDescriptor, &HandlerDescriptor)> {
        self.bindings.iter()
    }
}
