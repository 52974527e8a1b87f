//! Descriptors matching requests to handlers.

use super::{Request, TypeKey, VoidRequest};
use std::fmt;

/// Identity of a request declaration.
///
/// Two descriptors are equal only when both the request type and the result
/// type match. A missing result type marks the void family, which is distinct
/// from every result-bearing descriptor of the same request type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestDescriptor {
    request: TypeKey,
    result: Option<TypeKey>,
}

impl RequestDescriptor {
    /// Creates a descriptor from raw type identities.
    #[must_use]
    pub const fn new(request: TypeKey, result: Option<TypeKey>) -> Self {
        Self { request, result }
    }

    /// Returns the descriptor of a result-bearing request.
    #[must_use]
    pub fn result_bearing<Q: Request>() -> Self {
        Self::new(TypeKey::of::<Q>(), Some(TypeKey::of::<Q::Response>()))
    }

    /// Returns the descriptor of a void request.
    #[must_use]
    pub fn void<Q: VoidRequest>() -> Self {
        Self::new(TypeKey::of::<Q>(), None)
    }

    /// Returns the request type.
    #[must_use]
    pub const fn request(&self) -> TypeKey {
        self.request
    }

    /// Returns the result type, or `None` for void requests.
    #[must_use]
    pub const fn result(&self) -> Option<TypeKey> {
        self.result
    }

    /// Returns whether the descriptor belongs to the void family.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        self.result.is_none()
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result {
            Some(result) => write!(f, "{} -> {}", self.request, result),
            None => write!(f, "{}", self.request),
        }
    }
}

/// A handler type together with the request it is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerDescriptor {
    handler: TypeKey,
    binding: RequestDescriptor,
}

impl HandlerDescriptor {
    /// Creates a handler descriptor.
    #[must_use]
    pub const fn new(handler: TypeKey, binding: RequestDescriptor) -> Self {
        Self { handler, binding }
    }

    /// Returns the handler type.
    #[must_use]
    pub const fn handler(&self) -> TypeKey {
        self.handler
    }

    /// Returns the request descriptor the handler is bound to.
    #[must_use]
    pub const fn binding(&self) -> RequestDescriptor {
        self.binding
    }

    /// Returns the capability a resolver must provide for this handler.
    #[must_use]
    pub const fn capability(&self) -> HandlerCapability {
        HandlerCapability(self.binding)
    }
}

impl fmt::Display for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} handles {}", self.handler, self.binding)
    }
}

/// Key under which handler instances are registered with a resolver.
///
/// Stands for "handles request `Q` producing `R`" (or "handles void request
/// `Q`"), independent of the concrete handler type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerCapability(RequestDescriptor);

impl HandlerCapability {
    /// Creates the capability for handlers bound to `binding`.
    #[must_use]
    pub const fn new(binding: RequestDescriptor) -> Self {
        Self(binding)
    }

    /// Returns the request descriptor the capability serves.
    #[must_use]
    pub const fn binding(&self) -> RequestDescriptor {
        self.0
    }
}

impl fmt::Display for HandlerCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler of {}", self.0)
    }
}
