//! Resolution port for handler instances.
//!
//! The dispatcher never constructs handlers. It asks a [`HandlerResolver`]
//! for an instance providing the bound [`HandlerCapability`] and downcasts
//! the returned [`HandlerInstance`] to the handler trait object.

use crate::mediator::domain::{
    HandlerCapability, Request, RequestHandler, VoidRequest, VoidRequestHandler,
};
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;

/// Type-erased handler instance.
///
/// Holds an `Arc<dyn RequestHandler<Q>>` or an `Arc<dyn VoidRequestHandler<Q>>`
/// for the capability it was resolved under.
pub type HandlerInstance = Arc<dyn Any + Send + Sync>;

/// Result type for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Capability-keyed service locator used by the dispatcher.
///
/// Implementations represent a resolution context: a dispatcher owns one and
/// uses it for every call it serves.
pub trait HandlerResolver: Send + Sync {
    /// Resolves an instance for `capability`.
    ///
    /// Returns `Ok(None)` when nothing is registered for the capability.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the resolver itself fails.
    fn try_resolve(&self, capability: &HandlerCapability)
    -> ResolverResult<Option<HandlerInstance>>;

    /// Resolves an instance for `capability`, treating absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::NotRegistered`] when nothing is registered
    /// for the capability, or any error raised by
    /// [`try_resolve`](Self::try_resolve).
    fn resolve(&self, capability: &HandlerCapability) -> ResolverResult<HandlerInstance> {
        self.try_resolve(capability)?
            .ok_or(ResolverError::NotRegistered(*capability))
    }
}

impl<R: HandlerResolver + ?Sized> HandlerResolver for Arc<R> {
    fn try_resolve(
        &self,
        capability: &HandlerCapability,
    ) -> ResolverResult<Option<HandlerInstance>> {
        (**self).try_resolve(capability)
    }
}

/// Errors returned by resolver implementations.
#[derive(Debug, Clone, Error)]
pub enum ResolverError {
    /// Nothing is registered for the capability.
    #[error("no service registered for {0}")]
    NotRegistered(HandlerCapability),

    /// The resolved instance does not provide the capability it was
    /// registered under.
    #[error("resolved instance does not implement {0}")]
    CapabilityMismatch(HandlerCapability),

    /// The resolver could not serve the request.
    #[error("resolver unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResolverError {
    /// Wraps an internal resolver failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Creates an unavailable error from a message.
    #[must_use]
    pub fn unavailable_message(message: impl Into<String>) -> Self {
        let err: Box<dyn std::error::Error + Send + Sync> = message.into().into();
        Self::Unavailable(Arc::from(err))
    }
}

/// Erases a result-bearing handler into a [`HandlerInstance`].
#[must_use]
pub fn erase_handler<Q: Request>(handler: Arc<dyn RequestHandler<Q>>) -> HandlerInstance {
    Arc::new(handler)
}

/// Erases a void handler into a [`HandlerInstance`].
#[must_use]
pub fn erase_void_handler<Q: VoidRequest>(
    handler: Arc<dyn VoidRequestHandler<Q>>,
) -> HandlerInstance {
    Arc::new(handler)
}
