//! Runtime dispatch of requests to their registered handlers.
//!
//! Each call moves through `resolving` (registry lookup, then resolver
//! lookup) and `invoking` (awaiting the handler). Only the absence of a
//! handler is reported as a [`DispatchError`]; whatever the handler returns
//! reaches the caller untouched.

use crate::mediator::{
    domain::{
        Command, DispatchId, Query, Registry, Request, RequestDescriptor, RequestHandler,
        VoidRequest, VoidRequestHandler,
    },
    ports::{HandlerResolver, ResolverError},
};
use crate::outcome::Outcome;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span, warn};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Lookup step at which a handler turned out to be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    /// The request descriptor is not bound in the registry.
    Registry,
    /// The resolver could not provide an instance for the bound capability.
    Resolver,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Registry => "registry",
            Self::Resolver => "resolver",
        })
    }
}

/// Errors raised by the dispatcher itself.
///
/// These are call-time defects such as a registry that does not match the
/// requests being sent, or a resolver missing a registration. They are never
/// produced by handler bodies.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The request value was absent.
    #[error("request must not be absent")]
    MissingRequest,

    /// No handler could be found for the request.
    #[error("no request handler found for request type '{}' at {stage} lookup", .request.request())]
    HandlerNotFound {
        /// Descriptor computed for the request.
        request: RequestDescriptor,
        /// Lookup step that failed.
        stage: LookupStage,
        /// Resolver failure, when the resolver reported one.
        #[source]
        source: Option<ResolverError>,
    },
}

impl DispatchError {
    /// Returns the lookup stage for [`DispatchError::HandlerNotFound`].
    #[must_use]
    pub const fn stage(&self) -> Option<LookupStage> {
        match self {
            Self::MissingRequest => None,
            Self::HandlerNotFound { stage, .. } => Some(*stage),
        }
    }

    const fn not_found(
        request: RequestDescriptor,
        stage: LookupStage,
        source: Option<ResolverError>,
    ) -> Self {
        Self::HandlerNotFound {
            request,
            stage,
            source,
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Routes requests to the single handler bound to them.
///
/// The mediator reads a shared, immutable [`Registry`] and obtains handler
/// instances from its resolver. It holds no mutable state, so any number of
/// dispatches may run concurrently through `&self`.
///
/// The registry decides whether a request has a handler; the resolver
/// decides which instance serves it. A resolver keyed by capability may hand
/// out an implementation other than the one the registry bound, for example
/// a later registration under
/// [`RegistrationStrategy::Append`](crate::mediator::adapters::memory::RegistrationStrategy::Append).
/// The bound handler is recorded on the `resolving handler` event and the
/// resolver records the implementation it returns.
#[derive(Clone)]
pub struct Mediator<R>
where
    R: HandlerResolver,
{
    registry: Arc<Registry>,
    resolver: R,
}

impl<R> Mediator<R>
where
    R: HandlerResolver,
{
    /// Creates a mediator over a validated registry and a resolution context.
    #[must_use]
    pub const fn new(registry: Arc<Registry>, resolver: R) -> Self {
        Self { registry, resolver }
    }

    /// Returns the registry used for lookups.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the resolution context.
    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Sends a result-bearing request to its handler.
    ///
    /// The cancellation token is forwarded to the handler unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::HandlerNotFound`] when the registry has no
    /// binding for the request or the resolver cannot provide the handler.
    pub async fn send<Q: Request>(
        &self,
        request: Q,
        cancellation: CancellationToken,
    ) -> DispatchResult<Q::Response> {
        let descriptor = RequestDescriptor::result_bearing::<Q>();
        let span = dispatch_span(&descriptor);
        async move {
            let handler = self.resolve::<dyn RequestHandler<Q>>(&descriptor)?;
            debug!(target: DISPATCH_TARGET, "invoking handler");
            let response = handler.handle(request, cancellation).await;
            debug!(target: DISPATCH_TARGET, "handler completed");
            Ok(response)
        }
        .instrument(span)
        .await
    }

    /// Sends a void request to its handler.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::HandlerNotFound`] when the registry has no
    /// binding for the request or the resolver cannot provide the handler.
    pub async fn send_void<Q: VoidRequest>(
        &self,
        request: Q,
        cancellation: CancellationToken,
    ) -> DispatchResult<()> {
        let descriptor = RequestDescriptor::void::<Q>();
        let span = dispatch_span(&descriptor);
        async move {
            let handler = self.resolve::<dyn VoidRequestHandler<Q>>(&descriptor)?;
            debug!(target: DISPATCH_TARGET, "invoking handler");
            handler.handle(request, cancellation).await;
            debug!(target: DISPATCH_TARGET, "handler completed");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Sends a result-bearing request that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingRequest`] for `None` before any lookup
    /// takes place, otherwise the errors of [`send`](Self::send).
    pub async fn send_optional<Q: Request>(
        &self,
        maybe_request: Option<Q>,
        cancellation: CancellationToken,
    ) -> DispatchResult<Q::Response> {
        let request = require(maybe_request)?;
        self.send(request, cancellation).await
    }

    /// Sends a void request that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingRequest`] for `None` before any lookup
    /// takes place, otherwise the errors of [`send_void`](Self::send_void).
    pub async fn send_void_optional<Q: VoidRequest>(
        &self,
        maybe_request: Option<Q>,
        cancellation: CancellationToken,
    ) -> DispatchResult<()> {
        let request = require(maybe_request)?;
        self.send_void(request, cancellation).await
    }

    /// Executes a command.
    ///
    /// Shorthand for [`send`](Self::send) that names the command's outcome.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`send`](Self::send). Command failures are
    /// returned inside the [`Outcome`].
    pub async fn execute<C: Command>(
        &self,
        command: C,
        cancellation: CancellationToken,
    ) -> DispatchResult<Outcome<C::Output>> {
        self.send(command, cancellation).await
    }

    /// Answers a query.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`send`](Self::send). Query failures are
    /// returned inside the [`Outcome`].
    pub async fn query<Q: Query>(
        &self,
        query: Q,
        cancellation: CancellationToken,
    ) -> DispatchResult<Outcome<Q::Output>> {
        self.send(query, cancellation).await
    }

    fn resolve<H>(&self, descriptor: &RequestDescriptor) -> DispatchResult<Arc<H>>
    where
        H: ?Sized + Send + Sync + 'static,
    {
        let Some(bound) = self.registry.get(descriptor) else {
            warn!(target: DISPATCH_TARGET, "request is not bound in the registry");
            return Err(DispatchError::not_found(
                *descriptor,
                LookupStage::Registry,
                None,
            ));
        };

        debug!(target: DISPATCH_TARGET, handler = %bound.handler(), "resolving handler");
        let capability = bound.capability();
        let failure = match self.resolver.try_resolve(&capability) {
            Ok(Some(instance)) => match instance.downcast::<Arc<H>>() {
                Ok(handler) => return Ok(Arc::clone(handler.as_ref())),
                Err(_) => Some(ResolverError::CapabilityMismatch(capability)),
            },
            Ok(None) => None,
            Err(err) => Some(err),
        };

        match &failure {
            Some(error) => {
                warn!(target: DISPATCH_TARGET, %error, "resolver failed to provide handler");
            }
            None => warn!(target: DISPATCH_TARGET, "resolver has no handler registered"),
        }
        Err(DispatchError::not_found(
            *descriptor,
            LookupStage::Resolver,
            failure,
        ))
    }
}

fn require<Q>(maybe_request: Option<Q>) -> DispatchResult<Q> {
    maybe_request.ok_or_else(|| {
        warn!(target: DISPATCH_TARGET, "rejected absent request");
        DispatchError::MissingRequest
    })
}

fn dispatch_span(descriptor: &RequestDescriptor) -> tracing::Span {
    let dispatch_id = DispatchId::new();
    debug_span!(
        target: DISPATCH_TARGET,
        "dispatch",
        dispatch_id = %dispatch_id,
        request = %descriptor
    )
}
