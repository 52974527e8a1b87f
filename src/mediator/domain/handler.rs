//! Handler capabilities.
//!
//! Every handler exposes a single asynchronous `handle` operation. The
//! cancellation token is the caller's own; dispatch forwards it unchanged and
//! never acts on it.

use super::{Request, VoidRequest};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Handles requests of type `Q`, producing `Q::Response`.
///
/// A type may implement this trait for several request types; each
/// implementation is a separate capability.
#[async_trait]
pub trait RequestHandler<Q: Request>: Send + Sync + 'static {
    /// Processes the request.
    async fn handle(&self, request: Q, cancellation: CancellationToken) -> Q::Response;
}

/// Handles void requests of type `Q`.
#[async_trait]
pub trait VoidRequestHandler<Q: VoidRequest>: Send + Sync + 'static {
    /// Processes the request, resolving once the work is complete.
    async fn handle(&self, request: Q, cancellation: CancellationToken);
}
