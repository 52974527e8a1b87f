//! Shared world state for request dispatch BDD scenarios.

use std::sync::Arc;

use async_trait::async_trait;
use rstest::fixture;
use switchboard::mediator::{
    adapters::memory::ServiceContainer,
    domain::{
        ConfigurationError, Registry, Request, RequestHandler, VoidRequest, VoidRequestHandler,
    },
    services::{DispatchResult, Manifest},
};
use tokio_util::sync::CancellationToken;

/// Result-bearing request used by the scenarios.
pub struct Ping {
    /// Sequence number echoed by the handler.
    pub seq: u32,
}

/// Response to [`Ping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pong {
    /// Sequence number of the originating ping.
    pub seq: u32,
}

impl Request for Ping {
    type Response = Pong;
}

/// The single handler for [`Ping`].
pub struct PingHandler;

#[async_trait]
impl RequestHandler<Ping> for PingHandler {
    async fn handle(&self, request: Ping, _cancellation: CancellationToken) -> Pong {
        Pong { seq: request.seq }
    }
}

/// Void request used by the scenarios.
pub struct DeleteItem;

impl VoidRequest for DeleteItem {}

/// First handler for [`DeleteItem`].
pub struct DeleteItemHandlerA;

#[async_trait]
impl VoidRequestHandler<DeleteItem> for DeleteItemHandlerA {
    async fn handle(&self, _request: DeleteItem, _cancellation: CancellationToken) {}
}

/// Second handler for [`DeleteItem`].
pub struct DeleteItemHandlerB;

#[async_trait]
impl VoidRequestHandler<DeleteItem> for DeleteItemHandlerB {
    async fn handle(&self, _request: DeleteItem, _cancellation: CancellationToken) {}
}

/// Scenario world for request dispatch behaviour tests.
pub struct DispatchWorld {
    /// Declarations gathered by `given` steps.
    pub manifest: Manifest,
    /// Handler registrations matching the declarations.
    pub container: ServiceContainer,
    /// Result of the last registry build.
    pub registry_result: Option<Result<Arc<Registry>, ConfigurationError>>,
    /// Result of the last ping dispatch.
    pub last_send: Option<DispatchResult<Pong>>,
}

impl DispatchWorld {
    /// Creates a world with an empty manifest and container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            manifest: Manifest::new("scenario"),
            container: ServiceContainer::new(),
            registry_result: None,
            last_send: None,
        }
    }
}

impl Default for DispatchWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DispatchWorld {
    DispatchWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Joins the short names of `types` with commas.
pub fn short_names(types: impl IntoIterator<Item = switchboard::mediator::domain::TypeKey>) -> String {
    types
        .into_iter()
        .map(|ty| ty.short_name())
        .collect::<Vec<_>>()
        .join(",")
}
