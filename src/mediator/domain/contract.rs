//! Command and query contracts.
//!
//! A [`Contract`] is a request whose handler reports success or an expected
//! [`Failure`](crate::outcome::Failure). Implementing it makes the type a
//! [`Request`] with `Response = Outcome<Output>`, so commands and queries
//! never spell out their response type.
//!
//! The contract kind decides which handler trait serves it: commands are
//! handled by a [`CommandHandler`], queries by a [`QueryHandler`]. Either
//! handler is a [`RequestHandler`] for the contract and can be registered,
//! declared and resolved like any other.
//!
//! # Examples
//!
//! ```
//! use async_trait::async_trait;
//! use switchboard::mediator::domain::{Contract, QueryHandler, QueryKind};
//! use switchboard::outcome::Outcome;
//! use tokio_util::sync::CancellationToken;
//!
//! struct CountItems;
//!
//! impl Contract for CountItems {
//!     type Kind = QueryKind;
//!     type Output = usize;
//! }
//!
//! struct CountItemsHandler;
//!
//! #[async_trait]
//! impl QueryHandler<CountItems> for CountItemsHandler {
//!     async fn handle(&self, _query: CountItems, _cancellation: CancellationToken) -> Outcome<usize> {
//!         Ok(3)
//!     }
//! }
//! ```

use super::{Request, RequestHandler};
use crate::outcome::Outcome;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::CommandKind {}
    impl Sealed for super::QueryKind {}
}

/// Marks the family a [`Contract`] belongs to.
///
/// Implemented only by [`CommandKind`] and [`QueryKind`].
pub trait ContractKind: sealed::Sealed + Send + 'static {}

/// Kind of contracts that change state.
#[derive(Debug)]
pub enum CommandKind {}

/// Kind of contracts that read state.
#[derive(Debug)]
pub enum QueryKind {}

impl ContractKind for CommandKind {}
impl ContractKind for QueryKind {}

/// A command or query producing `Outcome<Self::Output>`.
pub trait Contract: Send + 'static {
    /// [`CommandKind`] or [`QueryKind`].
    type Kind: ContractKind;
    /// Value produced on success. Commands without a result use `()`.
    type Output: Send + 'static;
}

impl<T: Contract> Request for T {
    type Response = Outcome<T::Output>;
}

/// A contract of kind [`CommandKind`].
pub trait Command: Contract<Kind = CommandKind> {}

impl<T: Contract<Kind = CommandKind>> Command for T {}

/// A contract of kind [`QueryKind`].
pub trait Query: Contract<Kind = QueryKind> {}

impl<T: Contract<Kind = QueryKind>> Query for T {}

/// Handles commands of type `C`.
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync + 'static {
    /// Executes the command.
    async fn handle(&self, command: C, cancellation: CancellationToken) -> Outcome<C::Output>;
}

/// Handles queries of type `Q`.
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync + 'static {
    /// Answers the query.
    async fn handle(&self, query: Q, cancellation: CancellationToken) -> Outcome<Q::Output>;
}

/// Bridges kind-specific handlers to [`RequestHandler`].
///
/// Implemented for every [`CommandHandler`] and [`QueryHandler`]; there is no
/// need to implement it directly.
#[async_trait]
pub trait ContractHandler<Q: Contract, K: ContractKind>: Send + Sync + 'static {
    /// Forwards the contract to the kind-specific handler.
    async fn handle_contract(&self, request: Q, cancellation: CancellationToken)
    -> Outcome<Q::Output>;
}

#[async_trait]
impl<C, H> ContractHandler<C, CommandKind> for H
where
    C: Command,
    H: CommandHandler<C>,
{
    async fn handle_contract(
        &self,
        request: C,
        cancellation: CancellationToken,
    ) -> Outcome<C::Output> {
        CommandHandler::handle(self, request, cancellation).await
    }
}

#[async_trait]
impl<Q, H> ContractHandler<Q, QueryKind> for H
where
    Q: Query,
    H: QueryHandler<Q>,
{
    async fn handle_contract(
        &self,
        request: Q,
        cancellation: CancellationToken,
    ) -> Outcome<Q::Output> {
        QueryHandler::handle(self, request, cancellation).await
    }
}

#[async_trait]
impl<Q, H> RequestHandler<Q> for H
where
    Q: Contract,
    H: ContractHandler<Q, Q::Kind>,
{
    async fn handle(&self, request: Q, cancellation: CancellationToken) -> Outcome<Q::Output> {
        self.handle_contract(request, cancellation).await
    }
}
