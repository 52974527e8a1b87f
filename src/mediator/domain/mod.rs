//! Domain model for request dispatch.
//!
//! Requests and handlers are identified by [`TypeKey`]s, matched through
//! descriptors, and bound together in an immutable [`Registry`]. Nothing in
//! this module performs resolution or invocation.

mod contract;
mod declaration;
mod descriptor;
mod error;
mod handler;
mod ids;
mod registry;
mod request;
mod type_key;

pub use contract::{
    Command, CommandHandler, CommandKind, Contract, ContractHandler, ContractKind, Query,
    QueryHandler, QueryKind,
};
pub use declaration::{
    Classification, DeclarationBuilder, DeclarationKind, DeclaredCapability, TypeDeclaration,
    classify,
};
pub use descriptor::{HandlerCapability, HandlerDescriptor, RequestDescriptor};
pub use error::{BindingViolation, ConfigurationError};
pub use handler::{RequestHandler, VoidRequestHandler};
pub use ids::DispatchId;
pub use registry::Registry;
pub use request::{Request, VoidRequest};
pub use type_key::TypeKey;
