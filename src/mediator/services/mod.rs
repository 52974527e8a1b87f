//! Application services for request discovery, validation and dispatch.

mod builder;
mod config;
mod discovery;
mod dispatcher;

pub use builder::{RegistryBuilder, build_registry};
pub use config::{OrphanHandlerPolicy, RegistryConfig};
pub use discovery::{Discovery, Manifest, scan};
pub use dispatcher::{DispatchError, DispatchResult, LookupStage, Mediator};
