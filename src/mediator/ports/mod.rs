//! Port contracts for request dispatch.
//!
//! Ports define infrastructure-agnostic interfaces used by the dispatcher.

pub mod resolver;

pub use resolver::{
    HandlerInstance, HandlerResolver, ResolverError, ResolverResult, erase_handler,
    erase_void_handler,
};
