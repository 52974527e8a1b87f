//! Switchboard: an in-process command and query bus.
//!
//! Callers send strongly typed requests; each request is routed to exactly
//! one registered handler. The request-to-handler mapping is validated
//! eagerly at start-up so that a misconfigured application fails before it
//! serves any traffic.
//!
//! # Architecture
//!
//! Switchboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure dispatch model with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`mediator`]: Request discovery, registry validation and dispatch
//! - [`outcome`]: Failure model returned by command and query handlers

pub mod mediator;
pub mod outcome;
