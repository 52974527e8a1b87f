//! In-process request dispatch for Switchboard.
//!
//! Requests are declared in [`services::Manifest`]s, validated into an
//! immutable [`domain::Registry`] at start-up, and dispatched at run time by
//! [`services::Mediator`]. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
