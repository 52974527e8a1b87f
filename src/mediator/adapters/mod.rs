//! Adapter implementations for mediator ports.

pub mod memory;
