//! In-memory adapters for handler resolution.

mod container;

pub use container::{
    ContainerError, ContainerResult, RegistrationStrategy, ServiceContainer, ServiceLifetime,
    ServiceProvider, ServiceScope,
};
