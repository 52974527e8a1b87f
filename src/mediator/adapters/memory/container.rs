//! Lifetime-aware in-memory service container.
//!
//! Handlers are registered against the capability they provide, frozen into
//! a [`ServiceProvider`], and resolved through per-call-site
//! [`ServiceScope`]s:
//!
//! - singleton instances are shared by every scope of a provider;
//! - scoped instances are shared within one scope;
//! - transient instances are built on every resolution.

use crate::mediator::{
    domain::{
        HandlerCapability, Request, RequestDescriptor, RequestHandler, TypeKey, VoidRequest,
        VoidRequestHandler,
    },
    ports::{
        HandlerInstance, HandlerResolver, ResolverError, ResolverResult, erase_handler,
        erase_void_handler,
    },
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::debug;

const CONTAINER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::container");

/// How long a resolved handler instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceLifetime {
    /// One instance per provider.
    Singleton,
    /// One instance per scope.
    Scoped,
    /// A fresh instance on every resolution.
    Transient,
}

/// Behaviour when a capability is registered more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistrationStrategy {
    /// Reject the second registration.
    #[default]
    Throw,
    /// Keep every registration; the most recent one is resolved.
    ///
    /// The most recent registration wins even when its implementation
    /// differs from the handler bound in the registry.
    Append,
}

/// Errors raised while registering services.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// The capability already has a registration.
    #[error("{capability} is already provided by '{existing}', cannot register '{implementation}'")]
    DuplicateRegistration {
        /// Capability registered twice.
        capability: HandlerCapability,
        /// Implementation registered first.
        existing: TypeKey,
        /// Implementation rejected.
        implementation: TypeKey,
    },
}

/// Result type for container registration.
pub type ContainerResult<T> = Result<T, ContainerError>;

type Factory = Arc<dyn Fn() -> HandlerInstance + Send + Sync>;

#[derive(Clone)]
struct Registration {
    implementation: TypeKey,
    lifetime: ServiceLifetime,
    factory: Factory,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("implementation", &self.implementation)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

type Registrations = HashMap<HandlerCapability, Vec<Registration>>;
type InstanceCache = RwLock<HashMap<HandlerCapability, HandlerInstance>>;

/// Mutable collection of handler registrations.
#[derive(Debug, Default)]
pub struct ServiceContainer {
    strategy: RegistrationStrategy,
    registrations: Registrations,
}

impl ServiceContainer {
    /// Creates an empty container that rejects duplicate registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container with the given registration strategy.
    #[must_use]
    pub fn with_strategy(strategy: RegistrationStrategy) -> Self {
        Self {
            strategy,
            registrations: HashMap::new(),
        }
    }

    /// Returns the registration strategy.
    #[must_use]
    pub const fn strategy(&self) -> RegistrationStrategy {
        self.strategy
    }

    /// Registers `H` as the handler of result-bearing request `Q`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::DuplicateRegistration`] when the strategy is
    /// [`RegistrationStrategy::Throw`] and `Q` already has a handler.
    pub fn add_handler<Q, H, F>(
        &mut self,
        lifetime: ServiceLifetime,
        factory: F,
    ) -> ContainerResult<&mut Self>
    where
        Q: Request,
        H: RequestHandler<Q>,
        F: Fn() -> H + Send + Sync + 'static,
    {
        let capability = HandlerCapability::new(RequestDescriptor::result_bearing::<Q>());
        let erased: Factory = Arc::new(move || erase_handler::<Q>(Arc::new(factory())));
        self.register(capability, TypeKey::of::<H>(), lifetime, erased)
    }

    /// Registers `H` as the handler of void request `Q`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::DuplicateRegistration`] when the strategy is
    /// [`RegistrationStrategy::Throw`] and `Q` already has a handler.
    pub fn add_void_handler<Q, H, F>(
        &mut self,
        lifetime: ServiceLifetime,
        factory: F,
    ) -> ContainerResult<&mut Self>
    where
        Q: VoidRequest,
        H: VoidRequestHandler<Q>,
        F: Fn() -> H + Send + Sync + 'static,
    {
        let capability = HandlerCapability::new(RequestDescriptor::void::<Q>());
        let erased: Factory = Arc::new(move || erase_void_handler::<Q>(Arc::new(factory())));
        self.register(capability, TypeKey::of::<H>(), lifetime, erased)
    }

    /// Returns whether `capability` has at least one registration.
    #[must_use]
    pub fn contains(&self, capability: &HandlerCapability) -> bool {
        self.registrations
            .get(capability)
            .is_some_and(|entries| !entries.is_empty())
    }

    /// Freezes the registrations into a provider.
    #[must_use]
    pub fn into_provider(self) -> ServiceProvider {
        ServiceProvider {
            state: Arc::new(ProviderState {
                registrations: self.registrations,
                singletons: RwLock::new(HashMap::new()),
            }),
        }
    }

    fn register(
        &mut self,
        capability: HandlerCapability,
        implementation: TypeKey,
        lifetime: ServiceLifetime,
        factory: Factory,
    ) -> ContainerResult<&mut Self> {
        let entries = self.registrations.entry(capability).or_default();
        if self.strategy == RegistrationStrategy::Throw
            && let Some(existing) = entries.last()
        {
            return Err(ContainerError::DuplicateRegistration {
                capability,
                existing: existing.implementation,
                implementation,
            });
        }
        entries.push(Registration {
            implementation,
            lifetime,
            factory,
        });
        debug!(
            target: CONTAINER_TARGET,
            %capability,
            %implementation,
            ?lifetime,
            "handler registered"
        );
        Ok(self)
    }
}

#[derive(Debug)]
struct ProviderState {
    registrations: Registrations,
    singletons: InstanceCache,
}

impl ProviderState {
    fn registration(&self, capability: &HandlerCapability) -> Option<&Registration> {
        self.registrations
            .get(capability)
            .and_then(|entries| entries.last())
    }
}

/// Frozen set of registrations that hands out resolution scopes.
#[derive(Debug, Clone)]
pub struct ServiceProvider {
    state: Arc<ProviderState>,
}

impl ServiceProvider {
    /// Creates a new resolution scope.
    #[must_use]
    pub fn create_scope(&self) -> ServiceScope {
        ServiceScope {
            state: Arc::clone(&self.state),
            scoped: RwLock::new(HashMap::new()),
        }
    }

    /// Returns whether `capability` can be resolved.
    #[must_use]
    pub fn contains(&self, capability: &HandlerCapability) -> bool {
        self.state.registration(capability).is_some()
    }
}

/// Resolution context that caches scoped instances for its own lifetime.
#[derive(Debug)]
pub struct ServiceScope {
    state: Arc<ProviderState>,
    scoped: InstanceCache,
}

impl HandlerResolver for ServiceScope {
    fn try_resolve(
        &self,
        capability: &HandlerCapability,
    ) -> ResolverResult<Option<HandlerInstance>> {
        let Some(registration) = self.state.registration(capability) else {
            return Ok(None);
        };
        debug!(
            target: CONTAINER_TARGET,
            %capability,
            implementation = %registration.implementation,
            lifetime = ?registration.lifetime,
            "resolving registration"
        );
        let instance = match registration.lifetime {
            ServiceLifetime::Singleton => {
                cached(&self.state.singletons, capability, &registration.factory)?
            }
            ServiceLifetime::Scoped => cached(&self.scoped, capability, &registration.factory)?,
            ServiceLifetime::Transient => (registration.factory)(),
        };
        Ok(Some(instance))
    }
}

fn cached(
    cache: &InstanceCache,
    capability: &HandlerCapability,
    factory: &Factory,
) -> ResolverResult<HandlerInstance> {
    {
        let instances = cache.read().map_err(poisoned)?;
        if let Some(instance) = instances.get(capability) {
            return Ok(Arc::clone(instance));
        }
    }
    let mut instances = cache.write().map_err(poisoned)?;
    let instance = instances
        .entry(*capability)
        .or_insert_with(|| factory());
    Ok(Arc::clone(instance))
}

fn poisoned<E: fmt::Display>(err: E) -> ResolverError {
    ResolverError::unavailable_message(format!("instance cache lock poisoned: {err}"))
}
