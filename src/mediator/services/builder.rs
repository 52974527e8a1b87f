//! Registry construction and validation.
//!
//! [`RegistryBuilder`] checks that every discovered request has exactly one
//! handler. The conflict, missing and ambiguous checks all run to
//! completion, so a single [`ConfigurationError`] lists every offending
//! request.

use crate::mediator::domain::{
    BindingViolation, ConfigurationError, HandlerDescriptor, Registry, RequestDescriptor,
};
use std::collections::{BTreeMap, HashMap};
use tracing::{error, info};

use super::config::{OrphanHandlerPolicy, RegistryConfig};
use super::discovery::{Discovery, Manifest, scan};

/// Tracing target for registry construction.
pub(crate) const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

/// Validates discovered descriptors and publishes a [`Registry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
}

impl RegistryBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with custom settings.
    #[must_use]
    pub const fn with_config(config: RegistryConfig) -> Self {
        Self { config }
    }

    /// Returns the builder settings.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Builds the registry from discovered descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] listing every type declared in both
    /// request families, every request with no handler and every request
    /// with more than one handler. Orphaned handlers are included when the
    /// configuration rejects them.
    pub fn build(&self, discovery: &Discovery) -> Result<Registry, ConfigurationError> {
        let grouped = group_by_binding(discovery.handlers().iter().copied());

        let mut violations: Vec<BindingViolation> = discovery
            .conflicts()
            .iter()
            .map(|request| BindingViolation::ConflictingRequestFamilies { request: *request })
            .collect();
        let mut bindings = HashMap::with_capacity(discovery.requests().len());
        for request in discovery
            .requests()
            .iter()
            .filter(|request| !discovery.is_conflicting(request))
        {
            match grouped.get(request).map(Vec::as_slice) {
                None | Some([]) => {
                    violations.push(BindingViolation::MissingHandler { request: *request });
                }
                Some([handler]) => {
                    bindings.insert(*request, *handler);
                }
                Some(competing) => violations.push(BindingViolation::AmbiguousHandlers {
                    request: *request,
                    handlers: competing.iter().map(HandlerDescriptor::handler).collect(),
                }),
            }
        }

        if self.config.orphan_handlers == OrphanHandlerPolicy::Reject {
            violations.extend(
                grouped
                    .iter()
                    .filter(|(binding, _)| !discovery.requests().contains(*binding))
                    .flat_map(|(_, handlers)| handlers.iter())
                    .map(|handler| BindingViolation::OrphanedHandler { handler: *handler }),
            );
        }

        if violations.is_empty() {
            info!(
                target: REGISTRY_TARGET,
                bindings = bindings.len(),
                "request registry published"
            );
            Ok(Registry::from_bindings(bindings))
        } else {
            let err = ConfigurationError::new(violations);
            error!(
                target: REGISTRY_TARGET,
                violations = err.violations().len(),
                error = %err,
                "request registry validation failed"
            );
            Err(err)
        }
    }
}

/// Scans `manifests` and builds a validated registry in one step.
///
/// Call this once during application start-up so that a misconfigured
/// deployment fails before serving any request.
///
/// # Errors
///
/// Returns [`ConfigurationError`] when validation finds conflicting request
/// declarations, missing handlers or ambiguous handlers.
pub fn build_registry<'a>(
    manifests: impl IntoIterator<Item = &'a Manifest>,
    config: RegistryConfig,
) -> Result<Registry, ConfigurationError> {
    let discovery = scan(manifests);
    RegistryBuilder::with_config(config).build(&discovery)
}

fn group_by_binding(
    handlers: impl Iterator<Item = HandlerDescriptor>,
) -> BTreeMap<RequestDescriptor, Vec<HandlerDescriptor>> {
    let mut grouped: BTreeMap<RequestDescriptor, Vec<HandlerDescriptor>> = BTreeMap::new();
    for handler in handlers {
        grouped.entry(handler.binding()).or_default().push(handler);
    }
    grouped
}
