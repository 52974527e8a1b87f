//! Registry validation settings.

/// How the registry builder treats handlers bound to undeclared requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrphanHandlerPolicy {
    /// Orphaned handlers are left out of the registry without error.
    #[default]
    Ignore,
    /// Orphaned handlers are reported as configuration violations.
    Reject,
}

/// Settings for registry construction.
///
/// # Examples
///
/// ```
/// use switchboard::mediator::services::{OrphanHandlerPolicy, RegistryConfig};
///
/// let config = RegistryConfig::default();
/// assert_eq!(config.orphan_handlers, OrphanHandlerPolicy::Ignore);
///
/// let strict = RegistryConfig::strict();
/// assert_eq!(strict.orphan_handlers, OrphanHandlerPolicy::Reject);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Treatment of handlers whose request was never declared.
    pub orphan_handlers: OrphanHandlerPolicy,
}

impl RegistryConfig {
    /// Creates a strict configuration that also rejects orphaned handlers.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            orphan_handlers: OrphanHandlerPolicy::Reject,
        }
    }
}
