//! Identifier types for dispatch correlation.

use std::fmt;
use uuid::Uuid;

/// Correlation identifier assigned to a single dispatch.
///
/// Recorded on the dispatch span so that every event of one call can be
/// grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchId(Uuid);

impl DispatchId {
    /// Creates a new random dispatch identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
