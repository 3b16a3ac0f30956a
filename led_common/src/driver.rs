//! Platform driver trait and error types.
//!
//! This module defines:
//! - `PlatformDriver` trait - Interface for bind/unbind lifecycle drivers
//! - `DriverError` enum - Error types for driver operations
//! - `CompatEntry` - One entry of a driver's compatibility table
//! - `DriverInfo` struct - Informational driver metadata

use crate::config::DeviceNode;
use thiserror::Error;

/// Error types for driver operations.
#[derive(Debug, Clone, Error)]
pub enum DriverError {
    /// The requested GPIO line could not be exclusively acquired
    /// (already owned, not present, or hardware description malformed).
    #[error("GPIO line unavailable: {0}")]
    ResourceUnavailable(String),

    /// Lifecycle contract violation: bind while bound, unbind while
    /// unbound, or bind with a non-matching device node. A programming
    /// error in the caller, not a runtime condition to recover from.
    #[error("Lifecycle contract violation: {0}")]
    ContractViolation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// One entry of a driver's compatibility table.
///
/// Tables are plain slices (`&'static [CompatEntry]`); the registry
/// consumes them by iteration, so there is no sentinel terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatEntry {
    /// Compatibility identifier, e.g. `"rpi,gpio27-led"`.
    pub compatible: &'static str,
    /// Driver-private tag associated with this entry.
    pub data: Option<&'static str>,
}

impl CompatEntry {
    /// Create an entry with no associated tag.
    pub const fn new(compatible: &'static str) -> Self {
        Self {
            compatible,
            data: None,
        }
    }

    /// Create an entry carrying a driver-private tag.
    pub const fn with_data(compatible: &'static str, data: &'static str) -> Self {
        Self {
            compatible,
            data: Some(data),
        }
    }
}

/// Informational driver metadata, consumed by tooling for inventory
/// and display. Never interpreted by the registry or the driver itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverInfo {
    /// Short driver name, e.g. "gpio27-led".
    pub name: &'static str,
    /// Author of the driver.
    pub author: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Semantic version string.
    pub version: &'static str,
}

/// Trait defining the interface for platform drivers.
///
/// The platform registry manages drivers through this trait, matching
/// device nodes against each driver's compatibility table and running
/// the bind/unbind lifecycle.
///
/// # Lifecycle
///
/// 1. `bind()` - Called once per matching device node discovered
/// 2. `unbind()` - Called exactly once per successful bind, before the
///    node's context becomes invalid (shutdown or hot-unplug)
///
/// Calls are strictly serial; the registry never overlaps two
/// lifecycle calls on the same driver instance.
pub trait PlatformDriver: Send {
    /// Returns the driver's informational metadata.
    fn info(&self) -> DriverInfo;

    /// Returns the driver's compatibility table.
    ///
    /// Invariant: contains at least one entry, and every entry's
    /// identifier is non-empty. Enforced at registration.
    fn compat_table(&self) -> &'static [CompatEntry];

    /// Returns true if `node`'s compatible identifier appears in this
    /// driver's compatibility table.
    fn matches(&self, node: &DeviceNode) -> bool {
        self.compat_table()
            .iter()
            .any(|entry| entry.compatible == node.compatible)
    }

    /// Bind this driver to `node`.
    ///
    /// # Errors
    /// - `DriverError::ResourceUnavailable` if a required resource
    ///   could not be acquired; the driver remains unbound with no
    ///   partial state retained.
    /// - `DriverError::ContractViolation` if the node does not match
    ///   the compatibility table, or the driver is already bound.
    fn bind(&mut self, node: &DeviceNode) -> Result<(), DriverError>;

    /// Unbind this driver, releasing every resource bind acquired.
    ///
    /// # Errors
    /// Returns `DriverError::ContractViolation` if the driver is not
    /// currently bound.
    fn unbind(&mut self) -> Result<(), DriverError>;
}
