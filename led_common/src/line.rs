//! GPIO line primitives.
//!
//! This module defines:
//! - `Level` - binary output level of a line
//! - `LineHandle` - exclusive ownership token for an acquired line
//! - `LineProvider` trait - acquisition/release backend interface

use crate::config::DeviceNode;
use crate::driver::DriverError;

/// Binary output level of a GPIO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Electrically inactive (0).
    Inactive,
    /// Electrically active (1).
    Active,
}

impl Level {
    /// Electrical value passed to the GPIO layer.
    pub fn as_value(self) -> u8 {
        match self {
            Level::Inactive => 0,
            Level::Active => 1,
        }
    }

    /// Returns true for `Level::Active`.
    pub fn is_active(self) -> bool {
        matches!(self, Level::Active)
    }
}

impl From<bool> for Level {
    fn from(active: bool) -> Self {
        if active { Level::Active } else { Level::Inactive }
    }
}

/// Exclusive ownership token for a single acquired GPIO line.
///
/// Created only by a successful [`LineProvider::acquire`] and consumed
/// by the paired [`LineProvider::release`]. Deliberately not `Clone`:
/// releasing moves the handle, so a double release or a level set
/// after release does not compile.
#[derive(Debug, PartialEq, Eq)]
pub struct LineHandle {
    token: u32,
    chip: String,
    offset: u32,
}

impl LineHandle {
    /// Create a handle. Called by providers only.
    pub fn new(token: u32, chip: String, offset: u32) -> Self {
        Self {
            token,
            chip,
            offset,
        }
    }

    /// Provider-assigned token identifying the underlying request.
    pub fn token(&self) -> u32 {
        self.token
    }

    /// Path of the GPIO character device the line belongs to.
    pub fn chip(&self) -> &str {
        &self.chip
    }

    /// Line offset on the chip.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

/// Trait defining the interface to the electrical GPIO layer.
///
/// A provider owns the backend resources for every line it has handed
/// out; the returned [`LineHandle`] is the caller's proof of exclusive
/// ownership of one of them.
pub trait LineProvider: Send {
    /// Acquire exclusive ownership of the line `node` declares under
    /// `logical_name`, configured as an output initialized to `initial`.
    ///
    /// # Errors
    /// Returns `DriverError::ResourceUnavailable` if `logical_name`
    /// resolves to zero or multiple lines of `node`, or the line is
    /// already owned elsewhere, or the backing hardware is missing.
    fn acquire(
        &mut self,
        node: &DeviceNode,
        logical_name: &str,
        initial: Level,
    ) -> Result<LineHandle, DriverError>;

    /// Set the electrical level of an acquired line.
    ///
    /// Fire and forget: backend failures are logged by the provider,
    /// never surfaced to the caller.
    fn set_level(&mut self, handle: &LineHandle, level: Level);

    /// Relinquish ownership of the line. Consumes the handle; the line
    /// becomes available for acquisition by others.
    fn release(&mut self, handle: LineHandle);
}
