//! Board configuration types.
//!
//! This module contains the configuration loaded from `board.toml`:
//! - `BoardConfig` - the full board description
//! - `DeviceNode` - one hardware description entry
//! - `LineDef` - one GPIO line declared by a device node
//!
//! The board description is the hardware-description source the
//! platform registry enumerates at probe time, mapping each node's
//! logical line names to a (chip, offset) pair.

use crate::driver::DriverError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default chip path for lines that omit `chip`.
fn default_chip() -> String {
    "/dev/gpiochip0".to_string()
}

/// One GPIO line declared by a device node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineDef {
    /// Logical name drivers resolve the line by, e.g. "led".
    pub name: String,

    /// GPIO character device the line belongs to.
    /// Defaults to "/dev/gpiochip0" if omitted.
    #[serde(default = "default_chip")]
    pub chip: String,

    /// Line offset on the chip, e.g. 27 for BCM GPIO27.
    pub offset: u32,
}

/// One hardware description entry ("device node").
///
/// Provided externally by the board configuration; immutable for the
/// lifetime of a binding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceNode {
    /// Compatibility identifier matched against driver tables,
    /// e.g. `"rpi,gpio27-led"`.
    pub compatible: String,

    /// GPIO lines this node declares.
    #[serde(default)]
    pub lines: Vec<LineDef>,
}

impl DeviceNode {
    /// Resolve `logical_name` to exactly one declared line.
    ///
    /// # Errors
    /// Returns `DriverError::ResourceUnavailable` if zero or multiple
    /// lines carry that name.
    pub fn resolve_line(&self, logical_name: &str) -> Result<&LineDef, DriverError> {
        let mut matches = self.lines.iter().filter(|line| line.name == logical_name);
        match (matches.next(), matches.next()) {
            (Some(line), None) => Ok(line),
            (None, _) => Err(DriverError::ResourceUnavailable(format!(
                "node '{}' declares no line named '{}'",
                self.compatible, logical_name
            ))),
            (Some(_), Some(_)) => Err(DriverError::ResourceUnavailable(format!(
                "line name '{}' is ambiguous in node '{}'",
                logical_name, self.compatible
            ))),
        }
    }
}

/// Board configuration loaded from `board.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BoardConfig {
    /// Device nodes declared by the board.
    #[serde(default, rename = "device")]
    pub devices: Vec<DeviceNode>,
}

impl BoardConfig {
    /// Parse and validate a board description from TOML text.
    ///
    /// # Errors
    /// Returns `DriverError::ConfigError` on parse or validation failure.
    pub fn from_toml(content: &str) -> Result<Self, DriverError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DriverError::ConfigError(format!("Failed to parse board TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a board description from a file.
    ///
    /// # Errors
    /// Returns `DriverError::ConfigError` if the file cannot be read,
    /// parsed, or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DriverError> {
        let path = path.as_ref();
        debug!("Loading board config from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| {
            DriverError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Validate the board configuration.
    ///
    /// # Validation Rules
    /// 1. Every node's `compatible` is non-empty
    /// 2. Every line's `name` and `chip` are non-empty
    pub fn validate(&self) -> Result<(), DriverError> {
        for node in &self.devices {
            if node.compatible.is_empty() {
                return Err(DriverError::ConfigError(
                    "Device node with empty compatible identifier".to_string(),
                ));
            }
            for line in &node.lines {
                if line.name.is_empty() {
                    return Err(DriverError::ConfigError(format!(
                        "Node '{}' declares a line with an empty name",
                        node.compatible
                    )));
                }
                if line.chip.is_empty() {
                    return Err(DriverError::ConfigError(format!(
                        "Line '{}' of node '{}' has an empty chip path",
                        line.name, node.compatible
                    )));
                }
            }
        }
        Ok(())
    }
}
