//! LED Driver Common Library
//!
//! Shared types for the LED driver workspace: GPIO line primitives,
//! the platform driver contract, and board configuration loading.
//!
//! # Module Structure
//!
//! - [`line`] - `Level`, `LineHandle` and the `LineProvider` trait
//! - [`driver`] - `PlatformDriver` trait, compatibility table, errors
//! - [`config`] - `BoardConfig` / `DeviceNode` loaded from board.toml
//!
//! The board configuration plays the role a device tree plays on an
//! embedded Linux system: it declares device nodes with a `compatible`
//! identifier and the GPIO lines they expose under logical names.

#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod driver;
pub mod line;

// Re-export key types for convenience
pub use crate::config::{BoardConfig, DeviceNode, LineDef};
pub use crate::driver::{CompatEntry, DriverError, DriverInfo, PlatformDriver};
pub use crate::line::{Level, LineHandle, LineProvider};
