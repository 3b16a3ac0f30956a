//! # LED Driver Library
//!
//! Raspberry Pi GPIO LED platform driver with pluggable line providers.
//!
//! This crate provides the `led_driver` binary, the LED lifecycle
//! controller and the line provider backends. Drivers implement the
//! `PlatformDriver` trait defined in `led_common::driver`.
//!
//! # Module Structure
//!
//! - [`controller`] - `LedController`, the bind/unbind lifecycle
//! - [`registry`] - Platform registry matching device nodes to drivers
//! - [`providers`] - Line provider backends (cdev, simulation)
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                 led_driver (single crate)                  │
//! │  ┌──────────────┐   bind/unbind   ┌─────────────────────┐  │
//! │  │ PlatformReg- │ ───────────────►│  LedController      │  │
//! │  │ istry        │                 │  Unbound | Bound(h) │  │
//! │  └──────▲───────┘                 └─────────┬───────────┘  │
//! │         │ probe(nodes)                      │              │
//! │  ┌──────┴───────┐                           ▼              │
//! │  │ BoardConfig  │                  ┌────────────────┐      │
//! │  │ (led_common) │                  │  LineProvider  │      │
//! │  └──────────────┘                  │  trait object  │      │
//! │                                    └────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```

#![deny(warnings)]
#![deny(missing_docs)]

pub mod controller;
pub mod providers;
pub mod registry;

// Re-export key types for convenience
pub use crate::controller::LedController;
pub use crate::registry::{PlatformRegistry, ProbeReport};
