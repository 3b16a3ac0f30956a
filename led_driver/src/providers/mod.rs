//! Line provider backends.
//!
//! This module contains all `LineProvider` implementations:
//!
//! - [`cdev`] - GPIO character device backend (`/dev/gpiochipN`)
//! - [`sim`] - Software-simulated board for development and testing
//!
//! # Adding New Providers
//!
//! 1. Create a new submodule under `providers/`
//! 2. Implement the `LineProvider` trait from `led_common::line`
//! 3. Wire it into provider selection in `main.rs`
//! 4. Add export and documentation

pub mod cdev;
pub mod sim;
