//! GPIO character device line provider.
//!
//! Requests lines through the Linux GPIO cdev interface
//! (`/dev/gpiochipN`). The kernel enforces exclusivity: a line already
//! requested by another consumer fails to acquire. Dropping the kernel
//! request releases the line.

use gpio_cdev::{Chip, LineRequestFlags};
use led_common::config::DeviceNode;
use led_common::driver::DriverError;
use led_common::line::{Level, LineHandle, LineProvider};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Line provider backed by the GPIO character device.
pub struct CdevLineProvider {
    /// Kernel line requests, keyed by handle token.
    owned: HashMap<u32, gpio_cdev::LineHandle>,
    /// Next token to hand out.
    next_token: u32,
    /// Consumer label reported to the kernel (visible in gpioinfo).
    consumer: String,
}

impl CdevLineProvider {
    /// Create a provider labelling its requests with `consumer`.
    pub fn new(consumer: &str) -> Self {
        Self {
            owned: HashMap::new(),
            next_token: 0,
            consumer: consumer.to_string(),
        }
    }
}

impl LineProvider for CdevLineProvider {
    fn acquire(
        &mut self,
        node: &DeviceNode,
        logical_name: &str,
        initial: Level,
    ) -> Result<LineHandle, DriverError> {
        let def = node.resolve_line(logical_name)?;

        let mut chip = Chip::new(&def.chip).map_err(|e| {
            DriverError::ResourceUnavailable(format!("Failed to open {}: {e}", def.chip))
        })?;
        let line = chip.get_line(def.offset).map_err(|e| {
            DriverError::ResourceUnavailable(format!(
                "Failed to get line {} on {}: {e}",
                def.offset, def.chip
            ))
        })?;
        let request = line
            .request(LineRequestFlags::OUTPUT, initial.as_value(), &self.consumer)
            .map_err(|e| {
                DriverError::ResourceUnavailable(format!(
                    "Failed to request {}:{} as output: {e}",
                    def.chip, def.offset
                ))
            })?;

        let token = self.next_token;
        self.next_token += 1;
        self.owned.insert(token, request);

        debug!(
            "Acquired line '{}' ({}:{}) at level {}",
            logical_name,
            def.chip,
            def.offset,
            initial.as_value()
        );
        Ok(LineHandle::new(token, def.chip.clone(), def.offset))
    }

    fn set_level(&mut self, handle: &LineHandle, level: Level) {
        if let Some(request) = self.owned.get(&handle.token()) {
            if let Err(e) = request.set_value(level.as_value()) {
                warn!(
                    "Failed to set {}:{} to {}: {e}",
                    handle.chip(),
                    handle.offset(),
                    level.as_value()
                );
            }
        } else {
            warn!(
                "set_level on unknown handle for {}:{}",
                handle.chip(),
                handle.offset()
            );
        }
    }

    fn release(&mut self, handle: LineHandle) {
        // Dropping the kernel request releases the line.
        self.owned.remove(&handle.token());
        debug!("Released line {}:{}", handle.chip(), handle.offset());
    }
}
