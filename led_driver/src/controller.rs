//! LED lifecycle controller.
//!
//! `LedController` implements the `PlatformDriver` trait: on bind it
//! acquires the "led" line of the matched device node and drives it
//! active; on unbind it drives the line inactive and releases it.

use led_common::config::DeviceNode;
use led_common::driver::{CompatEntry, DriverError, DriverInfo, PlatformDriver};
use led_common::line::{Level, LineHandle, LineProvider};
use tracing::{error, info};

/// Compatibility table declared to the platform registry.
pub const COMPAT_TABLE: &[CompatEntry] = &[CompatEntry::new("rpi,gpio27-led")];

/// Logical line name resolved against the device node on bind.
pub const LINE_NAME: &str = "led";

/// Binding state of the controller.
///
/// The handle lives inside the `Bound` variant, so releasing a line
/// that was never acquired is an impossible match arm rather than a
/// runtime bug.
enum BindState {
    Unbound,
    Bound(LineHandle),
}

/// LED lifecycle controller.
///
/// Holds the single piece of mutable state in the system: the acquired
/// line handle. The line provider is constructor-injected; there is no
/// global state.
pub struct LedController {
    provider: Box<dyn LineProvider>,
    state: BindState,
}

impl LedController {
    /// Create an unbound controller driving lines through `provider`.
    pub fn new(provider: Box<dyn LineProvider>) -> Self {
        Self {
            provider,
            state: BindState::Unbound,
        }
    }

    /// Returns true while a line is held.
    pub fn is_bound(&self) -> bool {
        matches!(self.state, BindState::Bound(_))
    }
}

impl PlatformDriver for LedController {
    fn info(&self) -> DriverInfo {
        DriverInfo {
            name: "gpio27-led",
            author: "Vo Truong",
            description: "Raspberry Pi GPIO27 LED driver",
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn compat_table(&self) -> &'static [CompatEntry] {
        COMPAT_TABLE
    }

    fn bind(&mut self, node: &DeviceNode) -> Result<(), DriverError> {
        // The registry matches before invoking us; a mismatch here is
        // a caller bug, not a condition to work around.
        if !self.matches(node) {
            return Err(DriverError::ContractViolation(format!(
                "bind called with non-matching node '{}'",
                node.compatible
            )));
        }
        if self.is_bound() {
            return Err(DriverError::ContractViolation(
                "bind called while already bound".to_string(),
            ));
        }

        let handle = match self.provider.acquire(node, LINE_NAME, Level::Inactive) {
            Ok(handle) => handle,
            Err(e) => {
                error!("Failed to get GPIO line '{LINE_NAME}': {e}");
                return Err(e);
            }
        };

        // Level goes active only after acquisition succeeded.
        self.provider.set_level(&handle, Level::Active);
        self.state = BindState::Bound(handle);

        info!("GPIO27 LED driver bound - LED ON");
        Ok(())
    }

    fn unbind(&mut self) -> Result<(), DriverError> {
        match std::mem::replace(&mut self.state, BindState::Unbound) {
            BindState::Bound(handle) => {
                self.provider.set_level(&handle, Level::Inactive);
                self.provider.release(handle);
                info!("GPIO27 LED driver unbound - LED OFF");
                Ok(())
            }
            BindState::Unbound => Err(DriverError::ContractViolation(
                "unbind called while unbound".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::sim::{SimEvent, SimLineProvider};
    use led_common::config::LineDef;

    fn led_node() -> DeviceNode {
        DeviceNode {
            compatible: "rpi,gpio27-led".to_string(),
            lines: vec![LineDef {
                name: "led".to_string(),
                chip: "/dev/gpiochip0".to_string(),
                offset: 27,
            }],
        }
    }

    fn sim_controller() -> (LedController, SimLineProvider) {
        let provider = SimLineProvider::new();
        let observer = provider.clone();
        (LedController::new(Box::new(provider)), observer)
    }

    #[test]
    fn bind_drives_line_active() {
        let (mut controller, sim) = sim_controller();

        controller.bind(&led_node()).expect("bind should succeed");

        assert!(controller.is_bound());
        assert_eq!(sim.level_of("/dev/gpiochip0", 27), Some(Level::Active));
        assert!(sim.is_owned("/dev/gpiochip0", 27));
    }

    #[test]
    fn bind_failure_leaves_controller_unbound() {
        let (mut controller, sim) = sim_controller();
        sim.mark_unavailable("/dev/gpiochip0", 27);

        let result = controller.bind(&led_node());

        assert!(matches!(result, Err(DriverError::ResourceUnavailable(_))));
        assert!(!controller.is_bound());
        // No level-set may happen on a failed bind.
        assert!(
            !sim.events()
                .iter()
                .any(|e| matches!(e, SimEvent::LevelSet { .. }))
        );
    }

    #[test]
    fn unbind_restores_inactive_and_releases() {
        let (mut controller, sim) = sim_controller();
        controller.bind(&led_node()).expect("bind should succeed");

        controller.unbind().expect("unbind should succeed");

        assert!(!controller.is_bound());
        assert_eq!(sim.level_of("/dev/gpiochip0", 27), Some(Level::Inactive));
        assert!(!sim.is_owned("/dev/gpiochip0", 27));
    }

    #[test]
    fn bind_orders_acquire_before_active_level() {
        let (mut controller, sim) = sim_controller();
        controller.bind(&led_node()).expect("bind should succeed");

        let events = sim.events();
        assert_eq!(
            events,
            vec![
                SimEvent::Acquired {
                    line: "led".to_string(),
                    initial: Level::Inactive,
                },
                SimEvent::LevelSet {
                    token: 0,
                    level: Level::Active,
                },
            ]
        );
    }

    #[test]
    fn unbind_orders_inactive_level_before_release() {
        let (mut controller, sim) = sim_controller();
        controller.bind(&led_node()).expect("bind should succeed");
        sim.clear_events();

        controller.unbind().expect("unbind should succeed");

        let events = sim.events();
        assert_eq!(
            events,
            vec![
                SimEvent::LevelSet {
                    token: 0,
                    level: Level::Inactive,
                },
                SimEvent::Released { token: 0 },
            ]
        );
    }

    #[test]
    fn double_bind_is_contract_violation() {
        let (mut controller, _sim) = sim_controller();
        controller.bind(&led_node()).expect("bind should succeed");

        let result = controller.bind(&led_node());
        assert!(matches!(result, Err(DriverError::ContractViolation(_))));
        // First binding stays intact.
        assert!(controller.is_bound());
    }

    #[test]
    fn unbind_while_unbound_is_contract_violation() {
        let (mut controller, _sim) = sim_controller();
        let result = controller.unbind();
        assert!(matches!(result, Err(DriverError::ContractViolation(_))));
    }

    #[test]
    fn bind_rejects_non_matching_node() {
        let (mut controller, sim) = sim_controller();
        let node = DeviceNode {
            compatible: "acme,beeper".to_string(),
            lines: vec![],
        };

        let result = controller.bind(&node);
        assert!(matches!(result, Err(DriverError::ContractViolation(_))));
        assert!(sim.events().is_empty());
    }

    #[test]
    fn driver_info_metadata() {
        let (controller, _sim) = sim_controller();
        let info = controller.info();
        assert_eq!(info.name, "gpio27-led");
        assert_eq!(info.author, "Vo Truong");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }
}
