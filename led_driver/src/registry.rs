//! Platform registry for lifecycle drivers.
//!
//! Provides a `PlatformRegistry` struct that holds registered drivers,
//! matches device nodes against their compatibility tables and runs
//! the bind/unbind lifecycle. This uses constructor-injection rather
//! than global state.
//!
//! Contract upheld towards drivers: `bind` is called once per matching
//! node, `unbind` exactly once per successful bind and never otherwise,
//! and lifecycle calls never overlap.

use led_common::config::DeviceNode;
use led_common::driver::PlatformDriver;
use tracing::{debug, error, info, warn};

/// Outcome counts of a probe pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeReport {
    /// Nodes that matched a driver and bound successfully.
    pub bound: usize,
    /// Nodes that matched a driver whose bind failed.
    pub failed: usize,
    /// Nodes skipped because their driver was already bound.
    pub skipped: usize,
    /// Nodes no registered driver matched.
    pub unmatched: usize,
}

/// One registered driver plus its binding bookkeeping.
struct RegisteredDriver {
    driver: Box<dyn PlatformDriver>,
    bound: bool,
}

/// Registry of platform drivers.
///
/// Constructed at startup, populated via `register()`, then driven
/// through `probe()` and `remove_all()`. No global state — testable
/// in isolation.
#[derive(Default)]
pub struct PlatformRegistry {
    drivers: Vec<RegisteredDriver>,
}

impl PlatformRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            drivers: Vec::new(),
        }
    }

    /// Register a driver.
    ///
    /// # Panics
    /// Panics if a driver with the same name is already registered, or
    /// the driver's compatibility table is empty or contains an empty
    /// identifier.
    pub fn register(&mut self, driver: Box<dyn PlatformDriver>) {
        let info = driver.info();
        if self.drivers.iter().any(|d| d.driver.info().name == info.name) {
            panic!("Driver '{}' is already registered", info.name);
        }
        let table = driver.compat_table();
        if table.is_empty() {
            panic!("Driver '{}' declares an empty compatibility table", info.name);
        }
        if table.iter().any(|entry| entry.compatible.is_empty()) {
            panic!(
                "Driver '{}' declares an empty compatibility identifier",
                info.name
            );
        }

        info!("Registered platform driver '{}' v{}", info.name, info.version);
        self.drivers.push(RegisteredDriver {
            driver,
            bound: false,
        });
    }

    /// Match each node against the registered drivers and bind.
    ///
    /// Nodes with no matching driver never reach any driver's bind
    /// path. A node matching an already-bound driver is skipped: the
    /// lifecycle contract forbids a second bind without an intervening
    /// unbind.
    pub fn probe(&mut self, nodes: &[DeviceNode]) -> ProbeReport {
        let mut report = ProbeReport::default();

        for node in nodes {
            let Some(entry) = self
                .drivers
                .iter_mut()
                .find(|d| d.driver.matches(node))
            else {
                debug!("No driver for compatible '{}'", node.compatible);
                report.unmatched += 1;
                continue;
            };

            if entry.bound {
                warn!(
                    "Driver '{}' already bound; skipping duplicate node '{}'",
                    entry.driver.info().name,
                    node.compatible
                );
                report.skipped += 1;
                continue;
            }

            match entry.driver.bind(node) {
                Ok(()) => {
                    entry.bound = true;
                    report.bound += 1;
                }
                Err(e) => {
                    error!("Bind failed for node '{}': {e}", node.compatible);
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Unbind every bound driver, in reverse registration order.
    pub fn remove_all(&mut self) {
        for entry in self.drivers.iter_mut().rev() {
            if !entry.bound {
                continue;
            }
            match entry.driver.unbind() {
                Ok(()) => entry.bound = false,
                Err(e) => error!(
                    "Unbind failed for driver '{}': {e}",
                    entry.driver.info().name
                ),
            }
        }
    }

    /// Number of drivers currently bound.
    pub fn bound_count(&self) -> usize {
        self.drivers.iter().filter(|d| d.bound).count()
    }

    /// List all registered driver names.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        self.drivers.iter().map(|d| d.driver.info().name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use led_common::driver::{CompatEntry, DriverError, DriverInfo};
    use std::sync::{Arc, Mutex};

    /// Test driver recording its lifecycle calls.
    struct TestDriver {
        name: &'static str,
        table: &'static [CompatEntry],
        fail_bind: bool,
        bind_log: Arc<Mutex<Vec<String>>>,
        unbind_count: Arc<Mutex<usize>>,
    }

    impl TestDriver {
        fn new(name: &'static str, table: &'static [CompatEntry]) -> Self {
            Self {
                name,
                table,
                fail_bind: false,
                bind_log: Arc::new(Mutex::new(Vec::new())),
                unbind_count: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl PlatformDriver for TestDriver {
        fn info(&self) -> DriverInfo {
            DriverInfo {
                name: self.name,
                author: "test",
                description: "test driver",
                version: "0.0.0",
            }
        }

        fn compat_table(&self) -> &'static [CompatEntry] {
            self.table
        }

        fn bind(&mut self, node: &DeviceNode) -> Result<(), DriverError> {
            self.bind_log
                .lock()
                .expect("lock")
                .push(node.compatible.clone());
            if self.fail_bind {
                return Err(DriverError::ResourceUnavailable("simulated".to_string()));
            }
            Ok(())
        }

        fn unbind(&mut self) -> Result<(), DriverError> {
            *self.unbind_count.lock().expect("lock") += 1;
            Ok(())
        }
    }

    const WIDGET_TABLE: &[CompatEntry] = &[CompatEntry::new("acme,widget")];
    const OTHER_TABLE: &[CompatEntry] = &[CompatEntry::new("acme,other")];

    fn widget_node() -> DeviceNode {
        DeviceNode {
            compatible: "acme,widget".to_string(),
            lines: vec![],
        }
    }

    #[test]
    fn probe_binds_matching_node() {
        let mut registry = PlatformRegistry::new();
        let driver = TestDriver::new("widget", WIDGET_TABLE);
        let log = driver.bind_log.clone();
        registry.register(Box::new(driver));

        let report = registry.probe(&[widget_node()]);

        assert_eq!(report.bound, 1);
        assert_eq!(registry.bound_count(), 1);
        assert_eq!(*log.lock().expect("lock"), vec!["acme,widget".to_string()]);
    }

    #[test]
    fn unmatched_node_never_reaches_a_driver() {
        let mut registry = PlatformRegistry::new();
        let driver = TestDriver::new("widget", WIDGET_TABLE);
        let log = driver.bind_log.clone();
        registry.register(Box::new(driver));

        let stranger = DeviceNode {
            compatible: "acme,unknown".to_string(),
            lines: vec![],
        };
        let report = registry.probe(&[stranger]);

        assert_eq!(report.unmatched, 1);
        assert_eq!(report.bound, 0);
        assert!(log.lock().expect("lock").is_empty());
    }

    #[test]
    fn duplicate_node_is_skipped_not_rebound() {
        let mut registry = PlatformRegistry::new();
        let driver = TestDriver::new("widget", WIDGET_TABLE);
        let log = driver.bind_log.clone();
        registry.register(Box::new(driver));

        let report = registry.probe(&[widget_node(), widget_node()]);

        assert_eq!(report.bound, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(log.lock().expect("lock").len(), 1);
    }

    #[test]
    fn failed_bind_leaves_driver_unbound() {
        let mut registry = PlatformRegistry::new();
        let mut driver = TestDriver::new("widget", WIDGET_TABLE);
        driver.fail_bind = true;
        let unbinds = driver.unbind_count.clone();
        registry.register(Box::new(driver));

        let report = registry.probe(&[widget_node()]);
        assert_eq!(report.failed, 1);
        assert_eq!(registry.bound_count(), 0);

        // No unbind may follow a failed bind.
        registry.remove_all();
        assert_eq!(*unbinds.lock().expect("lock"), 0);
    }

    #[test]
    fn remove_all_unbinds_once_per_bound_driver() {
        let mut registry = PlatformRegistry::new();
        let driver = TestDriver::new("widget", WIDGET_TABLE);
        let unbinds = driver.unbind_count.clone();
        registry.register(Box::new(driver));

        registry.probe(&[widget_node()]);
        registry.remove_all();
        registry.remove_all();

        assert_eq!(*unbinds.lock().expect("lock"), 1);
        assert_eq!(registry.bound_count(), 0);
    }

    #[test]
    fn list_drivers_reports_names() {
        let mut registry = PlatformRegistry::new();
        registry.register(Box::new(TestDriver::new("alpha", WIDGET_TABLE)));
        registry.register(Box::new(TestDriver::new("beta", OTHER_TABLE)));

        let mut names = registry.list_drivers();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_registration_panics() {
        let mut registry = PlatformRegistry::new();
        registry.register(Box::new(TestDriver::new("dup", WIDGET_TABLE)));
        registry.register(Box::new(TestDriver::new("dup", WIDGET_TABLE)));
    }

    #[test]
    #[should_panic(expected = "empty compatibility table")]
    fn empty_table_panics() {
        let mut registry = PlatformRegistry::new();
        registry.register(Box::new(TestDriver::new("empty", &[])));
    }
}
