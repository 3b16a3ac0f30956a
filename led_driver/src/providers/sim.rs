//! Simulated line provider.
//!
//! `SimLineProvider` implements the `LineProvider` trait over a
//! software board for development and testing without physical
//! hardware. Clones share the same board, so one clone can act as a
//! controller's provider while another observes levels, marks lines
//! unavailable, or plays a competing consumer.

use led_common::config::DeviceNode;
use led_common::driver::DriverError;
use led_common::line::{Level, LineHandle, LineProvider};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// One recorded provider call, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// A line was acquired under its logical name.
    Acquired {
        /// Logical name the caller resolved the line by.
        line: String,
        /// Output level the line was initialized to.
        initial: Level,
    },
    /// The level of an acquired line was set.
    LevelSet {
        /// Token of the handle the call used.
        token: u32,
        /// Level the line was driven to.
        level: Level,
    },
    /// A line was released.
    Released {
        /// Token of the consumed handle.
        token: u32,
    },
}

/// Simulated board state shared by all clones of a provider.
#[derive(Debug, Default)]
struct SimState {
    /// Current owner token per (chip, offset); absent when free.
    owners: HashMap<(String, u32), u32>,
    /// Last driven level per (chip, offset); survives release.
    levels: HashMap<(String, u32), Level>,
    /// Lines that refuse acquisition.
    unavailable: HashSet<(String, u32)>,
    /// Recorded calls.
    events: Vec<SimEvent>,
    /// Next token to hand out.
    next_token: u32,
}

/// Line provider over a simulated board.
#[derive(Debug, Clone, Default)]
pub struct SimLineProvider {
    state: Arc<Mutex<SimState>>,
}

impl SimLineProvider {
    /// Create a provider with an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().expect("Sim board lock poisoned")
    }

    /// Last driven level of a line, or None if it was never acquired.
    pub fn level_of(&self, chip: &str, offset: u32) -> Option<Level> {
        self.lock().levels.get(&(chip.to_string(), offset)).copied()
    }

    /// Returns true while some consumer owns the line.
    pub fn is_owned(&self, chip: &str, offset: u32) -> bool {
        self.lock().owners.contains_key(&(chip.to_string(), offset))
    }

    /// Make the line refuse acquisition until cleared.
    pub fn mark_unavailable(&self, chip: &str, offset: u32) {
        self.lock().unavailable.insert((chip.to_string(), offset));
    }

    /// Make a previously unavailable line acquirable again.
    pub fn clear_unavailable(&self, chip: &str, offset: u32) {
        self.lock().unavailable.remove(&(chip.to_string(), offset));
    }

    /// Snapshot of the recorded calls, in invocation order.
    pub fn events(&self) -> Vec<SimEvent> {
        self.lock().events.clone()
    }

    /// Forget recorded calls.
    pub fn clear_events(&self) {
        self.lock().events.clear();
    }
}

impl LineProvider for SimLineProvider {
    fn acquire(
        &mut self,
        node: &DeviceNode,
        logical_name: &str,
        initial: Level,
    ) -> Result<LineHandle, DriverError> {
        let def = node.resolve_line(logical_name)?;
        let key = (def.chip.clone(), def.offset);

        let mut state = self.lock();
        if state.unavailable.contains(&key) {
            return Err(DriverError::ResourceUnavailable(format!(
                "Simulated line {}:{} is unavailable",
                def.chip, def.offset
            )));
        }
        if state.owners.contains_key(&key) {
            return Err(DriverError::ResourceUnavailable(format!(
                "Simulated line {}:{} is already requested",
                def.chip, def.offset
            )));
        }

        let token = state.next_token;
        state.next_token += 1;
        state.owners.insert(key.clone(), token);
        state.levels.insert(key, initial);
        state.events.push(SimEvent::Acquired {
            line: logical_name.to_string(),
            initial,
        });

        debug!(
            "Sim: acquired '{}' ({}:{}) at level {}",
            logical_name,
            def.chip,
            def.offset,
            initial.as_value()
        );
        Ok(LineHandle::new(token, def.chip.clone(), def.offset))
    }

    fn set_level(&mut self, handle: &LineHandle, level: Level) {
        let key = (handle.chip().to_string(), handle.offset());
        let mut state = self.lock();
        state.levels.insert(key, level);
        state.events.push(SimEvent::LevelSet {
            token: handle.token(),
            level,
        });
    }

    fn release(&mut self, handle: LineHandle) {
        let key = (handle.chip().to_string(), handle.offset());
        let mut state = self.lock();
        state.owners.remove(&key);
        state.events.push(SimEvent::Released {
            token: handle.token(),
        });
        debug!("Sim: released {}:{}", handle.chip(), handle.offset());
    }
}
