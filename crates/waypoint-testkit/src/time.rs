//! Controllable clock for deterministic tests

use parking_lot::Mutex;
use std::sync::Arc;
use waypoint_core::{PhysicalClock, PhysicalTime};

/// Clock that only moves when told to
///
/// Clones share the same underlying time, so a test can keep one handle while
/// the ledger owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<u64>>,
}

impl ManualClock {
    /// Clock starting at `initial_secs`
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Arc::new(Mutex::new(initial_secs)),
        }
    }

    /// Move forward by `secs`
    pub fn advance(&self, secs: u64) {
        let mut current = self.current.lock();
        *current = current.saturating_add(secs);
    }

    /// Jump to an absolute time; may move backwards
    pub fn set(&self, secs: u64) {
        *self.current.lock() = secs;
    }

    /// Current reading
    pub fn now(&self) -> PhysicalTime {
        PhysicalTime(*self.current.lock())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PhysicalClock for ManualClock {
    fn physical_time(&self) -> PhysicalTime {
        self.now()
    }
}
