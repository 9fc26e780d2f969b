//! Commit time
//!
//! The ledger never reads the wall clock directly. Time is injected through
//! [`PhysicalClock`] so tests can drive it deterministically and production
//! can use [`SystemClock`].

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock instant in whole seconds since the Unix epoch
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PhysicalTime(pub u64);

impl PhysicalTime {
    /// The Unix epoch
    pub const EPOCH: PhysicalTime = PhysicalTime(0);

    /// Create from seconds since the Unix epoch
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Seconds since the Unix epoch
    pub fn as_secs(self) -> u64 {
        self.0
    }

    /// Format as `YYYY-MM-DD HH:MM:SS UTC`
    ///
    /// Seconds beyond chrono's representable range render as `Invalid timestamp`.
    pub fn to_utc_string(self) -> String {
        i64::try_from(self.0)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "Invalid timestamp".to_string())
    }
}

impl fmt::Display for PhysicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_utc_string())
    }
}

impl From<u64> for PhysicalTime {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl From<PhysicalTime> for u64 {
    fn from(time: PhysicalTime) -> Self {
        time.0
    }
}

/// Source of commit time
pub trait PhysicalClock: Send + Sync {
    /// Current wall-clock time
    fn physical_time(&self) -> PhysicalTime;
}

impl<C: PhysicalClock + ?Sized> PhysicalClock for std::sync::Arc<C> {
    fn physical_time(&self) -> PhysicalTime {
        (**self).physical_time()
    }
}

impl<C: PhysicalClock + ?Sized> PhysicalClock for Box<C> {
    fn physical_time(&self) -> PhysicalTime {
        (**self).physical_time()
    }
}

/// Operating system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl PhysicalClock for SystemClock {
    fn physical_time(&self) -> PhysicalTime {
        // A clock set before 1970 reads as the epoch; the ledger clamps forward anyway.
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        PhysicalTime(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_formatting() {
        assert_eq!(PhysicalTime::EPOCH.to_utc_string(), "1970-01-01 00:00:00 UTC");
        assert_eq!(
            PhysicalTime::from_secs(1_700_000_000).to_string(),
            "2023-11-14 22:13:20 UTC"
        );
        assert_eq!(PhysicalTime(u64::MAX).to_utc_string(), "Invalid timestamp");
    }

    #[test]
    fn test_system_clock_is_past_2020() {
        assert!(SystemClock.physical_time().as_secs() > 1_577_836_800);
    }
}
