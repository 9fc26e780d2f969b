//! Ledger service configuration

use super::traits::WaypointConfig;
use crate::{Principal, Result, WaypointError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_EVENT_LOG_CAPACITY: usize = 256;
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Configuration for a ledger service instance
///
/// Every field is optional so a layer only overrides what it sets; the
/// capacity accessors fall back to their defaults.
///
/// ```toml
/// administrator = "0x00112233445566778899aabbccddeeff00112233"
/// event_log_capacity = 512
/// broadcast_capacity = 64
/// snapshot_path = "/var/lib/waypoint/ledger.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Identity fixed as administrator at construction; required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator: Option<Principal>,
    /// Number of recent events retained by the in-memory event log
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_log_capacity: Option<usize>,
    /// Buffer size of the broadcast notification channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast_capacity: Option<usize>,
    /// Snapshot file restored at startup when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

impl LedgerConfig {
    /// Configuration with the given administrator and defaults elsewhere
    pub fn with_administrator(administrator: Principal) -> Self {
        Self {
            administrator: Some(administrator),
            ..Self::default()
        }
    }

    /// The configured administrator, or an error if none is set
    pub fn require_administrator(&self) -> Result<Principal> {
        self.administrator
            .ok_or_else(|| WaypointError::invalid("Field 'administrator' is required but missing"))
    }

    /// Event log capacity, 256 unless set
    pub fn event_log_capacity(&self) -> usize {
        self.event_log_capacity.unwrap_or(DEFAULT_EVENT_LOG_CAPACITY)
    }

    /// Broadcast channel capacity, 64 unless set
    pub fn broadcast_capacity(&self) -> usize {
        self.broadcast_capacity.unwrap_or(DEFAULT_BROADCAST_CAPACITY)
    }
}

fn parse_capacity(field: &str, value: &str) -> Result<usize> {
    value.trim().parse::<usize>().map_err(|e| {
        WaypointError::invalid(format!("Field '{field}' must be an integer (got '{value}'): {e}"))
    })
}

impl WaypointConfig for LedgerConfig {
    const KEYS: &'static [&'static str] = &[
        "administrator",
        "event_log_capacity",
        "broadcast_capacity",
        "snapshot_path",
    ];

    fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "administrator" => self.administrator = Some(value.parse()?),
            "event_log_capacity" => {
                self.event_log_capacity = Some(parse_capacity("event_log_capacity", value)?);
            }
            "broadcast_capacity" => {
                self.broadcast_capacity = Some(parse_capacity("broadcast_capacity", value)?);
            }
            "snapshot_path" => {
                let trimmed = value.trim();
                self.snapshot_path = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
            }
            other => {
                return Err(WaypointError::invalid(format!(
                    "unknown configuration key '{other}'"
                )))
            }
        }
        Ok(())
    }

    fn merge_with(&mut self, other: &Self) -> Result<()> {
        if other.administrator.is_some() {
            self.administrator = other.administrator;
        }
        if other.event_log_capacity.is_some() {
            self.event_log_capacity = other.event_log_capacity;
        }
        if other.broadcast_capacity.is_some() {
            self.broadcast_capacity = other.broadcast_capacity;
        }
        if other.snapshot_path.is_some() {
            self.snapshot_path.clone_from(&other.snapshot_path);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.require_administrator()?;
        if self.event_log_capacity() == 0 {
            return Err(WaypointError::invalid(
                "Field 'event_log_capacity' must be at least 1 (got 0)",
            ));
        }
        if self.broadcast_capacity() == 0 {
            return Err(WaypointError::invalid(
                "Field 'broadcast_capacity' must be at least 1 (got 0)",
            ));
        }
        Ok(())
    }
}
