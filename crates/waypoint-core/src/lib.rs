//! Waypoint Core - shared foundation for the checkpoint ledger
//!
//! This crate holds the small vocabulary every other Waypoint crate speaks:
//!
//! - [`Principal`]: opaque, already-authenticated caller identity
//! - [`Role`]: the closed set of capability labels
//! - [`PhysicalTime`] and [`PhysicalClock`]: commit-time source injected into the ledger
//! - [`LedgerEvent`]: notifications emitted by committed mutations
//! - [`WaypointError`]: the unified error type
//! - [`config`]: ledger service configuration
//!
//! It contains no ledger state. Authorization lives in `waypoint-authorization`
//! and the append-only journal in `waypoint-journal`.

#![forbid(unsafe_code)]

/// Ledger service configuration
pub mod config;

/// Unified error handling
pub mod errors;

/// Notifications emitted by committed mutations
pub mod events;

/// Commit time and clock sources
pub mod time;

/// Identities and roles
pub mod types;

pub use config::{LedgerConfig, WaypointConfig};
pub use errors::{Result, UnauthorizedKind, WaypointError};
pub use events::{LedgerEvent, SequencedEvent};
pub use time::{PhysicalClock, PhysicalTime, SystemClock};
pub use types::identifiers::{Principal, PRINCIPAL_LENGTH};
pub use types::role::Role;
