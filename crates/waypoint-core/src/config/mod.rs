//! Configuration for the ledger service
//!
//! Layering: defaults, then a TOML file, then `WAYPOINT_*` environment
//! variables, then validation.

mod ledger;
mod traits;

pub use ledger::LedgerConfig;
pub use traits::{WaypointConfig, ENV_PREFIX};
