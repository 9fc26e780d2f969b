//! Waypoint Testing Infrastructure
//!
//! Shared fixtures for tests across the workspace: a controllable clock,
//! well-known principals, ledger builders, proptest strategies and assertion
//! macros for the two authorization failures.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! waypoint-testkit = { workspace = true }
//! ```
//!
//! Then in your tests:
//! ```rust,no_run
//! use waypoint_testkit::*;
//!
//! #[test]
//! fn my_test() {
//!     let (mut ledger, clock) = test_ledger(1_700_000_000);
//!     ledger.add_checkpoint(&admin(), "SHIP-1", "Factory", "created", "").unwrap();
//!     clock.advance(60);
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod strategies;
pub mod time;
pub mod tracing_setup;

pub use fixtures::*;
pub use time::ManualClock;
pub use tracing_setup::init_test_tracing;

// Re-export commonly used types for convenience and for the assertion macros
pub use waypoint_core::{Principal, Role, WaypointError};
