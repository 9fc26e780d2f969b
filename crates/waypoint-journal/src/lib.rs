//! Append-only checkpoint journal for Waypoint
//!
//! # Architecture
//!
//! - **Checkpoints**: immutable records, grouped per shipment into a [`ShipmentHistory`]
//! - **Ledger**: [`CheckpointLedger`] gates appends through an `Authorizer` and
//!   returns [`Committed`] values carrying the emitted events
//! - **Dispatch**: [`EventDispatcher`] forwards events to [`EventSubscriber`]s in
//!   commit order
//! - **Service**: [`SharedLedger`] serializes writers behind one lock for
//!   multi-threaded hosts; [`LedgerService`] wires it up from configuration
//! - **Snapshots**: [`LedgerSnapshot`] persists the role and checkpoint tables

#![forbid(unsafe_code)]

mod checkpoint;
mod dispatch;
mod ledger;
mod query;
mod service;
mod shared;
mod snapshot;

pub use checkpoint::{Checkpoint, ShipmentHistory};
pub use dispatch::{BroadcastSubscriber, EventDispatcher, EventLog, EventSubscriber};
pub use ledger::{CheckpointLedger, Committed};
pub use service::LedgerService;
pub use shared::SharedLedger;
pub use snapshot::{LedgerSnapshot, SNAPSHOT_FORMAT_VERSION};
