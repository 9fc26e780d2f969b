//! Property test strategies for Waypoint types
//!
//! Principals and shipment ids are drawn from small pools so generated
//! operations collide often enough to exercise overwrites and shared keys.

use crate::fixtures::{admin, principal};
use proptest::prelude::*;
use waypoint_core::{Principal, Role};

// Re-export proptest for convenience
pub use proptest;

/// Principal drawn from a pool of eight, including the administrator
pub fn arb_principal() -> impl Strategy<Value = Principal> {
    prop_oneof![Just(admin()), (1u8..8).prop_map(principal)]
}

/// Any role, including `None`
pub fn arb_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

/// Any role that authorizes appends
pub fn arb_authorized_role() -> impl Strategy<Value = Role> {
    prop::sample::select(vec![Role::Manufacturer, Role::Courier, Role::Inspector])
}

/// Shipment id from a pool of four, one of them empty
pub fn arb_shipment_id() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["SHIP-1", "SHIP-2", "SHIP-3", ""]).prop_map(str::to_owned)
}

/// `(location, status, document_hash)`; any may be empty
pub fn arb_checkpoint_fields() -> impl Strategy<Value = (String, String, String)> {
    (
        "[A-Za-z ]{0,12}",
        prop::sample::select(vec!["created", "in-transit", "customs", "delivered", ""]),
        "(Qm[A-Za-z0-9]{8})?",
    )
        .prop_map(|(location, status, hash)| (location, status.to_owned(), hash))
}

/// A caller-facing ledger operation
#[derive(Debug, Clone)]
pub enum LedgerOp {
    /// `assign_role` as `caller`
    Assign {
        /// Caller of the operation
        caller: Principal,
        /// Identity whose role changes
        target: Principal,
        /// Role to assign
        role: Role,
    },
    /// `add_checkpoint` as `caller`
    Append {
        /// Caller of the operation
        caller: Principal,
        /// Shipment key
        shipment_id: String,
        /// Location, status and document hash
        fields: (String, String, String),
    },
    /// Move the clock forward by this many seconds
    Tick(u64),
}

/// Mixed sequence element of assignments, appends and clock ticks
pub fn arb_ledger_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        2 => (arb_principal(), arb_principal(), arb_role())
            .prop_map(|(caller, target, role)| LedgerOp::Assign { caller, target, role }),
        5 => (arb_principal(), arb_shipment_id(), arb_checkpoint_fields())
            .prop_map(|(caller, shipment_id, fields)| LedgerOp::Append { caller, shipment_id, fields }),
        1 => (0u64..5).prop_map(LedgerOp::Tick),
    ]
}
