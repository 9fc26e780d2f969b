//! Property tests for the checkpoint ledger
//!
//! Random operation sequences are replayed against both the ledger and a
//! plain reference model; the two must agree after every step.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use std::collections::BTreeMap;
use waypoint_core::{LedgerEvent, PhysicalTime, Principal, Role, WaypointError};
use waypoint_testkit::strategies::{
    arb_authorized_role, arb_checkpoint_fields, arb_ledger_op, arb_principal, arb_shipment_id,
    LedgerOp,
};
use waypoint_testkit::{admin, assert_unauthorized_append, test_ledger, ManualClock};

const T0: u64 = 1_700_000_000;

/// Reference model: a role map and per-shipment lists of `(submitter, status)`
#[derive(Default)]
struct Model {
    roles: BTreeMap<Principal, Role>,
    histories: BTreeMap<String, Vec<(Principal, String)>>,
}

impl Model {
    fn new() -> Self {
        let mut model = Self::default();
        model.roles.insert(admin(), Role::Inspector);
        model
    }

    fn role(&self, who: &Principal) -> Role {
        self.roles.get(who).copied().unwrap_or_default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// The ledger agrees with the model after every operation, failed
    /// operations change nothing, and timestamps never decrease.
    #[test]
    fn prop_ledger_matches_reference_model(ops in prop::collection::vec(arb_ledger_op(), 1..60)) {
        let (mut ledger, clock) = test_ledger(T0);
        let mut model = Model::new();

        for op in ops {
            match op {
                LedgerOp::Tick(secs) => clock.advance(secs),
                LedgerOp::Assign { caller, target, role } => {
                    let result = ledger.assign_role(&caller, target, role);
                    if caller == admin() {
                        let committed = result.unwrap();
                        prop_assert_eq!(
                            committed.events,
                            vec![LedgerEvent::RoleAssigned { identity: target, role }]
                        );
                        model.roles.insert(target, role);
                    } else {
                        let is_unauthorized_role_change = matches!(
                            result,
                            Err(WaypointError::UnauthorizedRoleChange { .. })
                        );
                        prop_assert!(is_unauthorized_role_change);
                    }
                }
                LedgerOp::Append { caller, shipment_id, fields: (location, status, hash) } => {
                    let before = ledger.last_commit();
                    let result = ledger.add_checkpoint(&caller, shipment_id.clone(), location, status.clone(), hash);
                    if model.role(&caller).is_authorized() {
                        let committed = result.unwrap();
                        prop_assert_eq!(committed.events.len(), 1);
                        prop_assert!(committed.value.timestamp() >= before);
                        prop_assert_eq!(committed.value.submitted_by(), caller);
                        model.histories.entry(shipment_id).or_default().push((caller, status));
                    } else {
                        prop_assert!(result.is_err());
                        prop_assert_eq!(ledger.last_commit(), before);
                    }
                }
            }

            for who in (1u8..8).map(waypoint_testkit::principal).chain([admin()]) {
                prop_assert_eq!(ledger.get_role(&who), model.role(&who));
            }
            for (shipment_id, expected) in &model.histories {
                let history = ledger.get_shipment_history(shipment_id);
                let actual: Vec<_> = history
                    .iter()
                    .map(|cp| (cp.submitted_by(), cp.status().to_owned()))
                    .collect();
                prop_assert_eq!(&actual, expected);
                prop_assert!(history.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()));
                prop_assert!(history.iter().all(|cp| cp.shipment_id() == shipment_id.as_str()));
            }
            prop_assert_eq!(ledger.shipment_ids(), model.histories.keys().cloned().collect::<Vec<_>>());
        }
    }

    /// A shipment's earlier entries are untouched by later appends anywhere.
    #[test]
    fn prop_history_prefix_is_stable(
        first in prop::collection::vec((arb_shipment_id(), arb_checkpoint_fields()), 1..10),
        later in prop::collection::vec((arb_shipment_id(), arb_checkpoint_fields()), 1..10),
    ) {
        let (mut ledger, clock) = test_ledger(T0);
        for (shipment_id, (location, status, hash)) in first {
            ledger.add_checkpoint(&admin(), shipment_id, location, status, hash).unwrap();
            clock.advance(1);
        }
        let before: BTreeMap<String, _> = ledger
            .shipment_ids()
            .into_iter()
            .map(|id| {
                let history = ledger.get_shipment_history(&id).clone();
                (id, history)
            })
            .collect();

        for (shipment_id, (location, status, hash)) in later {
            ledger.add_checkpoint(&admin(), shipment_id, location, status, hash).unwrap();
        }

        for (shipment_id, earlier) in &before {
            let now = ledger.get_shipment_history(shipment_id);
            prop_assert!(now.len() >= earlier.len());
            prop_assert_eq!(&now[..earlier.len()], earlier.as_slice());
        }
    }

    /// Identities that never held a role are always refused.
    #[test]
    fn prop_unassigned_identity_is_refused(
        seed in 8u8..100,
        shipment_id in arb_shipment_id(),
        (location, status, hash) in arb_checkpoint_fields(),
    ) {
        let (mut ledger, _) = test_ledger(T0);
        let stranger = waypoint_testkit::principal(seed);
        let result = ledger.add_checkpoint(&stranger, shipment_id.clone(), location, status, hash);
        assert_unauthorized_append!(result, stranger);
        prop_assert_eq!(ledger.get_checkpoint_count(&shipment_id), 0);
    }

    /// Any authorized role may append, and the count grows by exactly one.
    #[test]
    fn prop_authorized_roles_append(
        target in arb_principal(),
        role in arb_authorized_role(),
        shipment_id in arb_shipment_id(),
    ) {
        let (mut ledger, _) = test_ledger(T0);
        ledger.assign_role(&admin(), target, role).unwrap();
        let before = ledger.get_checkpoint_count(&shipment_id);
        ledger.add_checkpoint(&target, shipment_id.clone(), "Dock", "in-transit", "").unwrap();
        prop_assert_eq!(ledger.get_checkpoint_count(&shipment_id), before + 1);
    }

    /// Commit timestamps never decrease even when the clock jumps around.
    #[test]
    fn prop_timestamps_survive_clock_jumps(readings in prop::collection::vec(0u64..2 * T0, 1..30)) {
        let clock = ManualClock::new(T0);
        let mut ledger = waypoint_journal::CheckpointLedger::with_clock(admin(), clock.clone());
        let mut previous = PhysicalTime::EPOCH;
        for (i, reading) in readings.into_iter().enumerate() {
            clock.set(reading);
            let shipment = if i % 2 == 0 { "SHIP-1" } else { "SHIP-2" };
            let stamped = ledger
                .add_checkpoint(&admin(), shipment, "Dock", "in-transit", "")
                .unwrap()
                .value
                .timestamp();
            prop_assert!(stamped >= previous);
            prop_assert_eq!(stamped, PhysicalTime(reading).max(previous));
            previous = stamped;
        }
    }
}
