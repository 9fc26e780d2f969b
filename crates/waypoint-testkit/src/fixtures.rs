//! Well-known principals and ledger builders

use crate::time::ManualClock;
use waypoint_authorization::RoleRegistry;
use waypoint_core::{Principal, Role, PRINCIPAL_LENGTH};
use waypoint_journal::{CheckpointLedger, SharedLedger};

/// Ledger type used throughout the tests
pub type TestLedger = CheckpointLedger<RoleRegistry, ManualClock>;

/// Deterministic principal whose every byte is `seed`
pub fn principal(seed: u8) -> Principal {
    Principal::from_bytes([seed; PRINCIPAL_LENGTH])
}

/// Administrator of every test ledger
pub fn admin() -> Principal {
    principal(0xA0)
}

/// Conventional manufacturer identity
pub fn manufacturer() -> Principal {
    principal(0xB1)
}

/// Conventional courier identity
pub fn courier() -> Principal {
    principal(0xC2)
}

/// Conventional inspector identity (distinct from the administrator)
pub fn inspector() -> Principal {
    principal(0xD3)
}

/// Identity that is never assigned a role
pub fn outsider() -> Principal {
    principal(0xEE)
}

/// Empty ledger administered by [`admin`], clock starting at `start_secs`
///
/// Returns a clock handle sharing time with the ledger's clock.
pub fn test_ledger(start_secs: u64) -> (TestLedger, ManualClock) {
    let clock = ManualClock::new(start_secs);
    (CheckpointLedger::with_clock(admin(), clock.clone()), clock)
}

/// Ledger with manufacturer, courier and inspector already assigned
pub fn staffed_ledger(start_secs: u64) -> (TestLedger, ManualClock) {
    let (mut ledger, clock) = test_ledger(start_secs);
    for (who, role) in [
        (manufacturer(), Role::Manufacturer),
        (courier(), Role::Courier),
        (inspector(), Role::Inspector),
    ] {
        ledger
            .assign_role(&admin(), who, role)
            .expect("administrator can always assign roles");
    }
    (ledger, clock)
}

/// Shared handle around [`staffed_ledger`]
pub fn staffed_shared_ledger(
    start_secs: u64,
) -> (SharedLedger<waypoint_authorization::SingleAdmin, ManualClock>, ManualClock) {
    let (ledger, clock) = staffed_ledger(start_secs);
    (SharedLedger::new(ledger), clock)
}
