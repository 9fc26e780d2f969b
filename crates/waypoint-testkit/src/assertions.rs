//! Assertion helpers for authorization failures

/// Assert that a result is an unauthorized append by `$caller`
#[macro_export]
macro_rules! assert_unauthorized_append {
    ($result:expr, $caller:expr) => {
        match $result {
            Err($crate::WaypointError::UnauthorizedAppend { caller }) => assert_eq!(
                caller, $caller,
                "unauthorized append reported for the wrong caller"
            ),
            other => panic!("expected unauthorized append, got {:?}", other),
        }
    };
}

/// Assert that a result is an unauthorized role change by `$caller`
#[macro_export]
macro_rules! assert_unauthorized_role_change {
    ($result:expr, $caller:expr) => {
        match $result {
            Err($crate::WaypointError::UnauthorizedRoleChange { caller }) => assert_eq!(
                caller, $caller,
                "unauthorized role change reported for the wrong caller"
            ),
            other => panic!("expected unauthorized role change, got {:?}", other),
        }
    };
}

/// Assert the checkpoint count of a shipment on any ledger exposing `get_checkpoint_count`
#[macro_export]
macro_rules! assert_checkpoint_count {
    ($ledger:expr, $shipment:expr, $expected:expr) => {
        assert_eq!(
            $ledger.get_checkpoint_count($shipment),
            $expected,
            "Expected {} checkpoints for shipment {:?}",
            $expected,
            $shipment
        )
    };
}
