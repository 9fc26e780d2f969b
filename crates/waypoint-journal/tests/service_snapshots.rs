//! Snapshot persistence and configuration-driven service startup

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_matches::assert_matches;
use tempfile::TempDir;
use waypoint_core::{LedgerConfig, PhysicalTime, Role, WaypointConfig, WaypointError};
use waypoint_journal::{CheckpointLedger, LedgerService, LedgerSnapshot};
use waypoint_testkit::{
    admin, assert_unauthorized_append, courier, manufacturer, principal, staffed_ledger,
    ManualClock,
};

const T0: u64 = 1_700_000_000;

fn config_in(dir: &TempDir, administrator: waypoint_core::Principal) -> LedgerConfig {
    let mut config = LedgerConfig::with_administrator(administrator);
    config.snapshot_path = Some(dir.path().join("ledger.json"));
    config.event_log_capacity = Some(8);
    config
}

#[test]
fn test_snapshot_file_round_trip_preserves_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");
    let (mut ledger, clock) = staffed_ledger(T0);

    ledger
        .add_checkpoint(&manufacturer(), "SHIP-1", "Factory", "created", "QmInvoice")
        .unwrap();
    clock.advance(600);
    ledger
        .add_checkpoint(&courier(), "SHIP-1", "Hub", "in-transit", "")
        .unwrap();
    ledger.assign_role(&admin(), courier(), Role::None).unwrap();

    ledger.snapshot().save_to_file(&path).unwrap();
    let loaded: LedgerSnapshot = LedgerSnapshot::load_from_file(&path).unwrap();
    let mut restored = CheckpointLedger::restore(loaded, ManualClock::new(T0)).unwrap();

    assert_eq!(
        restored.get_shipment_history("SHIP-1"),
        ledger.get_shipment_history("SHIP-1")
    );
    assert_eq!(restored.registry(), ledger.registry());
    assert_eq!(restored.get_role(&courier()), Role::None);
    assert_eq!(restored.last_commit(), PhysicalTime(T0 + 600));

    let result = restored.add_checkpoint(&courier(), "SHIP-1", "Port", "customs", "");
    assert_unauthorized_append!(result, courier());

    // Restored clock starts behind the last commit; stamps are clamped.
    let next = restored
        .add_checkpoint(&manufacturer(), "SHIP-1", "Port", "customs", "")
        .unwrap()
        .value;
    assert_eq!(next.timestamp(), PhysicalTime(T0 + 600));
}

#[test]
fn test_corrupt_snapshot_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result: Result<LedgerSnapshot, _> = LedgerSnapshot::load_from_file(&path);
    assert_matches!(result, Err(WaypointError::Serialization { .. }));

    let missing: Result<LedgerSnapshot, _> =
        LedgerSnapshot::load_from_file(&dir.path().join("absent.json"));
    assert_matches!(missing, Err(WaypointError::Storage { .. }));
}

#[test]
fn test_service_starts_empty_and_persists() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, admin());

    let service = LedgerService::from_config_with_clock(config.clone(), ManualClock::new(T0)).unwrap();
    assert_eq!(service.ledger.get_role(&admin()), Role::Inspector);
    assert!(service.ledger.shipment_ids().is_empty());

    service
        .ledger
        .assign_role(&admin(), principal(3), Role::Courier)
        .unwrap();
    service
        .ledger
        .add_checkpoint(&principal(3), "SHIP-1", "Hub", "in-transit", "")
        .unwrap();
    assert_eq!(service.event_log.len(), 2);
    assert_eq!(service.event_log.capacity(), 8);

    assert!(service.persist().unwrap());
    assert!(config.snapshot_path.as_ref().unwrap().exists());

    let reopened = LedgerService::from_config_with_clock(config, ManualClock::new(T0)).unwrap();
    assert_eq!(reopened.ledger.get_role(&principal(3)), Role::Courier);
    assert_eq!(reopened.ledger.get_checkpoint_count("SHIP-1"), 1);
    assert!(reopened.event_log.is_empty());
}

#[test]
fn test_service_rejects_snapshot_of_another_administrator() {
    let dir = TempDir::new().unwrap();
    let first = LedgerService::from_config_with_clock(config_in(&dir, admin()), ManualClock::new(T0))
        .unwrap();
    assert!(first.persist().unwrap());

    let result = LedgerService::from_config_with_clock(config_in(&dir, principal(4)), ManualClock::new(T0));
    assert_matches!(result, Err(WaypointError::Invalid { .. }));
}

#[test]
fn test_service_requires_administrator() {
    let result = LedgerService::from_config(LedgerConfig::default());
    assert_matches!(result, Err(WaypointError::Invalid { .. }));
}

#[test]
fn test_service_without_snapshot_path_does_not_persist() {
    let config = LedgerConfig::with_administrator(admin());
    let service = LedgerService::from_config(config).unwrap();
    assert!(!service.persist().unwrap());
    assert!(service.config().snapshot_path.is_none());
}

#[test]
fn test_service_config_from_toml() {
    let dir = TempDir::new().unwrap();
    let toml = format!(
        "administrator = \"{}\"\nevent_log_capacity = 4\nsnapshot_path = {:?}\n",
        admin(),
        dir.path().join("ledger.json")
    );
    let config = LedgerConfig::from_toml_str(&toml).unwrap();
    let service = LedgerService::from_config_with_clock(config, ManualClock::new(T0)).unwrap();
    assert_eq!(service.event_log.capacity(), 4);
    assert_eq!(service.config().administrator, Some(admin()));
}

#[test]
fn test_concurrent_persists_all_succeed() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, admin());
    let service = LedgerService::from_config_with_clock(config.clone(), ManualClock::new(T0)).unwrap();
    for i in 0..200 {
        service
            .ledger
            .add_checkpoint(&admin(), format!("SHIP-{}", i % 10), "Dock", "in-transit", "")
            .unwrap();
    }

    for _ in 0..20 {
        std::thread::scope(|scope| {
            let writers: Vec<_> = (0..4)
                .map(|_| {
                    let service = service.clone();
                    scope.spawn(move || service.persist())
                })
                .collect();
            for writer in writers {
                assert_matches!(writer.join().unwrap(), Ok(true));
            }
        });
    }

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("ledger.json")]);

    let reopened = LedgerService::from_config_with_clock(config, ManualClock::new(T0)).unwrap();
    assert_eq!(reopened.ledger.get_checkpoint_count("SHIP-3"), 20);
    assert_eq!(reopened.ledger.shipment_ids().len(), 10);
}
