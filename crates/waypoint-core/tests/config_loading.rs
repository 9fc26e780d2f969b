//! Configuration loading from disk and layering with environment pairs

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_matches::assert_matches;
use std::io::Write;
use waypoint_core::{LedgerConfig, Principal, WaypointConfig, WaypointError};

const ADMIN: &str = "0xa0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0";

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_file_then_env_layering() {
    let file = write_config(&format!(
        "administrator = \"{ADMIN}\"\nevent_log_capacity = 32\nsnapshot_path = \"/tmp/ledger.json\"\n"
    ));

    let mut config = LedgerConfig::load_from_file(file.path()).unwrap();
    config
        .merge_from_pairs([
            ("WAYPOINT_EVENT_LOG_CAPACITY", "48"),
            ("WAYPOINT_TRACE_LEVEL", "debug"),
        ])
        .unwrap();
    config.validate().unwrap();

    assert_eq!(config.event_log_capacity(), 48);
    assert_eq!(
        config.require_administrator().unwrap(),
        ADMIN.parse::<Principal>().unwrap()
    );
    assert_eq!(
        config.snapshot_path.as_deref(),
        Some(std::path::Path::new("/tmp/ledger.json"))
    );
}

#[test]
fn test_missing_file_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = LedgerConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert_matches!(err, WaypointError::Storage { .. });
}

#[test]
fn test_malformed_administrator_is_rejected() {
    let file = write_config("administrator = \"0x1234\"\n");
    let err = LedgerConfig::load_from_file(file.path()).unwrap_err();
    assert_matches!(err, WaypointError::Serialization { .. });
}
