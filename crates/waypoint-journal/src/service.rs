//! Ledger service assembled from configuration

use crate::dispatch::{BroadcastSubscriber, EventLog};
use crate::ledger::CheckpointLedger;
use crate::shared::SharedLedger;
use crate::snapshot::LedgerSnapshot;
use std::sync::Arc;
use tracing::info;
use waypoint_authorization::SingleAdmin;
use waypoint_core::{
    LedgerConfig, PhysicalClock, Result, SystemClock, WaypointConfig, WaypointError,
};

/// A shared ledger with its standard subscribers attached
#[derive(Debug, Clone)]
pub struct LedgerService<C = SystemClock> {
    /// The ledger handle
    pub ledger: SharedLedger<SingleAdmin, C>,
    /// Recent-events log sized by `event_log_capacity`
    pub event_log: Arc<EventLog>,
    /// Broadcast fan-out sized by `broadcast_capacity`
    pub broadcast: Arc<BroadcastSubscriber>,
    config: LedgerConfig,
}

impl LedgerService {
    /// Build a service stamped with the system clock
    pub fn from_config(config: LedgerConfig) -> Result<Self> {
        Self::from_config_with_clock(config, SystemClock)
    }
}

impl<C: PhysicalClock> LedgerService<C> {
    /// Build a service with an injected clock
    ///
    /// When `snapshot_path` names an existing file the ledger is restored from
    /// it; its administrator must match the configured one.
    pub fn from_config_with_clock(config: LedgerConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let administrator = config.require_administrator()?;

        let ledger = match config.snapshot_path.as_deref().filter(|path| path.exists()) {
            Some(path) => {
                let snapshot: LedgerSnapshot = LedgerSnapshot::load_from_file(path)?;
                let restored_admin = snapshot.registry.policy().administrator();
                if restored_admin != administrator {
                    return Err(WaypointError::invalid(format!(
                        "snapshot administrator {restored_admin} does not match configured {administrator}"
                    )));
                }
                CheckpointLedger::restore(snapshot, clock)?
            }
            None => CheckpointLedger::with_clock(administrator, clock),
        };

        let ledger = SharedLedger::new(ledger);
        let event_log = Arc::new(EventLog::new(config.event_log_capacity()));
        let broadcast = Arc::new(BroadcastSubscriber::new(config.broadcast_capacity()));
        ledger.subscribe(event_log.clone());
        ledger.subscribe(broadcast.clone());

        info!(
            administrator = %administrator,
            shipments = ledger.shipment_ids().len(),
            "ledger service started"
        );

        Ok(Self {
            ledger,
            event_log,
            broadcast,
            config,
        })
    }

    /// The configuration the service was built from
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Write a snapshot to the configured `snapshot_path`
    ///
    /// Returns `false` without writing when no path is configured.
    pub fn persist(&self) -> Result<bool> {
        match &self.config.snapshot_path {
            Some(path) => {
                self.ledger.snapshot().save_to_file(path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
