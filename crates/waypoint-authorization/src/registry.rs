//! Role registry
//!
//! Authoritative table of who holds which role. Every identity implicitly
//! holds [`Role::None`] until an administrator assigns something else; only
//! non-`None` assignments are stored, so revocation removes the entry.

use crate::{AdminPolicy, Authorizer, SingleAdmin};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};
use waypoint_core::{LedgerEvent, Principal, Result, Role, WaypointError};

/// Mapping from identity to role, administered under an [`AdminPolicy`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry<P = SingleAdmin> {
    policy: P,
    roles: BTreeMap<Principal, Role>,
}

impl RoleRegistry<SingleAdmin> {
    /// Registry administered by a single identity
    pub fn new(administrator: Principal) -> Self {
        Self::initialize(SingleAdmin::new(administrator))
    }
}

impl<P: AdminPolicy> RoleRegistry<P> {
    /// Build the registry and grant every administrator [`Role::Inspector`]
    ///
    /// The bootstrap grant lets administrators append without a separate
    /// self-assignment.
    pub fn initialize(policy: P) -> Self {
        let roles = policy
            .administrators()
            .into_iter()
            .map(|admin| (admin, Role::Inspector))
            .collect();
        Self { policy, roles }
    }

    /// Overwrite `target`'s role
    ///
    /// Fails with [`WaypointError::UnauthorizedRoleChange`] unless `caller` is an
    /// administrator; a failed call changes nothing. Any role is accepted,
    /// including [`Role::None`] and a change to an administrator's own role.
    pub fn assign_role(
        &mut self,
        caller: &Principal,
        target: Principal,
        role: Role,
    ) -> Result<LedgerEvent> {
        if !self.can_assign_role(caller) {
            warn!(caller = %caller, target = %target, role = %role, "rejected role change");
            return Err(WaypointError::unauthorized_role_change(*caller));
        }

        let previous = if role.is_authorized() {
            self.roles.insert(target, role)
        } else {
            self.roles.remove(&target)
        };

        info!(
            caller = %caller,
            target = %target,
            previous = %previous.unwrap_or_default(),
            role = %role,
            "role assigned"
        );

        Ok(LedgerEvent::RoleAssigned {
            identity: target,
            role,
        })
    }

    /// Current role of `identity`; [`Role::None`] if never assigned
    pub fn get_role(&self, identity: &Principal) -> Role {
        self.roles.get(identity).copied().unwrap_or_default()
    }

    /// Identities the policy recognizes as administrators
    pub fn administrators(&self) -> Vec<Principal> {
        self.policy.administrators()
    }

    /// Explicit assignments in identity order; identities at `None` are omitted
    pub fn assignments(&self) -> impl Iterator<Item = (Principal, Role)> + '_ {
        self.roles.iter().map(|(who, role)| (*who, *role))
    }

    /// Identities currently holding `role`, in identity order
    ///
    /// Always empty for [`Role::None`], which is held implicitly by everyone.
    pub fn holders_of(&self, role: Role) -> Vec<Principal> {
        self.roles
            .iter()
            .filter(|(_, held)| **held == role)
            .map(|(who, _)| *who)
            .collect()
    }

    /// The administrator policy
    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<P: AdminPolicy> Authorizer for RoleRegistry<P> {
    fn can_append(&self, identity: &Principal) -> bool {
        self.get_role(identity).is_authorized()
    }

    fn can_assign_role(&self, identity: &Principal) -> bool {
        self.policy.is_admin(identity)
    }
}
