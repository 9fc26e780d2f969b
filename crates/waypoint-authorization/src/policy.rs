//! Administrator policies
//!
//! A policy decides who may change role assignments. Administrators are fixed
//! when the policy is built; there is no ownership transfer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use waypoint_core::{Principal, Result, WaypointError};

/// Decides which identities administer the role table
pub trait AdminPolicy: Send + Sync {
    /// Whether `identity` is an administrator
    fn is_admin(&self, identity: &Principal) -> bool;

    /// Every administrator, in identity order
    fn administrators(&self) -> Vec<Principal>;
}

/// Exactly one administrator, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleAdmin {
    administrator: Principal,
}

impl SingleAdmin {
    /// Create a policy administered by `administrator`
    pub fn new(administrator: Principal) -> Self {
        Self { administrator }
    }

    /// The administrator identity
    pub fn administrator(&self) -> Principal {
        self.administrator
    }
}

impl AdminPolicy for SingleAdmin {
    fn is_admin(&self, identity: &Principal) -> bool {
        *identity == self.administrator
    }

    fn administrators(&self) -> Vec<Principal> {
        vec![self.administrator]
    }
}

/// A fixed, non-empty set of administrators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSet {
    administrators: BTreeSet<Principal>,
}

impl AdminSet {
    /// Create a policy from a non-empty collection of administrators
    pub fn new(administrators: impl IntoIterator<Item = Principal>) -> Result<Self> {
        let administrators: BTreeSet<_> = administrators.into_iter().collect();
        if administrators.is_empty() {
            return Err(WaypointError::invalid(
                "admin set requires at least one administrator",
            ));
        }
        Ok(Self { administrators })
    }
}

impl AdminPolicy for AdminSet {
    fn is_admin(&self, identity: &Principal) -> bool {
        self.administrators.contains(identity)
    }

    fn administrators(&self) -> Vec<Principal> {
        self.administrators.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn p(seed: u8) -> Principal {
        Principal::from_bytes([seed; 20])
    }

    #[test]
    fn test_single_admin() {
        let policy = SingleAdmin::new(p(1));
        assert!(policy.is_admin(&p(1)));
        assert!(!policy.is_admin(&p(2)));
        assert_eq!(policy.administrators(), vec![p(1)]);
    }

    #[test]
    fn test_admin_set_rejects_empty() {
        assert_matches!(AdminSet::new(Vec::new()), Err(WaypointError::Invalid { .. }));

        let policy = AdminSet::new([p(3), p(1), p(3)]).unwrap();
        assert_eq!(policy.administrators(), vec![p(1), p(3)]);
        assert!(policy.is_admin(&p(3)));
        assert!(!policy.is_admin(&p(2)));
    }
}
