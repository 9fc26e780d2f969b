//! Authorization seam consulted by the ledger

use waypoint_core::Principal;

/// Answers the ledger's two authorization questions
///
/// Implementations must be pure reads: the ledger calls them inside its
/// mutation path and relies on them not changing state.
pub trait Authorizer: Send + Sync {
    /// Whether `identity` may append checkpoints
    fn can_append(&self, identity: &Principal) -> bool;

    /// Whether `identity` may change role assignments
    fn can_assign_role(&self, identity: &Principal) -> bool;
}

impl<A: Authorizer + ?Sized> Authorizer for &A {
    fn can_append(&self, identity: &Principal) -> bool {
        (**self).can_append(identity)
    }

    fn can_assign_role(&self, identity: &Principal) -> bool {
        (**self).can_assign_role(identity)
    }
}

impl<A: Authorizer + ?Sized> Authorizer for Box<A> {
    fn can_append(&self, identity: &Principal) -> bool {
        (**self).can_append(identity)
    }

    fn can_assign_role(&self, identity: &Principal) -> bool {
        (**self).can_assign_role(identity)
    }
}
