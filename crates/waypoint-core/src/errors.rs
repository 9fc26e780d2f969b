//! Unified error system for Waypoint
//!
//! A single error type shared by every crate in the workspace. The two
//! authorization failures are the only errors the ledger core itself raises;
//! the remaining variants cover parsing, configuration and snapshot I/O.

use crate::Principal;
use serde::{Deserialize, Serialize};

/// Which authorization precondition was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnauthorizedKind {
    /// A non-administrator attempted to change a role assignment
    RoleChange,
    /// A caller holding no role attempted to append a checkpoint
    Append,
}

/// Unified error type for all Waypoint operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WaypointError {
    /// Role change attempted by a caller that is not an administrator
    #[error("Unauthorized role change: {caller} is not an administrator")]
    UnauthorizedRoleChange {
        /// Identity that attempted the change
        caller: Principal,
    },

    /// Checkpoint append attempted by a caller without a role
    #[error("Unauthorized append: {caller} holds no role")]
    UnauthorizedAppend {
        /// Identity that attempted the append
        caller: Principal,
    },

    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Storage operation failed
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },
}

impl WaypointError {
    /// Create an unauthorized role change error
    pub fn unauthorized_role_change(caller: Principal) -> Self {
        Self::UnauthorizedRoleChange { caller }
    }

    /// Create an unauthorized append error
    pub fn unauthorized_append(caller: Principal) -> Self {
        Self::UnauthorizedAppend { caller }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// The violated authorization precondition, if this is an authorization failure
    pub fn unauthorized_kind(&self) -> Option<UnauthorizedKind> {
        match self {
            Self::UnauthorizedRoleChange { .. } => Some(UnauthorizedKind::RoleChange),
            Self::UnauthorizedAppend { .. } => Some(UnauthorizedKind::Append),
            _ => None,
        }
    }

    /// Whether this error is one of the two authorization failures
    pub fn is_unauthorized(&self) -> bool {
        self.unauthorized_kind().is_some()
    }
}

/// Standard Result type for Waypoint operations
pub type Result<T> = std::result::Result<T, WaypointError>;

impl From<std::io::Error> for WaypointError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err.to_string())
    }
}

impl From<serde_json::Error> for WaypointError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for WaypointError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
