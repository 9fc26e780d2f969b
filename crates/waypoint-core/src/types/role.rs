//! Capability roles

use crate::{Result, WaypointError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability label held by a principal
///
/// Any role other than [`Role::None`] grants append authorization. Numeric
/// codes are stable and match the order of the variants.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Role {
    /// Absence of authorization
    #[default]
    None,
    /// Produces goods and opens shipments
    Manufacturer,
    /// Moves shipments between locations
    Courier,
    /// Audits shipments; granted to the administrator at construction
    Inspector,
}

impl Role {
    /// All roles in code order
    pub const ALL: [Role; 4] = [Role::None, Role::Manufacturer, Role::Courier, Role::Inspector];

    /// Stable numeric code
    pub fn code(self) -> u8 {
        match self {
            Role::None => 0,
            Role::Manufacturer => 1,
            Role::Courier => 2,
            Role::Inspector => 3,
        }
    }

    /// Look up a role by numeric code
    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| WaypointError::invalid(format!("unknown role code {code}")))
    }

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            Role::None => "None",
            Role::Manufacturer => "Manufacturer",
            Role::Courier => "Courier",
            Role::Inspector => "Inspector",
        }
    }

    /// Whether this role carries any authorization
    pub fn is_authorized(self) -> bool {
        self != Role::None
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = WaypointError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| WaypointError::invalid(format!("unknown role '{name}'")))
    }
}

impl TryFrom<u8> for Role {
    type Error = WaypointError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        role.code()
    }
}
