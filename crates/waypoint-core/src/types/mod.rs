//! Identity and role types

pub mod identifiers;
pub mod role;
