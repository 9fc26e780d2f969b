//! Role-based authorization for the Waypoint ledger
//!
//! The ledger asks exactly two questions before mutating state: may this
//! identity append, and may this identity change roles. Those questions are the
//! [`Authorizer`] trait. [`RoleRegistry`] answers them from a role table plus an
//! [`AdminPolicy`]; the default policy is a single administrator fixed at
//! construction ([`SingleAdmin`]).

#![forbid(unsafe_code)]

pub mod authorizer;
pub mod policy;
pub mod registry;

pub use authorizer::Authorizer;
pub use policy::{AdminPolicy, AdminSet, SingleAdmin};
pub use registry::RoleRegistry;
