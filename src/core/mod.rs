//! Core solver types: roles, teams, configuration, errors.
//!
//! These are shared by every subsystem and carry no draft semantics of
//! their own.

pub mod role;
pub mod team;
pub mod config;
pub mod error;

pub use role::{Role, RoleSet, ROLE_COUNT};
pub use team::{Team, TeamPair};
pub use config::SolverConfig;
pub use error::{CapacityError, DraftError, ValidationError};
