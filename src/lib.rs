//! # draft-solver
//!
//! Exact minimax recommendations for two-team pick/ban drafts.
//!
//! ## Design Principles
//!
//! 1. **Exact, not approximate**: every query searches the remaining draft
//!    exhaustively. Alpha-beta pruning and a transposition table make that
//!    affordable; nothing is estimated.
//!
//! 2. **Validate once**: rewards, formats and histories are checked while
//!    configuring or at the start of a query. The search recursion cannot
//!    fail.
//!
//! 3. **One configuration, one engine**: identities, translated rewards,
//!    Zobrist keys and the transposition table are built and replaced as a
//!    unit inside a `DraftEngine`. There is no global state.
//!
//! ## Architecture
//!
//! - **Unit-role ids**: each (unit, playable role) gets a dense id, ordered by
//!   potential so that searching ids in ascending order tries the most
//!   promising selections first.
//!
//! - **Flexible units**: a unit with several roles multiplies the legal team
//!   compositions. Histories are expanded into every candidate team and the
//!   search runs once per (A, B) combination.
//!
//! - **Values**: fixed-point `i32`, two decimals scaled by 100, always from
//!   team A's point of view.
//!
//! ## Modules
//!
//! - `core`: roles, teams, configuration, errors
//! - `rewards`: raw reward input, identity table, combination translation
//! - `draft`: format compiler, role availability, history expansion
//! - `search`: Zobrist keys, transposition table, minimax, `DraftEngine`

pub mod core;
pub mod rewards;
pub mod draft;
pub mod search;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    CapacityError, DraftError, Role, RoleSet, SolverConfig, Team, TeamPair, ValidationError, ROLE_COUNT,
};

pub use crate::rewards::{
    fixed_point, IdentityTable, RawCounterReward, RawRoleReward, RawSynergyReward, RewardEntry,
    TranslatedRewards, UnitRoleId,
};

pub use crate::draft::{DraftFormat, RoleAvailability, Selection, StageKind};

pub use crate::search::{
    DraftEngine, RoleResolution, SearchOutcome, SearchStats, TranspositionTable, ZobristKeys,
};
