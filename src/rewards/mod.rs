//! Reward input, unit-role identities, and combination-reward translation.
//!
//! Configuration runs these in order: validate raw rewards, assign ids by
//! potential (`IdentityTable`), then expand synergies and counters into id
//! tuples (`TranslatedRewards`). Both outputs are only meaningful together.

pub mod raw;
pub mod identity;
pub mod translate;

pub use raw::{fixed_point, RawCounterReward, RawRoleReward, RawSynergyReward, RewardEntry, MAX_REWARD_VALUE};
pub use identity::{IdentityTable, UnitIndex, UnitRole, UnitRoleId};
pub use translate::{IdTuple, TranslatedCounter, TranslatedRewards, TranslatedSynergy};
