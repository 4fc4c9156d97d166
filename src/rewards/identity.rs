//! Dense identities for (unit, role) combinations.
//!
//! Every role reward becomes one `UnitRoleId`. Ids are handed out in
//! descending order of *potential*: the unit's own value in that role plus
//! every synergy and counter reward that could involve it. The search walks
//! actions in ascending id order, so the most promising selections are tried
//! first and alpha-beta cuts early.
//!
//! Picking or banning any role variant of a unit removes every variant, so the
//! table also groups ids by real unit (`UnitIndex`).

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CapacityError, DraftError, Role, RoleSet, ValidationError, ROLE_COUNT};

use super::raw::{RawCounterReward, RawRoleReward, RawSynergyReward};

/// Dense index of one (unit, role) combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitRoleId(pub u32);

impl UnitRoleId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index as a `usize`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for UnitRoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnitRole({})", self.0)
    }
}

/// Dense index of a real unit, shared by all its role variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitIndex(pub u32);

impl UnitIndex {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Static data for one (unit, role) id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRole {
    pub name: String,
    pub role: Role,
    pub unit: UnitIndex,
    pub value_a: i32,
    pub value_b: i32,
    /// Ordering heuristic only; never part of a game value.
    pub potential: i64,
}

/// All identities of one configuration plus the derived indexes.
#[derive(Clone, Debug, Default)]
pub struct IdentityTable {
    entries: Vec<UnitRole>,
    unit_names: Vec<String>,
    unit_lookup: FxHashMap<String, UnitIndex>,
    /// Ids of each unit, ascending.
    unit_ids: Vec<SmallVec<[UnitRoleId; ROLE_COUNT]>>,
    unit_roles: Vec<RoleSet>,
    ids_per_role: [Vec<UnitRoleId>; ROLE_COUNT],
}

impl IdentityTable {
    /// Assign ids to every role reward.
    ///
    /// Ties in potential keep the input order.
    pub fn build(
        role_rewards: &[RawRoleReward],
        synergies: &[RawSynergyReward],
        counters: &[RawCounterReward],
        max_unit_roles: usize,
    ) -> Result<Self, DraftError> {
        CapacityError::check("unit-role identity", max_unit_roles, role_rewards.len())?;

        let mut seen: FxHashSet<(&str, Role)> = FxHashSet::default();
        let mut roles = Vec::with_capacity(role_rewards.len());
        for reward in role_rewards {
            let role = reward.validate()?;
            if !seen.insert((reward.unit.as_str(), role)) {
                return Err(ValidationError::DuplicateRoleReward {
                    unit: reward.unit.clone(),
                    role: reward.role,
                }
                .into());
            }
            roles.push(role);
        }

        let potentials: Vec<i64> = role_rewards
            .iter()
            .zip(&roles)
            .map(|(reward, &role)| potential(reward, role, synergies, counters))
            .collect();

        let mut order: Vec<usize> = (0..role_rewards.len()).collect();
        // `sort_by` is stable, which keeps equal potentials in input order.
        order.sort_by(|&a, &b| potentials[b].cmp(&potentials[a]));

        let mut table = Self::default();
        for (id, &input) in order.iter().enumerate() {
            let reward = &role_rewards[input];
            let role = roles[input];
            let unit = table.intern_unit(&reward.unit);
            let id = UnitRoleId::new(id as u32);

            table.unit_ids[unit.index()].push(id);
            table.unit_roles[unit.index()] = table.unit_roles[unit.index()].with(role);
            table.ids_per_role[role.index()].push(id);
            table.entries.push(UnitRole {
                name: reward.unit.clone(),
                role,
                unit,
                value_a: reward.value_a,
                value_b: reward.value_b,
                potential: potentials[input],
            });
        }

        Ok(table)
    }

    fn intern_unit(&mut self, name: &str) -> UnitIndex {
        if let Some(&unit) = self.unit_lookup.get(name) {
            return unit;
        }
        let unit = UnitIndex(self.unit_names.len() as u32);
        self.unit_names.push(name.to_owned());
        self.unit_lookup.insert(name.to_owned(), unit);
        self.unit_ids.push(SmallVec::new());
        self.unit_roles.push(RoleSet::EMPTY);
        unit
    }

    /// Number of (unit, role) ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.unit_names.len()
    }

    /// Get the data for an id.
    #[inline]
    #[must_use]
    pub fn get(&self, id: UnitRoleId) -> &UnitRole {
        &self.entries[id.index()]
    }

    /// Iterate over all ids in ascending order (descending potential).
    pub fn iter(&self) -> impl Iterator<Item = (UnitRoleId, &UnitRole)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (UnitRoleId::new(i as u32), e))
    }

    /// Find the id for a unit in a role.
    #[must_use]
    pub fn lookup(&self, name: &str, role: Role) -> Option<UnitRoleId> {
        let unit = self.unit(name)?;
        self.unit_ids[unit.index()]
            .iter()
            .copied()
            .find(|&id| self.entries[id.index()].role == role)
    }

    /// Find the id for a unit in a role, failing with a validation error.
    pub fn require(&self, name: &str, role: Role) -> Result<UnitRoleId, ValidationError> {
        self.lookup(name, role)
            .ok_or_else(|| ValidationError::UnknownUnitRole {
                unit: name.to_owned(),
                role: role.index() as u8,
            })
    }

    /// Find a unit by name.
    #[must_use]
    pub fn unit(&self, name: &str) -> Option<UnitIndex> {
        self.unit_lookup.get(name).copied()
    }

    /// Find a unit by name, failing with a validation error.
    pub fn require_unit(&self, name: &str) -> Result<UnitIndex, ValidationError> {
        self.unit(name)
            .ok_or_else(|| ValidationError::UnknownUnit(name.to_owned()))
    }

    #[must_use]
    pub fn unit_name(&self, unit: UnitIndex) -> &str {
        &self.unit_names[unit.index()]
    }

    /// Every role the unit has a reward for.
    #[must_use]
    pub fn playable_roles(&self, unit: UnitIndex) -> RoleSet {
        self.unit_roles[unit.index()]
    }

    /// Ids of one unit, ascending.
    #[must_use]
    pub fn unit_ids(&self, unit: UnitIndex) -> &[UnitRoleId] {
        &self.unit_ids[unit.index()]
    }

    /// Every id sharing the unit of `id`, including `id` itself.
    #[must_use]
    pub fn same_unit_ids(&self, id: UnitRoleId) -> &[UnitRoleId] {
        self.unit_ids(self.entries[id.index()].unit)
    }

    /// The lowest id of a unit; stands in for the unit when it is banned.
    #[must_use]
    pub fn representative(&self, unit: UnitIndex) -> UnitRoleId {
        self.unit_ids[unit.index()][0]
    }

    /// Ids playing a role, ascending.
    #[must_use]
    pub fn ids_per_role(&self, role: Role) -> &[UnitRoleId] {
        &self.ids_per_role[role.index()]
    }
}

fn potential(
    reward: &RawRoleReward,
    role: Role,
    synergies: &[RawSynergyReward],
    counters: &[RawCounterReward],
) -> i64 {
    let own = i64::from(reward.value_a) + i64::from(reward.value_b);
    let synergy: i64 = synergies
        .iter()
        .filter(|s| s.applies_to(&reward.unit, role))
        .map(|s| i64::from(s.value_a) + i64::from(s.value_b))
        .sum();
    let counter: i64 = counters
        .iter()
        .filter(|c| c.applies_to(&reward.unit, role))
        .map(|c| i64::from(c.value_a) + i64::from(c.value_b))
        .sum();
    own + synergy + counter
}
