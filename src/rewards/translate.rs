//! Expansion of symbolic combination rewards into concrete id tuples.
//!
//! A synergy over `k` units allowing several roles each becomes one
//! `TranslatedSynergy` per role choice in which the `k` roles are pairwise
//! distinct. Counters expand their two sides independently; roles only need
//! to be distinct within a side because the sides belong to different teams.
//!
//! Translated tuples are sorted ascending. Two rewards that translate to the
//! same tuple are rejected.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{CapacityError, DraftError, Role, RoleSet, SolverConfig, ValidationError, ROLE_COUNT};

use super::identity::{IdentityTable, UnitRoleId};
use super::raw::{RawCounterReward, RawSynergyReward, RewardEntry};

/// Sorted ids of one side of a translated reward.
pub type IdTuple = SmallVec<[UnitRoleId; ROLE_COUNT]>;

/// Concrete synergy: one team owning all `ids`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedSynergy {
    pub ids: IdTuple,
    pub value_a: i32,
    pub value_b: i32,
    /// Index of the raw reward this came from.
    pub source: usize,
}

/// Concrete counter: one team owning `own` while the other owns `opposing`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedCounter {
    pub own: IdTuple,
    pub opposing: IdTuple,
    pub value_a: i32,
    pub value_b: i32,
    pub source: usize,
}

/// Every translated reward of a configuration, indexed for evaluation.
///
/// Each reward is filed under the smallest id of its (own) tuple, so an
/// evaluator only has to visit rewards anchored at ids a team actually owns.
#[derive(Clone, Debug, Default)]
pub struct TranslatedRewards {
    synergies: Vec<TranslatedSynergy>,
    counters: Vec<TranslatedCounter>,
    synergy_anchor: Vec<SmallVec<[u32; 4]>>,
    counter_anchor: Vec<SmallVec<[u32; 4]>>,
}

impl TranslatedRewards {
    /// Translate raw synergy and counter rewards against an identity table.
    pub fn translate(
        identities: &IdentityTable,
        synergies: &[RawSynergyReward],
        counters: &[RawCounterReward],
        config: &SolverConfig,
    ) -> Result<Self, DraftError> {
        let mut out = Self {
            synergy_anchor: vec![SmallVec::new(); identities.len()],
            counter_anchor: vec![SmallVec::new(); identities.len()],
            ..Self::default()
        };

        let mut seen: FxHashMap<IdTuple, usize> = FxHashMap::default();
        for (index, raw) in synergies.iter().enumerate() {
            raw.validate(index)?;
            for ids in side_combinations(identities, &raw.entries)? {
                if let Some(&previous) = seen.get(&ids) {
                    return Err(duplicate("synergy", index, previous));
                }
                CapacityError::check("translated synergy", config.max_synergies, out.synergies.len() + 1)?;
                seen.insert(ids.clone(), index);
                out.synergy_anchor[ids[0].index()].push(out.synergies.len() as u32);
                out.synergies.push(TranslatedSynergy {
                    ids,
                    value_a: raw.value_a,
                    value_b: raw.value_b,
                    source: index,
                });
            }
        }

        let mut seen: FxHashMap<(IdTuple, IdTuple), usize> = FxHashMap::default();
        for (index, raw) in counters.iter().enumerate() {
            raw.validate(index)?;
            let own_side = side_combinations(identities, &raw.own)?;
            let opposing_side = side_combinations(identities, &raw.opposing)?;
            for own in &own_side {
                for opposing in &opposing_side {
                    let key = (own.clone(), opposing.clone());
                    if let Some(&previous) = seen.get(&key) {
                        return Err(duplicate("counter", index, previous));
                    }
                    CapacityError::check("translated counter", config.max_counters, out.counters.len() + 1)?;
                    seen.insert(key, index);
                    out.counter_anchor[own[0].index()].push(out.counters.len() as u32);
                    out.counters.push(TranslatedCounter {
                        own: own.clone(),
                        opposing: opposing.clone(),
                        value_a: raw.value_a,
                        value_b: raw.value_b,
                        source: index,
                    });
                }
            }
        }

        debug!(
            synergies = out.synergies.len(),
            counters = out.counters.len(),
            "translated combination rewards"
        );
        Ok(out)
    }

    #[must_use]
    pub fn synergies(&self) -> &[TranslatedSynergy] {
        &self.synergies
    }

    #[must_use]
    pub fn counters(&self) -> &[TranslatedCounter] {
        &self.counters
    }

    /// Synergies whose smallest id is `id`.
    pub fn synergies_from(&self, id: UnitRoleId) -> impl Iterator<Item = &TranslatedSynergy> {
        self.synergy_anchor[id.index()]
            .iter()
            .map(move |&i| &self.synergies[i as usize])
    }

    /// Counters whose smallest own-side id is `id`.
    pub fn counters_from(&self, id: UnitRoleId) -> impl Iterator<Item = &TranslatedCounter> {
        self.counter_anchor[id.index()]
            .iter()
            .map(move |&i| &self.counters[i as usize])
    }
}

fn duplicate(kind: &'static str, index: usize, previous: usize) -> DraftError {
    ValidationError::DuplicateTranslatedReward {
        kind,
        index,
        previous,
    }
    .into()
}

/// Every role choice for `entries` with pairwise distinct roles, as sorted ids.
///
/// Choices are enumerated with the last entry varying fastest, so output order
/// is a pure function of the input.
fn side_combinations(
    identities: &IdentityTable,
    entries: &[RewardEntry],
) -> Result<Vec<IdTuple>, DraftError> {
    let options: Vec<SmallVec<[Role; 5]>> = entries
        .iter()
        .map(RewardEntry::allowed_roles)
        .collect::<Result<_, _>>()?;

    let mut out = Vec::new();
    if options.iter().any(|o| o.is_empty()) {
        return Ok(out);
    }

    let mut cursor = vec![0usize; options.len()];
    loop {
        let chosen: SmallVec<[Role; 8]> = cursor
            .iter()
            .zip(&options)
            .map(|(&c, roles)| roles[c])
            .collect();

        if RoleSet::from_roles(chosen.iter().copied()).len() == chosen.len() {
            let mut ids: IdTuple = entries
                .iter()
                .zip(&chosen)
                .map(|(entry, &role)| identities.require(&entry.unit, role))
                .collect::<Result<_, _>>()?;
            ids.sort_unstable();
            out.push(ids);
        }

        // Odometer step.
        let mut pos = cursor.len();
        loop {
            if pos == 0 {
                return Ok(out);
            }
            pos -= 1;
            cursor[pos] += 1;
            if cursor[pos] < options[pos].len() {
                break;
            }
            cursor[pos] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::raw::RawRoleReward;

    fn five_unit_table() -> IdentityTable {
        let rewards = vec![
            RawRoleReward::new("Ardan", 0, 100, 100),
            RawRoleReward::new("Baron", 1, 90, 90),
            RawRoleReward::new("Baron", 2, 80, 80),
            RawRoleReward::new("Celeste", 3, 70, 70),
            RawRoleReward::new("Celeste", 4, 60, 60),
        ];
        IdentityTable::build(&rewards, &[], &[], 64).unwrap()
    }

    #[test]
    fn test_synergy_product_count() {
        let table = five_unit_table();
        let synergy = RawSynergyReward::new(
            vec![
                RewardEntry::new("Ardan", [0]),
                RewardEntry::new("Baron", [1, 2]),
                RewardEntry::new("Celeste", [3, 4]),
            ],
            50,
            50,
        );

        let out = TranslatedRewards::translate(&table, &[synergy], &[], &SolverConfig::default()).unwrap();
        assert_eq!(out.synergies().len(), 4);
        for syn in out.synergies() {
            assert_eq!(syn.ids.len(), 3);
            assert!(syn.ids.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_distinct_roles_within_synergy() {
        let rewards = vec![
            RawRoleReward::new("Ardan", 0, 1, 1),
            RawRoleReward::new("Ardan", 1, 1, 1),
            RawRoleReward::new("Baron", 0, 1, 1),
            RawRoleReward::new("Baron", 1, 1, 1),
        ];
        let table = IdentityTable::build(&rewards, &[], &[], 64).unwrap();
        let synergy = RawSynergyReward::new(
            vec![RewardEntry::new("Ardan", [0, 1]), RewardEntry::new("Baron", [0, 1])],
            5,
            5,
        );

        let out = TranslatedRewards::translate(&table, &[synergy], &[], &SolverConfig::default()).unwrap();
        // (0,1) and (1,0); (0,0) and (1,1) are not legal teams.
        assert_eq!(out.synergies().len(), 2);
    }

    #[test]
    fn test_counter_sides_independent() {
        let table = five_unit_table();
        let counter = RawCounterReward::new(
            vec![RewardEntry::new("Baron", [1, 2])],
            vec![RewardEntry::new("Celeste", [3, 4]), RewardEntry::new("Ardan", [0])],
            30,
            0,
        );

        let out = TranslatedRewards::translate(&table, &[], &[counter], &SolverConfig::default()).unwrap();
        assert_eq!(out.counters().len(), 4);
        assert!(out.counters().iter().all(|c| c.own.len() == 1 && c.opposing.len() == 2));
    }

    #[test]
    fn test_duplicate_translation_rejected() {
        let table = five_unit_table();
        let a = RawSynergyReward::new(
            vec![RewardEntry::new("Ardan", [0]), RewardEntry::new("Baron", [1])],
            5,
            5,
        );
        let b = RawSynergyReward::new(
            vec![RewardEntry::new("Baron", [1, 2]), RewardEntry::new("Ardan", [0])],
            9,
            9,
        );

        let err = TranslatedRewards::translate(&table, &[a, b], &[], &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            DraftError::Validation(ValidationError::DuplicateTranslatedReward { index: 1, previous: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_role_fails_lookup() {
        let table = five_unit_table();
        let synergy = RawSynergyReward::new(
            vec![RewardEntry::new("Ardan", [2]), RewardEntry::new("Baron", [1])],
            5,
            5,
        );

        let err = TranslatedRewards::translate(&table, &[synergy], &[], &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            DraftError::Validation(ValidationError::UnknownUnitRole { .. })
        ));
    }

    #[test]
    fn test_capacity_error() {
        let table = five_unit_table();
        let synergy = RawSynergyReward::new(
            vec![RewardEntry::new("Baron", [1, 2]), RewardEntry::new("Celeste", [3, 4])],
            5,
            5,
        );
        let config = SolverConfig::default().with_reward_capacity(3, 3);

        let err = TranslatedRewards::translate(&table, &[synergy], &[], &config).unwrap_err();
        assert!(matches!(err, DraftError::Capacity(_)));
    }

    #[test]
    fn test_anchor_index() {
        let table = five_unit_table();
        let synergy = RawSynergyReward::new(
            vec![RewardEntry::new("Celeste", [4]), RewardEntry::new("Ardan", [0])],
            5,
            5,
        );

        let out = TranslatedRewards::translate(&table, &[synergy], &[], &SolverConfig::default()).unwrap();
        let ardan = table.lookup("Ardan", Role::new(0).unwrap()).unwrap();
        assert_eq!(out.synergies_from(ardan).count(), 1);
        assert_eq!(out.synergies_from(UnitRoleId(4)).count(), 0);
    }
}
