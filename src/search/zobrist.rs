//! Zobrist hashing of draft states.
//!
//! A state is the set of ids each team has picked plus the set of banned
//! units. Its hash is the XOR of one key per element, so it can be updated in
//! O(1) per selection and any two orders reaching the same sets agree.
//!
//! Ban keys belong to the real unit: every role variant of a unit shares one,
//! since banning any variant removes them all.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Team, TeamPair};
use crate::rewards::{IdentityTable, UnitRoleId};

/// Key table for one identity table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZobristKeys {
    pick: TeamPair<Vec<u64>>,
    /// Indexed by id; equal for ids of the same unit.
    ban: Vec<u64>,
}

impl ZobristKeys {
    /// Generate keys deterministically from `seed`.
    ///
    /// Every key is non-zero and distinct from every other key, except that
    /// role variants of one unit share a ban key.
    pub fn generate(identities: &IdentityTable, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut issued = FxHashSet::default();
        let mut fresh = || loop {
            let key = rng.next_u64();
            if key != 0 && issued.insert(key) {
                return key;
            }
        };

        let pick = TeamPair::from_fn(|_| (0..identities.len()).map(|_| fresh()).collect::<Vec<_>>());
        let unit_keys: Vec<u64> = (0..identities.unit_count()).map(|_| fresh()).collect();
        let ban = identities
            .iter()
            .map(|(_, entry)| unit_keys[entry.unit.index()])
            .collect();

        Self { pick, ban }
    }

    /// Number of ids these keys cover.
    #[must_use]
    pub fn id_count(&self) -> usize {
        self.ban.len()
    }

    #[inline]
    #[must_use]
    pub fn pick_key(&self, team: Team, id: UnitRoleId) -> u64 {
        self.pick[team][id.index()]
    }

    #[inline]
    #[must_use]
    pub fn ban_key(&self, id: UnitRoleId) -> u64 {
        self.ban[id.index()]
    }

    /// Hash a full state from scratch.
    #[must_use]
    pub fn hash_state(&self, picks: &TeamPair<impl AsRef<[UnitRoleId]>>, banned: &[UnitRoleId]) -> ZobristHash {
        let mut hash = ZobristHash::initial();
        for (team, ids) in picks.iter() {
            for &id in ids.as_ref() {
                hash = hash.pick(self, team, id);
            }
        }
        for &id in banned {
            hash = hash.ban(self, id);
        }
        hash
    }
}

/// Incrementally maintained state hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZobristHash {
    hash: u64,
}

impl ZobristHash {
    /// Hash of the empty draft.
    #[must_use]
    pub fn initial() -> Self {
        Self { hash: 0 }
    }

    /// Toggle a pick. Applying the same pick twice undoes it.
    #[inline]
    #[must_use]
    pub fn pick(self, keys: &ZobristKeys, team: Team, id: UnitRoleId) -> Self {
        Self {
            hash: self.hash ^ keys.pick_key(team, id),
        }
    }

    /// Toggle a ban.
    #[inline]
    #[must_use]
    pub fn ban(self, keys: &ZobristKeys, id: UnitRoleId) -> Self {
        Self {
            hash: self.hash ^ keys.ban_key(id),
        }
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::RawRoleReward;

    fn table() -> IdentityTable {
        let rewards = vec![
            RawRoleReward::new("Krul", 1, 200, 200),
            RawRoleReward::new("Krul", 4, 0, 200),
            RawRoleReward::new("Taka", 0, 300, 0),
            RawRoleReward::new("Rona", 3, 0, 100),
        ];
        IdentityTable::build(&rewards, &[], &[], 64).unwrap()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let table = table();
        assert_eq!(ZobristKeys::generate(&table, 7), ZobristKeys::generate(&table, 7));
        assert_ne!(ZobristKeys::generate(&table, 7), ZobristKeys::generate(&table, 8));
    }

    #[test]
    fn test_ban_keys_shared_per_unit() {
        let table = table();
        let keys = ZobristKeys::generate(&table, 1);
        let krul = table.unit("Krul").unwrap();
        let ids = table.unit_ids(krul);

        assert_eq!(keys.ban_key(ids[0]), keys.ban_key(ids[1]));
        assert_ne!(keys.ban_key(ids[0]), keys.ban_key(table.representative(table.unit("Taka").unwrap())));
    }

    #[test]
    fn test_pick_keys_distinct_per_team() {
        let table = table();
        let keys = ZobristKeys::generate(&table, 1);
        let id = UnitRoleId::new(0);
        assert_ne!(keys.pick_key(Team::A, id), keys.pick_key(Team::B, id));
    }

    #[test]
    fn test_incremental_matches_full() {
        let table = table();
        let keys = ZobristKeys::generate(&table, 3);
        let picks = TeamPair::new(vec![UnitRoleId(0)], vec![UnitRoleId(3)]);
        let banned = [UnitRoleId(1)];

        let incremental = ZobristHash::initial()
            .ban(&keys, UnitRoleId(1))
            .pick(&keys, Team::B, UnitRoleId(3))
            .pick(&keys, Team::A, UnitRoleId(0));
        assert_eq!(incremental, keys.hash_state(&picks, &banned));

        let undone = incremental.pick(&keys, Team::A, UnitRoleId(0));
        assert_ne!(undone, incremental);
        assert_eq!(undone.pick(&keys, Team::A, UnitRoleId(0)), incremental);
    }
}
