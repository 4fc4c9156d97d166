//! Zobrist hashing tests.
//!
//! These tests verify the properties the transposition table relies on:
//! - Hashes depend on the sets selected, not the order
//! - Generated keys do not collide

use std::collections::HashSet;

use draft_solver::core::Team;
use draft_solver::rewards::{IdentityTable, RawRoleReward, UnitRoleId};
use draft_solver::search::{ZobristHash, ZobristKeys};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// One single-role unit per id, so every id is a distinct unit.
fn table(units: usize) -> IdentityTable {
    let rewards: Vec<_> = (0..units)
        .map(|i| RawRoleReward::new(format!("U{i}"), (i % 5) as u8, (i % 1000) as i32, 0))
        .collect();
    IdentityTable::build(&rewards, &[], &[], units).unwrap()
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Pick(Team, UnitRoleId),
    Ban(UnitRoleId),
}

fn hash_of(keys: &ZobristKeys, steps: &[Step]) -> ZobristHash {
    steps.iter().fold(ZobristHash::initial(), |hash, step| match *step {
        Step::Pick(team, id) => hash.pick(keys, team, id),
        Step::Ban(id) => hash.ban(keys, id),
    })
}

/// Test that at least 10,000 generated keys are pairwise distinct and non-zero.
#[test]
fn test_ten_thousand_keys_without_collision() {
    let table = table(5000);
    let keys = ZobristKeys::generate(&table, 42);

    let mut seen = HashSet::new();
    for (id, _) in table.iter() {
        for team in Team::BOTH {
            let key = keys.pick_key(team, id);
            assert_ne!(key, 0);
            assert!(seen.insert(key), "pick key collision at {id:?}");
        }
        assert!(seen.insert(keys.ban_key(id)), "ban key collision at {id:?}");
    }
    assert!(seen.len() >= 10_000);
}

/// Test that the same selections in different teams hash differently.
#[test]
fn test_team_and_ban_distinguished() {
    let table = table(4);
    let keys = ZobristKeys::generate(&table, 42);
    let id = UnitRoleId::new(2);

    let a = hash_of(&keys, &[Step::Pick(Team::A, id)]);
    let b = hash_of(&keys, &[Step::Pick(Team::B, id)]);
    let ban = hash_of(&keys, &[Step::Ban(id)]);
    assert_ne!(a, b);
    assert_ne!(a, ban);
    assert_ne!(b, ban);
}

fn arb_steps() -> impl Strategy<Value = Vec<Step>> {
    (prop::sample::subsequence((0..40u32).collect::<Vec<_>>(), 0..16), prop::collection::vec(0u8..3, 16)).prop_map(
        |(ids, kinds)| {
            ids.into_iter()
                .zip(kinds)
                .map(|(id, kind)| match kind {
                    0 => Step::Pick(Team::A, UnitRoleId::new(id)),
                    1 => Step::Pick(Team::B, UnitRoleId::new(id)),
                    _ => Step::Ban(UnitRoleId::new(id)),
                })
                .collect()
        },
    )
}

proptest! {
    /// Any permutation of the same selections hashes identically.
    #[test]
    fn test_hash_order_independent(steps in arb_steps(), seed in any::<u64>()) {
        let table = table(40);
        let keys = ZobristKeys::generate(&table, 7);

        let mut shuffled = steps.clone();
        shuffled.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

        prop_assert_eq!(hash_of(&keys, &steps), hash_of(&keys, &shuffled));
    }

    /// Adding then removing a selection restores the hash.
    #[test]
    fn test_hash_toggle_restores(steps in arb_steps()) {
        let table = table(40);
        let keys = ZobristKeys::generate(&table, 7);

        let before = hash_of(&keys, &steps);
        let extra = UnitRoleId::new(39);
        let after = before.pick(&keys, Team::A, extra).pick(&keys, Team::A, extra);
        prop_assert_eq!(before, after);
    }
}
