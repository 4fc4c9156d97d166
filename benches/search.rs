//! Draft search benchmarks.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure:
//! - Searches from different draft depths with a cold table
//! - The same searches answered from a warm table
//! - Engine configuration (identity ordering, translation, key generation)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use draft_solver::core::{SolverConfig, Team};
use draft_solver::draft::Selection;
use draft_solver::rewards::{RawCounterReward, RawRoleReward, RawSynergyReward, RewardEntry};
use draft_solver::search::DraftEngine;

use Selection::{Ban, Pick};
use Team::{A, B};

const FORMAT: [(Team, Selection); 10] = [
    (A, Ban),
    (B, Ban),
    (A, Pick),
    (B, Pick),
    (B, Pick),
    (A, Pick),
    (A, Pick),
    (B, Pick),
    (B, Pick),
    (A, Pick),
];

const UNITS: [&str; 12] = [
    "Taka", "Krul", "Joule", "Rona", "Saw", "Vox", "Ember", "Lark", "Moss", "Ardan", "Lyra", "Skye",
];

fn role_rewards() -> Vec<RawRoleReward> {
    let mut rewards = Vec::new();
    for (i, unit) in UNITS.iter().enumerate() {
        let role = (i % 5) as u8;
        let value = 100 + (i as i32 * 37) % 400;
        rewards.push(RawRoleReward::new(*unit, role, value, 500 - value));
        // Every third unit is flexible.
        if i % 3 == 0 {
            rewards.push(RawRoleReward::new(*unit, (role + 2) % 5, value / 2, value));
        }
    }
    rewards
}

fn synergies() -> Vec<RawSynergyReward> {
    vec![
        RawSynergyReward::new(
            vec![RewardEntry::new("Taka", [0]), RewardEntry::new("Krul", [1])],
            150,
            120,
        ),
        RawSynergyReward::new(
            vec![RewardEntry::new("Rona", [3]), RewardEntry::new("Vox", [0])],
            90,
            200,
        ),
    ]
}

fn counters() -> Vec<RawCounterReward> {
    vec![
        RawCounterReward::new(
            vec![RewardEntry::new("Joule", [2])],
            vec![RewardEntry::new("Saw", [4])],
            80,
            60,
        ),
        RawCounterReward::new(
            vec![RewardEntry::new("Lark", [2])],
            vec![RewardEntry::new("Taka", [0, 2])],
            120,
            40,
        ),
    ]
}

fn engine() -> DraftEngine {
    DraftEngine::configure(SolverConfig::default(), &FORMAT, &role_rewards(), &synergies(), &counters()).unwrap()
}

fn histories() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("after_bans", vec!["Moss", "Ardan"]),
        ("midgame", vec!["Moss", "Ardan", "Taka", "Rona", "Vox"]),
        ("near_end", vec!["Moss", "Ardan", "Taka", "Rona", "Vox", "Krul", "Joule", "Saw"]),
    ]
}

fn bench_cold_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_search");
    group.sample_size(10);

    for (name, history) in histories() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &history, |b, history| {
            let mut engine = engine();
            b.iter(|| {
                engine.clear_table();
                black_box(engine.run_search(history.as_slice()).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_warm_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("warm_search");

    for (name, history) in histories() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &history, |b, history| {
            let mut engine = engine();
            engine.run_search(history.as_slice()).unwrap();
            b.iter(|| black_box(engine.run_search(history.as_slice()).unwrap()));
        });
    }

    group.finish();
}

fn bench_configure(c: &mut Criterion) {
    let roles = role_rewards();
    let synergies = synergies();
    let counters = counters();

    c.bench_function("configure", |b| {
        b.iter(|| {
            black_box(
                DraftEngine::configure(SolverConfig::default(), &FORMAT, &roles, &synergies, &counters).unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_cold_search, bench_warm_search, bench_configure);
criterion_main!(benches);
