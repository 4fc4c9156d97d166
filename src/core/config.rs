//! Solver configuration parameters.

use serde::{Deserialize, Serialize};

use super::team::Team;

/// Solver configuration.
///
/// Capacities are checked while configuring an engine so that oversized
/// reward sets fail with a `CapacityError` before anything is allocated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Seed for Zobrist key generation.
    /// The same seed and identity table always produce the same keys.
    pub zobrist_seed: u64,

    /// Maximum number of (unit, role) identities.
    pub max_unit_roles: usize,

    /// Maximum number of translated synergy rewards.
    pub max_synergies: usize,

    /// Maximum number of translated counter rewards.
    pub max_counters: usize,

    /// Initial transposition table capacity (entries).
    pub table_capacity: usize,

    /// Side that commits to its role assignment first when several legal
    /// assignments exist. The other side answers with its best response.
    pub first_mover: Team,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            zobrist_seed: 42,
            max_unit_roles: 4096,
            max_synergies: 1 << 20,
            max_counters: 1 << 20,
            table_capacity: 1 << 16,
            first_mover: Team::A,
        }
    }
}

impl SolverConfig {
    /// Create a new config with a custom Zobrist seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.zobrist_seed = seed;
        self
    }

    /// Create a new config with a custom identity capacity.
    pub fn with_max_unit_roles(mut self, max: usize) -> Self {
        self.max_unit_roles = max;
        self
    }

    /// Create a new config with custom translated-reward capacities.
    pub fn with_reward_capacity(mut self, synergies: usize, counters: usize) -> Self {
        self.max_synergies = synergies;
        self.max_counters = counters;
        self
    }

    /// Create a new config with a custom table pre-size.
    pub fn with_table_capacity(mut self, capacity: usize) -> Self {
        self.table_capacity = capacity;
        self
    }

    /// Create a new config with a custom first mover.
    pub fn with_first_mover(mut self, team: Team) -> Self {
        self.first_mover = team;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.zobrist_seed, 42);
        assert_eq!(config.max_unit_roles, 4096);
        assert_eq!(config.first_mover, Team::A);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SolverConfig::default()
            .with_seed(7)
            .with_max_unit_roles(10)
            .with_reward_capacity(3, 4)
            .with_first_mover(Team::B);

        assert_eq!(config.zobrist_seed, 7);
        assert_eq!(config.max_unit_roles, 10);
        assert_eq!(config.max_synergies, 3);
        assert_eq!(config.max_counters, 4);
        assert_eq!(config.first_mover, Team::B);
    }

    #[test]
    fn test_serialization() {
        let config = SolverConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
