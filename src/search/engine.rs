//! The configured draft engine.
//!
//! A `DraftEngine` owns every table derived from one configuration: the
//! compiled format, identities, translated rewards, Zobrist keys and the
//! transposition table. They are built together and replaced together, so a
//! table can never outlive the rewards it was filled under. Independent
//! sessions use independent engines.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{DraftError, Role, SolverConfig, Team, TeamPair, ValidationError};
use crate::draft::{expand_history, DraftFormat, ExpandedHistory, RoleAvailability, Selection};
use crate::rewards::{
    IdentityTable, RawCounterReward, RawRoleReward, RawSynergyReward, TranslatedRewards, UnitIndex,
};

use super::minimax::{evaluate, Line, SearchState, Searcher};
use super::resolve::{first_mover_choice, RoleResolution};
use super::stats::SearchStats;
use super::table::TranspositionTable;
use super::zobrist::ZobristKeys;

/// Recommendation for the next turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// The acting team selects once.
    Single { value: i32, unit: String },
    /// The acting team selects twice in a row.
    Double { value: i32, first: String, second: String },
}

impl SearchOutcome {
    /// Minimax value from A's point of view.
    #[must_use]
    pub fn value(&self) -> i32 {
        match self {
            SearchOutcome::Single { value, .. } | SearchOutcome::Double { value, .. } => *value,
        }
    }

    /// Recommended units in selection order.
    #[must_use]
    pub fn units(&self) -> Vec<&str> {
        match self {
            SearchOutcome::Single { unit, .. } => vec![unit.as_str()],
            SearchOutcome::Double { first, second, .. } => vec![first.as_str(), second.as_str()],
        }
    }
}

/// Minimax draft solver for one configuration.
///
/// ```
/// use draft_solver::core::{SolverConfig, Team};
/// use draft_solver::draft::Selection;
/// use draft_solver::rewards::RawRoleReward;
/// use draft_solver::search::{DraftEngine, SearchOutcome};
///
/// let mut engine = DraftEngine::configure(
///     SolverConfig::default(),
///     &[(Team::A, Selection::Pick), (Team::B, Selection::Pick)],
///     &[
///         RawRoleReward::new("Taka", 0, 300, 300),
///         RawRoleReward::new("Rona", 3, 100, 100),
///     ],
///     &[],
///     &[],
/// )
/// .unwrap();
///
/// let outcome = engine.run_search::<&str>(&[]).unwrap();
/// assert_eq!(outcome, SearchOutcome::Single { value: 200, unit: "Taka".into() });
/// ```
#[derive(Debug)]
pub struct DraftEngine {
    config: SolverConfig,
    format: DraftFormat,
    identities: IdentityTable,
    rewards: TranslatedRewards,
    keys: ZobristKeys,
    table: TranspositionTable,
    stats: SearchStats,
}

impl DraftEngine {
    /// Validate inputs and build every table.
    pub fn configure(
        config: SolverConfig,
        format: &[(Team, Selection)],
        role_rewards: &[RawRoleReward],
        synergies: &[RawSynergyReward],
        counters: &[RawCounterReward],
    ) -> Result<Self, DraftError> {
        let format = DraftFormat::compile(format)?;
        let identities = IdentityTable::build(role_rewards, synergies, counters, config.max_unit_roles)?;
        let rewards = TranslatedRewards::translate(&identities, synergies, counters, &config)?;
        let keys = ZobristKeys::generate(&identities, config.zobrist_seed);
        let table = TranspositionTable::with_capacity(config.table_capacity);

        info!(
            ids = identities.len(),
            units = identities.unit_count(),
            synergies = rewards.synergies().len(),
            counters = rewards.counters().len(),
            stages = format.len(),
            "configured draft engine"
        );

        Ok(Self {
            config,
            format,
            identities,
            rewards,
            keys,
            table,
            stats: SearchStats::new(),
        })
    }

    /// Replace the configuration, keeping the solver settings.
    ///
    /// On error the engine is left unchanged.
    pub fn reconfigure(
        &mut self,
        format: &[(Team, Selection)],
        role_rewards: &[RawRoleReward],
        synergies: &[RawSynergyReward],
        counters: &[RawCounterReward],
    ) -> Result<(), DraftError> {
        *self = Self::configure(self.config.clone(), format, role_rewards, synergies, counters)?;
        Ok(())
    }

    /// Best selection(s) for the stage following `history`.
    ///
    /// Every combination of candidate teams the history allows is searched;
    /// the configured first mover decides which combination is reported.
    pub fn run_search<S: AsRef<str>>(&mut self, history: &[S]) -> Result<SearchOutcome, DraftError> {
        let start = Instant::now();
        self.stats.reset();

        if history.len() >= self.format.len() {
            return Err(ValidationError::HistoryTooLong {
                history: history.len(),
                stages: self.format.len(),
            }
            .into());
        }
        let expanded = expand_history(&self.identities, &self.format, history)?;
        let stage = history.len();
        debug!(
            stage,
            candidates_a = expanded.candidates[Team::A].len(),
            candidates_b = expanded.candidates[Team::B].len(),
            "running draft search"
        );

        let mut searcher = Searcher::new(
            &self.identities,
            &self.rewards,
            &self.format,
            &self.keys,
            &mut self.table,
            &mut self.stats,
        );
        let mut results: Vec<Vec<Option<(i32, Line)>>> = Vec::with_capacity(expanded.candidates[Team::A].len());
        for team_a in &expanded.candidates[Team::A] {
            let mut row = Vec::with_capacity(expanded.candidates[Team::B].len());
            for team_b in &expanded.candidates[Team::B] {
                let picks = TeamPair::new(team_a.clone(), team_b.clone());
                let mut state = SearchState::new(&self.identities, &self.keys, picks, &expanded.banned);
                row.push(searcher.search_turn(&mut state, stage));
            }
            results.push(row);
        }
        self.stats.combinations = expanded.combination_count() as u32;

        let values: Vec<Vec<Option<i32>>> = results
            .iter()
            .map(|row| row.iter().map(|cell| cell.as_ref().map(|(v, _)| *v)).collect())
            .collect();
        let (a, b) = first_mover_choice(self.config.first_mover, &values).ok_or(ValidationError::NoLegalSelection {
            team: self.format.stage(stage).team,
            stage,
        })?;
        let (value, line) = results[a][b].take().ok_or(ValidationError::NoLegalSelection {
            team: self.format.stage(stage).team,
            stage,
        })?;

        let name = |i: usize| self.identities.get(line[i]).name.clone();
        let outcome = if line.len() == 2 {
            SearchOutcome::Double {
                value,
                first: name(0),
                second: name(1),
            }
        } else {
            SearchOutcome::Single { value, unit: name(0) }
        };

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            value,
            nodes = self.stats.nodes,
            table_hits = self.stats.table_hits,
            table_size = self.table.len(),
            time_us = self.stats.time_us,
            "draft search complete"
        );
        Ok(outcome)
    }

    /// Units that can be selected at `stage` (default: the stage after `history`).
    ///
    /// A pick stage offers units the acting team can still fit in an open
    /// role; a ban stage offers units either team could still pick.
    pub fn selectable_units<S: AsRef<str>>(
        &self,
        history: &[S],
        stage: Option<usize>,
    ) -> Result<BTreeSet<String>, DraftError> {
        let expanded = expand_history(&self.identities, &self.format, history)?;
        let stage = stage.unwrap_or(history.len());
        if stage < history.len() || stage >= self.format.len() {
            return Err(ValidationError::StageOutOfRange {
                stage,
                stages: self.format.len(),
            }
            .into());
        }

        let availability = TeamPair::from_fn(|team| {
            RoleAvailability::from_picks(expanded.picks[team].iter().map(|&u| self.identities.playable_roles(u)))
        });
        let stage = self.format.stage(stage);

        let units = (0..self.identities.unit_count())
            .map(|i| UnitIndex(i as u32))
            .filter(|unit| !expanded.used.contains(unit))
            .filter(|&unit| {
                let playable = self.identities.playable_roles(unit);
                match stage.selection {
                    Selection::Pick => availability[stage.team].admits(playable),
                    Selection::Ban => Team::BOTH.into_iter().any(|team| availability[team].admits(playable)),
                }
            })
            .map(|unit| self.identities.unit_name(unit).to_owned())
            .collect();
        Ok(units)
    }

    /// Settle which role every picked unit plays.
    ///
    /// Each side's legal assignments are compared by final value; the
    /// configured first mover commits first and the other side replies.
    pub fn resolve_roles<S: AsRef<str>>(&self, history: &[S]) -> Result<RoleResolution, DraftError> {
        let expanded = expand_history(&self.identities, &self.format, history)?;
        let grid: Vec<Vec<Option<i32>>> = expanded.candidates[Team::A]
            .iter()
            .map(|team_a| {
                expanded.candidates[Team::B]
                    .iter()
                    .map(|team_b| {
                        let picks = TeamPair::new(team_a.clone(), team_b.clone());
                        Some(evaluate(&self.identities, &self.rewards, &picks))
                    })
                    .collect()
            })
            .collect();

        // expand_history guarantees at least one candidate per side.
        let (a, b) = first_mover_choice(self.config.first_mover, &grid).unwrap_or((0, 0));
        let value = grid[a][b].unwrap_or_default();
        let chosen = TeamPair::new(a, b);

        Ok(RoleResolution {
            value,
            assignments: TeamPair::from_fn(|team| self.assignment(&expanded, team, chosen[team])),
        })
    }

    fn assignment(&self, expanded: &ExpandedHistory, team: Team, candidate: usize) -> Vec<(String, Role)> {
        let ids = &expanded.candidates[team][candidate];
        expanded.picks[team]
            .iter()
            .filter_map(|&unit| {
                ids.iter()
                    .map(|&id| self.identities.get(id))
                    .find(|entry| entry.unit == unit)
                    .map(|entry| (entry.name.clone(), entry.role))
            })
            .collect()
    }

    /// Write the transposition table with the keys it was built under.
    pub fn save_transposition_table(&self, path: impl AsRef<Path>) -> Result<(), DraftError> {
        self.table.save(path, &self.keys)
    }

    /// Replace the table and keys with a saved pair.
    ///
    /// The file must cover the same number of unit-role ids. It must also
    /// come from the same rewards and format; that is not checked.
    pub fn load_transposition_table(&mut self, path: impl AsRef<Path>) -> Result<(), DraftError> {
        let (table, keys) = TranspositionTable::load(path, self.identities.len())?;
        info!(entries = table.len(), "replaced transposition table");
        self.table = table;
        self.keys = keys;
        Ok(())
    }

    pub fn clear_table(&mut self) {
        self.table.clear();
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[must_use]
    pub fn format(&self) -> &DraftFormat {
        &self.format
    }

    #[must_use]
    pub fn identities(&self) -> &IdentityTable {
        &self.identities
    }

    #[must_use]
    pub fn rewards(&self) -> &TranslatedRewards {
        &self.rewards
    }

    #[must_use]
    pub fn keys(&self) -> &ZobristKeys {
        &self.keys
    }

    #[must_use]
    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// Statistics of the most recent `run_search`.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
