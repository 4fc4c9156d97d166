//! Exhaustive alpha-beta search over the remaining draft.
//!
//! A node is the set of ids each team has picked plus the set of banned
//! units; the stage to act is implied by the recursion depth. Team A
//! maximizes, team B minimizes. Actions are tried in ascending id order,
//! which is descending potential.
//!
//! A stage whose team has nothing legal to select is passed. Once a stage has
//! been passed the selection count no longer determines the stage, so those
//! nodes neither read nor write the transposition table.

use smallvec::SmallVec;

use crate::core::{RoleSet, Team, TeamPair};
use crate::draft::{DraftFormat, Selection};
use crate::rewards::{IdTuple, IdentityTable, TranslatedRewards, UnitRoleId};

use super::stats::SearchStats;
use super::table::{Bound, TableEntry, TranspositionTable};
use super::zobrist::{ZobristHash, ZobristKeys};

/// Larger than any reachable draft value.
pub const INFINITY: i32 = i32::MAX;

/// The ids (one or two) recommended for a turn.
pub type Line = SmallVec<[UnitRoleId; 2]>;

/// Value of a finished draft from A's point of view.
///
/// Own role values, then every synergy fully owned by one side, then every
/// counter whose own ids sit on one side and opposing ids on the other.
#[must_use]
pub fn evaluate(identities: &IdentityTable, rewards: &TranslatedRewards, picks: &TeamPair<IdTuple>) -> i32 {
    let mut value = 0;
    for team in Team::BOTH {
        let own = &picks[team];
        let other = &picks[team.opponent()];
        let sign = if team.is_maximizing() { 1 } else { -1 };
        let side_value = |a: i32, b: i32| if team.is_maximizing() { a } else { b };

        for &id in own {
            let unit = identities.get(id);
            value += sign * side_value(unit.value_a, unit.value_b);

            for synergy in rewards.synergies_from(id) {
                if synergy.ids.iter().all(|i| own.contains(i)) {
                    value += sign * side_value(synergy.value_a, synergy.value_b);
                }
            }
            for counter in rewards.counters_from(id) {
                if counter.own.iter().all(|i| own.contains(i)) && counter.opposing.iter().all(|i| other.contains(i)) {
                    value += sign * side_value(counter.value_a, counter.value_b);
                }
            }
        }
    }
    value
}

/// Mutable draft position, updated in place with `apply`/`undo`.
#[derive(Clone, Debug)]
pub struct SearchState {
    picks: TeamPair<IdTuple>,
    banned: Vec<UnitRoleId>,
    /// Indexed by unit.
    used: Vec<bool>,
    open: TeamPair<RoleSet>,
    hash: ZobristHash,
}

impl SearchState {
    /// Position after a history, given one candidate team per side.
    pub fn new(
        identities: &IdentityTable,
        keys: &ZobristKeys,
        picks: TeamPair<IdTuple>,
        banned: &[UnitRoleId],
    ) -> Self {
        let mut used = vec![false; identities.unit_count()];
        let mut open = TeamPair::new(RoleSet::ALL, RoleSet::ALL);
        for (team, ids) in picks.iter() {
            for &id in ids {
                let unit = identities.get(id);
                used[unit.unit.index()] = true;
                open[team] = open[team].without(unit.role);
            }
        }
        for &id in banned {
            used[identities.get(id).unit.index()] = true;
        }
        let hash = keys.hash_state(&picks, banned);

        Self {
            picks,
            banned: banned.to_vec(),
            used,
            open,
            hash,
        }
    }

    #[must_use]
    pub fn picks(&self) -> &TeamPair<IdTuple> {
        &self.picks
    }

    #[must_use]
    pub fn hash(&self) -> ZobristHash {
        self.hash
    }

    /// Picks and bans made so far.
    #[must_use]
    pub fn selections(&self) -> usize {
        self.picks[Team::A].len() + self.picks[Team::B].len() + self.banned.len()
    }
}

/// One search pass over a configured engine's tables.
pub struct Searcher<'a> {
    identities: &'a IdentityTable,
    rewards: &'a TranslatedRewards,
    format: &'a DraftFormat,
    keys: &'a ZobristKeys,
    table: &'a mut TranspositionTable,
    stats: &'a mut SearchStats,
}

impl<'a> Searcher<'a> {
    pub fn new(
        identities: &'a IdentityTable,
        rewards: &'a TranslatedRewards,
        format: &'a DraftFormat,
        keys: &'a ZobristKeys,
        table: &'a mut TranspositionTable,
        stats: &'a mut SearchStats,
    ) -> Self {
        Self {
            identities,
            rewards,
            format,
            keys,
            table,
            stats,
        }
    }

    /// Legal selections for `stage`, in search order.
    ///
    /// A pick is any id of an unused unit whose role is still open for the
    /// acting team. A ban names an unused unit through its lowest id, and is
    /// only offered while some team could still pick that unit.
    pub fn legal_actions(&self, state: &SearchState, stage: usize) -> SmallVec<[UnitRoleId; 32]> {
        let stage = self.format.stage(stage);
        match stage.selection {
            Selection::Pick => {
                let open = state.open[stage.team];
                self.identities
                    .iter()
                    .filter(|(_, unit)| !state.used[unit.unit.index()] && open.contains(unit.role))
                    .map(|(id, _)| id)
                    .collect()
            }
            Selection::Ban => {
                let open = state.open[Team::A].union(state.open[Team::B]);
                let mut offered = vec![false; self.identities.unit_count()];
                let mut actions = SmallVec::new();
                for (_, unit) in self.identities.iter() {
                    let index = unit.unit.index();
                    if state.used[index] || offered[index] || !open.contains(unit.role) {
                        continue;
                    }
                    offered[index] = true;
                    actions.push(self.identities.representative(unit.unit));
                }
                actions
            }
        }
    }

    pub fn apply(&self, state: &mut SearchState, stage: usize, id: UnitRoleId) {
        let stage = self.format.stage(stage);
        let unit = self.identities.get(id);
        debug_assert!(!state.used[unit.unit.index()], "unit selected twice");
        state.used[unit.unit.index()] = true;
        match stage.selection {
            Selection::Pick => {
                state.picks[stage.team].push(id);
                state.open[stage.team] = state.open[stage.team].without(unit.role);
                state.hash = state.hash.pick(self.keys, stage.team, id);
            }
            Selection::Ban => {
                state.banned.push(id);
                state.hash = state.hash.ban(self.keys, id);
            }
        }
    }

    /// Revert the most recent `apply` at `stage`.
    pub fn undo(&self, state: &mut SearchState, stage: usize, id: UnitRoleId) {
        let stage = self.format.stage(stage);
        let unit = self.identities.get(id);
        state.used[unit.unit.index()] = false;
        match stage.selection {
            Selection::Pick => {
                let popped = state.picks[stage.team].pop();
                debug_assert_eq!(popped, Some(id));
                state.open[stage.team] = state.open[stage.team].with(unit.role);
                state.hash = state.hash.pick(self.keys, stage.team, id);
            }
            Selection::Ban => {
                let popped = state.banned.pop();
                debug_assert_eq!(popped, Some(id));
                state.hash = state.hash.ban(self.keys, id);
            }
        }
    }

    fn evaluate(&mut self, state: &SearchState) -> i32 {
        self.stats.terminals += 1;
        evaluate(self.identities, self.rewards, &state.picks)
    }

    /// Fail-soft alpha-beta from `stage` to the end of the draft.
    pub fn alphabeta(&mut self, state: &mut SearchState, stage: usize, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.nodes += 1;
        if stage == self.format.len() {
            return self.evaluate(state);
        }

        let canonical = state.selections() == stage;
        if canonical {
            if let Some(entry) = self.table.probe(state.hash) {
                self.stats.table_hits += 1;
                match entry.bound {
                    Bound::Exact => return entry.value,
                    Bound::Lower => alpha = alpha.max(entry.value),
                    Bound::Upper => beta = beta.min(entry.value),
                }
                if alpha >= beta {
                    return entry.value;
                }
            }
        }

        let team = self.format.stage(stage).team;
        let actions = self.legal_actions(state, stage);
        let (window_alpha, window_beta) = (alpha, beta);
        let value = if actions.is_empty() {
            self.alphabeta(state, stage + 1, alpha, beta)
        } else {
            let maximizing = team.is_maximizing();
            let mut best = if maximizing { -INFINITY } else { INFINITY };
            for id in actions {
                self.apply(state, stage, id);
                let value = self.alphabeta(state, stage + 1, alpha, beta);
                self.undo(state, stage, id);

                if maximizing {
                    best = best.max(value);
                    alpha = alpha.max(best);
                } else {
                    best = best.min(value);
                    beta = beta.min(best);
                }
                if alpha >= beta {
                    break;
                }
            }
            best
        };

        if canonical {
            self.table.store(state.hash, TableEntry::classify(value, window_alpha, window_beta));
            self.stats.table_stores += 1;
        }
        value
    }

    /// Best selection(s) for the turn starting at `stage`.
    ///
    /// A double stage chooses both selections in one pass over the pairs.
    /// Returns `None` when the acting team has nothing legal to select. If
    /// only the second half of a double stage is blocked, the line holds a
    /// single id.
    pub fn search_turn(&mut self, state: &mut SearchState, stage: usize) -> Option<(i32, Line)> {
        let current = *self.format.stage(stage);
        let maximizing = current.team.is_maximizing();
        let actions = self.legal_actions(state, stage);
        if actions.is_empty() {
            return None;
        }

        self.stats.nodes += 1;
        let mut best: Option<(i32, Line)> = None;
        for first in actions {
            self.apply(state, stage, first);
            if current.kind.is_double() {
                let seconds = self.legal_actions(state, stage + 1);
                if seconds.is_empty() {
                    let value = self.bounded(state, stage + 2, maximizing, &best);
                    keep_better(&mut best, maximizing, value, [first].into_iter().collect());
                }
                for second in seconds {
                    self.apply(state, stage + 1, second);
                    let value = self.bounded(state, stage + 2, maximizing, &best);
                    self.undo(state, stage + 1, second);
                    keep_better(&mut best, maximizing, value, [first, second].into_iter().collect());
                }
            } else {
                let value = self.bounded(state, stage + 1, maximizing, &best);
                keep_better(&mut best, maximizing, value, [first].into_iter().collect());
            }
            self.undo(state, stage, first);
        }
        best
    }

    /// Search a root child with the window only the current best can narrow.
    fn bounded(&mut self, state: &mut SearchState, stage: usize, maximizing: bool, best: &Option<(i32, Line)>) -> i32 {
        match (best, maximizing) {
            (Some((value, _)), true) => self.alphabeta(state, stage, *value, INFINITY),
            (Some((value, _)), false) => self.alphabeta(state, stage, -INFINITY, *value),
            (None, _) => self.alphabeta(state, stage, -INFINITY, INFINITY),
        }
    }
}

/// Replace `best` when `value` is strictly better; earlier lines win ties.
fn keep_better(best: &mut Option<(i32, Line)>, maximizing: bool, value: i32, line: Line) {
    let better = match best {
        None => true,
        Some((current, _)) if maximizing => value > *current,
        Some((current, _)) => value < *current,
    };
    if better {
        *best = Some((value, line));
    }
}
