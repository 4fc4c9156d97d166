//! Choosing between candidate teams.
//!
//! When a history leaves flexible picks ambiguous, each side has several
//! candidate teams and the value depends on which pair is real. The first
//! mover commits to a candidate, the other side answers with its best reply,
//! and the first mover picks the candidate with the best guaranteed value.

use serde::{Deserialize, Serialize};

use crate::core::{Role, Team, TeamPair};

/// Row/column choice over a grid indexed `[a][b]`.
///
/// Cells holding `None` are unavailable and skipped; rows or columns with no
/// available cell are never chosen. Ties keep the earliest index. Returns
/// `None` only when every cell is unavailable.
pub fn first_mover_choice(first_mover: Team, grid: &[Vec<Option<i32>>]) -> Option<(usize, usize)> {
    let rows = grid.len();
    let cols = grid.first().map_or(0, Vec::len);

    match first_mover {
        Team::A => {
            let mut best: Option<(i32, usize, usize)> = None;
            for a in 0..rows {
                let reply = (0..cols)
                    .filter_map(|b| grid[a][b].map(|v| (v, b)))
                    .fold(None, |acc: Option<(i32, usize)>, (v, b)| match acc {
                        Some((current, _)) if current <= v => acc,
                        _ => Some((v, b)),
                    });
                if let Some((value, b)) = reply {
                    if best.map_or(true, |(current, _, _)| value > current) {
                        best = Some((value, a, b));
                    }
                }
            }
            best.map(|(_, a, b)| (a, b))
        }
        Team::B => {
            let mut best: Option<(i32, usize, usize)> = None;
            for b in 0..cols {
                let reply = (0..rows)
                    .filter_map(|a| grid[a][b].map(|v| (v, a)))
                    .fold(None, |acc: Option<(i32, usize)>, (v, a)| match acc {
                        Some((current, _)) if current >= v => acc,
                        _ => Some((v, a)),
                    });
                if let Some((value, a)) = reply {
                    if best.map_or(true, |(current, _, _)| value < current) {
                        best = Some((value, a, b));
                    }
                }
            }
            best.map(|(_, a, b)| (a, b))
        }
    }
}

/// Outcome of resolving the roles of a finished (or partial) draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleResolution {
    /// Guaranteed value of the chosen assignments, A's point of view.
    pub value: i32,
    /// Each picked unit with the role it plays, in pick order.
    pub assignments: TeamPair<Vec<(String, Role)>>,
}

impl RoleResolution {
    /// Role of a picked unit, if it belongs to `team`.
    #[must_use]
    pub fn role_of(&self, team: Team, unit: &str) -> Option<Role> {
        self.assignments[team]
            .iter()
            .find(|(name, _)| name == unit)
            .map(|&(_, role)| role)
    }
}
