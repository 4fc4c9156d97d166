//! Team identification and per-team data storage.
//!
//! A draft is always two-sided. `Team::A` is the maximizing side of every
//! value the engine reports; `Team::B` minimizes.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two drafting teams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Maximizing side.
    #[default]
    A,
    /// Minimizing side.
    B,
}

impl Team {
    /// Both teams, A first.
    pub const BOTH: [Team; 2] = [Team::A, Team::B];

    /// Get the team index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    /// Whether this team maximizes the reported value.
    #[must_use]
    pub const fn is_maximizing(self) -> bool {
        matches!(self, Team::A)
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "Team A"),
            Team::B => write!(f, "Team B"),
        }
    }
}

/// Per-team data with O(1) access by `Team`.
///
/// ```
/// use draft_solver::core::{Team, TeamPair};
///
/// let mut picks: TeamPair<u32> = TeamPair::default();
/// picks[Team::B] += 2;
/// assert_eq!(picks[Team::A], 0);
/// assert_eq!(picks[Team::B], 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamPair<T> {
    data: [T; 2],
}

impl<T> TeamPair<T> {
    /// Create from explicit values for A and B.
    pub const fn new(a: T, b: T) -> Self {
        Self { data: [a, b] }
    }

    /// Create with values from a factory function.
    pub fn from_fn(mut factory: impl FnMut(Team) -> T) -> Self {
        Self {
            data: [factory(Team::A), factory(Team::B)],
        }
    }

    /// Iterate over (Team, &T) pairs, A first.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        Team::BOTH.into_iter().zip(self.data.iter())
    }

    /// Map both values.
    pub fn map<U>(&self, mut f: impl FnMut(Team, &T) -> U) -> TeamPair<U> {
        TeamPair::from_fn(|team| f(team, &self[team]))
    }
}

impl<T> Index<Team> for TeamPair<T> {
    type Output = T;

    fn index(&self, team: Team) -> &T {
        &self.data[team.index()]
    }
}

impl<T> IndexMut<Team> for TeamPair<T> {
    fn index_mut(&mut self, team: Team) -> &mut T {
        &mut self.data[team.index()]
    }
}
