//! Per-team tracking of which roles remain open as units are picked.
//!
//! Picking a unit that can only play one open role closes that role. Picking
//! a flexible unit closes nothing yet: its open options are remembered as a
//! *partial group*. Groups resolve once a set of `n` picked units can only
//! cover `n` roles between them, at which point those roles are closed (a
//! Hall's-theorem matching argument).
//!
//! `RoleAvailability` is a plain value; `after_pick` returns the next state
//! and never mutates, so two teams never share state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{RoleSet, ROLE_COUNT};

/// Open roles and unresolved flexible picks of one team.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleAvailability {
    open: RoleSet,
    partial: SmallVec<[RoleSet; ROLE_COUNT]>,
}

impl Default for RoleAvailability {
    fn default() -> Self {
        Self {
            open: RoleSet::ALL,
            partial: SmallVec::new(),
        }
    }
}

impl RoleAvailability {
    /// State of a team with no picks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay a sequence of picks given each unit's playable roles.
    pub fn from_picks(picks: impl IntoIterator<Item = RoleSet>) -> Self {
        picks
            .into_iter()
            .fold(Self::new(), |state, playable| state.after_pick(playable))
    }

    /// Roles some current or future teammate may still fill.
    #[must_use]
    pub fn open_roles(&self) -> RoleSet {
        self.open
    }

    /// Option sets of picked units whose role is not yet determined.
    #[must_use]
    pub fn partial_groups(&self) -> &[RoleSet] {
        &self.partial
    }

    /// Whether a unit with these playable roles can still join the team.
    ///
    /// Every subset of unresolved picks together with the new unit must be
    /// able to cover distinct roles.
    #[must_use]
    pub fn admits(&self, playable: RoleSet) -> bool {
        let options = playable.intersection(self.open);
        if options.is_empty() {
            return false;
        }
        let groups = self.partial.len();
        (0u32..1 << groups).all(|mask| {
            let union = self.union_of(mask).union(options);
            union.len() > mask.count_ones() as usize
        })
    }

    /// State after picking a unit with these playable roles.
    #[must_use]
    pub fn after_pick(&self, playable: RoleSet) -> Self {
        let options = playable.intersection(self.open);
        let mut next = self.clone();

        if let Some((mask, union)) = self.resolving_combination(options) {
            next.partial = self
                .partial
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) == 0)
                .map(|(_, group)| group.difference(union))
                .collect();
            next.open = next.open.difference(union);
        } else if let Some(role) = options.only() {
            next.open = next.open.without(role);
            for group in &mut next.partial {
                *group = group.without(role);
            }
        } else if options.len() > 1 {
            next.partial.push(options);
        }

        next.settle();
        next
    }

    /// Largest set of partial groups which, together with `options`, covers
    /// exactly one more role than it has members.
    fn resolving_combination(&self, options: RoleSet) -> Option<(u32, RoleSet)> {
        let groups = self.partial.len();
        for size in (1..=groups).rev() {
            for mask in 0u32..1 << groups {
                if mask.count_ones() as usize != size {
                    continue;
                }
                let union = self.union_of(mask).union(options);
                if union.len() == size + 1 {
                    return Some((mask, union));
                }
            }
        }
        None
    }

    fn union_of(&self, mask: u32) -> RoleSet {
        self.partial
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .fold(RoleSet::EMPTY, |acc, (_, group)| acc.union(*group))
    }

    /// Close groups that were narrowed down to a single role.
    fn settle(&mut self) {
        while let Some(pos) = self.partial.iter().position(|g| g.len() <= 1) {
            let group = self.partial.remove(pos);
            if let Some(role) = group.only() {
                self.open = self.open.without(role);
                for other in &mut self.partial {
                    *other = other.without(role);
                }
            }
        }
    }
}
