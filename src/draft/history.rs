//! Expansion of a name-level history into concrete id sets.
//!
//! A history lists unit names in stage order. Bans carry no role, so each
//! banned unit becomes its lowest id (every variant of a banned unit is gone
//! anyway). Picks of flexible units are ambiguous: every assignment of
//! distinct roles to a side's picks yields one candidate team.

use smallvec::SmallVec;

use crate::core::{Role, RoleSet, Team, TeamPair, ValidationError};
use crate::rewards::{IdTuple, IdentityTable, UnitIndex, UnitRoleId};

use super::format::{DraftFormat, Selection};

/// A history resolved against one configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandedHistory {
    /// Every legal id set per side, each sorted ascending.
    pub candidates: TeamPair<Vec<IdTuple>>,
    /// One id per banned unit.
    pub banned: Vec<UnitRoleId>,
    /// Picked units per side in history order.
    pub picks: TeamPair<Vec<UnitIndex>>,
    /// Every unit the history has used, picked or banned.
    pub used: Vec<UnitIndex>,
}

impl ExpandedHistory {
    /// Number of (A, B) candidate combinations.
    #[must_use]
    pub fn combination_count(&self) -> usize {
        self.candidates[Team::A].len() * self.candidates[Team::B].len()
    }
}

/// Partition `history` by stage and expand every side's legal role assignments.
///
/// `history` may cover the whole format. Fails on unknown or repeated units,
/// and when a side's picks admit no distinct-role assignment.
pub fn expand_history<S: AsRef<str>>(
    identities: &IdentityTable,
    format: &DraftFormat,
    history: &[S],
) -> Result<ExpandedHistory, ValidationError> {
    if history.len() > format.len() {
        return Err(ValidationError::HistoryTooLong {
            history: history.len(),
            stages: format.len(),
        });
    }

    let mut expanded = ExpandedHistory::default();
    for (index, name) in history.iter().enumerate() {
        let name = name.as_ref();
        let unit = identities.require_unit(name)?;
        if expanded.used.contains(&unit) {
            return Err(ValidationError::RepeatedUnit(name.to_owned()));
        }
        expanded.used.push(unit);

        let stage = format.stage(index);
        match stage.selection {
            Selection::Ban => expanded.banned.push(identities.representative(unit)),
            Selection::Pick => expanded.picks[stage.team].push(unit),
        }
    }

    for team in Team::BOTH {
        let candidates = candidate_teams(identities, &expanded.picks[team]);
        if candidates.is_empty() {
            return Err(ValidationError::NoLegalAssignment { team });
        }
        expanded.candidates[team] = candidates;
    }

    Ok(expanded)
}

/// Every distinct-role assignment of `units`, as sorted id sets.
pub fn candidate_teams(identities: &IdentityTable, units: &[UnitIndex]) -> Vec<IdTuple> {
    let playable: SmallVec<[RoleSet; 5]> = units.iter().map(|&u| identities.playable_roles(u)).collect();
    let mut roles = SmallVec::new();
    let mut assignments = Vec::new();
    assign_roles(&playable, RoleSet::EMPTY, &mut roles, &mut assignments);

    assignments
        .into_iter()
        .map(|chosen| {
            let mut ids: IdTuple = units
                .iter()
                .zip(&chosen)
                .filter_map(|(&unit, &role)| {
                    identities
                        .unit_ids(unit)
                        .iter()
                        .copied()
                        .find(|&id| identities.get(id).role == role)
                })
                .collect();
            ids.sort_unstable();
            ids
        })
        .collect()
}

/// Depth-first enumeration of distinct-role choices, first unit varying slowest.
fn assign_roles(
    playable: &[RoleSet],
    taken: RoleSet,
    current: &mut SmallVec<[Role; 5]>,
    out: &mut Vec<SmallVec<[Role; 5]>>,
) {
    let depth = current.len();
    if depth == playable.len() {
        out.push(current.clone());
        return;
    }
    for role in playable[depth].difference(taken).iter() {
        current.push(role);
        assign_roles(playable, taken.with(role), current, out);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::RawRoleReward;

    use Selection::{Ban, Pick};
    use Team::{A, B};

    fn table() -> IdentityTable {
        let rewards = vec![
            RawRoleReward::new("Krul", 1, 200, 200),
            RawRoleReward::new("Krul", 4, 0, 200),
            RawRoleReward::new("Taka", 0, 300, 0),
            RawRoleReward::new("Rona", 3, 0, 100),
            RawRoleReward::new("Joule", 0, 150, 150),
            RawRoleReward::new("Joule", 1, 100, 100),
        ];
        IdentityTable::build(&rewards, &[], &[], 64).unwrap()
    }

    fn format() -> DraftFormat {
        DraftFormat::compile(&[(A, Ban), (B, Ban), (A, Pick), (B, Pick), (B, Pick), (A, Pick)]).unwrap()
    }

    #[test]
    fn test_ban_resolves_to_single_id() {
        let table = table();
        let expanded = expand_history(&table, &format(), &["Krul"]).unwrap();

        assert_eq!(expanded.banned, vec![table.representative(table.unit("Krul").unwrap())]);
        assert_eq!(expanded.combination_count(), 1);
        assert_eq!(expanded.candidates[A], vec![IdTuple::new()]);
    }

    #[test]
    fn test_flex_pick_multiplies_candidates() {
        let table = table();
        let expanded = expand_history(&table, &format(), &["Rona", "Taka", "Krul"]).unwrap();

        assert_eq!(expanded.candidates[A].len(), 2);
        assert_eq!(expanded.candidates[B].len(), 1);
        assert_eq!(expanded.banned.len(), 2);
    }

    #[test]
    fn test_both_sides_flex() {
        let table = table();
        let expanded = expand_history(&table, &format(), &["Rona", "Taka", "Krul", "Joule"]).unwrap();

        assert_eq!(expanded.candidates[A].len(), 2);
        assert_eq!(expanded.candidates[B].len(), 2);
        assert_eq!(expanded.combination_count(), 4);
        assert_eq!(expanded.picks[B], vec![table.unit("Joule").unwrap()]);
    }

    #[test]
    fn test_unknown_and_repeated_units() {
        let table = table();

        let err = expand_history(&table, &format(), &["Nobody"]).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownUnit(_)));

        let err = expand_history(&table, &format(), &["Rona", "Rona"]).unwrap_err();
        assert!(matches!(err, ValidationError::RepeatedUnit(_)));
    }

    #[test]
    fn test_candidate_assignments_are_distinct() {
        let table = table();
        let units = [table.unit("Krul").unwrap(), table.unit("Joule").unwrap()];
        let candidates = candidate_teams(&table, &units);

        // Krul@1+Joule@0, Krul@4+Joule@0, Krul@4+Joule@1.
        assert_eq!(candidates.len(), 3);
        for team in &candidates {
            let roles: RoleSet = team.iter().map(|&id| table.get(id).role).collect();
            assert_eq!(roles.len(), 2);
            assert!(team.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_no_legal_assignment() {
        let rewards = vec![
            RawRoleReward::new("Taka", 0, 1, 1),
            RawRoleReward::new("Saw", 0, 1, 1),
            RawRoleReward::new("Rona", 3, 1, 1),
        ];
        let narrow = IdentityTable::build(&rewards, &[], &[], 8).unwrap();
        let format = DraftFormat::compile(&[(A, Pick), (B, Ban), (A, Pick)]).unwrap();

        let err = expand_history(&narrow, &format, &["Taka", "Rona", "Saw"]).unwrap_err();
        assert_eq!(err, ValidationError::NoLegalAssignment { team: A });
    }

    #[test]
    fn test_history_too_long() {
        let table = table();
        let format = DraftFormat::compile(&[(A, Pick)]).unwrap();
        let err = expand_history(&table, &format, &["Taka", "Rona"]).unwrap_err();
        assert!(matches!(err, ValidationError::HistoryTooLong { .. }));
    }
}
