//! Draft turn order.
//!
//! A format is an ordered list of (team, pick-or-ban) stages. Two consecutive
//! stages of the same team form a *double* stage: the team acts twice in a
//! row, so a caller asking for advice at the first of the two gets two
//! recommendations. The combined kind is attached to the first stage; the
//! second keeps its plain kind.

use serde::{Deserialize, Serialize};

use crate::core::{Team, ValidationError, ROLE_COUNT};

/// What a single stage does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    Pick,
    Ban,
}

/// Compiled stage kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    Pick,
    Ban,
    PickPick,
    PickBan,
    BanPick,
    BanBan,
}

impl StageKind {
    fn plain(selection: Selection) -> Self {
        match selection {
            Selection::Pick => StageKind::Pick,
            Selection::Ban => StageKind::Ban,
        }
    }

    fn combined(first: Selection, second: Selection) -> Self {
        match (first, second) {
            (Selection::Pick, Selection::Pick) => StageKind::PickPick,
            (Selection::Pick, Selection::Ban) => StageKind::PickBan,
            (Selection::Ban, Selection::Pick) => StageKind::BanPick,
            (Selection::Ban, Selection::Ban) => StageKind::BanBan,
        }
    }

    /// Whether the team acts twice starting at this stage.
    #[must_use]
    pub const fn is_double(self) -> bool {
        !matches!(self, StageKind::Pick | StageKind::Ban)
    }
}

/// One compiled turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftStage {
    pub team: Team,
    /// What this stage itself selects.
    pub selection: Selection,
    pub kind: StageKind,
}

/// A compiled draft format.
///
/// ```
/// use draft_solver::core::Team;
/// use draft_solver::draft::{DraftFormat, Selection, StageKind};
///
/// let format = DraftFormat::compile(&[
///     (Team::A, Selection::Ban),
///     (Team::B, Selection::Ban),
///     (Team::B, Selection::Pick),
///     (Team::A, Selection::Pick),
/// ])
/// .unwrap();
///
/// assert_eq!(format.stage(1).kind, StageKind::BanPick);
/// assert_eq!(format.stage(2).kind, StageKind::Pick);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFormat {
    stages: Vec<DraftStage>,
}

impl DraftFormat {
    /// Compile raw stages, merging same-team neighbours into double kinds.
    ///
    /// Rejects empty formats, runs of three or more same-team stages, and
    /// formats giving a team more picks than there are roles.
    pub fn compile(raw: &[(Team, Selection)]) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::InvalidFormat("no stages".into()));
        }

        for team in Team::BOTH {
            let picks = raw
                .iter()
                .filter(|(t, s)| *t == team && *s == Selection::Pick)
                .count();
            if picks > ROLE_COUNT {
                return Err(ValidationError::InvalidFormat(format!(
                    "{team} has {picks} picks but a team has only {ROLE_COUNT} roles"
                )));
            }
        }

        let mut stages = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            let (team, selection) = raw[i];
            match raw.get(i + 1) {
                Some(&(next_team, next_selection)) if next_team == team => {
                    if raw.get(i + 2).is_some_and(|&(t, _)| t == team) {
                        return Err(ValidationError::InvalidFormat(format!(
                            "{team} acts three times in a row from stage {i}"
                        )));
                    }
                    stages.push(DraftStage {
                        team,
                        selection,
                        kind: StageKind::combined(selection, next_selection),
                    });
                    stages.push(DraftStage {
                        team,
                        selection: next_selection,
                        kind: StageKind::plain(next_selection),
                    });
                    i += 2;
                }
                _ => {
                    stages.push(DraftStage {
                        team,
                        selection,
                        kind: StageKind::plain(selection),
                    });
                    i += 1;
                }
            }
        }

        Ok(Self { stages })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Get a stage by index.
    #[inline]
    #[must_use]
    pub fn stage(&self, index: usize) -> &DraftStage {
        &self.stages[index]
    }

    #[must_use]
    pub fn stages(&self) -> &[DraftStage] {
        &self.stages
    }

    /// Picks a team makes over the whole draft.
    #[must_use]
    pub fn picks_of(&self, team: Team) -> usize {
        self.stages
            .iter()
            .filter(|s| s.team == team && s.selection == Selection::Pick)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use Selection::{Ban, Pick};
    use Team::{A, B};

    #[test]
    fn test_alternating_stays_plain() {
        let format = DraftFormat::compile(&[(A, Pick), (B, Pick), (A, Ban), (B, Ban)]).unwrap();
        assert!(format.stages().iter().all(|s| !s.kind.is_double()));
        assert_eq!(format.len(), 4);
    }

    #[test]
    fn test_double_kinds() {
        let format = DraftFormat::compile(&[
            (A, Pick),
            (B, Pick),
            (B, Pick),
            (A, Ban),
            (A, Pick),
            (B, Ban),
            (B, Ban),
            (A, Pick),
            (A, Ban),
        ])
        .unwrap();

        let kinds: Vec<_> = format.stages().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StageKind::Pick,
                StageKind::PickPick,
                StageKind::Pick,
                StageKind::BanPick,
                StageKind::Pick,
                StageKind::BanBan,
                StageKind::Ban,
                StageKind::PickBan,
                StageKind::Ban,
            ]
        );
        assert_eq!(format.stage(3).selection, Ban);
        assert_eq!(format.stage(4).selection, Pick);
    }

    #[test]
    fn test_triple_rejected() {
        let err = DraftFormat::compile(&[(A, Pick), (B, Pick), (B, Pick), (B, Ban)]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat(_)));
    }

    #[test]
    fn test_too_many_picks_rejected() {
        let raw: Vec<_> = (0..6).flat_map(|_| [(A, Pick), (B, Ban)]).collect();
        assert!(DraftFormat::compile(&raw).is_err());
        assert!(DraftFormat::compile(&[]).is_err());
    }

    #[test]
    fn test_picks_of() {
        let format = DraftFormat::compile(&[(A, Ban), (B, Pick), (A, Pick), (B, Pick)]).unwrap();
        assert_eq!(format.picks_of(A), 1);
        assert_eq!(format.picks_of(B), 2);
    }
}
