//! Error types.
//!
//! Validation is eager: every error is raised while configuring the engine or
//! at the start of a search call, never from inside the recursion.

use thiserror::Error;

use super::team::Team;

/// Input rejected before any search work.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("role {role} for unit '{unit}' is outside 0..=4")]
    RoleOutOfRange { unit: String, role: u8 },

    #[error("value {value} for unit '{unit}' is outside 0..=1000")]
    ValueOutOfRange { unit: String, value: i32 },

    #[error("value {0} is not a two-decimal fixed-point number")]
    NotFixedPoint(f64),

    #[error("duplicate role reward for unit '{unit}' in role {role}")]
    DuplicateRoleReward { unit: String, role: u8 },

    #[error("unit '{unit}' has no role reward for role {role}")]
    UnknownUnitRole { unit: String, role: u8 },

    #[error("unit '{0}' has no registered role reward")]
    UnknownUnit(String),

    #[error("{kind} reward #{index} is malformed: {reason}")]
    MalformedReward {
        kind: &'static str,
        index: usize,
        reason: String,
    },

    #[error("{kind} reward #{index} duplicates reward #{previous} once translated")]
    DuplicateTranslatedReward {
        kind: &'static str,
        index: usize,
        previous: usize,
    },

    #[error("draft format is invalid: {0}")]
    InvalidFormat(String),

    #[error("unit '{0}' appears more than once in the history")]
    RepeatedUnit(String),

    #[error("history of {history} selections leaves no stage of the {stages}-stage format to search")]
    HistoryTooLong { history: usize, stages: usize },

    #[error("stage {stage} is outside the {stages}-stage format")]
    StageOutOfRange { stage: usize, stages: usize },

    #[error("{team} picks admit no legal role assignment")]
    NoLegalAssignment { team: Team },

    #[error("no legal selection exists for {team} at stage {stage}")]
    NoLegalSelection { team: Team, stage: usize },

    #[error("transposition table keys cover {found} unit-role ids, engine has {expected}")]
    KeyShapeMismatch { expected: usize, found: usize },

    #[error("transposition table file has version {found}, expected {expected}")]
    TableVersion { expected: u32, found: u32 },
}

/// A fixed engine capacity would be exceeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{what} count {requested} exceeds engine capacity {limit}")]
pub struct CapacityError {
    pub what: &'static str,
    pub limit: usize,
    pub requested: usize,
}

impl CapacityError {
    /// Fail when `requested` is above `limit`.
    pub fn check(what: &'static str, limit: usize, requested: usize) -> Result<(), CapacityError> {
        if requested > limit {
            Err(CapacityError {
                what,
                limit,
                requested,
            })
        } else {
            Ok(())
        }
    }
}

/// Umbrella error for every public engine operation.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("capacity error: {0}")]
    Capacity(#[from] CapacityError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_check() {
        assert!(CapacityError::check("synergy", 4, 4).is_ok());

        let err = CapacityError::check("synergy", 4, 5).unwrap_err();
        assert_eq!(err.requested, 5);
        assert_eq!(err.to_string(), "synergy count 5 exceeds engine capacity 4");
    }

    #[test]
    fn test_draft_error_from_validation() {
        let err: DraftError = ValidationError::UnknownUnit("Krul".into()).into();
        assert!(matches!(err, DraftError::Validation(ValidationError::UnknownUnit(_))));
        assert!(err.to_string().contains("Krul"));
    }

    #[test]
    fn test_no_legal_assignment_message() {
        let err = ValidationError::NoLegalAssignment { team: Team::B };
        assert_eq!(err.to_string(), "Team B picks admit no legal role assignment");
    }
}
