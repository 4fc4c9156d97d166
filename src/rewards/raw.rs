//! Raw reward input.
//!
//! Rewards arrive in terms of unit names and allowed roles. Values are
//! fixed-point integers in `0..=1000` (two-decimal floats scaled by 100).
//! `value_a` is credited when team A owns the combination, `value_b` when
//! team B does.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Role, RoleSet, ValidationError};

/// Largest accepted reward value.
pub const MAX_REWARD_VALUE: i32 = 1000;

/// Validate a single reward value.
pub fn validate_value(unit: &str, value: i32) -> Result<i32, ValidationError> {
    if (0..=MAX_REWARD_VALUE).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::ValueOutOfRange {
            unit: unit.to_owned(),
            value,
        })
    }
}

/// Validate a raw role index.
pub fn validate_role(unit: &str, role: u8) -> Result<Role, ValidationError> {
    Role::new(role).ok_or_else(|| ValidationError::RoleOutOfRange {
        unit: unit.to_owned(),
        role,
    })
}

/// Scale a two-decimal float into the engine's fixed-point range.
///
/// ```
/// use draft_solver::rewards::fixed_point;
///
/// assert_eq!(fixed_point(2.5).unwrap(), 250);
/// assert!(fixed_point(0.125).is_err());
/// assert!(fixed_point(10.01).is_err());
/// ```
pub fn fixed_point(value: f64) -> Result<i32, ValidationError> {
    let scaled = value * 100.0;
    let rounded = scaled.round();
    if !scaled.is_finite() || (scaled - rounded).abs() > 1e-6 {
        return Err(ValidationError::NotFixedPoint(value));
    }
    if !(0.0..=f64::from(MAX_REWARD_VALUE)).contains(&rounded) {
        return Err(ValidationError::NotFixedPoint(value));
    }
    Ok(rounded as i32)
}

/// Per-role value of a single unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRoleReward {
    pub unit: String,
    pub role: u8,
    pub value_a: i32,
    pub value_b: i32,
}

impl RawRoleReward {
    #[must_use]
    pub fn new(unit: impl Into<String>, role: u8, value_a: i32, value_b: i32) -> Self {
        Self {
            unit: unit.into(),
            role,
            value_a,
            value_b,
        }
    }

    /// Check role and value ranges.
    pub fn validate(&self) -> Result<Role, ValidationError> {
        validate_value(&self.unit, self.value_a)?;
        validate_value(&self.unit, self.value_b)?;
        validate_role(&self.unit, self.role)
    }
}

/// One unit of a combination reward, with the roles it may fill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEntry {
    pub unit: String,
    pub roles: Vec<u8>,
}

impl RewardEntry {
    #[must_use]
    pub fn new(unit: impl Into<String>, roles: impl IntoIterator<Item = u8>) -> Self {
        Self {
            unit: unit.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Allowed roles in input order, validated and without repeats.
    pub fn allowed_roles(&self) -> Result<SmallVec<[Role; 5]>, ValidationError> {
        let mut seen = RoleSet::EMPTY;
        let mut roles = SmallVec::new();
        for &raw in &self.roles {
            let role = validate_role(&self.unit, raw)?;
            if !seen.contains(role) {
                seen = seen.with(role);
                roles.push(role);
            }
        }
        Ok(roles)
    }

    /// Whether this entry covers the given unit in the given role.
    #[must_use]
    pub fn applies_to(&self, unit: &str, role: Role) -> bool {
        self.unit == unit && self.roles.iter().any(|&r| r as usize == role.index())
    }
}

/// Bonus for one team fielding every listed unit together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSynergyReward {
    pub entries: Vec<RewardEntry>,
    pub value_a: i32,
    pub value_b: i32,
}

impl RawSynergyReward {
    #[must_use]
    pub fn new(entries: Vec<RewardEntry>, value_a: i32, value_b: i32) -> Self {
        Self {
            entries,
            value_a,
            value_b,
        }
    }

    /// Whether any entry covers the given unit in the given role.
    #[must_use]
    pub fn applies_to(&self, unit: &str, role: Role) -> bool {
        self.entries.iter().any(|e| e.applies_to(unit, role))
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), ValidationError> {
        let label = self.entries.first().map_or("synergy", |e| e.unit.as_str());
        validate_value(label, self.value_a)?;
        validate_value(label, self.value_b)?;
        if self.entries.len() < 2 {
            return Err(malformed("synergy", index, "needs at least two units"));
        }
        check_distinct_units("synergy", index, self.entries.iter())
    }
}

/// Bonus for one team fielding `own` while the other team fields `opposing`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCounterReward {
    pub own: Vec<RewardEntry>,
    pub opposing: Vec<RewardEntry>,
    pub value_a: i32,
    pub value_b: i32,
}

impl RawCounterReward {
    #[must_use]
    pub fn new(own: Vec<RewardEntry>, opposing: Vec<RewardEntry>, value_a: i32, value_b: i32) -> Self {
        Self {
            own,
            opposing,
            value_a,
            value_b,
        }
    }

    /// Whether any entry on either side covers the given unit in the given role.
    #[must_use]
    pub fn applies_to(&self, unit: &str, role: Role) -> bool {
        self.own
            .iter()
            .chain(&self.opposing)
            .any(|e| e.applies_to(unit, role))
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), ValidationError> {
        let label = self.own.first().map_or("counter", |e| e.unit.as_str());
        validate_value(label, self.value_a)?;
        validate_value(label, self.value_b)?;
        if self.own.is_empty() || self.opposing.is_empty() {
            return Err(malformed("counter", index, "needs at least one unit per side"));
        }
        // A unit can only be drafted once, so it can't sit on both sides either.
        check_distinct_units("counter", index, self.own.iter().chain(&self.opposing))
    }
}

fn malformed(kind: &'static str, index: usize, reason: impl Into<String>) -> ValidationError {
    ValidationError::MalformedReward {
        kind,
        index,
        reason: reason.into(),
    }
}

fn check_distinct_units<'a>(
    kind: &'static str,
    index: usize,
    entries: impl Iterator<Item = &'a RewardEntry>,
) -> Result<(), ValidationError> {
    let mut seen: SmallVec<[&str; 8]> = SmallVec::new();
    for entry in entries {
        if seen.contains(&entry.unit.as_str()) {
            return Err(malformed(kind, index, format!("unit '{}' listed twice", entry.unit)));
        }
        if entry.roles.is_empty() {
            return Err(malformed(kind, index, format!("unit '{}' allows no role", entry.unit)));
        }
        seen.push(&entry.unit);
    }
    Ok(())
}
