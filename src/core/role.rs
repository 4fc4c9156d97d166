//! Role identification and compact role sets.
//!
//! ## Role
//!
//! A team fields exactly one unit per role. Roles are numbered `0..ROLE_COUNT`;
//! the engine never interprets them beyond equality.
//!
//! ## RoleSet
//!
//! Bitmask over the five roles. Set algebra is a handful of bit operations,
//! which keeps the role-availability tracker and the search cheap to copy.

use serde::{Deserialize, Serialize};

/// Number of roles on a full team.
pub const ROLE_COUNT: usize = 5;

/// A playable role, `0..ROLE_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Role(u8);

impl Role {
    /// Create a role, returning `None` when out of range.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < ROLE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Get the raw role index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every role in ascending order.
    ///
    /// ```
    /// use draft_solver::core::Role;
    ///
    /// let roles: Vec<_> = Role::all().collect();
    /// assert_eq!(roles.len(), 5);
    /// assert_eq!(roles[4].index(), 4);
    /// ```
    pub fn all() -> impl Iterator<Item = Role> {
        (0..ROLE_COUNT as u8).map(Role)
    }

    const fn bit(self) -> u8 {
        1 << self.0
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Role({})", self.0)
    }
}

/// Set of roles backed by a 5-bit mask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleSet(u8);

impl RoleSet {
    /// The empty set.
    pub const EMPTY: RoleSet = RoleSet(0);

    /// Every role.
    pub const ALL: RoleSet = RoleSet((1 << ROLE_COUNT) - 1);

    /// Set containing a single role.
    #[must_use]
    pub const fn single(role: Role) -> Self {
        Self(role.bit())
    }

    /// Build a set from any role iterator.
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        roles.into_iter().fold(Self::EMPTY, |set, role| set.with(role))
    }

    /// Get the raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    #[must_use]
    pub const fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    #[must_use]
    pub const fn without(self, role: Role) -> Self {
        Self(self.0 & !role.bit())
    }

    #[must_use]
    pub const fn union(self, other: RoleSet) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: RoleSet) -> Self {
        Self(self.0 & other.0)
    }

    #[must_use]
    pub const fn difference(self, other: RoleSet) -> Self {
        Self(self.0 & !other.0)
    }

    #[must_use]
    pub const fn is_subset(self, other: RoleSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// The single member, if the set has exactly one.
    #[must_use]
    pub fn only(self) -> Option<Role> {
        if self.len() == 1 {
            Some(Role(self.0.trailing_zeros() as u8))
        } else {
            None
        }
    }

    /// Iterate over members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::all().filter(move |role| self.contains(*role))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self::from_roles(iter)
    }
}

impl std::fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter().map(Role::index)).finish()
    }
}
