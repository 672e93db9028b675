// SPDX-License-Identifier: MPL-2.0
//! Grid roles and filter modes for dimensions.

use crate::dataset::Dimension;
use std::collections::HashMap;
use std::fmt;

/// The grid function assigned to a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Columns of the grid.
    X,
    /// Rows of the grid.
    Y,
    /// The scrubbable slider dimension.
    Slider,
    /// Unassigned; a candidate for filtering.
    #[default]
    None,
}

impl Role {
    /// All roles, in pick-list order.
    pub const ALL: [Role; 4] = [Role::X, Role::Y, Role::Slider, Role::None];

    /// Whether this role claims an exclusive slot (X, Y or Slider).
    #[must_use]
    pub fn is_exclusive(self) -> bool {
        !matches!(self, Role::None)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::X => write!(f, "X axis"),
            Role::Y => write!(f, "Y axis"),
            Role::Slider => write!(f, "Slider"),
            Role::None => write!(f, "Filter"),
        }
    }
}

/// How an unassigned dimension restricts visible artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Dimension ignored entirely; all values implicitly visible.
    Hide,
    /// Exactly one value visible at a time (dropdown semantics).
    Single,
    /// Any subset visible (checkbox semantics), defaulting to all.
    #[default]
    Multi,
}

impl FilterMode {
    /// All modes, in pick-list order.
    pub const ALL: [FilterMode; 3] = [FilterMode::Hide, FilterMode::Single, FilterMode::Multi];
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Hide => write!(f, "Hidden"),
            FilterMode::Single => write!(f, "Single"),
            FilterMode::Multi => write!(f, "Multi"),
        }
    }
}

/// Per-dimension role assignment.
///
/// Invariant: at most one dimension holds each of X, Y and Slider. Assigning
/// an exclusive role steals it from its previous holder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoleAssignment {
    roles: HashMap<String, Role>,
}

impl RoleAssignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Role of the named dimension; unassigned dimensions are `Role::None`.
    #[must_use]
    pub fn role(&self, dimension: &str) -> Role {
        self.roles.get(dimension).copied().unwrap_or_default()
    }

    /// Assigns a role, displacing any previous holder of an exclusive role.
    pub fn assign(&mut self, dimension: &str, role: Role) {
        if role.is_exclusive() {
            if let Some(previous) = self.holder(role) {
                let previous = previous.to_string();
                self.roles.insert(previous, Role::None);
            }
        }
        self.roles.insert(dimension.to_string(), role);
    }

    /// Dimension currently holding the given exclusive role, if any.
    #[must_use]
    pub fn holder(&self, role: Role) -> Option<&str> {
        if !role.is_exclusive() {
            return None;
        }
        self.roles
            .iter()
            .find(|(_, r)| **r == role)
            .map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn x_dimension(&self) -> Option<&str> {
        self.holder(Role::X)
    }

    #[must_use]
    pub fn y_dimension(&self) -> Option<&str> {
        self.holder(Role::Y)
    }

    #[must_use]
    pub fn slider_dimension(&self) -> Option<&str> {
        self.holder(Role::Slider)
    }

    /// Discards assignments referencing dimensions that no longer exist,
    /// e.g. after a dataset reload. Stale state must never be applied.
    pub fn retain_known(&mut self, known: &[Dimension]) {
        self.roles
            .retain(|name, _| known.iter().any(|d| d.name() == name));
    }

    pub fn clear(&mut self) {
        self.roles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DimensionKind;

    #[test]
    fn unassigned_dimension_defaults_to_none() {
        let roles = RoleAssignment::new();
        assert_eq!(roles.role("seed"), Role::None);
        assert_eq!(roles.x_dimension(), None);
    }

    #[test]
    fn assigning_x_displaces_previous_holder() {
        let mut roles = RoleAssignment::new();
        roles.assign("seed", Role::X);
        roles.assign("step", Role::X);

        assert_eq!(roles.role("step"), Role::X);
        assert_eq!(roles.role("seed"), Role::None);
        assert_eq!(roles.x_dimension(), Some("step"));
    }

    #[test]
    fn distinct_exclusive_roles_coexist() {
        let mut roles = RoleAssignment::new();
        roles.assign("seed", Role::X);
        roles.assign("step", Role::Y);
        roles.assign("cfg", Role::Slider);

        assert_eq!(roles.x_dimension(), Some("seed"));
        assert_eq!(roles.y_dimension(), Some("step"));
        assert_eq!(roles.slider_dimension(), Some("cfg"));
    }

    #[test]
    fn assigning_none_frees_the_slot() {
        let mut roles = RoleAssignment::new();
        roles.assign("seed", Role::X);
        roles.assign("seed", Role::None);
        assert_eq!(roles.x_dimension(), None);
    }

    #[test]
    fn retain_known_discards_stale_names() {
        let mut roles = RoleAssignment::new();
        roles.assign("seed", Role::X);
        roles.assign("old_dim", Role::Y);

        let known = [Dimension::new("seed", DimensionKind::Int, ["42"])];
        roles.retain_known(&known);

        assert_eq!(roles.x_dimension(), Some("seed"));
        assert_eq!(roles.y_dimension(), None);
    }
}
