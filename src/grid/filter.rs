// SPDX-License-Identifier: MPL-2.0
//! The filter engine: pure functions over caller-owned selection state.
//!
//! Selection state is a tagged variant rather than an empty-vs-missing-key
//! convention: `Unset` means "no filter applied yet" (everything visible)
//! and is distinct from an explicitly empty selection (nothing visible).

use super::roles::FilterMode;
use crate::dataset::Dimension;
use std::collections::BTreeSet;

/// Selection state for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Never touched by the user; all values visible.
    #[default]
    Unset,
    /// Explicit subset; may be empty (nothing visible).
    Picked(BTreeSet<String>),
}

impl Selection {
    /// Builds an explicit selection from an iterator of values.
    pub fn picked(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Selection::Picked(values.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Selection::Unset)
    }

    /// Whether a value is selected. `Unset` selects everything.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Selection::Unset => true,
            Selection::Picked(set) => set.contains(value),
        }
    }

    /// Whether this selection is exactly the given single value.
    #[must_use]
    pub fn is_exactly(&self, value: &str) -> bool {
        match self {
            Selection::Unset => false,
            Selection::Picked(set) => set.len() == 1 && set.contains(value),
        }
    }
}

/// The effective visible value set for a dimension, in domain order.
///
/// - `Hide`: the filter has no effect; the full domain is visible.
/// - `Single`: a singleton — the first selected value present in the domain,
///   else the domain's first value. Never empty for a non-empty domain,
///   never an invalid value.
/// - `Multi`: selection ∩ domain; `Unset` means the full domain.
#[must_use]
pub fn effective_values(
    dimension: &Dimension,
    mode: FilterMode,
    selection: &Selection,
) -> Vec<String> {
    match mode {
        FilterMode::Hide => dimension.values().to_vec(),
        FilterMode::Single => {
            let chosen = dimension
                .values()
                .iter()
                .find(|v| match selection {
                    Selection::Unset => false,
                    Selection::Picked(set) => set.contains(*v),
                })
                .or_else(|| dimension.values().first());
            chosen.map(|v| vec![v.clone()]).unwrap_or_default()
        }
        FilterMode::Multi => dimension
            .values()
            .iter()
            .filter(|v| selection.contains(v))
            .cloned()
            .collect(),
    }
}

/// A selection covering the full domain.
#[must_use]
pub fn select_all(dimension: &Dimension) -> Selection {
    Selection::picked(dimension.values().iter().cloned())
}

/// An explicitly empty selection (nothing visible).
#[must_use]
pub fn select_none() -> Selection {
    Selection::Picked(BTreeSet::new())
}

/// Solo toggle: isolates `value`, or restores the full domain when `value`
/// is already the only selected one. This exact toggle is what "click a
/// value label to isolate it, click again to restore all" is built on.
#[must_use]
pub fn solo(dimension: &Dimension, value: &str, current: &Selection) -> Selection {
    if current.is_exactly(value) {
        select_all(dimension)
    } else {
        Selection::picked([value])
    }
}

/// Adds `value` if absent, removes it if present. No minimum-selection
/// constraint; an empty result is legal and means "nothing visible".
///
/// An `Unset` selection behaves as "all selected", so the first toggle of a
/// fresh dimension yields the full domain minus that value.
#[must_use]
pub fn toggle(dimension: &Dimension, current: &Selection, value: &str) -> Selection {
    let mut set = match current {
        Selection::Unset => dimension.values().iter().cloned().collect::<BTreeSet<_>>(),
        Selection::Picked(set) => set.clone(),
    };
    if !set.remove(value) {
        set.insert(value.to_string());
    }
    Selection::Picked(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DimensionKind;

    fn cfg_dimension() -> Dimension {
        Dimension::new("cfg", DimensionKind::Int, ["3", "7", "11"])
    }

    #[test]
    fn hide_mode_returns_full_domain() {
        let dim = cfg_dimension();
        let values = effective_values(&dim, FilterMode::Hide, &select_none());
        assert_eq!(values, ["3", "7", "11"]);
    }

    #[test]
    fn single_mode_returns_selected_value() {
        let dim = cfg_dimension();
        let selection = Selection::picked(["7"]);
        assert_eq!(
            effective_values(&dim, FilterMode::Single, &selection),
            ["7"]
        );
    }

    #[test]
    fn single_mode_falls_back_to_first_value() {
        let dim = cfg_dimension();
        assert_eq!(
            effective_values(&dim, FilterMode::Single, &Selection::Unset),
            ["3"]
        );
        // A selected value outside the domain is never returned.
        let stale = Selection::picked(["99"]);
        assert_eq!(effective_values(&dim, FilterMode::Single, &stale), ["3"]);
    }

    #[test]
    fn multi_mode_intersects_selection_with_domain() {
        let dim = cfg_dimension();
        let selection = Selection::picked(["11", "3", "99"]);
        assert_eq!(
            effective_values(&dim, FilterMode::Multi, &selection),
            ["3", "11"]
        );
    }

    #[test]
    fn multi_mode_unset_means_all_values() {
        let dim = cfg_dimension();
        assert_eq!(
            effective_values(&dim, FilterMode::Multi, &Selection::Unset),
            ["3", "7", "11"]
        );
    }

    #[test]
    fn select_all_then_effective_returns_full_domain() {
        let dim = cfg_dimension();
        let selection = select_all(&dim);
        assert_eq!(
            effective_values(&dim, FilterMode::Multi, &selection),
            ["3", "7", "11"]
        );
    }

    #[test]
    fn select_none_then_effective_returns_empty() {
        let dim = cfg_dimension();
        let selection = select_none();
        assert!(effective_values(&dim, FilterMode::Multi, &selection).is_empty());
        assert!(!selection.is_unset());
    }

    #[test]
    fn solo_isolates_a_value() {
        let dim = cfg_dimension();
        let result = solo(&dim, "7", &Selection::Unset);
        assert_eq!(result, Selection::picked(["7"]));

        let from_multi = solo(&dim, "7", &Selection::picked(["3", "11"]));
        assert_eq!(from_multi, Selection::picked(["7"]));
    }

    #[test]
    fn solo_of_already_soloed_value_restores_all() {
        let dim = cfg_dimension();
        let soloed = Selection::picked(["7"]);
        let result = solo(&dim, "7", &soloed);
        assert_eq!(result, select_all(&dim));
    }

    #[test]
    fn toggle_adds_and_removes() {
        let dim = cfg_dimension();
        let selection = Selection::picked(["3"]);

        let added = toggle(&dim, &selection, "7");
        assert!(added.contains("3") && added.contains("7"));

        let removed = toggle(&dim, &added, "3");
        assert!(!removed.contains("3"));

        // Toggling down to empty is legal.
        let empty = toggle(&dim, &removed, "7");
        assert_eq!(empty, select_none());
    }

    #[test]
    fn toggle_on_unset_removes_from_full_domain() {
        let dim = cfg_dimension();
        let result = toggle(&dim, &Selection::Unset, "7");
        assert_eq!(result, Selection::picked(["3", "11"]));
    }
}
