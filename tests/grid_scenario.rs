// SPDX-License-Identifier: MPL-2.0
//! End-to-end exploration scenario against the public API: a typical
//! seed/step/cfg sweep with one missing combination, per-cell slider
//! overrides, and keyboard arbitration between two live controls.

use grid_lens::dataset::{Artifact, Dataset, Dimension, DimensionKind};
use grid_lens::grid::{builder, CellContent, GridInputs, Role, RoleAssignment};
use grid_lens::keyboard::{Chord, ChordScope, NavKey, OwnershipRegistry};
use std::collections::HashMap;

/// seed in {42, 123} (X), step in {500, 1000} (Y), cfg in {3, 7} (slider,
/// default "3"); the seed=123, step=1000, cfg=3 combination is absent.
fn sweep_dataset() -> Dataset {
    let dimensions = vec![
        Dimension::new("seed", DimensionKind::Int, ["42", "123"]),
        Dimension::new("step", DimensionKind::Int, ["500", "1000"]),
        Dimension::new("cfg", DimensionKind::Int, ["3", "7"]),
    ];
    let tags = |seed: &str, step: &str, cfg: &str| {
        [
            ("seed".to_string(), seed.to_string()),
            ("step".to_string(), step.to_string()),
            ("cfg".to_string(), cfg.to_string()),
        ]
    };
    let artifacts = vec![
        Artifact::new("seed-42_step-500_cfg-3.png", tags("42", "500", "3")),
        Artifact::new("seed-42_step-1000_cfg-3.png", tags("42", "1000", "3")),
        Artifact::new("seed-123_step-500_cfg-3.png", tags("123", "500", "3")),
        Artifact::new("seed-42_step-500_cfg-7.png", tags("42", "500", "7")),
        Artifact::new("seed-123_step-1000_cfg-7.png", tags("123", "1000", "7")),
    ];
    Dataset::new("/data/sweep", dimensions, artifacts).expect("dataset must validate")
}

fn sweep_roles() -> RoleAssignment {
    let mut roles = RoleAssignment::new();
    roles.assign("seed", Role::X);
    roles.assign("step", Role::Y);
    roles.assign("cfg", Role::Slider);
    roles
}

#[test]
fn typical_sweep_renders_three_filled_cells_and_one_placeholder() {
    let dataset = sweep_dataset();
    let roles = sweep_roles();
    let modes = HashMap::new();
    let selections = HashMap::new();
    let overrides = HashMap::new();

    let grid = builder::build(&GridInputs {
        dataset: &dataset,
        roles: &roles,
        modes: &modes,
        selections: &selections,
        slider_overrides: &overrides,
        default_slider_value: Some("3"),
    });

    assert_eq!(grid.x_values.len(), 2);
    assert_eq!(grid.y_values.len(), 2);
    assert_eq!(grid.cells.len(), 4);

    let filled = grid
        .cells
        .iter()
        .filter(|c| matches!(c.content, CellContent::Filled(_)))
        .count();
    let missing = grid
        .cells
        .iter()
        .filter(|c| c.content == CellContent::Missing)
        .count();
    assert_eq!(filled, 3);
    assert_eq!(missing, 1);
}

#[test]
fn overriding_one_cell_slider_changes_only_that_cell() {
    let dataset = sweep_dataset();
    let roles = sweep_roles();
    let modes = HashMap::new();
    let selections = HashMap::new();

    let baseline = builder::build(&GridInputs {
        dataset: &dataset,
        roles: &roles,
        modes: &modes,
        selections: &selections,
        slider_overrides: &HashMap::new(),
        default_slider_value: Some("3"),
    });

    let mut overrides = HashMap::new();
    overrides.insert("42|500".to_string(), "7".to_string());
    let overridden = builder::build(&GridInputs {
        dataset: &dataset,
        roles: &roles,
        modes: &modes,
        selections: &selections,
        slider_overrides: &overrides,
        default_slider_value: Some("3"),
    });

    let changed: Vec<&str> = baseline
        .cells
        .iter()
        .zip(&overridden.cells)
        .filter(|(before, after)| before != after)
        .map(|(before, _)| before.key.as_str())
        .collect();
    assert_eq!(changed, ["42|500"]);

    // The overridden cell resolved to the cfg=7 artifact.
    let cell = overridden.cell_at(0, 0).expect("cell exists");
    assert_eq!(cell.slider_value.as_deref(), Some("7"));
    match cell.content {
        CellContent::Filled(index) => {
            let artifact = dataset.artifact(index).expect("artifact exists");
            assert_eq!(artifact.value("cfg"), Some("7"));
        }
        CellContent::Missing => panic!("expected a filled cell"),
    }
}

#[test]
fn two_scrub_controls_share_the_keyboard_exactly() {
    let mut registry = OwnershipRegistry::new();
    let first = registry.register(ChordScope::Modified);
    let second = registry.register(ChordScope::Modified);
    let chord = Chord {
        key: NavKey::Right,
        modified: true,
    };

    // Exactly one instance handles each dispatched chord.
    let handled_by = registry.route(chord, false).expect("someone handles it");
    let handled_count = [first, second].iter().filter(|&&h| h == handled_by).count();
    assert_eq!(handled_count, 1);
    assert_eq!(handled_by, second);

    // Clicking the other instance transfers ownership.
    registry.claim(first);
    assert_eq!(registry.route(chord, false), Some(first));

    // Deregistering the active instance promotes the remaining one.
    registry.deregister(first);
    assert_eq!(registry.route(chord, false), Some(second));
}
