// SPDX-License-Identifier: MPL-2.0
//! The grid builder: maps the artifact collection onto a 2-axis grid under
//! the current roles, filters and slider overrides.
//!
//! Building is deterministic and pure. A coordinate tuple with zero or more
//! than one matching artifact yields a `Missing` cell — a data-consistency
//! signal rendered as a placeholder, never an error.

use super::filter::{self, Selection};
use super::roles::{FilterMode, Role, RoleAssignment};
use crate::dataset::{Artifact, Dataset, Dimension};
use std::collections::HashMap;

pub const CELL_KEY_DELIMITER: char = '|';

/// Composite identifier of a grid cell from its axis values; an unassigned
/// axis contributes an empty slot.
#[must_use]
pub fn cell_key(x: Option<&str>, y: Option<&str>) -> String {
    format!(
        "{}{}{}",
        x.unwrap_or(""),
        CELL_KEY_DELIMITER,
        y.unwrap_or("")
    )
}

/// What a cell resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    /// Index of the unique matching artifact in `Dataset::artifacts`.
    Filled(usize),
    /// No unique match; rendered as a placeholder in the same slot.
    Missing,
}

/// One grid cell, emitted exactly once per visible (x, y) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub x: Option<String>,
    pub y: Option<String>,
    pub key: String,
    /// The slider value this cell resolved to, when a slider dimension is
    /// assigned.
    pub slider_value: Option<String>,
    pub content: CellContent,
}

/// Inputs to a grid build. Selection state and overrides are owned by the
/// caller and consumed read-only.
#[derive(Debug, Clone, Copy)]
pub struct GridInputs<'a> {
    pub dataset: &'a Dataset,
    pub roles: &'a RoleAssignment,
    pub modes: &'a HashMap<String, FilterMode>,
    pub selections: &'a HashMap<String, Selection>,
    pub slider_overrides: &'a HashMap<String, String>,
    pub default_slider_value: Option<&'a str>,
}

/// The built grid. Cells are row-major: all columns of the first visible Y
/// value, then the next row, matching the axis dimensions' value order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    pub x_dimension: Option<String>,
    pub y_dimension: Option<String>,
    pub slider_dimension: Option<String>,
    pub x_values: Vec<String>,
    pub y_values: Vec<String>,
    pub cells: Vec<Cell>,
    /// Flat display mode: artifact indices matching every non-axis filter,
    /// used when neither axis is assigned.
    pub flat: Vec<usize>,
}

impl Grid {
    /// Whether the grid is in flat display mode (no axis assigned).
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.x_dimension.is_none() && self.y_dimension.is_none()
    }

    /// Number of cell columns (1 when only Y is assigned).
    #[must_use]
    pub fn column_count(&self) -> usize {
        if self.x_dimension.is_some() {
            self.x_values.len()
        } else {
            1
        }
    }

    /// Number of cell rows (1 when only X is assigned).
    #[must_use]
    pub fn row_count(&self) -> usize {
        if self.y_dimension.is_some() {
            self.y_values.len()
        } else {
            1
        }
    }

    #[must_use]
    pub fn cell_at(&self, column: usize, row: usize) -> Option<&Cell> {
        if column >= self.column_count() {
            return None;
        }
        self.cells.get(row * self.column_count() + column)
    }

    /// Artifact indices in display order: filled cells row-major, or the
    /// flat listing. This is the lightbox navigation order.
    #[must_use]
    pub fn navigation_order(&self) -> Vec<usize> {
        if self.is_flat() {
            self.flat.clone()
        } else {
            self.cells
                .iter()
                .filter_map(|cell| match cell.content {
                    CellContent::Filled(index) => Some(index),
                    CellContent::Missing => None,
                })
                .collect()
        }
    }
}

const UNSET: Selection = Selection::Unset;

/// Builds the grid for the given inputs.
pub fn build(inputs: &GridInputs<'_>) -> Grid {
    let dataset = inputs.dataset;
    let x_dim = resolve_axis(dataset, inputs.roles.x_dimension());
    let y_dim = resolve_axis(dataset, inputs.roles.y_dimension());
    let slider_dim = resolve_axis(dataset, inputs.roles.slider_dimension());

    // Effective sets for every unassigned dimension; one rule ("selection
    // intersected with domain") for axis and non-axis dimensions alike.
    let constraints: Vec<(&Dimension, Vec<String>)> = dataset
        .dimensions()
        .iter()
        .filter(|dim| inputs.roles.role(dim.name()) == Role::None)
        .map(|dim| {
            let mode = inputs.modes.get(dim.name()).copied().unwrap_or_default();
            let selection = inputs.selections.get(dim.name()).unwrap_or(&UNSET);
            (dim, filter::effective_values(dim, mode, selection))
        })
        .collect();

    let mut grid = Grid {
        x_dimension: x_dim.map(|d| d.name().to_string()),
        y_dimension: y_dim.map(|d| d.name().to_string()),
        slider_dimension: slider_dim.map(|d| d.name().to_string()),
        ..Grid::default()
    };

    if x_dim.is_none() && y_dim.is_none() {
        grid.flat = dataset
            .artifacts()
            .iter()
            .enumerate()
            .filter(|(_, artifact)| matches_constraints(artifact, &constraints))
            .map(|(index, _)| index)
            .collect();
        return grid;
    }

    grid.x_values = x_dim.map(|d| axis_values(d, inputs)).unwrap_or_default();
    grid.y_values = y_dim.map(|d| axis_values(d, inputs)).unwrap_or_default();

    // Default slider value: the supplied default when still in the domain,
    // else the slider dimension's first value.
    let default_slider = slider_dim.and_then(|dim| {
        inputs
            .default_slider_value
            .filter(|v| dim.contains(v))
            .or(dim.first_value())
    });

    let columns: Vec<Option<&str>> = match x_dim {
        Some(_) => grid.x_values.iter().map(|v| Some(v.as_str())).collect(),
        None => vec![None],
    };
    let rows: Vec<Option<&str>> = match y_dim {
        Some(_) => grid.y_values.iter().map(|v| Some(v.as_str())).collect(),
        None => vec![None],
    };

    let mut cells = Vec::with_capacity(rows.len() * columns.len());
    for y in &rows {
        for x in &columns {
            let key = cell_key(*x, *y);
            let slider_value = slider_dim.and_then(|dim| {
                inputs
                    .slider_overrides
                    .get(&key)
                    .filter(|v| dim.contains(v))
                    .map(String::as_str)
                    .or(default_slider)
                    .map(str::to_string)
            });

            let content = match_cell(
                dataset,
                x_dim.map(Dimension::name).zip(*x),
                y_dim.map(Dimension::name).zip(*y),
                slider_dim.map(Dimension::name).zip(slider_value.as_deref()),
                &constraints,
            );

            cells.push(Cell {
                x: x.map(str::to_string),
                y: y.map(str::to_string),
                key,
                slider_value,
                content,
            });
        }
    }
    grid.cells = cells;
    grid
}

fn resolve_axis<'a>(dataset: &'a Dataset, name: Option<&str>) -> Option<&'a Dimension> {
    name.and_then(|n| dataset.dimension(n))
}

/// Visible values of an axis dimension: its own selection intersected with
/// its domain, order preserved. No filter state means the full domain.
fn axis_values(dimension: &Dimension, inputs: &GridInputs<'_>) -> Vec<String> {
    let selection = inputs
        .selections
        .get(dimension.name())
        .unwrap_or(&UNSET);
    filter::effective_values(dimension, FilterMode::Multi, selection)
}

fn matches_constraints(artifact: &Artifact, constraints: &[(&Dimension, Vec<String>)]) -> bool {
    constraints.iter().all(|(dim, allowed)| {
        artifact
            .value(dim.name())
            .is_some_and(|v| allowed.iter().any(|a| a == v))
    })
}

fn match_cell(
    dataset: &Dataset,
    x: Option<(&str, &str)>,
    y: Option<(&str, &str)>,
    slider: Option<(&str, &str)>,
    constraints: &[(&Dimension, Vec<String>)],
) -> CellContent {
    let mut found: Option<usize> = None;
    for (index, artifact) in dataset.artifacts().iter().enumerate() {
        let coordinate_match = [x, y, slider].into_iter().flatten().all(|(dim, value)| {
            artifact.value(dim).is_some_and(|v| v == value)
        });
        if !coordinate_match || !matches_constraints(artifact, constraints) {
            continue;
        }
        if found.is_some() {
            // Duplicate match for a fully-specified tuple: data
            // inconsistency, treated the same as absent.
            return CellContent::Missing;
        }
        found = Some(index);
    }
    found.map_or(CellContent::Missing, CellContent::Filled)
}
