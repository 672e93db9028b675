// SPDX-License-Identifier: MPL-2.0
//! Dimension grid core: role assignment, the filter engine and the grid
//! builder. Everything in here is pure and synchronous; the presentation
//! layer recomputes on each relevant state change.

pub mod builder;
pub mod filter;
pub mod roles;

pub use builder::{cell_key, Cell, CellContent, Grid, GridInputs};
pub use filter::Selection;
pub use roles::{FilterMode, Role, RoleAssignment};
