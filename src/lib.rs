// SPDX-License-Identifier: MPL-2.0
//! `grid_lens` is a parameter grid explorer for generated image sets, built
//! with the Iced GUI framework.
//!
//! Images tagged along several independent parameter dimensions (seed, step,
//! cfg, sampler, …) are mapped onto a 2-axis grid; dimensions can be
//! assigned to the X axis, the Y axis, a scrubbable slider, or left
//! unassigned and filtered.

pub mod app;
pub mod config;
pub mod dataset;
pub mod error;
pub mod grid;
pub mod keyboard;
pub mod scrub;
pub mod ui;
