// SPDX-License-Identifier: MPL-2.0
//! User interface components: the grid view, filter panel, scrub controls
//! and the lightbox viewer. Components follow a `State`/`Message`/`Effect`
//! shape — widget interactions become messages, and effects surface user
//! intent to the application.

pub mod empty_state;
pub mod filter_panel;
pub mod grid_view;
pub mod scrub_control;
pub mod viewer;
