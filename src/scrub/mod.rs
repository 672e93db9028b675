// SPDX-License-Identifier: MPL-2.0
//! Scrubbing: wraparound index arithmetic over an ordered value list and the
//! autoplay state machine that drives it.

pub mod autoplay;
pub mod cursor;

pub use autoplay::{Autoplay, PlayState};
pub use cursor::{StepDirection, ValueCursor};
