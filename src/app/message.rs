// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::dataset::Dataset;
use crate::error::Error;
use crate::keyboard::Chord;
use crate::ui::{empty_state, filter_panel, grid_view, viewer};
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Grid(grid_view::Message),
    FilterPanel(filter_panel::Message),
    Viewer(viewer::Message),
    EmptyState(empty_state::Message),
    /// A recognized global key chord, delegated through the ownership
    /// registry.
    GlobalChord(Chord),
    /// Escape pressed anywhere; closes the lightbox when open.
    EscapePressed,
    /// One autoplay timer tick.
    AutoplayTick,
    /// The autoplay interval field changed.
    IntervalInputChanged(String),
    /// The autoplay interval field was submitted.
    IntervalInputSubmitted,
    /// The loop toggle changed.
    LoopToggled(bool),
    /// Open the dataset folder picker.
    OpenDatasetDialog,
    /// Result from the dataset folder picker.
    OpenDatasetDialogResult(Option<PathBuf>),
    /// Result from async dataset loading.
    DatasetLoadCompleted(Result<Dataset, Error>),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional dataset directory to load on startup.
    pub dataset: Option<String>,
    /// Optional config directory override (for settings.toml).
    pub config_dir: Option<String>,
}
