// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! All exploration state changes funnel through here; every mutation that
//! affects the visible set is followed by a synchronous grid rebuild.

use super::{App, Message};
use crate::config::{self, MIN_AUTOPLAY_INTERVAL_MS};
use crate::dataset::Dataset;
use crate::grid::{filter, GridInputs, Role, RoleAssignment, Selection};
use crate::keyboard::{Chord, NavKey};
use crate::scrub::StepDirection;
use crate::ui::scrub_control::Target;
use crate::ui::{empty_state, filter_panel, grid_view, viewer};
use iced::Task;
use std::path::PathBuf;

pub(super) fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Grid(msg) => {
            let wrap = app.wrap();
            let effect = app.grid.handle_message(msg, &mut app.keyboard, wrap);
            apply_grid_effect(app, effect)
        }
        Message::FilterPanel(msg) => handle_filter_panel(app, msg),
        Message::Viewer(msg) => {
            if let Some(viewer) = app.viewer.as_mut() {
                if viewer.handle_message(msg) == viewer::Effect::Closed {
                    close_viewer(app);
                }
            }
            Task::none()
        }
        Message::EmptyState(empty_state::Message::OpenDatasetRequested)
        | Message::OpenDatasetDialog => open_dataset_dialog(),
        Message::GlobalChord(chord) => handle_chord(app, chord),
        Message::EscapePressed => {
            close_viewer(app);
            Task::none()
        }
        Message::AutoplayTick => handle_autoplay_tick(app),
        Message::IntervalInputChanged(value) => {
            app.interval_input = value;
            app.interval_editing = true;
            Task::none()
        }
        Message::IntervalInputSubmitted => submit_interval(app),
        Message::LoopToggled(wrap) => {
            app.autoplay.set_wrap(wrap);
            app.config.loop_playback = Some(wrap);
            persist_config(app);
            Task::none()
        }
        Message::OpenDatasetDialogResult(Some(path)) => load_dataset(app, path),
        Message::OpenDatasetDialogResult(None) => Task::none(),
        Message::DatasetLoadCompleted(result) => dataset_loaded(app, result),
    }
}

pub(super) fn apply_grid_effect(app: &mut App, effect: grid_view::Effect) -> Task<Message> {
    match effect {
        grid_view::Effect::None => {}
        grid_view::Effect::Solo { dimension, value } => {
            solo_value(app, &dimension, &value);
        }
        grid_view::Effect::OpenViewer { artifact_index } => {
            let order = app.grid.grid().navigation_order();
            app.viewer = Some(viewer::State::open(
                &mut app.keyboard,
                order,
                artifact_index,
            ));
        }
        grid_view::Effect::SliderChanged { target, value } => {
            apply_slider_change(app, target, value);
        }
        grid_view::Effect::PlayToggled { target } => {
            toggle_autoplay(app, target);
        }
    }
    Task::none()
}

fn solo_value(app: &mut App, dimension: &str, value: &str) {
    let Some(dim) = app.dataset.as_ref().and_then(|d| d.dimension(dimension)) else {
        return;
    };
    let current = app
        .selections
        .get(dimension)
        .cloned()
        .unwrap_or_default();
    app.selections
        .insert(dimension.to_string(), filter::solo(dim, value, &current));
    rebuild_grid(app);
}

fn apply_slider_change(app: &mut App, target: Target, value: String) {
    match target {
        Target::Master => {
            app.default_slider_value = Some(value);
        }
        Target::Cell { key } => {
            app.slider_overrides.insert(key, value);
        }
    }
    rebuild_grid(app);
}

fn toggle_autoplay(app: &mut App, target: Target) {
    if app.autoplay.is_playing() && app.autoplay_target.as_ref() == Some(&target) {
        app.autoplay.stop();
        app.autoplay_target = None;
        return;
    }
    let track_len = app
        .grid
        .control_by_target_mut(&target)
        .map(|control| control.cursor().len())
        .unwrap_or(0);
    if app.autoplay.start(track_len) {
        app.autoplay_target = Some(target);
    }
}

fn handle_autoplay_tick(app: &mut App) -> Task<Message> {
    let Some(target) = app.autoplay_target.clone() else {
        return Task::none();
    };
    let Some(control) = app.grid.control_by_target_mut(&target) else {
        // The owner disappeared (grid changed under the timer); a stale
        // timer must never advance a replaced value list.
        app.autoplay.stop();
        app.autoplay_target = None;
        return Task::none();
    };

    match app.autoplay.tick(control.cursor_mut()) {
        Some(value) => {
            apply_slider_change(app, target, value);
        }
        None => {
            // Playback ran out.
            app.autoplay_target = None;
        }
    }
    Task::none()
}

fn handle_chord(app: &mut App, chord: Chord) -> Task<Message> {
    let editing = app.interval_editing;
    let Some(handle) = app.keyboard.route(chord, editing) else {
        return Task::none();
    };
    let direction = match chord.key {
        NavKey::Left => StepDirection::Backward,
        NavKey::Right => StepDirection::Forward,
    };

    if let Some(viewer) = app.viewer.as_mut() {
        if viewer.handle() == handle {
            viewer.navigate(direction);
            return Task::none();
        }
    }

    let wrap = app.wrap();
    if let Some(control) = app.grid.control_by_handle_mut(handle) {
        if let crate::ui::scrub_control::Effect::Changed { target, value } =
            control.step(direction, wrap)
        {
            apply_slider_change(app, target, value);
        }
    }
    Task::none()
}

fn handle_filter_panel(app: &mut App, message: filter_panel::Message) -> Task<Message> {
    match message {
        filter_panel::Message::RoleSelected { dimension, role } => {
            let previous_slider = app.roles.slider_dimension().map(str::to_string);
            app.roles.assign(&dimension, role);
            if app.roles.slider_dimension().map(str::to_string) != previous_slider {
                // Slider dimension changed identity: per-cell overrides and
                // the master default refer to the old domain, and a running
                // timer must not advance the replaced value list.
                app.slider_overrides.clear();
                app.default_slider_value = None;
                app.autoplay.stop();
                app.autoplay_target = None;
            }
        }
        filter_panel::Message::ModeSelected { dimension, mode } => {
            app.modes.insert(dimension, mode);
        }
        filter_panel::Message::ValueToggled { dimension, value } => {
            let Some(dim) = app.dataset.as_ref().and_then(|d| d.dimension(&dimension)) else {
                return Task::none();
            };
            let current = app
                .selections
                .get(&dimension)
                .cloned()
                .unwrap_or_default();
            app.selections
                .insert(dimension, filter::toggle(dim, &current, &value));
        }
        filter_panel::Message::ValueSoloed { dimension, value } => {
            solo_value(app, &dimension, &value);
            return Task::none();
        }
        filter_panel::Message::SingleSelected { dimension, value } => {
            app.selections.insert(dimension, Selection::picked([value]));
        }
        filter_panel::Message::SelectAll { dimension } => {
            let Some(dim) = app.dataset.as_ref().and_then(|d| d.dimension(&dimension)) else {
                return Task::none();
            };
            app.selections.insert(dimension, filter::select_all(dim));
        }
        filter_panel::Message::SelectNone { dimension } => {
            app.selections.insert(dimension, filter::select_none());
        }
    }
    rebuild_grid(app);
    Task::none()
}

/// Rebuilds the grid from the current state and re-validates the autoplay
/// target against the fresh set of scrub controls.
pub(super) fn rebuild_grid(app: &mut App) {
    let Some(dataset) = app.dataset.as_ref() else {
        return;
    };
    // Role state referencing a dimension that no longer exists is discarded
    // rather than applied.
    app.roles.retain_known(dataset.dimensions());
    let inputs = GridInputs {
        dataset,
        roles: &app.roles,
        modes: &app.modes,
        selections: &app.selections,
        slider_overrides: &app.slider_overrides,
        default_slider_value: app.default_slider_value.as_deref(),
    };
    app.grid.rebuild(&inputs, &mut app.keyboard);

    if let Some(target) = app.autoplay_target.clone() {
        if app.grid.control_by_target_mut(&target).is_none() {
            app.autoplay.stop();
            app.autoplay_target = None;
        }
    }
}

fn close_viewer(app: &mut App) {
    if let Some(viewer) = app.viewer.take() {
        viewer.close(&mut app.keyboard);
    }
}

fn submit_interval(app: &mut App) -> Task<Message> {
    app.interval_editing = false;
    match app.interval_input.trim().parse::<u64>() {
        Ok(ms) => {
            let ms = ms.max(MIN_AUTOPLAY_INTERVAL_MS);
            app.interval_input = ms.to_string();
            // The subscription identity includes the interval, so the old
            // timer is cancelled and the next tick fires one full new
            // period after this change.
            app.autoplay.set_interval_ms(ms);
            app.config.autoplay_interval_ms = Some(ms);
            persist_config(app);
        }
        Err(_) => {
            app.interval_input = app.autoplay.interval_ms().to_string();
        }
    }
    Task::none()
}

fn persist_config(app: &App) {
    if let Err(err) = config::save(&app.config, app.config_dir.as_deref()) {
        tracing::warn!(%err, "failed to save settings");
    }
}

fn open_dataset_dialog() -> Task<Message> {
    Task::perform(
        async {
            rfd::AsyncFileDialog::new()
                .set_title("Open dataset")
                .pick_folder()
                .await
                .map(|folder| folder.path().to_path_buf())
        },
        Message::OpenDatasetDialogResult,
    )
}

fn load_dataset(app: &mut App, path: PathBuf) -> Task<Message> {
    app.loading = true;
    app.load_error = None;
    Task::perform(scan_dataset(path), Message::DatasetLoadCompleted)
}

/// Runs the blocking directory scan off the UI thread.
pub(super) async fn scan_dataset(path: PathBuf) -> crate::error::Result<Dataset> {
    tokio::task::spawn_blocking(move || Dataset::load(&path))
        .await
        .unwrap_or_else(|err| {
            Err(crate::error::Error::Dataset(format!(
                "scan task failed: {err}"
            )))
        })
}

fn dataset_loaded(
    app: &mut App,
    result: Result<Dataset, crate::error::Error>,
) -> Task<Message> {
    app.loading = false;
    match result {
        Ok(dataset) => {
            // A new dataset resets all derived state; stale references must
            // never be applied.
            close_viewer(app);
            app.grid.clear(&mut app.keyboard);
            app.autoplay.stop();
            app.autoplay_target = None;
            app.roles = RoleAssignment::new();
            app.modes.clear();
            app.selections.clear();
            app.slider_overrides.clear();
            app.default_slider_value = None;
            app.load_error = None;

            assign_default_roles(&mut app.roles, &dataset);
            app.dataset = Some(dataset);
            rebuild_grid(app);
        }
        Err(err) => {
            tracing::error!(%err, "dataset load failed");
            app.load_error = Some(err.to_string());
        }
    }
    Task::none()
}

/// First dimension becomes X, the second Y, the third the slider — a usable
/// grid out of the box for a typical sweep.
fn assign_default_roles(roles: &mut RoleAssignment, dataset: &Dataset) {
    let mut order = [Role::X, Role::Y, Role::Slider].into_iter();
    for dimension in dataset.dimensions() {
        match order.next() {
            Some(role) => roles.assign(dimension.name(), role),
            None => break,
        }
    }
}
