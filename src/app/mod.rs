// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the grid, the filter
//! panel, the scrub controls and the lightbox.
//!
//! The `App` struct owns the dataset and all derived exploration state
//! (roles, filters, selections, slider overrides), the keyboard ownership
//! registry and the single autoplay driver. Grid recomputation is
//! synchronous and pure; it happens on every relevant state change.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::dataset::Dataset;
use crate::grid::{FilterMode, RoleAssignment, Selection};
use crate::keyboard::OwnershipRegistry;
use crate::scrub::Autoplay;
use crate::ui::scrub_control::Target;
use crate::ui::{grid_view, viewer};
use iced::{window, Element, Subscription, Task, Theme};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const MIN_WINDOW_WIDTH: u32 = 700;
pub const MIN_WINDOW_HEIGHT: u32 = 500;

/// Root Iced application state.
pub struct App {
    config: Config,
    config_dir: Option<PathBuf>,
    dataset: Option<Dataset>,
    roles: RoleAssignment,
    modes: HashMap<String, FilterMode>,
    selections: HashMap<String, Selection>,
    slider_overrides: HashMap<String, String>,
    default_slider_value: Option<String>,
    grid: grid_view::State,
    viewer: Option<viewer::State>,
    keyboard: OwnershipRegistry,
    autoplay: Autoplay,
    autoplay_target: Option<Target>,
    interval_input: String,
    /// Whether the interval field is being edited; navigation chords are
    /// suppressed while true.
    interval_editing: bool,
    loading: bool,
    load_error: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("has_dataset", &self.dataset.is_some())
            .field("viewer_open", &self.viewer.is_some())
            .field("autoplay_target", &self.autoplay_target)
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        let config = Config::default();
        let autoplay = Autoplay::new(config.autoplay_interval(), config.loops());
        let interval_input = config.autoplay_interval().to_string();
        Self {
            config,
            config_dir: None,
            dataset: None,
            roles: RoleAssignment::new(),
            modes: HashMap::new(),
            selections: HashMap::new(),
            slider_overrides: HashMap::new(),
            default_slider_value: None,
            grid: grid_view::State::new(),
            viewer: None,
            keyboard: OwnershipRegistry::new(),
            autoplay,
            autoplay_target: None,
            interval_input,
            interval_editing: false,
            loading: false,
            load_error: None,
        }
    }
}

impl App {
    /// Initializes application state and optionally kicks off asynchronous
    /// dataset loading based on `Flags` received from the launcher.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let config = config::load(config_dir.as_deref()).unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to load settings, using defaults");
            Config::default()
        });

        let autoplay = Autoplay::new(config.autoplay_interval(), config.loops());
        let interval_input = config.autoplay_interval().to_string();
        let mut app = App {
            config,
            config_dir,
            autoplay,
            interval_input,
            ..Self::default()
        };

        let task = match flags.dataset {
            Some(path_str) => {
                let path = PathBuf::from(path_str);
                app.loading = true;
                Task::perform(update::scan_dataset(path), Message::DatasetLoadCompleted)
            }
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        match &self.dataset {
            Some(dataset) => {
                let name = dataset
                    .root()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| dataset.root().display().to_string());
                format!("{name} - GridLens")
            }
            None => "GridLens".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::global_keys(),
            subscription::autoplay_tick(self.autoplay.is_playing(), self.autoplay.interval()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    /// Whether scrubbing and autoplay wrap around at the ends.
    fn wrap(&self) -> bool {
        self.autoplay.wraps()
    }
}
