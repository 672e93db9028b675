// SPDX-License-Identifier: MPL-2.0
//! Grid presentation: renders the built grid, owns the live scrub-control
//! instances and the image-handle cache, and surfaces user intent (solo
//! clicks, cell opens, scrub changes) as effects.
//!
//! The grid is rebuilt — synchronously and purely — on every relevant state
//! change; rebuilding re-registers scrub handles and then restores the
//! previously active owner so a rebuild never steals keyboard ownership.

use super::scrub_control::{self, Target};
use crate::dataset::Dataset;
use crate::grid::{builder, CellContent, Grid, GridInputs};
use crate::keyboard::{HandleId, OwnershipRegistry};
use crate::scrub::ValueCursor;
use iced::widget::image::Handle;
use iced::widget::{button, container, mouse_area, text, Column, Image, Row};
use iced::{Alignment, Element, Length};
use lru::LruCache;
use std::num::NonZeroUsize;

const HANDLE_CACHE_CAPACITY: usize = 512;
const Y_LABEL_WIDTH: f32 = 90.0;
const FLAT_COLUMNS: usize = 4;

/// Messages from the grid's widget surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// An axis value label was clicked (solo toggle).
    HeaderClicked { dimension: String, value: String },
    /// A filled cell's image was clicked.
    CellOpened { artifact_index: usize },
    /// A per-cell scrub control message; `slot` indexes the live controls.
    CellScrub {
        slot: usize,
        message: scrub_control::Message,
    },
    /// A master scrub control message.
    Master(scrub_control::Message),
}

/// Effects surfaced to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Solo { dimension: String, value: String },
    OpenViewer { artifact_index: usize },
    SliderChanged { target: Target, value: String },
    PlayToggled { target: Target },
}

struct CellScrub {
    cell_index: usize,
    control: scrub_control::State,
}

/// Grid view state: the built grid plus its live scrub controls.
pub struct State {
    grid: Grid,
    cell_scrubs: Vec<CellScrub>,
    master: Option<scrub_control::State>,
    handles: LruCache<String, Handle>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: Grid::default(),
            cell_scrubs: Vec::new(),
            master: None,
            handles: LruCache::new(
                NonZeroUsize::new(HANDLE_CACHE_CAPACITY)
                    .expect("HANDLE_CACHE_CAPACITY must be non-zero"),
            ),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn master(&self) -> Option<&scrub_control::State> {
        self.master.as_ref()
    }

    /// Rebuilds the grid and its scrub controls from fresh inputs.
    ///
    /// Per-cell controls register in row-major order and the master control
    /// registers last, so the master is the default keyboard owner of a
    /// fresh grid. The owner from before the rebuild (including the
    /// lightbox, which is not ours) is re-claimed when still present.
    pub fn rebuild(&mut self, inputs: &GridInputs<'_>, registry: &mut OwnershipRegistry) {
        let prior_active = registry.active();
        let prior_target = prior_active.and_then(|handle| self.target_of(handle));

        for scrub in self.cell_scrubs.drain(..) {
            scrub.control.release(registry);
        }
        if let Some(master) = self.master.take() {
            master.release(registry);
        }

        self.grid = builder::build(inputs);
        let dataset = inputs.dataset;

        let slider_dim = self
            .grid
            .slider_dimension
            .as_deref()
            .and_then(|name| dataset.dimension(name));
        if let Some(dim) = slider_dim {
            for (cell_index, cell) in self.grid.cells.iter().enumerate() {
                let Some(value) = &cell.slider_value else {
                    continue;
                };
                let control = scrub_control::State::new(
                    registry,
                    Target::Cell {
                        key: cell.key.clone(),
                    },
                    ValueCursor::new(dim.values().iter().cloned(), value.clone()),
                );
                self.cell_scrubs.push(CellScrub {
                    cell_index,
                    control,
                });
            }

            let master_current = inputs
                .default_slider_value
                .filter(|v| dim.contains(v))
                .or(dim.first_value())
                .unwrap_or("");
            self.master = Some(scrub_control::State::new(
                registry,
                Target::Master,
                ValueCursor::new(dim.values().iter().cloned(), master_current),
            ));
        }

        if let Some(target) = prior_target {
            if let Some(handle) = self.handle_of(&target) {
                registry.claim(handle);
            }
        } else if let Some(handle) = prior_active {
            // Not one of ours (e.g. the lightbox); claim is a no-op unless
            // it is still registered.
            registry.claim(handle);
        }

        self.warm_handle_cache(dataset);
    }

    /// Releases every control, e.g. before replacing the dataset.
    pub fn clear(&mut self, registry: &mut OwnershipRegistry) {
        for scrub in self.cell_scrubs.drain(..) {
            scrub.control.release(registry);
        }
        if let Some(master) = self.master.take() {
            master.release(registry);
        }
        self.grid = Grid::default();
        self.handles.clear();
    }

    fn warm_handle_cache(&mut self, dataset: &Dataset) {
        for index in self.grid.navigation_order() {
            if let Some(artifact) = dataset.artifact(index) {
                let key = artifact.relative_path().to_string();
                if self.handles.get(&key).is_none() {
                    self.handles
                        .put(key, Handle::from_path(dataset.resolve_path(artifact)));
                }
            }
        }
    }

    fn target_of(&self, handle: HandleId) -> Option<Target> {
        if self.master.as_ref().is_some_and(|m| m.handle() == handle) {
            return Some(Target::Master);
        }
        self.cell_scrubs
            .iter()
            .find(|scrub| scrub.control.handle() == handle)
            .map(|scrub| scrub.control.target().clone())
    }

    fn handle_of(&self, target: &Target) -> Option<HandleId> {
        match target {
            Target::Master => self.master.as_ref().map(scrub_control::State::handle),
            Target::Cell { .. } => self
                .cell_scrubs
                .iter()
                .find(|scrub| scrub.control.target() == target)
                .map(|scrub| scrub.control.handle()),
        }
    }

    /// The scrub control owning a routed keyboard handle, if it is ours.
    pub fn control_by_handle_mut(
        &mut self,
        handle: HandleId,
    ) -> Option<&mut scrub_control::State> {
        if self
            .master
            .as_ref()
            .is_some_and(|m| m.handle() == handle)
        {
            return self.master.as_mut();
        }
        self.cell_scrubs
            .iter_mut()
            .find(|scrub| scrub.control.handle() == handle)
            .map(|scrub| &mut scrub.control)
    }

    pub fn control_by_target_mut(
        &mut self,
        target: &Target,
    ) -> Option<&mut scrub_control::State> {
        match target {
            Target::Master => self.master.as_mut(),
            Target::Cell { .. } => self
                .cell_scrubs
                .iter_mut()
                .find(|scrub| scrub.control.target() == target)
                .map(|scrub| &mut scrub.control),
        }
    }

    pub fn handle_message(
        &mut self,
        message: Message,
        registry: &mut OwnershipRegistry,
        wrap: bool,
    ) -> Effect {
        match message {
            Message::HeaderClicked { dimension, value } => Effect::Solo { dimension, value },
            Message::CellOpened { artifact_index } => Effect::OpenViewer { artifact_index },
            Message::CellScrub { slot, message } => match self.cell_scrubs.get_mut(slot) {
                Some(scrub) => {
                    convert_effect(scrub.control.handle_message(message, registry, wrap))
                }
                None => Effect::None,
            },
            Message::Master(message) => match self.master.as_mut() {
                Some(master) => convert_effect(master.handle_message(message, registry, wrap)),
                None => Effect::None,
            },
        }
    }

    /// The master transport strip, when a slider dimension is assigned.
    pub fn master_strip(&self, ctx: &ViewContext<'_>) -> Option<Element<'_, Message>> {
        let master = self.master.as_ref()?;
        let playing = ctx.playing_target == Some(&Target::Master);
        Some(
            Row::new()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(text(format!(
                    "{}:",
                    self.grid.slider_dimension.as_deref().unwrap_or("slider")
                )))
                .push(master.view(ctx.wrap, playing).map(Message::Master))
                .into(),
        )
    }

    pub fn view(&self, ctx: &ViewContext<'_>) -> Element<'_, Message> {
        if self.grid.is_flat() {
            return self.view_flat(ctx);
        }
        self.view_table(ctx)
    }

    fn view_flat(&self, ctx: &ViewContext<'_>) -> Element<'_, Message> {
        let mut column = Column::new().spacing(6);
        for chunk in self.grid.flat.chunks(FLAT_COLUMNS) {
            let mut row = Row::new().spacing(6);
            for &artifact_index in chunk {
                row = row.push(self.cell_image(ctx, artifact_index));
            }
            column = column.push(row);
        }
        column.into()
    }

    fn view_table(&self, ctx: &ViewContext<'_>) -> Element<'_, Message> {
        let mut table = Column::new().spacing(6);

        if let Some(x_dim) = &self.grid.x_dimension {
            let mut header = Row::new().spacing(6).align_y(Alignment::Center);
            if self.grid.y_dimension.is_some() {
                header = header.push(
                    container(text(self.corner_label()).size(12))
                        .width(Length::Fixed(Y_LABEL_WIDTH)),
                );
            }
            for value in &self.grid.x_values {
                let x_dim = x_dim.clone();
                header = header.push(
                    button(text(value.clone()).size(13))
                        .width(Length::Fixed(ctx.cell_size))
                        .on_press(Message::HeaderClicked {
                            dimension: x_dim,
                            value: value.clone(),
                        }),
                );
            }
            table = table.push(header);
        }

        for row_index in 0..self.grid.row_count() {
            let mut row = Row::new().spacing(6);
            if let Some(y_dim) = &self.grid.y_dimension {
                let value = self.grid.y_values[row_index].clone();
                row = row.push(
                    button(text(value.clone()).size(13))
                        .width(Length::Fixed(Y_LABEL_WIDTH))
                        .on_press(Message::HeaderClicked {
                            dimension: y_dim.clone(),
                            value,
                        }),
                );
            }
            for column_index in 0..self.grid.column_count() {
                let cell_index = row_index * self.grid.column_count() + column_index;
                row = row.push(self.view_cell(ctx, cell_index));
            }
            table = table.push(row);
        }

        table.into()
    }

    fn corner_label(&self) -> String {
        format!(
            "{} \\ {}",
            self.grid.y_dimension.as_deref().unwrap_or(""),
            self.grid.x_dimension.as_deref().unwrap_or("")
        )
    }

    fn view_cell(&self, ctx: &ViewContext<'_>, cell_index: usize) -> Element<'_, Message> {
        let Some(cell) = self.grid.cells.get(cell_index) else {
            return text("").into();
        };

        let content: Element<'_, Message> = match cell.content {
            CellContent::Filled(artifact_index) => self.cell_image(ctx, artifact_index),
            // A missing cell occupies the same slot as a filled one.
            CellContent::Missing => container(text("missing").size(12))
                .width(Length::Fixed(ctx.cell_size))
                .height(Length::Fixed(ctx.cell_size))
                .align_x(Alignment::Center)
                .align_y(Alignment::Center)
                .into(),
        };

        let mut cell_column = Column::new().spacing(2).push(content);
        if let Some(slot) = self.scrub_slot(cell_index) {
            let control = &self.cell_scrubs[slot].control;
            let playing = ctx.playing_target == Some(control.target());
            cell_column = cell_column.push(
                control
                    .view(ctx.wrap, playing)
                    .map(move |message| Message::CellScrub { slot, message }),
            );
        }
        cell_column.into()
    }

    fn cell_image(&self, ctx: &ViewContext<'_>, artifact_index: usize) -> Element<'_, Message> {
        let Some(artifact) = ctx.dataset.artifact(artifact_index) else {
            return text("").into();
        };
        let handle = self
            .handles
            .peek(artifact.relative_path())
            .cloned()
            .unwrap_or_else(|| Handle::from_path(ctx.dataset.resolve_path(artifact)));

        mouse_area(
            Image::new(handle)
                .width(Length::Fixed(ctx.cell_size))
                .height(Length::Fixed(ctx.cell_size)),
        )
        .on_press(Message::CellOpened { artifact_index })
        .into()
    }

    fn scrub_slot(&self, cell_index: usize) -> Option<usize> {
        self.cell_scrubs
            .iter()
            .position(|scrub| scrub.cell_index == cell_index)
    }
}

/// Context required to render the grid.
pub struct ViewContext<'a> {
    pub dataset: &'a Dataset,
    pub cell_size: f32,
    pub wrap: bool,
    pub playing_target: Option<&'a Target>,
}

fn convert_effect(effect: scrub_control::Effect) -> Effect {
    match effect {
        scrub_control::Effect::None => Effect::None,
        scrub_control::Effect::Changed { target, value } => {
            Effect::SliderChanged { target, value }
        }
        scrub_control::Effect::PlayToggled { target } => Effect::PlayToggled { target },
    }
}
