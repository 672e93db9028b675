// SPDX-License-Identifier: MPL-2.0
//! Lightbox viewer: a full-window single-image view over the grid's filled
//! cells, in grid order.
//!
//! The viewer registers a plain-chord scope while open, so plain Left/Right
//! walks images while Ctrl+Left/Right still reaches the scrub controls.
//! Zoom is a simple linear scale inside a scrollable; pan is the
//! scrollable's own scrolling.

use crate::dataset::Dataset;
use crate::keyboard::{ChordScope, HandleId, OwnershipRegistry};
use crate::scrub::StepDirection;
use iced::widget::image::Handle;
use iced::widget::{button, container, scrollable, text, Column, Image, Row};
use iced::{Alignment, Element, Length};

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 8.0;
pub const ZOOM_STEP: f32 = 1.25;

/// Unscaled edge length of the displayed image, in logical pixels.
const BASE_SIZE: f32 = 768.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    CloseRequested,
    ZoomIn,
    ZoomOut,
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The viewer asked to close; the owner deregisters and drops it.
    Closed,
}

/// Lightbox state while open.
#[derive(Debug)]
pub struct State {
    /// Artifact indices in navigation order (the grid's filled cells).
    order: Vec<usize>,
    position: usize,
    zoom: f32,
    handle: HandleId,
}

impl State {
    /// Opens the lightbox on `artifact_index` and registers it for plain
    /// chords; the freshly opened viewer becomes the keyboard owner.
    pub fn open(
        registry: &mut OwnershipRegistry,
        order: Vec<usize>,
        artifact_index: usize,
    ) -> Self {
        let position = order
            .iter()
            .position(|&index| index == artifact_index)
            .unwrap_or(0);
        let handle = registry.register(ChordScope::Plain);
        Self {
            order,
            position,
            zoom: 1.0,
            handle,
        }
    }

    /// Deregisters the viewer; ownership is promoted back to the most
    /// recently registered survivor (typically the control that had it
    /// before the lightbox opened).
    pub fn close(&self, registry: &mut OwnershipRegistry) {
        registry.deregister(self.handle);
    }

    #[must_use]
    pub fn handle(&self) -> HandleId {
        self.handle
    }

    #[must_use]
    pub fn artifact_index(&self) -> Option<usize> {
        self.order.get(self.position).copied()
    }

    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Walks to the neighboring image, always wrapping.
    pub fn navigate(&mut self, direction: StepDirection) {
        if self.order.is_empty() {
            return;
        }
        let len = self.order.len() as isize;
        let next = (self.position as isize + direction.delta()).rem_euclid(len);
        self.position = next as usize;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn handle_message(&mut self, message: Message) -> Effect {
        match message {
            Message::CloseRequested => Effect::Closed,
            Message::ZoomIn => {
                self.zoom_in();
                Effect::None
            }
            Message::ZoomOut => {
                self.zoom_out();
                Effect::None
            }
            Message::Next => {
                self.navigate(StepDirection::Forward);
                Effect::None
            }
            Message::Previous => {
                self.navigate(StepDirection::Backward);
                Effect::None
            }
        }
    }

    pub fn view<'a>(&'a self, dataset: &'a Dataset) -> Element<'a, Message> {
        let Some(artifact) = self.artifact_index().and_then(|i| dataset.artifact(i)) else {
            return container(text("nothing to show"))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Alignment::Center)
                .align_y(Alignment::Center)
                .into();
        };

        let toolbar = Row::new()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(button(text("‹")).on_press(Message::Previous))
            .push(button(text("›")).on_press(Message::Next))
            .push(text(format!("{}/{}", self.position + 1, self.order.len())).size(13))
            .push(button(text("−")).on_press(Message::ZoomOut))
            .push(text(format!("{:.0}%", self.zoom * 100.0)).size(13))
            .push(button(text("+")).on_press(Message::ZoomIn))
            .push(text(artifact.relative_path().to_string()).size(13))
            .push(button(text("✕")).on_press(Message::CloseRequested));

        let size = BASE_SIZE * self.zoom;
        let image = Image::new(Handle::from_path(dataset.resolve_path(artifact)))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size));

        Column::new()
            .spacing(8)
            .push(toolbar)
            .push(
                scrollable(container(image).padding(8))
                    .direction(scrollable::Direction::Both {
                        vertical: scrollable::Scrollbar::new(),
                        horizontal: scrollable::Scrollbar::new(),
                    })
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{Chord, NavKey};

    fn open(registry: &mut OwnershipRegistry) -> State {
        State::open(registry, vec![4, 7, 9], 7)
    }

    #[test]
    fn open_positions_on_the_clicked_artifact() {
        let mut registry = OwnershipRegistry::new();
        let viewer = open(&mut registry);
        assert_eq!(viewer.artifact_index(), Some(7));
        assert_eq!(registry.active(), Some(viewer.handle()));
    }

    #[test]
    fn open_on_unknown_artifact_starts_at_beginning() {
        let mut registry = OwnershipRegistry::new();
        let viewer = State::open(&mut registry, vec![4, 7], 99);
        assert_eq!(viewer.artifact_index(), Some(4));
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut registry = OwnershipRegistry::new();
        let mut viewer = open(&mut registry);

        viewer.navigate(StepDirection::Forward);
        assert_eq!(viewer.artifact_index(), Some(9));
        viewer.navigate(StepDirection::Forward);
        assert_eq!(viewer.artifact_index(), Some(4));
        viewer.navigate(StepDirection::Backward);
        assert_eq!(viewer.artifact_index(), Some(9));
    }

    #[test]
    fn viewer_watches_plain_chords_only() {
        let mut registry = OwnershipRegistry::new();
        let viewer = open(&mut registry);

        let plain = Chord {
            key: NavKey::Left,
            modified: false,
        };
        let modified = Chord {
            key: NavKey::Left,
            modified: true,
        };
        assert_eq!(registry.route(plain, false), Some(viewer.handle()));
        assert_eq!(registry.route(modified, false), None);
    }

    #[test]
    fn close_promotes_previous_owner() {
        let mut registry = OwnershipRegistry::new();
        let prior = registry.register(ChordScope::Modified);
        let viewer = open(&mut registry);
        assert_eq!(registry.active(), Some(viewer.handle()));

        viewer.close(&mut registry);
        assert_eq!(registry.active(), Some(prior));
    }

    #[test]
    fn zoom_clamps_to_bounds() {
        let mut registry = OwnershipRegistry::new();
        let mut viewer = open(&mut registry);

        for _ in 0..64 {
            viewer.zoom_in();
        }
        assert_eq!(viewer.zoom(), MAX_ZOOM);

        for _ in 0..64 {
            viewer.zoom_out();
        }
        assert_eq!(viewer.zoom(), MIN_ZOOM);
    }

    #[test]
    fn close_requested_surfaces_effect() {
        let mut registry = OwnershipRegistry::new();
        let mut viewer = open(&mut registry);
        assert_eq!(
            viewer.handle_message(Message::CloseRequested),
            Effect::Closed
        );
    }
}
