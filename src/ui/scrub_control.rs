// SPDX-License-Identifier: MPL-2.0
//! Shared scrub control used by both the master slider and the per-cell
//! sliders. Direct interaction with the control's own buttons claims
//! keyboard ownership; the actual index arithmetic lives in
//! [`crate::scrub::ValueCursor`].

use crate::keyboard::{ChordScope, HandleId, OwnershipRegistry};
use crate::scrub::{StepDirection, ValueCursor};
use iced::widget::{button, text, Row};
use iced::{Alignment, Element};

/// What a scrub control drives: the synchronized default value, or one
/// cell's override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Master,
    Cell { key: String },
}

/// Messages emitted by the control's own widget surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    StepBackward,
    StepForward,
    /// Play/pause pressed on this control.
    PlayPressed,
}

/// Effects surfaced to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The scrubbed value changed; `target` tells the caller whether to
    /// update the master default or a per-cell override.
    Changed { target: Target, value: String },
    /// Request to toggle autoplay on this control.
    PlayToggled { target: Target },
}

/// One live scrub control instance, registered for modified-chord input.
#[derive(Debug)]
pub struct State {
    target: Target,
    cursor: ValueCursor,
    handle: HandleId,
}

impl State {
    /// Creates the control and registers it; the freshly mounted control
    /// becomes the keyboard owner.
    pub fn new(registry: &mut OwnershipRegistry, target: Target, cursor: ValueCursor) -> Self {
        let handle = registry.register(ChordScope::Modified);
        Self {
            target,
            cursor,
            handle,
        }
    }

    /// Deregisters the control; ownership falls back to the most recently
    /// registered survivor.
    pub fn release(&self, registry: &mut OwnershipRegistry) {
        registry.deregister(self.handle);
    }

    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    #[must_use]
    pub fn handle(&self) -> HandleId {
        self.handle
    }

    #[must_use]
    pub fn cursor(&self) -> &ValueCursor {
        &self.cursor
    }

    #[must_use]
    pub fn cursor_mut(&mut self) -> &mut ValueCursor {
        &mut self.cursor
    }

    #[must_use]
    pub fn current(&self) -> &str {
        self.cursor.current()
    }

    /// Steps the cursor, used both by widget presses and by routed global
    /// chords. A suppressed step (at an end, non-wrapping) yields
    /// `Effect::None` — the caller must not re-emit the same value.
    pub fn step(&mut self, direction: StepDirection, wrap: bool) -> Effect {
        match self.cursor.step(direction, wrap) {
            Some(value) => Effect::Changed {
                target: self.target.clone(),
                value: value.to_string(),
            },
            None => Effect::None,
        }
    }

    /// Handles a widget message. Any direct press claims ownership before
    /// the message takes effect.
    pub fn handle_message(
        &mut self,
        message: Message,
        registry: &mut OwnershipRegistry,
        wrap: bool,
    ) -> Effect {
        registry.claim(self.handle);
        match message {
            Message::StepBackward => self.step(StepDirection::Backward, wrap),
            Message::StepForward => self.step(StepDirection::Forward, wrap),
            Message::PlayPressed => Effect::PlayToggled {
                target: self.target.clone(),
            },
        }
    }

    /// Renders the transport strip: `‹ value ›` plus a play toggle.
    pub fn view(&self, wrap: bool, playing: bool) -> Element<'_, Message> {
        let position = format!("{}/{}", self.cursor.index() + 1, self.cursor.len().max(1));

        let back = button(text("‹"))
            .padding([0, 6])
            .on_press_maybe(
                self.cursor
                    .can_step(StepDirection::Backward, wrap)
                    .then_some(Message::StepBackward),
            );
        let forward = button(text("›"))
            .padding([0, 6])
            .on_press_maybe(
                self.cursor
                    .can_step(StepDirection::Forward, wrap)
                    .then_some(Message::StepForward),
            );
        let play_label = if playing { "⏸" } else { "▶" };
        let play = button(text(play_label))
            .padding([0, 6])
            .on_press_maybe((self.cursor.len() > 1).then_some(Message::PlayPressed));

        Row::new()
            .spacing(4)
            .align_y(Alignment::Center)
            .push(back)
            .push(text(self.current().to_string()).size(13))
            .push(text(position).size(11))
            .push(forward)
            .push(play)
            .into()
    }
}
