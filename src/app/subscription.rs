// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Global keyboard chords are funneled into the ownership registry by
//! `App::update`; only events no widget captured are forwarded, so a focused
//! text input never loses its keystrokes to navigation.

use super::Message;
use crate::keyboard::{Chord, NavKey};
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Listens for the navigation chords (plain and modified arrows, Escape).
pub(super) fn global_keys() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| {
        if status == event::Status::Captured {
            return None;
        }
        let event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event
        else {
            return None;
        };
        let modified = modifiers.command() || modifiers.control();
        match key {
            keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => {
                Some(Message::GlobalChord(Chord {
                    key: NavKey::Left,
                    modified,
                }))
            }
            keyboard::Key::Named(keyboard::key::Named::ArrowRight) => {
                Some(Message::GlobalChord(Chord {
                    key: NavKey::Right,
                    modified,
                }))
            }
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::EscapePressed),
            _ => None,
        }
    })
}

/// One repeating timer while autoplay is playing. The subscription identity
/// includes the interval, so an interval change tears the old timer down
/// and the next tick fires a full period after the change.
pub(super) fn autoplay_tick(playing: bool, interval: Duration) -> Subscription<Message> {
    if playing {
        time::every(interval).map(|_| Message::AutoplayTick)
    } else {
        Subscription::none()
    }
}
