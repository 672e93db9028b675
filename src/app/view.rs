// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{App, Message};
use crate::ui::{empty_state, filter_panel, grid_view};
use iced::widget::{button, scrollable, text, text_input, toggler, Column, Row};
use iced::{Alignment, Element, Length};

pub(super) fn view(app: &App) -> Element<'_, Message> {
    let Some(dataset) = &app.dataset else {
        return empty_state::view(app.load_error.as_deref()).map(Message::EmptyState);
    };

    if let Some(viewer) = &app.viewer {
        return viewer.view(dataset).map(Message::Viewer);
    }

    let grid_ctx = grid_view::ViewContext {
        dataset,
        cell_size: app.config.cell_size(),
        wrap: app.wrap(),
        playing_target: app.autoplay_target.as_ref(),
    };

    let mut toolbar = Row::new()
        .spacing(12)
        .align_y(Alignment::Center)
        .push(button(text("Open…").size(13)).on_press(Message::OpenDatasetDialog));

    if let Some(strip) = app.grid.master_strip(&grid_ctx) {
        toolbar = toolbar
            .push(strip.map(Message::Grid))
            .push(
                text_input("750", &app.interval_input)
                    .width(Length::Fixed(70.0))
                    .size(13)
                    .on_input(Message::IntervalInputChanged)
                    .on_submit(Message::IntervalInputSubmitted),
            )
            .push(text("ms").size(13))
            .push(
                toggler(app.wrap())
                    .label("loop")
                    .text_size(13)
                    .on_toggle(Message::LoopToggled),
            );
    }
    if app.loading {
        toolbar = toolbar.push(text("Loading…").size(13));
    }

    let panel_ctx = filter_panel::ViewContext {
        dataset,
        roles: &app.roles,
        modes: &app.modes,
        selections: &app.selections,
    };
    let panel = scrollable(filter_panel::view(&panel_ctx).map(Message::FilterPanel))
        .height(Length::Fill);

    let grid = scrollable(app.grid.view(&grid_ctx).map(Message::Grid))
        .direction(scrollable::Direction::Both {
            vertical: scrollable::Scrollbar::new(),
            horizontal: scrollable::Scrollbar::new(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

    let body = Row::new().spacing(12).push(panel).push(grid);

    Column::new()
        .spacing(12)
        .padding(12)
        .push(toolbar)
        .push(body)
        .into()
}
