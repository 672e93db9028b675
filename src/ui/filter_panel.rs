// SPDX-License-Identifier: MPL-2.0
//! Filter panel: per-dimension role assignment, filter mode and value
//! selection controls.
//!
//! The panel is stateless; it renders from the caller's role/mode/selection
//! maps and surfaces every interaction as a message.

use crate::dataset::{Dataset, Dimension};
use crate::grid::{filter, FilterMode, Role, Selection};
use iced::widget::{button, checkbox, pick_list, text, Column, Row};
use iced::{Alignment, Element, Length};
use std::collections::HashMap;

const PANEL_WIDTH: f32 = 240.0;

/// Messages emitted by the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    RoleSelected { dimension: String, role: Role },
    ModeSelected { dimension: String, mode: FilterMode },
    ValueToggled { dimension: String, value: String },
    ValueSoloed { dimension: String, value: String },
    SingleSelected { dimension: String, value: String },
    SelectAll { dimension: String },
    SelectNone { dimension: String },
}

/// Context required to render the panel.
pub struct ViewContext<'a> {
    pub dataset: &'a Dataset,
    pub roles: &'a crate::grid::RoleAssignment,
    pub modes: &'a HashMap<String, FilterMode>,
    pub selections: &'a HashMap<String, Selection>,
}

pub fn view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut panel = Column::new().spacing(12).width(Length::Fixed(PANEL_WIDTH));

    for dimension in ctx.dataset.dimensions() {
        panel = panel.push(view_dimension(ctx, dimension));
    }

    panel.into()
}

fn view_dimension<'a>(ctx: &ViewContext<'a>, dimension: &'a Dimension) -> Element<'a, Message> {
    let name = dimension.name().to_string();
    let role = ctx.roles.role(dimension.name());

    let role_picker = {
        let name = name.clone();
        pick_list(Role::ALL, Some(role), move |role| Message::RoleSelected {
            dimension: name.clone(),
            role,
        })
        .text_size(13)
    };

    let mut section = Column::new()
        .spacing(4)
        .push(
            Row::new()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(text(name.clone()).size(14))
                .push(role_picker),
        );

    if role == Role::None {
        let mode = ctx.modes.get(dimension.name()).copied().unwrap_or_default();
        let mode_picker = {
            let name = name.clone();
            pick_list(FilterMode::ALL, Some(mode), move |mode| {
                Message::ModeSelected {
                    dimension: name.clone(),
                    mode,
                }
            })
            .text_size(13)
        };
        section = section.push(mode_picker);

        match mode {
            FilterMode::Hide => {}
            FilterMode::Single => {
                section = section.push(view_single(ctx, dimension, &name));
            }
            FilterMode::Multi => {
                section = section.push(view_multi(ctx, dimension, &name));
            }
        }
    }

    section.into()
}

fn view_single<'a>(
    ctx: &ViewContext<'a>,
    dimension: &'a Dimension,
    name: &str,
) -> Element<'a, Message> {
    let selection = ctx
        .selections
        .get(dimension.name())
        .cloned()
        .unwrap_or_default();
    let current = filter::effective_values(dimension, FilterMode::Single, &selection)
        .into_iter()
        .next();

    let name = name.to_string();
    pick_list(dimension.values().to_vec(), current, move |value| {
        Message::SingleSelected {
            dimension: name.clone(),
            value,
        }
    })
    .text_size(13)
    .into()
}

fn view_multi<'a>(
    ctx: &ViewContext<'a>,
    dimension: &'a Dimension,
    name: &str,
) -> Element<'a, Message> {
    let selection = ctx.selections.get(dimension.name());

    let mut column = Column::new().spacing(2);

    let all_none = Row::new()
        .spacing(6)
        .push(
            button(text("all").size(12)).padding([0, 6]).on_press(
                Message::SelectAll {
                    dimension: name.to_string(),
                },
            ),
        )
        .push(
            button(text("none").size(12)).padding([0, 6]).on_press(
                Message::SelectNone {
                    dimension: name.to_string(),
                },
            ),
        );
    column = column.push(all_none);

    for value in dimension.values() {
        let checked = selection.is_none_or(|s| s.contains(value));
        let toggle_name = name.to_string();
        let toggle_value = value.clone();
        let solo_name = name.to_string();
        let solo_value = value.clone();

        let row = Row::new()
            .spacing(6)
            .align_y(Alignment::Center)
            .push(
                checkbox(checked)
                    .label(value.clone())
                    .text_size(13)
                    .on_toggle(move |_| Message::ValueToggled {
                        dimension: toggle_name.clone(),
                        value: toggle_value.clone(),
                    }),
            )
            .push(
                button(text("solo").size(11))
                    .padding([0, 4])
                    .on_press(Message::ValueSoloed {
                        dimension: solo_name,
                        value: solo_value,
                    }),
            );
        column = column.push(row);
    }

    column.into()
}
