// SPDX-License-Identifier: MPL-2.0
//! Empty state view displayed when no dataset is loaded.

use iced::widget::{button, text, Column, Container};
use iced::{Alignment, Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    OpenDatasetRequested,
}

/// Renders the empty state: a short explanation, an open button and the
/// last load error, if any.
pub fn view(load_error: Option<&str>) -> Element<'_, Message> {
    let title = text("No dataset loaded").size(22);
    let subtitle =
        text("Open a folder of tagged images (or one with a manifest.json) to explore it.")
            .size(14);

    let open_button = button(text("Open dataset…"))
        .padding([8, 16])
        .on_press(Message::OpenDatasetRequested);

    let mut content = Column::new()
        .spacing(16)
        .align_x(Alignment::Center)
        .push(title)
        .push(subtitle)
        .push(open_button);

    if let Some(error) = load_error {
        content = content.push(text(error.to_string()).size(13));
    }

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .into()
}
