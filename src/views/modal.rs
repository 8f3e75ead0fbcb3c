use iced::widget::{center, container, mouse_area, opaque, stack};
use iced::{Color, Element};

use crate::app::Message;

/// Lay `panel` over `base`, dimming it. Clicking the backdrop closes the
/// panel.
pub fn view<'a>(
    base: impl Into<Element<'a, Message>>,
    panel: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let backdrop = mouse_area(center(opaque(panel)).style(|_theme| container::Style {
        background: Some(
            Color {
                a: 0.6,
                ..Color::BLACK
            }
            .into(),
        ),
        ..Default::default()
    }))
    .on_press(Message::ClosePanel);

    let base: Element<'a, Message> = base.into();
    stack![base, opaque(backdrop)].into()
}
