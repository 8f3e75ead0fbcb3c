use iced::widget::{Space, button, column, container, image, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use super::{CANVAS_BG, modal};
use crate::app::{App, Message, Rendered};
use crate::panel::PanelKind;
use crate::widgets;

pub fn view(app: &App) -> Element<'_, Message> {
    let size = app.settings().canvas_size;

    let panes = row![
        image_pane("Original", app.original(), size),
        image_pane("Processed", app.processed(), size),
    ]
    .spacing(10);

    let main_area = column![panes, text(app.info()).size(14)]
        .spacing(10)
        .padding(10);

    let content = column![
        row![controls(app), main_area]
            .width(Length::Fill)
            .height(Length::Fill),
        bottom_bar(app),
    ]
    .width(Length::Fill)
    .height(Length::Fill);

    match app.panel() {
        Some(panel) => modal::view(content, widgets::panels::view(panel)),
        None => content.into(),
    }
}

fn controls(app: &App) -> Element<'_, Message> {
    let has_original = app.original().is_some();
    let has_processed = app.processed().is_some();

    let action = |label: &'static str, message: Message, enabled: bool| {
        button(text(label).size(13))
            .on_press_maybe(enabled.then_some(message))
            .width(Length::Fill)
    };

    column![
        text("Retina").size(24),
        Space::new().height(8),
        action("Load Image", Message::LoadImage, true),
        action("Convert to Grayscale", Message::Grayscale, has_original),
        action("Apply Filter", Message::Blur, has_original),
        action(
            "Adjust Contrast",
            Message::OpenPanel(PanelKind::Contrast),
            has_original
        ),
        action(
            "Morphological Operations",
            Message::OpenPanel(PanelKind::Morphology),
            has_original
        ),
        action(
            "Segment and Find Contours",
            Message::OpenPanel(PanelKind::Segmentation),
            has_original
        ),
        action(
            "Apply Custom Filter",
            Message::OpenPanel(PanelKind::CustomKernel),
            has_original
        ),
        action(
            "Display Histogram",
            Message::OpenPanel(PanelKind::Histogram),
            has_processed
        ),
        action(
            "Equalize Histogram",
            Message::EqualizeHistogram,
            has_processed
        ),
        Space::new().height(Length::Fill),
        action("Save Processed Image", Message::SaveProcessed, has_processed),
    ]
    .spacing(6)
    .padding(10)
    .width(220)
    .into()
}

fn image_pane<'a>(label: &'a str, rendered: Option<&Rendered>, size: f32) -> Element<'a, Message> {
    let canvas_style = |_theme: &_| container::Style {
        background: Some(CANVAS_BG.into()),
        ..Default::default()
    };

    let surface = match rendered {
        Some(r) => container(
            image(r.handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill),
        ),
        None => container(text("No image").size(14))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    };

    column![
        text(label).size(14),
        surface.style(canvas_style).width(size).height(size),
    ]
    .spacing(4)
    .into()
}

fn bottom_bar(app: &App) -> Element<'_, Message> {
    row![text(app.status_message()).size(12)]
        .padding(5)
        .align_y(Alignment::Center)
        .width(Length::Fill)
        .into()
}
