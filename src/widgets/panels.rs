use iced::widget::{button, column, container, row, slider, text, text_input};
use iced::{Alignment, Element, Length};

use retina_core::ops::modules::MorphOp;

use crate::app::Message;
use crate::panel::Panel;
use crate::widgets::histogram;

pub fn view(panel: &Panel) -> Element<'_, Message> {
    let body: Element<'_, Message> = match panel {
        Panel::Contrast {
            contrast,
            brightness,
        } => column![
            labeled_slider(
                "Contrast",
                format!("{contrast:.0}"),
                0.0..=100.0,
                *contrast,
                Message::ContrastChanged,
            ),
            labeled_slider(
                "Brightness",
                format!("{brightness:.0}"),
                0.0..=100.0,
                *brightness,
                Message::BrightnessChanged,
            ),
        ]
        .spacing(12)
        .into(),

        Panel::Morphology { kernel_size } => {
            let buttons = MorphOp::ALL.iter().fold(column![].spacing(6), |col, op| {
                col.push(
                    button(text(op.label()).size(13))
                        .on_press(Message::ApplyMorphology(*op))
                        .width(300),
                )
            });
            column![
                labeled_slider(
                    "Kernel Size",
                    format!("{kernel_size:.0}"),
                    1.0..=10.0,
                    *kernel_size,
                    Message::KernelSizeChanged,
                ),
                buttons,
            ]
            .spacing(12)
            .into()
        }

        Panel::Segmentation { threshold } => column![
            labeled_slider(
                "Threshold",
                format!("{threshold:.0}"),
                0.0..=255.0,
                *threshold,
                Message::ThresholdChanged,
            ),
            button(text("Apply").size(13)).on_press(Message::ApplySegmentation),
        ]
        .spacing(12)
        .into(),

        Panel::CustomKernel { cells } => {
            let grid = (0..3).fold(column![].spacing(6), |grid, r| {
                let cells_row = (0..3).fold(row![].spacing(6), |cells_row, c| {
                    let index = r * 3 + c;
                    cells_row.push(
                        text_input("0", &cells[index])
                            .on_input(move |value| Message::KernelCellChanged(index, value))
                            .width(60),
                    )
                });
                grid.push(cells_row)
            });
            column![
                grid,
                button(text("Apply Filter").size(13)).on_press(Message::ApplyCustomKernel),
            ]
            .spacing(12)
            .align_x(Alignment::Center)
            .into()
        }

        Panel::Histogram(data) => histogram::view(data),
    };

    let header = row![
        text(panel.kind().title()).size(16),
        button(text("Close").size(12)).on_press(Message::ClosePanel),
    ]
    .spacing(24)
    .align_y(Alignment::Center);

    container(column![header, body].spacing(14))
        .padding(16)
        .width(Length::Shrink)
        .style(container::rounded_box)
        .into()
}

fn labeled_slider<'a>(
    label: &'static str,
    value_text: String,
    range: std::ops::RangeInclusive<f32>,
    value: f32,
    on_change: impl Fn(f32) -> Message + 'a,
) -> Element<'a, Message> {
    column![
        row![text(label).size(12), text(value_text).size(12),].spacing(8),
        slider(range, value, on_change).step(1.0).width(300),
    ]
    .spacing(4)
    .into()
}
