use iced::mouse;
use iced::widget::canvas::{self, Frame, Path};
use iced::{Color, Element, Length, Rectangle, Renderer, Theme};

use retina_core::histogram::{Histogram, NUM_BINS};

use crate::app::Message;

const HISTOGRAM_WIDTH: f32 = 512.0;
const HISTOGRAM_HEIGHT: f32 = 200.0;

struct HistogramCanvas {
    data: Histogram,
}

/// Fill color per channel: R, G, B for color images, white for gray.
fn channel_colors(channels: usize) -> Vec<Color> {
    if channels == 1 {
        vec![Color::from_rgba(1.0, 1.0, 1.0, 0.6)]
    } else {
        vec![
            Color::from_rgba(1.0, 0.0, 0.0, 0.4),
            Color::from_rgba(0.0, 1.0, 0.0, 0.4),
            Color::from_rgba(0.0, 0.4, 1.0, 0.4),
        ]
    }
}

/// Log-scaled bar height so sparse bins stay visible next to dominant ones.
fn bar_height(count: u32, max_count: u32, height: f32) -> f32 {
    let max = (max_count.max(1) as f32).ln_1p();
    (count as f32).ln_1p() / max * height
}

impl<Message> canvas::Program<Message> for HistogramCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        frame.fill_rectangle(
            iced::Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.1, 0.1, 0.1),
        );

        let w = bounds.width;
        let h = bounds.height;
        let bin_width = w / NUM_BINS as f32;
        let data = &self.data;

        for (bins, color) in data.channels.iter().zip(channel_colors(data.channels.len())) {
            let path = Path::new(|builder| {
                builder.move_to(iced::Point::new(0.0, h));
                for (i, &count) in bins.iter().enumerate() {
                    let x = i as f32 * bin_width;
                    builder.line_to(iced::Point::new(x, h - bar_height(count, data.max_count, h)));
                }
                builder.line_to(iced::Point::new(w, h));
                builder.close();
            });
            frame.fill(&path, color);
        }

        vec![frame.into_geometry()]
    }
}

pub fn view<'a>(histogram: &Histogram) -> Element<'a, Message> {
    iced::widget::canvas(HistogramCanvas {
        data: histogram.clone(),
    })
    .width(Length::Fixed(HISTOGRAM_WIDTH))
    .height(HISTOGRAM_HEIGHT)
    .into()
}
