use iced::Color;

pub mod modal;
pub mod workspace;

pub const CANVAS_BG: Color = Color::from_rgb(0.08, 0.08, 0.08);
