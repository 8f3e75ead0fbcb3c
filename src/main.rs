mod app;
mod panel;
mod views;
mod widgets;

use retina_core::settings::Settings;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load_or_default();
    let size = iced::Size::new(settings.window_width, settings.window_height);

    iced::application(
        move || app::App::new(settings.clone()),
        app::App::update,
        app::App::view,
    )
    .title(app::App::title)
    .theme(app::App::theme)
    .window(iced::window::Settings {
        size,
        ..Default::default()
    })
    .antialiasing(true)
    .run()
}
