use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::image::Handle;
use iced::{Element, Task, Theme};
use tracing::{error, info, warn};

use retina_core::histogram::Histogram;
use retina_core::image_buf::ImageBuf;
use retina_core::loader;
use retina_core::ops::{self, Operation, Source};
use retina_core::ops::modules::{Convolve, EqualizeHistogram, GaussianBlur, Grayscale, MorphOp};
use retina_core::settings::Settings;

use crate::panel::{Panel, PanelKind};
use crate::views;

/// An image together with its display handle.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: Arc<ImageBuf>,
    pub handle: Handle,
}

impl Rendered {
    fn new(image: ImageBuf) -> Self {
        let handle = Handle::from_rgba(image.width(), image.height(), image.to_rgba_u8());
        Self {
            image: Arc::new(image),
            handle,
        }
    }
}

pub struct App {
    settings: Settings,

    original: Option<Rendered>,
    processed: Option<Rendered>,
    file_name: Option<String>,
    info: String,

    panel: Option<Panel>,
    status_message: String,

    processing_generation: u64,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Files
    LoadImage,
    FileSelected(Option<PathBuf>),
    ImageLoaded(PathBuf, Result<Rendered, String>),
    SaveProcessed,
    SavePathSelected(Option<PathBuf>),
    Saved(Result<PathBuf, String>),

    // One-click operations
    Grayscale,
    Blur,
    EqualizeHistogram,

    // Panels
    OpenPanel(PanelKind),
    ClosePanel,
    ContrastChanged(f32),
    BrightnessChanged(f32),
    KernelSizeChanged(f32),
    ApplyMorphology(MorphOp),
    ThresholdChanged(f32),
    ApplySegmentation,
    KernelCellChanged(usize, String),
    ApplyCustomKernel,

    Processed(u64, Result<Option<Rendered>, String>),
}

impl App {
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        let app = Self {
            settings,
            original: None,
            processed: None,
            file_name: None,
            info: String::new(),
            panel: None,
            status_message: "Load an image to get started.".into(),
            processing_generation: 0,
        };
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        match &self.file_name {
            Some(name) => format!("Retina - {name}"),
            None => "Retina".into(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoadImage => Task::perform(
                async {
                    let handle = rfd::AsyncFileDialog::new()
                        .set_title("Open image")
                        .add_filter("Image files", loader::SUPPORTED_EXTENSIONS)
                        .pick_file()
                        .await;
                    handle.map(|h| h.path().to_path_buf())
                },
                Message::FileSelected,
            ),

            Message::FileSelected(Some(path)) => {
                self.status_message = format!("Loading {}...", path.display());
                let scale = self.settings.load_scale;
                Task::perform(
                    async move {
                        let p = path.clone();
                        let result = tokio::task::spawn_blocking(move || loader::load(&p, scale))
                            .await
                            .map_err(|err| err.to_string())
                            .and_then(|r| r.map_err(|err| format!("{err:#}")))
                            .map(Rendered::new);
                        (path, result)
                    },
                    |(path, result)| Message::ImageLoaded(path, result),
                )
            }

            Message::FileSelected(None) => Task::none(),

            Message::ImageLoaded(path, Ok(rendered)) => {
                self.info = rendered.image.info().to_string();
                self.file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string());
                self.status_message = format!("Loaded {}", path.display());
                self.original = Some(rendered);
                Task::none()
            }

            Message::ImageLoaded(path, Err(err)) => {
                error!(?path, %err, "failed to load image");
                self.status_message = format!("Error loading image: {err}");
                Task::none()
            }

            Message::SaveProcessed => {
                if self.processed.is_none() {
                    return Task::none();
                }
                Task::perform(
                    async {
                        let handle = rfd::AsyncFileDialog::new()
                            .set_title("Save processed image")
                            .set_file_name("processed.png")
                            .add_filter("Image files", loader::SUPPORTED_EXTENSIONS)
                            .save_file()
                            .await;
                        handle.map(|h| h.path().to_path_buf())
                    },
                    Message::SavePathSelected,
                )
            }

            Message::SavePathSelected(Some(path)) => {
                let Some(processed) = &self.processed else {
                    return Task::none();
                };
                let image = processed.image.clone();
                Task::perform(
                    async move {
                        tokio::task::spawn_blocking(move || {
                            loader::save(&image, &path).map(|()| path)
                        })
                        .await
                        .map_err(|err| err.to_string())
                        .and_then(|r| r.map_err(|err| format!("{err:#}")))
                    },
                    Message::Saved,
                )
            }

            Message::SavePathSelected(None) => Task::none(),

            Message::Saved(Ok(path)) => {
                info!(?path, "processed image saved");
                self.status_message = format!("Saved {}", path.display());
                Task::none()
            }

            Message::Saved(Err(err)) => {
                error!(%err, "failed to save image");
                self.status_message = format!("Error saving image: {err}");
                Task::none()
            }

            Message::Grayscale => self.dispatch(Box::new(Grayscale)),

            Message::Blur => self.dispatch(Box::new(GaussianBlur {
                kernel_size: self.settings.blur_kernel_size,
            })),

            Message::EqualizeHistogram => self.dispatch(Box::new(EqualizeHistogram)),

            Message::OpenPanel(kind) => {
                self.open_panel(kind);
                Task::none()
            }

            Message::ClosePanel => {
                self.panel = None;
                Task::none()
            }

            Message::ContrastChanged(v) => {
                if let Some(Panel::Contrast { contrast, .. }) = &mut self.panel {
                    *contrast = v;
                }
                self.apply_brightness_contrast()
            }

            Message::BrightnessChanged(v) => {
                if let Some(Panel::Contrast { brightness, .. }) = &mut self.panel {
                    *brightness = v;
                }
                self.apply_brightness_contrast()
            }

            Message::KernelSizeChanged(v) => {
                if let Some(Panel::Morphology { kernel_size }) = &mut self.panel {
                    *kernel_size = v;
                }
                Task::none()
            }

            Message::ApplyMorphology(op) => {
                match self.panel.as_ref().and_then(|p| p.morphology(op)) {
                    Some(morph) => self.dispatch(Box::new(morph)),
                    None => Task::none(),
                }
            }

            Message::ThresholdChanged(v) => {
                if let Some(Panel::Segmentation { threshold }) = &mut self.panel {
                    *threshold = v;
                }
                Task::none()
            }

            Message::ApplySegmentation => {
                let color = self.settings.contour_color;
                match self.panel.as_ref().and_then(|p| p.find_contours(color)) {
                    Some(op) => self.dispatch(Box::new(op)),
                    None => Task::none(),
                }
            }

            Message::KernelCellChanged(index, value) => {
                if let Some(Panel::CustomKernel { cells }) = &mut self.panel
                    && let Some(cell) = cells.get_mut(index)
                {
                    *cell = value;
                }
                Task::none()
            }

            Message::ApplyCustomKernel => match self.panel.as_ref().and_then(Panel::kernel) {
                Some(Ok(kernel)) => self.dispatch(Box::new(Convolve { kernel })),
                Some(Err(err)) => {
                    warn!(%err, "invalid kernel");
                    self.status_message = format!("Invalid kernel: {err}");
                    Task::none()
                }
                None => Task::none(),
            },

            Message::Processed(generation, result) => {
                if generation != self.processing_generation {
                    return Task::none();
                }
                match result {
                    Ok(Some(rendered)) => {
                        self.processed = Some(rendered);
                        self.status_message.clear();
                    }
                    Ok(None) => {}
                    Err(err) => {
                        error!(%err, "operation failed");
                        self.status_message = format!("Error: {err}");
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        views::workspace::view(self)
    }

    fn open_panel(&mut self, kind: PanelKind) {
        match kind {
            PanelKind::Histogram => {
                let Some(processed) = &self.processed else {
                    return;
                };
                self.panel = Some(Panel::histogram(Histogram::from_image(&processed.image)));
            }
            _ => {
                if self.original.is_none() {
                    return;
                }
                self.panel = Panel::with_defaults(kind);
            }
        }
    }

    fn apply_brightness_contrast(&mut self) -> Task<Message> {
        match self.panel.as_ref().and_then(Panel::brightness_contrast) {
            Some(op) => self.dispatch(Box::new(op)),
            None => Task::none(),
        }
    }

    /// Run `op` off the UI thread against snapshots of both slots.
    ///
    /// Skipped without a message when the slot the operation reads is empty.
    fn dispatch(&mut self, op: Box<dyn Operation>) -> Task<Message> {
        let source_loaded = match op.source() {
            Source::Original => self.original.is_some(),
            Source::Processed => self.processed.is_some(),
        };
        if !source_loaded {
            return Task::none();
        }

        self.processing_generation += 1;
        let generation = self.processing_generation;
        let original = self.original.as_ref().map(|r| r.image.clone());
        let processed = self.processed.as_ref().map(|r| r.image.clone());

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    ops::run(op.as_ref(), original.as_deref(), processed.as_deref())
                        .map(|out| out.map(Rendered::new))
                })
                .await
                .map_err(|err| err.to_string())
                .and_then(|r| r.map_err(|err| format!("{err:#}")))
            },
            move |result| Message::Processed(generation, result),
        )
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn original(&self) -> Option<&Rendered> {
        self.original.as_ref()
    }

    pub fn processed(&self) -> Option<&Rendered> {
        self.processed.as_ref()
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }
}
