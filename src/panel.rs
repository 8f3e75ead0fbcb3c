use retina_core::histogram::Histogram;
use retina_core::kernel::Kernel3x3;
use retina_core::ops::modules::{BrightnessContrast, FindContours, MorphOp, Morphology};

/// Which secondary panel a control-column button opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Contrast,
    Morphology,
    Segmentation,
    CustomKernel,
    Histogram,
}

impl PanelKind {
    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Contrast => "Brightness/Contrast Adjustment",
            PanelKind::Morphology => "Morphological Operations",
            PanelKind::Segmentation => "Segment and Find Contours",
            PanelKind::CustomKernel => "Custom Filter",
            PanelKind::Histogram => "Histogram",
        }
    }
}

/// State of the open panel. Parameters live only as long as the panel.
#[derive(Debug, Clone)]
pub enum Panel {
    Contrast { contrast: f32, brightness: f32 },
    Morphology { kernel_size: f32 },
    Segmentation { threshold: f32 },
    CustomKernel { cells: [String; 9] },
    Histogram(Box<Histogram>),
}

pub const DEFAULT_CONTRAST: f32 = 50.0;
pub const DEFAULT_BRIGHTNESS: f32 = 50.0;
pub const DEFAULT_KERNEL_SIZE: f32 = 3.0;
pub const DEFAULT_THRESHOLD: f32 = 128.0;

impl Panel {
    /// Fresh parameter state for a panel. The histogram panel is built
    /// from data instead, see [`Panel::histogram`].
    pub fn with_defaults(kind: PanelKind) -> Option<Self> {
        match kind {
            PanelKind::Contrast => Some(Panel::Contrast {
                contrast: DEFAULT_CONTRAST,
                brightness: DEFAULT_BRIGHTNESS,
            }),
            PanelKind::Morphology => Some(Panel::Morphology {
                kernel_size: DEFAULT_KERNEL_SIZE,
            }),
            PanelKind::Segmentation => Some(Panel::Segmentation {
                threshold: DEFAULT_THRESHOLD,
            }),
            PanelKind::CustomKernel => Some(Panel::CustomKernel {
                cells: Kernel3x3::identity().to_cells(),
            }),
            PanelKind::Histogram => None,
        }
    }

    pub fn histogram(data: Histogram) -> Self {
        Panel::Histogram(Box::new(data))
    }

    pub fn kind(&self) -> PanelKind {
        match self {
            Panel::Contrast { .. } => PanelKind::Contrast,
            Panel::Morphology { .. } => PanelKind::Morphology,
            Panel::Segmentation { .. } => PanelKind::Segmentation,
            Panel::CustomKernel { .. } => PanelKind::CustomKernel,
            Panel::Histogram(_) => PanelKind::Histogram,
        }
    }

    pub fn brightness_contrast(&self) -> Option<BrightnessContrast> {
        match self {
            Panel::Contrast {
                contrast,
                brightness,
            } => Some(BrightnessContrast::from_sliders(*contrast, *brightness)),
            _ => None,
        }
    }

    pub fn morphology(&self, op: MorphOp) -> Option<Morphology> {
        match self {
            Panel::Morphology { kernel_size } => Some(Morphology {
                op,
                kernel_size: kernel_size.round().clamp(1.0, 10.0) as u32,
            }),
            _ => None,
        }
    }

    pub fn find_contours(&self, color: [u8; 3]) -> Option<FindContours> {
        match self {
            Panel::Segmentation { threshold } => Some(FindContours {
                threshold: threshold.round().clamp(0.0, 255.0) as u8,
                color,
            }),
            _ => None,
        }
    }

    /// Parse the kernel grid. `None` if this is not the kernel panel.
    pub fn kernel(&self) -> Option<anyhow::Result<Kernel3x3>> {
        match self {
            Panel::CustomKernel { cells } => Some(Kernel3x3::parse(cells)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contrast_defaults_map_to_half_gain() {
        let panel = Panel::with_defaults(PanelKind::Contrast).unwrap();
        let op = panel.brightness_contrast().unwrap();
        assert_eq!(op.alpha, 0.5);
        assert_eq!(op.beta, 0.0);
    }

    #[test]
    fn morphology_kernel_size_rounds_and_clamps() {
        let panel = Panel::Morphology { kernel_size: 4.6 };
        assert_eq!(panel.morphology(MorphOp::Erode).unwrap().kernel_size, 5);

        let panel = Panel::Morphology { kernel_size: 0.0 };
        assert_eq!(panel.morphology(MorphOp::Dilate).unwrap().kernel_size, 1);
    }

    #[test]
    fn segmentation_default_threshold() {
        let panel = Panel::with_defaults(PanelKind::Segmentation).unwrap();
        let op = panel.find_contours([0, 255, 0]).unwrap();
        assert_eq!(op.threshold, 128);
        assert_eq!(op.color, [0, 255, 0]);
    }

    #[test]
    fn kernel_panel_starts_as_identity() {
        let panel = Panel::with_defaults(PanelKind::CustomKernel).unwrap();
        let kernel = panel.kernel().unwrap().unwrap();
        assert_eq!(kernel, Kernel3x3::identity());
    }

    #[test]
    fn kernel_panel_reports_bad_cell() {
        let mut cells = Kernel3x3::identity().to_cells();
        cells[3] = "abc".into();
        let panel = Panel::CustomKernel { cells };
        let err = panel.kernel().unwrap().unwrap_err();
        assert!(err.to_string().contains("row 2, column 1"));
    }

    #[test]
    fn accessors_reject_other_panels() {
        let panel = Panel::Segmentation { threshold: 10.0 };
        assert!(panel.brightness_contrast().is_none());
        assert!(panel.morphology(MorphOp::Open).is_none());
        assert!(panel.kernel().is_none());
    }

    #[test]
    fn histogram_panel_has_no_defaults() {
        assert!(Panel::with_defaults(PanelKind::Histogram).is_none());
        let panel = Panel::histogram(Histogram::from_interleaved(&[1, 2, 3], 1));
        assert_eq!(panel.kind(), PanelKind::Histogram);
    }
}
