mod blur;
mod brightness_contrast;
mod contours;
mod convolve;
mod equalize;
mod grayscale;
mod morphology;

pub use blur::{GaussianBlur, sigma_for_kernel_size};
pub use brightness_contrast::BrightnessContrast;
pub use contours::{FindContours, Threshold};
pub use convolve::Convolve;
pub use equalize::EqualizeHistogram;
pub use grayscale::Grayscale;
pub use morphology::{MorphOp, Morphology};
