use anyhow::Result;

use crate::image_buf::ImageBuf;
use crate::ops::Operation;

/// Linear scale and offset of every sample: `|alpha * p + beta|`,
/// rounded half to even and saturated to `0..=255`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrightnessContrast {
    /// Contrast gain.
    pub alpha: f32,
    /// Brightness offset in sample units.
    pub beta: f32,
}

impl BrightnessContrast {
    /// Map the two 0..=100 panel sliders to gain and offset.
    ///
    /// Contrast 100 is unity gain; brightness 50 is no offset.
    pub fn from_sliders(contrast: f32, brightness: f32) -> Self {
        Self {
            alpha: contrast / 100.0,
            beta: brightness - 50.0,
        }
    }

    fn lut(&self) -> [u8; 256] {
        let mut lut = [0u8; 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            let v = (self.alpha * i as f32 + self.beta).abs().round_ties_even();
            *entry = v.min(255.0) as u8;
        }
        lut
    }
}

impl Operation for BrightnessContrast {
    fn name(&self) -> &str {
        "brightness_contrast"
    }

    fn apply(&self, input: &ImageBuf) -> Result<ImageBuf> {
        anyhow::ensure!(
            self.alpha.is_finite() && self.beta.is_finite(),
            "contrast and brightness must be finite"
        );
        let lut = self.lut();
        let data = input.as_raw().iter().map(|&v| lut[v as usize]).collect();
        input.with_samples(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn gray(v: u8) -> ImageBuf {
        ImageBuf::from(GrayImage::from_pixel(1, 1, Luma([v])))
    }

    #[test]
    fn unity_gain_no_offset_is_identity() {
        let buf = ImageBuf::from(RgbImage::from_fn(4, 4, |x, y| {
            Rgb([(x * 60) as u8, (y * 60) as u8, 7])
        }));
        let op = BrightnessContrast { alpha: 1.0, beta: 0.0 };
        assert_eq!(op.apply(&buf).unwrap(), buf);
    }

    #[test]
    fn default_sliders_halve_intensity() {
        let op = BrightnessContrast::from_sliders(50.0, 50.0);
        assert_eq!(op.alpha, 0.5);
        assert_eq!(op.beta, 0.0);
        assert_eq!(op.apply(&gray(200)).unwrap().as_raw(), &[100]);
    }

    #[test]
    fn brightness_slider_offsets() {
        let op = BrightnessContrast::from_sliders(100.0, 80.0);
        assert_eq!(op.apply(&gray(100)).unwrap().as_raw(), &[130]);
    }

    #[test]
    fn saturates_at_255() {
        let op = BrightnessContrast { alpha: 2.0, beta: 50.0 };
        assert_eq!(op.apply(&gray(200)).unwrap().as_raw(), &[255]);
    }

    #[test]
    fn negative_results_fold_to_absolute() {
        let op = BrightnessContrast::from_sliders(0.0, 0.0);
        // 0 * p - 50 => |-50|
        assert_eq!(op.apply(&gray(123)).unwrap().as_raw(), &[50]);
    }

    #[test]
    fn rounds_to_nearest() {
        let op = BrightnessContrast { alpha: 0.5, beta: 0.0 };
        assert_eq!(op.apply(&gray(3)).unwrap().as_raw(), &[2]);
        assert_eq!(op.apply(&gray(5)).unwrap().as_raw(), &[2]);
    }

    #[test]
    fn default_sliders_round_odd_samples_to_even() {
        let buf = ImageBuf::from(GrayImage::from_fn(4, 1, |x, _| Luma([(x * 2 + 1) as u8])));
        let op = BrightnessContrast::from_sliders(50.0, 50.0);
        assert_eq!(op.apply(&buf).unwrap().as_raw(), &[0, 2, 2, 4]);
    }

    #[test]
    fn non_finite_rejected() {
        let op = BrightnessContrast {
            alpha: f32::NAN,
            beta: 0.0,
        };
        assert!(op.apply(&gray(1)).is_err());
    }
}
