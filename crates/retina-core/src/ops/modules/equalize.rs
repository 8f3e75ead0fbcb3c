use anyhow::Result;
use imageproc::contrast::equalize_histogram;

use crate::image_buf::ImageBuf;
use crate::ops::{Operation, Source};

/// Histogram equalization of the luminance of the processed image.
pub struct EqualizeHistogram;

impl Operation for EqualizeHistogram {
    fn name(&self) -> &str {
        "equalize_histogram"
    }

    fn source(&self) -> Source {
        Source::Processed
    }

    fn apply(&self, input: &ImageBuf) -> Result<ImageBuf> {
        Ok(ImageBuf::Gray(equalize_histogram(&input.to_gray())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn output_is_single_channel() {
        let buf = ImageBuf::from(RgbImage::from_pixel(4, 4, Rgb([30, 60, 90])));
        let out = EqualizeHistogram.apply(&buf).unwrap();
        assert_eq!(out.channels(), 1);
        assert_eq!((out.width(), out.height()), (4, 4));
    }

    #[test]
    fn two_level_image_spreads_to_full_range() {
        let buf = ImageBuf::from(GrayImage::from_fn(8, 8, |x, _| {
            Luma([if x < 4 { 100 } else { 110 }])
        }));
        let out = EqualizeHistogram.apply(&buf).unwrap();
        let max = *out.as_raw().iter().max().unwrap();
        let min = *out.as_raw().iter().min().unwrap();
        assert_eq!(max, 255);
        assert!(max - min > 100, "range {min}..{max} should widen");
    }

    #[test]
    fn preserves_ordering() {
        let buf = ImageBuf::from(GrayImage::from_fn(16, 1, |x, _| Luma([40 + x as u8 * 3])));
        let out = EqualizeHistogram.apply(&buf).unwrap();
        assert!(out.as_raw().windows(2).all(|w| w[0] <= w[1]));
    }
}
