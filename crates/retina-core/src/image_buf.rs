use std::fmt;

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::map_colors;

/// 8-bit image held in one of the two application slots.
///
/// Loaded files are always `Color`. Operations that reduce to luminance
/// (grayscale, equalization) produce `Gray`.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageBuf {
    Color(RgbImage),
    Gray(GrayImage),
}

/// Basic shape information shown under the original image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dimensions: {}x{}, Channels: {}",
            self.width, self.height, self.channels
        )
    }
}

impl ImageBuf {
    pub fn width(&self) -> u32 {
        match self {
            ImageBuf::Color(img) => img.width(),
            ImageBuf::Gray(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            ImageBuf::Color(img) => img.height(),
            ImageBuf::Gray(img) => img.height(),
        }
    }

    pub fn channels(&self) -> u8 {
        match self {
            ImageBuf::Color(_) => 3,
            ImageBuf::Gray(_) => 1,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width(),
            height: self.height(),
            channels: self.channels(),
        }
    }

    /// Interleaved samples, `channels()` per pixel.
    pub fn as_raw(&self) -> &[u8] {
        match self {
            ImageBuf::Color(img) => img.as_raw(),
            ImageBuf::Gray(img) => img.as_raw(),
        }
    }

    /// Rebuild an image of the same kind and size from interleaved samples.
    pub(crate) fn with_samples(&self, data: Vec<u8>) -> anyhow::Result<Self> {
        let (w, h) = (self.width(), self.height());
        let expected = w as usize * h as usize * self.channels() as usize;
        anyhow::ensure!(
            data.len() == expected,
            "expected {expected} samples for {w}x{h}x{}, got {}",
            self.channels(),
            data.len()
        );
        let rebuilt = match self {
            ImageBuf::Color(_) => RgbImage::from_raw(w, h, data).map(ImageBuf::Color),
            ImageBuf::Gray(_) => GrayImage::from_raw(w, h, data).map(ImageBuf::Gray),
        };
        rebuilt.ok_or_else(|| anyhow::anyhow!("sample buffer does not fit {w}x{h}"))
    }

    /// Color view of the image. Gray samples are replicated into R, G and B.
    pub fn to_rgb(&self) -> RgbImage {
        match self {
            ImageBuf::Color(img) => img.clone(),
            ImageBuf::Gray(img) => DynamicImage::ImageLuma8(img.clone()).to_rgb8(),
        }
    }

    /// Luminance view of the image, Rec.601 weights.
    pub fn to_gray(&self) -> GrayImage {
        match self {
            ImageBuf::Color(img) => map_colors(img, |p| Luma([luma601(p)])),
            ImageBuf::Gray(img) => img.clone(),
        }
    }

    /// RGBA u8 for display, alpha = 255.
    pub fn to_rgba_u8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixel_count() * 4);
        match self {
            ImageBuf::Color(img) => {
                for pixel in img.as_raw().chunks_exact(3) {
                    out.extend_from_slice(&[pixel[0], pixel[1], pixel[2], 255]);
                }
            }
            ImageBuf::Gray(img) => {
                for &v in img.as_raw() {
                    out.extend_from_slice(&[v, v, v, 255]);
                }
            }
        }
        out
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            ImageBuf::Color(img) => DynamicImage::ImageRgb8(img),
            ImageBuf::Gray(img) => DynamicImage::ImageLuma8(img),
        }
    }
}

// 14-bit fixed point, weights sum to 1 << 14.
fn luma601(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    let y = r as u32 * 4899 + g as u32 * 9617 + b as u32 * 1868;
    ((y + (1 << 13)) >> 14) as u8
}

impl From<RgbImage> for ImageBuf {
    fn from(img: RgbImage) -> Self {
        ImageBuf::Color(img)
    }
}

impl From<GrayImage> for ImageBuf {
    fn from(img: GrayImage) -> Self {
        ImageBuf::Gray(img)
    }
}
