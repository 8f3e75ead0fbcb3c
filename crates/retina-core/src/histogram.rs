use crate::image_buf::ImageBuf;

pub const NUM_BINS: usize = 256;

/// Per-channel 256-bin sample counts.
///
/// Gray images carry one channel; color images carry R, G and B in that
/// order.
#[derive(Clone, Debug)]
pub struct Histogram {
    pub channels: Vec<[u32; NUM_BINS]>,
    pub max_count: u32,
}

impl Histogram {
    pub fn from_image(buf: &ImageBuf) -> Self {
        Self::from_interleaved(buf.as_raw(), buf.channels() as usize)
    }

    pub fn from_interleaved(samples: &[u8], channels: usize) -> Self {
        let channels = channels.max(1);
        let mut bins = vec![[0u32; NUM_BINS]; channels];

        for pixel in samples.chunks_exact(channels) {
            for (c, &v) in pixel.iter().enumerate() {
                bins[c][v as usize] += 1;
            }
        }

        // Clamped to 1 so renderers can divide by it.
        let max_count = bins
            .iter()
            .flat_map(|b| b.iter())
            .copied()
            .max()
            .unwrap_or(0)
            .max(1);

        Self {
            channels: bins,
            max_count,
        }
    }

    pub fn is_gray(&self) -> bool {
        self.channels.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn histogram_from_solid_color() {
        let buf = ImageBuf::from(RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])));
        let hist = Histogram::from_image(&buf);
        assert_eq!(hist.channels.len(), 3);
        assert_eq!(hist.channels[0][255], 4);
        assert_eq!(hist.channels[0][0], 0);
        assert_eq!(hist.channels[1][0], 4);
        assert_eq!(hist.channels[2][0], 4);
        assert_eq!(hist.max_count, 4);
    }

    #[test]
    fn gray_has_single_channel() {
        let buf = ImageBuf::from(GrayImage::from_pixel(3, 1, Luma([9])));
        let hist = Histogram::from_image(&buf);
        assert!(hist.is_gray());
        assert_eq!(hist.channels[0][9], 3);
    }

    #[test]
    fn histogram_empty_image() {
        let hist = Histogram::from_interleaved(&[], 3);
        assert_eq!(hist.max_count, 1);
    }

    #[test]
    fn histogram_gradient() {
        let mut samples = Vec::with_capacity(256 * 3);
        for i in 0..=255u8 {
            samples.extend_from_slice(&[i, 128, 0]);
        }
        let hist = Histogram::from_interleaved(&samples, 3);
        for i in 0..NUM_BINS {
            assert_eq!(hist.channels[0][i], 1);
        }
        assert_eq!(hist.channels[1][128], 256);
        assert_eq!(hist.channels[2][0], 256);
    }
}
