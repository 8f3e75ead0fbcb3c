pub mod modules;
pub mod operation;

use anyhow::Result;
use image::{GrayImage, RgbImage};
use tracing::debug;

use crate::image_buf::ImageBuf;
pub use operation::{Operation, Source};

/// Run `op` against whichever slot it reads from.
///
/// Returns `Ok(None)` when that slot is empty: the operation is skipped
/// without error.
pub fn run(
    op: &dyn Operation,
    original: Option<&ImageBuf>,
    processed: Option<&ImageBuf>,
) -> Result<Option<ImageBuf>> {
    let input = match op.source() {
        Source::Original => original,
        Source::Processed => processed,
    };
    let Some(input) = input else {
        debug!(op = op.name(), "no source image, skipping");
        return Ok(None);
    };

    let t0 = std::time::Instant::now();
    let output = op.apply(input)?;
    debug!(
        op = op.name(),
        w = output.width(),
        h = output.height(),
        channels = output.channels(),
        elapsed_ms = t0.elapsed().as_millis(),
        "operation applied"
    );
    Ok(Some(output))
}

/// Apply a single-channel transform to every channel of `input`.
pub(crate) fn per_channel(input: &ImageBuf, f: impl Fn(&GrayImage) -> GrayImage) -> ImageBuf {
    match input {
        ImageBuf::Gray(img) => ImageBuf::Gray(f(img)),
        ImageBuf::Color(img) => {
            let planes: Vec<GrayImage> = (0..3).map(|c| f(&extract_plane(img, c))).collect();
            ImageBuf::Color(merge_planes(&planes, img.width(), img.height()))
        }
    }
}

fn extract_plane(img: &RgbImage, channel: usize) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        image::Luma([img.get_pixel(x, y).0[channel]])
    })
}

fn merge_planes(planes: &[GrayImage], width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            planes[0].get_pixel(x, y).0[0],
            planes[1].get_pixel(x, y).0[0],
            planes[2].get_pixel(x, y).0[0],
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};
    use super::modules::{EqualizeHistogram, Grayscale};

    fn color(w: u32, h: u32) -> ImageBuf {
        ImageBuf::from(RgbImage::from_pixel(w, h, Rgb([200, 100, 50])))
    }

    #[test]
    fn skipped_without_original() {
        let out = run(&Grayscale, None, Some(&color(2, 2))).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn reads_original_slot() {
        let original = color(4, 3);
        let processed = ImageBuf::from(GrayImage::new(1, 1));
        let out = run(&Grayscale, Some(&original), Some(&processed))
            .unwrap()
            .unwrap();
        assert_eq!((out.width(), out.height()), (4, 3));
    }

    #[test]
    fn equalize_reads_processed_slot() {
        let original = color(4, 4);
        assert!(
            run(&EqualizeHistogram, Some(&original), None)
                .unwrap()
                .is_none()
        );

        let processed = ImageBuf::from(GrayImage::from_pixel(2, 1, Luma([7])));
        let out = run(&EqualizeHistogram, Some(&original), Some(&processed))
            .unwrap()
            .unwrap();
        assert_eq!((out.width(), out.height()), (2, 1));
    }

    #[test]
    fn per_channel_keeps_channels_apart() {
        let input = color(2, 2);
        let out = per_channel(&input, |plane| plane.clone());
        assert_eq!(out, input);

        let inverted = per_channel(&input, |plane| {
            GrayImage::from_fn(plane.width(), plane.height(), |x, y| {
                Luma([255 - plane.get_pixel(x, y).0[0]])
            })
        });
        assert_eq!(&inverted.as_raw()[..3], &[55, 155, 205]);
    }
}
