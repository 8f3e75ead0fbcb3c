use anyhow::Result;
use image::{GrayImage, Luma};
use imageproc::morphology::{
    Mask, grayscale_close, grayscale_dilate, grayscale_erode, grayscale_open,
};

use crate::image_buf::ImageBuf;
use crate::ops::{Operation, per_channel};

pub const MAX_KERNEL_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphOp {
    Erode,
    Dilate,
    Open,
    Close,
    Gradient,
}

impl MorphOp {
    pub const ALL: [MorphOp; 5] = [
        MorphOp::Erode,
        MorphOp::Dilate,
        MorphOp::Open,
        MorphOp::Close,
        MorphOp::Gradient,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MorphOp::Erode => "Erosion",
            MorphOp::Dilate => "Dilation",
            MorphOp::Open => "Opening",
            MorphOp::Close => "Closing",
            MorphOp::Gradient => "Gradient",
        }
    }
}

/// Morphology with a `kernel_size x kernel_size` rectangle anchored at its
/// center, applied to each channel independently.
///
/// Samples outside the image never win the min/max.
pub struct Morphology {
    pub op: MorphOp,
    pub kernel_size: u32,
}

impl Morphology {
    fn mask(&self) -> Result<Mask> {
        anyhow::ensure!(
            (1..=MAX_KERNEL_SIZE).contains(&self.kernel_size),
            "morphology kernel size must be in 1..={MAX_KERNEL_SIZE}, got {}",
            self.kernel_size
        );
        let k = self.kernel_size;
        let rect = GrayImage::from_pixel(k, k, Luma([255]));
        let anchor = (k / 2) as u8;
        Ok(Mask::from_image(&rect, anchor, anchor))
    }
}

impl Operation for Morphology {
    fn name(&self) -> &str {
        match self.op {
            MorphOp::Erode => "erode",
            MorphOp::Dilate => "dilate",
            MorphOp::Open => "open",
            MorphOp::Close => "close",
            MorphOp::Gradient => "morph_gradient",
        }
    }

    fn apply(&self, input: &ImageBuf) -> Result<ImageBuf> {
        let mask = self.mask()?;
        let out = match self.op {
            MorphOp::Erode => per_channel(input, |plane| grayscale_erode(plane, &mask)),
            MorphOp::Dilate => per_channel(input, |plane| grayscale_dilate(plane, &mask)),
            MorphOp::Open => per_channel(input, |plane| grayscale_open(plane, &mask)),
            MorphOp::Close => per_channel(input, |plane| grayscale_close(plane, &mask)),
            MorphOp::Gradient => per_channel(input, |plane| {
                let dilated = grayscale_dilate(plane, &mask);
                let eroded = grayscale_erode(plane, &mask);
                GrayImage::from_fn(plane.width(), plane.height(), |x, y| {
                    let hi = dilated.get_pixel(x, y).0[0];
                    let lo = eroded.get_pixel(x, y).0[0];
                    Luma([hi.saturating_sub(lo)])
                })
            }),
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn dot_image() -> ImageBuf {
        let mut img = GrayImage::new(7, 7);
        img.put_pixel(3, 3, Luma([200]));
        ImageBuf::from(img)
    }

    fn textured() -> ImageBuf {
        ImageBuf::from(RgbImage::from_fn(8, 6, |x, y| {
            Rgb([(x * 31 % 256) as u8, (y * 47 % 256) as u8, ((x + y) * 13) as u8])
        }))
    }

    fn gray_at(buf: &ImageBuf, x: u32, y: u32) -> u8 {
        match buf {
            ImageBuf::Gray(img) => img.get_pixel(x, y).0[0],
            ImageBuf::Color(_) => panic!("expected gray"),
        }
    }

    #[test]
    fn dilate_grows_a_dot() {
        let out = Morphology {
            op: MorphOp::Dilate,
            kernel_size: 3,
        }
        .apply(&dot_image())
        .unwrap();
        assert_eq!(gray_at(&out, 2, 2), 200);
        assert_eq!(gray_at(&out, 4, 4), 200);
        assert_eq!(gray_at(&out, 1, 1), 0);
    }

    #[test]
    fn erode_removes_a_dot() {
        let out = Morphology {
            op: MorphOp::Erode,
            kernel_size: 3,
        }
        .apply(&dot_image())
        .unwrap();
        assert!(out.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn erode_never_increases_dilate_never_decreases() {
        let input = textured();
        let eroded = Morphology {
            op: MorphOp::Erode,
            kernel_size: 4,
        }
        .apply(&input)
        .unwrap();
        let dilated = Morphology {
            op: MorphOp::Dilate,
            kernel_size: 4,
        }
        .apply(&input)
        .unwrap();
        for ((&i, &e), &d) in input
            .as_raw()
            .iter()
            .zip(eroded.as_raw())
            .zip(dilated.as_raw())
        {
            assert!(e <= i && i <= d);
        }
    }

    #[test]
    fn border_does_not_leak_into_erosion() {
        let input = ImageBuf::from(GrayImage::from_pixel(5, 5, Luma([180])));
        let out = Morphology {
            op: MorphOp::Erode,
            kernel_size: 5,
        }
        .apply(&input)
        .unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn gradient_of_uniform_is_zero() {
        let input = ImageBuf::from(RgbImage::from_pixel(6, 6, Rgb([90, 20, 240])));
        let out = Morphology {
            op: MorphOp::Gradient,
            kernel_size: 3,
        }
        .apply(&input)
        .unwrap();
        assert_eq!(out.channels(), 3);
        assert!(out.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn gradient_outlines_a_dot() {
        let out = Morphology {
            op: MorphOp::Gradient,
            kernel_size: 3,
        }
        .apply(&dot_image())
        .unwrap();
        assert_eq!(gray_at(&out, 2, 3), 200);
        assert_eq!(gray_at(&out, 0, 0), 0);
    }

    #[test]
    fn opening_removes_small_bright_detail() {
        let out = Morphology {
            op: MorphOp::Open,
            kernel_size: 3,
        }
        .apply(&dot_image())
        .unwrap();
        assert!(out.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn closing_fills_a_small_hole() {
        let mut img = GrayImage::from_pixel(7, 7, Luma([150]));
        img.put_pixel(3, 3, Luma([0]));
        let out = Morphology {
            op: MorphOp::Close,
            kernel_size: 3,
        }
        .apply(&ImageBuf::from(img))
        .unwrap();
        assert_eq!(gray_at(&out, 3, 3), 150);
    }

    #[test]
    fn kernel_size_one_is_identity() {
        let input = textured();
        for op in MorphOp::ALL {
            let out = Morphology { op, kernel_size: 1 }.apply(&input).unwrap();
            if op == MorphOp::Gradient {
                assert!(out.as_raw().iter().all(|&v| v == 0));
            } else {
                assert_eq!(out, input, "{} with 1x1 kernel", op.label());
            }
        }
    }

    #[test]
    fn out_of_range_kernel_rejected() {
        for kernel_size in [0, 11] {
            let op = Morphology {
                op: MorphOp::Erode,
                kernel_size,
            };
            assert!(op.apply(&dot_image()).is_err());
        }
    }
}
