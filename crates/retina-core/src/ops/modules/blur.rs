use anyhow::Result;
use imageproc::filter::gaussian_blur_f32;

use crate::image_buf::ImageBuf;
use crate::ops::Operation;

/// Gaussian blur over a square `kernel_size` window.
pub struct GaussianBlur {
    pub kernel_size: u32,
}

/// Standard deviation implied by a kernel side when none is given
/// explicitly: `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel_size(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

impl Operation for GaussianBlur {
    fn name(&self) -> &str {
        "gaussian_blur"
    }

    fn apply(&self, input: &ImageBuf) -> Result<ImageBuf> {
        anyhow::ensure!(
            self.kernel_size % 2 == 1,
            "blur kernel size must be odd, got {}",
            self.kernel_size
        );
        if self.kernel_size == 1 {
            return Ok(input.clone());
        }

        let sigma = sigma_for_kernel_size(self.kernel_size);
        Ok(match input {
            ImageBuf::Color(img) => ImageBuf::Color(gaussian_blur_f32(img, sigma)),
            ImageBuf::Gray(img) => ImageBuf::Gray(gaussian_blur_f32(img, sigma)),
        })
    }
}
