use anyhow::Result;
use imageproc::filter::filter3x3;

use crate::image_buf::ImageBuf;
use crate::kernel::Kernel3x3;
use crate::ops::Operation;

/// 2-D correlation with a user-supplied 3x3 kernel, per channel. Sums are
/// rounded half to even and saturated back to 8 bits. Edges are padded by
/// continuity.
pub struct Convolve {
    pub kernel: Kernel3x3,
}

impl Operation for Convolve {
    fn name(&self) -> &str {
        "convolve3x3"
    }

    fn apply(&self, input: &ImageBuf) -> Result<ImageBuf> {
        let kernel = self.kernel.as_slice();
        let sums = match input {
            ImageBuf::Color(img) => filter3x3::<_, f32, f32>(img, &kernel).into_raw(),
            ImageBuf::Gray(img) => filter3x3::<_, f32, f32>(img, &kernel).into_raw(),
        };
        let data = sums
            .into_iter()
            .map(|v| v.round_ties_even().clamp(0.0, 255.0) as u8)
            .collect();
        input.with_samples(data)
    }
}
