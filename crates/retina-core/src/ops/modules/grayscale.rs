use anyhow::Result;

use crate::image_buf::ImageBuf;
use crate::ops::Operation;

/// Color to single-channel luminance.
pub struct Grayscale;

impl Operation for Grayscale {
    fn name(&self) -> &str {
        "grayscale"
    }

    fn apply(&self, input: &ImageBuf) -> Result<ImageBuf> {
        Ok(ImageBuf::Gray(input.to_gray()))
    }
}
