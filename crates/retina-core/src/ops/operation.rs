use anyhow::Result;

use crate::image_buf::ImageBuf;

/// Which image slot an operation reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Original,
    Processed,
}

/// A single image-processing primitive bound to its parameters.
///
/// Operations never mutate their input; the result always replaces the
/// processed slot.
pub trait Operation: Send + Sync {
    fn name(&self) -> &str;

    fn source(&self) -> Source {
        Source::Original
    }

    fn apply(&self, input: &ImageBuf) -> Result<ImageBuf>;
}
