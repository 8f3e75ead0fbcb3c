use anyhow::Result;
use image::{GrayImage, Rgb};
use imageproc::contours::{Contour, find_contours};
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::drawing::draw_line_segment_mut;
use imageproc::point::Point;
use tracing::debug;

use crate::image_buf::ImageBuf;
use crate::ops::Operation;

/// Binary segmentation of luminance: samples strictly above `threshold`
/// become 255, the rest 0.
pub struct Threshold {
    pub threshold: u8,
}

impl Threshold {
    fn binary(&self, input: &ImageBuf) -> GrayImage {
        threshold(&input.to_gray(), self.threshold, ThresholdType::Binary)
    }
}

impl Operation for Threshold {
    fn name(&self) -> &str {
        "threshold"
    }

    fn apply(&self, input: &ImageBuf) -> Result<ImageBuf> {
        Ok(ImageBuf::Gray(self.binary(input)))
    }
}

/// Threshold the image, trace the borders of every foreground region and
/// outline them on a color copy of the input.
///
/// A fully foreground image has no region border inside it, so its frame
/// is outlined instead.
pub struct FindContours {
    pub threshold: u8,
    pub color: [u8; 3],
}

impl Operation for FindContours {
    fn name(&self) -> &str {
        "find_contours"
    }

    fn apply(&self, input: &ImageBuf) -> Result<ImageBuf> {
        let binary = Threshold {
            threshold: self.threshold,
        }
        .binary(input);
        let contours: Vec<Contour<i32>> = find_contours(&binary);
        debug!(count = contours.len(), threshold = self.threshold, "contours found");

        let mut canvas = input.to_rgb();
        let color = Rgb(self.color);
        if contours.is_empty() && is_all_foreground(&binary) {
            draw_closed_outline(&mut canvas, &frame(&binary), color);
        }
        for contour in &contours {
            draw_closed_outline(&mut canvas, &contour.points, color);
        }
        Ok(ImageBuf::Color(canvas))
    }
}

fn is_all_foreground(binary: &GrayImage) -> bool {
    let samples = binary.as_raw();
    !samples.is_empty() && samples.iter().all(|&v| v > 0)
}

fn frame(binary: &GrayImage) -> Vec<Point<i32>> {
    let (right, bottom) = (binary.width() as i32 - 1, binary.height() as i32 - 1);
    vec![
        Point::new(0, 0),
        Point::new(right, 0),
        Point::new(right, bottom),
        Point::new(0, bottom),
    ]
}

fn draw_closed_outline(canvas: &mut image::RgbImage, points: &[Point<i32>], color: Rgb<u8>) {
    match points.len() {
        0 => {}
        1 => {
            let p = points[0];
            canvas.put_pixel(p.x as u32, p.y as u32, color);
        }
        n => {
            for i in 0..n {
                let a = points[i];
                let b = points[(i + 1) % n];
                draw_line_segment_mut(
                    canvas,
                    (a.x as f32, a.y as f32),
                    (b.x as f32, b.y as f32),
                    color,
                );
            }
        }
    }
}
