// src/video/processor.rs - Letterboxing and crossfade blending

use image::imageops::{self, FilterType};
use image::DynamicImage;
use tracing::debug;

use crate::error::{FrameError, Result};
use crate::video::types::Frame;

/// Fits photos onto the fixed slideshow canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameProcessor {
    width: u32,
    height: u32,
}

impl FrameProcessor {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidParameters {
                details: format!("canvas must be non-empty, got {}x{}", width, height),
            }
            .into());
        }
        Ok(Self { width, height })
    }

    /// Size of a photo after fit-to-width scaling.
    ///
    /// Height follows the aspect ratio even when it overflows the canvas;
    /// tall photos are cropped by [`FrameProcessor::paste_offset`], not shrunk.
    pub fn scaled_size(&self, image_width: u32, image_height: u32) -> (u32, u32) {
        let aspect = image_width as f64 / image_height.max(1) as f64;
        let new_height = (self.width as f64 / aspect).round().max(1.0) as u32;
        (self.width, new_height)
    }

    /// Top-left paste position that centers a `(w, h)` image, floored.
    /// Negative when the image is larger than the canvas.
    pub fn paste_offset(&self, scaled_width: u32, scaled_height: u32) -> (i64, i64) {
        let dx = self.width as i64 - scaled_width as i64;
        let dy = self.height as i64 - scaled_height as i64;
        (dx.div_euclid(2), dy.div_euclid(2))
    }

    /// Scale a photo to the canvas width and center it on black
    pub fn composite(&self, image: &DynamicImage) -> Frame {
        let (new_width, new_height) = self.scaled_size(image.width(), image.height());
        let (paste_x, paste_y) = self.paste_offset(new_width, new_height);

        debug!(
            "Compositing {}x{} -> {}x{} at ({}, {})",
            image.width(),
            image.height(),
            new_width,
            new_height,
            paste_x,
            paste_y
        );

        // Lanczos3 matches the quality we expect from photo downscaling
        let resized = imageops::resize(&image.to_rgb8(), new_width, new_height, FilterType::Lanczos3);

        let mut frame = Frame::new_black(self.width, self.height);
        imageops::replace(frame.as_image_mut(), &resized, paste_x, paste_y);
        frame
    }
}

/// Linear blend `from * (1 - alpha) + to * alpha`, per channel, truncated
/// towards zero.
///
/// Both frames must share the same dimensions.
pub fn crossfade(from: &Frame, to: &Frame, alpha: f64) -> Result<Frame> {
    if from.width() != to.width() || from.height() != to.height() {
        return Err(FrameError::InvalidParameters {
            details: format!(
                "cannot blend {}x{} with {}x{}",
                from.width(),
                from.height(),
                to.width(),
                to.height()
            ),
        }
        .into());
    }

    let alpha = alpha.clamp(0.0, 1.0);
    let mut out = from.clone();
    let raw: &mut [u8] = out.as_image_mut();
    for (dst, src) in raw.iter_mut().zip(to.as_image().as_raw().iter()) {
        let a = *dst as f64;
        let b = *src as f64;
        *dst = (a + alpha * (b - a)).clamp(0.0, 255.0) as u8;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_wide_image_is_letterboxed() {
        let processor = FrameProcessor::new(100, 200).unwrap();
        assert_eq!(processor.scaled_size(400, 200), (100, 50));
        assert_eq!(processor.paste_offset(100, 50), (0, 75));

        let frame = processor.composite(&solid(400, 200, [255, 255, 255]));
        assert_eq!((frame.width(), frame.height()), (100, 200));
        assert_eq!(frame.get_pixel(50, 10), [0, 0, 0]);
        assert_eq!(frame.get_pixel(50, 190), [0, 0, 0]);
        assert!(frame.get_pixel(50, 100).iter().all(|&c| c > 250));
    }

    #[test]
    fn test_tall_image_is_fit_to_width_and_cropped() {
        // Square photo on a 2:1 landscape canvas overflows vertically
        let processor = FrameProcessor::new(200, 100).unwrap();
        assert_eq!(processor.scaled_size(50, 50), (200, 200));
        assert_eq!(processor.paste_offset(200, 200), (0, -50));

        let mut photo = RgbImage::from_pixel(50, 50, Rgb([0, 255, 0]));
        for x in 0..50 {
            for y in 0..5 {
                photo.put_pixel(x, y, Rgb([255, 0, 0]));
                photo.put_pixel(x, 49 - y, Rgb([0, 0, 255]));
            }
        }

        let frame = processor.composite(&DynamicImage::ImageRgb8(photo));
        assert_eq!((frame.width(), frame.height()), (200, 100));
        // Red and blue bands are cut off symmetrically, only green remains
        for y in [0, 50, 99] {
            let [r, g, b] = frame.get_pixel(100, y);
            assert!(g > 200 && r < 50 && b < 50, "row {} was {:?}", y, (r, g, b));
        }
    }

    #[test]
    fn test_odd_overflow_floors_offset() {
        let processor = FrameProcessor::new(10, 10).unwrap();
        assert_eq!(processor.paste_offset(10, 13), (0, -2));
        assert_eq!(processor.paste_offset(10, 7), (0, 1));
    }

    #[test]
    fn test_extreme_panorama_keeps_one_row() {
        let processor = FrameProcessor::new(10, 10).unwrap();
        assert_eq!(processor.scaled_size(10_000, 1), (10, 1));
    }

    #[test]
    fn test_zero_canvas_rejected() {
        assert!(FrameProcessor::new(0, 10).is_err());
    }

    #[test]
    fn test_crossfade_endpoints_and_midpoint() {
        let black = Frame::new_black(4, 4);
        let white = Frame::new_filled(4, 4, [255, 255, 255]);

        assert_eq!(crossfade(&black, &white, 0.0).unwrap(), black);
        assert_eq!(crossfade(&black, &white, 1.0).unwrap(), white);
        assert_eq!(crossfade(&black, &white, 0.5).unwrap().get_pixel(1, 1), [127, 127, 127]);
    }

    #[test]
    fn test_crossfade_truncates_fractional_levels() {
        let from = Frame::new_filled(2, 2, [0, 100, 200]);
        let to = Frame::new_filled(2, 2, [100, 0, 201]);

        // 33.33, 66.67 and 200.33 all drop their fraction
        let blended = crossfade(&from, &to, 1.0 / 3.0).unwrap();
        assert_eq!(blended.get_pixel(0, 0), [33, 66, 200]);
    }

    #[test]
    fn test_crossfade_size_mismatch() {
        let a = Frame::new_black(4, 4);
        let b = Frame::new_black(4, 5);
        assert!(crossfade(&a, &b, 0.5).is_err());
    }
}
