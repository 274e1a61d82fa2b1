use image::{ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A composited slideshow frame
///
/// Thin wrapper around an RGB buffer of exactly the canvas size. Frames are
/// ephemeral: one is built per photo and per transition step.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    buffer: RgbImage,
}

impl Frame {
    /// Create a new frame with the given dimensions filled with black
    pub fn new_black(width: u32, height: u32) -> Self {
        let buffer = ImageBuffer::new(width, height);
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let buffer = ImageBuffer::from_fn(width, height, |_, _| Rgb(color));
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Get a mutable reference to the underlying image buffer
    pub fn as_image_mut(&mut self) -> &mut RgbImage {
        &mut self.buffer
    }

    /// Save the frame as a JPEG file at the given quality (1-100)
    pub fn save_jpeg<P: AsRef<Path>>(&self, path: P, quality: u8) -> Result<(), image::ImageError> {
        use std::io::Write;

        let file = std::fs::File::create(path.as_ref()).map_err(image::ImageError::IoError)?;
        let mut writer = std::io::BufWriter::new(file);
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, quality).encode(
            self.buffer.as_raw(),
            self.width(),
            self.height(),
            image::ColorType::Rgb8,
        )?;
        writer.flush().map_err(image::ImageError::IoError)
    }
}

/// Canvas and encoder parameters for one slideshow run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoParams {
    /// Output frame rate
    pub fps: u32,

    /// Target resolution (width, height)
    pub resolution: (u32, u32),

    /// Encoder executable
    pub encoder: PathBuf,

    /// Video codec passed to the encoder
    pub codec: String,

    /// Encoder speed/quality preset
    pub preset: String,

    /// Constant rate factor (0-51, lower is better)
    pub crf: u8,

    /// Output pixel format
    pub pixel_format: String,

    /// JPEG quality of the intermediate frame files (1-100)
    pub frame_quality: u8,
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            fps: 30,
            resolution: (1080, 1920),
            encoder: PathBuf::from("ffmpeg"),
            codec: "libx264".to_string(),
            preset: "medium".to_string(),
            crf: 23,
            pixel_format: "yuv420p".to_string(),
            frame_quality: 95,
        }
    }
}

impl VideoParams {
    pub fn width(&self) -> u32 {
        self.resolution.0
    }

    pub fn height(&self) -> u32 {
        self.resolution.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_black_is_black() {
        let frame = Frame::new_black(4, 3);
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 3);
        assert!(frame.as_image().pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_save_jpeg_roundtrips_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.jpg");

        Frame::new_filled(16, 8, [200, 10, 10]).save_jpeg(&path, 95).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (16, 8));
        let [r, g, b] = decoded.get_pixel(8, 4).0;
        assert!(r > 180 && g < 40 && b < 40);
    }

    #[test]
    fn test_default_params_are_vertical_hd() {
        let params = VideoParams::default();
        assert_eq!((params.width(), params.height()), (1080, 1920));
        assert_eq!(params.fps, 30);
        assert_eq!(params.crf, 23);
    }
}
