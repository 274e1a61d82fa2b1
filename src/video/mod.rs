//! # Video Module
//!
//! Photo discovery, canvas compositing, and the external encoder.

pub mod encoder;
pub mod loader;
pub mod processor;
pub mod types;

pub use encoder::{FfmpegEncoder, FrameEncoder, FrameSequence, FRAME_PATTERN};
pub use loader::{load_image, ImageSource, SUPPORTED_EXTENSIONS};
pub use processor::{crossfade, FrameProcessor};
pub use types::{Frame, VideoParams};
