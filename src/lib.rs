//! # VideoBurst
//!
//! Turn a folder of photos into a vertical slideshow video with crossfade
//! transitions.
//!
//! Every photo is scaled to the canvas width, centered on black, held for a
//! fixed number of frames, and blended into the next photo. The numbered
//! frames are handed to `ffmpeg` for encoding and removed afterwards.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use videoburst::{Config, SlideshowEngine};
//!
//! # fn main() -> videoburst::Result<()> {
//! let engine = SlideshowEngine::new(Config::default());
//! let report = engine.create("img", "slideshow.mp4")?;
//! println!("{} frames, {:.2}s", report.frame_count, report.duration_secs());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`video`] - photo discovery, compositing, and the encoder
//! - [`composition`] - frame planning and the slideshow pipeline
//! - [`job`] - background runs with status notifications for UIs
//! - [`icon`] - application icon rendering
//! - [`config`] - configuration management

pub mod composition;
pub mod config;
pub mod error;
pub mod icon;
pub mod job;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    composition::{FramePlan, SlideshowEngine, SlideshowReport},
    config::Config,
    error::{Result, SlideshowError},
    job::{JobHandle, JobStatus, SlideshowJob, SlideshowRequest},
};
