//! # Frame Sequencer
//!
//! Plans the frame budget of a slideshow and drives photo compositing,
//! frame emission, and encoding.

pub mod engine;
pub mod timeline;

pub use engine::{SlideshowEngine, SlideshowReport};
pub use timeline::FramePlan;
