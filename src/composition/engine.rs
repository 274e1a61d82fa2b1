use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::{
    composition::timeline::FramePlan,
    config::Config,
    error::{FrameError, Result},
    video::{
        crossfade, load_image, FfmpegEncoder, Frame, FrameEncoder, FrameProcessor, FrameSequence,
        ImageSource,
    },
};

/// Summary of a finished slideshow
#[derive(Debug, Clone, PartialEq)]
pub struct SlideshowReport {
    pub output: PathBuf,
    pub frame_count: usize,
    pub image_count: usize,
    pub fps: u32,
    pub resolution: (u32, u32),
}

impl SlideshowReport {
    pub fn duration_secs(&self) -> f64 {
        self.frame_count as f64 / self.fps as f64
    }
}

/// Frame sequencer: turns an ordered list of photos into a crossfade slideshow
///
/// The pipeline is:
/// 1. Source discovery - sorted list of supported photos
/// 2. Frame rendering - hold frames and blended transition frames, written to
///    a scratch directory
/// 3. Encoding - one external encoder run over the numbered frames
/// 4. Cleanup - the scratch directory is removed on every exit path
pub struct SlideshowEngine {
    config: Config,
    encoder: Box<dyn FrameEncoder>,
}

impl SlideshowEngine {
    /// Engine backed by the ffmpeg binary named in the config
    pub fn new(config: Config) -> Self {
        let encoder = Box::new(FfmpegEncoder::new(config.video.clone()));
        Self { config, encoder }
    }

    /// Engine with a custom encoder
    pub fn with_encoder(config: Config, encoder: Box<dyn FrameEncoder>) -> Self {
        Self { config, encoder }
    }

    /// Build a slideshow from every supported photo in `image_dir`
    pub fn create<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        image_dir: P,
        output_path: Q,
    ) -> Result<SlideshowReport> {
        self.config.validate()?;
        let source = ImageSource::scan(image_dir)?;
        self.generate(&source, output_path.as_ref())
    }

    /// Build a slideshow from an already resolved photo list
    pub fn generate(&self, source: &ImageSource, output_path: &Path) -> Result<SlideshowReport> {
        self.config.validate()?;

        let params = &self.config.video;
        let timing = &self.config.slideshow;
        let plan = FramePlan::new(source.len(), params.fps, timing.photo_duration, timing.fade_duration);

        if plan.total_frames() == 0 {
            return Err(FrameError::InvalidParameters {
                details: format!(
                    "photo duration {}s and fade duration {}s produce no frames at {} fps",
                    timing.photo_duration, timing.fade_duration, params.fps
                ),
            }
            .into());
        }

        info!("Found {} images in {:?}. Creating slideshow...", source.len(), source.dir());
        debug!(
            "Plan: {} hold + {} fade frames per photo, {} total",
            plan.hold_frames,
            plan.fade_frames,
            plan.total_frames()
        );

        ensure_parent_dir(output_path)?;

        let scratch = tempfile::Builder::new().prefix("videoburst-").tempdir()?;
        debug!("Writing frames to {:?}", scratch.path());

        let frames = self.render_frames(source, &plan, &scratch)?;
        info!(
            "Generated {} frames. Creating video with {}...",
            frames.frame_count,
            self.encoder.name()
        );

        let encoded = self.encoder.encode(&frames, output_path);

        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            warn!("Failed to remove scratch directory {:?}: {}", scratch_path, e);
        }
        encoded?;

        let report = SlideshowReport {
            output: output_path.to_path_buf(),
            frame_count: frames.frame_count,
            image_count: source.len(),
            fps: params.fps,
            resolution: params.resolution,
        };

        info!("Slideshow created successfully: {:?}", report.output);
        info!("- Duration: {:.2} seconds", report.duration_secs());
        info!("- Number of images: {}", report.image_count);
        info!("- Resolution: {}x{}", report.resolution.0, report.resolution.1);

        Ok(report)
    }

    /// Write hold and transition frames for every photo into `scratch`
    fn render_frames(
        &self,
        source: &ImageSource,
        plan: &FramePlan,
        scratch: &TempDir,
    ) -> Result<FrameSequence> {
        let params = &self.config.video;
        let processor = FrameProcessor::new(params.width(), params.height())?;
        let mut writer = FrameWriter::new(scratch.path(), params.fps, params.frame_quality);

        let images = source.images();
        let mut current = Self::composite_at(&processor, images, 0)?;

        for (index, path) in images.iter().enumerate() {
            info!(
                "Processing image {}/{}: {}",
                index + 1,
                images.len(),
                path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
            );

            writer.write_repeated(&current, plan.hold_frames)?;

            if index + 1 < images.len() {
                let next = Self::composite_at(&processor, images, index + 1)?;
                for alpha in plan.fade_alphas() {
                    writer.write(&crossfade(&current, &next, alpha)?)?;
                }
                current = next;
            }
        }

        Ok(writer.finish())
    }

    fn composite_at(processor: &FrameProcessor, images: &[PathBuf], index: usize) -> Result<Frame> {
        let image = load_image(&images[index])?;
        Ok(processor.composite(&image))
    }
}

/// Create the output file's parent directories if they are missing
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating output directory {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Writes frames as gapless, zero-padded, numbered JPEG files
struct FrameWriter {
    dir: PathBuf,
    fps: u32,
    quality: u8,
    next_index: usize,
}

impl FrameWriter {
    fn new(dir: &Path, fps: u32, quality: u8) -> Self {
        Self {
            dir: dir.to_path_buf(),
            fps,
            quality,
            next_index: 0,
        }
    }

    fn next_path(&self) -> PathBuf {
        self.dir.join(crate::video::encoder::frame_file_name(self.next_index))
    }

    fn write(&mut self, frame: &Frame) -> Result<PathBuf> {
        let path = self.next_path();
        frame.save_jpeg(&path, self.quality).map_err(|e| FrameError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.next_index += 1;
        Ok(path)
    }

    /// Hold frames are identical, so encode once and copy the file
    fn write_repeated(&mut self, frame: &Frame, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }

        let first = self.write(frame)?;
        for _ in 1..count {
            let path = self.next_path();
            std::fs::copy(&first, &path).map_err(|e| FrameError::WriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            self.next_index += 1;
        }
        Ok(())
    }

    fn finish(self) -> FrameSequence {
        FrameSequence {
            dir: self.dir,
            frame_count: self.next_index,
            fps: self.fps,
        }
    }
}
