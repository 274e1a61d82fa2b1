use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::{EncodeError, Result};
use crate::video::types::VideoParams;

/// printf-style pattern the frame files are written with
pub const FRAME_PATTERN: &str = "frame_%06d.jpg";

/// File name of the frame at `index`, matching [`FRAME_PATTERN`]
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:06}.jpg", index)
}

/// A numbered run of frame files ready to be encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
    pub dir: PathBuf,
    pub frame_count: usize,
    pub fps: u32,
}

impl FrameSequence {
    /// Input pattern for the encoder, e.g. `/tmp/.tmpXYZ/frame_%06d.jpg`
    pub fn input_pattern(&self) -> PathBuf {
        self.dir.join(FRAME_PATTERN)
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(frame_file_name(index))
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count as f64 / self.fps as f64
    }
}

/// Turns a frame sequence into a video file
pub trait FrameEncoder: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Encode `frames` into `output`, blocking until done
    fn encode(&self, frames: &FrameSequence, output: &Path) -> Result<()>;
}

/// Encoder that shells out to an `ffmpeg` binary
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    params: VideoParams,
}

impl FfmpegEncoder {
    pub fn new(params: VideoParams) -> Self {
        Self { params }
    }

    pub fn check_ffmpeg_available(&self) -> bool {
        Command::new(&self.params.encoder)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Build the encoder invocation for a frame sequence
    pub fn command(&self, frames: &FrameSequence, output: &Path) -> Command {
        let mut cmd = Command::new(&self.params.encoder);
        cmd.arg("-y")
            .arg("-framerate")
            .arg(frames.fps.to_string())
            .arg("-i")
            .arg(frames.input_pattern())
            .args(["-c:v", &self.params.codec])
            .args(["-preset", &self.params.preset])
            .args(["-crf", &self.params.crf.to_string()])
            .args(["-pix_fmt", &self.params.pixel_format])
            .arg(output);
        cmd
    }
}

impl FrameEncoder for FfmpegEncoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn encode(&self, frames: &FrameSequence, output: &Path) -> Result<()> {
        let mut cmd = self.command(frames, output);
        debug!("Running: {:?}", cmd);
        info!("Encoding {} frames at {} fps", frames.frame_count, frames.fps);

        let output = cmd
            .stdin(Stdio::null())
            .output()
            .map_err(|e| EncodeError::EncoderNotFound {
                program: self.params.encoder.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EncodeError::EncoderFailed {
                status: output.status.to_string(),
                stderr: stderr_tail(&stderr, 20),
            }
            .into());
        }

        Ok(())
    }
}

/// Last `lines` lines of encoder stderr; ffmpeg prints its banner first
fn stderr_tail(stderr: &str, lines: usize) -> String {
    let all: Vec<&str> = stderr.trim_end().lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}
