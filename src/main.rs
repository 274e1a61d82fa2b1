use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn, Level};

use videoburst::{
    video::FfmpegEncoder, Config, SlideshowError, SlideshowJob, SlideshowReport, SlideshowRequest,
};

#[derive(Parser)]
#[command(
    name = "videoburst",
    version,
    about = "Create a vertical crossfade slideshow from a folder of photos",
    long_about = "VideoBurst scales every photo in a directory to the video width, centers it on black, holds it for a fixed time and crossfades into the next one. Photos are ordered by file name; zero-pad names for numeric order. Requires ffmpeg on PATH."
)]
struct Cli {
    /// Directory containing images
    #[arg(short, long, default_value = "img")]
    directory: PathBuf,

    /// Output video file
    #[arg(short, long, default_value = "slideshow.mp4")]
    output: PathBuf,

    /// Duration each photo is displayed in seconds [default: 0.5]
    #[arg(short, long)]
    photo_duration: Option<f64>,

    /// Duration of crossfade between photos in seconds [default: 0.1]
    #[arg(short, long)]
    fade_duration: Option<f64>,

    /// Width of the output video [default: 1080]
    #[arg(long)]
    width: Option<u32>,

    /// Height of the output video [default: 1920]
    #[arg(long)]
    height: Option<u32>,

    /// Frames per second [default: 30]
    #[arg(long)]
    fps: Option<u32>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Flags given on the command line win over the config file
    fn request(&self, config: &Config) -> SlideshowRequest {
        SlideshowRequest {
            image_dir: self.directory.clone(),
            output: self.output.clone(),
            photo_duration: self.photo_duration.unwrap_or(config.slideshow.photo_duration),
            fade_duration: self.fade_duration.unwrap_or(config.slideshow.fade_duration),
            width: self.width.unwrap_or(config.video.width()),
            height: self.height.unwrap_or(config.video.height()),
            fps: self.fps.unwrap_or(config.video.fps),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting VideoBurst v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };

    if !FfmpegEncoder::new(config.video.clone()).check_ffmpeg_available() {
        warn!("{:?} not found on PATH; encoding will fail", config.video.encoder);
    }

    let request = cli.request(&config);
    info!("Images: {:?}", request.image_dir);
    info!("Output: {:?}", request.output);

    let handle = SlideshowJob::new(config).spawn(request);
    conclude(handle.wait().await)
}

/// Map the job outcome to the process result.
///
/// A missing or empty image directory is reported and the run ends normally;
/// decode, encode and other failures exit non-zero.
fn conclude(outcome: videoburst::Result<SlideshowReport>) -> Result<()> {
    match outcome {
        Ok(report) => {
            info!(
                "Done: {:?} ({} frames, {:.2}s)",
                report.output,
                report.frame_count,
                report.duration_secs()
            );
            Ok(())
        }
        Err(e @ SlideshowError::Source(_)) => {
            error!("{}", e.user_message());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(e.user_message())),
    }
}
