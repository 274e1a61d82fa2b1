//! # Background Jobs
//!
//! Runs one slideshow on a worker so a UI thread stays responsive. The UI
//! side never shares state with the worker: it validates the request, spawns
//! the job, and watches a one-way status channel.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::{
    composition::{SlideshowEngine, SlideshowReport},
    config::{Config, SlideshowConfig},
    error::{Result, SlideshowError},
    video::{FrameEncoder, ImageSource, VideoParams},
};

/// Everything a front-end collects before starting a run
#[derive(Debug, Clone, PartialEq)]
pub struct SlideshowRequest {
    pub image_dir: PathBuf,
    pub output: PathBuf,
    pub photo_duration: f64,
    pub fade_duration: f64,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for SlideshowRequest {
    fn default() -> Self {
        let slideshow = SlideshowConfig::default();
        let video = VideoParams::default();
        Self {
            image_dir: PathBuf::from("img"),
            output: PathBuf::from("slideshow.mp4"),
            photo_duration: slideshow.photo_duration,
            fade_duration: slideshow.fade_duration,
            width: video.width(),
            height: video.height(),
            fps: video.fps,
        }
    }
}

impl SlideshowRequest {
    /// Input presence check: the directory exists and holds at least one photo
    pub fn validate(&self) -> Result<ImageSource> {
        self.to_config(&Config::default()).validate()?;
        ImageSource::scan(&self.image_dir)
    }

    /// Overlay the request onto `base`, keeping its encoder settings
    pub fn to_config(&self, base: &Config) -> Config {
        let mut config = base.clone();
        config.slideshow.photo_duration = self.photo_duration;
        config.slideshow.fade_duration = self.fade_duration;
        config.video.resolution = (self.width, self.height);
        config.video.fps = self.fps;
        config
    }
}

/// Lifecycle of a job as seen from the UI
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Idle,
    Processing,
    Succeeded(SlideshowReport),
    Failed(String),
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// One-line text for a status indicator
    pub fn message(&self) -> String {
        match self {
            Self::Idle => "Ready".to_string(),
            Self::Processing => "Processing... Please wait.".to_string(),
            Self::Succeeded(report) => format!("Slideshow created: {}", report.output.display()),
            Self::Failed(message) => format!("Error: {}", message),
        }
    }
}

/// Spawns slideshow runs onto the tokio blocking pool
pub struct SlideshowJob {
    config: Config,
    encoder: Option<Arc<dyn FrameEncoder>>,
}

impl SlideshowJob {
    pub fn new(config: Config) -> Self {
        Self { config, encoder: None }
    }

    /// Use a custom encoder instead of ffmpeg
    pub fn with_encoder(config: Config, encoder: Arc<dyn FrameEncoder>) -> Self {
        Self {
            config,
            encoder: Some(encoder),
        }
    }

    /// Validate `request` and start it on a background worker.
    ///
    /// Validation failures are reported through the handle like any other
    /// failure, without spawning the worker.
    pub fn spawn(&self, request: SlideshowRequest) -> JobHandle {
        let (status_tx, status_rx) = watch::channel(JobStatus::Idle);

        let source = match request.validate() {
            Ok(source) => source,
            Err(e) => {
                error!("Rejected slideshow request: {}", e);
                let message = e.user_message();
                status_tx.send_replace(JobStatus::Failed(message));
                return JobHandle {
                    status: status_rx,
                    task: tokio::spawn(async move { Err(e) }),
                };
            }
        };

        let config = request.to_config(&self.config);
        let engine = match &self.encoder {
            Some(encoder) => SlideshowEngine::with_encoder(config, Box::new(SharedEncoder(encoder.clone()))),
            None => SlideshowEngine::new(config),
        };

        status_tx.send_replace(JobStatus::Processing);
        info!("Starting slideshow job for {:?}", request.image_dir);

        let task = tokio::task::spawn_blocking(move || {
            let result = engine.generate(&source, &request.output);
            let status = match &result {
                Ok(report) => JobStatus::Succeeded(report.clone()),
                Err(e) => {
                    error!("Slideshow job failed: {}", e);
                    JobStatus::Failed(e.user_message())
                }
            };
            status_tx.send_replace(status);
            result
        });

        JobHandle {
            status: status_rx,
            task,
        }
    }
}

/// UI-side handle of a running job
pub struct JobHandle {
    status: watch::Receiver<JobStatus>,
    task: JoinHandle<Result<SlideshowReport>>,
}

impl JobHandle {
    /// Latest published status
    pub fn status(&self) -> JobStatus {
        self.status.borrow().clone()
    }

    /// A receiver for front-ends that poll or await status changes
    pub fn subscribe(&self) -> watch::Receiver<JobStatus> {
        self.status.clone()
    }

    /// Wait for the run to finish and return its result
    pub async fn wait(self) -> Result<SlideshowReport> {
        self.task
            .await
            .map_err(|e| SlideshowError::generic(format!("slideshow worker panicked: {}", e)))?
    }
}

/// Lets one encoder instance be shared by every engine a job creates
struct SharedEncoder(Arc<dyn FrameEncoder>);

impl FrameEncoder for SharedEncoder {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn encode(&self, frames: &crate::video::FrameSequence, output: &std::path::Path) -> Result<()> {
        self.0.encode(frames, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::engine::tests::{small_config, write_photo, RecordingEncoder};
    use tempfile::tempdir;

    fn request(image_dir: PathBuf, output: PathBuf) -> SlideshowRequest {
        SlideshowRequest {
            image_dir,
            output,
            width: 32,
            height: 48,
            ..SlideshowRequest::default()
        }
    }

    #[test]
    fn test_default_request_matches_cli_defaults() {
        let request = SlideshowRequest::default();
        assert_eq!(request.image_dir, PathBuf::from("img"));
        assert_eq!(request.output, PathBuf::from("slideshow.mp4"));
        assert_eq!((request.width, request.height, request.fps), (1080, 1920, 30));
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(JobStatus::Idle.message(), "Ready");
        assert!(!JobStatus::Processing.is_finished());
        assert!(JobStatus::Failed("x".into()).message().starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_successful_job_reports_success() {
        let photos = tempdir().unwrap();
        write_photo(photos.path(), "01.jpg", 16, 16, [200, 0, 0]);
        write_photo(photos.path(), "02.jpg", 16, 16, [0, 200, 0]);
        let out = tempdir().unwrap();
        let output = out.path().join("show.mp4");

        let (encoder, _record) = RecordingEncoder::new(false);
        let job = SlideshowJob::with_encoder(small_config(), Arc::new(encoder));
        let handle = job.spawn(request(photos.path().to_path_buf(), output.clone()));
        let mut status = handle.subscribe();

        let report = handle.wait().await.unwrap();
        assert_eq!(report.frame_count, 2 * 15 + 3);
        assert_eq!(report.resolution, (32, 48));

        let final_status = status.borrow_and_update().clone();
        assert_eq!(final_status, JobStatus::Succeeded(report));
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_missing_directory_fails_without_worker() {
        let out = tempdir().unwrap();
        let (encoder, record) = RecordingEncoder::new(false);
        let job = SlideshowJob::with_encoder(small_config(), Arc::new(encoder));

        let handle = job.spawn(request(out.path().join("missing"), out.path().join("show.mp4")));
        match handle.status() {
            JobStatus::Failed(message) => assert!(message.contains("missing")),
            other => panic!("unexpected status {:?}", other),
        }
        assert!(handle.wait().await.is_err());
        assert!(record.lock().unwrap().scratch.is_none());
    }

    #[tokio::test]
    async fn test_encoder_failure_becomes_failed_status() {
        let photos = tempdir().unwrap();
        write_photo(photos.path(), "01.jpg", 16, 16, [200, 0, 0]);
        let out = tempdir().unwrap();

        let (encoder, _record) = RecordingEncoder::new(true);
        let job = SlideshowJob::with_encoder(small_config(), Arc::new(encoder));
        let handle = job.spawn(request(photos.path().to_path_buf(), out.path().join("show.mp4")));
        let status = handle.subscribe();

        assert!(handle.wait().await.is_err());
        let current = status.borrow().clone();
        match current {
            JobStatus::Failed(message) => assert!(message.contains("simulated failure")),
            other => panic!("unexpected status {:?}", other),
        }
    }
}
