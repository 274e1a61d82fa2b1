use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    video::VideoParams,
};

/// Main configuration for VideoBurst
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Slide timing
    pub slideshow: SlideshowConfig,

    /// Canvas and encoder settings
    pub video: VideoParams,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.slideshow.validate()?;
        validate_video(&self.video)?;
        Ok(())
    }
}

/// Slide timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    /// Seconds each photo is held on screen
    pub photo_duration: f64,

    /// Seconds of crossfade between consecutive photos
    pub fade_duration: f64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            photo_duration: 0.5,
            fade_duration: 0.1,
        }
    }
}

impl SlideshowConfig {
    fn validate(&self) -> Result<()> {
        if !self.photo_duration.is_finite() || self.photo_duration < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "slideshow.photo_duration".to_string(),
                value: self.photo_duration.to_string()
            }.into());
        }

        if !self.fade_duration.is_finite() || self.fade_duration < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "slideshow.fade_duration".to_string(),
                value: self.fade_duration.to_string()
            }.into());
        }

        Ok(())
    }
}

fn validate_video(params: &VideoParams) -> Result<()> {
    if params.fps == 0 {
        return Err(ConfigError::InvalidValue {
            key: "video.fps".to_string(),
            value: params.fps.to_string()
        }.into());
    }

    if params.width() == 0 || params.height() == 0 {
        return Err(ConfigError::InvalidValue {
            key: "video.resolution".to_string(),
            value: format!("{}x{}", params.width(), params.height())
        }.into());
    }

    if !(1..=100).contains(&params.frame_quality) {
        return Err(ConfigError::InvalidValue {
            key: "video.frame_quality".to_string(),
            value: params.frame_quality.to_string()
        }.into());
    }

    if params.crf > 51 {
        return Err(ConfigError::InvalidValue {
            key: "video.crf".to_string(),
            value: params.crf.to_string()
        }.into());
    }

    Ok(())
}
