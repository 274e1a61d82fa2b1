use thiserror::Error;

/// Main error type for the VideoBurst library
#[derive(Error, Debug)]
pub enum SlideshowError {
    #[error("Image source error: {0}")]
    Source(#[from] SourceError),

    #[error("Frame processing error: {0}")]
    Frame(#[from] FrameError),

    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Icon generation error: {0}")]
    Icon(#[from] IconError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors raised while locating the input photos
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Image directory '{path}' not found")]
    DirectoryNotFound { path: String },

    #[error("No image files found in '{path}'")]
    NoImagesFound { path: String },
}

/// Errors raised while decoding photos or writing frame files
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Failed to decode image '{path}': {reason}")]
    DecodeFailed { path: String, reason: String },

    #[error("Failed to write frame '{path}': {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("Invalid frame parameters: {details}")]
    InvalidParameters { details: String },
}

/// Errors raised by the external encoder
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Encoder '{program}' could not be started: {reason}")]
    EncoderNotFound { program: String, reason: String },

    #[error("Encoder exited with {status}: {stderr}")]
    EncoderFailed { status: String, stderr: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Errors raised by the icon generator
#[derive(Error, Debug)]
pub enum IconError {
    #[error("Failed to save icon '{path}': {reason}")]
    SaveFailed { path: String, reason: String },

    #[error("iconutil failed: {reason}")]
    PackagingFailed { reason: String },
}

/// Convenience type alias for Results using SlideshowError
pub type Result<T> = std::result::Result<T, SlideshowError>;

impl SlideshowError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// True when the run was rejected before any file was written
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Source(_) | Self::Config(_))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Source(SourceError::DirectoryNotFound { path }) => {
                format!("Image directory does not exist: {}", path)
            }
            Self::Source(SourceError::NoImagesFound { path }) => {
                format!(
                    "No image files found in directory: {} (supported: .jpg, .jpeg, .png)",
                    path
                )
            }
            Self::Encode(EncodeError::EncoderNotFound { program, .. }) => {
                format!("Could not run '{}'. Please install FFmpeg and make sure it is on PATH.", program)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_messages_differ() {
        let missing: SlideshowError = SourceError::DirectoryNotFound { path: "photos".into() }.into();
        let empty: SlideshowError = SourceError::NoImagesFound { path: "photos".into() }.into();

        assert!(missing.user_message().contains("photos"));
        assert!(empty.user_message().contains("photos"));
        assert_ne!(missing.user_message(), empty.user_message());
        assert!(missing.is_input_error());
    }

    #[test]
    fn test_encode_failure_is_not_input_error() {
        let err: SlideshowError = EncodeError::EncoderFailed {
            status: "exit status: 1".into(),
            stderr: "boom".into(),
        }
        .into();
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("boom"));
    }
}
