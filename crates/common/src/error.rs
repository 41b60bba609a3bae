//! Error types shared across Podium crates.

/// Top-level error type for Podium operations.
#[derive(Debug, thiserror::Error)]
pub enum PodiumError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Media acquisition failed: {message}")]
    MediaAcquisition { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Recorder error: {message}")]
    Recorder { message: String },

    #[error("Composite error: {message}")]
    Composite { message: String },

    #[error("Preview error: {message}")]
    Preview { message: String },

    #[error("Form submission error: {message}")]
    Submission { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PodiumError.
pub type PodiumResult<T> = Result<T, PodiumError>;

impl PodiumError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn media_acquisition(msg: impl Into<String>) -> Self {
        Self::MediaAcquisition {
            message: msg.into(),
        }
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: msg.into(),
        }
    }

    pub fn recorder(msg: impl Into<String>) -> Self {
        Self::Recorder {
            message: msg.into(),
        }
    }

    pub fn composite(msg: impl Into<String>) -> Self {
        Self::Composite {
            message: msg.into(),
        }
    }

    pub fn preview(msg: impl Into<String>) -> Self {
        Self::Preview {
            message: msg.into(),
        }
    }

    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether this error came from device/display acquisition.
    ///
    /// Callers use this to distinguish "the user declined or has no device"
    /// from programming errors when deciding what to surface.
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(
            self,
            Self::MediaAcquisition { .. } | Self::PermissionDenied { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquisition_failures_are_classified() {
        assert!(PodiumError::media_acquisition("no camera").is_acquisition_failure());
        assert!(PodiumError::permission_denied("screen share declined").is_acquisition_failure());
        assert!(!PodiumError::capture("already active").is_acquisition_failure());
    }
}
