//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Capture pipeline defaults.
    pub capture: CaptureDefaults,

    /// Preview scrubber defaults.
    pub preview: PreviewDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default capture and composite parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureDefaults {
    /// Composite canvas width in pixels.
    pub canvas_width: u32,

    /// Composite canvas height in pixels.
    pub canvas_height: u32,

    /// Frame rate of the composited picture-in-picture stream.
    pub composite_fps: u32,

    /// Webcam inset width in pixels.
    pub inset_width: u32,

    /// Webcam inset height in pixels.
    pub inset_height: u32,

    /// Media type tag for finished recordings.
    pub media_type: String,

    /// File name used when handing a recording to the submission form.
    pub file_name: String,
}

/// Default preview scrubber parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewDefaults {
    /// Number of preview segments.
    pub segments: u32,

    /// Interval between preview jumps in milliseconds.
    pub interval_ms: u64,

    /// Durations below this many seconds are not segmented.
    pub min_duration_secs: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "podium=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capture: CaptureDefaults::default(),
            preview: PreviewDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            canvas_width: 1280,
            canvas_height: 720,
            composite_fps: 30,
            inset_width: 320,
            inset_height: 240,
            media_type: "video/webm".to_string(),
            file_name: "recording.webm".to_string(),
        }
    }
}

impl Default for PreviewDefaults {
    fn default() -> Self {
        Self {
            segments: 3,
            interval_ms: 1000,
            min_duration_secs: 5.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("podium").join("config.json")
}
