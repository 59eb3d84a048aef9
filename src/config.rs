use crate::defaults;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub stt: SttConfig,
    pub output: OutputConfig,
    pub download: DownloadConfig,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    /// Model tier name: tiny, base, small, medium, large
    pub model: String,
    /// Language code, or "auto" to detect
    pub language: String,
    /// Device hint: auto, cpu, gpu
    pub device: String,
    /// Inference threads (None = whisper.cpp default)
    pub threads: Option<usize>,
}

/// Transcript output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for derived transcript files (None = current directory)
    pub directory: Option<PathBuf>,
    /// Print timestamped segments alongside the transcript
    pub timestamps: bool,
}

/// Media download configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DownloadConfig {
    /// Program used to fetch audio from URLs
    pub program: String,
    /// Fetch missing model files automatically before transcribing
    pub auto_fetch_model: bool,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            device: "auto".to_string(),
            threads: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            timestamps: false,
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
            auto_fetch_model: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file, or return defaults if the file
    /// doesn't exist. Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CLIPSCRIBE_MODEL → stt.model
    /// - CLIPSCRIBE_LANGUAGE → stt.language
    /// - CLIPSCRIBE_DEVICE → stt.device
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("CLIPSCRIBE_MODEL")
            && !model.is_empty()
        {
            self.stt.model = model;
        }

        if let Ok(language) = std::env::var("CLIPSCRIBE_LANGUAGE")
            && !language.is_empty()
        {
            self.stt.language = language;
        }

        if let Ok(device) = std::env::var("CLIPSCRIBE_DEVICE")
            && !device.is_empty()
        {
            self.stt.device = device;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/clipscribe/config.toml on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("clipscribe").join("config.toml"))
    }
}
