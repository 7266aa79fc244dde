use eink_quant::wire::{FrameFormat, WireError};
use eink_quant::{DitherMode, Palette, PreprocessOptions, SPECTRA_8};
use serde::{de, Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct AppConfig {
    /// Frame format shared by producer and consumer
    #[serde(default)]
    pub frame: FrameConfig,

    /// Encode-side settings
    #[serde(default)]
    pub prepare: PrepareConfig,

    /// Artifact server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Consumer loop settings
    #[serde(default)]
    pub client: ClientConfig,
}

/// Width, height and palette order. Both sides must use the same values.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FrameConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Hex colors in pen order
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    480
}

fn default_palette() -> Vec<String> {
    SPECTRA_8.iter().map(|c| c.to_string()).collect()
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            palette: default_palette(),
        }
    }
}

/// Accept any name [`DitherMode`] parses, e.g. `floyd-steinberg` or `none`.
fn deserialize_dither<'de, D>(deserializer: D) -> Result<DitherMode, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(de::Error::custom)
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PrepareConfig {
    #[serde(default, deserialize_with = "deserialize_dither")]
    pub dither: DitherMode,

    #[serde(default = "default_brightness")]
    pub brightness: f32,

    #[serde(default = "default_contrast")]
    pub contrast: f32,

    /// Photograph to convert
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Wire artifact destination
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Optional PNG rendering of the quantized frame
    #[serde(default = "default_preview")]
    pub preview: Option<PathBuf>,
}

fn default_brightness() -> f32 {
    1.3
}

fn default_contrast() -> f32 {
    1.2
}

fn default_source() -> PathBuf {
    PathBuf::from("source_image.jpg")
}

fn default_output() -> PathBuf {
    PathBuf::from("image_data.dat")
}

fn default_preview() -> Option<PathBuf> {
    Some(PathBuf::from("preview_quantized.png"))
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            dither: DitherMode::default(),
            brightness: default_brightness(),
            contrast: default_contrast(),
            source: default_source(),
            output: default_output(),
            preview: default_preview(),
        }
    }
}

impl PrepareConfig {
    pub fn preprocess_options(&self) -> PreprocessOptions {
        PreprocessOptions::new()
            .brightness(self.brightness)
            .contrast(self.contrast)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Seconds between successful refreshes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Delay after the first failed cycle, doubled on each further failure
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    #[serde(default = "default_max_retry_delay")]
    pub max_retry_delay_secs: u64,

    /// Limit for one fetch, from connect to the last body byte
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Pen the surface is cleared to before each frame
    #[serde(default = "default_background_pen")]
    pub background_pen: u8,
}

fn default_url() -> String {
    "http://127.0.0.1:8000/image_data.dat".to_string()
}

fn default_refresh_interval() -> u64 {
    3600 // 1 hour
}

fn default_retry_delay() -> u64 {
    5
}

fn default_max_retry_delay() -> u64 {
    300
}

fn default_timeout() -> u64 {
    30
}

fn default_background_pen() -> u8 {
    1 // white in the default palette
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            refresh_interval_secs: default_refresh_interval(),
            retry_delay_secs: default_retry_delay(),
            max_retry_delay_secs: default_max_retry_delay(),
            timeout_secs: default_timeout(),
            background_pen: default_background_pen(),
        }
    }
}

impl ClientConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn max_retry_delay(&self) -> Duration {
        Duration::from_secs(self.max_retry_delay_secs.max(self.retry_delay_secs))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl AppConfig {
    /// Load and validate configuration. `None` means built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::info!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            width = config.frame.width,
            height = config.frame.height,
            colors = config.frame.palette.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let format = self.frame_format()?;

        for (name, value) in [
            ("brightness", self.prepare.brightness),
            ("contrast", self.prepare.contrast),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidFactor { name, value });
            }
        }

        let palette_len = format.palette().len();
        if self.client.background_pen as usize >= palette_len {
            return Err(WireError::InvalidPen {
                pen: self.client.background_pen,
                palette_len,
            }
            .into());
        }
        Ok(())
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette::from_hex(&self.frame.palette)?)
    }

    /// The shared wire contract, built once and handed to both sides.
    pub fn frame_format(&self) -> Result<FrameFormat, ConfigError> {
        Ok(FrameFormat::new(
            self.frame.width,
            self.frame.height,
            self.palette()?,
        )?)
    }

    pub fn dither_mode(&self) -> DitherMode {
        self.prepare.dither
    }
}
