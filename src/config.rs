use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for Trend-Reel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset locations and column names
    pub data: DataConfig,

    /// Chart and video settings
    pub render: RenderConfig,

    /// Background music settings
    pub audio: AudioConfig,

    /// Where artifacts are written
    pub output: OutputConfig,

    /// Per-metric display attributes, keyed by metric identifier
    pub metrics: HashMap<String, MetricDisplay>,
}

impl Config {
    /// File picked up from the working directory when no path is given
    pub const DEFAULT_PATH: &'static str = "config.toml";

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            crate::ReelError::Config(ConfigError::ParseFailed { reason, .. }) => {
                ConfigError::ParseFailed {
                    path: path.display().to_string(),
                    reason,
                }
                .into()
            }
            other => other,
        })
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseFailed {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.data.validate()?;
        self.render.validate()?;
        self.audio.validate()?;
        for (metric, display) in &self.metrics {
            display.validate(metric)?;
        }
        Ok(())
    }

    /// Display attributes for a metric, falling back to derived defaults
    pub fn display_for(&self, metric: &str) -> ResolvedDisplay {
        let display = self.metrics.get(metric);
        ResolvedDisplay {
            title: display
                .and_then(|d| d.title.clone())
                .unwrap_or_else(|| title_case(metric)),
            y_label: display
                .and_then(|d| d.y_label.clone())
                .unwrap_or_else(|| "Value".to_string()),
            zoom_max: display.and_then(|d| d.zoom_max),
        }
    }
}

fn invalid(key: &str, value: impl ToString) -> crate::ReelError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

/// Dataset source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Base of the per-metric URL: `{base}/{metric}/data/{metric}.csv`
    pub primary_base_url: String,

    /// Single large dataset consulted when the primary is unavailable
    pub fallback_url: String,

    /// Name of the date column
    pub date_column: String,

    /// Name of the country column, if the dataset has one
    pub location_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            primary_base_url: "https://raw.githubusercontent.com/owid/owid-datasets/master/datasets"
                .to_string(),
            fallback_url: "https://covid.ourworldindata.org/data/owid-covid-data.csv".to_string(),
            date_column: "date".to_string(),
            location_column: "location".to_string(),
        }
    }
}

impl DataConfig {
    /// URL of the primary per-metric CSV
    pub fn primary_url(&self, metric: &str) -> String {
        format!(
            "{}/{metric}/data/{metric}.csv",
            self.primary_base_url.trim_end_matches('/')
        )
    }

    fn validate(&self) -> Result<()> {
        if self.primary_base_url.trim().is_empty() {
            return Err(invalid("data.primary_base_url", "\"\""));
        }
        if self.fallback_url.trim().is_empty() {
            return Err(invalid("data.fallback_url", "\"\""));
        }
        if self.date_column.is_empty() {
            return Err(invalid("data.date_column", "\"\""));
        }
        Ok(())
    }
}

/// Chart rendering and encoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output frame rate
    pub fps: u32,

    /// Total animation length in seconds, independent of the data range
    pub duration_secs: u32,

    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// A persistent marker is stamped every this many frames
    pub marker_every: usize,

    /// Video codec passed to ffmpeg
    pub codec: String,

    /// Quality setting (0-100, higher is better)
    pub quality: u8,

    /// Regular-weight TTF font
    pub font_path: PathBuf,

    /// Bold TTF font for the title and year counter; regular is used if unset
    pub bold_font_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fps: 24,
            duration_secs: 20,
            width: 600,
            height: 1200,
            marker_every: 10,
            codec: "libx264".to_string(),
            quality: 85,
            font_path: PathBuf::from("assets/fonts/DejaVuSans.ttf"),
            bold_font_path: Some(PathBuf::from("assets/fonts/DejaVuSans-Bold.ttf")),
        }
    }
}

impl RenderConfig {
    /// Number of animation frames (`fps * duration_secs`)
    pub fn frame_count(&self) -> usize {
        self.fps as usize * self.duration_secs as usize
    }

    fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(invalid("render.fps", self.fps));
        }
        if self.duration_secs == 0 {
            return Err(invalid("render.duration_secs", self.duration_secs));
        }
        if self.frame_count() < 2 {
            return Err(invalid("render.frame_count", self.frame_count()));
        }
        // yuv420p needs even dimensions
        if self.width == 0 || self.width % 2 != 0 {
            return Err(invalid("render.width", self.width));
        }
        if self.height == 0 || self.height % 2 != 0 {
            return Err(invalid("render.height", self.height));
        }
        if self.marker_every == 0 {
            return Err(invalid("render.marker_every", self.marker_every));
        }
        if self.quality > 100 {
            return Err(invalid("render.quality", self.quality));
        }
        if self.codec.is_empty() {
            return Err(invalid("render.codec", "\"\""));
        }
        Ok(())
    }
}

/// Background music configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Directory of candidate tracks, read-only
    pub music_dir: PathBuf,

    /// Only file names ending with this suffix are considered
    pub extension: String,

    /// Fade-in and fade-out length in seconds
    pub fade_secs: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("assets/bgm"),
            extension: ".mp3".to_string(),
            fade_secs: 3.0,
        }
    }
}

impl AudioConfig {
    fn validate(&self) -> Result<()> {
        if !self.fade_secs.is_finite() || self.fade_secs < 0.0 {
            return Err(invalid("audio.fade_secs", self.fade_secs));
        }
        if self.extension.is_empty() {
            return Err(invalid("audio.extension", "\"\""));
        }
        Ok(())
    }
}

/// Output location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for all artifacts, created if absent
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

/// Display attributes for a single metric as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricDisplay {
    pub title: Option<String>,
    pub y_label: Option<String>,

    /// Fixed upper zoom bound for the y-axis
    pub zoom_max: Option<f64>,
}

impl MetricDisplay {
    fn validate(&self, metric: &str) -> Result<()> {
        if let Some(zoom_max) = self.zoom_max {
            if !zoom_max.is_finite() || zoom_max <= 0.0 {
                return Err(invalid(&format!("metrics.{metric}.zoom_max"), zoom_max));
            }
        }
        Ok(())
    }
}

/// Display attributes with defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDisplay {
    pub title: String,
    pub y_label: String,
    pub zoom_max: Option<f64>,
}

/// `life_expectancy` -> `Life Expectancy`
pub fn title_case(metric: &str) -> String {
    metric
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
