use thiserror::Error;

/// Main error type for the Trend-Reel library
#[derive(Error, Debug)]
pub enum ReelError {
    #[error("Data retrieval error: {0}")]
    Data(#[from] DataError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Media tool error: {0}")]
    Media(#[from] MediaError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while fetching and cleaning a time series
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Malformed CSV from {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("Column '{column}' missing from {url}")]
    MissingColumn { url: String, column: String },

    #[error("Metric '{metric}' not found in fallback dataset")]
    MetricNotFound { metric: String },

    #[error("No valid records for '{metric}' in '{country}'")]
    EmptySeries { metric: String, country: String },

    #[error("Need at least 2 data points to animate, got {found}")]
    TooFewPoints { found: usize },
}

impl DataError {
    /// Primary-source failures that the retriever recovers from by falling back
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Status { .. } | Self::Parse { .. }
        )
    }
}

/// Frame drawing and video encoding errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load font {path}: {reason}")]
    Font { path: String, reason: String },

    #[error("Chart drawing failed at frame {frame}: {reason}")]
    Draw { frame: usize, reason: String },

    #[error("Failed to write frame {frame}: {reason}")]
    Frame { frame: usize, reason: String },

    #[error("Video encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("Invalid render parameters: {details}")]
    InvalidParameters { details: String },
}

/// External media tool errors
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Failed to run {tool}: {reason}")]
    Spawn { tool: String, reason: String },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Could not read media duration from '{output}'")]
    InvalidDuration { output: String },

    #[error("No music tracks matching '*{extension}' in {dir}")]
    NoTracks { dir: String, extension: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using ReelError
pub type Result<T> = std::result::Result<T, ReelError>;

impl ReelError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Data(DataError::MetricNotFound { metric }) => {
                format!(
                    "Metric '{}' is not available from either data source. Check the metric name.",
                    metric
                )
            }
            Self::Data(DataError::EmptySeries { metric, country }) => {
                format!(
                    "No usable '{}' data for '{}'. Check the country name spelling.",
                    metric, country
                )
            }
            Self::Media(MediaError::Spawn { tool, .. }) => {
                format!(
                    "Could not run '{}'. Please install FFmpeg and make sure it is on PATH.",
                    tool
                )
            }
            Self::Media(MediaError::NoTracks { dir, .. }) => {
                format!("No background music found in '{}'.", dir)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
