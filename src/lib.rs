//! # trend-reel
//!
//! Turn a public time-series metric into a short animated line-chart video
//! with background music.
//!
//! A run downloads one metric for one country from Our World in Data, eases
//! and resamples it to one point per video frame, draws a growing line chart
//! with a year counter, encodes the frames with ffmpeg and finally muxes in a
//! randomly chosen music track faded to the video's length.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trend_reel::{
//!     config::Config,
//!     data::HttpSource,
//!     media::Ffmpeg,
//!     pipeline::ReelEngine,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let mut engine = ReelEngine::new(
//!     Config::default(),
//!     HttpSource::new(),
//!     Ffmpeg::new(),
//!     rand::thread_rng(),
//! );
//! let output = engine.run("life_expectancy", "India").await?;
//! println!("Saved {:?}", output.mixed.path);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`data`] - Dataset download, cleaning and fallback
//! - [`series`] - Easing and dense interpolation
//! - [`render`] - Chart rasterisation and silent video export
//! - [`audio`] - Music selection, fading and muxing
//! - [`media`] - The ffprobe/ffmpeg seam
//! - [`pipeline`] - The end-to-end run
//! - [`config`] - Configuration management

pub mod audio;
pub mod config;
pub mod data;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod render;
pub mod series;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{ReelError, Result},
    pipeline::{ReelEngine, ReelOutput},
};
