//! # Audio Module
//!
//! Picks a background track, fades it to the rendered video's exact length
//! and muxes the two into the final file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use trend_reel::audio::AudioMixer;
//! use trend_reel::config::AudioConfig;
//! use trend_reel::media::Ffmpeg;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let media = Ffmpeg::new();
//! let mixer = AudioMixer::new(&media, AudioConfig::default());
//! let mixed = mixer
//!     .mix(
//!         Path::new("output/life_expectancy_India.mp4"),
//!         Path::new("output/faded_audio.mp3"),
//!         Path::new("output/life_expectancy_India_with_music.mp4"),
//!         &mut rand::thread_rng(),
//!     )
//!     .await?;
//! println!("Used {:?}", mixed.track);
//! # Ok(())
//! # }
//! ```

pub mod library;
pub mod mixer;

pub use library::MusicLibrary;
pub use mixer::{AudioMixer, FadePlan, MixedVideo};
