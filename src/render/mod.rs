//! # Render Module
//!
//! Rasterises the animated chart frame by frame and encodes the frames into
//! a silent video.
//!
//! Frames are written as numbered PNGs into a temporary directory next to the
//! output file and encoded with the [`MediaTool`]. The video only appears at
//! its final path once encoding has succeeded.

pub mod chart;
pub mod frame;
pub mod plan;

pub use chart::ChartText;
pub use frame::Frame;
pub use plan::{AnimationPlan, FrameState};

use std::path::{Path, PathBuf};

use plotters::style::FontStyle;
use tracing::{debug, info};

use crate::config::{RenderConfig, ResolvedDisplay};
use crate::error::{RenderError, Result};
use crate::media::{EncodeRequest, MediaTool};
use crate::series::DenseFrames;

/// Encoded silent video
#[derive(Debug, Clone)]
pub struct RenderedVideo {
    pub path: PathBuf,
    pub frame_count: usize,
    /// Nominal length in seconds (`frame_count / fps`)
    pub duration: f64,
}

/// Draws the animated line chart for one metric and country
pub struct Renderer {
    config: RenderConfig,
    display: ResolvedDisplay,
    text: ChartText,
}

impl Renderer {
    /// Create a renderer, loading the configured fonts
    pub fn new(config: RenderConfig, display: ResolvedDisplay, country: &str) -> Result<Self> {
        chart::register_font(&config.font_path, FontStyle::Normal)?;
        let bold = config.bold_font_path.as_ref().unwrap_or(&config.font_path);
        chart::register_font(bold, FontStyle::Bold)?;
        debug!("Registered fonts {:?} / {:?}", config.font_path, bold);

        let text = ChartText {
            title: format!("{} - {}", display.title, country),
            x_label: "Year".to_string(),
            y_label: display.y_label.clone(),
        };
        Ok(Self {
            config,
            display,
            text,
        })
    }

    /// Rasterise a single frame of the animation
    pub fn render_frame(&self, plan: &AnimationPlan<'_>, index: usize) -> Result<Frame> {
        let state = plan.frame(index).ok_or_else(|| RenderError::InvalidParameters {
            details: format!("frame {} out of range (0..{})", index, plan.frame_count()),
        })?;
        Ok(chart::draw_frame(
            &state,
            &self.text,
            self.config.width,
            self.config.height,
        )?)
    }

    /// Render every frame and encode them into `output`
    pub async fn render<M: MediaTool>(
        &self,
        frames: &DenseFrames,
        media: &M,
        output: &Path,
    ) -> Result<RenderedVideo> {
        if frames.is_empty() || frames.len() != self.config.frame_count() {
            return Err(RenderError::InvalidParameters {
                details: format!(
                    "expected {} frames ({} fps x {}s), got {}",
                    self.config.frame_count(),
                    self.config.fps,
                    self.config.duration_secs,
                    frames.len()
                ),
            }
            .into());
        }

        info!("🎬 Rendering {} frames at {} fps...", frames.len(), self.config.fps);

        let out_dir = match output.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&out_dir).await?;

        let work_dir = tempfile::Builder::new()
            .prefix(".trend-reel-frames-")
            .tempdir_in(&out_dir)?;

        let plan = AnimationPlan::new(frames, self.display.zoom_max, self.config.marker_every);
        let progress_step = (frames.len() / 10).max(1);

        for index in 0..plan.frame_count() {
            let frame = self.render_frame(&plan, index)?;
            let path = work_dir.path().join(format!("frame_{:06}.png", index));
            frame.save_png(&path).map_err(|e| RenderError::Frame {
                frame: index,
                reason: e.to_string(),
            })?;

            if (index + 1) % progress_step == 0 {
                debug!("   Rendered {}/{} frames", index + 1, plan.frame_count());
            }
        }

        let file_name = output.file_name().ok_or_else(|| RenderError::InvalidParameters {
            details: format!("output path {:?} has no file name", output),
        })?;
        let staged = work_dir.path().join(file_name);

        let request = EncodeRequest {
            frame_pattern: work_dir.path().join("frame_%06d.png"),
            fps: self.config.fps,
            codec: self.config.codec.clone(),
            crf: quality_to_crf(self.config.quality),
            output: staged.clone(),
        };
        media
            .encode_frames(&request)
            .await
            .map_err(|e| RenderError::EncodingFailed { reason: e.to_string() })?;

        std::fs::rename(&staged, output)?;

        let duration = frames.len() as f64 / self.config.fps as f64;
        info!("   ✅ Silent video written to {:?} ({:.1}s)", output, duration);

        Ok(RenderedVideo {
            path: output.to_path_buf(),
            frame_count: frames.len(),
            duration,
        })
    }
}

/// Map 0-100 quality onto ffmpeg's 51-0 CRF scale
pub fn quality_to_crf(quality: u8) -> u8 {
    (51 - ((quality.min(100) as f32 / 100.0) * 51.0) as u8).clamp(0, 51)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;
    use crate::audio::mixer::tests::FakeMedia;
    use crate::data::{Observation, TimeSeries};
    use crate::error::ReelError;
    use crate::render::chart::tests::fixture_font;

    fn small_config() -> RenderConfig {
        RenderConfig {
            fps: 4,
            duration_secs: 1,
            width: 600,
            height: 600,
            font_path: fixture_font("DejaVuSans.ttf"),
            bold_font_path: Some(fixture_font("DejaVuSans-Bold.ttf")),
            ..RenderConfig::default()
        }
    }

    fn display() -> ResolvedDisplay {
        ResolvedDisplay {
            title: "Life Expectancy".to_string(),
            y_label: "Years".to_string(),
            zoom_max: None,
        }
    }

    fn frames(count: usize) -> DenseFrames {
        let series: TimeSeries = [(2000, 60.0), (2010, 65.0), (2020, 70.0)]
            .iter()
            .map(|&(y, v)| Observation::new(NaiveDate::from_ymd_opt(y, 1, 1).unwrap(), v))
            .collect();
        DenseFrames::prepare(&series, count).unwrap()
    }

    #[test]
    fn test_quality_to_crf() {
        assert_eq!(quality_to_crf(100), 0);
        assert_eq!(quality_to_crf(85), 8);
        assert_eq!(quality_to_crf(0), 51);
    }

    #[test]
    fn test_missing_font_is_render_error() {
        let config = RenderConfig {
            font_path: PathBuf::from("/nonexistent/Regular.ttf"),
            bold_font_path: None,
            ..RenderConfig::default()
        };

        let err = Renderer::new(config, display(), "India").err().unwrap();
        assert!(matches!(err, ReelError::Render(RenderError::Font { .. })));
    }

    #[test]
    fn test_title_includes_country() {
        let renderer = Renderer::new(small_config(), display(), "India").unwrap();
        assert_eq!(renderer.text.title, "Life Expectancy - India");
        assert_eq!(renderer.text.x_label, "Year");
    }

    #[tokio::test]
    async fn test_render_creates_dir_and_moves_video_into_place() {
        let root = tempdir().unwrap();
        let out_dir = root.path().join("nested/deeper");
        let output = out_dir.join("life_expectancy_India.mp4");
        let media = FakeMedia::with_duration(1.0);
        let renderer = Renderer::new(small_config(), display(), "India").unwrap();

        let video = renderer.render(&frames(4), &media, &output).await.unwrap();

        assert_eq!(video.path, output);
        assert_eq!(video.frame_count, 4);
        assert_eq!(video.duration, 1.0);
        assert_eq!(std::fs::read(&output).unwrap(), b"video");

        // Encoded into the staging dir, which is gone afterwards
        let calls = media.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("encode "));
        assert!(calls[0].ends_with("life_expectancy_India.mp4"));
        assert_ne!(calls[0], format!("encode {}", output.display()));
        let entries: Vec<_> = std::fs::read_dir(&out_dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_encode_failure_leaves_no_output() {
        let out = tempdir().unwrap();
        let output = out.path().join("life_expectancy_India.mp4");
        let media = FakeMedia {
            fail_encode: true,
            ..FakeMedia::default()
        };
        let renderer = Renderer::new(small_config(), display(), "India").unwrap();

        let err = renderer.render(&frames(4), &media, &output).await.unwrap_err();

        assert!(matches!(err, ReelError::Render(RenderError::EncodingFailed { .. })));
        assert!(!output.exists());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_wrong_frame_count_rejected() {
        let out = tempdir().unwrap();
        let media = FakeMedia::default();
        let renderer = Renderer::new(small_config(), display(), "India").unwrap();

        let err = renderer
            .render(&frames(10), &media, &out.path().join("v.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReelError::Render(RenderError::InvalidParameters { .. })));
        assert!(media.calls().is_empty());
    }
}
