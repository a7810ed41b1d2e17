use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info};

use crate::{
    audio::{AudioMixer, MixedVideo},
    config::Config,
    data::{DataRetriever, DataSource, Retrieved, SourceKind},
    error::Result,
    media::MediaTool,
    render::{RenderedVideo, Renderer},
    series::DenseFrames,
};

/// Where the three output files of one run are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub silent_video: PathBuf,
    pub faded_audio: PathBuf,
    pub final_video: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: &Path, metric: &str, country: &str) -> Self {
        let stem = format!("{}_{}", file_safe(metric), file_safe(country));
        Self {
            silent_video: dir.join(format!("{}.mp4", stem)),
            faded_audio: dir.join("faded_audio.mp3"),
            final_video: dir.join(format!("{}_with_music.mp4", stem)),
        }
    }
}

/// Path separators in user input must not escape the output directory
fn file_safe(part: &str) -> String {
    part.replace(['/', '\\'], "_")
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct ReelOutput {
    pub source: SourceKind,
    pub observations: usize,
    pub silent_video: RenderedVideo,
    pub mixed: MixedVideo,
}

/// Orchestrates one metric/country run from download to final video
///
/// Fonts are loaded before anything is downloaded. The pipeline is then a
/// single sequential pass:
/// 1. Data Retrieval - primary dataset, fallback once on failure
/// 2. Series Preparation - eased dense resampling at the video frame rate
/// 3. Rendering - animated chart frames encoded to a silent video
/// 4. Audio Mixing - faded background music muxed into the final file
pub struct ReelEngine<S, M, R> {
    config: Config,
    retriever: DataRetriever<S>,
    media: M,
    rng: R,
}

impl<S: DataSource, M: MediaTool, R: Rng> ReelEngine<S, M, R> {
    pub fn new(config: Config, source: S, media: M, rng: R) -> Self {
        Self {
            retriever: DataRetriever::new(source, config.data.clone()),
            config,
            media,
            rng,
        }
    }

    /// Produce `{metric}_{country}_with_music.mp4` under the output directory
    pub async fn run(&mut self, metric: &str, country: &str) -> Result<ReelOutput> {
        let paths = OutputPaths::new(&self.config.output.dir, metric, country);

        info!("🎬 Starting trend-reel run");
        info!("   Metric: {}", metric);
        info!("   Country: {}", country);
        info!("   Output: {:?}", paths.final_video);

        let renderer = self.load_renderer(metric, country)?;

        // Pipeline Step 1: Data Retrieval
        let retrieved = self.retrieve(metric, country).await?;

        // Pipeline Step 2: Series Preparation
        let frames = self.prepare(&retrieved)?;

        // Pipeline Step 3: Rendering
        let silent_video = self.render(&renderer, &frames, &paths).await?;

        // Pipeline Step 4: Audio Mixing
        let mixed = self.mix(&paths).await?;

        info!("🎉 Done! Final video saved to: {:?}", mixed.path);
        Ok(ReelOutput {
            source: retrieved.source,
            observations: retrieved.series.len(),
            silent_video,
            mixed,
        })
    }

    fn load_renderer(&self, metric: &str, country: &str) -> Result<Renderer> {
        debug!("Loading fonts from {:?}", self.config.render.font_path);
        let display = self.config.display_for(metric);
        Renderer::new(self.config.render.clone(), display, country)
    }

    async fn retrieve(&self, metric: &str, country: &str) -> Result<Retrieved> {
        info!("📡 Step 1: Retrieving data...");
        let retrieved = self.retriever.retrieve(metric, country).await?;

        if let (Some(first), Some(last)) = (retrieved.series.first(), retrieved.series.last()) {
            debug!(
                "   {:?} source, {} .. {}",
                retrieved.source, first.date, last.date
            );
        }
        Ok(retrieved)
    }

    fn prepare(&self, retrieved: &Retrieved) -> Result<DenseFrames> {
        info!("📐 Step 2: Preparing animation frames...");
        let frames = DenseFrames::prepare(&retrieved.series, self.config.render.frame_count())?;

        let (x0, x1) = frames.x_range();
        info!("   ✅ {} frames spanning {:.1} - {:.1}", frames.len(), x0, x1);
        Ok(frames)
    }

    async fn render(
        &self,
        renderer: &Renderer,
        frames: &DenseFrames,
        paths: &OutputPaths,
    ) -> Result<RenderedVideo> {
        info!("🖼️  Step 3: Rendering chart...");
        renderer.render(frames, &self.media, &paths.silent_video).await
    }

    async fn mix(&mut self, paths: &OutputPaths) -> Result<MixedVideo> {
        info!("🎵 Step 4: Mixing background music...");
        let mixer = AudioMixer::new(&self.media, self.config.audio.clone());
        mixer
            .mix(
                &paths.silent_video,
                &paths.faded_audio,
                &paths.final_video,
                &mut self.rng,
            )
            .await
    }
}
