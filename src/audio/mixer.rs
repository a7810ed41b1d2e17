use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info};

use crate::audio::library::MusicLibrary;
use crate::config::AudioConfig;
use crate::error::Result;
use crate::media::MediaTool;

/// Fade timing for a track stretched over a video
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadePlan {
    /// Target duration in seconds, taken from the video
    pub duration: f64,
    /// Fade-in and fade-out length in seconds
    pub fade: f64,
}

impl FadePlan {
    pub fn new(duration: f64, fade: f64) -> Self {
        Self { duration, fade }
    }

    /// Start of the fade-out, never before the start of the clip
    pub fn fade_out_start(&self) -> f64 {
        (self.duration - self.fade).max(0.0)
    }

    /// ffmpeg audio filter: fade in, fade out, loop forever (trimmed by `-t`)
    ///
    /// The fade-out start is a probed time and always keeps its decimal point
    /// (`17.0`); the fade length is printed as configured (`3`).
    pub fn filter(&self) -> String {
        format!(
            "afade=t=in:st=0:d={fade},afade=t=out:st={start:?}:d={fade},aloop=loop=-1:size=2e+09",
            fade = self.fade,
            start = self.fade_out_start(),
        )
    }
}

/// Result of mixing music into a rendered video
#[derive(Debug, Clone)]
pub struct MixedVideo {
    pub path: PathBuf,
    pub track: PathBuf,
    pub faded_audio: PathBuf,
    pub duration: f64,
}

/// Adds faded background music to a silent video
pub struct AudioMixer<'a, M> {
    media: &'a M,
    config: AudioConfig,
}

impl<'a, M: MediaTool> AudioMixer<'a, M> {
    pub fn new(media: &'a M, config: AudioConfig) -> Self {
        Self { media, config }
    }

    /// Choose a track, fade it to the video's length and mux both into `output`
    pub async fn mix<R: Rng + ?Sized>(
        &self,
        video: &Path,
        faded_audio: &Path,
        output: &Path,
        rng: &mut R,
    ) -> Result<MixedVideo> {
        info!("🎵 Adding background music...");

        let library = MusicLibrary::scan(&self.config.music_dir, &self.config.extension)?;
        let track = library.choose(rng)?.to_path_buf();
        debug!("Chose from {} candidate tracks", library.tracks().len());
        info!("   Track: {:?}", track);

        let duration = self.media.probe_duration(video).await?;
        let plan = FadePlan::new(duration, self.config.fade_secs);
        debug!(
            "Video duration {:.3}s, fade-out at {:.3}s",
            duration,
            plan.fade_out_start()
        );

        self.media
            .process_audio(&track, &plan.filter(), duration, faded_audio)
            .await?;
        self.media.mux(video, faded_audio, output).await?;

        info!("   ✅ Muxed audio into {:?}", output);
        Ok(MixedVideo {
            path: output.to_path_buf(),
            track,
            faded_audio: faded_audio.to_path_buf(),
            duration,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    use super::*;
    use crate::error::{MediaError, ReelError};
    use crate::media::EncodeRequest;

    /// Records every media call; probe returns a fixed duration
    #[derive(Default)]
    pub(crate) struct FakeMedia {
        pub duration: f64,
        pub fail_encode: bool,
        pub fail_mux: bool,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeMedia {
        pub fn with_duration(duration: f64) -> Self {
            Self {
                duration,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl MediaTool for FakeMedia {
        async fn probe_duration(&self, path: &Path) -> std::result::Result<f64, MediaError> {
            self.record(format!("probe {}", path.display()));
            Ok(self.duration)
        }

        async fn encode_frames(
            &self,
            request: &EncodeRequest,
        ) -> std::result::Result<(), MediaError> {
            self.record(format!("encode {}", request.output.display()));
            if self.fail_encode {
                return Err(MediaError::ToolFailed {
                    tool: "ffmpeg".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "Unknown encoder".to_string(),
                });
            }
            std::fs::write(&request.output, b"video").map_err(|e| MediaError::Spawn {
                tool: "fake".to_string(),
                reason: e.to_string(),
            })
        }

        async fn process_audio(
            &self,
            input: &Path,
            filter: &str,
            duration: f64,
            output: &Path,
        ) -> std::result::Result<(), MediaError> {
            self.record(format!(
                "audio {} {} {} {}",
                input.display(),
                filter,
                duration,
                output.display()
            ));
            Ok(())
        }

        async fn mux(
            &self,
            video: &Path,
            audio: &Path,
            output: &Path,
        ) -> std::result::Result<(), MediaError> {
            self.record(format!(
                "mux {} {} {}",
                video.display(),
                audio.display(),
                output.display()
            ));
            if self.fail_mux {
                return Err(MediaError::ToolFailed {
                    tool: "ffmpeg".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_fade_out_start() {
        let plan = FadePlan::new(23.7, 3.0);
        assert!((plan.fade_out_start() - 20.7).abs() < 1e-9);
        assert_eq!(FadePlan::new(2.0, 3.0).fade_out_start(), 0.0);
    }

    #[test]
    fn test_filter_string() {
        let plan = FadePlan::new(23.7, 3.0);
        assert_eq!(
            plan.filter(),
            "afade=t=in:st=0:d=3,afade=t=out:st=20.7:d=3,aloop=loop=-1:size=2e+09"
        );
    }

    #[test]
    fn test_whole_second_times_keep_decimal_point() {
        let plan = FadePlan::new(20.0, 3.0);
        assert_eq!(
            plan.filter(),
            "afade=t=in:st=0:d=3,afade=t=out:st=17.0:d=3,aloop=loop=-1:size=2e+09"
        );
        assert!(FadePlan::new(2.0, 3.0).filter().contains("st=0.0:d=3"));
    }

    fn audio_config(dir: &Path) -> AudioConfig {
        AudioConfig {
            music_dir: dir.to_path_buf(),
            ..AudioConfig::default()
        }
    }

    #[tokio::test]
    async fn test_mix_runs_probe_fade_and_mux_in_order() {
        let music = tempdir().unwrap();
        std::fs::write(music.path().join("song.mp3"), b"").unwrap();
        let media = FakeMedia::with_duration(23.7);
        let mixer = AudioMixer::new(&media, audio_config(music.path()));

        let mixed = mixer
            .mix(
                Path::new("out/v.mp4"),
                Path::new("out/faded_audio.mp3"),
                Path::new("out/v_with_music.mp4"),
                &mut StdRng::seed_from_u64(3),
            )
            .await
            .unwrap();

        assert_eq!(mixed.duration, 23.7);
        assert_eq!(mixed.track, music.path().join("song.mp3"));
        let calls = media.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], "probe out/v.mp4");
        assert_eq!(
            calls[1],
            format!(
                "audio {} {} 23.7 out/faded_audio.mp3",
                music.path().join("song.mp3").display(),
                "afade=t=in:st=0:d=3,afade=t=out:st=20.7:d=3,aloop=loop=-1:size=2e+09"
            )
        );
        assert_eq!(calls[2], "mux out/v.mp4 out/faded_audio.mp3 out/v_with_music.mp4");
    }

    #[tokio::test]
    async fn test_empty_music_dir_fails_before_any_tool_call() {
        let music = tempdir().unwrap();
        let media = FakeMedia::with_duration(20.0);
        let mixer = AudioMixer::new(&media, audio_config(music.path()));

        let err = mixer
            .mix(
                Path::new("v.mp4"),
                Path::new("a.mp3"),
                Path::new("f.mp4"),
                &mut StdRng::seed_from_u64(0),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReelError::Media(MediaError::NoTracks { .. })));
        assert!(media.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mux_failure_is_fatal() {
        let music = tempdir().unwrap();
        std::fs::write(music.path().join("song.mp3"), b"").unwrap();
        let media = FakeMedia {
            duration: 20.0,
            fail_mux: true,
            ..FakeMedia::default()
        };
        let mixer = AudioMixer::new(&media, audio_config(music.path()));

        let err = mixer
            .mix(
                Path::new("v.mp4"),
                Path::new("a.mp3"),
                Path::new("f.mp4"),
                &mut StdRng::seed_from_u64(0),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ReelError::Media(MediaError::ToolFailed { .. })));
    }
}
