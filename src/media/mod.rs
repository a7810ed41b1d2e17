//! # Media Tools
//!
//! The pipeline talks to `ffprobe` and `ffmpeg` only through [`MediaTool`],
//! so everything above this module can be exercised without the binaries.
//! The argument lists built here are the exact command-line contracts.

pub mod ffmpeg;

pub use ffmpeg::Ffmpeg;

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::MediaError;

/// Frame-sequence encoding request
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeRequest {
    /// printf-style pattern, e.g. `frames/frame_%06d.png`
    pub frame_pattern: PathBuf,
    pub fps: u32,
    pub codec: String,
    pub crf: u8,
    pub output: PathBuf,
}

/// External media operations used by the renderer and audio mixer
pub trait MediaTool {
    /// Container duration in seconds
    fn probe_duration(&self, path: &Path) -> impl Future<Output = Result<f64, MediaError>> + Send;

    /// Encode numbered PNG frames into a silent video
    fn encode_frames(
        &self,
        request: &EncodeRequest,
    ) -> impl Future<Output = Result<(), MediaError>> + Send;

    /// Apply `filter` to `input` and trim to `duration` seconds
    fn process_audio(
        &self,
        input: &Path,
        filter: &str,
        duration: f64,
        output: &Path,
    ) -> impl Future<Output = Result<(), MediaError>> + Send;

    /// Copy the video stream, encode the audio to AAC, stop at the shorter stream
    fn mux(
        &self,
        video: &Path,
        audio: &Path,
        output: &Path,
    ) -> impl Future<Output = Result<(), MediaError>> + Send;
}

fn arg(path: &Path) -> String {
    path.display().to_string()
}

/// `ffprobe` arguments printing only the container duration
pub fn probe_args(path: &Path) -> Vec<String> {
    vec![
        "-v".into(),
        "error".into(),
        "-show_entries".into(),
        "format=duration".into(),
        "-of".into(),
        "default=noprint_wrappers=1:nokey=1".into(),
        arg(path),
    ]
}

/// `ffmpeg` arguments encoding an image sequence
pub fn encode_args(request: &EncodeRequest) -> Vec<String> {
    let fps = request.fps.to_string();
    vec![
        "-y".into(),
        "-framerate".into(),
        fps.clone(),
        "-i".into(),
        arg(&request.frame_pattern),
        "-c:v".into(),
        request.codec.clone(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-crf".into(),
        request.crf.to_string(),
        "-r".into(),
        fps,
        arg(&request.output),
    ]
}

/// `ffmpeg` arguments filtering and trimming an audio track
pub fn audio_args(input: &Path, filter: &str, duration: f64, output: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-i".into(),
        arg(input),
        "-af".into(),
        filter.to_string(),
        "-t".into(),
        format!("{:?}", duration),
        arg(output),
    ]
}

/// `ffmpeg` arguments muxing a video and an audio file
pub fn mux_args(video: &Path, audio: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-i".into(),
        arg(video),
        "-i".into(),
        arg(audio),
        "-c:v".into(),
        "copy".into(),
        "-c:a".into(),
        "aac".into(),
        "-shortest".into(),
        arg(output),
    ]
}

/// Parse ffprobe's bare duration output
pub fn parse_duration(output: &str) -> Result<f64, MediaError> {
    output
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| MediaError::InvalidDuration {
            output: output.trim().to_string(),
        })
}
