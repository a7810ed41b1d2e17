use std::path::Path;
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::error::MediaError;
use crate::media::{
    audio_args, encode_args, mux_args, parse_duration, probe_args, EncodeRequest, MediaTool,
};

/// [`MediaTool`] that shells out to `ffprobe` and `ffmpeg` on PATH
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    ffmpeg: String,
    ffprobe: String,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

impl Ffmpeg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use specific binaries instead of the ones on PATH
    pub fn with_binaries(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// True when `ffmpeg -version` runs successfully
    pub async fn check_available(&self) -> bool {
        Command::new(&self.ffmpeg)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn run(&self, tool: &str, args: Vec<String>) -> Result<Output, MediaError> {
        debug!("Running {} {}", tool, args.join(" "));

        let output = Command::new(tool)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| MediaError::Spawn {
                tool: tool.to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::ToolFailed {
                tool: tool.to_string(),
                status: output.status.to_string(),
                stderr: last_lines(&stderr, 5),
            });
        }
        Ok(output)
    }
}

impl MediaTool for Ffmpeg {
    async fn probe_duration(&self, path: &Path) -> Result<f64, MediaError> {
        let output = self.run(&self.ffprobe, probe_args(path)).await?;

        // Probe output is read as one merged stream
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        parse_duration(&combined)
    }

    async fn encode_frames(&self, request: &EncodeRequest) -> Result<(), MediaError> {
        self.run(&self.ffmpeg, encode_args(request)).await.map(|_| ())
    }

    async fn process_audio(
        &self,
        input: &Path,
        filter: &str,
        duration: f64,
        output: &Path,
    ) -> Result<(), MediaError> {
        self.run(&self.ffmpeg, audio_args(input, filter, duration, output))
            .await
            .map(|_| ())
    }

    async fn mux(&self, video: &Path, audio: &Path, output: &Path) -> Result<(), MediaError> {
        self.run(&self.ffmpeg, mux_args(video, audio, output)).await.map(|_| ())
    }
}

/// ffmpeg prints a long banner before the actual error
fn last_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    lines[lines.len().saturating_sub(count)..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_lines() {
        assert_eq!(last_lines("a\nb\n\nc\nd\n", 2), "c\nd");
        assert_eq!(last_lines("only", 5), "only");
        assert_eq!(last_lines("", 3), "");
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let tool = Ffmpeg::with_binaries("trend-reel-no-such-ffmpeg", "trend-reel-no-such-ffprobe");
        assert!(!tool.check_available().await);

        let err = tool.probe_duration(Path::new("video.mp4")).await.unwrap_err();
        assert!(matches!(
            err,
            MediaError::Spawn { ref tool, .. } if tool == "trend-reel-no-such-ffprobe"
        ));
    }
}
