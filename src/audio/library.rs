use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{MediaError, Result};

/// Candidate background tracks found in a music directory
#[derive(Debug, Clone)]
pub struct MusicLibrary {
    dir: PathBuf,
    extension: String,
    tracks: Vec<PathBuf>,
}

impl MusicLibrary {
    /// List files in `dir` whose name ends with `extension`, sorted by name
    ///
    /// A missing directory is treated like an empty one.
    pub fn scan<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tracks = Vec::new();

        if dir.is_dir() {
            for entry in std::fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                let matches = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.ends_with(extension))
                    .unwrap_or(false);
                if matches && path.is_file() {
                    tracks.push(path);
                }
            }
        }
        tracks.sort();

        debug!("Found {} '*{}' tracks in {:?}", tracks.len(), extension, dir);
        Ok(Self {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
            tracks,
        })
    }

    pub fn tracks(&self) -> &[PathBuf] {
        &self.tracks
    }

    /// Pick one track uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> std::result::Result<&Path, MediaError> {
        self.tracks
            .choose(rng)
            .map(PathBuf::as_path)
            .ok_or_else(|| MediaError::NoTracks {
                dir: self.dir.display().to_string(),
                extension: self.extension.clone(),
            })
    }
}
