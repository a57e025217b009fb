//! File-backed track catalog.

use crate::error::CatalogError;
use rand::Rng;
use std::path::Path;
use turntabled_core::{Track, TrackCatalog};

/// Track catalog loaded from a JSON file at startup.
///
/// Load failures do not abort the process: the catalog stays unavailable
/// for the life of the process, keeps the failure message, and every
/// vinyl load surfaces it.
pub struct FileCatalog {
    tracks: Vec<Track>,
    load_error: Option<String>,
}

impl FileCatalog {
    /// Reads the catalog from a JSON array of tracks.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read_tracks(path) {
            Ok(tracks) => {
                tracing::info!(
                    count = tracks.len(),
                    path = %path.display(),
                    "track catalog loaded"
                );
                Self {
                    tracks,
                    load_error: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "track catalog unavailable");
                Self {
                    tracks: Vec::new(),
                    load_error: Some(e.to_string()),
                }
            }
        }
    }

    fn read_tracks(path: &Path) -> Result<Vec<Track>, CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(path.to_path_buf(), e))?;
        let tracks: Vec<Track> = serde_json::from_str(&content)
            .map_err(|e| CatalogError::Parse(path.to_path_buf(), e))?;
        if tracks.is_empty() {
            return Err(CatalogError::Empty(path.to_path_buf()));
        }
        Ok(tracks)
    }

    /// All loaded tracks.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

impl TrackCatalog for FileCatalog {
    fn is_available(&self) -> bool {
        self.load_error.is_none() && !self.tracks.is_empty()
    }

    fn load_error(&self) -> Option<String> {
        self.load_error.clone()
    }

    fn random_track(&self) -> Option<Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let index = rand::rng().random_range(0..self.tracks.len());
        self.tracks.get(index).cloned()
    }
}
