//! Track catalog contract.
//!
//! The engine never selects tracks itself; vinyl loads pull a random
//! track from whatever catalog implementation it was constructed with.

use crate::state::Vinyl;
use serde::{Deserialize, Serialize};

/// A playable track from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub composer: String,
    pub url: String,
}

impl From<Track> for Vinyl {
    fn from(track: Track) -> Self {
        Vinyl {
            id: track.id,
            title: track.title,
            composer: track.composer,
            midi_url: track.url,
        }
    }
}

/// Source of tracks for vinyl loads.
///
/// `random_track` may return `None` only when `is_available` is false;
/// the engine surfaces that as a catalog failure carrying `load_error`
/// when one is set.
pub trait TrackCatalog: Send + Sync {
    /// Whether the catalog can currently supply tracks.
    fn is_available(&self) -> bool;

    /// The reason the catalog is unavailable, when known.
    fn load_error(&self) -> Option<String> {
        None
    }

    /// Selects one track at random.
    fn random_track(&self) -> Option<Track>;
}
