use std::{
    collections::HashSet,
    hash::{Hash, Hasher},
};

use super::CARD_SIZE;

/// A single song as it appears on a card.
///
/// Title and artist keep their original casing for display, but equality and
/// hashing use the case-folded pair so `"Song" / "ARTIST"` and `"song" / "artist"`
/// are the same track.
#[derive(Debug, Clone)]
pub struct Track {
    pub title: String,
    pub artist: String,
}

impl Track {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Normalized identity used for deduplication.
    pub fn key(&self) -> (String, String) {
        (self.title.to_lowercase(), self.artist.to_lowercase())
    }

    /// Text printed inside a grid cell.
    pub fn label(&self) -> String {
        format!("{} — {}", self.title, self.artist)
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Tracks already placed on earlier cards of the current run.
pub type UsedSet = HashSet<Track>;

/// Ordered, duplicate-free collection of tracks eligible for card generation.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    tracks: Vec<Track>,
}

impl Pool {
    /// Builds a pool keeping the first occurrence of every normalized key.
    pub fn from_tracks<I>(tracks: I) -> Self
    where
        I: IntoIterator<Item = Track>,
    {
        let mut seen = HashSet::new();
        let tracks = tracks
            .into_iter()
            .filter(|track| seen.insert(track.key()))
            .collect();
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn contains(&self, track: &Track) -> bool {
        self.tracks.contains(track)
    }
}

/// One bingo card: tracks in row-major grid order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub tracks: Vec<Track>,
}

impl Card {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.tracks.len() == CARD_SIZE
    }
}
