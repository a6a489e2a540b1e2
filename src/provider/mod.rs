//! Lyrics providers
//!
//! A provider turns an artist name into the raw lyric texts of their songs,
//! one string per song, in catalog order. Songs that fail individually are
//! skipped; only failures that make the whole lookup impossible are errors.
//! An empty result is not an error at this level.

pub mod directory;
pub mod genius;

pub use directory::DirectoryProvider;
pub use genius::{GeniusConfig, GeniusProvider};

use crate::error::Result;

/// Source of raw lyric texts
pub trait LyricsProvider {
    /// Short name for status messages
    fn name(&self) -> &str;

    /// Lyrics of every song found for `artist`
    fn fetch_lyrics(&self, artist: &str) -> Result<Vec<String>>;
}

/// Provider over a fixed list of texts, handy for callers that already hold lyrics
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    texts: Vec<String>,
}

impl StaticProvider {
    pub fn new(texts: Vec<String>) -> Self {
        Self { texts }
    }
}

impl LyricsProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_lyrics(&self, _artist: &str) -> Result<Vec<String>> {
        Ok(self.texts.clone())
    }
}
