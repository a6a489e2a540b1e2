//! Vocabulary filtering module
//!
//! Keeps only the words an artist uses across several songs. Needs two passes:
//! the cross-song counts are only known once every song has been read.

use ahash::RandomState;
use hashbrown::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::normalize::{is_numeric_token, tokenize};
use crate::stopwords::Stopwords;

/// Default minimum number of songs a word must appear in
pub const DEFAULT_MIN_SONG_COUNT: usize = 2;

/// Number of distinct songs each word appears in
#[derive(Debug, Clone, Default)]
pub struct WordSongCount {
    counts: HashMap<String, usize, RandomState>,
}

impl WordSongCount {
    /// Count, for every word accepted by `keep`, how many songs contain it
    pub fn from_texts<F>(texts: &[String], mut keep: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        let mut counts: HashMap<String, usize, RandomState> = HashMap::default();

        for text in texts {
            let song_words: HashSet<String, RandomState> =
                tokenize(text).into_iter().filter(|w| keep(w.as_str())).collect();

            for word in song_words {
                *counts.entry(word).or_insert(0) += 1;
            }
        }

        Self { counts }
    }

    /// Songs containing `word` (0 when unseen)
    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words counted
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }
}

/// Result of a vocabulary pass
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Every occurrence of every kept word, song order then document order
    pub words: Vec<String>,
    /// Song counts of all non-stopword, non-numeric words
    pub song_counts: WordSongCount,
    /// Distinct words dropped for appearing in too few songs
    pub filtered_out: usize,
}

/// Filters lyric vocabulary by cross-song occurrence
#[derive(Debug, Clone)]
pub struct VocabularyFilter<'a> {
    stopwords: &'a Stopwords,
    min_song_count: usize,
}

impl<'a> VocabularyFilter<'a> {
    /// Create a filter; `min_song_count` must be at least 1
    pub fn new(stopwords: &'a Stopwords, min_song_count: usize) -> Result<Self> {
        if min_song_count < 1 {
            return Err(Error::invalid("minimum song count must be at least 1"));
        }
        Ok(Self {
            stopwords,
            min_song_count,
        })
    }

    pub fn min_song_count(&self) -> usize {
        self.min_song_count
    }

    /// Tokens of `texts` that appear in at least `min_song_count` songs
    pub fn filter(&self, texts: &[String]) -> Vec<String> {
        self.analyze(texts).words
    }

    /// Run both passes and keep the counts around
    pub fn analyze(&self, texts: &[String]) -> Vocabulary {
        log::info!(
            "Processing lyrics of {} songs (words in at least {} songs)",
            texts.len(),
            self.min_song_count
        );

        // Pass 1: per-song distinct words, stopwords and numbers excluded
        let song_counts = WordSongCount::from_texts(texts, |word| {
            !self.stopwords.contains(word) && !is_numeric_token(word)
        });

        // The valid set borrows from the counts; it must be gone before they move out
        let (words, filtered_out) = {
            let valid_words: HashSet<&str, RandomState> = song_counts
                .iter()
                .filter(|(_, count)| *count >= self.min_song_count)
                .map(|(word, _)| word)
                .collect();

            // Pass 2: every occurrence of a valid word
            let mut words = Vec::new();
            for text in texts {
                words.extend(
                    tokenize(text)
                        .into_iter()
                        .filter(|word| valid_words.contains(word.as_str())),
                );
            }

            (words, song_counts.len() - valid_words.len())
        };

        log::info!(
            "{} words kept, {} distinct words appeared in fewer than {} songs",
            words.len(),
            filtered_out,
            self.min_song_count
        );

        Vocabulary {
            words,
            song_counts,
            filtered_out,
        }
    }
}
