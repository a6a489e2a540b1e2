//! Word frequency reports and word search

use ahash::RandomState;
use colored::*;
use hashbrown::HashMap;
use serde::Serialize;

use crate::filter::WordSongCount;

/// Width of the longest bar in the terminal chart
const BAR_WIDTH: usize = 40;

/// One row of a frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    /// Occurrences in the filtered word stream
    pub count: usize,
    /// Unique songs containing the word
    pub songs: usize,
}

/// Most frequent words of an artist
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyReport {
    pub title: String,
    /// Minimum word length considered
    pub min_length: usize,
    /// Number of unique songs behind the report
    pub total_songs: usize,
    pub entries: Vec<WordFrequency>,
}

impl FrequencyReport {
    /// Top `top_n` words of at least `min_length` characters.
    ///
    /// Ties keep the order in which words first appear in `words`. Song counts
    /// are taken over `texts` for every word of at least `max(min_length, 2)`
    /// characters.
    pub fn top_words(
        title: impl Into<String>,
        words: &[String],
        texts: &[String],
        top_n: usize,
        min_length: usize,
    ) -> Self {
        let counts = count_words(words.iter().filter(|w| w.chars().count() >= min_length));

        let song_floor = min_length.max(2);
        let song_counts = WordSongCount::from_texts(texts, |w| w.chars().count() >= song_floor);

        let entries = counts
            .into_iter()
            .take(top_n)
            .map(|(word, count)| {
                let songs = song_counts.get(&word);
                WordFrequency { word, count, songs }
            })
            .collect();

        Self {
            title: title.into(),
            min_length,
            total_songs: texts.len(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Horizontal bar chart for the terminal
    pub fn render(&self) -> String {
        let mut out = format!(
            "{}\n{}\n",
            self.title.magenta().bold(),
            format!("({} songs analysed)", self.total_songs).dimmed()
        );

        if self.entries.is_empty() {
            out.push_str(&format!("  {}\n", "no words to show".yellow()));
            return out;
        }

        let label_width = self
            .entries
            .iter()
            .map(|e| e.word.chars().count())
            .max()
            .unwrap_or(0);
        let max_count = self.entries.iter().map(|e| e.count).max().unwrap_or(1).max(1);

        for entry in &self.entries {
            let bar_len = (entry.count * BAR_WIDTH).div_ceil(max_count);
            let padding = " ".repeat(label_width - entry.word.chars().count());
            out.push_str(&format!(
                "  {}{} {} {} {}\n",
                entry.word,
                padding,
                "█".repeat(bar_len).magenta(),
                entry.count,
                format!("({} songs)", entry.songs).dimmed()
            ));
        }

        out
    }
}

/// Occurrence counts ordered by count descending, then first appearance
pub fn count_words<'a, I>(words: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut slots: HashMap<&str, usize, RandomState> = HashMap::default();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for word in words {
        match slots.get(word.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(word.as_str(), counts.len());
                counts.push((word.clone(), 1));
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Occurrences of `query` in the word stream, ignoring case and surrounding space
pub fn search_word(words: &[String], query: &str) -> usize {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    words.iter().filter(|w| **w == needle).count()
}
