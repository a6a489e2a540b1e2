//! Near-duplicate removal for song lyrics
//!
//! Remixes, live takes and demos of the same song usually come back from the
//! provider as separate entries with almost the same text. Each song is
//! compared, in order, against the songs kept so far; the first kept song
//! that is at least `threshold` similar absorbs it, and whichever of the two
//! texts is longer stays. Comparisons are all-pairs (O(n²)).

use indicatif::ProgressBar;

use crate::error::{Error, Result};
use crate::normalize::similarity_form;
use crate::progress::create_progress_bar;
use crate::similarity::{ratio, SequenceIndex};

/// Default similarity above which two songs are the same song
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Counters for one deduplication run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    /// Songs examined
    pub total: usize,
    /// Songs left after deduplication
    pub unique: usize,
    /// Songs absorbed by an earlier near-duplicate
    pub duplicates: usize,
    /// Absorptions where the newcomer was longer and took the kept slot
    pub replaced: usize,
}

impl DedupStats {
    pub fn record_unique(&mut self) {
        self.total += 1;
        self.unique += 1;
    }

    pub fn record_duplicate(&mut self, replaced: bool) {
        self.total += 1;
        self.duplicates += 1;
        if replaced {
            self.replaced += 1;
        }
    }
}

/// A kept song together with its comparison index
struct Kept {
    raw: String,
    char_len: usize,
    index: SequenceIndex,
}

impl Kept {
    fn new(raw: String, autojunk: bool) -> Self {
        let index = SequenceIndex::new(&similarity_form(&raw), autojunk);
        let char_len = raw.chars().count();
        Self { raw, char_len, index }
    }
}

/// Removes near-duplicate lyrics, keeping the longer version
#[derive(Debug, Clone)]
pub struct LyricsDeduplicator {
    threshold: f64,
    autojunk: bool,
    show_progress: bool,
}

impl LyricsDeduplicator {
    /// Create a deduplicator; `threshold` must lie in `(0, 1]`
    pub fn new(threshold: f64) -> Result<Self> {
        validate_threshold(threshold)?;
        Ok(Self {
            threshold,
            autojunk: true,
            show_progress: false,
        })
    }

    /// Toggle the popular-character heuristic of the similarity measure
    pub fn with_autojunk(mut self, autojunk: bool) -> Self {
        self.autojunk = autojunk;
        self
    }

    /// Show a progress bar while comparing
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Deduplicate `texts`, preserving first-seen order of the survivors
    pub fn deduplicate(&self, texts: Vec<String>) -> Vec<String> {
        self.deduplicate_with_stats(texts).0
    }

    /// Deduplicate and report what happened
    pub fn deduplicate_with_stats(&self, texts: Vec<String>) -> (Vec<String>, DedupStats) {
        if texts.len() <= 1 {
            let stats = DedupStats {
                total: texts.len(),
                unique: texts.len(),
                ..DedupStats::default()
            };
            return (texts, stats);
        }

        log::info!("Checking {} songs for near-duplicate lyrics", texts.len());

        let pb = if self.show_progress {
            create_progress_bar(texts.len() as u64, "Comparing lyrics")
        } else {
            ProgressBar::hidden()
        };

        let mut kept: Vec<Kept> = Vec::new();
        let mut stats = DedupStats::default();

        for text in texts {
            let current: Vec<char> = similarity_form(&text).chars().collect();

            let matched = kept
                .iter()
                .position(|candidate| ratio(&current, &candidate.index) >= self.threshold);

            match matched {
                Some(slot) => {
                    let longer = text.chars().count() > kept[slot].char_len;
                    if longer {
                        log::debug!("Replacing kept song #{} with a longer version", slot + 1);
                        kept[slot] = Kept::new(text, self.autojunk);
                    }
                    stats.record_duplicate(longer);
                }
                None => {
                    kept.push(Kept::new(text, self.autojunk));
                    stats.record_unique();
                }
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        log::info!(
            "Removed {} similar songs, {} unique songs left",
            stats.duplicates,
            stats.unique
        );

        (kept.into_iter().map(|k| k.raw).collect(), stats)
    }
}

impl Default for LyricsDeduplicator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            autojunk: true,
            show_progress: false,
        }
    }
}

/// Deduplicate with the default settings and no progress display
pub fn deduplicate(texts: Vec<String>, threshold: f64) -> Result<Vec<String>> {
    Ok(LyricsDeduplicator::new(threshold)?.deduplicate(texts))
}

/// Reject thresholds outside `(0, 1]` (NaN included)
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "similarity threshold must be in (0, 1], got {}",
            threshold
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    /// Songs with unrelated wording plus a few near-identical versions
    fn fixture() -> Vec<String> {
        strings(&[
            "Walking down the river road tonight",
            "Walking down the river road tonight (Live)",
            "Every morning coffee tastes of rain",
            "Walking down the river road tonight!",
            "Neon signs are buzzing over empty streets",
            "Every morning coffee tastes of rain and smoke",
            "Quiet",
            "Neon signs are buzzing over empty streets",
            "quiet",
        ])
    }

    /// Rotations of the fixture and their reversals
    fn orderings(base: &[String]) -> Vec<Vec<String>> {
        let mut all = Vec::new();
        for shift in 0..base.len() {
            let mut rotated = base.to_vec();
            rotated.rotate_left(shift);
            let mut reversed = rotated.clone();
            reversed.reverse();
            all.push(rotated);
            all.push(reversed);
        }
        all
    }

    #[test]
    fn test_empty_and_single() {
        assert!(deduplicate(Vec::new(), 0.85).unwrap().is_empty());
        assert_eq!(deduplicate(strings(&["only"]), 0.85).unwrap(), strings(&["only"]));
    }

    #[test]
    fn test_keeps_longer_version() {
        // Same text once normalized, the version with the extra "!" is longer
        let out = deduplicate(strings(&["abc abc abc", "abc abc abc!"]), 0.85).unwrap();
        assert_eq!(out, strings(&["abc abc abc!"]));

        // "abc abc" vs "abc abc abc" scores 14/18 ~ 0.78
        let out = deduplicate(strings(&["abc abc abc", "abc abc"]), 0.75).unwrap();
        assert_eq!(out, strings(&["abc abc abc"]));

        let out = deduplicate(strings(&["abc abc", "abc abc abc"]), 0.75).unwrap();
        assert_eq!(out, strings(&["abc abc abc"]));
    }

    #[test]
    fn test_below_threshold_stays_separate() {
        let out = deduplicate(strings(&["abc abc abc", "abc abc"]), 0.85).unwrap();
        assert_eq!(out, strings(&["abc abc abc", "abc abc"]));
    }

    #[test]
    fn test_unrelated_texts_kept_in_order() {
        let input = strings(&["hello world", "completely different content here"]);
        assert_eq!(deduplicate(input.clone(), 0.85).unwrap(), input);
    }

    #[test]
    fn test_first_match_wins() {
        // The third song scores 0.857 against the first and 0.933 against the
        // second; the first kept song absorbs it and the longer text stays there
        let input = strings(&[
            "xx river road tonight",
            "river road tonight yyyyy",
            "river road tonight yy!",
        ]);
        let dedup = LyricsDeduplicator::default();
        let (out, stats) = dedup.deduplicate_with_stats(input);

        assert_eq!(out, strings(&["river road tonight yy!", "river road tonight yyyyy"]));
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.replaced, 1);
    }

    #[test]
    fn test_fixture_collapses_versions() {
        let dedup = LyricsDeduplicator::default();
        let (out, stats) = dedup.deduplicate_with_stats(fixture());

        assert_eq!(
            out,
            strings(&[
                "Walking down the river road tonight (Live)",
                "Every morning coffee tastes of rain and smoke",
                "Neon signs are buzzing over empty streets",
                "Quiet",
            ])
        );
        assert_eq!(stats.total, 9);
        assert_eq!(stats.unique, 4);
        assert_eq!(stats.duplicates, 5);
    }

    #[test]
    fn test_idempotent_over_orderings() {
        let dedup = LyricsDeduplicator::default();

        for input in orderings(&fixture()) {
            let once = dedup.deduplicate(input.clone());
            let twice = dedup.deduplicate(once.clone());
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_output_is_subset_of_input() {
        let dedup = LyricsDeduplicator::default();

        for input in orderings(&fixture()) {
            let out = dedup.deduplicate(input.clone());
            assert!(out.len() <= input.len());
            assert!(out.iter().all(|text| input.contains(text)));
        }
    }

    #[test]
    fn test_rejects_bad_threshold() {
        assert!(LyricsDeduplicator::new(0.0).is_err());
        assert!(LyricsDeduplicator::new(1.5).is_err());
        assert!(LyricsDeduplicator::new(f64::NAN).is_err());
        assert!(LyricsDeduplicator::new(1.0).is_ok());
    }
}
