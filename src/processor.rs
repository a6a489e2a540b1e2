//! Core processing pipeline
//!
//! provider -> near-duplicate removal -> vocabulary filter. The command line
//! (or any other front end) builds an [`AnalysisRequest`]; prompts and other
//! interaction stay outside.

use ahash::RandomState;
use bytesize::ByteSize;
use hashbrown::HashSet;

use crate::cli::Args;
use crate::dedup::{validate_threshold, DedupStats, LyricsDeduplicator, DEFAULT_SIMILARITY_THRESHOLD};
use crate::error::{Error, Result};
use crate::filter::{VocabularyFilter, WordSongCount, DEFAULT_MIN_SONG_COUNT};
use crate::progress::{print_header, print_info, print_success, AnalysisStats};
use crate::provider::LyricsProvider;
use crate::report::{search_word, FrequencyReport};
use crate::stopwords::{Language, Stopwords};

/// What to analyse and how
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub artist: String,
    pub language: Language,
    /// Similarity at which two songs count as the same song
    pub threshold: f64,
    /// Popular-character heuristic of the similarity measure
    pub autojunk: bool,
    /// Songs a word must appear in to be kept
    pub min_song_count: usize,
    /// Stopwords on top of the language list
    pub extra_stopwords: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(artist: impl Into<String>, language: Language) -> Self {
        Self {
            artist: artist.into(),
            language,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            autojunk: true,
            min_song_count: DEFAULT_MIN_SONG_COUNT,
            extra_stopwords: Vec::new(),
        }
    }

    /// Request from parsed arguments, with the artist and language resolved by the caller
    pub fn from_args(args: &Args, artist: String, language: Language) -> Self {
        Self {
            artist,
            language,
            threshold: args.threshold,
            autojunk: !args.no_autojunk,
            min_song_count: args.min_songs,
            extra_stopwords: args.get_extra_stopwords(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.artist.trim().is_empty() {
            return Err(Error::invalid("artist name must not be empty"));
        }
        validate_threshold(self.threshold)?;
        if self.min_song_count < 1 {
            return Err(Error::invalid("minimum song count must be at least 1"));
        }
        Ok(())
    }
}

/// Outcome of one analysis
#[derive(Debug, Clone)]
pub struct Analysis {
    pub artist: String,
    pub language: Language,
    /// Lyrics left after near-duplicate removal
    pub unique_lyrics: Vec<String>,
    /// Filtered word stream
    pub words: Vec<String>,
    pub song_counts: WordSongCount,
    /// Distinct words below the song threshold
    pub filtered_out: usize,
    pub dedup_stats: DedupStats,
    /// Size of the fetched lyrics before deduplication
    pub lyrics_bytes: u64,
}

impl Analysis {
    /// Occurrences of `word` in the filtered word stream
    pub fn search(&self, word: &str) -> usize {
        search_word(&self.words, word)
    }

    /// Most frequent words overall
    pub fn top_words(&self, top_n: usize) -> FrequencyReport {
        let title = format!("{}: top {} words", self.artist, top_n);
        FrequencyReport::top_words(title, &self.words, &self.unique_lyrics, top_n, 1)
    }

    /// Most frequent words of at least `min_length` characters
    pub fn top_long_words(&self, min_length: usize, top_n: usize) -> FrequencyReport {
        let title = format!("{}: top {} words with {}+ letters", self.artist, top_n, min_length);
        FrequencyReport::top_words(title, &self.words, &self.unique_lyrics, top_n, min_length)
    }

    pub fn distinct_words(&self) -> usize {
        self.words
            .iter()
            .map(String::as_str)
            .collect::<HashSet<&str, RandomState>>()
            .len()
    }

    pub fn stats(&self) -> AnalysisStats {
        AnalysisStats {
            songs_fetched: self.dedup_stats.total,
            lyrics_bytes: self.lyrics_bytes,
            unique_songs: self.unique_lyrics.len(),
            duplicates_removed: self.dedup_stats.duplicates,
            longer_versions_kept: self.dedup_stats.replaced,
            words_kept: self.words.len(),
            distinct_words_kept: self.distinct_words(),
            words_filtered_out: self.filtered_out,
            ..AnalysisStats::new()
        }
    }
}

/// Processor configuration
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    pub quiet: bool,
    pub verbose: bool,
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Extra per-stage detail, shown with `verbose` unless `quiet`
    fn detail(&self, text: &str) -> bool {
        let shown = self.config.verbose && !self.config.quiet;
        if shown {
            print_info(text);
        }
        shown
    }

    /// Fetch, deduplicate and filter the lyrics named by `request`
    pub fn analyze(&self, request: &AnalysisRequest, provider: &dyn LyricsProvider) -> Result<Analysis> {
        request.validate()?;

        // Built once, shared read-only by the vocabulary pass
        let stopwords = Stopwords::load_with_extra(request.language, &request.extra_stopwords);
        let vocabulary_filter = VocabularyFilter::new(&stopwords, request.min_song_count)?;
        let deduplicator = LyricsDeduplicator::new(request.threshold)?
            .with_autojunk(request.autojunk)
            .with_progress(!self.config.quiet);

        if !self.config.quiet {
            print_header(&format!("Fetching lyrics for {} ({})", request.artist, provider.name()));
        }
        self.detail(&format!(
            "{} stopwords for {}, threshold {}, autojunk {}",
            stopwords.len(),
            request.language,
            request.threshold,
            if request.autojunk { "on" } else { "off" }
        ));

        let lyrics = provider.fetch_lyrics(&request.artist)?;
        if lyrics.is_empty() {
            return Err(Error::EmptyResult {
                artist: request.artist.clone(),
            });
        }
        let lyrics_bytes: u64 = lyrics.iter().map(|l| l.len() as u64).sum();

        if !self.config.quiet {
            print_info(&format!("{} songs with lyrics", lyrics.len()));
        }
        self.detail(&format!("{} of lyrics text", ByteSize(lyrics_bytes)));
        if !self.config.quiet {
            print_header("Removing near-duplicate versions...");
        }

        let (unique_lyrics, dedup_stats) = deduplicator.deduplicate_with_stats(lyrics);

        if !self.config.quiet {
            print_success(&format!(
                "{} similar songs removed, {} unique songs left",
                dedup_stats.duplicates,
                unique_lyrics.len()
            ));
        }
        self.detail(&format!(
            "{} duplicates replaced the kept song with a longer version",
            dedup_stats.replaced
        ));
        if !self.config.quiet {
            print_header(&format!(
                "Processing words (appearing in at least {} songs)...",
                request.min_song_count
            ));
        }

        let vocabulary = vocabulary_filter.analyze(&unique_lyrics);
        self.detail(&format!(
            "{} distinct candidate words across {} songs",
            vocabulary.song_counts.len(),
            unique_lyrics.len()
        ));

        if !self.config.quiet {
            print_success(&format!(
                "{} words kept, {} rare words filtered out",
                vocabulary.words.len(),
                vocabulary.filtered_out
            ));
        }

        Ok(Analysis {
            artist: request.artist.clone(),
            language: request.language,
            unique_lyrics,
            words: vocabulary.words,
            song_counts: vocabulary.song_counts,
            filtered_out: vocabulary.filtered_out,
            dedup_stats,
            lyrics_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticProvider;

    fn quiet() -> Processor {
        Processor::new(ProcessorConfig {
            quiet: true,
            verbose: false,
        })
    }

    fn strings(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pipeline() {
        let provider = StaticProvider::new(strings(&[
            "[Verse]\nAşk aşk güzel",
            "[Verse]\nAşk aşk güzel!",
            "Aşk, hayat, güzel (ben)",
            "Para para",
        ]));
        let request = AnalysisRequest::new("Test", Language::Turkish);

        let analysis = quiet().analyze(&request, &provider).unwrap();

        assert_eq!(analysis.dedup_stats.duplicates, 1);
        assert_eq!(analysis.unique_lyrics.len(), 3);
        assert_eq!(analysis.unique_lyrics[0], "[Verse]\nAşk aşk güzel!");
        assert_eq!(analysis.words, strings(&["aşk", "aşk", "güzel", "aşk", "güzel"]));
        assert_eq!(analysis.search("AŞK"), 3);
        assert_eq!(analysis.distinct_words(), 2);

        let report = analysis.top_words(20);
        assert_eq!(report.entries[0].word, "aşk");
        assert_eq!(report.entries[0].songs, 2);
    }

    #[test]
    fn test_verbose_detail_follows_quiet() {
        let verbose = Processor::new(ProcessorConfig {
            quiet: false,
            verbose: true,
        });
        assert!(verbose.detail("shown"));

        let quiet_verbose = Processor::new(ProcessorConfig {
            quiet: true,
            verbose: true,
        });
        assert!(!quiet_verbose.detail("hidden"));
        assert!(!quiet().detail("hidden"));
    }

    #[test]
    fn test_verbose_run_matches_quiet_run() {
        let texts = strings(&["sky road sky", "road sky!", "fire", "fire road"]);
        let request = AnalysisRequest::new("Someone", Language::English);
        let verbose = Processor::new(ProcessorConfig {
            quiet: false,
            verbose: true,
        });

        let loud = verbose
            .analyze(&request, &StaticProvider::new(texts.clone()))
            .unwrap();
        let silent = quiet().analyze(&request, &StaticProvider::new(texts)).unwrap();

        assert_eq!(loud.words, silent.words);
        assert_eq!(loud.unique_lyrics, silent.unique_lyrics);
    }

    #[test]
    fn test_empty_provider_is_an_error() {
        let provider = StaticProvider::new(Vec::new());
        let request = AnalysisRequest::new("Nobody", Language::English);

        let err = quiet().analyze(&request, &provider).unwrap_err();
        assert!(matches!(err, Error::EmptyResult { .. }));
    }

    #[test]
    fn test_invalid_request() {
        let provider = StaticProvider::new(strings(&["words"]));

        let mut request = AnalysisRequest::new("Someone", Language::English);
        request.threshold = 0.0;
        assert!(matches!(
            quiet().analyze(&request, &provider),
            Err(Error::InvalidArgument(_))
        ));

        let mut request = AnalysisRequest::new("Someone", Language::English);
        request.min_song_count = 0;
        assert!(request.validate().is_err());

        let request = AnalysisRequest::new("  ", Language::English);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_extra_stopwords_apply() {
        let provider = StaticProvider::new(strings(&["baby come home", "home baby"]));
        let mut request = AnalysisRequest::new("Someone", Language::English);
        request.extra_stopwords = vec!["baby".to_string()];

        let analysis = quiet().analyze(&request, &provider).unwrap();
        assert_eq!(analysis.words, strings(&["home", "home"]));
    }
}
