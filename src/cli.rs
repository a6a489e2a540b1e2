//! Command-line interface definition for lyrics-vocab
//!
//! Provides argument parsing and validation for the lyrics analysis tool.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::dedup::{validate_threshold, DEFAULT_SIMILARITY_THRESHOLD};
use crate::error::{Error, Result};
use crate::filter::DEFAULT_MIN_SONG_COUNT;
use crate::retry::{Backoff, RetryPolicy};
use crate::stopwords::Language;

/// Vocabulary analysis of an artist's song lyrics
///
/// Fetches every song of an artist, drops near-duplicate versions and
/// reports the words the artist keeps coming back to.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lyrics-vocab",
    author = "m0h1nd4",
    version,
    about = "Vocabulary analysis of an artist's song lyrics",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                            LYRICS-VOCAB v1.0.0                               ║
║                    Word Frequency Analysis of Song Lyrics                     ║
╚══════════════════════════════════════════════════════════════════════════════╝

Fetches the lyrics of an artist from Genius (or a local directory), removes
remixes, live takes and other near-duplicate versions, filters stopwords and
words used in a single song only, and charts the most frequent words.

EXAMPLES:
    # Interactive: prompts for language and artist
    lyrics-vocab

    # Turkish artist, token from the environment
    GENIUS_ACCESS_TOKEN=... lyrics-vocab "Sezen Aksu" -l turkish

    # Look up words without the interactive loop
    lyrics-vocab "Adele" -l en -s love -s heart --no-interactive

    # Analyse local lyric files and export the result
    lyrics-vocab "Adele" -l en -i ./lyrics --recursive --json adele.json

    # Looser duplicate detection, words in at least 3 songs
    lyrics-vocab "Adele" -l en --threshold 0.7 --min-songs 3
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/lyrics-vocab"
)]
pub struct Args {
    /// Artist name (prompted when missing)
    #[arg(value_name = "ARTIST")]
    pub artist: Option<String>,

    /// Lyrics language: english (en, e) or turkish (tr, t)
    #[arg(short, long, value_enum, value_name = "LANG")]
    pub language: Option<Language>,

    /// Genius API access token
    #[arg(long, env = "GENIUS_ACCESS_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Read lyrics from a file or directory instead of Genius
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Process directories recursively
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// File extensions to read with --input (default: txt)
    #[arg(long, value_name = "EXT", default_value = "txt")]
    pub extensions: String,

    /// Similarity at which two songs count as versions of the same song
    #[arg(long, value_name = "RATIO", default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f64,

    /// Disable the popular-character heuristic of the similarity measure
    #[arg(long, default_value_t = false)]
    pub no_autojunk: bool,

    /// Minimum number of songs a word must appear in
    #[arg(long, value_name = "NUM", default_value_t = DEFAULT_MIN_SONG_COUNT)]
    pub min_songs: usize,

    /// Entries per frequency chart
    #[arg(long, value_name = "NUM", default_value_t = 20)]
    pub top: usize,

    /// Minimum word length for the second chart
    #[arg(long, value_name = "NUM", default_value_t = 3)]
    pub min_length: usize,

    /// Additional stopwords, comma separated
    #[arg(long, value_name = "WORDS")]
    pub extra_stopwords: Option<String>,

    /// Stop after this many songs from Genius
    #[arg(long, value_name = "NUM")]
    pub max_songs: Option<usize>,

    /// Attempts for the artist lookup
    #[arg(long, value_name = "NUM", default_value_t = 3)]
    pub retries: u32,

    /// Seconds to wait between attempts
    #[arg(long, value_name = "SECS", default_value_t = 2)]
    pub retry_delay: u64,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 15)]
    pub timeout: u64,

    /// Word to look up after the analysis (repeatable)
    #[arg(short, long = "search", value_name = "WORD")]
    pub search: Vec<String>,

    /// Never prompt; skip the interactive search loop
    #[arg(long, default_value_t = false)]
    pub no_interactive: bool,

    /// Write the analysis as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Check numeric options and paths before any work starts
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)?;
        if self.min_songs < 1 {
            return Err(Error::invalid("--min-songs must be at least 1"));
        }
        if self.top < 1 {
            return Err(Error::invalid("--top must be at least 1"));
        }
        if self.min_length < 1 {
            return Err(Error::invalid("--min-length must be at least 1"));
        }
        if self.retries < 1 {
            return Err(Error::invalid("--retries must be at least 1"));
        }
        if self.timeout < 1 {
            return Err(Error::invalid("--timeout must be at least 1 second"));
        }
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(Error::invalid(format!(
                    "input path does not exist: {:?}",
                    input
                )));
            }
        }
        Ok(())
    }

    /// Prompts and the search loop are allowed
    pub fn is_interactive(&self) -> bool {
        !self.no_interactive && !self.quiet
    }

    /// Parse file extensions to process
    pub fn get_extensions(&self) -> Vec<String> {
        split_list(&self.extensions)
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect()
    }

    /// Parse the extra stopword list
    pub fn get_extra_stopwords(&self) -> Vec<String> {
        self.extra_stopwords
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
    }

    /// Retry policy for the Genius lookups
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        RetryPolicy::new(
            self.retries,
            Backoff::Fixed(Duration::from_secs(self.retry_delay)),
        )
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Token given on the command line or in the environment, if not blank
    pub fn get_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Lowercased, trimmed, non-empty items of a comma-separated list
fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("lyrics-vocab").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["Adele"]);

        assert_eq!(args.artist.as_deref(), Some("Adele"));
        assert_eq!(args.language, None);
        assert_eq!(args.threshold, 0.85);
        assert_eq!(args.min_songs, 2);
        assert_eq!(args.top, 20);
        assert_eq!(args.min_length, 3);
        assert_eq!(args.get_extensions(), vec!["txt".to_string()]);
        assert!(args.get_extra_stopwords().is_empty());
        assert!(args.is_interactive());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_language_aliases() {
        assert_eq!(parse(&["-l", "turkish"]).language, Some(Language::Turkish));
        assert_eq!(parse(&["-l", "tr"]).language, Some(Language::Turkish));
        assert_eq!(parse(&["--language", "e"]).language, Some(Language::English));
        assert!(Args::try_parse_from(["lyrics-vocab", "-l", "german"]).is_err());
    }

    #[test]
    fn test_lists() {
        let args = parse(&[
            "Adele",
            "--extensions",
            "txt, .LRC,,",
            "--extra-stopwords",
            "Baby, yeah ,",
            "-s",
            "love",
            "--search",
            "heart",
        ]);

        assert_eq!(args.get_extensions(), vec!["txt".to_string(), "lrc".to_string()]);
        assert_eq!(
            args.get_extra_stopwords(),
            vec!["baby".to_string(), "yeah".to_string()]
        );
        assert_eq!(args.search, vec!["love".to_string(), "heart".to_string()]);
    }

    #[test]
    fn test_validation() {
        assert!(parse(&["--threshold", "0"]).validate().is_err());
        assert!(parse(&["--threshold", "1.5"]).validate().is_err());
        assert!(parse(&["--threshold", "1"]).validate().is_ok());
        assert!(parse(&["--min-songs", "0"]).validate().is_err());
        assert!(parse(&["--top", "0"]).validate().is_err());
        assert!(parse(&["--retries", "0"]).validate().is_err());
        assert!(parse(&["-i", "/definitely/not/here"]).validate().is_err());
    }

    #[test]
    fn test_retry_policy() {
        let args = parse(&["--retries", "5", "--retry-delay", "1"]);
        let policy = args.retry_policy().unwrap();

        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.backoff(), Backoff::Fixed(Duration::from_secs(1)));
    }

    #[test]
    fn test_quiet_is_not_interactive() {
        assert!(!parse(&["-q"]).is_interactive());
        assert!(!parse(&["--no-interactive"]).is_interactive());
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let args = parse(&["--token", "   "]);
        assert_eq!(args.get_token(), None);

        let args = parse(&["--token", "abc"]);
        assert_eq!(args.get_token(), Some("abc"));
    }
}
