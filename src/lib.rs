//! # Lyrics Vocab
//!
//! Vocabulary analysis of an artist's song lyrics.
//!
//! ## Features
//!
//! - **Lyrics providers**: Genius API or a local directory of lyric files
//! - **Near-duplicate removal**: remixes, live takes and re-releases collapse
//!   into one song, keeping the longest version
//! - **Vocabulary filter**: stopwords, numbers and words used in a single song
//!   are dropped
//! - **Frequency charts**: top words overall and top longer words
//! - **Encoding detection**: local files in legacy encodings are transcoded
//!
//! ## Usage
//!
//! ```bash
//! # Prompts for language and artist
//! lyrics-vocab
//!
//! # Non-interactive, with word lookups
//! lyrics-vocab "Sezen Aksu" -l turkish -s aşk --no-interactive
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use lyrics_vocab::processor::{AnalysisRequest, Processor, ProcessorConfig};
//! use lyrics_vocab::provider::{GeniusConfig, GeniusProvider};
//! use lyrics_vocab::stopwords::Language;
//!
//! let provider = GeniusProvider::new(GeniusConfig::new("token")).unwrap();
//! let request = AnalysisRequest::new("Sezen Aksu", Language::Turkish);
//!
//! let processor = Processor::new(ProcessorConfig::default());
//! let analysis = processor.analyze(&request, &provider).unwrap();
//! println!("{}", analysis.top_words(20).render());
//! ```

pub mod cli;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod processor;
pub mod progress;
pub mod provider;
pub mod report;
pub mod retry;
pub mod similarity;
pub mod stopwords;

pub use cli::Args;
pub use dedup::{deduplicate, LyricsDeduplicator};
pub use error::{Error, Result};
pub use filter::VocabularyFilter;
pub use processor::{Analysis, AnalysisRequest, Processor, ProcessorConfig};
pub use stopwords::{Language, Stopwords};
