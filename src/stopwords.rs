//! Stopword lists
//!
//! [`Stopwords::load`] is the one-time initialization step: it builds an
//! immutable set from the embedded base list for the language plus the fixed
//! lyric fillers, and the resulting handle is shared read-only by every
//! vocabulary pass.

use ahash::RandomState;
use clap::ValueEnum;
use hashbrown::HashSet;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Lyric fillers removed regardless of language
pub const LYRIC_FILLERS: &[&str] = &["im", "oh", "la", "da", "de", "lyrics"];

/// Turkish pronouns and fillers that dominate counts without saying much
pub const TURKISH_EXTRAS: &[&str] = &["ben", "bana", "beni", "sen", "sana", "seni", "bi", "bir"];

const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

const TURKISH: &[&str] = &[
    "acaba", "ama", "aslında", "az", "bazı", "belki", "biri", "birkaç", "birşey", "biz", "bu",
    "çok", "çünkü", "da", "daha", "de", "defa", "diye", "eğer", "en", "gibi", "hem", "hep",
    "hepsi", "her", "hiç", "için", "ile", "ise", "kez", "ki", "kim", "mı", "mu", "mü", "nasıl",
    "ne", "neden", "nerde", "nerede", "nereye", "niçin", "niye", "o", "sanki", "şey", "siz", "şu",
    "tüm", "ve", "veya", "ya", "yani",
];

/// Language of the analysed lyrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[value(aliases = ["en", "e"])]
    English,
    #[value(aliases = ["tr", "t"])]
    Turkish,
}

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Turkish => "turkish",
        }
    }

    /// Base stopword list for the language
    pub fn base_stopwords(&self) -> &'static [&'static str] {
        match self {
            Self::English => ENGLISH,
            Self::Turkish => TURKISH,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" | "e" => Ok(Self::English),
            "turkish" | "tr" | "t" => Ok(Self::Turkish),
            other => Err(Error::invalid(format!(
                "unsupported language '{}' (expected english or turkish)",
                other
            ))),
        }
    }
}

/// Immutable stopword set
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<String, RandomState>,
}

impl Stopwords {
    /// Base list for `language` plus the lyric fillers (and the Turkish extras)
    pub fn load(language: Language) -> Self {
        Self::load_with_extra(language, std::iter::empty::<&str>())
    }

    /// Same as [`Stopwords::load`], merging user-supplied words (lowercased)
    pub fn load_with_extra<I, S>(language: Language, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: HashSet<String, RandomState> = HashSet::default();

        words.extend(language.base_stopwords().iter().map(|w| w.to_string()));
        words.extend(LYRIC_FILLERS.iter().map(|w| w.to_string()));

        if language == Language::Turkish {
            words.extend(TURKISH_EXTRAS.iter().map(|w| w.to_string()));
        }

        words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );

        log::debug!("Loaded {} stopwords for {}", words.len(), language);
        Self { words }
    }

    /// Empty set, nothing is treated as a stopword
    pub fn none() -> Self {
        Self {
            words: HashSet::default(),
        }
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_set() {
        let stopwords = Stopwords::load(Language::English);

        assert!(stopwords.contains("the"));
        assert!(stopwords.contains("oh"));
        assert!(stopwords.contains("lyrics"));
        assert!(!stopwords.contains("ben"));
        assert!(!stopwords.contains("love"));
    }

    #[test]
    fn test_turkish_set_has_extras() {
        let stopwords = Stopwords::load(Language::Turkish);

        for word in TURKISH_EXTRAS.iter().chain(LYRIC_FILLERS) {
            assert!(stopwords.contains(word), "missing {}", word);
        }
        assert!(stopwords.contains("için"));
        assert!(!stopwords.contains("aşk"));
    }

    #[test]
    fn test_extra_words_are_normalized() {
        let stopwords = Stopwords::load_with_extra(Language::English, [" Yeah ", "", "BABY"]);

        assert!(stopwords.contains("yeah"));
        assert!(stopwords.contains("baby"));
        assert!(!stopwords.contains(""));
    }

    #[test]
    fn test_parse_language() {
        assert_eq!("T".parse::<Language>().unwrap(), Language::Turkish);
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
        assert_eq!(" En ".parse::<Language>().unwrap(), Language::English);
        assert!("german".parse::<Language>().is_err());
    }
}
