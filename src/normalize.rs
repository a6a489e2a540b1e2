//! Text normalization shared by similarity checks and tokenization

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Section markers such as "[Chorus]" or "[Verse 2: Artist]"
    static ref BRACKETED: Regex = Regex::new(r"\[.*?\]").unwrap();
    /// Parenthetical asides such as "(yeah)" or "(x2)"
    static ref PARENTHETICAL: Regex = Regex::new(r"\(.*?\)").unwrap();
    /// Anything that is not a letter, number, underscore or whitespace.
    /// Combining marks go too, so "İ" lowercases to a plain "i".
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}\p{N}_\s]").unwrap();
    /// Decimal digits plus digit-valued symbols (superscripts, circled digits);
    /// fractions and other numeric symbols are not digits
    static ref DIGITS: Regex = Regex::new(concat!(
        r"^[\p{Nd}\x{B2}\x{B3}\x{B9}\x{1369}-\x{1371}\x{19DA}\x{2070}\x{2074}-\x{2079}",
        r"\x{2080}-\x{2089}\x{2460}-\x{2468}\x{2474}-\x{247C}\x{2488}-\x{2490}\x{24EA}",
        r"\x{24F5}-\x{24FD}\x{24FF}\x{2776}-\x{277E}\x{2780}-\x{2788}\x{278A}-\x{2792}",
        r"\x{10A40}-\x{10A43}\x{10E60}-\x{10E68}\x{11052}-\x{1105A}\x{1F100}-\x{1F10A}]+$"
    ))
    .unwrap();
}

/// Form used when comparing two songs for near-duplicates.
///
/// Lowercases, trims surrounding whitespace and strips punctuation. Section
/// markers are kept.
pub fn similarity_form(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_WORD.replace_all(lowered.trim(), "").into_owned()
}

/// Form used for vocabulary analysis.
///
/// Lowercases, removes bracketed and parenthetical spans (single line,
/// shortest match) and strips punctuation.
pub fn clean_lyrics(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_sections = BRACKETED.replace_all(&lowered, "");
    let without_asides = PARENTHETICAL.replace_all(&without_sections, "");
    NON_WORD.replace_all(&without_asides, "").into_owned()
}

/// Split a song into its normalized word tokens, in document order
pub fn tokenize(text: &str) -> Vec<String> {
    clean_lyrics(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// True for tokens made only of digits ("2024", "٣", "²"), not fractions ("½")
#[inline]
pub fn is_numeric_token(word: &str) -> bool {
    DIGITS.is_match(word)
}
