//! Sequence-alignment similarity between two texts
//!
//! The score is `2 * M / (len_a + len_b)` where `M` is the number of
//! characters covered by the matching blocks found by recursively taking the
//! longest common block and recursing on the parts left and right of it.
//! Lengths are counted in `char`s.
//!
//! The second sequence is pre-indexed ([`SequenceIndex`]) so that one text can
//! be compared against many others without rebuilding the index.

use ahash::RandomState;
use hashbrown::HashMap;

use crate::normalize::similarity_form;

/// Sequences shorter than this never have popular characters removed
const AUTOJUNK_MIN_LEN: usize = 200;

/// Pre-indexed second sequence of a comparison
#[derive(Debug, Clone)]
pub struct SequenceIndex {
    chars: Vec<char>,
    /// Character -> ascending positions in `chars`; popular characters are absent
    b2j: HashMap<char, Vec<usize>, RandomState>,
}

impl SequenceIndex {
    /// Index a sequence.
    ///
    /// With `autojunk`, sequences of at least 200 characters drop every
    /// character that occurs more than `len / 100 + 1` times from the index.
    /// Such characters can still be part of a block, they just never seed one.
    pub fn new(text: &str, autojunk: bool) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut b2j: HashMap<char, Vec<usize>, RandomState> = HashMap::default();

        for (j, c) in chars.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        let n = chars.len();
        if autojunk && n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= ntest);
        }

        Self { chars, b2j }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// A block `a[a_start..a_start+size] == b[b_start..b_start+size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Longest matching block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
/// Returns a zero-sized block at `(alo, blo)` when nothing matches.
fn find_longest_match(
    a: &[char],
    b: &SequenceIndex,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> Block {
    let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0usize);

    // j2len[j] = length of the longest block ending at a[i - 1] and b[j]
    let mut j2len: HashMap<usize, usize, RandomState> = HashMap::default();

    for i in alo..ahi {
        let mut next: HashMap<usize, usize, RandomState> = HashMap::default();

        if let Some(positions) = b.b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }

                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next.insert(j, k);

                if k > bestsize {
                    besti = i + 1 - k;
                    bestj = j + 1 - k;
                    bestsize = k;
                }
            }
        }

        j2len = next;
    }

    // Popular characters never seed a block, but a block may grow across them
    while besti > alo && bestj > blo && a[besti - 1] == b.chars[bestj - 1] {
        besti -= 1;
        bestj -= 1;
        bestsize += 1;
    }
    while besti + bestsize < ahi
        && bestj + bestsize < bhi
        && a[besti + bestsize] == b.chars[bestj + bestsize]
    {
        bestsize += 1;
    }

    Block {
        a_start: besti,
        b_start: bestj,
        size: bestsize,
    }
}

/// All non-empty matching blocks, ordered by position
pub fn matching_blocks(a: &[char], b: &SequenceIndex) -> Vec<Block> {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = find_longest_match(a, b, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }

        let (i, j, k) = (block.a_start, block.b_start, block.size);
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
        blocks.push(block);
    }

    blocks.sort_by_key(|block| (block.a_start, block.b_start));
    blocks
}

/// Similarity ratio in `[0, 1]`; two empty sequences are identical
pub fn ratio(a: &[char], b: &SequenceIndex) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched: usize = matching_blocks(a, b).iter().map(|block| block.size).sum();
    2.0 * matched as f64 / total as f64
}

/// Similarity of two raw lyric texts after normalization
pub fn lyrics_similarity(text1: &str, text2: &str, autojunk: bool) -> f64 {
    let a: Vec<char> = similarity_form(text1).chars().collect();
    let b = SequenceIndex::new(&similarity_form(text2), autojunk);
    ratio(&a, &b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_ratio(a: &str, b: &str, autojunk: bool) -> f64 {
        let a: Vec<char> = a.chars().collect();
        ratio(&a, &SequenceIndex::new(b, autojunk))
    }

    #[test]
    fn test_known_ratios() {
        assert!((raw_ratio("abcd", "bcde", true) - 0.75).abs() < 1e-9);
        assert!((raw_ratio("abc abc", "abc abc abc", true) - 14.0 / 18.0).abs() < 1e-9);
        assert!((raw_ratio("private thing", "thing private", true) - 7.0 / 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_edge_ratios() {
        assert_eq!(raw_ratio("", "", true), 1.0);
        assert_eq!(raw_ratio("a", "", true), 0.0);
        assert_eq!(raw_ratio("same", "same", true), 1.0);
    }

    #[test]
    fn test_matching_blocks() {
        let a: Vec<char> = "abxcd".chars().collect();
        let b = SequenceIndex::new("abcd", true);
        let blocks = matching_blocks(&a, &b);
        assert_eq!(
            blocks,
            vec![
                Block { a_start: 0, b_start: 0, size: 2 },
                Block { a_start: 3, b_start: 2, size: 2 },
            ]
        );
    }

    #[test]
    fn test_autojunk_on_long_sequences() {
        let body = "la la land ".repeat(30);
        let a = format!("x{}", body);
        let b = format!("y{}", body);

        // Every character is popular, so only a shared prefix could match
        assert_eq!(raw_ratio(&a, &b, true), 0.0);

        let without = raw_ratio(&a, &b, false);
        assert!((without - 660.0 / 662.0).abs() < 1e-9);
    }

    #[test]
    fn test_lyrics_similarity_ignores_case_and_punctuation() {
        let score = lyrics_similarity("Hello, World!", "hello world", true);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_unrelated_texts_score_low() {
        let score = lyrics_similarity("hello world", "completely different content here", true);
        assert!(score < 0.2);
    }
}
