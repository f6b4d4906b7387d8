//! Overlapping word-window chunker.
//!
//! Splits page text into fixed-size word windows so that every window
//! fits an embedding model's input comfortably while neighbouring
//! windows share enough words that a sentence straddling a boundary is
//! fully contained in at least one of them.
//!
//! The output is a pure function of the input text and parameters:
//! no randomness, fully reproducible.

use crate::error::ConfigError;

/// Split `text` into windows of `chunk_size` words, advancing the window
/// start by `chunk_size - overlap` words each step.
///
/// Whitespace runs are normalized to single spaces before splitting.
/// The final window may hold fewer than `chunk_size` words; windowing
/// stops once a window reaches the last word, so no trailing window is
/// ever fully contained in its predecessor. Text shorter than
/// `chunk_size` words yields exactly one chunk; empty or whitespace-only
/// text yields none.
///
/// # Errors
///
/// `overlap >= chunk_size` would make the stride non-positive and the
/// window sequence non-terminating, so it is rejected up front. A zero
/// `chunk_size` is rejected for the same reason.
pub fn chunk_words(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>, ConfigError> {
    if chunk_size == 0 {
        return Err(ConfigError("chunk_size must be > 0".to_string()));
    }
    if overlap >= chunk_size {
        return Err(ConfigError(format!(
            "overlap ({}) must be smaller than chunk_size ({})",
            overlap, chunk_size
        )));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let stride = chunk_size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + chunk_size).min(words.len());
        chunks.push(words[start..end].join(" "));
        if end == words.len() {
            break;
        }
        start += stride;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn short_text_single_chunk() {
        let chunks = chunk_words("only a few words here", 400, 50).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "only a few words here");
    }

    #[test]
    fn empty_text_no_chunks() {
        assert!(chunk_words("", 400, 50).unwrap().is_empty());
        assert!(chunk_words("   \n\t  ", 400, 50).unwrap().is_empty());
    }

    #[test]
    fn whitespace_runs_normalized() {
        let chunks = chunk_words("a  \t b\n\nc", 400, 50).unwrap();
        assert_eq!(chunks, vec!["a b c".to_string()]);
    }

    #[test]
    fn thousand_words_three_windows() {
        // n=1000, c=400, o=50 -> [0:400], [350:750], [700:1000]
        let chunks = chunk_words(&numbered_words(1000), 400, 50).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].starts_with("w0 ") && chunks[0].ends_with(" w399"));
        assert!(chunks[1].starts_with("w350 ") && chunks[1].ends_with(" w749"));
        assert!(chunks[2].starts_with("w700 ") && chunks[2].ends_with(" w999"));
    }

    #[test]
    fn five_hundred_words_two_windows() {
        // n=500, c=400, o=50 -> [0:400], [350:500]; last window is short.
        let chunks = chunk_words(&numbered_words(500), 400, 50).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].starts_with("w350 ") && chunks[1].ends_with(" w499"));
        assert_eq!(chunks[1].split(' ').count(), 150);
    }

    #[test]
    fn exact_window_is_single_chunk() {
        // n == chunk_size: the first window reaches the last word.
        let chunks = chunk_words(&numbered_words(400), 400, 50).unwrap();
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn chunk_count_matches_formula() {
        // chunks = ceil(max(n - o, 0) / (c - o)) for n > 0
        for &(n, c, o) in &[
            (1usize, 400usize, 50usize),
            (350, 400, 50),
            (400, 400, 50),
            (401, 400, 50),
            (500, 400, 50),
            (750, 400, 50),
            (1000, 400, 50),
            (10_000, 400, 50),
            (17, 10, 3),
            (100, 10, 0),
        ] {
            let chunks = chunk_words(&numbered_words(n), c, o).unwrap();
            let expected = (n.saturating_sub(o)).div_ceil(c - o).max(1);
            assert_eq!(chunks.len(), expected, "n={} c={} o={}", n, c, o);
        }
    }

    #[test]
    fn every_word_covered_in_order() {
        // Consecutive windows overlap by `o` words and together cover
        // every word of the normalized text with nothing skipped.
        let (n, c, o) = (1000, 400, 50);
        let chunks = chunk_words(&numbered_words(n), c, o).unwrap();

        let mut expected_start = 0usize;
        for chunk in &chunks {
            let words: Vec<&str> = chunk.split(' ').collect();
            assert_eq!(words[0], format!("w{}", expected_start));
            for (offset, w) in words.iter().enumerate() {
                assert_eq!(*w, format!("w{}", expected_start + offset));
            }
            expected_start += c - o;
        }
        let last = chunks.last().unwrap();
        assert!(last.ends_with(&format!(" w{}", n - 1)));
    }

    #[test]
    fn zero_overlap_is_disjoint_windows() {
        let chunks = chunk_words(&numbered_words(25), 10, 0).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks[1].starts_with("w10 "));
        assert!(chunks[2].starts_with("w20 "));
    }

    #[test]
    fn overlap_equal_to_chunk_size_rejected() {
        let err = chunk_words("some text", 50, 50).unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn overlap_greater_than_chunk_size_rejected() {
        assert!(chunk_words("some text", 50, 100).is_err());
    }

    #[test]
    fn zero_chunk_size_rejected() {
        assert!(chunk_words("some text", 0, 0).is_err());
    }

    #[test]
    fn deterministic() {
        let text = numbered_words(777);
        let a = chunk_words(&text, 400, 50).unwrap();
        let b = chunk_words(&text, 400, 50).unwrap();
        assert_eq!(a, b);
    }
}
