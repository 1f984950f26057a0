//! Recitation matching for memorization quizzes.
//!
//! The quiz controller polls with the growing transcript from the speech
//! recognizer; every call is independent and starts from scratch.

use crate::normalize::normalize;
use crate::types::MatchLevel;
use serde::{Deserialize, Serialize};

/// Result of matching hidden words against a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechMatchResult {
    /// Target words heard, in target order.
    pub matched: Vec<String>,
    /// Target words not heard, in target order.
    pub missing: Vec<String>,
    /// Fraction of targets matched, between 0.0 and 1.0.
    pub score: f64,
    /// Spoken-word index consumed by each matched word. Strictly increasing.
    pub matched_positions: Vec<usize>,
}

impl SpeechMatchResult {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Picks the similarity threshold for a target word.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    pub level: MatchLevel,
    /// Normalized targets up to this many characters use the short-word threshold.
    pub short_word_max_chars: usize,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(MatchLevel::default())
    }
}

impl ThresholdPolicy {
    pub fn new(level: MatchLevel) -> Self {
        Self {
            level,
            short_word_max_chars: 3,
        }
    }

    pub fn threshold_for(&self, target: &str) -> f64 {
        if normalize(target).chars().count() <= self.short_word_max_chars {
            self.level.short_word_threshold()
        } else {
            self.level.long_word_threshold()
        }
    }
}

/// Normalized words of a transcript.
pub fn transcript_words(transcript: &str) -> Vec<String> {
    normalize(transcript)
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Match target words in order against a transcript with one threshold.
///
/// Single forward scan: each target searches spoken words from the cursor and
/// consumes the first one whose similarity reaches `threshold`. Consumed words
/// are never revisited. A target with no match is reported missing and leaves
/// the cursor where it was.
pub fn match_hidden_words_in_order<S: AsRef<str>>(
    transcript: &str,
    target_words: &[S],
    threshold: f64,
) -> SpeechMatchResult {
    scan_in_order(transcript, target_words, |_| threshold)
}

/// Same scan as [`match_hidden_words_in_order`], threshold chosen per target.
pub fn match_hidden_words_with_policy<S: AsRef<str>>(
    transcript: &str,
    target_words: &[S],
    policy: &ThresholdPolicy,
) -> SpeechMatchResult {
    scan_in_order(transcript, target_words, |target| policy.threshold_for(target))
}

fn scan_in_order<S, F>(transcript: &str, target_words: &[S], threshold: F) -> SpeechMatchResult
where
    S: AsRef<str>,
    F: Fn(&str) -> f64,
{
    let spoken = transcript_words(transcript);
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut matched_positions = Vec::new();
    let mut cursor = 0;

    for target in target_words {
        let target = target.as_ref();
        let normalized = normalize(target);
        let required = threshold(&normalized);

        let hit = if normalized.is_empty() {
            None
        } else {
            spoken[cursor..]
                .iter()
                .position(|word| similarity(word, &normalized) >= required)
                .map(|offset| cursor + offset)
        };

        match hit {
            Some(position) => {
                matched.push(target.to_string());
                matched_positions.push(position);
                cursor = position + 1;
            }
            None => missing.push(target.to_string()),
        }
    }

    let score = if target_words.is_empty() {
        1.0
    } else {
        matched.len() as f64 / target_words.len() as f64
    };

    tracing::trace!(
        "Matched {}/{} hidden words against {} spoken words",
        matched.len(),
        target_words.len(),
        spoken.len()
    );

    SpeechMatchResult {
        matched,
        missing,
        score,
        matched_positions,
    }
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows instead of full matrix for memory efficiency
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity (0.0 to 1.0) based on Levenshtein distance, lengths in characters.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0; // Both empty strings are identical
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}
