//! Loose pass: equality, or one word containing the other when their lengths
//! are close and the shorter one is not a tiny function word.

use super::WordMatcher;
use crate::types::{AlignmentSettings, MatchedVia};

#[derive(Debug, Clone, Copy)]
pub struct LooseMatcher {
    /// Largest length difference, in characters.
    pub max_length_delta: usize,
    /// Minimum length of the shorter word, in characters.
    pub min_shared_length: usize,
}

impl Default for LooseMatcher {
    fn default() -> Self {
        Self::from_settings(&AlignmentSettings::default())
    }
}

impl LooseMatcher {
    pub fn from_settings(settings: &AlignmentSettings) -> Self {
        Self {
            max_length_delta: settings.loose_max_length_delta,
            min_shared_length: settings.loose_min_shared_length,
        }
    }
}

impl WordMatcher for LooseMatcher {
    fn name(&self) -> &'static str {
        "loose"
    }

    fn matched_via(&self) -> MatchedVia {
        MatchedVia::Loose
    }

    fn words_match(&self, candidate_word: &str, token_word: &str) -> bool {
        if candidate_word.is_empty() || token_word.is_empty() {
            return false;
        }
        if candidate_word == token_word {
            return true;
        }

        let candidate_len = candidate_word.chars().count();
        let token_len = token_word.chars().count();
        if candidate_len.abs_diff(token_len) > self.max_length_delta
            || candidate_len.min(token_len) < self.min_shared_length
        {
            return false;
        }

        if candidate_len <= token_len {
            token_word.contains(candidate_word)
        } else {
            candidate_word.contains(token_word)
        }
    }
}
