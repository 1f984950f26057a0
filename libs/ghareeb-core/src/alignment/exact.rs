//! Exact pass: normalized words must be identical.

use super::WordMatcher;
use crate::types::MatchedVia;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl WordMatcher for ExactMatcher {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn matched_via(&self) -> MatchedVia {
        MatchedVia::Exact
    }

    fn words_match(&self, candidate_word: &str, token_word: &str) -> bool {
        !candidate_word.is_empty() && candidate_word == token_word
    }
}
