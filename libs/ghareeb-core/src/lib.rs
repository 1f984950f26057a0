//! Core ghareeb library shared by the mushaf reader and the memorization quiz.
//!
//! Provides:
//! - Arabic normalization for comparison
//! - Line tokenizer and surah header / bismillah detection
//! - Lexicon ingestion and match candidates
//! - Two-pass alignment of lexicon entries onto a page (exact, then loose)
//! - Ordered fuzzy matching of a recitation transcript (Levenshtein distance)

pub mod alignment;
pub mod error;
pub mod lexicon;
pub mod matching;
pub mod normalize;
pub mod parser;
pub mod tokenizer;
pub mod types;

pub use alignment::{
    align, align_lines, align_page, AlignmentResult, ExactMatcher, LooseMatcher, WordMatcher,
};
pub use error::{LexiconError, Result};
pub use lexicon::{build as build_index, LexiconIndex};
pub use matching::{
    levenshtein_distance, match_hidden_words_in_order, match_hidden_words_with_policy, similarity,
    transcript_words, SpeechMatchResult, ThresholdPolicy,
};
pub use normalize::{normalize, normalize_surah_name};
pub use parser::parse_lexicon;
pub use tokenizer::{classify_line, classify_token, tokenize, tokenize_page};
pub use types::{
    AlignmentReport, AlignmentSettings, EffectiveSettings, EntryId, GlobalSettings, LexiconEntry,
    LineKind, MatchCandidate, MatchLevel, MatchSpan, MatchedVia, PageContext, PageLine,
    RawLexiconEntry, SessionSettings, Token, TokenKind,
};
