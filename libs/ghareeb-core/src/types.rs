//! Core types for lexicon alignment and recitation matching.

use crate::matching::ThresholdPolicy;
use serde::{Deserialize, Serialize};

/// Stable identity of a lexicon entry.
pub type EntryId = i64;

/// Validated lexicon (ghareeb) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub entry_id: EntryId,
    /// Single word or multi-word phrase, usually fully diacritized.
    pub word_text: String,
    pub meaning: String,
    pub surah_name: String,
    pub surah_number: u32,
    pub verse_number: u32,
    pub word_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

/// Lexicon record as it appears in a lexicon file (may not have an ID yet).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLexiconEntry {
    pub id: Option<EntryId>,
    pub word_text: Option<String>,
    pub meaning: Option<String>,
    pub surah_name: Option<String>,
    pub surah_number: Option<u32>,
    pub verse_number: Option<u32>,
    pub word_index: Option<u32>,
    pub page_number: Option<u32>,
}

/// Lexicon entry prepared for alignment. Built once by the lexicon index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub entry_id: EntryId,
    /// Normalized full text of the entry.
    pub full_text: String,
    /// Normalized constituent words, fragments shorter than two characters dropped.
    pub words: Vec<String>,
    pub word_count: usize,
    /// Normalized surah name without the leading "سورة".
    pub surah_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl MatchCandidate {
    /// Whether this candidate spans more than one word.
    pub fn is_phrase(&self) -> bool {
        self.word_count > 1
    }
}

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Word,
    Whitespace,
    VerseNumber,
    /// Ornaments and pause marks standing on their own.
    Decorative,
}

impl TokenKind {
    /// Tokens the matcher steps over while consuming a phrase.
    pub fn is_skippable(self) -> bool {
        !matches!(self, Self::Word)
    }
}

/// Position-preserving piece of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Verbatim text, including any diacritics and ornaments.
    pub text: String,
    pub line_index: usize,
    pub token_index: usize,
    pub kind: TokenKind,
    /// Empty for every kind except `Word`.
    pub normalized_text: String,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Line classification on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum LineKind {
    Verse,
    /// Header line opening a surah. The name is normalized.
    SurahHeader { surah_name: String },
    Bismillah,
}

impl LineKind {
    /// Header and bismillah lines are never matched against.
    pub fn is_matchable(&self) -> bool {
        matches!(self, Self::Verse)
    }
}

/// One line of a page after classification and tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLine {
    pub line_index: usize,
    pub text: String,
    pub kind: LineKind,
    /// Normalized surah name the line belongs to. Empty means "any surah".
    pub surah_context: String,
    /// Empty for header and bismillah lines.
    pub tokens: Vec<Token>,
}

/// How a span was bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedVia {
    Exact,
    Loose,
}

/// A lexicon entry bound to word tokens of one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    /// 0-based reading-order position within the page's spans.
    pub sequential_index: usize,
    pub entry_id: EntryId,
    pub line_index: usize,
    /// Contiguous token indices, ascending. Starts and ends on a word token.
    pub token_indices: Vec<usize>,
    pub matched_via: MatchedVia,
}

impl MatchSpan {
    pub fn first_token(&self) -> usize {
        self.token_indices.first().copied().unwrap_or_default()
    }

    pub fn last_token(&self) -> usize {
        self.token_indices.last().copied().unwrap_or_default()
    }

    pub fn covers(&self, line_index: usize, token_index: usize) -> bool {
        self.line_index == line_index && self.token_indices.contains(&token_index)
    }
}

/// Statistics for the audit collaborator. Never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub candidate_count: usize,
    pub exact_matches: usize,
    pub loose_matches: usize,
    /// Candidates that found no span on this page, in candidate order.
    pub unmatched: Vec<EntryId>,
}

impl AlignmentReport {
    pub fn total_matches(&self) -> usize {
        self.exact_matches + self.loose_matches
    }
}

/// What the caller knows about a page before aligning it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// Surah that lines above the page's first header belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_surah: Option<String>,
}

impl PageContext {
    pub fn for_page(page_number: u32) -> Self {
        Self {
            page_number: Some(page_number),
            starting_surah: None,
        }
    }

    pub fn with_starting_surah(mut self, surah_name: impl Into<String>) -> Self {
        self.starting_surah = Some(surah_name.into());
        self
    }
}

/// Recitation strictness chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    Lenient,
    Normal,
    Strict,
}

impl Default for MatchLevel {
    fn default() -> Self {
        Self::Normal
    }
}

impl MatchLevel {
    /// Similarity required for targets longer than the short-word limit.
    pub fn long_word_threshold(self) -> f64 {
        match self {
            Self::Lenient => 0.6,
            Self::Normal => 0.7,
            Self::Strict => 0.85,
        }
    }

    /// Similarity required for short targets. Always stricter than the long-word threshold.
    pub fn short_word_threshold(self) -> f64 {
        match self {
            Self::Lenient => 0.66,
            Self::Normal => 0.75,
            Self::Strict => 1.0,
        }
    }

    /// Get the level name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Normal => "normal",
            Self::Strict => "strict",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "lenient" => Some(Self::Lenient),
            "normal" => Some(Self::Normal),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

/// Knobs of the loose alignment pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentSettings {
    /// Largest length difference for a substring match.
    pub loose_max_length_delta: usize,
    /// Shorter word must have at least this many characters for a substring match.
    pub loose_min_shared_length: usize,
    /// Skip candidates whose page hint names another page.
    pub respect_page_hints: bool,
}

impl Default for AlignmentSettings {
    fn default() -> Self {
        Self {
            loose_max_length_delta: 2,
            loose_min_shared_length: 3,
            respect_page_hints: true,
        }
    }
}

/// Global settings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub match_level: MatchLevel,
    pub short_word_max_chars: usize,
    pub loose_max_length_delta: usize,
    pub loose_min_shared_length: usize,
    pub respect_page_hints: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        let alignment = AlignmentSettings::default();
        Self {
            match_level: MatchLevel::default(),
            short_word_max_chars: 3,
            loose_max_length_delta: alignment.loose_max_length_delta,
            loose_min_shared_length: alignment.loose_min_shared_length,
            respect_page_hints: alignment.respect_page_hints,
        }
    }
}

/// Per-quiz-session settings (all fields optional for overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_level: Option<MatchLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_word_max_chars: Option<usize>,
}

impl SessionSettings {
    /// Create new session settings with only the ID set.
    pub fn new(session_id: String) -> Self {
        Self {
            session_id,
            match_level: None,
            short_word_max_chars: None,
        }
    }
}

/// Effective settings (global merged with session overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveSettings {
    pub match_level: MatchLevel,
    pub short_word_max_chars: usize,
    pub loose_max_length_delta: usize,
    pub loose_min_shared_length: usize,
    pub respect_page_hints: bool,
}

impl EffectiveSettings {
    /// Merge global settings with optional session settings.
    pub fn merge(global: &GlobalSettings, session: Option<&SessionSettings>) -> Self {
        match session {
            Some(s) => Self {
                match_level: s.match_level.unwrap_or(global.match_level),
                short_word_max_chars: s.short_word_max_chars.unwrap_or(global.short_word_max_chars),
                loose_max_length_delta: global.loose_max_length_delta,
                loose_min_shared_length: global.loose_min_shared_length,
                respect_page_hints: global.respect_page_hints,
            },
            None => Self {
                match_level: global.match_level,
                short_word_max_chars: global.short_word_max_chars,
                loose_max_length_delta: global.loose_max_length_delta,
                loose_min_shared_length: global.loose_min_shared_length,
                respect_page_hints: global.respect_page_hints,
            },
        }
    }

    pub fn alignment(&self) -> AlignmentSettings {
        AlignmentSettings {
            loose_max_length_delta: self.loose_max_length_delta,
            loose_min_shared_length: self.loose_min_shared_length,
            respect_page_hints: self.respect_page_hints,
        }
    }

    pub fn threshold_policy(&self) -> ThresholdPolicy {
        ThresholdPolicy {
            level: self.match_level,
            short_word_max_chars: self.short_word_max_chars,
        }
    }
}
