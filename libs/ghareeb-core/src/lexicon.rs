//! Lexicon index: turns entries into ordered match candidates.

use crate::normalize::{normalize, normalize_surah_name};
use crate::types::{EntryId, LexiconEntry, MatchCandidate};
use serde::{Deserialize, Serialize};

/// Fragments shorter than this (in characters) are dropped from candidates.
const MIN_FRAGMENT_CHARS: usize = 2;

/// Candidates ready for alignment plus the entries that could not be used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconIndex {
    /// Sorted by word count, longest phrases first; ties keep lexicon order.
    pub candidates: Vec<MatchCandidate>,
    /// Entries whose every fragment normalized to fewer than two characters.
    pub empty_normalized: Vec<EntryId>,
}

impl LexiconIndex {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Build match candidates from lexicon entries.
///
/// Phrases are placed before single words so a phrase is never split up by a
/// single-word candidate that matches its first word.
pub fn build(entries: &[LexiconEntry]) -> LexiconIndex {
    let mut index = LexiconIndex::default();

    for entry in entries {
        match MatchCandidate::from_entry(entry) {
            Some(candidate) => index.candidates.push(candidate),
            None => {
                tracing::warn!(
                    "Lexicon entry {} normalizes to empty text: {:?}",
                    entry.entry_id,
                    entry.word_text
                );
                index.empty_normalized.push(entry.entry_id);
            }
        }
    }

    // Stable sort keeps lexicon order among equal word counts.
    index
        .candidates
        .sort_by(|a, b| b.word_count.cmp(&a.word_count));

    tracing::debug!(
        "Built {} match candidates ({} empty-normalized)",
        index.candidates.len(),
        index.empty_normalized.len()
    );
    index
}

impl MatchCandidate {
    /// Normalize an entry. Returns `None` when no usable fragment remains.
    pub fn from_entry(entry: &LexiconEntry) -> Option<Self> {
        let full_text = normalize(&entry.word_text);
        let words: Vec<String> = full_text
            .split(' ')
            .filter(|w| w.chars().count() >= MIN_FRAGMENT_CHARS)
            .map(str::to_string)
            .collect();

        if words.is_empty() {
            return None;
        }

        Some(Self {
            entry_id: entry.entry_id,
            word_count: words.len(),
            full_text,
            words,
            surah_name: normalize_surah_name(&entry.surah_name),
            page_number: entry.page_number,
        })
    }
}
