//! Lexicon ingestion.
//!
//! # Format
//! ```json
//! [
//!   {
//!     "id": 12,
//!     "wordText": "وَٰسِعٌ",
//!     "meaning": "واسع الفضل والعطاء",
//!     "surahName": "البقرة",
//!     "surahNumber": 2,
//!     "verseNumber": 115,
//!     "wordIndex": 9,
//!     "pageNumber": 18
//!   }
//! ]
//! ```
//!
//! `id` and `pageNumber` are optional; every other key is required. Entries
//! without an ID get one after the largest explicit ID.

use crate::error::{LexiconError, Result};
use crate::types::{EntryId, LexiconEntry, RawLexiconEntry};
use std::collections::HashSet;

/// Parse a JSON lexicon array into validated entries.
pub fn parse_lexicon(content: &str) -> Result<Vec<LexiconEntry>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let raw: Vec<RawLexiconEntry> = serde_json::from_str(content)?;
    from_raw_entries(raw)
}

/// Validate raw records and assign missing IDs.
pub fn from_raw_entries(raw: Vec<RawLexiconEntry>) -> Result<Vec<LexiconEntry>> {
    let mut seen_ids = HashSet::new();
    for (index, entry) in raw.iter().enumerate() {
        if let Some(id) = entry.id {
            if !seen_ids.insert(id) {
                return Err(LexiconError::DuplicateId { id, index });
            }
        }
    }

    let mut last_id = seen_ids.iter().copied().max().unwrap_or(0).max(0);
    let mut assigned = 0usize;
    let mut entries = Vec::with_capacity(raw.len());

    for (index, entry) in raw.into_iter().enumerate() {
        let id = match entry.id {
            Some(id) => id,
            None => {
                last_id = last_id
                    .checked_add(1)
                    .ok_or(LexiconError::IdOverflow { index })?;
                assigned += 1;
                last_id
            }
        };
        entries.push(validate_entry(entry, index, id)?);
    }

    tracing::debug!(
        "Parsed {} lexicon entries ({} assigned IDs)",
        entries.len(),
        assigned
    );
    Ok(entries)
}

/// Check required fields of one raw record.
pub fn validate_entry(raw: RawLexiconEntry, index: usize, entry_id: EntryId) -> Result<LexiconEntry> {
    let missing = |field: &'static str| LexiconError::MissingField { index, field };

    Ok(LexiconEntry {
        entry_id,
        word_text: raw.word_text.ok_or_else(|| missing("wordText"))?,
        meaning: raw.meaning.ok_or_else(|| missing("meaning"))?,
        surah_name: raw.surah_name.ok_or_else(|| missing("surahName"))?,
        surah_number: raw.surah_number.ok_or_else(|| missing("surahNumber"))?,
        verse_number: raw.verse_number.ok_or_else(|| missing("verseNumber"))?,
        word_index: raw.word_index.ok_or_else(|| missing("wordIndex"))?,
        page_number: raw.page_number,
    })
}
