//! Alignment of lexicon candidates onto a page of text.
//!
//! Two passes run over the whole page: an exact pass, then a loose pass over
//! whatever is left. Running every exact match before any loose match keeps a
//! short candidate from being captured by an earlier lookalike word when its
//! true occurrence sits further down the page.

pub mod exact;
pub mod loose;

pub use exact::ExactMatcher;
pub use loose::LooseMatcher;

use crate::tokenizer::tokenize_page;
use crate::types::{
    AlignmentReport, AlignmentSettings, EntryId, MatchCandidate, MatchSpan, MatchedVia,
    PageContext, PageLine, Token,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Word-level comparison used by one alignment pass.
pub trait WordMatcher: Send + Sync {
    /// Pass identifier.
    fn name(&self) -> &'static str;

    /// Recorded on every span this pass emits.
    fn matched_via(&self) -> MatchedVia;

    /// Compare a normalized candidate word with a normalized token.
    fn words_match(&self, candidate_word: &str, token_word: &str) -> bool;
}

/// Spans of one page in reading order, with the tokenized page they refer to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub lines: Vec<PageLine>,
    /// Sorted by (line, first token); `spans[i].sequential_index == i`.
    pub spans: Vec<MatchSpan>,
    pub report: AlignmentReport,
}

impl AlignmentResult {
    pub fn span_for_entry(&self, entry_id: EntryId) -> Option<&MatchSpan> {
        self.spans.iter().find(|s| s.entry_id == entry_id)
    }

    /// Span covering the given token, if any.
    pub fn span_at(&self, line_index: usize, token_index: usize) -> Option<&MatchSpan> {
        self.spans
            .iter()
            .find(|s| s.covers(line_index, token_index))
    }

    pub fn sequential_index_of(&self, entry_id: EntryId) -> Option<usize> {
        self.span_for_entry(entry_id).map(|s| s.sequential_index)
    }

    /// Every (line, token) pair bound to some entry.
    pub fn covered_tokens(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.spans
            .iter()
            .flat_map(|s| s.token_indices.iter().map(move |&t| (s.line_index, t)))
    }
}

/// Call-scoped bookkeeping shared by both passes.
#[derive(Debug, Default)]
struct WorkingSet {
    used: HashSet<EntryId>,
    reserved: HashSet<(usize, usize)>,
    spans: Vec<MatchSpan>,
}

impl WorkingSet {
    fn is_free(&self, token: &Token) -> bool {
        !self.reserved.contains(&(token.line_index, token.token_index))
    }

    fn bind(
        &mut self,
        candidate: &MatchCandidate,
        line_index: usize,
        token_indices: Vec<usize>,
        via: MatchedVia,
    ) {
        for &token_index in &token_indices {
            self.reserved.insert((line_index, token_index));
        }
        self.used.insert(candidate.entry_id);
        self.spans.push(MatchSpan {
            sequential_index: 0,
            entry_id: candidate.entry_id,
            line_index,
            token_indices,
            matched_via: via,
        });
    }
}

/// Align candidates onto page lines with an unknown page and default settings.
pub fn align<S: AsRef<str>>(lines: &[S], candidates: &[MatchCandidate]) -> AlignmentResult {
    align_page(
        lines,
        candidates,
        &PageContext::default(),
        &AlignmentSettings::default(),
    )
}

/// Tokenize a page and align candidates onto it.
pub fn align_page<S: AsRef<str>>(
    lines: &[S],
    candidates: &[MatchCandidate],
    context: &PageContext,
    settings: &AlignmentSettings,
) -> AlignmentResult {
    let page = tokenize_page(lines, context.starting_surah.as_deref());
    align_lines(page, candidates, context, settings)
}

/// Align candidates onto an already tokenized page.
pub fn align_lines(
    lines: Vec<PageLine>,
    candidates: &[MatchCandidate],
    context: &PageContext,
    settings: &AlignmentSettings,
) -> AlignmentResult {
    let mut work = WorkingSet::default();
    let loose = LooseMatcher::from_settings(settings);
    let passes: [&dyn WordMatcher; 2] = [&ExactMatcher, &loose];

    for matcher in passes {
        tracing::trace!("Running {} alignment pass", matcher.name());
        run_pass(&lines, candidates, context, settings, matcher, &mut work);
    }

    let report = build_report(candidates, &work);
    if report.candidate_count > 0 && report.total_matches() == 0 {
        tracing::warn!(
            "No lexicon matches on page {:?} ({} candidates)",
            context.page_number,
            report.candidate_count
        );
    } else {
        tracing::debug!(
            "Aligned page {:?}: {} exact, {} loose, {} unmatched",
            context.page_number,
            report.exact_matches,
            report.loose_matches,
            report.unmatched.len()
        );
    }

    AlignmentResult {
        lines,
        spans: assign_sequential_indices(work.spans),
        report,
    }
}

fn run_pass(
    lines: &[PageLine],
    candidates: &[MatchCandidate],
    context: &PageContext,
    settings: &AlignmentSettings,
    matcher: &dyn WordMatcher,
    work: &mut WorkingSet,
) {
    for line in lines.iter().filter(|l| l.kind.is_matchable()) {
        for candidate in candidates {
            if work.used.contains(&candidate.entry_id)
                || !surah_matches(&candidate.surah_name, &line.surah_context)
                || !page_hint_allows(candidate, context, settings)
            {
                continue;
            }
            if let Some(token_indices) = find_in_line(&line.tokens, candidate, matcher, work) {
                work.bind(candidate, line.line_index, token_indices, matcher.matched_via());
            }
        }
    }
}

/// First start position, left to right, where the whole candidate is consumed.
fn find_in_line(
    tokens: &[Token],
    candidate: &MatchCandidate,
    matcher: &dyn WordMatcher,
    work: &WorkingSet,
) -> Option<Vec<usize>> {
    tokens
        .iter()
        .filter(|t| t.is_word() && work.is_free(t))
        .find_map(|t| consume_at(tokens, t.token_index, candidate, matcher, work))
}

fn consume_at(
    tokens: &[Token],
    start: usize,
    candidate: &MatchCandidate,
    matcher: &dyn WordMatcher,
    work: &WorkingSet,
) -> Option<Vec<usize>> {
    let mut pos = start;

    for word in &candidate.words {
        while tokens.get(pos)?.kind.is_skippable() {
            pos += 1;
        }
        let token = &tokens[pos];
        if !work.is_free(token) || !matcher.words_match(word, &token.normalized_text) {
            return None;
        }
        pos += 1;
    }

    // Whitespace and ornaments between the words belong to the span too.
    Some((start..pos).collect())
}

/// Empty context is a wildcard; otherwise names must be equal or nested.
fn surah_matches(candidate_surah: &str, line_context: &str) -> bool {
    line_context.is_empty()
        || candidate_surah == line_context
        || line_context.contains(candidate_surah)
        || candidate_surah.contains(line_context)
}

fn page_hint_allows(
    candidate: &MatchCandidate,
    context: &PageContext,
    settings: &AlignmentSettings,
) -> bool {
    if !settings.respect_page_hints {
        return true;
    }
    match (candidate.page_number, context.page_number) {
        (Some(hint), Some(page)) => hint == page,
        _ => true,
    }
}

/// Sort spans into reading order and number them.
fn assign_sequential_indices(mut spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
    spans.sort_by_key(|s| (s.line_index, s.first_token()));
    for (i, span) in spans.iter_mut().enumerate() {
        span.sequential_index = i;
    }
    spans
}

fn build_report(candidates: &[MatchCandidate], work: &WorkingSet) -> AlignmentReport {
    let exact_matches = work
        .spans
        .iter()
        .filter(|s| s.matched_via == MatchedVia::Exact)
        .count();

    AlignmentReport {
        candidate_count: candidates.len(),
        exact_matches,
        loose_matches: work.spans.len() - exact_matches,
        unmatched: candidates
            .iter()
            .map(|c| c.entry_id)
            .filter(|id| !work.used.contains(id))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon;
    use crate::types::LexiconEntry;
    use pretty_assertions::assert_eq;

    fn entry(entry_id: EntryId, word_text: &str, surah_name: &str) -> LexiconEntry {
        LexiconEntry {
            entry_id,
            word_text: word_text.to_string(),
            meaning: String::new(),
            surah_name: surah_name.to_string(),
            surah_number: 0,
            verse_number: 0,
            word_index: 0,
            page_number: None,
        }
    }

    fn candidates(entries: &[LexiconEntry]) -> Vec<MatchCandidate> {
        lexicon::build(entries).candidates
    }

    const LINE_114: &str = "لَا يُكَلِّفُ ٱللَّهُ نَفْسًا إِلَّا وُسْعَهَا ﴿١١٤﴾";
    const LINE_115: &str = "فَأَيْنَمَا تُوَلُّوا۟ فَثَمَّ وَجْهُ ٱللَّهِ إِنَّ ٱللَّهَ وَٰسِعٌ عَلِيمٌ ﴿١١٥﴾";

    #[test]
    fn exact_match_later_beats_earlier_loose_lookalike() {
        let cands = candidates(&[entry(1, "وَٰسِعٌ", "البقرة")]);
        let result = align(&[LINE_114, LINE_115], &cands);

        assert_eq!(result.spans.len(), 1);
        let span = &result.spans[0];
        assert_eq!(span.line_index, 1);
        assert_eq!(span.token_indices, vec![14]);
        assert_eq!(span.matched_via, MatchedVia::Exact);
    }

    #[test]
    fn loose_pass_binds_when_no_exact_exists() {
        let cands = candidates(&[entry(1, "وَٰسِعٌ", "البقرة")]);
        let result = align(&[LINE_114], &cands);

        assert_eq!(result.spans.len(), 1);
        assert_eq!(result.spans[0].token_indices, vec![10]);
        assert_eq!(result.spans[0].matched_via, MatchedVia::Loose);
        assert_eq!(result.report.loose_matches, 1);
    }

    #[test]
    fn exact_candidate_wins_shared_token() {
        // The loose candidate comes first in lexicon order.
        let cands = candidates(&[entry(1, "وَٰسِعٌ", ""), entry(2, "وُسْعَهَا", "")]);
        let result = align(&[LINE_114], &cands);

        let span = result.span_at(0, 10).unwrap();
        assert_eq!(span.entry_id, 2);
        assert_eq!(span.matched_via, MatchedVia::Exact);
        assert_eq!(result.report.unmatched, vec![1]);
    }

    #[test]
    fn phrase_is_not_split_by_single_word() {
        let line = "ذَٰلِكَ ٱلْكِتَٰبُ لَا رَيْبَ ۛ فِيهِ ۛ هُدًى لِّلْمُتَّقِينَ ﴿٢﴾";
        let cands = candidates(&[entry(2, "رَيْبَ", ""), entry(1, "لَا رَيْبَ", "")]);
        let result = align(&[line], &cands);

        assert_eq!(result.spans.len(), 1);
        assert_eq!(result.spans[0].entry_id, 1);
        assert_eq!(result.spans[0].token_indices, vec![4, 5, 6]);
        assert_eq!(result.report.unmatched, vec![2]);
    }

    #[test]
    fn phrase_skips_ornaments_between_words() {
        let line = "ذَٰلِكَ ٱلْكِتَٰبُ لَا رَيْبَ ۛ فِيهِ ۛ هُدًى لِّلْمُتَّقِينَ ﴿٢﴾";
        let cands = candidates(&[entry(1, "فِيهِ هُدًى", "")]);
        let result = align(&[line], &cands);

        assert_eq!(result.spans[0].token_indices, vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn phrase_span_covers_ornament_inside_it() {
        let cands = candidates(&[entry(1, "رَيْبَ فِيهِ", "")]);
        let result = align(&["لَا رَيْبَ ۛ فِيهِ"], &cands);

        let span = &result.spans[0];
        assert_eq!(span.token_indices, vec![2, 3, 4, 5, 6]);
        for token_index in 2..=6 {
            assert_eq!(result.span_at(0, token_index).map(|s| s.entry_id), Some(1));
        }
        assert_eq!(result.span_at(0, 1), None);
    }

    #[test]
    fn phrase_fails_when_middle_word_is_taken() {
        // The single word matches exactly; the phrase only loosely.
        let line = "لَا يُكَلِّفُ ٱللَّهُ نَفْسًا إِلَّا وُسْعَهَا ﴿١١٤﴾";
        let cands = candidates(&[entry(1, "يكلف الله نفس", ""), entry(2, "ٱللَّهُ", "")]);
        let result = align(&[line], &cands);

        assert_eq!(result.spans.len(), 1);
        assert_eq!(result.spans[0].entry_id, 2);
        assert_eq!(result.spans[0].token_indices, vec![4]);
        assert_eq!(result.report.unmatched, vec![1]);
    }

    #[test]
    fn surah_context_filters_candidates() {
        let lines = [
            "وَٱللَّهُ بِكُلِّ شَىْءٍ عَلِيمٌ ﴿٢٨٢﴾",
            "سُورَةُ آلِ عِمْرَانَ",
            "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
            "ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ ٱلْحَىُّ ٱلْقَيُّومُ ﴿٢﴾",
        ];
        let cands = candidates(&[
            entry(1, "عَلِيمٌ", "آل عمران"),
            entry(2, "ٱلْقَيُّومُ", "سورة آل عمران"),
            entry(3, "عَلِيمٌ", "البقرة"),
            entry(4, "ٱلرَّحِيمِ", ""),
        ]);
        let context = PageContext::for_page(50).with_starting_surah("البقرة");
        let result = align_page(&lines, &cands, &context, &AlignmentSettings::default());

        assert_eq!(result.span_for_entry(1), None);
        assert_eq!(result.span_for_entry(2).map(|s| s.line_index), Some(3));
        assert_eq!(result.span_for_entry(3).map(|s| s.line_index), Some(0));
        // Bismillah lines are never matched.
        assert_eq!(result.span_for_entry(4), None);
        assert_eq!(result.report.unmatched, vec![1, 4]);
    }

    #[test]
    fn lines_before_first_header_are_wildcard_without_starting_surah() {
        let lines = ["وَٱللَّهُ بِكُلِّ شَىْءٍ عَلِيمٌ ﴿٢٨٢﴾"];
        let cands = candidates(&[entry(1, "عَلِيمٌ", "آل عمران")]);
        let result = align(&lines, &cands);
        assert_eq!(result.spans.len(), 1);
    }

    #[test]
    fn page_hint_skips_other_pages() {
        let mut hinted = entry(1, "عَلِيمٌ", "");
        hinted.page_number = Some(5);
        let cands = candidates(&[hinted]);
        let lines = [LINE_115];
        let settings = AlignmentSettings::default();

        let other = align_page(&lines, &cands, &PageContext::for_page(6), &settings);
        assert!(other.spans.is_empty());

        let same = align_page(&lines, &cands, &PageContext::for_page(5), &settings);
        assert_eq!(same.spans.len(), 1);

        let unknown = align_page(&lines, &cands, &PageContext::default(), &settings);
        assert_eq!(unknown.spans.len(), 1);

        let ignoring = AlignmentSettings {
            respect_page_hints: false,
            ..settings
        };
        let ignored = align_page(&lines, &cands, &PageContext::for_page(6), &ignoring);
        assert_eq!(ignored.spans.len(), 1);
    }

    #[test]
    fn sequential_index_follows_reading_order() {
        let cands = candidates(&[
            entry(1, "عَلِيمٌ", ""),
            entry(2, "فَثَمَّ", ""),
            entry(3, "يُكَلِّفُ", ""),
        ]);
        let result = align(&[LINE_114, LINE_115], &cands);

        let order: Vec<_> = result.spans.iter().map(|s| s.entry_id).collect();
        assert_eq!(order, vec![3, 2, 1]);
        for (i, span) in result.spans.iter().enumerate() {
            assert_eq!(span.sequential_index, i);
        }
        assert_eq!(result.sequential_index_of(1), Some(2));
    }

    #[test]
    fn entry_binds_once_per_page() {
        // "ٱللَّهِ" occurs three times over the two lines.
        let cands = candidates(&[entry(1, "ٱللَّهِ", "")]);
        let result = align(&[LINE_114, LINE_115], &cands);
        assert_eq!(result.spans.len(), 1);
        assert_eq!(result.spans[0].line_index, 0);
        assert_eq!(result.spans[0].token_indices, vec![4]);
    }

    #[test]
    fn alignment_is_deterministic() {
        let cands = candidates(&[
            entry(1, "ٱللَّهِ", ""),
            entry(2, "ٱللَّهَ", ""),
            entry(3, "وَٰسِعٌ", ""),
            entry(4, "إِلَّا وُسْعَهَا", ""),
        ]);
        let first = align(&[LINE_114, LINE_115], &cands);
        let second = align(&[LINE_114, LINE_115], &cands);
        assert_eq!(first.spans, second.spans);
        assert_eq!(first.report, second.report);
    }

    #[test]
    fn empty_inputs_yield_empty_result() {
        let empty: [&str; 0] = [];
        let result = align(&empty, &[]);
        assert!(result.spans.is_empty());
        assert_eq!(result.report, AlignmentReport::default());

        let result = align(&[LINE_114], &[]);
        assert!(result.spans.is_empty());
        assert_eq!(result.lines.len(), 1);
    }
}
