//! Line tokenizer and line classification.
//!
//! Tokens keep their verbatim text so a renderer can rebuild the line exactly;
//! ornaments are only stripped while deciding a token's kind.

use crate::normalize::{is_arabic_letter, is_digit, normalize, normalize_surah_name};
use crate::types::{LineKind, PageLine, Token, TokenKind};

const SURAH_HEADER_PREFIX: &str = "سوره ";
/// Longest header is "سورة آل عمران" plus slack for a decorated variant.
const SURAH_HEADER_MAX_WORDS: usize = 4;
const BISMILLAH: &str = "بسم الله الرحمن الرحيم";

/// Split a line into word, whitespace, verse-number and decorative tokens.
///
/// Concatenating the texts of the returned tokens reproduces `line`.
pub fn tokenize(line: &str, line_index: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut run_is_space: Option<bool> = None;

    for (idx, c) in line.char_indices() {
        let is_space = c.is_whitespace();
        if let Some(prev) = run_is_space {
            if prev != is_space {
                push_token(&mut tokens, &line[start..idx], line_index, prev);
                start = idx;
            }
        }
        run_is_space = Some(is_space);
    }

    if let Some(prev) = run_is_space {
        push_token(&mut tokens, &line[start..], line_index, prev);
    }

    tokens
}

fn push_token(tokens: &mut Vec<Token>, text: &str, line_index: usize, whitespace: bool) {
    let kind = if whitespace {
        TokenKind::Whitespace
    } else {
        classify_token(text)
    };
    let normalized_text = if kind == TokenKind::Word {
        normalize(text)
    } else {
        String::new()
    };

    tokens.push(Token {
        text: text.to_string(),
        line_index,
        token_index: tokens.len(),
        kind,
        normalized_text,
    });
}

/// Decide the kind of a non-whitespace token.
///
/// Everything but Arabic letters and digits is treated as ornament: brackets
/// around verse numbers, rub el hizb, free-standing pause marks.
pub fn classify_token(text: &str) -> TokenKind {
    let mut has_char = false;
    let mut all_digits = true;

    for c in text.chars().filter(|&c| is_arabic_letter(c) || is_digit(c)) {
        has_char = true;
        all_digits &= is_digit(c);
    }

    if !has_char {
        TokenKind::Decorative
    } else if all_digits {
        TokenKind::VerseNumber
    } else {
        TokenKind::Word
    }
}

/// Classify a whole line by fixed rules on its normalized form.
pub fn classify_line(line: &str) -> LineKind {
    let normalized = normalize(line);

    if let Some(surah_name) = surah_header_name(&normalized) {
        LineKind::SurahHeader { surah_name }
    } else if is_bismillah(&normalized) {
        LineKind::Bismillah
    } else {
        LineKind::Verse
    }
}

fn surah_header_name(normalized: &str) -> Option<String> {
    if !normalized.starts_with(SURAH_HEADER_PREFIX) {
        return None;
    }
    // An-Nur opens with the word "سورة" inside a verse; verse lines carry
    // numbers or run long.
    if normalized.chars().any(is_digit)
        || normalized.split(' ').count() > SURAH_HEADER_MAX_WORDS
    {
        return None;
    }
    Some(normalize_surah_name(normalized))
}

fn is_bismillah(normalized: &str) -> bool {
    match normalized.strip_prefix(BISMILLAH) {
        Some(rest) => !rest.chars().any(is_arabic_letter),
        None => false,
    }
}

/// Classify and tokenize every line of a page, tracking which surah each
/// line belongs to.
///
/// Lines above the first header inherit `starting_surah`, or the empty
/// wildcard context when the caller does not know it.
pub fn tokenize_page<S: AsRef<str>>(lines: &[S], starting_surah: Option<&str>) -> Vec<PageLine> {
    let mut current = starting_surah.map(normalize_surah_name).unwrap_or_default();

    lines
        .iter()
        .enumerate()
        .map(|(line_index, line)| {
            let text = line.as_ref();
            let kind = classify_line(text);
            if let LineKind::SurahHeader { surah_name } = &kind {
                current = surah_name.clone();
            }
            let tokens = if kind.is_matchable() {
                tokenize(text, line_index)
            } else {
                Vec::new()
            };

            PageLine {
                line_index,
                text: text.to_string(),
                kind,
                surah_context: current.clone(),
                tokens,
            }
        })
        .collect()
}
