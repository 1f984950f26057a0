//! Arabic text normalization for comparison.
//!
//! Two renderings of the same word (fully diacritized mushaf text, a bare
//! lexicon spelling, an ASR transcript) must normalize to the same string.

const SURAH_PREFIX: &str = "سوره";

/// Normalize Arabic text: strips diacritics and tajweed marks, unifies letter
/// variants, drops characters outside the allow-list and collapses whitespace.
///
/// Idempotent and total: any input yields a string, and normalizing twice
/// gives the same result as normalizing once.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        let Some(mapped) = fold_char(c) else {
            continue;
        };
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(mapped);
    }

    out
}

/// Normalize a surah name and strip a leading "سورة" word.
pub fn normalize_surah_name(name: &str) -> String {
    let normalized = normalize(name);
    match normalized.strip_prefix(SURAH_PREFIX) {
        Some(rest) if rest.is_empty() => String::new(),
        Some(rest) if rest.starts_with(' ') => rest.trim_start().to_string(),
        _ => normalized,
    }
}

/// Map one character to its canonical form, or drop it.
fn fold_char(c: char) -> Option<char> {
    match c {
        // Harakat, tanween, shadda, sukun, small high marks
        '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}' => None,
        // Quranic annotation signs (pause marks, small waw/yaa, sajda, rub el hizb)
        '\u{06D6}'..='\u{06ED}' => None,
        // Extended tajweed marks
        '\u{08D3}'..='\u{08FF}' => None,
        // Tatweel and standalone hamza
        '\u{0640}' | 'ء' => None,
        'أ' | 'إ' | 'آ' | 'ٱ' | 'ٲ' | 'ٳ' | 'ٵ' => Some('ا'),
        'ى' | 'ی' | 'ے' => Some('ي'),
        'ة' => Some('ه'),
        'ک' => Some('ك'),
        _ if is_allowed(c) => Some(c),
        _ => None,
    }
}

fn is_allowed(c: char) -> bool {
    is_arabic_letter(c) || is_digit(c)
}

/// Arabic base letters, tatweel and hamza excluded.
pub(crate) fn is_arabic_letter(c: char) -> bool {
    matches!(c, '\u{0621}'..='\u{063A}' | '\u{0641}'..='\u{064A}' | '\u{0671}'..='\u{06D3}')
        && c != 'ء'
}

/// Arabic-Indic, Extended Arabic-Indic or ASCII digit.
pub(crate) fn is_digit(c: char) -> bool {
    matches!(c, '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}' | '0'..='9')
}
