//! Shared fixtures for integration tests.
//!
//! The page is Al-Fatiha as laid out on page 1 of a Madani mushaf, with the
//! header and bismillah lines included.

use ghareeb_core::{parse_lexicon, LexiconEntry};

pub const FATIHA_PAGE: [&str; 6] = [
    "سُورَةُ الفَاتِحَةِ",
    "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ ﴿١﴾",
    "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَٰلَمِينَ ﴿٢﴾ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ ﴿٣﴾",
    "مَٰلِكِ يَوْمِ ٱلدِّينِ ﴿٤﴾ إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ ﴿٥﴾",
    "ٱهْدِنَا ٱلصِّرَٰطَ ٱلْمُسْتَقِيمَ ﴿٦﴾ صِرَٰطَ ٱلَّذِينَ أَنْعَمْتَ عَلَيْهِمْ",
    "غَيْرِ ٱلْمَغْضُوبِ عَلَيْهِمْ وَلَا ٱلضَّآلِّينَ ﴿٧﴾",
];

/// Lexicon entries for the page, with a few that must not bind:
/// 3 is swallowed by the phrase 2, 7 belongs to another surah,
/// 8 normalizes to nothing and 9 carries another page's hint.
pub const FATIHA_LEXICON: &str = r#"[
  {"id": 1, "wordText": "ٱلْعَٰلَمِينَ", "meaning": "كل ما سوى الله", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 2, "wordIndex": 3},
  {"id": 2, "wordText": "يَوْمِ ٱلدِّينِ", "meaning": "يوم الجزاء والحساب", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 4, "wordIndex": 1},
  {"id": 3, "wordText": "ٱلدِّينِ", "meaning": "الجزاء", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 4, "wordIndex": 2},
  {"id": 4, "wordText": "ٱلصِّرَٰطَ", "meaning": "الطريق", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 6, "wordIndex": 1},
  {"id": 5, "wordText": "صِرَٰطَ", "meaning": "طريق", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 7, "wordIndex": 0},
  {"id": 6, "wordText": "ٱلضَّآلِّينَ", "meaning": "التائهين عن الحق", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 7, "wordIndex": 8},
  {"id": 7, "wordText": "ٱلْمَغْضُوبِ", "meaning": "من غضب الله عليهم", "surahName": "البقرة", "surahNumber": 2, "verseNumber": 61, "wordIndex": 0},
  {"id": 8, "wordText": "ء", "meaning": "همزة", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 1, "wordIndex": 0},
  {"id": 9, "wordText": "نَسْتَعِينُ", "meaning": "نطلب العون", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 5, "wordIndex": 3, "pageNumber": 2},
  {"id": 10, "wordText": "ٱلرَّحِيمِ", "meaning": "ذو الرحمة", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 3, "wordIndex": 1},
  {"id": 11, "wordText": "أَنْعَمتَ", "meaning": "تفضلت", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 7, "wordIndex": 3},
  {"id": 12, "wordText": "نَعْبُدُهُ", "meaning": "نخضع له", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 5, "wordIndex": 1},
  {"id": 13, "wordText": "عَلَيْهِمْ", "meaning": "", "surahName": "الفاتحة", "surahNumber": 1, "verseNumber": 7, "wordIndex": 4}
]"#;

pub fn fatiha_entries() -> Vec<LexiconEntry> {
    parse_lexicon(FATIHA_LEXICON).expect("fixture lexicon parses")
}
