//! Code point classification for the word scanner.
//!
//! These predicates decide where terms begin and end. They follow the
//! Unicode word identification rules: word characters are letters, numbers,
//! combining marks and connector punctuation, with a small set of characters
//! additionally allowed *inside* a word (apostrophes, `&`, and a separate
//! list between digits such as `,` and `.` so that `1,000` stays one term).

use unicode_normalization::char::is_combining_mark;

/// Connector punctuation (category Pc).
const CONNECTOR_PUNCTUATION: &[char] = &[
    '_', '\u{203F}', '\u{2040}', '\u{2054}', '\u{FE33}', '\u{FE34}', '\u{FE4D}', '\u{FE4E}',
    '\u{FE4F}', '\u{FF3F}',
];

/// True for code points that can form part of a word.
pub fn is_wordchar(ch: char) -> bool {
    ch.is_alphanumeric() || is_combining_mark(ch) || CONNECTOR_PUNCTUATION.contains(&ch)
}

/// True for whitespace code points.
pub fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace()
}

/// True for decimal digits.
///
/// `char::is_numeric` covers all Unicode number categories; excluding
/// alphabetic code points drops letter-like numerals (Roman numerals etc.).
pub fn is_digit(ch: char) -> bool {
    ch.is_numeric() && !ch.is_alphabetic()
}

/// True for code points in the CJK blocks handled by the CJK tokenizer:
/// CJK Unified Ideographs plus extensions A and B, the compatibility
/// ideographs, Hiragana, Katakana, and Hangul syllables.
pub fn is_cjk(ch: char) -> bool {
    matches!(ch,
        '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}'   // CJK Extension A
        | '\u{20000}'..='\u{2A6DF}' // CJK Extension B
        | '\u{F900}'..='\u{FAFF}'   // CJK Compatibility Ideographs
        | '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}'   // Katakana
        | '\u{AC00}'..='\u{D7AF}'   // Hangul Syllables
    )
}

/// How an intra-word character is carried into the term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Infix {
    /// Append this code point (possibly folded from the original).
    Fold(char),
    /// Absorb the code point without appending anything.
    Ignore,
}

/// Characters allowed between two word characters.
///
/// `’` and `‛` fold to a plain apostrophe; the zero-width and word-joiner
/// set is absorbed without being appended.
pub fn check_infix(ch: char) -> Option<Infix> {
    match ch {
        '\'' | '&' | '\u{00B7}' | '\u{05F4}' | '\u{2027}' => Some(Infix::Fold(ch)),
        '\u{2019}' | '\u{201B}' => Some(Infix::Fold('\'')),
        '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}' => Some(Infix::Ignore),
        _ => None,
    }
}

/// Characters allowed between two digits.
///
/// This list comes from Unicode's word identifying algorithm.
pub fn check_infix_digit(ch: char) -> Option<Infix> {
    match ch {
        ',' | '.' | ';'
        | '\u{037E}' // GREEK QUESTION MARK
        | '\u{0589}' // ARMENIAN FULL STOP
        | '\u{060D}' // ARABIC DATE SEPARATOR
        | '\u{07F8}' // NKO COMMA
        | '\u{2044}' // FRACTION SLASH
        | '\u{FE10}' // PRESENTATION FORM FOR VERTICAL COMMA
        | '\u{FE13}' // PRESENTATION FORM FOR VERTICAL COLON
        | '\u{FE14}' // PRESENTATION FORM FOR VERTICAL SEMICOLON
            => Some(Infix::Fold(ch)),
        '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}' => Some(Infix::Ignore),
        _ => None,
    }
}

/// Characters accepted as a technical suffix after a word (`c++`, `c#`).
pub fn is_suffix(ch: char) -> bool {
    ch == '+' || ch == '#'
}
