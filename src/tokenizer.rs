//! Word scanner producing the event stream consumed by the snippet engine.
//!
//! The scanner makes a single left-to-right pass over the input and reports
//! two kinds of event, in source order: a term (a word, an acronym, or a
//! CJK n-gram/segment) and a single non-word code point. Non-word events
//! carry every code point between terms, so the engine can reconstruct the
//! original surface text around the words it keeps.
//!
//! # Examples
//!
//! ```
//! use kireji::cjk::CjkMode;
//! use kireji::tokenizer::{TokenEvent, WordTokenizer};
//!
//! let tokenizer = WordTokenizer::new(CjkMode::Disabled);
//! let terms: Vec<_> = tokenizer
//!     .tokenize("call AT&T now")
//!     .unwrap()
//!     .filter_map(|event| match event {
//!         TokenEvent::Term { text, .. } => Some(text),
//!         TokenEvent::Nonword { .. } => None,
//!     })
//!     .collect();
//! assert_eq!(terms, vec!["call", "AT&T", "now"]);
//! ```

use crate::cjk::{CjkMode, CjkTokens};
use crate::error::Result;
use crate::unicode::{self, Infix};

/// Maximum accepted term length, in UTF-8 bytes. Longer tokens are junk for
/// matching purposes and are dropped.
pub const MAX_TERM_LEN: usize = 64;

/// One event of the scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenEvent {
    /// A term. `ngram_len` is 0 for whole words and the length in characters
    /// for CJK n-grams.
    Term { text: String, ngram_len: usize },
    /// A non-word code point between terms.
    Nonword { ch: char },
}

/// Boxed event iterator returned by [`WordTokenizer::tokenize`].
pub type TokenEvents = Box<dyn Iterator<Item = TokenEvent>>;

/// Position within the input, cheap to save and restore for lookahead.
#[derive(Clone)]
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Cursor<'a> {
        Cursor { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn pos(&self) -> usize {
        self.pos
    }
}

/// The word tokenizer.
///
/// Handles mixed Latin/CJK text, dotted acronyms (`U.N.C.L.E`), intra-word
/// punctuation (`AT&T`, `1,000`, `doesn't`) and technical suffixes (`c++`,
/// `c#`). Terms keep their original case; matching against normalized forms
/// is the caller's concern.
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    cjk_mode: CjkMode,
}

impl WordTokenizer {
    pub fn new(cjk_mode: CjkMode) -> WordTokenizer {
        WordTokenizer { cjk_mode }
    }

    /// Scan `text` and return its events.
    pub fn tokenize(&self, text: &str) -> Result<TokenEvents> {
        let cjk = self.cjk_mode.is_enabled();
        let mut events: Vec<TokenEvent> = Vec::new();
        let mut cur = Cursor::new(text);

        'outer: loop {
            // Advance to the start of the next term.
            let mut ch;
            loop {
                match cur.peek() {
                    None => return Ok(Box::new(events.into_iter())),
                    Some(c) if unicode::is_wordchar(c) => {
                        ch = c;
                        break;
                    }
                    Some(c) => {
                        events.push(TokenEvent::Nonword { ch: c });
                        cur.bump();
                    }
                }
            }

            // A CJK run is handed to the CJK tokenizer wholesale.
            if cjk && unicode::is_cjk(ch) {
                let start = cur.pos();
                while cur
                    .peek()
                    .is_some_and(|c| unicode::is_cjk(c) && unicode::is_wordchar(c))
                {
                    cur.bump();
                }
                let run = &text[start..cur.pos()];
                for token in CjkTokens::new(run, self.cjk_mode) {
                    if token.text.len() > MAX_TERM_LEN {
                        continue;
                    }
                    events.push(TokenEvent::Term {
                        text: token.text.to_string(),
                        ngram_len: token.ngram_len,
                    });
                }
                continue 'outer;
            }

            // Initials separated by '.' (e.g. P.T.O., U.N.C.L.E).
            if ch.is_ascii_uppercase() {
                if let Some((acronym, after)) = scan_acronym(&cur) {
                    cur = after;
                    push_term(&mut events, acronym);
                    continue 'outer;
                }
            }

            // Word body, with intra-word punctuation.
            let mut term = String::new();
            loop {
                term.push(ch);
                let prevch = ch;
                cur.bump();
                match cur.peek() {
                    None => break,
                    Some(c) if cjk && unicode::is_cjk(c) && unicode::is_wordchar(c) => break,
                    Some(c) if unicode::is_wordchar(c) => ch = c,
                    Some(c) => {
                        // Only an infix if a word character follows it.
                        let mut ahead = cur.clone();
                        ahead.bump();
                        let Some(next) = ahead.peek() else { break };
                        if !unicode::is_wordchar(next) {
                            break;
                        }
                        if cjk && unicode::is_cjk(next) {
                            break;
                        }
                        let infix = if unicode::is_digit(prevch) && unicode::is_digit(next) {
                            unicode::check_infix_digit(c)
                        } else {
                            // Handles things like '&' in AT&T, apostrophes, etc.
                            unicode::check_infix(c)
                        };
                        let Some(infix) = infix else { break };
                        if let Infix::Fold(folded) = infix {
                            term.push(folded);
                        }
                        cur.bump();
                        ch = next;
                    }
                }
            }

            // Up to three trailing suffix characters.
            let presuffix = term.len();
            let mut nsuffix = 0;
            while let Some(c) = cur.peek() {
                if !unicode::is_suffix(c) {
                    break;
                }
                nsuffix += 1;
                if nsuffix > 3 {
                    term.truncate(presuffix);
                    break;
                }
                term.push(c);
                cur.bump();
            }
            // Don't index fish+chips as fish+ chips.
            if cur.peek().is_some_and(unicode::is_wordchar) {
                term.truncate(presuffix);
            }

            push_term(&mut events, term);
        }
    }
}

fn push_term(events: &mut Vec<TokenEvent>, text: String) {
    if text.len() > MAX_TERM_LEN {
        return;
    }
    events.push(TokenEvent::Term { text, ngram_len: 0 });
}

/// Try to read a dotted acronym at the cursor.
///
/// Consumes `L (. L)*` of ASCII uppercase letters. One letter does not make
/// an acronym (that keeps `M&S` on the infix path). A trailing dot takes
/// part in the lookahead check but stays in the stream, so it is still
/// reported as a non-word character afterwards. Returns the original-case
/// dotted term and the cursor after the last letter, or `None` when the
/// sequence runs straight into a word character.
fn scan_acronym<'a>(cur: &Cursor<'a>) -> Option<(String, Cursor<'a>)> {
    let mut p = cur.clone();
    let mut term = String::new();
    let mut letters = 0;

    term.push(p.bump()?);
    letters += 1;
    loop {
        let mut q = p.clone();
        if q.peek() != Some('.') {
            break;
        }
        q.bump();
        match q.peek() {
            Some(upper) if upper.is_ascii_uppercase() => {
                term.push('.');
                term.push(upper);
                letters += 1;
                q.bump();
                p = q;
            }
            _ => break,
        }
    }
    if letters < 2 {
        return None;
    }

    let mut lookahead = p.clone();
    if lookahead.peek() == Some('.') {
        lookahead.bump();
    }
    match lookahead.peek() {
        Some(c) if unicode::is_wordchar(c) => None,
        _ => Some((term, p)),
    }
}
