//! The positional state machine behind snippet assembly.
//!
//! Terms and non-word characters arrive in source order. The machine keeps
//! up to `context_length` recent tokens in a bounded deque, flushes them
//! into the output when a match opens a snippet, and then copies tokens
//! through verbatim until the after-context horizon passes. Overlapping CJK
//! n-grams are folded into the same accounting through `xpos`, which only
//! advances for whole tokens and 1-grams, and through the `pending_1gram` /
//! `ignore_1grams` lookahead described on the methods.

use std::collections::VecDeque;
use std::mem;

use ahash::AHashSet;
use log::debug;

use crate::snippet::SnippetConfig;
use crate::unicode;

#[derive(Debug, Default)]
pub(crate) struct SnippetState {
    /// End of the current after-context window, in `xpos` units.
    horizon: u32,
    /// Position of the previous accepted term.
    lastpos: u32,
    /// Effective position: counts whole tokens and CJK 1-grams only, so
    /// context widths stay stable when n-grams overlap.
    xpos: u32,
    /// Consecutive whitespace characters seen, for collapsing.
    nwhitespace: u32,
    /// Upcoming 1-grams already covered by a larger highlighted n-gram.
    ignore_1grams: usize,
    /// Non-word characters accumulated before context begins.
    leading_nonword: String,
    /// The most recent CJK 1-gram, held back until the 2-gram at the same
    /// base decides whether it becomes context or part of a match.
    pending_1gram: String,
    /// Bounded FIFO of recent context tokens, trailing punctuation attached.
    context: VecDeque<String>,
    /// The snippet under construction.
    result: String,
    /// Distinct matched terms already emitted into `result`.
    match_cover: AHashSet<String>,
    /// Largest cover seen across completed snippets.
    best_matchcount: usize,
    /// Completed snippets tied for `best_matchcount`, in text order.
    snippets: Vec<String>,
}

impl SnippetState {
    pub(crate) fn new() -> SnippetState {
        SnippetState::default()
    }

    /// Accept one term at position `pos`.
    ///
    /// `ngram_len` is 0 for whole words, otherwise the CJK n-gram length in
    /// characters. `is_match` is the caller's verdict on the normalized
    /// form; `term` itself is the original-case surface form.
    pub(crate) fn accept_term(
        &mut self,
        term: &str,
        pos: u32,
        ngram_len: usize,
        is_match: bool,
        config: &SnippetConfig,
    ) {
        // Context never crosses a termpos discontinuity.
        if pos > self.lastpos + 2 {
            self.context.clear();
            self.leading_nonword.clear();
            self.pending_1gram.clear();
            self.ignore_1grams = 0;
        }
        // N-grams longer than one character share their base position with
        // the 1-gram that already advanced xpos.
        if ngram_len <= 1 {
            self.xpos += pos.saturating_sub(self.lastpos);
        }
        self.lastpos = pos;
        self.nwhitespace = 0;

        if is_match {
            if self.xpos > self.horizon + self.context.len() as u32 + 1 && !self.result.is_empty()
            {
                // A gap opened after the previous snippet's context ended,
                // so start a new snippet.
                self.push_result();
                self.result.push_str(&config.inter_snippet);
            } else {
                let leading = mem::take(&mut self.leading_nonword);
                self.result.push_str(&leading);
            }
            self.leading_nonword.clear();

            if ngram_len == 1 && !self.pending_1gram.is_empty() {
                let pending = mem::take(&mut self.pending_1gram);
                self.push_context(pending, config.context_length);
            }

            // Flush the before-context.
            while let Some(front) = self.context.pop_front() {
                self.result.push_str(&front);
            }

            self.result.push_str(&config.pre_match);
            self.result.push_str(term);
            self.result.push_str(&config.post_match);
            self.match_cover.insert(term.to_string());

            // Some following 1-grams repeat characters of this match, so
            // they must not reach the output or the context.
            self.ignore_1grams = ngram_len.saturating_sub(1);

            self.horizon = self.xpos + config.context_length as u32 + self.ignore_1grams as u32;
        } else if self.xpos <= self.horizon {
            // The after-context of a match.
            match ngram_len {
                0 => self.result.push_str(term),
                1 => {
                    if self.ignore_1grams > 0 {
                        self.ignore_1grams -= 1;
                    } else {
                        self.result.push_str(term);
                    }
                }
                // Longer n-grams repeat their constituent 1-grams.
                _ => {}
            }
        } else {
            // Not in any window yet; remember the term for later context.
            match ngram_len {
                0 => self.push_context(term.to_string(), config.context_length),
                1 => {
                    if !self.pending_1gram.is_empty() {
                        let pending = mem::take(&mut self.pending_1gram);
                        self.push_context(pending, config.context_length);
                    }
                    if self.ignore_1grams > 0 {
                        self.ignore_1grams -= 1;
                    } else {
                        self.pending_1gram = term.to_string();
                    }
                }
                _ => {}
            }
        }
    }

    /// Accept one non-word code point at the current term position.
    pub(crate) fn accept_nonword_char(&mut self, ch: char, pos: u32, config: &SnippetConfig) {
        if self.context.is_empty() && !self.leading_nonword.is_empty() {
            // Still accumulating the run that begins a snippet.
            self.leading_nonword.push(ch);
            return;
        }
        self.xpos += pos.saturating_sub(self.lastpos);

        let ch = if unicode::is_whitespace(ch) {
            self.nwhitespace += 1;
            if self.nwhitespace > 1 {
                return;
            }
            ' '
        } else {
            self.nwhitespace = 0;
            ch
        };

        if !self.pending_1gram.is_empty() {
            let pending = mem::take(&mut self.pending_1gram);
            self.push_context(pending, config.context_length);
        }
        self.ignore_1grams = 0;

        if pos == 0 {
            // Non-word characters before the first word.
            self.leading_nonword.push(ch);
        } else if self.xpos <= self.horizon {
            if ch == ' ' && self.xpos == self.horizon {
                // The after-context ends on the first whitespace past the
                // last word in the horizon, unless another word abuts it.
                // That isn't known yet, so hold the space back for now.
                self.leading_nonword.push(ch);
                return;
            }
            self.result.push(ch);
        } else if let Some(back) = self.context.back_mut() {
            // Attach trailing punctuation to the previous context token.
            back.push(ch);
        }
    }

    /// Retire the snippet under construction.
    ///
    /// Keeps the completed-snippet list at the highest distinct-match count
    /// seen so far: a strictly better snippet replaces the list, a tie
    /// appends, anything worse is dropped.
    pub(crate) fn push_result(&mut self) {
        let matchcount = self.match_cover.len();
        if self.result.is_empty() || matchcount == 0 {
            return;
        }

        if matchcount > self.best_matchcount {
            debug!("new best snippet covers {matchcount} distinct terms");
            self.snippets.clear();
            self.best_matchcount = matchcount;
            self.snippets.push(mem::take(&mut self.result));
        } else if matchcount == self.best_matchcount {
            self.snippets.push(mem::take(&mut self.result));
        } else {
            self.result.clear();
        }
        self.match_cover.clear();
    }

    /// Finalize and return the concatenated best snippets.
    ///
    /// Snippets opened within the same text already carry their own leading
    /// separator, so the retained list is joined as-is.
    pub(crate) fn snippets_string(&mut self) -> String {
        self.push_result();
        self.snippets.concat()
    }

    fn push_context(&mut self, term: String, context_length: usize) {
        self.context.push_back(term);
        // Pushing before trimming keeps a zero context length working.
        while self.context.len() > context_length {
            self.context.pop_front();
            self.leading_nonword.clear();
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = SnippetState::default();
    }
}
