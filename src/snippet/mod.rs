//! Snippet generation for search result display.
//!
//! [`SnippetGenerator`] consumes free-form Unicode text plus a set of query
//! terms and produces a short excerpt with the query terms highlighted and a
//! configurable amount of surrounding context. Terms are matched case
//! insensitively (and stemmed, when a stemmer is configured) but keep their
//! original case in the output.
//!
//! # Examples
//!
//! ```
//! use kireji::snippet::SnippetGenerator;
//!
//! let mut generator = SnippetGenerator::new();
//! generator.add_match("fox").unwrap();
//! generator
//!     .accept_text("The quick brown fox jumps over the lazy dog")
//!     .unwrap();
//! assert_eq!(
//!     generator.snippets(),
//!     "The quick brown <b>fox</b> jumps over the lazy dog"
//! );
//! ```

use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::cjk::CjkMode;
use crate::error::Result;
use crate::normalize::{Stemmer, TermNormalizer};
use crate::tokenizer::{TokenEvent, WordTokenizer};

mod state;

use state::SnippetState;

/// Default amount added to the term position between document fields.
pub const DEFAULT_TERMPOS_DELTA: u32 = 100;

/// Configuration for snippet generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetConfig {
    /// String inserted before each highlighted term.
    pub pre_match: String,
    /// String inserted after each highlighted term.
    pub post_match: String,
    /// Separator between snippets taken from the same text.
    pub inter_snippet: String,
    /// Words of context kept on each side of a match.
    pub context_length: usize,
    /// How CJK runs are decomposed.
    pub cjk_mode: CjkMode,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        SnippetConfig {
            pre_match: "<b>".to_string(),
            post_match: "</b>".to_string(),
            inter_snippet: "...".to_string(),
            context_length: 5,
            cjk_mode: CjkMode::from_env(),
        }
    }
}

impl SnippetConfig {
    /// Create a new configuration with default values.
    ///
    /// The CJK mode defaults to the process-wide environment snapshot; set
    /// it explicitly to decouple behavior from the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the string inserted before each highlighted term.
    pub fn pre_match<S: Into<String>>(mut self, pre_match: S) -> Self {
        self.pre_match = pre_match.into();
        self
    }

    /// Set the string inserted after each highlighted term.
    pub fn post_match<S: Into<String>>(mut self, post_match: S) -> Self {
        self.post_match = post_match.into();
        self
    }

    /// Set the separator between snippets.
    pub fn inter_snippet<S: Into<String>>(mut self, inter_snippet: S) -> Self {
        self.inter_snippet = inter_snippet.into();
        self
    }

    /// Set the number of context words on each side of a match.
    pub fn context_length(mut self, context_length: usize) -> Self {
        self.context_length = context_length;
        self
    }

    /// Set the CJK decomposition mode.
    pub fn cjk_mode(mut self, cjk_mode: CjkMode) -> Self {
        self.cjk_mode = cjk_mode;
        self
    }
}

/// Parses a piece of text and generates snippets.
///
/// Text is fed through [`accept_text`](SnippetGenerator::accept_text) (once
/// per field of a document, with
/// [`increase_termpos`](SnippetGenerator::increase_termpos) in between so
/// context never bridges fields) and the highlighted excerpt is read back
/// with [`snippets`](SnippetGenerator::snippets). When several regions of
/// the text contain matches, the regions covering the largest number of
/// distinct query terms are kept.
pub struct SnippetGenerator {
    config: SnippetConfig,
    stemmer: Option<Box<dyn Stemmer>>,
    normalizer: Option<Box<dyn TermNormalizer>>,
    matches: AHashSet<String>,
    termpos: u32,
    state: SnippetState,
}

impl Default for SnippetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SnippetGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnippetGenerator")
            .field("config", &self.config)
            .field("stemmer", &self.stemmer.as_ref().map(|s| s.name()))
            .field("normalizer", &self.normalizer.as_ref().map(|n| n.name()))
            .field("matches", &self.matches.len())
            .field("termpos", &self.termpos)
            .finish()
    }
}

impl SnippetGenerator {
    /// Create a generator with the default configuration.
    pub fn new() -> SnippetGenerator {
        Self::with_config(SnippetConfig::default())
    }

    /// Create a generator with the given configuration.
    pub fn with_config(config: SnippetConfig) -> SnippetGenerator {
        SnippetGenerator {
            config,
            stemmer: None,
            normalizer: None,
            matches: AHashSet::new(),
            termpos: 0,
            state: SnippetState::new(),
        }
    }

    /// Set the stemmer used when normalizing terms.
    pub fn set_stemmer(&mut self, stemmer: Box<dyn Stemmer>) {
        self.stemmer = Some(stemmer);
    }

    /// Set the normalizer applied to terms before lowercasing.
    pub fn set_normalizer(&mut self, normalizer: Box<dyn TermNormalizer>) {
        self.normalizer = Some(normalizer);
    }

    /// The string inserted before each highlighted term.
    pub fn pre_match(&self) -> &str {
        &self.config.pre_match
    }

    /// Set the string inserted before each highlighted term.
    pub fn set_pre_match<S: Into<String>>(&mut self, text: S) {
        self.config.pre_match = text.into();
    }

    /// The string inserted after each highlighted term.
    pub fn post_match(&self) -> &str {
        &self.config.post_match
    }

    /// Set the string inserted after each highlighted term.
    pub fn set_post_match<S: Into<String>>(&mut self, text: S) {
        self.config.post_match = text.into();
    }

    /// The separator between snippets.
    pub fn inter_snippet(&self) -> &str {
        &self.config.inter_snippet
    }

    /// Set the separator between snippets.
    pub fn set_inter_snippet<S: Into<String>>(&mut self, text: S) {
        self.config.inter_snippet = text.into();
    }

    /// The number of context words kept on each side of a match.
    pub fn context_length(&self) -> usize {
        self.config.context_length
    }

    /// Set the number of context words kept on each side of a match.
    pub fn set_context_length(&mut self, length: usize) {
        self.config.context_length = length;
    }

    /// The current term position.
    pub fn termpos(&self) -> u32 {
        self.termpos
    }

    /// Set the current term position.
    pub fn set_termpos(&mut self, termpos: u32) {
        self.termpos = termpos;
    }

    /// Advance the term position by [`DEFAULT_TERMPOS_DELTA`].
    ///
    /// Call between fields of a document (e.g. between title and body) so
    /// that no snippet context spans the boundary.
    pub fn increase_termpos(&mut self) {
        self.increase_termpos_by(DEFAULT_TERMPOS_DELTA);
    }

    /// Advance the term position by `delta`.
    pub fn increase_termpos_by(&mut self, delta: u32) {
        self.termpos = self.termpos.saturating_add(delta);
    }

    /// Add a match term to be highlighted.
    ///
    /// The input is parsed with the same word rules as the text (so dotted
    /// acronyms and forms like `AT&T` survive as entered) and each resulting
    /// term is normalized and added to the match set. Matching is case
    /// insensitive; the original case of the text is preserved in the
    /// output.
    pub fn add_match(&mut self, text: &str) -> Result<()> {
        let tokenizer = WordTokenizer::new(CjkMode::Disabled);
        for event in tokenizer.tokenize(text)? {
            if let TokenEvent::Term { text, .. } = event {
                let stem = self.normalize(&text);
                self.matches.insert(stem);
            }
        }
        Ok(())
    }

    /// Accept some text.
    ///
    /// May be called repeatedly to append further fields of one document.
    pub fn accept_text(&mut self, text: &str) -> Result<()> {
        let tokenizer = WordTokenizer::new(self.config.cjk_mode);
        for event in tokenizer.tokenize(text)? {
            match event {
                TokenEvent::Term { text, ngram_len } => {
                    let stem = self.normalize(&text);
                    let is_match = self.matches.contains(&stem);
                    self.termpos += 1;
                    self.state
                        .accept_term(&text, self.termpos, ngram_len, is_match, &self.config);
                }
                TokenEvent::Nonword { ch } => {
                    self.state.accept_nonword_char(ch, self.termpos, &self.config);
                }
            }
        }
        Ok(())
    }

    /// Accept bytes that are expected to be UTF-8.
    ///
    /// Malformed sequences become replacement characters, which are treated
    /// as ordinary non-word characters; tokenization continues past them.
    pub fn accept_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.accept_text(&text)
    }

    /// Finalize the snippet under construction and return the concatenated
    /// best snippets.
    ///
    /// Returns the empty string when no accepted text contained a match.
    pub fn snippets(&mut self) -> String {
        self.state.snippets_string()
    }

    /// Reset the running state for another document.
    ///
    /// Configuration, stemmer, normalizer and the match set are preserved;
    /// the normalizer's own [`reset`](TermNormalizer::reset) hook is
    /// invoked.
    pub fn reset(&mut self) {
        self.state.reset();
        self.termpos = 0;
        if let Some(normalizer) = self.normalizer.as_mut() {
            normalizer.reset();
        }
    }

    /// Normalize a term: user normalizer, then lowercase, then stemmer.
    fn normalize(&mut self, term: &str) -> String {
        let mapped = match self.normalizer.as_mut() {
            Some(normalizer) => normalizer.normalize(term),
            None => term.to_string(),
        };
        let lowered = mapped.to_lowercase();
        match self.stemmer.as_ref() {
            Some(stemmer) => stemmer.stem(&lowered),
            None => lowered,
        }
    }
}
