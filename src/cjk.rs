//! CJK run tokenization.
//!
//! Chinese, Japanese and Korean text carries no spaces between words, so a
//! run of CJK code points is decomposed into smaller index terms. Two
//! strategies are provided: overlapping character n-grams, and rule-based
//! word segmentation (UAX #29). Both yield the same token shape so the
//! snippet state machine can consume either.
//!
//! N-gram mode emits, at each base position, the 1-gram immediately followed
//! by the 2-gram starting there: `c₁, c₁c₂, c₂, c₂c₃, …, cₙ`. Downstream
//! code relies on this length-ascending order to detect when the base
//! position advances.
//!
//! # Examples
//!
//! ```
//! use kireji::cjk::{CjkMode, CjkTokens};
//!
//! let tokens: Vec<_> = CjkTokens::new("中国人", CjkMode::Ngram)
//!     .map(|t| t.text.to_string())
//!     .collect();
//! assert_eq!(tokens, vec!["中", "中国", "国", "国人", "人"]);
//! ```

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use log::debug;
use serde::{Deserialize, Serialize};
use unicode_segmentation::{UWordBounds, UnicodeSegmentation};

use crate::error::KirejiError;

/// Environment variable enabling CJK n-gram decomposition.
///
/// Read once per process; a non-empty value selects n-gram mode.
pub const CJK_NGRAM_ENV: &str = "KIREJI_CJK_NGRAM";

/// How runs of CJK text are decomposed into terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CjkMode {
    /// CJK code points are treated like any other word characters.
    #[default]
    Disabled,
    /// Overlapping 1-grams and 2-grams.
    Ngram,
    /// Rule-based word segmentation.
    Word,
}

impl CjkMode {
    /// The process-wide mode selected by [`CJK_NGRAM_ENV`].
    ///
    /// The variable is read on first call and the answer is cached for the
    /// lifetime of the process. Prefer setting the mode explicitly through
    /// configuration; this helper exists for deployments that toggle CJK
    /// handling from the environment.
    pub fn from_env() -> CjkMode {
        static MODE: OnceLock<CjkMode> = OnceLock::new();
        *MODE.get_or_init(|| {
            let enabled = env::var(CJK_NGRAM_ENV).map(|v| !v.is_empty()).unwrap_or(false);
            let mode = if enabled { CjkMode::Ngram } else { CjkMode::Disabled };
            debug!("cjk mode from environment: {mode:?}");
            mode
        })
    }

    /// Whether CJK runs are decomposed at all.
    pub fn is_enabled(self) -> bool {
        self != CjkMode::Disabled
    }
}

impl FromStr for CjkMode {
    type Err = KirejiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(CjkMode::Disabled),
            "ngram" => Ok(CjkMode::Ngram),
            "word" => Ok(CjkMode::Word),
            other => Err(KirejiError::invalid_argument(format!(
                "unknown cjk mode: {other:?}"
            ))),
        }
    }
}

/// A term produced from a CJK run.
///
/// `ngram_len` is the token's length in characters when it is an n-gram, or
/// 0 for a whole word from the segmenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CjkToken<'a> {
    pub text: &'a str,
    pub ngram_len: usize,
}

/// Lazy token sequence over a single CJK run.
///
/// The two decomposition strategies share this type so callers do not
/// branch on the mode themselves.
pub enum CjkTokens<'a> {
    Ngrams(CjkNgrams<'a>),
    Words(CjkWords<'a>),
}

impl<'a> CjkTokens<'a> {
    /// Tokenize `run` according to `mode`.
    ///
    /// A mode without a usable segmenter falls back to n-grams.
    pub fn new(run: &'a str, mode: CjkMode) -> CjkTokens<'a> {
        match mode {
            CjkMode::Word => CjkTokens::Words(CjkWords::new(run)),
            _ => CjkTokens::Ngrams(CjkNgrams::new(run)),
        }
    }
}

impl<'a> Iterator for CjkTokens<'a> {
    type Item = CjkToken<'a>;

    fn next(&mut self) -> Option<CjkToken<'a>> {
        match self {
            CjkTokens::Ngrams(inner) => inner.next(),
            CjkTokens::Words(inner) => inner.next(),
        }
    }
}

/// Overlapping 1-gram/2-gram iterator.
pub struct CjkNgrams<'a> {
    run: &'a str,
    base: usize,
    gram: usize,
}

impl<'a> CjkNgrams<'a> {
    pub fn new(run: &'a str) -> CjkNgrams<'a> {
        CjkNgrams { run, base: 0, gram: 1 }
    }
}

impl<'a> Iterator for CjkNgrams<'a> {
    type Item = CjkToken<'a>;

    fn next(&mut self) -> Option<CjkToken<'a>> {
        loop {
            let rest: &'a str = &self.run[self.base..];
            let mut chars = rest.char_indices();
            let (_, first) = chars.next()?;
            let first_len = first.len_utf8();
            if self.gram == 1 {
                self.gram = 2;
                return Some(CjkToken { text: &rest[..first_len], ngram_len: 1 });
            }
            self.gram = 1;
            let pair = chars.next().map(|(off, c)| &rest[..off + c.len_utf8()]);
            self.base += first_len;
            if let Some(text) = pair {
                return Some(CjkToken { text, ngram_len: 2 });
            }
            // Final base position: its 1-gram is already out, nothing to pair.
        }
    }
}

/// Word segments of a CJK run, per Unicode word boundary rules.
pub struct CjkWords<'a> {
    bounds: UWordBounds<'a>,
}

impl<'a> CjkWords<'a> {
    pub fn new(run: &'a str) -> CjkWords<'a> {
        CjkWords { bounds: run.split_word_bounds() }
    }
}

impl<'a> Iterator for CjkWords<'a> {
    type Item = CjkToken<'a>;

    fn next(&mut self) -> Option<CjkToken<'a>> {
        loop {
            let segment = self.bounds.next()?;
            // Only keep actual words, not boundary residue.
            if segment.chars().any(|c| c.is_alphanumeric()) {
                return Some(CjkToken { text: segment, ngram_len: 0 });
            }
        }
    }
}
