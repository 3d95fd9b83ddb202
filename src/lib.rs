//! # kireji
//!
//! Highlighted snippet generation for full-text search results.
//!
//! Given a piece of free-form Unicode text and a set of query terms, kireji
//! returns a short excerpt showing the best-matching regions with the query
//! terms marked up and a configurable amount of surrounding context. When
//! several regions match, the ones covering the most distinct query terms
//! win.
//!
//! ## Features
//!
//! - Unicode word segmentation with acronym, intra-word punctuation and
//!   technical suffix handling (`U.N.C.L.E`, `AT&T`, `1,000`, `c++`)
//! - CJK support via overlapping n-grams or rule-based word segmentation
//! - Pluggable stemmer and term normalizer (closures work directly)
//! - Original-case highlighting: the marked text is always a byte-for-byte
//!   substring of the input
//!
//! ## Example
//!
//! ```
//! use kireji::{SnippetConfig, SnippetGenerator};
//!
//! let config = SnippetConfig::new().context_length(2);
//! let mut generator = SnippetGenerator::with_config(config);
//! generator.add_match("rust").unwrap();
//! generator
//!     .accept_text("Programs written in Rust avoid whole classes of bugs")
//!     .unwrap();
//! assert_eq!(
//!     generator.snippets(),
//!     "written in <b>Rust</b> avoid whole"
//! );
//! ```

pub mod cjk;
pub mod error;
pub mod normalize;
pub mod snippet;
pub mod tokenizer;
pub mod unicode;

pub use cjk::CjkMode;
pub use error::{KirejiError, Result};
pub use normalize::{IdentityStemmer, Stemmer, TermNormalizer};
pub use snippet::{SnippetConfig, SnippetGenerator};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
