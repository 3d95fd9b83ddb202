//! Term normalization capabilities.
//!
//! Matching is performed on normalized term forms: an optional
//! caller-supplied [`TermNormalizer`], then Unicode lowercasing, then an
//! optional [`Stemmer`]. Both capabilities are plain string-to-string
//! contracts; absence means identity. Closures satisfy the traits directly,
//! so a stemming library can be plugged in with one line.

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> Stemmer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn stem(&self, word: &str) -> String {
        self(word)
    }
}

/// A stemmer that returns words unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityStemmer;

impl IdentityStemmer {
    pub fn new() -> IdentityStemmer {
        IdentityStemmer
    }
}

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Trait for user-defined term mapping applied before lowercasing.
///
/// A normalizer may carry internal state (e.g. a transliteration cache);
/// [`TermNormalizer::reset`] is invoked whenever the owning generator is
/// reset.
pub trait TermNormalizer: Send {
    /// Map a term to its normalized form.
    fn normalize(&mut self, term: &str) -> String;

    /// Clear any internal state.
    fn reset(&mut self) {}

    /// Get the name of this normalizer.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> TermNormalizer for F
where
    F: FnMut(&str) -> String + Send,
{
    fn normalize(&mut self, term: &str) -> String {
        self(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_stemmer() {
        let stemmer = IdentityStemmer::new();
        assert_eq!(stemmer.stem("running"), "running");
        assert_eq!(stemmer.name(), "identity");
    }

    #[test]
    fn test_closure_stemmer() {
        let stemmer: Box<dyn Stemmer> =
            Box::new(|word: &str| word.trim_end_matches('s').to_string());
        assert_eq!(stemmer.stem("foxes"), "foxe");
        assert_eq!(stemmer.name(), "custom");
    }

    #[test]
    fn test_closure_normalizer() {
        let mut normalizer: Box<dyn TermNormalizer> =
            Box::new(|term: &str| term.replace('ä', "a"));
        assert_eq!(normalizer.normalize("bär"), "bar");
        normalizer.reset();
    }
}
