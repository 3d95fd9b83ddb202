//! Integration tests for snippet generation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kireji::error::Result;
use kireji::{CjkMode, SnippetConfig, SnippetGenerator, TermNormalizer};

#[test]
fn test_single_match_with_context() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("fox")?;
    generator.accept_text("The quick brown fox jumps over the lazy dog")?;
    assert_eq!(
        generator.snippets(),
        "The quick brown <b>fox</b> jumps over the lazy dog"
    );
    Ok(())
}

#[test]
fn test_two_matches_in_one_snippet() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("fox")?;
    generator.add_match("dog")?;
    generator.accept_text("The quick brown fox jumps over the lazy dog")?;
    assert_eq!(
        generator.snippets(),
        "The quick brown <b>fox</b> jumps over the lazy <b>dog</b>"
    );
    Ok(())
}

#[test]
fn test_dotted_acronym_highlighted() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("U.N.C.L.E")?;
    generator.accept_text("man from U.N.C.L.E. headquarters")?;
    // The acronym keeps its dotted surface form; the terminal dot is
    // ordinary non-word text after the highlight.
    assert_eq!(
        generator.snippets(),
        "man from <b>U.N.C.L.E</b>. headquarters"
    );
    Ok(())
}

#[test]
fn test_infix_ampersand_highlighted() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("at&t")?;
    generator.accept_text("call AT&T now")?;
    assert_eq!(generator.snippets(), "call <b>AT&T</b> now");
    Ok(())
}

#[test]
fn test_cjk_ngram_match() -> Result<()> {
    let config = SnippetConfig::new().cjk_mode(CjkMode::Ngram);
    let mut generator = SnippetGenerator::with_config(config);
    generator.add_match("中国")?;
    generator.accept_text("我爱中国人")?;
    // The 2-gram is highlighted once; the overlapping 1-grams do not show
    // up separately inside the match.
    assert_eq!(generator.snippets(), "我爱<b>中国</b>人");
    Ok(())
}

#[test]
fn test_cjk_word_mode_match() -> Result<()> {
    let config = SnippetConfig::new().cjk_mode(CjkMode::Word);
    let mut generator = SnippetGenerator::with_config(config);
    generator.add_match("ゴジラ")?;
    generator.accept_text("映画ゴジラ対モスラ")?;
    let snippets = generator.snippets();
    assert!(snippets.contains("<b>ゴジラ</b>"), "got: {snippets}");
    Ok(())
}

#[test]
fn test_distant_matches_become_separate_snippets() -> Result<()> {
    let config = SnippetConfig::new().context_length(2);
    let mut generator = SnippetGenerator::with_config(config);
    generator.add_match("a")?;
    generator.add_match("b")?;
    let text = format!("a {}b", "x ".repeat(50));
    generator.accept_text(&text)?;
    assert_eq!(generator.snippets(), "<b>a</b> x x...x x <b>b</b>");
    Ok(())
}

#[test]
fn test_best_cover_wins() -> Result<()> {
    let config = SnippetConfig::new().context_length(2);
    let mut generator = SnippetGenerator::with_config(config);
    generator.add_match("cat")?;
    generator.add_match("dog")?;
    let text = format!("cat {}cat plays with dog", "z ".repeat(50));
    generator.accept_text(&text)?;
    let snippets = generator.snippets();
    // The region covering both terms replaces the cat-only snippet. It
    // opened mid-text, so it still carries its leading separator.
    assert!(snippets.starts_with("..."), "got: {snippets}");
    assert!(snippets.contains("<b>dog</b>"));
    assert_eq!(snippets.matches("<b>cat</b>").count(), 1);
    Ok(())
}

#[test]
fn test_original_case_preserved() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("fox")?;
    generator.accept_text("The FOX ran")?;
    assert_eq!(generator.snippets(), "The <b>FOX</b> ran");
    Ok(())
}

#[test]
fn test_stemmer_applies_to_both_sides() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.set_stemmer(Box::new(|word: &str| {
        word.trim_end_matches('s').to_string()
    }));
    generator.add_match("jump")?;
    generator.accept_text("he jumps high")?;
    assert_eq!(generator.snippets(), "he <b>jumps</b> high");
    Ok(())
}

#[test]
fn test_normalizer_applies_to_both_sides() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.set_normalizer(Box::new(|term: &str| term.replace('ä', "a")));
    generator.add_match("Bär")?;
    generator.accept_text("ein Bär läuft")?;
    assert_eq!(generator.snippets(), "ein <b>Bär</b> läuft");
    Ok(())
}

#[test]
fn test_context_length_bound() -> Result<()> {
    let config = SnippetConfig::new().context_length(3);
    let mut generator = SnippetGenerator::with_config(config);
    generator.add_match("needle")?;
    generator.accept_text("one two three four five six needle seven")?;
    let snippets = generator.snippets();
    let before = snippets.split("<b>").next().unwrap();
    let words_before = before.split_whitespace().count();
    assert!(words_before <= 3, "got: {snippets}");
    Ok(())
}

#[test]
fn test_fields_do_not_share_context() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("target")?;
    generator.accept_text("alpha beta gamma")?;
    generator.increase_termpos();
    generator.accept_text("delta target epsilon")?;
    let snippets = generator.snippets();
    assert!(!snippets.contains("gamma"), "got: {snippets}");
    assert_eq!(snippets, "delta <b>target</b> epsilon");
    Ok(())
}

#[test]
fn test_whitespace_collapsed_in_output() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("fox")?;
    generator.accept_text("the\t\tquick  fox \t runs")?;
    let snippets = generator.snippets();
    assert!(!snippets.contains("  "), "got: {snippets}");
    assert!(snippets.contains("<b>fox</b>"));
    Ok(())
}

#[test]
fn test_custom_markup() -> Result<()> {
    let config = SnippetConfig::new()
        .pre_match("<mark>")
        .post_match("</mark>")
        .context_length(1);
    let mut generator = SnippetGenerator::with_config(config);
    generator.add_match("fox")?;
    generator.accept_text("quick brown fox jumps")?;
    assert_eq!(generator.snippets(), "brown <mark>fox</mark> jumps");
    Ok(())
}

#[test]
fn test_reset_reproduces_output() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("fox")?;
    generator.add_match("dog")?;
    generator.accept_text("The quick brown fox jumps over the lazy dog")?;
    let first = generator.snippets();

    generator.reset();
    generator.accept_text("The quick brown fox jumps over the lazy dog")?;
    let second = generator.snippets();

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_reset_invokes_normalizer_hook() -> Result<()> {
    struct CountingNormalizer {
        resets: Arc<AtomicUsize>,
    }

    impl TermNormalizer for CountingNormalizer {
        fn normalize(&mut self, term: &str) -> String {
            term.to_string()
        }

        fn reset(&mut self) {
            self.resets.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    let resets = Arc::new(AtomicUsize::new(0));
    let mut generator = SnippetGenerator::new();
    generator.set_normalizer(Box::new(CountingNormalizer { resets: Arc::clone(&resets) }));
    generator.add_match("fox")?;
    generator.accept_text("a fox")?;
    generator.reset();
    assert_eq!(resets.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_no_matches_in_text() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("zebra")?;
    generator.accept_text("no stripes here")?;
    assert_eq!(generator.snippets(), "");
    Ok(())
}

#[test]
fn test_empty_text() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("fox")?;
    generator.accept_text("")?;
    assert_eq!(generator.snippets(), "");
    Ok(())
}

#[test]
fn test_leading_punctuation_kept_before_first_match() -> Result<()> {
    let mut generator = SnippetGenerator::new();
    generator.add_match("fox")?;
    generator.accept_text("\"fox hunting\" is contentious")?;
    assert_eq!(generator.snippets(), "\"<b>fox</b> hunting\" is contentious");
    Ok(())
}
