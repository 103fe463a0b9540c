use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

use crate::config::{CanonicalizeConfig, Decomposition};
use crate::error::CanonicalError;
use crate::stopwords::StopWords;

/// Main entry point. Folds raw text into its canonical token stream using the
/// default [`CanonicalizeConfig`].
///
/// Empty input yields an empty string. The stop-word set is only read.
pub fn canonicalize(raw: &str, stop_words: &StopWords) -> String {
    fold_text(raw, stop_words, &CanonicalizeConfig::default())
}

/// Same as [`canonicalize`] with an explicit configuration.
///
/// Fails only when the configuration itself is invalid.
pub fn canonicalize_with_config(
    raw: &str,
    stop_words: &StopWords,
    cfg: &CanonicalizeConfig,
) -> Result<String, CanonicalError> {
    cfg.validate()?;
    Ok(fold_text(raw, stop_words, cfg))
}

fn fold_text(raw: &str, stop_words: &StopWords, cfg: &CanonicalizeConfig) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let folded = fold_chars(raw, cfg);

    // Tokens are rejoined with single spaces; stop words never reach the output.
    let mut canonical_text = String::with_capacity(folded.len());
    for token in folded.split_whitespace() {
        if stop_words.contains(token) {
            continue;
        }
        if !canonical_text.is_empty() {
            canonical_text.push(' ');
        }
        canonical_text.push_str(token);
    }
    canonical_text
}

/// Character-level half of the pipeline: decomposition, mark removal,
/// lowercasing and separator substitution. Whitespace runs are left as-is.
pub(crate) fn fold_chars(raw: &str, cfg: &CanonicalizeConfig) -> String {
    let mut out = String::with_capacity(raw.len());
    match cfg.decomposition {
        Decomposition::Canonical => push_folded(raw.nfd(), cfg, &mut out),
        Decomposition::Compatibility => push_folded(raw.nfkd(), cfg, &mut out),
    }
    out
}

fn push_folded<I>(chars: I, cfg: &CanonicalizeConfig, out: &mut String)
where
    I: Iterator<Item = char>,
{
    for ch in chars {
        if cfg.strip_diacritics && ch.is_mark() {
            continue;
        }
        // Lowercasing can expand one char into several, some of them marks
        // (U+0130 → "i\u{307}").
        if cfg.lowercase {
            for lower in ch.to_lowercase() {
                push_classified(lower, cfg, out);
            }
        } else {
            push_classified(ch, cfg, out);
        }
    }
}

fn push_classified(ch: char, cfg: &CanonicalizeConfig, out: &mut String) {
    if cfg.strip_diacritics && ch.is_mark() {
        return;
    }
    if ch.is_letter() || ch.is_number() || ch.is_whitespace() {
        out.push(ch);
    } else {
        out.push(' ');
    }
}
