//! Stop-word sets supplied to the canonicalizer.
//!
//! Matching is exact and case-sensitive against tokens that have already
//! been folded, so lists should be written in canonical form. Lists written
//! by hand ("Und", "Für") can be folded once with
//! [`StopWords::canonicalized`]; entries that would fold into more than one
//! token are dropped there, never split.

use std::fs;
use std::path::Path;

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::CanonicalizeConfig;
use crate::error::CanonicalError;
use crate::pipeline::fold_chars;

/// An owned, immutable-by-convention set of stop words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopWords {
    words: FxHashSet<String>,
}

impl StopWords {
    /// An empty set: nothing is filtered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse newline-separated stop words. Entries are trimmed; blank lines
    /// and lines starting with `#` are ignored.
    pub fn parse(list: &str) -> Self {
        list.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    /// Read a newline-separated stop-word file. See [`StopWords::parse`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CanonicalError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| CanonicalError::StopWordsRead {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self::parse(&content))
    }

    /// Return a copy whose entries went through the same character folding
    /// as document text, plus the entries that were dropped (sorted).
    ///
    /// An entry survives only when it folds to exactly one token. `e-mail`
    /// folds to `e mail`, which no single document token can equal, so it is
    /// dropped instead of filtering `e` and `mail` on their own.
    pub fn canonicalized(&self, cfg: &CanonicalizeConfig) -> (Self, Vec<String>) {
        let mut kept = Self::new();
        let mut dropped = Vec::new();
        for word in &self.words {
            let folded = fold_chars(word, cfg);
            let mut tokens = folded.split_whitespace();
            match (tokens.next(), tokens.next()) {
                (Some(token), None) => {
                    kept.words.insert(token.to_owned());
                }
                _ => dropped.push(word.clone()),
            }
        }
        dropped.sort_unstable();
        (kept, dropped)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Merge another set into this one.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
