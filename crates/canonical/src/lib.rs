//! dupfind canonical text layer.
//!
//! Folds raw document text into a comparable token stream. Downstream
//! shingling and MinHash only ever see the output of this crate, so two
//! documents that differ in case, accents, punctuation or stop words end up
//! with identical shingles.
//!
//! ## What we do
//!
//! - Unicode decomposition (NFKD by default, NFD selectable)
//! - Combining-mark removal, so `Café` and `cafe` match
//! - Locale-free Unicode lowercasing
//! - Every char that is not a letter, number or whitespace becomes a space
//! - Whitespace runs collapse to single spaces, edges trimmed
//! - Stop-word filtering on the folded tokens
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence. Same text, stop words
//! and config give the same result on any machine. Canonicalization is
//! idempotent: feeding canonical text back in returns it unchanged.
//!
//! ```rust
//! use canonical::{canonicalize, StopWords};
//!
//! let stop: StopWords = ["the", "on"].into_iter().collect();
//! assert_eq!(
//!     canonicalize("The Cat, sat ON the mat!", &stop),
//!     "cat sat mat"
//! );
//! ```

mod config;
mod error;
mod hash;
mod pipeline;
mod stopwords;

pub use crate::config::{CanonicalizeConfig, Decomposition};
pub use crate::error::CanonicalError;
pub use crate::hash::hash_canonical_text;
pub use crate::pipeline::{canonicalize, canonicalize_with_config};
pub use crate::stopwords::StopWords;
