//! Content digests over canonical text.
//!
//! Two documents whose canonical texts are byte-identical are exact
//! duplicates regardless of what MinHash estimates for them. The corpus
//! orchestrator stores a digest per document so reports can flag those pairs
//! without comparing full texts.
//!
//! ```text
//! canonical digest = SHA-256(version.to_be_bytes() || 0x00 || canonical_text)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use canonical::hash_canonical_text;
//!
//! assert_eq!(hash_canonical_text(1, "the cat sat").len(), 64);
//!
//! // Same text, different canonical versions: different digests.
//! assert_ne!(
//!     hash_canonical_text(1, "the cat sat"),
//!     hash_canonical_text(2, "the cat sat"),
//! );
//! ```

use sha2::{Digest, Sha256};

/// Version-aware SHA-256 hex digest of canonical text.
///
/// A `0x00` byte separates the big-endian version from the text.
pub fn hash_canonical_text(canonical_version: u32, canonical_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_version.to_be_bytes());
    hasher.update([0]);
    hasher.update(canonical_text.as_bytes());
    hex::encode(hasher.finalize())
}
