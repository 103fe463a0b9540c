//! # dupfind perceptual fingerprinting
//!
//! Turns canonical text into a fixed-length MinHash signature and compares
//! signatures to estimate Jaccard similarity between documents.
//!
//! ## Contract
//!
//! - Input is canonical text produced by the `canonical` crate: tokens
//!   separated by single spaces. No normalization happens here.
//! - Every function is pure: no I/O, no clocks, no process-random hashing.
//!
//! Invariant: for the same canonical text and the same [`PerceptualConfig`],
//! the signature is bit identical on every run and every machine.
//!
//! ## Core Pipeline
//!
//! 1.  **Shingling**: the token stream is cut into overlapping windows of
//!     `shingle_width` tokens; the distinct windows form the shingle set.
//!
//! 2.  **MinHashing**: each of `num_hashes` seeded xxHash32 functions is
//!     applied to every shingle and the minimum per function is kept.
//!
//! 3.  **Comparison**: the fraction of slots on which two signatures agree
//!     estimates the Jaccard similarity of the underlying shingle sets.
//!
//! ## Example Usage
//!
//! ```
//! use perceptual::{estimate_similarity, perceptualize, PerceptualConfig};
//!
//! let cfg = PerceptualConfig::default();
//! let a = perceptualize("the cat sat on the mat", &cfg).unwrap();
//! let b = perceptualize("the cat sat on the mat", &cfg).unwrap();
//!
//! assert_eq!(a.signature.len(), 100);
//! assert_eq!(estimate_similarity(&a.signature, &b.signature).unwrap(), 1.0);
//! ```

pub mod config;
pub mod fingerprint;
mod minhash;
mod shingles;
mod similarity;

pub use crate::config::{PerceptualConfig, PerceptualError};
pub use crate::fingerprint::{PerceptualFingerprint, PerceptualMeta};
pub use crate::minhash::{compute_minhash, compute_minhash_with, Signature};
pub use crate::shingles::{build_shingles, ShingleSet};
pub use crate::similarity::{estimate_similarity, exact_jaccard};

/// Current perceptual algorithm version for this crate.
pub const PERCEPTUAL_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const PERCEPTUAL_ALGORITHM: &str = "wordshingle_xxh32_minhash_v1";

/// Compute the fingerprint of canonical text (shingles → MinHash).
///
/// Fails on an invalid config or on empty text. Text with fewer tokens than
/// the shingle width succeeds with an empty shingle set and an all-sentinel
/// signature.
pub fn perceptualize(
    canonical_text: &str,
    cfg: &PerceptualConfig,
) -> Result<PerceptualFingerprint, PerceptualError> {
    cfg.validate()?;

    let shingles = build_shingles(canonical_text, cfg.shingle_width)?;
    let signature = compute_minhash_with(&shingles, cfg.num_hashes, cfg.seed, cfg.use_parallel);

    Ok(PerceptualFingerprint {
        shingles,
        signature,
        meta: PerceptualMeta {
            perceptual_version: PERCEPTUAL_VERSION,
            algorithm_name: PERCEPTUAL_ALGORITHM.to_string(),
            shingle_width: cfg.shingle_width,
            num_hashes: cfg.num_hashes,
            seed: cfg.seed,
            config_version: cfg.version,
        },
    })
}
