//! Fingerprint and metadata types for the dupfind perceptual layer.
//!
//! The metadata is part of the public contract: two fingerprints are only
//! comparable when their metadata agree on width, hash count and seed.

use serde::{Deserialize, Serialize};

use crate::config::PerceptualError;
use crate::minhash::Signature;
use crate::shingles::ShingleSet;
use crate::similarity::estimate_similarity;

/// Shingles and MinHash signature of one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerceptualFingerprint {
    /// Distinct shingles. Empty when the text had fewer tokens than the
    /// shingle width.
    pub shingles: ShingleSet,
    /// MinHash signature derived from `shingles`.
    pub signature: Signature,
    pub meta: PerceptualMeta,
}

impl PerceptualFingerprint {
    /// True when this fingerprint and `other` were produced with settings
    /// whose signatures can be compared slot by slot.
    pub fn is_comparable_with(&self, other: &PerceptualFingerprint) -> bool {
        self.meta.num_hashes == other.meta.num_hashes
            && self.meta.seed == other.meta.seed
            && self.meta.shingle_width == other.meta.shingle_width
            && self.meta.perceptual_version == other.meta.perceptual_version
    }

    /// Estimated Jaccard similarity with `other`.
    ///
    /// Signatures of different length fail with `DimensionMismatch`. Equal
    /// lengths built under a different seed, width or algorithm version fail
    /// with `IncompatibleSettings`: their slots come from different hash
    /// functions and agreeing on one means nothing.
    pub fn similarity(&self, other: &PerceptualFingerprint) -> Result<f64, PerceptualError> {
        if self.signature.len() == other.signature.len() && !self.is_comparable_with(other) {
            let (a, b) = (&self.meta, &other.meta);
            return Err(PerceptualError::IncompatibleSettings {
                detail: format!(
                    "version {}/{}, width {}/{}, seed {}/{}",
                    a.perceptual_version,
                    b.perceptual_version,
                    a.shingle_width,
                    b.shingle_width,
                    a.seed,
                    b.seed
                ),
            });
        }
        estimate_similarity(&self.signature, &other.signature)
    }
}

/// Metadata for traceability and determinism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerceptualMeta {
    /// Perceptual algorithm version, owned by this crate.
    pub perceptual_version: u16,
    /// Human-readable algorithm identifier.
    pub algorithm_name: String,
    pub shingle_width: usize,
    pub num_hashes: usize,
    pub seed: u32,
    /// Configuration schema version supplied by the caller.
    pub config_version: u32,
}
