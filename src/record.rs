//! Per-document records and per-pair results.

use perceptual::{PerceptualFingerprint, ShingleSet, Signature};
use serde::{Deserialize, Serialize};

/// A fully processed document. Built once by the pipeline, read-only after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Stable key, unique within the corpus (e.g. a relative path).
    pub identifier: String,
    pub canonical_text: String,
    /// Version-aware SHA-256 of `canonical_text`.
    pub digest: String,
    pub fingerprint: PerceptualFingerprint,
}

impl DocumentRecord {
    pub fn shingles(&self) -> &ShingleSet {
        &self.fingerprint.shingles
    }

    pub fn signature(&self) -> &Signature {
        &self.fingerprint.signature
    }
}

/// Estimated similarity of one unordered pair of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSimilarity {
    /// Identifier that sorts first.
    pub left: String,
    pub right: String,
    /// MinHash estimate of Jaccard similarity, in `[0, 1]`.
    pub similarity: f64,
    /// Canonical texts are byte-identical.
    pub exact_duplicate: bool,
    /// Both documents were too short to shingle, so the `1.0` estimate
    /// compares two empty sets rather than real content.
    pub degenerate: bool,
    /// Exact Jaccard of the shingle sets, when requested.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exact_jaccard: Option<f64>,
}

impl PairSimilarity {
    /// Similarity as a percentage, as printed in text reports.
    pub fn percent(&self) -> f64 {
        self.similarity * 100.0
    }
}
