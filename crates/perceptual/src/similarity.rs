//! Jaccard similarity: the MinHash estimate and the exact set value.

use crate::config::PerceptualError;
use crate::minhash::Signature;
use crate::shingles::ShingleSet;

/// Estimate Jaccard similarity as the fraction of slots on which the two
/// signatures agree.
///
/// Two all-sentinel signatures (both documents too short to shingle) agree
/// everywhere and estimate `1.0`. That case is reported as-is; callers that
/// care can check [`Signature::is_unseen`].
pub fn estimate_similarity(a: &Signature, b: &Signature) -> Result<f64, PerceptualError> {
    if a.len() != b.len() {
        return Err(PerceptualError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Err(PerceptualError::EmptySignature);
    }

    let identical = a
        .slots()
        .iter()
        .zip(b.slots())
        .filter(|(x, y)| x == y)
        .count();
    Ok(identical as f64 / a.len() as f64)
}

impl Signature {
    /// Method form of [`estimate_similarity`].
    pub fn similarity(&self, other: &Signature) -> Result<f64, PerceptualError> {
        estimate_similarity(self, other)
    }
}

/// Exact Jaccard similarity `|A ∩ B| / |A ∪ B|` of two shingle sets.
/// Two empty sets give `0.0`.
pub fn exact_jaccard(a: &ShingleSet, b: &ShingleSet) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|s| large.contains(*s)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
