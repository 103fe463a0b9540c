//! MinHash signatures over shingle sets.
//!
//! Hash function `i` is xxHash32 of the shingle's UTF-8 bytes seeded with
//! `seed + i`. Each slot keeps the minimum over the whole set, so the
//! probability that two documents agree on a slot equals the Jaccard
//! similarity of their shingle sets.
//!
//! Real hash outputs are 32-bit and stored widened to `u64`. The "no
//! shingle" sentinel is `u64::MAX`, which no real output can equal, so two
//! empty documents never match on a slot by accident of hashing.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh32::xxh32;

use crate::shingles::ShingleSet;

/// Fixed-length MinHash signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(Vec<u64>);

impl Signature {
    /// Slot value meaning "no shingle was ever hashed into this slot".
    pub const NO_SHINGLE: u64 = u64::MAX;

    /// A signature with every slot at [`Signature::NO_SHINGLE`].
    pub fn unseen(num_hashes: usize) -> Self {
        Self(vec![Self::NO_SHINGLE; num_hashes])
    }

    /// Wrap raw slot values.
    pub fn from_slots(slots: Vec<u64>) -> Self {
        Self(slots)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn slots(&self) -> &[u64] {
        &self.0
    }

    /// True when every slot is the sentinel, i.e. the document had no
    /// shingles.
    pub fn is_unseen(&self) -> bool {
        self.0.iter().all(|&slot| slot == Self::NO_SHINGLE)
    }

    pub fn into_slots(self) -> Vec<u64> {
        self.0
    }
}

/// Compute a MinHash signature of `num_hashes` slots with the default seed
/// (hash function `i` is seeded with `i`).
pub fn compute_minhash(shingles: &ShingleSet, num_hashes: usize) -> Signature {
    compute_minhash_with(shingles, num_hashes, 0, false)
}

/// Compute a MinHash signature (parallel over slots if `use_parallel`).
///
/// The result does not depend on set iteration order or on `use_parallel`.
pub fn compute_minhash_with(
    shingles: &ShingleSet,
    num_hashes: usize,
    seed: u32,
    use_parallel: bool,
) -> Signature {
    if shingles.is_empty() {
        return Signature::unseen(num_hashes);
    }

    if use_parallel {
        // Hash each shingle's bytes once per slot; the slot loop is the
        // parallel axis so workers never share a minimum.
        let bytes: Vec<&[u8]> = shingles.iter().map(|s| s.as_bytes()).collect();
        let mut slots = Vec::with_capacity(num_hashes);
        (0..num_hashes)
            .into_par_iter()
            .map(|i| slot_min(&bytes, slot_seed(seed, i)))
            .collect_into_vec(&mut slots);
        return Signature(slots);
    }

    let mut slots = vec![Signature::NO_SHINGLE; num_hashes];
    for shingle in shingles {
        let bytes = shingle.as_bytes();
        for (i, slot) in slots.iter_mut().enumerate() {
            let h = slot_hash(bytes, slot_seed(seed, i));
            if h < *slot {
                *slot = h;
            }
        }
    }
    Signature(slots)
}

/// Minimum over all shingles for one slot.
#[inline]
fn slot_min(shingles: &[&[u8]], seed: u32) -> u64 {
    let mut minv = Signature::NO_SHINGLE;
    for bytes in shingles {
        let h = slot_hash(bytes, seed);
        if h < minv {
            minv = h;
        }
    }
    minv
}

/// Seed for hash function `i`. Slot counts are validated to fit in `u32`.
#[inline]
pub(crate) fn slot_seed(seed: u32, i: usize) -> u32 {
    seed.wrapping_add(i as u32)
}

#[inline]
pub(crate) fn slot_hash(bytes: &[u8], seed: u32) -> u64 {
    u64::from(xxh32(bytes, seed))
}
