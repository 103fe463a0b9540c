//! Configuration and error types for dupfind perceptual fingerprinting.
//!
//! This module defines the public configuration surface for shingling and
//! MinHash. It is free of any I/O or environment-dependent behavior so that
//! the perceptual stage is a pure function of `(canonical_text, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the shingle → MinHash stage.
///
/// All documents compared within one run must share one config; signatures
/// produced under different `num_hashes` or `seed` values are not comparable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerceptualConfig {
    /// Configuration schema version.
    ///
    /// Any algorithmic change that can affect signatures must bump this
    /// version.
    pub version: u32,
    /// Number of tokens per shingle (k-gram width).
    ///
    /// Small widths tolerate rewording, large widths are stricter about
    /// word order.
    pub shingle_width: usize,
    /// Number of independent hash functions, which is also the signature
    /// length. The estimator's standard error shrinks as `1/sqrt(n)`.
    pub num_hashes: usize,
    /// Base seed. Hash function `i` is seeded with `seed + i` (wrapping).
    pub seed: u32,
    /// Compute signature slots in parallel with rayon.
    pub use_parallel: bool,
}

impl PerceptualConfig {
    /// Create a new configuration with the defaults (width 2, 100 hashes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shingle width.
    pub fn with_shingle_width(mut self, shingle_width: usize) -> Self {
        self.shingle_width = shingle_width;
        self
    }

    /// Set the number of hash functions.
    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    /// Set the base seed for reproducible, run-specific hash families.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable parallel slot computation.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.version < 1 {
            return Err(PerceptualError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.shingle_width < 1 {
            return Err(PerceptualError::InvalidShingleWidth {
                width: self.shingle_width,
            });
        }
        // Slot seeds are 32-bit, so more slots than that would reuse a seed.
        if self.num_hashes < 1 || self.num_hashes as u64 > u64::from(u32::MAX) {
            return Err(PerceptualError::InvalidHashCount {
                num_hashes: self.num_hashes,
            });
        }
        Ok(())
    }
}

impl Default for PerceptualConfig {
    fn default() -> Self {
        Self {
            version: 1,
            shingle_width: 2,
            num_hashes: 100,
            seed: 0,
            use_parallel: false,
        }
    }
}

/// Errors returned by the perceptual stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PerceptualError {
    #[error("invalid argument: shingle width must be >= 1 (got {width})")]
    InvalidShingleWidth { width: usize },

    #[error("invalid argument: cannot build shingles from empty canonical text")]
    EmptyText,

    #[error("invalid argument: num_hashes must be in 1..=u32::MAX (got {num_hashes})")]
    InvalidHashCount { num_hashes: usize },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid argument: cannot estimate similarity of zero-length signatures")]
    EmptySignature,

    #[error("signature dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("fingerprints built with different settings: {detail}")]
    IncompatibleSettings { detail: String },
}

impl PerceptualError {
    /// True for every variant caused by a bad argument or config, as opposed
    /// to comparing incompatible signatures.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(
            self,
            PerceptualError::DimensionMismatch { .. } | PerceptualError::IncompatibleSettings { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let cfg = PerceptualConfig::default();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.shingle_width, 2);
        assert_eq!(cfg.num_hashes, 100);
        assert_eq!(cfg.seed, 0);
        assert!(!cfg.use_parallel);
    }

    #[test]
    fn config_new_creates_default() {
        assert_eq!(PerceptualConfig::new(), PerceptualConfig::default());
    }

    #[test]
    fn config_builder_chain() {
        let cfg = PerceptualConfig::new()
            .with_shingle_width(4)
            .with_num_hashes(256)
            .with_seed(7)
            .with_parallel(true);
        assert_eq!(cfg.shingle_width, 4);
        assert_eq!(cfg.num_hashes, 256);
        assert_eq!(cfg.seed, 7);
        assert!(cfg.use_parallel);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_width() {
        let cfg = PerceptualConfig::new().with_shingle_width(0);
        assert_eq!(
            cfg.validate(),
            Err(PerceptualError::InvalidShingleWidth { width: 0 })
        );
    }

    #[test]
    fn validate_rejects_zero_hashes() {
        let cfg = PerceptualConfig::new().with_num_hashes(0);
        assert_eq!(
            cfg.validate(),
            Err(PerceptualError::InvalidHashCount { num_hashes: 0 })
        );
    }

    #[test]
    fn validate_rejects_version_zero() {
        let cfg = PerceptualConfig {
            version: 0,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(PerceptualError::InvalidConfigVersion { version: 0 })
        );
    }

    #[test]
    fn error_classification() {
        assert!(PerceptualError::EmptyText.is_invalid_argument());
        assert!(PerceptualError::InvalidShingleWidth { width: 0 }.is_invalid_argument());
        assert!(!PerceptualError::DimensionMismatch {
            left: 50,
            right: 100
        }
        .is_invalid_argument());
        assert!(!PerceptualError::IncompatibleSettings {
            detail: "seed 0 vs 1".into()
        }
        .is_invalid_argument());
    }

    #[test]
    fn config_serde_round_trip() {
        let cfg = PerceptualConfig::new().with_seed(99);
        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: PerceptualConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cfg);
    }
}
