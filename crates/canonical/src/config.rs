//! Configuration types for the canonical text pipeline.
//!
//! [`CanonicalizeConfig`] controls how raw text is folded into the
//! comparable token stream consumed by shingling.
//!
//! # Versioning
//!
//! The `version` field is part of every canonical digest. Any change to
//! canonicalization behavior must be accompanied by a version bump so that
//! digests produced by different behaviors never collide.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{CanonicalizeConfig, Decomposition};
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert_eq!(config.decomposition, Decomposition::Compatibility);
//! assert!(config.strip_diacritics);
//! assert!(config.lowercase);
//! ```
//!
//! Keeping diacritics (so `café` and `cafe` stay distinct):
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::new().with_strip_diacritics(false);
//! assert!(!config.strip_diacritics);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Unicode decomposition applied before diacritics are stripped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Decomposition {
    /// NFD: canonical decomposition only. `ﬁ` stays a single ligature.
    Canonical,
    /// NFKD: compatibility decomposition. Ligatures, full-width forms and
    /// similar presentation variants fold onto their plain letters.
    #[default]
    Compatibility,
}

/// Configuration for the canonical text pipeline.
///
/// Cheap to clone and serializable so it can be embedded in a larger
/// pipeline configuration file:
///
/// ```json
/// {
///   "version": 1,
///   "decomposition": "compatibility",
///   "strip_diacritics": true,
///   "lowercase": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizeConfig {
    /// Version of the canonicalization behavior. Must be >= 1; version 0 is
    /// reserved and rejected with [`CanonicalError::InvalidConfig`].
    pub version: u32,

    /// Which Unicode decomposition runs first.
    pub decomposition: Decomposition,

    /// Drop every combining mark (`\p{M}`) after decomposition, so accented
    /// and unaccented spellings of a letter canonicalize identically:
    ///
    /// ```text
    /// "Café"   → "cafe"
    /// "naïve"  → "naive"
    /// ```
    ///
    /// When disabled, marks are treated like any other non-alphanumeric
    /// character and become token separators.
    pub strip_diacritics: bool,

    /// Apply locale-free Unicode lowercasing.
    pub lowercase: bool,
}

impl CanonicalizeConfig {
    /// Create a configuration with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the behavior version.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Select the Unicode decomposition.
    pub fn with_decomposition(mut self, decomposition: Decomposition) -> Self {
        self.decomposition = decomposition;
        self
    }

    /// Enable or disable diacritic stripping.
    pub fn with_strip_diacritics(mut self, strip_diacritics: bool) -> Self {
        self.strip_diacritics = strip_diacritics;
        self
    }

    /// Enable or disable lowercasing.
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CanonicalizeConfig {
    /// Defaults: version 1, NFKD, diacritics stripped, lowercased.
    fn default() -> Self {
        Self {
            version: 1,
            decomposition: Decomposition::Compatibility,
            strip_diacritics: true,
            lowercase: true,
        }
    }
}
