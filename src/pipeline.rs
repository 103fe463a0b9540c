//! Per-document stages: raw text → canonical text → fingerprint.
//!
//! Each stage takes the previous stage's value by reference or by move and
//! returns a new one. Nothing here touches another document, so the corpus
//! can run these functions on any number of documents at once.

use std::time::Instant;

use canonical::{
    canonicalize_with_config, hash_canonical_text, CanonicalizeConfig, StopWords,
};
use perceptual::{perceptualize, PerceptualConfig, PerceptualError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::record::DocumentRecord;

/// What to do with a document whose canonical text is empty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDocumentPolicy {
    /// Fail the whole run with the shingling error.
    #[default]
    Abort,
    /// Drop the document, log it, and list it in the report.
    Skip,
}

/// Everything one corpus run needs. Supplied by the caller before the run and
/// never mutated during it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub canonical: CanonicalizeConfig,
    pub stop_words: StopWords,
    pub perceptual: PerceptualConfig,
    /// Process documents and pairs on the rayon pool.
    pub parallel: bool,
    pub on_empty: EmptyDocumentPolicy,
    /// Also compute exact Jaccard for every pair.
    pub report_exact: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canonical: CanonicalizeConfig::default(),
            stop_words: StopWords::new(),
            perceptual: PerceptualConfig::default(),
            parallel: true,
            on_empty: EmptyDocumentPolicy::Abort,
            report_exact: false,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_shingle_width(mut self, width: usize) -> Self {
        self.perceptual.shingle_width = width;
        self
    }

    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.perceptual.num_hashes = num_hashes;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_empty_policy(mut self, on_empty: EmptyDocumentPolicy) -> Self {
        self.on_empty = on_empty;
        self
    }

    pub fn with_report_exact(mut self, report_exact: bool) -> Self {
        self.report_exact = report_exact;
        self
    }

    /// Validate both stage configs up front so a bad config fails once,
    /// before any document is touched.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.canonical.validate()?;
        self.perceptual
            .validate()
            .map_err(|err| PipelineError::perceptual("<config>", err))
    }
}

/// Output of the canonical stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalDocument {
    pub identifier: String,
    pub canonical_text: String,
    /// Version-aware SHA-256 of `canonical_text`.
    pub digest: String,
}

/// Result of running one document through every per-document stage.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    Processed(DocumentRecord),
    Skipped { identifier: String },
}

/// Canonical stage for one document.
pub fn canonical_stage(
    identifier: &str,
    raw: &str,
    cfg: &PipelineConfig,
) -> Result<CanonicalDocument, PipelineError> {
    let canonical_text = canonicalize_with_config(raw, &cfg.stop_words, &cfg.canonical)?;
    let digest = hash_canonical_text(cfg.canonical.version, &canonical_text);
    Ok(CanonicalDocument {
        identifier: identifier.to_string(),
        canonical_text,
        digest,
    })
}

/// Shingle and signature stages for one canonical document.
pub fn fingerprint_stage(
    doc: CanonicalDocument,
    cfg: &PipelineConfig,
) -> Result<DocumentOutcome, PipelineError> {
    match perceptualize(&doc.canonical_text, &cfg.perceptual) {
        Ok(fingerprint) => Ok(DocumentOutcome::Processed(DocumentRecord {
            identifier: doc.identifier,
            canonical_text: doc.canonical_text,
            digest: doc.digest,
            fingerprint,
        })),
        Err(PerceptualError::EmptyText) if cfg.on_empty == EmptyDocumentPolicy::Skip => {
            warn!(identifier = %doc.identifier, "document_skipped_empty");
            Ok(DocumentOutcome::Skipped {
                identifier: doc.identifier,
            })
        }
        Err(err) => {
            warn!(identifier = %doc.identifier, error = %err, "fingerprint_failure");
            Err(PipelineError::perceptual(doc.identifier, err))
        }
    }
}

/// Run every per-document stage for one document.
pub fn process_document(
    identifier: &str,
    raw: &str,
    cfg: &PipelineConfig,
) -> Result<DocumentOutcome, PipelineError> {
    let start = Instant::now();
    let canonical = canonical_stage(identifier, raw, cfg)?;
    let canonical_len = canonical.canonical_text.len();
    let outcome = fingerprint_stage(canonical, cfg)?;
    if let DocumentOutcome::Processed(record) = &outcome {
        debug!(
            identifier,
            raw_len = raw.len(),
            canonical_len,
            shingles = record.shingles().len(),
            elapsed_micros = start.elapsed().as_micros() as u64,
            "document_processed"
        );
    }
    Ok(outcome)
}
