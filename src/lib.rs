//! Workspace umbrella crate for dupfind, near-duplicate detection over a
//! document corpus.
//!
//! This crate stitches the `canonical` and `perceptual` stages together:
//! raw text is canonicalized, cut into word shingles, summarized as a MinHash
//! signature, and every pair of documents is scored by estimated Jaccard
//! similarity.
//!
//! ```
//! use dupfind::{Corpus, PipelineConfig};
//!
//! let corpus = Corpus::from_documents([
//!     ("a.txt", "The cat sat on the mat."),
//!     ("b.txt", "The cat sat on the mat!"),
//!     ("c.txt", "Completely different words here."),
//! ])
//! .unwrap();
//!
//! let report = corpus.run(&PipelineConfig::default()).unwrap();
//! assert_eq!(report.pairs.len(), 3);
//! assert_eq!(report.pairs[0].similarity, 1.0);
//! assert!(report.pairs[0].exact_duplicate);
//! ```

pub mod config;
pub mod corpus;
mod error;
pub mod ingest;
pub mod pipeline;
pub mod record;
pub mod report;

pub use canonical::{
    canonicalize, canonicalize_with_config, hash_canonical_text, CanonicalError,
    CanonicalizeConfig, Decomposition, StopWords,
};
pub use perceptual::{
    build_shingles, compute_minhash, compute_minhash_with, estimate_similarity, exact_jaccard,
    perceptualize, PerceptualConfig, PerceptualError, PerceptualFingerprint, PerceptualMeta,
    ShingleSet, Signature,
};

pub use crate::config::{ConfigLoadError, DupfindConfig};
pub use crate::corpus::{compare_all, compare_pair, Corpus, CorpusReport, ProcessedCorpus};
pub use crate::error::PipelineError;
pub use crate::ingest::{load_directory, IngestError, IngestOptions};
pub use crate::pipeline::{
    canonical_stage, fingerprint_stage, process_document, CanonicalDocument, DocumentOutcome,
    EmptyDocumentPolicy, PipelineConfig,
};
pub use crate::record::{DocumentRecord, PairSimilarity};
pub use crate::report::{render_text, write_report, ReportFormat};

/// Estimate the similarity of two raw texts under one configuration.
///
/// Both texts go through the full per-document pipeline; empty texts fail
/// with [`PerceptualError::EmptyText`] regardless of the empty-document
/// policy.
pub fn similarity_of(
    left: &str,
    right: &str,
    cfg: &PipelineConfig,
) -> Result<f64, PipelineError> {
    cfg.validate()?;
    let strict = cfg.clone().with_empty_policy(EmptyDocumentPolicy::Abort);
    let fingerprint = |identifier: &str, raw: &str| -> Result<DocumentRecord, PipelineError> {
        match process_document(identifier, raw, &strict)? {
            DocumentOutcome::Processed(record) => Ok(record),
            DocumentOutcome::Skipped { identifier } => {
                Err(PipelineError::perceptual(identifier, PerceptualError::EmptyText))
            }
        }
    };
    let a = fingerprint("left", left)?;
    let b = fingerprint("right", right)?;
    estimate_similarity(a.signature(), b.signature())
        .map_err(|err| PipelineError::perceptual("left <-> right", err))
}
