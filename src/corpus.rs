//! The corpus orchestrator.
//!
//! A [`Corpus`] owns the raw texts of one run, keyed by identifier. Running
//! it drives every document through the per-document stages independently,
//! then compares every unordered pair of processed documents exactly once.
//! Nothing is global: two corpora never share state.

use std::collections::BTreeMap;
use std::time::Instant;

use perceptual::exact_jaccard;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, info_span};

use crate::error::PipelineError;
use crate::pipeline::{process_document, DocumentOutcome, PipelineConfig};
use crate::record::{DocumentRecord, PairSimilarity};

/// Raw documents of one run, iterated in identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: BTreeMap<String, String>,
}

/// Records that made it through the per-document stages, plus the
/// identifiers dropped under [`EmptyDocumentPolicy::Skip`](crate::EmptyDocumentPolicy::Skip).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedCorpus {
    pub records: Vec<DocumentRecord>,
    pub skipped: Vec<String>,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusReport {
    /// Processed documents, sorted by identifier. Read-only after the run.
    pub records: Vec<DocumentRecord>,
    /// One entry per unordered pair of records, `left < right`.
    pub pairs: Vec<PairSimilarity>,
    pub skipped: Vec<String>,
}

impl CorpusReport {
    /// Pairs at or above `threshold`, in report order.
    pub fn pairs_at_least(&self, threshold: f64) -> impl Iterator<Item = &PairSimilarity> {
        self.pairs.iter().filter(move |p| p.similarity >= threshold)
    }

    pub fn record(&self, identifier: &str) -> Option<&DocumentRecord> {
        self.records
            .binary_search_by(|r| r.identifier.as_str().cmp(identifier))
            .ok()
            .map(|idx| &self.records[idx])
    }
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from `(identifier, text)` pairs, rejecting repeats.
    pub fn from_documents<I, K, V>(documents: I) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut corpus = Self::new();
        for (identifier, text) in documents {
            corpus.insert(identifier, text)?;
        }
        Ok(corpus)
    }

    /// Add a document. Identifiers must be unique within the corpus.
    pub fn insert(
        &mut self,
        identifier: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), PipelineError> {
        let identifier = identifier.into();
        if self.documents.contains_key(&identifier) {
            return Err(PipelineError::DuplicateIdentifier(identifier));
        }
        self.documents.insert(identifier, text.into());
        Ok(())
    }

    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.documents.get(identifier).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Identifiers in sorted order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Canonicalize, shingle and sign every document.
    ///
    /// Documents are independent; with `cfg.parallel` each one is a separate
    /// rayon task. The first failing document (in identifier order) fails
    /// the call.
    pub fn process(&self, cfg: &PipelineConfig) -> Result<ProcessedCorpus, PipelineError> {
        cfg.validate()?;

        let entries: Vec<(&String, &String)> = self.documents.iter().collect();
        let outcomes: Vec<Result<DocumentOutcome, PipelineError>> = if cfg.parallel {
            entries
                .par_iter()
                .map(|(id, raw)| process_document(id, raw, cfg))
                .collect()
        } else {
            entries
                .iter()
                .map(|(id, raw)| process_document(id, raw, cfg))
                .collect()
        };

        let mut records = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome? {
                DocumentOutcome::Processed(record) => records.push(record),
                DocumentOutcome::Skipped { identifier } => skipped.push(identifier),
            }
        }
        Ok(ProcessedCorpus { records, skipped })
    }

    /// Process every document, then compare all pairs.
    pub fn run(&self, cfg: &PipelineConfig) -> Result<CorpusReport, PipelineError> {
        let span = info_span!("corpus.run", documents = self.len(), parallel = cfg.parallel);
        let _guard = span.enter();
        let start = Instant::now();

        let ProcessedCorpus { records, skipped } = self.process(cfg)?;
        let pairs = compare_all(&records, cfg.parallel, cfg.report_exact)?;

        info!(
            records = records.len(),
            skipped = skipped.len(),
            pairs = pairs.len(),
            shingle_width = cfg.perceptual.shingle_width,
            num_hashes = cfg.perceptual.num_hashes,
            elapsed_micros = start.elapsed().as_micros() as u64,
            "corpus_run_complete"
        );

        Ok(CorpusReport {
            records,
            pairs,
            skipped,
        })
    }
}

/// Compare every unordered pair `(i, j)`, `i < j`, exactly once.
///
/// For `M` records this yields `M × (M − 1) / 2` results in row-major order
/// over the input slice, whether or not `parallel` is set.
pub fn compare_all(
    records: &[DocumentRecord],
    parallel: bool,
    report_exact: bool,
) -> Result<Vec<PairSimilarity>, PipelineError> {
    let n = records.len();
    let row = |i: usize| -> Result<Vec<PairSimilarity>, PipelineError> {
        records[i + 1..]
            .iter()
            .map(|other| compare_pair(&records[i], other, report_exact))
            .collect()
    };

    let rows: Vec<Result<Vec<PairSimilarity>, PipelineError>> = if parallel {
        (0..n).into_par_iter().map(row).collect()
    } else {
        (0..n).map(row).collect()
    };

    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for row in rows {
        pairs.extend(row?);
    }
    Ok(pairs)
}

/// Compare two processed documents.
pub fn compare_pair(
    a: &DocumentRecord,
    b: &DocumentRecord,
    report_exact: bool,
) -> Result<PairSimilarity, PipelineError> {
    let similarity = a.fingerprint.similarity(&b.fingerprint).map_err(|err| {
        PipelineError::perceptual(format!("{} <-> {}", a.identifier, b.identifier), err)
    })?;

    Ok(PairSimilarity {
        left: a.identifier.clone(),
        right: b.identifier.clone(),
        similarity,
        exact_duplicate: a.digest == b.digest,
        degenerate: a.signature().is_unseen() && b.signature().is_unseen(),
        exact_jaccard: report_exact.then(|| exact_jaccard(a.shingles(), b.shingles())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::EmptyDocumentPolicy;
    use perceptual::PerceptualError;

    fn corpus(docs: &[(&str, &str)]) -> Corpus {
        Corpus::from_documents(docs.iter().copied()).expect("unique identifiers")
    }

    #[test]
    fn duplicate_identifier_rejected() {
        let mut c = Corpus::new();
        c.insert("a.txt", "one").expect("first insert");
        assert_eq!(
            c.insert("a.txt", "two"),
            Err(PipelineError::DuplicateIdentifier("a.txt".into()))
        );
        assert_eq!(c.get("a.txt"), Some("one"));
    }

    #[test]
    fn identifiers_are_sorted() {
        let c = corpus(&[("b", "x y"), ("a", "x y"), ("c", "x y")]);
        assert_eq!(c.identifiers().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(c.len(), 3);
        assert!(!c.is_empty());
    }

    #[test]
    fn pair_count_is_m_choose_two() {
        for m in 0..7usize {
            let docs: Vec<(String, String)> = (0..m)
                .map(|i| (format!("doc{i}"), format!("word{i} shared text here")))
                .collect();
            let c = Corpus::from_documents(docs).expect("unique");
            let report = c.run(&PipelineConfig::default()).expect("run");
            assert_eq!(report.pairs.len(), m * m.saturating_sub(1) / 2);
        }
    }

    #[test]
    fn pairs_are_unique_and_never_self() {
        let c = corpus(&[("a", "one two"), ("b", "two three"), ("c", "three four"), ("d", "x y")]);
        let report = c.run(&PipelineConfig::default()).expect("run");
        let mut seen = std::collections::HashSet::new();
        for pair in &report.pairs {
            assert!(pair.left < pair.right, "{} !< {}", pair.left, pair.right);
            assert!(seen.insert((pair.left.clone(), pair.right.clone())));
        }
        let order: Vec<(&str, &str)> = report
            .pairs
            .iter()
            .map(|p| (p.left.as_str(), p.right.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a", "b"),
                ("a", "c"),
                ("a", "d"),
                ("b", "c"),
                ("b", "d"),
                ("c", "d")
            ]
        );
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let c = corpus(&[
            ("a", "the quick brown fox jumps over the lazy dog"),
            ("b", "the quick brown fox leaps over the lazy dog"),
            ("c", "completely different words in this one"),
        ]);
        let par = c.run(&PipelineConfig::default().with_parallel(true)).expect("par");
        let seq = c.run(&PipelineConfig::default().with_parallel(false)).expect("seq");
        assert_eq!(par, seq);
    }

    #[test]
    fn exact_duplicates_flagged_by_digest() {
        let c = corpus(&[("a", "Hello, World!"), ("b", "hello world"), ("c", "hello there")]);
        let report = c.run(&PipelineConfig::default()).expect("run");
        let ab = &report.pairs[0];
        assert_eq!((ab.left.as_str(), ab.right.as_str()), ("a", "b"));
        assert!(ab.exact_duplicate);
        assert_eq!(ab.similarity, 1.0);
        assert!(!report.pairs[1].exact_duplicate);
    }

    #[test]
    fn too_short_documents_are_degenerate() {
        let c = corpus(&[("a", "alpha"), ("b", "beta"), ("c", "gamma delta")]);
        let report = c.run(&PipelineConfig::default()).expect("run");
        let ab = &report.pairs[0];
        assert!(ab.degenerate);
        assert_eq!(ab.similarity, 1.0);
        let ac = &report.pairs[1];
        assert!(!ac.degenerate);
        assert_eq!(ac.similarity, 0.0);
    }

    #[test]
    fn empty_document_aborts_run() {
        let c = corpus(&[("a", "real words here"), ("b", "!!!")]);
        let err = c.run(&PipelineConfig::default()).expect_err("abort");
        assert_eq!(err.perceptual_source(), Some(&PerceptualError::EmptyText));
    }

    #[test]
    fn empty_document_skipped_when_configured() {
        let c = corpus(&[("a", "real words here"), ("b", "!!!"), ("c", "more real words")]);
        let cfg = PipelineConfig::default().with_empty_policy(EmptyDocumentPolicy::Skip);
        let report = c.run(&cfg).expect("run");
        assert_eq!(report.skipped, vec!["b".to_string()]);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.pairs.len(), 1);
        assert!(report.record("b").is_none());
        assert!(report.record("c").is_some());
    }

    #[test]
    fn exact_jaccard_only_when_requested() {
        let c = corpus(&[("a", "the cat sat on the mat"), ("b", "the cat sat on the rug")]);
        let plain = c.run(&PipelineConfig::default()).expect("run");
        assert_eq!(plain.pairs[0].exact_jaccard, None);

        let exact = c
            .run(&PipelineConfig::default().with_report_exact(true))
            .expect("run");
        let j = exact.pairs[0].exact_jaccard.expect("requested");
        assert!((j - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn compare_pair_detects_dimension_mismatch() {
        let small = corpus(&[("a", "one two three")])
            .process(&PipelineConfig::default().with_num_hashes(50))
            .expect("process");
        let large = corpus(&[("b", "one two three")])
            .process(&PipelineConfig::default().with_num_hashes(100))
            .expect("process");
        let err = compare_pair(&small.records[0], &large.records[0], false)
            .expect_err("mismatch");
        assert_eq!(
            err.perceptual_source(),
            Some(&PerceptualError::DimensionMismatch {
                left: 50,
                right: 100
            })
        );
    }

    #[test]
    fn compare_pair_rejects_records_from_different_seeds() {
        let mut seeded = PipelineConfig::default();
        seeded.perceptual.seed = 42;
        let plain = corpus(&[("a", "one two three")])
            .process(&PipelineConfig::default())
            .expect("process");
        let other = corpus(&[("b", "one two three")])
            .process(&seeded)
            .expect("process");
        let err = compare_pair(&plain.records[0], &other.records[0], false)
            .expect_err("different hash families");
        assert!(matches!(
            err.perceptual_source(),
            Some(PerceptualError::IncompatibleSettings { .. })
        ));
    }

    #[test]
    fn pairs_at_least_filters() {
        let c = corpus(&[("a", "x y z"), ("b", "x y z"), ("c", "p q r")]);
        let report = c.run(&PipelineConfig::default()).expect("run");
        let high: Vec<_> = report.pairs_at_least(0.9).collect();
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].left, "a");
        assert_eq!(high[0].right, "b");
    }
}
