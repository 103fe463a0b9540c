//! Rendering pair results for people and for tools.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::corpus::CorpusReport;
use crate::record::PairSimilarity;

/// Output format of a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// `Similarity between "a" and "b": 80.00%`, one pair per line.
    #[default]
    Text,
    /// One JSON object per pair per line.
    Json,
}

/// Write every pair at or above `min_similarity` to `out`.
///
/// Returns the number of pairs written.
pub fn write_report<W: Write>(
    report: &CorpusReport,
    format: ReportFormat,
    min_similarity: f64,
    out: &mut W,
) -> io::Result<usize> {
    let mut written = 0usize;
    for pair in report.pairs_at_least(min_similarity) {
        match format {
            ReportFormat::Text => writeln!(out, "{}", render_text(pair))?,
            ReportFormat::Json => {
                serde_json::to_writer(&mut *out, pair)?;
                writeln!(out)?;
            }
        }
        written += 1;
    }
    if format == ReportFormat::Text && !report.skipped.is_empty() {
        writeln!(out, "Skipped (empty after canonicalization): {}", report.skipped.join(", "))?;
    }
    Ok(written)
}

/// One human-readable line for a pair.
pub fn render_text(pair: &PairSimilarity) -> String {
    let mut line = format!(
        "Similarity between \"{}\" and \"{}\": {:.2}%",
        pair.left,
        pair.right,
        pair.percent()
    );
    if let Some(exact) = pair.exact_jaccard {
        line.push_str(&format!(" (exact {:.2}%)", exact * 100.0));
    }
    if pair.exact_duplicate {
        line.push_str(" [identical]");
    } else if pair.degenerate {
        line.push_str(" [both too short to compare]");
    }
    line
}
