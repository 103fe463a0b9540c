use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dupfind::{
    load_directory, write_report, DupfindConfig, EmptyDocumentPolicy, ReportFormat,
};
use tracing_subscriber::EnvFilter;

/// Pairwise near-duplicate detection for a directory of text files
#[derive(Parser, Debug)]
#[command(name = "dupfind", author, version)]
#[command(
    about = "Estimate Jaccard similarity between every pair of documents in a directory",
    long_about = r#"
dupfind canonicalizes every document (Unicode folding, lowercasing, stop-word
removal), cuts it into word shingles, builds a MinHash signature and prints the
estimated similarity of every unordered pair.

No stop words are filtered unless given with --stop-word, --stop-words or the
config file's canonical.stop_words list.

EXAMPLES:
  dupfind ./input
  dupfind corpus/ --shingle-width 3 --num-hashes 256 --min-similarity 0.5
  dupfind corpus/ --config dupfind.yaml --format json
"#
)]
struct Cli {
    /// Directory to scan
    #[arg(default_value = "./input", value_name = "DIR")]
    dir: PathBuf,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Words per shingle
    #[arg(short = 'k', long, value_name = "N")]
    shingle_width: Option<usize>,

    /// MinHash signature length
    #[arg(short = 'n', long, value_name = "N")]
    num_hashes: Option<usize>,

    /// Stop word to drop (repeatable). The default list is empty
    #[arg(long = "stop-word", value_name = "WORD")]
    stop_words: Vec<String>,

    /// Newline-separated stop-word file
    #[arg(long = "stop-words", value_name = "FILE")]
    stop_words_file: Option<PathBuf>,

    /// Skip documents that are empty after canonicalization instead of failing
    #[arg(long)]
    skip_empty: bool,

    /// Process on the current thread only
    #[arg(long)]
    sequential: bool,

    /// Also report exact Jaccard similarity of the shingle sets
    #[arg(long)]
    exact: bool,

    /// Only print pairs at or above this similarity (0.0 to 1.0)
    #[arg(long, default_value_t = 0.0, value_name = "F")]
    min_similarity: f64,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Log filter, e.g. `info` or `dupfind=debug`. Falls back to RUST_LOG.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    // Logs go to stderr so stdout stays a clean report.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    anyhow::ensure!(
        (0.0..=1.0).contains(&cli.min_similarity),
        "--min-similarity must be within 0.0..=1.0, got {}",
        cli.min_similarity
    );

    let mut file_config = match &cli.config {
        Some(path) => DupfindConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DupfindConfig::default(),
    };
    if let Some(width) = cli.shingle_width {
        file_config.perceptual.shingle_width = width;
    }
    if let Some(num_hashes) = cli.num_hashes {
        file_config.perceptual.num_hashes = num_hashes;
    }
    if cli.stop_words_file.is_some() {
        file_config.canonical.stop_words_file = cli.stop_words_file.clone();
    }
    file_config
        .canonical
        .stop_words
        .extend(cli.stop_words.iter().cloned());

    let mut cfg = file_config
        .pipeline_config()
        .context("building pipeline configuration")?;
    if cli.skip_empty {
        cfg.on_empty = EmptyDocumentPolicy::Skip;
    }
    if cli.sequential {
        cfg.parallel = false;
        cfg.perceptual.use_parallel = false;
    }
    if cli.exact {
        cfg.report_exact = true;
    }

    let corpus = load_directory(&cli.dir, &file_config.ingest_options())?;
    if corpus.len() < 2 {
        tracing::warn!(
            dir = %cli.dir.display(),
            documents = corpus.len(),
            "fewer than two documents, nothing to compare"
        );
    }

    let report = corpus.run(&cfg)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&report, cli.format.into(), cli.min_similarity, &mut out)?;
    out.flush()?;
    Ok(())
}
