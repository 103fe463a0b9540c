//! Loading a corpus from a directory tree.
//!
//! Every regular file under the root whose extension is accepted becomes one
//! document, keyed by its path relative to the root (always `/`-separated).
//! Files that cannot be read or are not UTF-8 are logged and skipped; they
//! never fail the load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::corpus::Corpus;

/// Errors that stop a directory load outright.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("input root {path} is not a readable directory: {reason}")]
    Root { path: PathBuf, reason: String },
}

/// Which files a directory load picks up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestOptions {
    /// Accepted extensions without the dot, compared case-insensitively.
    /// Empty accepts every file.
    pub extensions: Vec<String>,
    pub follow_links: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".to_string()],
            follow_links: false,
        }
    }
}

impl IngestOptions {
    fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

/// Walk `root` and load every accepted file into a new [`Corpus`].
pub fn load_directory<P: AsRef<Path>>(
    root: P,
    options: &IngestOptions,
) -> Result<Corpus, IngestError> {
    let root = root.as_ref();
    let meta = fs::metadata(root).map_err(|err| IngestError::Root {
        path: root.to_path_buf(),
        reason: err.to_string(),
    })?;
    if !meta.is_dir() {
        return Err(IngestError::Root {
            path: root.to_path_buf(),
            reason: "not a directory".into(),
        });
    }

    let mut corpus = Corpus::new();
    let mut unreadable = 0usize;
    let walker = WalkDir::new(root)
        .follow_links(options.follow_links)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "walk_error");
                unreadable += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() || !options.accepts(entry.path()) {
            continue;
        }

        let identifier = relative_identifier(root, entry.path());
        let text = match fs::read_to_string(entry.path()) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "file_read_failure");
                unreadable += 1;
                continue;
            }
        };
        // Paths under one root are unique, so insert cannot collide.
        if let Err(err) = corpus.insert(identifier, text) {
            warn!(error = %err, "file_skipped");
        }
    }

    info!(
        root = %root.display(),
        documents = corpus.len(),
        unreadable,
        "directory_loaded"
    );
    Ok(corpus)
}

fn relative_identifier(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
