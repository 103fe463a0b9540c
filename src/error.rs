use std::error::Error;
use std::fmt;

use canonical::CanonicalError;
use perceptual::PerceptualError;

/// Errors that can occur while running documents through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The canonical stage rejected its configuration.
    Canonical(CanonicalError),
    /// Shingling, MinHash or comparison failed for a document or pair.
    Perceptual {
        identifier: String,
        source: PerceptualError,
    },
    /// An identifier was inserted into a corpus twice.
    DuplicateIdentifier(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Canonical(err) => write!(f, "canonicalization failure: {err}"),
            PipelineError::Perceptual { identifier, source } => {
                write!(f, "fingerprinting failed for \"{identifier}\": {source}")
            }
            PipelineError::DuplicateIdentifier(id) => {
                write!(f, "document identifier \"{id}\" already present in corpus")
            }
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Canonical(err) => Some(err),
            PipelineError::Perceptual { source, .. } => Some(source),
            PipelineError::DuplicateIdentifier(_) => None,
        }
    }
}

impl From<CanonicalError> for PipelineError {
    fn from(value: CanonicalError) -> Self {
        PipelineError::Canonical(value)
    }
}

impl PipelineError {
    pub(crate) fn perceptual(identifier: impl Into<String>, source: PerceptualError) -> Self {
        PipelineError::Perceptual {
            identifier: identifier.into(),
            source,
        }
    }

    /// The perceptual error underneath, if any.
    pub fn perceptual_source(&self) -> Option<&PerceptualError> {
        match self {
            PipelineError::Perceptual { source, .. } => Some(source),
            _ => None,
        }
    }
}
