//! YAML configuration file support for dupfind.
//!
//! One file describes every stage of a run: how text is canonicalized, how
//! signatures are built and how the corpus is loaded and compared. Every
//! section is optional and falls back to the defaults below.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1"
//!
//! canonical:
//!   version: 1
//!   decomposition: compatibility
//!   lowercase: true
//!   strip_diacritics: true
//!   stop_words: ["и", "на", "в", "с"]
//!   stop_words_file: null
//!
//! perceptual:
//!   version: 1
//!   shingle_width: 2
//!   num_hashes: 100
//!   seed: 0
//!   use_parallel: false
//!
//! corpus:
//!   extensions: ["txt"]
//!   follow_links: false
//!   parallel: true
//!   on_empty: abort
//!   report_exact: false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use canonical::{CanonicalError, CanonicalizeConfig, Decomposition, StopWords};
use perceptual::PerceptualConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::ingest::IngestOptions;
use crate::pipeline::{EmptyDocumentPolicy, PipelineConfig};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("failed to load stop words: {0}")]
    StopWords(#[from] CanonicalError),
}

/// Top-level YAML configuration for a dupfind run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DupfindConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub perceptual: PerceptualYamlConfig,

    #[serde(default)]
    pub corpus: CorpusYamlConfig,
}

impl DupfindConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: DupfindConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical.validate()?;
        self.perceptual.validate()?;
        self.corpus.validate()?;
        Ok(())
    }

    /// Build the runtime pipeline configuration.
    ///
    /// Inline stop words and the stop-word file are merged, then folded with
    /// the same canonical settings as document text. Entries that fold into
    /// several tokens (`e-mail`) or none (`!!!`) can never match a token;
    /// they are dropped with a warning.
    pub fn pipeline_config(&self) -> Result<PipelineConfig, ConfigLoadError> {
        let canonical = self.canonical.to_config();
        let mut stop_words: StopWords = self.canonical.stop_words.iter().cloned().collect();
        if let Some(path) = &self.canonical.stop_words_file {
            let from_file = StopWords::from_file(path)?;
            stop_words.extend(from_file.iter().map(str::to_owned));
        }
        let (stop_words, dropped) = stop_words.canonicalized(&canonical);
        if !dropped.is_empty() {
            warn!(
                entries = ?dropped,
                "stop_words_dropped: entries do not fold to a single token"
            );
        }

        Ok(PipelineConfig {
            canonical,
            stop_words,
            perceptual: self.perceptual.to_config(),
            parallel: self.corpus.parallel,
            on_empty: self.corpus.on_empty,
            report_exact: self.corpus.report_exact,
        })
    }

    /// Directory loading options from the `corpus` section.
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            extensions: self.corpus.extensions.clone(),
            follow_links: self.corpus.follow_links,
        }
    }
}

impl Default for DupfindConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            canonical: CanonicalYamlConfig::default(),
            perceptual: PerceptualYamlConfig::default(),
            corpus: CorpusYamlConfig::default(),
        }
    }
}

/// Canonicalization stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub decomposition: Decomposition,

    #[serde(default = "true_value")]
    pub lowercase: bool,

    #[serde(default = "true_value")]
    pub strip_diacritics: bool,

    #[serde(default)]
    pub stop_words: Vec<String>,

    /// Newline-separated stop-word list, merged with `stop_words`.
    #[serde(default)]
    pub stop_words_file: Option<PathBuf>,
}

impl CanonicalYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "canonical.version must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    fn to_config(&self) -> CanonicalizeConfig {
        CanonicalizeConfig::new()
            .with_version(self.version)
            .with_decomposition(self.decomposition)
            .with_lowercase(self.lowercase)
            .with_strip_diacritics(self.strip_diacritics)
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            decomposition: Decomposition::default(),
            lowercase: true,
            strip_diacritics: true,
            stop_words: Vec::new(),
            stop_words_file: None,
        }
    }
}

/// Shingling and MinHash YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerceptualYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_shingle_width")]
    pub shingle_width: usize,

    #[serde(default = "default_num_hashes")]
    pub num_hashes: usize,

    #[serde(default)]
    pub seed: u32,

    #[serde(default)]
    pub use_parallel: bool,
}

impl PerceptualYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "perceptual.version must be >= 1".to_string(),
            ));
        }
        if self.shingle_width == 0 {
            return Err(ConfigLoadError::Validation(
                "perceptual.shingle_width must be >= 1".to_string(),
            ));
        }
        if self.num_hashes == 0 {
            return Err(ConfigLoadError::Validation(
                "perceptual.num_hashes must be >= 1".to_string(),
            ));
        }
        self.to_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("perceptual: {err}")))
    }

    fn to_config(&self) -> PerceptualConfig {
        PerceptualConfig {
            version: self.version,
            shingle_width: self.shingle_width,
            num_hashes: self.num_hashes,
            seed: self.seed,
            use_parallel: self.use_parallel,
        }
    }
}

impl Default for PerceptualYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            shingle_width: default_shingle_width(),
            num_hashes: default_num_hashes(),
            seed: 0,
            use_parallel: false,
        }
    }
}

/// Corpus loading and comparison YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusYamlConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub follow_links: bool,

    #[serde(default = "true_value")]
    pub parallel: bool,

    #[serde(default)]
    pub on_empty: EmptyDocumentPolicy,

    #[serde(default)]
    pub report_exact: bool,
}

impl CorpusYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if let Some(bad) = self
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigLoadError::Validation(format!(
                "corpus.extensions entries must be non-empty and written without a dot, got {bad:?}"
            )));
        }
        Ok(())
    }
}

impl Default for CorpusYamlConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            follow_links: false,
            parallel: true,
            on_empty: EmptyDocumentPolicy::Abort,
            report_exact: false,
        }
    }
}

fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_shingle_width() -> usize {
    2
}
fn default_num_hashes() -> usize {
    100
}
fn default_extensions() -> Vec<String> {
    vec!["txt".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1"
canonical:
  decomposition: canonical
  stop_words: ["и", "на"]
perceptual:
  shingle_width: 3
"#;

        let config = DupfindConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.canonical.decomposition, Decomposition::Canonical);
        assert_eq!(config.canonical.stop_words, vec!["и", "на"]);
        assert_eq!(config.perceptual.shingle_width, 3);
        assert_eq!(config.perceptual.num_hashes, 100);
        assert!(config.corpus.parallel);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = DupfindConfig::from_yaml("version: \"1.0\"\n").unwrap();
        assert_eq!(config, DupfindConfig::default_with_version("1.0"));
    }

    #[test]
    fn test_unsupported_version() {
        let err = DupfindConfig::from_yaml("version: \"2\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2"));
    }

    #[test]
    fn test_perceptual_validation() {
        let yaml = r#"
version: "1"
perceptual:
  shingle_width: 0
"#;
        let result = DupfindConfig::from_yaml(yaml);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("shingle_width must be >= 1"));

        let yaml = r#"
version: "1"
perceptual:
  num_hashes: 0
"#;
        assert!(DupfindConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_extension_validation() {
        let yaml = r#"
version: "1"
corpus:
  extensions: [".txt"]
"#;
        assert!(matches!(
            DupfindConfig::from_yaml(yaml),
            Err(ConfigLoadError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let yaml = r#"
version: "1"
corpus:
  on_empty: explode
"#;
        assert!(matches!(
            DupfindConfig::from_yaml(yaml),
            Err(ConfigLoadError::YamlParse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
corpus:
  on_empty: skip
  report_exact: true
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = DupfindConfig::from_file(temp_file.path()).unwrap();
        let pipeline = config.pipeline_config().unwrap();
        assert_eq!(pipeline.on_empty, EmptyDocumentPolicy::Skip);
        assert!(pipeline.report_exact);
    }

    #[test]
    fn test_pipeline_config_folds_and_merges_stop_words() {
        let mut list = NamedTempFile::new().unwrap();
        writeln!(list, "# articles").unwrap();
        writeln!(list, "The").unwrap();
        let yaml = format!(
            "version: \"1\"\ncanonical:\n  stop_words: [\"На\"]\n  stop_words_file: {:?}\n",
            list.path().display().to_string()
        );

        let config = DupfindConfig::from_yaml(&yaml).unwrap();
        let pipeline = config.pipeline_config().unwrap();
        assert_eq!(pipeline.stop_words.len(), 2);
        assert!(pipeline.stop_words.contains("на"));
        assert!(pipeline.stop_words.contains("the"));
    }

    #[test]
    fn test_multi_token_stop_words_filter_nothing() {
        let yaml = r#"
version: "1"
canonical:
  stop_words: ["e-mail", "Via"]
"#;
        let pipeline = DupfindConfig::from_yaml(yaml)
            .unwrap()
            .pipeline_config()
            .unwrap();
        assert_eq!(pipeline.stop_words.len(), 1);
        assert!(!pipeline.stop_words.contains("e"));
        assert!(!pipeline.stop_words.contains("mail"));
        assert_eq!(
            canonical::canonicalize("send mail to e via post", &pipeline.stop_words),
            "send mail to e post"
        );
    }

    #[test]
    fn test_default_stop_word_list_is_empty() {
        let pipeline = DupfindConfig::default().pipeline_config().unwrap();
        assert!(pipeline.stop_words.is_empty());
    }

    #[test]
    fn test_missing_stop_words_file() {
        let mut config = DupfindConfig::default();
        config.canonical.stop_words_file = Some(PathBuf::from("/no/such/stopwords.txt"));
        assert!(matches!(
            config.pipeline_config(),
            Err(ConfigLoadError::StopWords(_))
        ));
    }

    #[test]
    fn test_ingest_options() {
        let yaml = r#"
version: "1"
corpus:
  extensions: ["txt", "md"]
  follow_links: true
"#;
        let opts = DupfindConfig::from_yaml(yaml).unwrap().ingest_options();
        assert_eq!(opts.extensions, vec!["txt", "md"]);
        assert!(opts.follow_links);
    }

    impl DupfindConfig {
        fn default_with_version(version: &str) -> Self {
            Self {
                version: version.to_string(),
                ..Self::default()
            }
        }
    }
}
