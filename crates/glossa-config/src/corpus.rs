use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("output.xml")
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CorpusConfig {
    /// Bilingual XML corpus
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self { path: default_path() }
    }
}

/// Matching policy applied before a result reaches the popup
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MatchingConfig {
    /// Matches scoring below this are treated as no match. Unset shows every best guess.
    #[serde(default)]
    pub min_similarity: Option<f32>,
}
