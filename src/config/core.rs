use serde::{Deserialize, Serialize};

use crate::pipeline::IndexRequest;
use crate::split::SplitConfig;

/// Root configuration structure for socindex
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SocindexConfig {
    /// Which columns feed the index
    #[serde(default)]
    pub index: Option<IndexSection>,

    /// Train/test partition parameters
    #[serde(default)]
    pub split: Option<SplitConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

/// `[index]` table
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IndexSection {
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub id_column: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl SocindexConfig {
    pub fn split_config(&self) -> SplitConfig {
        self.split.unwrap_or_default()
    }

    /// Build an index request, preferring explicit values over configured ones.
    ///
    /// Returns `None` when neither source names features and a reference.
    pub fn index_request(
        &self,
        features: Option<Vec<String>>,
        reference: Option<String>,
        id_column: Option<String>,
    ) -> Option<IndexRequest> {
        let section = self.index.clone().unwrap_or_default();
        let features = features
            .filter(|f| !f.is_empty())
            .unwrap_or(section.features);
        let reference = reference.or(section.reference)?;
        if features.is_empty() {
            return None;
        }

        Some(IndexRequest {
            features,
            reference,
            id_column: id_column.or(section.id_column),
        })
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.as_ref()?.default_format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.as_ref()?.use_color
    }
}
