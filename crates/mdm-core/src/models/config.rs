//! Configuration structures for extraction and ingest.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Main configuration for the mdm pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdmConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Ingest configuration.
    pub ingest: IngestConfig,
}

/// Extraction engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum number of item identifiers kept per request.
    pub max_items: usize,

    /// Number of items joined into the display `item` column of a record.
    pub item_preview: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_items: 20,
            item_preview: 5,
        }
    }
}

/// Ingest ledger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Prefix for generated request ids.
    pub id_prefix: String,

    /// Value written to `created_by` on new records.
    pub created_by: String,

    /// Risk assigned when the source request has none.
    pub default_risk: String,

    /// Number of requests handled per chunk when reporting progress.
    pub batch_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            id_prefix: "SP".to_string(),
            created_by: "cron-scraper".to_string(),
            default_risk: "Low".to_string(),
            batch_size: 200,
        }
    }
}

impl MdmConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = MdmConfig::default();
        assert_eq!(config.extraction.max_items, 20);
        assert_eq!(config.extraction.item_preview, 5);
        assert_eq!(config.ingest.id_prefix, "SP");
        assert_eq!(config.ingest.created_by, "cron-scraper");
        assert_eq!(config.ingest.batch_size, 200);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: MdmConfig = serde_json::from_str(r#"{"extraction": {"max_items": 5}}"#).unwrap();
        assert_eq!(config.extraction.max_items, 5);
        assert_eq!(config.extraction.item_preview, 5);
        assert_eq!(config.ingest, IngestConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = MdmConfig::default();
        config.ingest.id_prefix = "MDM".to_string();
        config.save(&path).unwrap();

        let loaded = MdmConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(MdmConfig::load_or_default(None).unwrap(), MdmConfig::default());
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MdmConfig::from_file(&dir.path().join("absent.json")).is_err());
    }
}
