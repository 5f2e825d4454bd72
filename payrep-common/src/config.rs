//! Engine configuration loaded from TOML

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Tuning knobs for the ingestion pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Rows persisted per bulk write; chunk boundaries are the pipeline's
    /// only suspension points.
    pub chunk_size: usize,
    /// Cap on duplicate employee numbers quoted in error messages.
    pub duplicate_sample_cap: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            duplicate_sample_cap: 10,
        }
    }
}

impl IngestConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied_for_missing_keys() {
        let config = IngestConfig::from_toml_str("chunk_size = 50").unwrap();
        assert_eq!(config.chunk_size, 50);
        assert_eq!(config.duplicate_sample_cap, 10);
    }

    #[test]
    fn zero_chunk_size_rejected() {
        assert!(IngestConfig::from_toml_str("chunk_size = 0").is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payrep.toml");
        std::fs::write(&path, "chunk_size = 25\nduplicate_sample_cap = 3\n").unwrap();
        let config = IngestConfig::from_file(&path).unwrap();
        assert_eq!(config.chunk_size, 25);
        assert_eq!(config.duplicate_sample_cap, 3);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = IngestConfig::from_file(Path::new("/nonexistent/payrep.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
