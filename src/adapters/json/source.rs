use crate::domain::metadata::MetadataSet;
use crate::domain::ports::MetadataSource;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Reads a JSON-serialized [`MetadataSet`] produced by a bytecode reader
pub struct JsonMetadataSource {
    pub path: PathBuf,
}

impl JsonMetadataSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl MetadataSource for JsonMetadataSource {
    fn load(&self) -> Result<MetadataSet> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read metadata file: {}", self.path.display()))?;
        let metadata: MetadataSet = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse metadata JSON: {}", self.path.display()))?;
        tracing::debug!(
            path = %self.path.display(),
            assemblies = metadata.assemblies.len(),
            "Loaded metadata"
        );
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_error() {
        let source = JsonMetadataSource::new("/nonexistent/metadata_12345.json");
        let err = source.load().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read metadata file"));
    }
}
