//! Mock implementations for integration tests.
#![allow(dead_code)]

use anyhow::{Result, anyhow};
use archdeps::domain::metadata::{AssemblyMetadata, MetadataSet};
use archdeps::domain::ports::MetadataSource;

/// In-memory metadata source.
pub struct InMemoryMetadataSource {
    metadata: MetadataSet,
}

impl InMemoryMetadataSource {
    pub fn new(assemblies: Vec<AssemblyMetadata>) -> Self {
        Self {
            metadata: MetadataSet { assemblies },
        }
    }
}

impl MetadataSource for InMemoryMetadataSource {
    fn load(&self) -> Result<MetadataSet> {
        Ok(self.metadata.clone())
    }
}

/// Source that always fails to load.
pub struct FailingMetadataSource;

impl MetadataSource for FailingMetadataSource {
    fn load(&self) -> Result<MetadataSet> {
        Err(anyhow!("metadata unavailable"))
    }
}
