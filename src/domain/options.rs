use serde::{Deserialize, Serialize};

use crate::domain::scanner::CallResolution;

/// Extraction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    /// Calls into stub types grow a stub method instead of being skipped.
    pub stub_external_calls: bool,
    /// Derive backwards and type-level dependencies after extraction.
    pub link_backwards: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            stub_external_calls: true,
            link_backwards: true,
        }
    }
}

impl ExtractionOptions {
    /// Only edges between nodes that already exist; no backwards pass.
    pub fn minimal() -> Self {
        Self {
            stub_external_calls: false,
            link_backwards: false,
        }
    }

    pub fn call_resolution(&self) -> CallResolution {
        if self.stub_external_calls {
            CallResolution::StubExternal
        } else {
            CallResolution::ExistingOnly
        }
    }
}
