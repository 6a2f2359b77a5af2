use crate::domain::metadata::MetadataSet;
use anyhow::Result;

/// Decoded metadata source port (implemented by Infrastructure)
pub trait MetadataSource {
    fn load(&self) -> Result<MetadataSet>;
}
