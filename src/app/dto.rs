use crate::domain::edge::DependencyKind;
use crate::domain::extractor::ExtractionStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub source_path: String,
    pub type_count: usize,
    pub stub_type_count: usize,
    pub member_count: usize,
    pub member_dependency_count: usize,
    pub type_dependency_count: usize,
    pub stats: ExtractionStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeItem {
    pub full_name: String,
    pub kind: String,
    pub is_stub: bool,
    pub member_count: usize,
    pub dependency_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypesResponse {
    pub items: Vec<TypeItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyDto {
    pub kind: DependencyKind,
    /// Member the edge was recorded for; differs from the listing member for copied edges
    pub origin: String,
    /// Full name of the target type or member
    pub target: String,
    pub target_is_stub: bool,
}

/// Property links set by the reconciler (or present in metadata for accessors)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyLinksDto {
    pub getter: Option<String>,
    pub setter: Option<String>,
    pub backing_field: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    pub full_name: String,
    pub member_kind: String,
    pub declaring_type: String,
    pub is_stub: bool,
    pub dependencies: Vec<DependencyDto>,
    pub backwards_dependencies: Vec<DependencyDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyLinksDto>,
    /// For fields: the property this field backs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backed_property: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CyclesResponse {
    pub cycles: Vec<Vec<String>>,
}
