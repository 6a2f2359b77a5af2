use crate::adapters::json::source::JsonMetadataSource;
use crate::app::dto::*;
use crate::domain::builder::ArchitectureBuilder;
use crate::domain::edge::{Dependency, DependencyTarget};
use crate::domain::graph::Architecture;
use crate::domain::node::Member;
use crate::domain::options::ExtractionOptions;
use crate::domain::ports::MetadataSource;
use anyhow::{Context as _, Result, anyhow};
use std::path::Path;

/// Loads metadata, builds the architecture once, and answers queries over it
pub struct AnalysisEngine {
    source_path: String,
    architecture: Architecture,
}

impl AnalysisEngine {
    /// Construct an engine from an already-built architecture.
    pub fn from_prebuilt(source_path: impl Into<String>, architecture: Architecture) -> Self {
        Self {
            source_path: source_path.into(),
            architecture,
        }
    }

    pub fn load(
        source: &dyn MetadataSource,
        source_path: impl Into<String>,
        options: ExtractionOptions,
    ) -> Result<Self> {
        let metadata = source.load()?;
        let architecture = ArchitectureBuilder::new(options)
            .build(&metadata.assemblies)
            .context("Failed to build architecture")?;
        Ok(Self::from_prebuilt(source_path, architecture))
    }

    pub fn load_from_json(json_path: &Path, options: ExtractionOptions) -> Result<Self> {
        let source = JsonMetadataSource::new(json_path);
        Self::load(&source, json_path.display().to_string(), options)
    }

    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    pub fn summary(&self) -> SummaryResponse {
        let registry = &self.architecture.registry;
        SummaryResponse {
            source_path: self.source_path.clone(),
            type_count: registry.len(),
            stub_type_count: registry.stub_type_count(),
            member_count: registry.member_count(),
            member_dependency_count: registry.members().map(|m| m.dependencies().len()).sum(),
            type_dependency_count: registry.types().map(|t| t.dependencies.len()).sum(),
            stats: self.architecture.stats.clone(),
        }
    }

    pub fn types(&self, include_stubs: bool) -> TypesResponse {
        let items = self
            .architecture
            .registry
            .types()
            .filter(|t| include_stubs || !t.is_stub)
            .map(|t| TypeItem {
                full_name: t.full_name.clone(),
                kind: format!("{:?}", t.kind),
                is_stub: t.is_stub,
                member_count: t.members.len(),
                dependency_count: t.dependencies.len(),
            })
            .collect();
        TypesResponse { items }
    }

    pub fn member(&self, full_name: &str) -> Result<MemberResponse> {
        let registry = &self.architecture.registry;
        let member = self
            .architecture
            .member_by_name(full_name)
            .ok_or_else(|| anyhow!("Member not found: {}", full_name))?;

        let name_of = |id| registry.member(id).full_name().to_string();
        let property = member.as_property().map(|p| PropertyLinksDto {
            getter: p.getter.map(name_of),
            setter: p.setter.map(name_of),
            backing_field: p.backing_field.map(name_of),
        });
        let backed_property = member
            .as_field()
            .and_then(|f| f.backed_property)
            .map(name_of);

        Ok(MemberResponse {
            full_name: member.full_name().to_string(),
            member_kind: member.kind_name().to_string(),
            declaring_type: registry.type_node(member.declaring_type()).full_name.clone(),
            is_stub: member.core().is_stub,
            dependencies: self.dependency_dtos(member.dependencies()),
            backwards_dependencies: self.dependency_dtos(member.backwards_dependencies()),
            property,
            backed_property,
        })
    }

    pub fn cycles(&self) -> CyclesResponse {
        let registry = &self.architecture.registry;
        let cycles = self
            .architecture
            .type_graph()
            .cycles()
            .into_iter()
            .map(|cycle| {
                cycle
                    .into_iter()
                    .map(|id| registry.type_node(id).full_name.clone())
                    .collect()
            })
            .collect();
        CyclesResponse { cycles }
    }

    fn dependency_dtos(&self, dependencies: &[Dependency]) -> Vec<DependencyDto> {
        let registry = &self.architecture.registry;
        dependencies
            .iter()
            .map(|dep| {
                let (target, target_is_stub) = match dep.target() {
                    DependencyTarget::Type(id) => {
                        let ty = registry.type_node(id);
                        (ty.full_name.clone(), ty.is_stub)
                    }
                    DependencyTarget::Member(id) => {
                        let m: &Member = registry.member(id);
                        (m.full_name().to_string(), m.core().is_stub)
                    }
                };
                DependencyDto {
                    kind: dep.kind(),
                    origin: registry.member(dep.origin()).full_name().to_string(),
                    target,
                    target_is_stub,
                }
            })
            .collect()
    }
}
