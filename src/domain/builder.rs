use crate::domain::edge::{Dependency, DependencyTarget, TypeDependency};
use crate::domain::extractor::{DependencyExtractor, ExtractionStats};
use crate::domain::graph::Architecture;
use crate::domain::metadata::{
    AssemblyMetadata, FieldDefinition, MethodDefinition, PropertyDefinition, TypeDefinition,
    TypeReference, Visibility,
};
use crate::domain::node::{
    FieldMember, Member, MemberCore, MemberId, MethodMember, PropertyMember, TypeId,
};
use crate::domain::options::ExtractionOptions;
use crate::domain::type_registry::TypeRegistry;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Architecture builder - Domain Service for constructing the member dependency graph
pub struct ArchitectureBuilder {
    options: ExtractionOptions,
}

impl Default for ArchitectureBuilder {
    fn default() -> Self {
        Self::new(ExtractionOptions::default())
    }
}

impl ArchitectureBuilder {
    pub fn new(options: ExtractionOptions) -> Self {
        Self { options }
    }

    /// Three-pass build strategy
    pub fn build(&self, assemblies: &[AssemblyMetadata]) -> Result<Architecture> {
        let mut registry = TypeRegistry::new();

        // Pass 1: Node Allocation
        // All types first, so references inside the analyzed set never become stubs.
        let mut loaded: Vec<(TypeId, &TypeDefinition)> = Vec::new();
        for assembly in assemblies {
            for definition in &assembly.types {
                if registry
                    .find_type(&definition.full_name)
                    .is_some_and(|id| !registry.type_node(id).is_stub)
                {
                    warn!(type_name = %definition.full_name, "Duplicate type definition ignored");
                    continue;
                }
                let reference =
                    TypeReference::in_assembly(definition.full_name.clone(), assembly.name.clone());
                let id = registry.register_type(&reference, definition.kind, definition.visibility);
                loaded.push((id, definition));
            }
        }
        for &(id, definition) in &loaded {
            add_members(&mut registry, id, definition);
        }
        info!(
            types = loaded.len(),
            members = registry.member_count(),
            "Pass 1: nodes allocated"
        );

        // Pass 2: Dependency Extraction
        let mut stats = ExtractionStats::default();
        {
            let mut extractor = DependencyExtractor::new(&mut registry, self.options);
            for &(id, definition) in &loaded {
                let type_stats = extractor
                    .extract(id, definition)
                    .with_context(|| format!("Failed to extract dependencies of {}", definition.full_name))?;
                stats.merge(&type_stats);
            }
        }
        info!(
            methods = stats.methods,
            calls = stats.call_dependencies,
            linked_accessors = stats.linked_accessors,
            stub_types = registry.stub_type_count(),
            "Pass 2: dependencies extracted"
        );

        // Pass 3: Backwards and Type-Level Dependencies
        if self.options.link_backwards {
            let linked = link_backwards_dependencies(&mut registry);
            info!(type_dependencies = linked, "Pass 3: backwards dependencies linked");
        }

        Ok(Architecture { registry, stats })
    }
}

fn add_members(registry: &mut TypeRegistry, ty: TypeId, definition: &TypeDefinition) {
    for field in &definition.fields {
        add_field(registry, ty, field);
    }
    for method in &definition.methods {
        add_method(registry, ty, method);
    }
    for property in &definition.properties {
        add_property(registry, ty, property);
    }
    debug!(
        type_name = %definition.full_name,
        members = registry.type_node(ty).members.len(),
        "Members created"
    );
}

fn member_core(
    id: MemberId,
    declaring_type: TypeId,
    name: &str,
    full_name: &str,
    member_type: TypeId,
    visibility: Visibility,
) -> MemberCore {
    MemberCore {
        id,
        declaring_type,
        name: name.to_string(),
        full_name: full_name.to_string(),
        member_type,
        visibility,
        is_stub: false,
        dependencies: Vec::new(),
        backwards_dependencies: Vec::new(),
    }
}

fn warn_if_duplicate(registry: &TypeRegistry, full_name: &str) -> bool {
    if registry.member_with_full_name(full_name).is_some() {
        warn!(member = %full_name, "Duplicate member definition ignored");
        return true;
    }
    false
}

fn add_field(registry: &mut TypeRegistry, ty: TypeId, field: &FieldDefinition) {
    if warn_if_duplicate(registry, &field.full_name) {
        return;
    }
    let target = registry.get_or_create_type(&field.field_type);
    let id = registry.insert_member_with(&field.full_name, |id| {
        Member::Field(FieldMember {
            core: member_core(id, ty, &field.name, &field.full_name, target, field.visibility),
            backed_property: None,
        })
    });
    registry.extend_dependencies(id, [Dependency::FieldType { origin: id, target }]);
}

fn add_method(registry: &mut TypeRegistry, ty: TypeId, method: &MethodDefinition) {
    if warn_if_duplicate(registry, &method.full_name) {
        return;
    }
    let return_type = registry.get_or_create_type(&method.return_type);
    let parameters = method
        .parameters
        .iter()
        .map(|p| registry.get_or_create_type(p))
        .collect();
    let generic_parameters = method
        .generic_parameters
        .iter()
        .map(|p| registry.get_or_create_type(p))
        .collect();
    registry.insert_member_with(&method.full_name, |id| {
        Member::Method(MethodMember {
            core: member_core(id, ty, &method.name, &method.full_name, return_type, method.visibility),
            form: method.form(),
            parameters,
            generic_parameters,
            has_body: method.body.is_some(),
        })
    });
}

fn add_property(registry: &mut TypeRegistry, ty: TypeId, property: &PropertyDefinition) {
    if warn_if_duplicate(registry, &property.full_name) {
        return;
    }
    let accessor = |registry: &TypeRegistry, full_name: &Option<String>| {
        full_name
            .as_deref()
            .and_then(|name| registry.method_with_full_name(ty, name))
    };
    let getter = accessor(registry, &property.getter);
    let setter = accessor(registry, &property.setter);
    let target = registry.get_or_create_type(&property.property_type);
    let id = registry.insert_member_with(&property.full_name, |id| {
        Member::Property(PropertyMember {
            core: member_core(
                id,
                ty,
                &property.name,
                &property.full_name,
                target,
                property.visibility,
            ),
            getter,
            setter,
            backing_field: None,
        })
    });
    registry.extend_dependencies(id, [Dependency::PropertyType { origin: id, target }]);
}

/// Mirror every member edge onto its target: the target member's backwards list, and a
/// type-level edge between the two declaring types unless they are the same type.
///
/// Returns the number of type-level edges added.
pub fn link_backwards_dependencies(registry: &mut TypeRegistry) -> usize {
    let edges: Vec<(TypeId, Dependency)> = registry
        .members()
        .flat_map(|m| {
            let origin_type = m.declaring_type();
            m.dependencies().iter().map(move |d| (origin_type, d.clone()))
        })
        .collect();

    let mut linked = 0;
    for (origin_type, dependency) in edges {
        let target_type = match dependency.target() {
            DependencyTarget::Type(ty) => ty,
            DependencyTarget::Member(member) => {
                registry.push_backwards_dependency(member, dependency.clone());
                registry.member(member).declaring_type()
            }
        };
        if origin_type == target_type {
            continue;
        }
        registry.push_type_dependency(TypeDependency {
            kind: dependency.kind(),
            origin: origin_type,
            target: target_type,
            via: dependency,
        });
        linked += 1;
    }
    linked
}
