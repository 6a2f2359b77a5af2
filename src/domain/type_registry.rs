//! Type Registry - arena of every type and member node in one analysis run
//!
//! All nodes, analyzed or stub, are owned here and addressed by [`TypeId`] / [`MemberId`].
//! Identity is the full name: asking twice for the same name yields the same id.

use std::collections::HashMap;

use crate::domain::edge::{Dependency, TypeDependency};
use crate::domain::metadata::{MethodForm, MethodReference, TypeKind, TypeReference, Visibility};
use crate::domain::naming::ends_with_segment;
use crate::domain::node::{
    FieldMember, Member, MemberCore, MemberId, MethodMember, PropertyMember, TypeId, TypeNode,
};

/// Result of a lookup that must not guess between several candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    Unique(T),
    NotFound,
    Ambiguous(usize),
}

impl<T> Lookup<T> {
    pub fn from_candidates<I: IntoIterator<Item = T>>(candidates: I) -> Self {
        let mut iter = candidates.into_iter();
        let Some(first) = iter.next() else {
            return Lookup::NotFound;
        };
        let rest = iter.count();
        if rest == 0 {
            Lookup::Unique(first)
        } else {
            Lookup::Ambiguous(rest + 1)
        }
    }

    /// Ambiguous and missing are both "no match".
    pub fn unique(self) -> Option<T> {
        match self {
            Lookup::Unique(value) => Some(value),
            Lookup::NotFound | Lookup::Ambiguous(_) => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Lookup::Ambiguous(_))
    }
}

/// Type Registry - canonical store and stub factory
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<TypeNode>,
    members: Vec<Member>,
    type_by_name: HashMap<String, TypeId>,
    member_by_name: HashMap<String, MemberId>,
}

impl TypeRegistry {
    /// Create a new empty type registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type from the analyzed set.
    ///
    /// A stub created earlier under the same name is promoted in place, so ids handed out
    /// before registration stay valid.
    pub fn register_type(
        &mut self,
        reference: &TypeReference,
        kind: TypeKind,
        visibility: Visibility,
    ) -> TypeId {
        if let Some(&id) = self.type_by_name.get(&reference.full_name) {
            let node = &mut self.types[id.0 as usize];
            if node.is_stub {
                node.is_stub = false;
                node.kind = kind;
                node.visibility = visibility;
                if reference.assembly.is_some() {
                    node.assembly = reference.assembly.clone();
                }
            }
            return id;
        }
        self.insert_type(reference, kind, visibility, false)
    }

    /// Canonical node for `reference`: the analyzed type if known, otherwise a memoized stub.
    pub fn get_or_create_type(&mut self, reference: &TypeReference) -> TypeId {
        if let Some(&id) = self.type_by_name.get(&reference.full_name) {
            return id;
        }
        tracing::trace!(type_name = %reference.full_name, "Creating stub type");
        self.insert_type(reference, TypeKind::Unknown, Visibility::Public, true)
    }

    fn insert_type(
        &mut self,
        reference: &TypeReference,
        kind: TypeKind,
        visibility: Visibility,
        is_stub: bool,
    ) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeNode {
            id,
            full_name: reference.full_name.clone(),
            name: reference.name().to_string(),
            namespace: reference.namespace().to_string(),
            assembly: reference.assembly.clone(),
            kind,
            visibility,
            is_stub,
            members: Vec::new(),
            dependencies: Vec::new(),
            backwards_dependencies: Vec::new(),
        });
        self.type_by_name.insert(reference.full_name.clone(), id);
        id
    }

    /// Method node for `reference` on `declaring_type`, creating a bodiless stub if the
    /// type has no method with that full name.
    pub fn get_or_create_method_stub(
        &mut self,
        declaring_type: TypeId,
        reference: &MethodReference,
    ) -> MemberId {
        if let Some(id) = self.method_with_full_name(declaring_type, &reference.full_name) {
            return id;
        }
        let return_type = self.get_or_create_type(&reference.return_type);
        let parameters: Vec<TypeId> = reference
            .parameters
            .iter()
            .map(|p| self.get_or_create_type(p))
            .collect();
        tracing::trace!(method = %reference.full_name, "Creating stub method");
        self.insert_member_with(&reference.full_name, |id| {
            Member::Method(MethodMember {
                core: MemberCore {
                    id,
                    declaring_type,
                    name: reference.name.clone(),
                    full_name: reference.full_name.clone(),
                    member_type: return_type,
                    visibility: Visibility::Public,
                    is_stub: true,
                    dependencies: Vec::new(),
                    backwards_dependencies: Vec::new(),
                },
                form: MethodForm::None,
                parameters,
                generic_parameters: Vec::new(),
                has_body: false,
            })
        })
    }

    /// Insert a member unless one with `full_name` already exists; returns the canonical id.
    /// The member is appended to its declaring type's member list.
    pub fn insert_member_with<F>(&mut self, full_name: &str, make: F) -> MemberId
    where
        F: FnOnce(MemberId) -> Member,
    {
        if let Some(&id) = self.member_by_name.get(full_name) {
            return id;
        }
        let id = MemberId(self.members.len() as u32);
        let member = make(id);
        debug_assert_eq!(member.id(), id);
        let declaring_type = member.declaring_type();
        self.types[declaring_type.0 as usize].members.push(id);
        self.member_by_name.insert(full_name.to_string(), id);
        self.members.push(member);
        id
    }

    /// Get type node by id
    pub fn type_node(&self, id: TypeId) -> &TypeNode {
        &self.types[id.0 as usize]
    }

    pub fn type_node_mut(&mut self, id: TypeId) -> &mut TypeNode {
        &mut self.types[id.0 as usize]
    }

    /// Get member node by id
    pub fn member(&self, id: MemberId) -> &Member {
        &self.members[id.0 as usize]
    }

    pub fn member_mut(&mut self, id: MemberId) -> &mut Member {
        &mut self.members[id.0 as usize]
    }

    pub fn find_type(&self, full_name: &str) -> Option<TypeId> {
        self.type_by_name.get(full_name).copied()
    }

    pub fn contains_type(&self, full_name: &str) -> bool {
        self.type_by_name.contains_key(full_name)
    }

    pub fn member_with_full_name(&self, full_name: &str) -> Option<MemberId> {
        self.member_by_name.get(full_name).copied()
    }

    /// Method of `declaring_type` with exactly this full name
    pub fn method_with_full_name(&self, declaring_type: TypeId, full_name: &str) -> Option<MemberId> {
        let id = self.member_with_full_name(full_name)?;
        let member = self.member(id);
        (member.as_method().is_some() && member.declaring_type() == declaring_type).then_some(id)
    }

    pub fn members_of(&self, ty: TypeId) -> impl Iterator<Item = &Member> {
        self.type_node(ty).members.iter().map(|&id| self.member(id))
    }

    pub fn properties_of(&self, ty: TypeId) -> impl Iterator<Item = &PropertyMember> {
        self.members_of(ty).filter_map(Member::as_property)
    }

    pub fn fields_of(&self, ty: TypeId) -> impl Iterator<Item = &FieldMember> {
        self.members_of(ty).filter_map(Member::as_field)
    }

    /// Properties of `ty` whose simple name equals `name`
    pub fn properties_named(&self, ty: TypeId, name: &str) -> Lookup<MemberId> {
        Lookup::from_candidates(
            self.properties_of(ty)
                .filter(|p| p.core.name == name)
                .map(|p| p.core.id),
        )
    }

    /// Properties of `ty` whose full name ends with the dotted/qualified `suffix`
    pub fn properties_ending_with(&self, ty: TypeId, suffix: &str) -> Lookup<MemberId> {
        Lookup::from_candidates(
            self.properties_of(ty)
                .filter(|p| ends_with_segment(&p.core.full_name, suffix))
                .map(|p| p.core.id),
        )
    }

    /// Fields of `ty` whose simple name equals `name`
    pub fn fields_named(&self, ty: TypeId, name: &str) -> Lookup<MemberId> {
        Lookup::from_candidates(
            self.fields_of(ty)
                .filter(|f| f.core.name == name)
                .map(|f| f.core.id),
        )
    }

    /// Append edges to a member's outgoing list
    pub fn extend_dependencies<I>(&mut self, member: MemberId, dependencies: I)
    where
        I: IntoIterator<Item = Dependency>,
    {
        self.member_mut(member)
            .core_mut()
            .dependencies
            .extend(dependencies);
    }

    pub fn push_backwards_dependency(&mut self, member: MemberId, dependency: Dependency) {
        self.member_mut(member)
            .core_mut()
            .backwards_dependencies
            .push(dependency);
    }

    /// Record a type-level edge on both endpoints
    pub fn push_type_dependency(&mut self, dependency: TypeDependency) {
        let (origin, target) = (dependency.origin, dependency.target);
        self.type_node_mut(target)
            .backwards_dependencies
            .push(dependency.clone());
        self.type_node_mut(origin).dependencies.push(dependency);
    }

    /// Link a property and the field that stores it, in both directions.
    ///
    /// A field already backing another property is left alone and `false` is returned. A
    /// field the property pointed at before loses its back-link.
    pub fn link_backing_field(&mut self, property: MemberId, field: MemberId) -> bool {
        let claimed_by = match self.member(field) {
            Member::Field(f) => f.backed_property,
            _ => return false,
        };
        if claimed_by.is_some_and(|owner| owner != property) {
            return false;
        }
        let previous = match self.member_mut(property) {
            Member::Property(p) => p.backing_field.replace(field),
            _ => return false,
        };
        if let Some(previous) = previous.filter(|&previous| previous != field) {
            if let Member::Field(f) = self.member_mut(previous) {
                f.backed_property = None;
            }
        }
        if let Member::Field(f) = self.member_mut(field) {
            f.backed_property = Some(property);
        }
        true
    }

    /// True if `field` is free or already backs `property`
    pub fn can_back(&self, field: MemberId, property: MemberId) -> bool {
        match self.member(field) {
            Member::Field(f) => f.backed_property.is_none_or(|owner| owner == property),
            _ => false,
        }
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeNode> {
        self.types.iter()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Get count of registered types, stubs included
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn stub_type_count(&self) -> usize {
        self.types.iter().filter(|t| t.is_stub).count()
    }
}
