use crate::domain::node::{MemberId, TypeId};
use serde::{Deserialize, Serialize};

/// Dependency kind - how a reference arose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    // ============ Member → Type ============
    MethodSignature, // parameter, return or generic parameter type
    BodyType,        // local variable or type operand inside a body
    FieldType,
    PropertyType,

    // ============ Member → Member ============
    MethodCall,
}

/// Target of a member dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DependencyTarget {
    Type(TypeId),
    Member(MemberId),
}

/// A single directed edge from one member to a type or another member.
///
/// Edges are values: the reconciler copies them between dependency lists, so a copy of an
/// edge keeps its original `origin` even when it sits in another member's list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Dependency {
    MethodSignature { origin: MemberId, target: TypeId },
    BodyType { origin: MemberId, target: TypeId },
    FieldType { origin: MemberId, target: TypeId },
    PropertyType { origin: MemberId, target: TypeId },
    MethodCall { origin: MemberId, target: MemberId },
}

impl Dependency {
    pub fn kind(&self) -> DependencyKind {
        match self {
            Dependency::MethodSignature { .. } => DependencyKind::MethodSignature,
            Dependency::BodyType { .. } => DependencyKind::BodyType,
            Dependency::FieldType { .. } => DependencyKind::FieldType,
            Dependency::PropertyType { .. } => DependencyKind::PropertyType,
            Dependency::MethodCall { .. } => DependencyKind::MethodCall,
        }
    }

    pub fn origin(&self) -> MemberId {
        match *self {
            Dependency::MethodSignature { origin, .. }
            | Dependency::BodyType { origin, .. }
            | Dependency::FieldType { origin, .. }
            | Dependency::PropertyType { origin, .. }
            | Dependency::MethodCall { origin, .. } => origin,
        }
    }

    pub fn target(&self) -> DependencyTarget {
        match *self {
            Dependency::MethodSignature { target, .. }
            | Dependency::BodyType { target, .. }
            | Dependency::FieldType { target, .. }
            | Dependency::PropertyType { target, .. } => DependencyTarget::Type(target),
            Dependency::MethodCall { target, .. } => DependencyTarget::Member(target),
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Dependency::MethodCall { .. })
    }
}

/// Type-level edge derived from a member dependency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDependency {
    pub kind: DependencyKind,
    pub origin: TypeId,
    pub target: TypeId,
    /// Member edge this was derived from
    pub via: Dependency,
}
