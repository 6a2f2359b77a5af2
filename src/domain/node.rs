use crate::domain::edge::{Dependency, TypeDependency};
use crate::domain::metadata::{MethodForm, TypeKind, Visibility};
use serde::Serialize;

/// Index of a type node in the registry arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

/// Index of a member node in the registry arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MemberId(pub u32);

/// Type node
#[derive(Debug, Clone)]
pub struct TypeNode {
    pub id: TypeId,
    pub full_name: String,
    pub name: String,
    pub namespace: String,
    pub assembly: Option<String>,
    pub kind: TypeKind,
    pub visibility: Visibility,

    /// Placeholder for a type outside the analyzed set
    pub is_stub: bool,

    /// Members in declaration order; stub members are appended as they are requested
    pub members: Vec<MemberId>,

    pub dependencies: Vec<TypeDependency>,
    pub backwards_dependencies: Vec<TypeDependency>,
}

/// Shared attributes of every member variant
#[derive(Debug, Clone)]
pub struct MemberCore {
    pub id: MemberId,
    pub declaring_type: TypeId,
    pub name: String,
    pub full_name: String,
    /// Return type for methods, declared type for fields and properties
    pub member_type: TypeId,
    pub visibility: Visibility,
    pub is_stub: bool,

    /// Outgoing edges, append-only
    pub dependencies: Vec<Dependency>,
    /// Incoming edges, append-only
    pub backwards_dependencies: Vec<Dependency>,
}

/// Method member
#[derive(Debug, Clone)]
pub struct MethodMember {
    pub core: MemberCore,
    pub form: MethodForm,
    pub parameters: Vec<TypeId>,
    pub generic_parameters: Vec<TypeId>,
    pub has_body: bool,
}

/// Field member
#[derive(Debug, Clone)]
pub struct FieldMember {
    pub core: MemberCore,
    /// Property this field backs; set only by the reconciler
    pub backed_property: Option<MemberId>,
}

/// Property member
#[derive(Debug, Clone)]
pub struct PropertyMember {
    pub core: MemberCore,
    pub getter: Option<MemberId>,
    pub setter: Option<MemberId>,
    /// Storage field inferred by the reconciler
    pub backing_field: Option<MemberId>,
}

/// Polymorphic member node
#[derive(Debug, Clone)]
pub enum Member {
    Method(MethodMember),
    Field(FieldMember),
    Property(PropertyMember),
}

impl Member {
    pub fn core(&self) -> &MemberCore {
        match self {
            Member::Method(m) => &m.core,
            Member::Field(f) => &f.core,
            Member::Property(p) => &p.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut MemberCore {
        match self {
            Member::Method(m) => &mut m.core,
            Member::Field(f) => &mut f.core,
            Member::Property(p) => &mut p.core,
        }
    }

    pub fn id(&self) -> MemberId {
        self.core().id
    }

    pub fn name(&self) -> &str {
        &self.core().name
    }

    pub fn full_name(&self) -> &str {
        &self.core().full_name
    }

    pub fn declaring_type(&self) -> TypeId {
        self.core().declaring_type
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.core().dependencies
    }

    pub fn backwards_dependencies(&self) -> &[Dependency] {
        &self.core().backwards_dependencies
    }

    pub fn as_method(&self) -> Option<&MethodMember> {
        match self {
            Member::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldMember> {
        match self {
            Member::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyMember> {
        match self {
            Member::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Member::Method(_) => "method",
            Member::Field(_) => "field",
            Member::Property(_) => "property",
        }
    }
}
