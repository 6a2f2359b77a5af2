//! Reference scanners over one method definition.
//!
//! Each scanner returns the edges it found and leaves committing them to the caller. Every
//! target is resolved through the [`TypeRegistry`], so no edge ever points outside the arena.

use crate::domain::edge::Dependency;
use crate::domain::metadata::{MethodBody, MethodDefinition, MethodReference};
use crate::domain::node::{MemberId, TypeId};
use crate::domain::type_registry::TypeRegistry;

/// One edge per signature type occurrence: return type, parameters, generic parameters.
pub fn signature_dependencies(
    registry: &mut TypeRegistry,
    origin: MemberId,
    method: &MethodDefinition,
) -> Vec<Dependency> {
    std::iter::once(&method.return_type)
        .chain(&method.parameters)
        .chain(&method.generic_parameters)
        .map(|ty| Dependency::MethodSignature {
            origin,
            target: registry.get_or_create_type(ty),
        })
        .collect()
}

/// One edge per type occurrence inside the body. No body, no edges.
pub fn body_type_dependencies(
    registry: &mut TypeRegistry,
    origin: MemberId,
    body: Option<&MethodBody>,
) -> Vec<Dependency> {
    let Some(body) = body else {
        return Vec::new();
    };
    body.referenced_types()
        .map(|ty| Dependency::BodyType {
            origin,
            target: registry.get_or_create_type(ty),
        })
        .collect()
}

/// How call operands whose method is unknown on the declaring type are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallResolution {
    /// Only methods already present on the declaring type
    ExistingOnly,
    /// Stub types additionally grow a stub method on demand
    StubExternal,
}

/// Callee node for a method operand, or `None` if it cannot be matched.
pub fn resolve_called_method(
    registry: &mut TypeRegistry,
    reference: &MethodReference,
    resolution: CallResolution,
) -> Option<MemberId> {
    let called_type: TypeId = registry.get_or_create_type(&reference.declaring_type);
    if let Some(method) = registry.method_with_full_name(called_type, &reference.full_name) {
        return Some(method);
    }
    if resolution == CallResolution::StubExternal && registry.type_node(called_type).is_stub {
        return Some(registry.get_or_create_method_stub(called_type, reference));
    }
    tracing::trace!(
        method = %reference.full_name,
        declaring_type = %reference.declaring_type.full_name,
        "Skipping unresolvable call operand"
    );
    None
}

/// Call edges for every method operand in the body, in instruction order.
///
/// Returns the edges plus the number of operands that could not be matched. Unmatched
/// operands are skipped without affecting the rest of the body.
pub fn method_call_dependencies(
    registry: &mut TypeRegistry,
    origin: MemberId,
    body: Option<&MethodBody>,
    resolution: CallResolution,
) -> (Vec<Dependency>, usize) {
    let Some(body) = body else {
        return (Vec::new(), 0);
    };
    let mut dependencies = Vec::new();
    let mut unresolved = 0;
    for reference in body.instructions.iter().filter_map(|i| i.method_operand()) {
        match resolve_called_method(registry, reference, resolution) {
            Some(target) => dependencies.push(Dependency::MethodCall { origin, target }),
            None => unresolved += 1,
        }
    }
    (dependencies, unresolved)
}
