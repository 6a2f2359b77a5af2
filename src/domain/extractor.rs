//! Dependency extraction for the methods of one type.
//!
//! Per method: signature edges, body-type edges and call edges are computed and then
//! appended to the method's dependency list. Accessors do not get call edges of their own;
//! the reconciler attaches their dependencies to the property instead.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::edge::Dependency;
use crate::domain::error::ExtractionError;
use crate::domain::metadata::{MethodDefinition, TypeDefinition};
use crate::domain::node::{MemberId, TypeId};
use crate::domain::options::ExtractionOptions;
use crate::domain::reconciler::{AccessorOutcome, AccessorReconciler};
use crate::domain::scanner;
use crate::domain::type_registry::TypeRegistry;

/// Counters accumulated over one or more `extract` calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub methods: usize,
    pub signature_dependencies: usize,
    pub body_type_dependencies: usize,
    pub call_dependencies: usize,
    pub unresolved_calls: usize,
    pub linked_accessors: usize,
    pub unlinked_accessors: usize,
    pub backing_fields_linked: usize,
    pub backing_field_calls: usize,
}

impl ExtractionStats {
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.methods += other.methods;
        self.signature_dependencies += other.signature_dependencies;
        self.body_type_dependencies += other.body_type_dependencies;
        self.call_dependencies += other.call_dependencies;
        self.unresolved_calls += other.unresolved_calls;
        self.linked_accessors += other.linked_accessors;
        self.unlinked_accessors += other.unlinked_accessors;
        self.backing_fields_linked += other.backing_fields_linked;
        self.backing_field_calls += other.backing_field_calls;
    }
}

/// Dependency extractor - drives the scanners and the reconciler over a type's methods
pub struct DependencyExtractor<'r> {
    registry: &'r mut TypeRegistry,
    options: ExtractionOptions,
}

impl<'r> DependencyExtractor<'r> {
    pub fn new(registry: &'r mut TypeRegistry, options: ExtractionOptions) -> Self {
        Self { registry, options }
    }

    /// Extract and append the dependencies of every method of `definition` that has a
    /// method node on `type_id`. Running it again appends the same edges again.
    ///
    /// An error aborts at the failing method; nothing is committed for that method.
    pub fn extract(
        &mut self,
        type_id: TypeId,
        definition: &TypeDefinition,
    ) -> Result<ExtractionStats, ExtractionError> {
        let mut stats = ExtractionStats::default();

        for method in &definition.methods {
            let Some(member) = self.registry.method_with_full_name(type_id, &method.full_name) else {
                debug!(method = %method.full_name, "No method node, skipping");
                continue;
            };
            stats.methods += 1;

            let mut dependencies = scanner::signature_dependencies(self.registry, member, method);
            stats.signature_dependencies += dependencies.len();

            let body_types = scanner::body_type_dependencies(self.registry, member, method.body.as_ref());
            stats.body_type_dependencies += body_types.len();
            dependencies.extend(body_types);

            let calls = self.method_call_dependencies(type_id, member, method, &mut stats)?;
            stats.call_dependencies += calls.len();
            dependencies.extend(calls);

            self.registry.extend_dependencies(member, dependencies);
        }

        debug!(
            type_name = %definition.full_name,
            methods = stats.methods,
            calls = stats.call_dependencies,
            "Extracted type dependencies"
        );
        Ok(stats)
    }

    fn method_call_dependencies(
        &mut self,
        type_id: TypeId,
        member: MemberId,
        method: &MethodDefinition,
        stats: &mut ExtractionStats,
    ) -> Result<Vec<Dependency>, ExtractionError> {
        let Some(body) = method.body.as_ref() else {
            return Ok(Vec::new());
        };

        let mut reconciler = AccessorReconciler::new(&mut *self.registry, type_id, self.options.call_resolution());
        if method.is_accessor() {
            match reconciler.reconcile_accessor(member, method) {
                Ok(AccessorOutcome::Linked { backing_field, .. }) => {
                    stats.linked_accessors += 1;
                    stats.backing_fields_linked += usize::from(backing_field.is_some());
                }
                Ok(AccessorOutcome::Unlinked) => stats.unlinked_accessors += 1,
                Err(err) => {
                    tracing::error!(method = %method.full_name, error = %err, "Aborting method extraction");
                    return Err(err);
                }
            }
            return Ok(Vec::new());
        }

        stats.backing_field_calls += reconciler.attach_backing_field_calls(body);

        let (calls, unresolved) = scanner::method_call_dependencies(
            self.registry,
            member,
            Some(body),
            self.options.call_resolution(),
        );
        stats.unresolved_calls += unresolved;
        Ok(calls)
    }
}
