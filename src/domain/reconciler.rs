//! Accessor / backing-field reconciliation.
//!
//! Getters, setters and storage fields are plain members in metadata. The link to the
//! property they implement is inferred from naming conventions ([`crate::domain::naming`])
//! and instruction shape. Whenever more than one candidate fits, no link is made.

use tracing::debug;

use crate::domain::edge::Dependency;
use crate::domain::error::ExtractionError;
use crate::domain::metadata::{Instruction, MethodBody, MethodDefinition, MethodForm};
use crate::domain::naming::{MatchFunction, field_match_function, match_function_for, member_tail};
use crate::domain::node::{Member, MemberId, TypeId};
use crate::domain::scanner::{CallResolution, resolve_called_method};
use crate::domain::type_registry::{Lookup, TypeRegistry};

/// What reconciling one accessor produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessorOutcome {
    Linked {
        property: MemberId,
        backing_field: Option<MemberId>,
        /// Edges appended to the property (and the same number to the accessor)
        dependencies: usize,
    },
    Unlinked,
}

/// Reconciler scoped to one declaring type
pub struct AccessorReconciler<'r> {
    registry: &'r mut TypeRegistry,
    declaring_type: TypeId,
    resolution: CallResolution,
}

impl<'r> AccessorReconciler<'r> {
    pub fn new(registry: &'r mut TypeRegistry, declaring_type: TypeId, resolution: CallResolution) -> Self {
        Self {
            registry,
            declaring_type,
            resolution,
        }
    }

    /// Property of the declaring type implemented by the member `name` / `full_name`.
    ///
    /// Tries the derived simple name first, then the derived name as a trailing segment of
    /// property full names. Both steps must yield exactly one candidate.
    pub fn match_property(&self, name: &str, full_name: &str, matcher: MatchFunction) -> Option<MemberId> {
        if let Some(candidate) = matcher(name) {
            match self.registry.properties_named(self.declaring_type, &candidate) {
                Lookup::Unique(property) => return Some(property),
                Lookup::Ambiguous(count) => {
                    debug!(member = %full_name, candidate = %candidate, count, "Ambiguous property name");
                }
                Lookup::NotFound => {}
            }
        }

        let candidate = matcher(member_tail(full_name))?;
        match self.registry.properties_ending_with(self.declaring_type, &candidate) {
            Lookup::Unique(property) => Some(property),
            Lookup::Ambiguous(count) => {
                debug!(member = %full_name, candidate = %candidate, count, "Ambiguous property full name");
                None
            }
            Lookup::NotFound => None,
        }
    }

    /// Attach an accessor's dependencies to the property it implements.
    ///
    /// Calls made by the accessor that resolve become call edges from the property. The last
    /// field of the declaring type touched by the accessor, unless it already backs another
    /// property, becomes the backing field, and edges it already carries are copied along. The resulting set is appended to both
    /// the property's accessor of this form and the property itself.
    pub fn reconcile_accessor(
        &mut self,
        method: MemberId,
        definition: &MethodDefinition,
    ) -> Result<AccessorOutcome, ExtractionError> {
        let form = definition.form();
        let matcher = match_function_for(form).ok_or_else(|| ExtractionError::MissingMatchFunction {
            form,
            method: definition.full_name.clone(),
        })?;
        let Some(body) = definition.body.as_ref() else {
            return Ok(AccessorOutcome::Unlinked);
        };

        let Some(property) = self.match_property(&definition.name, &definition.full_name, matcher) else {
            debug!(accessor = %definition.full_name, "No property for accessor");
            return Ok(AccessorOutcome::Unlinked);
        };

        let mut dependencies = self.property_call_dependencies(property, body);

        if let Some(field) = self.backing_field_candidate(property, body) {
            self.registry.link_backing_field(property, field);
        }

        let (accessor, backing_field) = match self.registry.member(property) {
            Member::Property(p) => {
                let linked = if form == MethodForm::Getter { p.getter } else { p.setter };
                (linked.unwrap_or(method), p.backing_field)
            }
            _ => (method, None),
        };
        if let Some(field) = backing_field {
            dependencies.extend_from_slice(self.registry.member(field).dependencies());
        }

        let count = dependencies.len();
        self.registry.extend_dependencies(accessor, dependencies.iter().cloned());
        self.registry.extend_dependencies(property, dependencies);

        debug!(
            accessor = %definition.full_name,
            property = %self.registry.member(property).full_name(),
            dependencies = count,
            "Linked accessor to property"
        );
        Ok(AccessorOutcome::Linked {
            property,
            backing_field,
            dependencies: count,
        })
    }

    /// Detect calls whose result is stored straight into a convention-named field and record
    /// them as call edges of the property that field backs. Calls are resolved like any other
    /// call operand; unresolved ones are skipped. Returns the number of edges added.
    pub fn attach_backing_field_calls(&mut self, body: &MethodBody) -> usize {
        let matcher = field_match_function();
        let own_type = self.registry.type_node(self.declaring_type).full_name.clone();
        let mut attached = 0;

        for pair in body.instructions.windows(2) {
            let Some(reference) = pair[0].method_operand() else {
                continue;
            };
            let Some(field) = pair[1].stored_field() else {
                continue;
            };
            if field.declaring_type.full_name != own_type || matcher(&field.name).is_none() {
                continue;
            }
            let Some(property) = self.match_property(&field.name, &field.full_name, matcher) else {
                continue;
            };
            let Some(target) = resolve_called_method(self.registry, reference, self.resolution) else {
                continue;
            };
            self.registry
                .extend_dependencies(property, [Dependency::MethodCall { origin: property, target }]);
            attached += 1;
        }
        attached
    }

    fn property_call_dependencies(&mut self, property: MemberId, body: &MethodBody) -> Vec<Dependency> {
        let (registry, resolution) = (&mut *self.registry, self.resolution);
        body.instructions
            .iter()
            .filter(|i| i.is_method_call())
            .filter_map(Instruction::method_operand)
            .filter_map(|reference| resolve_called_method(registry, reference, resolution))
            .map(|target| Dependency::MethodCall {
                origin: property,
                target,
            })
            .collect()
    }

    /// The last uniquely named field of the declaring type touched by the body that is not
    /// already backing a different property.
    fn backing_field_candidate(&self, property: MemberId, body: &MethodBody) -> Option<MemberId> {
        let own_type = &self.registry.type_node(self.declaring_type).full_name;
        body.instructions
            .iter()
            .filter_map(Instruction::field_operand)
            .filter(|field| &field.declaring_type.full_name == own_type)
            .filter_map(|field| self.registry.fields_named(self.declaring_type, &field.name).unique())
            .filter(|&field| self.registry.can_back(field, property))
            .last()
    }
}
