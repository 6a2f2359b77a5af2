//! Metadata fixture builders for integration tests.
#![allow(dead_code)]

use archdeps::domain::metadata::{
    AssemblyMetadata, FieldDefinition, FieldReference, Instruction, MethodBody, MethodDefinition,
    MethodReference, OpCode, Operand, PropertyDefinition, TypeDefinition, TypeKind, TypeReference,
    Visibility, member_full_name, method_full_name,
};

pub const VOID: &str = "System.Void";

pub fn ty(full_name: &str) -> TypeReference {
    TypeReference::new(full_name)
}

pub fn assembly(name: &str, types: Vec<TypeDefinition>) -> AssemblyMetadata {
    AssemblyMetadata {
        name: name.to_string(),
        types,
    }
}

/// Fluent builder for one analyzed type.
pub struct TypeBuilder {
    definition: TypeDefinition,
}

impl TypeBuilder {
    pub fn class(full_name: &str) -> Self {
        Self {
            definition: TypeDefinition::new(full_name, TypeKind::Class),
        }
    }

    pub fn field(mut self, name: &str, field_type: &str) -> Self {
        self.definition.fields.push(FieldDefinition {
            name: name.to_string(),
            full_name: member_full_name(&self.definition.full_name, name),
            field_type: ty(field_type),
            visibility: Visibility::Private,
        });
        self
    }

    /// Property whose accessors (if any) are named `get_<name>()` / `set_<name>(<type>)`.
    pub fn property(mut self, name: &str, property_type: &str, getter: bool, setter: bool) -> Self {
        let owner = self.definition.full_name.clone();
        self.definition.properties.push(PropertyDefinition {
            name: name.to_string(),
            full_name: member_full_name(&owner, name),
            property_type: ty(property_type),
            visibility: Visibility::Public,
            getter: getter.then(|| method_full_name(&owner, &format!("get_{}", name), &[])),
            setter: setter
                .then(|| method_full_name(&owner, &format!("set_{}", name), &[ty(property_type)])),
        });
        self
    }

    /// Property with no accessor links in metadata.
    pub fn bare_property(self, name: &str, property_type: &str) -> Self {
        self.property(name, property_type, false, false)
    }

    pub fn method(mut self, method: MethodDefinition) -> Self {
        self.definition.methods.push(method);
        self
    }

    pub fn build(self) -> TypeDefinition {
        self.definition
    }
}

pub fn method(owner: &str, name: &str, return_type: &str, parameters: &[&str]) -> MethodDefinition {
    MethodDefinition::new(
        ty(owner),
        name,
        ty(return_type),
        parameters.iter().map(|p| ty(p)).collect(),
    )
}

pub fn with_body(mut method: MethodDefinition, instructions: Vec<Instruction>) -> MethodDefinition {
    method.body = Some(MethodBody {
        local_variable_types: Vec::new(),
        instructions,
    });
    method
}

pub fn getter(owner: &str, property: &str, property_type: &str, instructions: Vec<Instruction>) -> MethodDefinition {
    let mut m = with_body(method(owner, &format!("get_{}", property), property_type, &[]), instructions);
    m.is_getter = true;
    m
}

/// Getter taking parameters, e.g. an indexer's `get_Item(System.Int32)`.
pub fn getter_with_params(
    owner: &str,
    property: &str,
    property_type: &str,
    parameters: &[&str],
    instructions: Vec<Instruction>,
) -> MethodDefinition {
    let mut m = with_body(
        method(owner, &format!("get_{}", property), property_type, parameters),
        instructions,
    );
    m.is_getter = true;
    m
}

pub fn setter(owner: &str, property: &str, property_type: &str, instructions: Vec<Instruction>) -> MethodDefinition {
    let mut m = with_body(
        method(owner, &format!("set_{}", property), VOID, &[property_type]),
        instructions,
    );
    m.is_setter = true;
    m
}

pub fn constructor(owner: &str, instructions: Vec<Instruction>) -> MethodDefinition {
    let mut m = with_body(method(owner, ".ctor", VOID, &[]), instructions);
    m.is_constructor = true;
    m
}

pub fn method_ref(owner: &str, name: &str, return_type: &str, parameters: &[&str]) -> MethodReference {
    MethodReference::new(
        ty(owner),
        name,
        ty(return_type),
        parameters.iter().map(|p| ty(p)).collect(),
    )
}

pub fn call(owner: &str, name: &str, return_type: &str, parameters: &[&str]) -> Instruction {
    Instruction::new(
        OpCode::Call,
        Some(Operand::Method(method_ref(owner, name, return_type, parameters))),
    )
}

pub fn newobj(owner: &str, parameters: &[&str]) -> Instruction {
    Instruction::new(
        OpCode::Newobj,
        Some(Operand::Method(method_ref(owner, ".ctor", VOID, parameters))),
    )
}

pub fn load_field(owner: &str, name: &str, field_type: &str) -> Instruction {
    Instruction::new(
        OpCode::Ldfld,
        Some(Operand::Field(FieldReference::new(ty(owner), name, ty(field_type)))),
    )
}

pub fn store_field(owner: &str, name: &str, field_type: &str) -> Instruction {
    Instruction::new(
        OpCode::Stfld,
        Some(Operand::Field(FieldReference::new(ty(owner), name, ty(field_type)))),
    )
}

pub fn type_op(opcode: OpCode, type_name: &str) -> Instruction {
    Instruction::new(opcode, Some(Operand::Type(ty(type_name))))
}

pub fn ret() -> Instruction {
    Instruction::new(OpCode::Ret, None)
}
