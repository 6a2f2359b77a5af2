//! Decoded metadata: the contract between a bytecode reader and the dependency extractor.
//!
//! The reader resolves tokens into names and decodes each method body into an instruction
//! list. Nothing here is interpreted beyond the symbol operand of each instruction.
//!
//! **Full-name conventions**: types are `Ns.Name`; fields and properties are
//! `Ns.Name::member`; methods are `Ns.Name::member(ParamType1,ParamType2)`. The helper
//! constructors below produce these, so callers building fixtures by hand stay consistent
//! with what the extractor matches against.

use serde::{Deserialize, Serialize};

/// Root of a serialized metadata file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataSet {
    #[serde(default)]
    pub assemblies: Vec<AssemblyMetadata>,
}

/// One analyzed unit (assembly) and the types it defines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssemblyMetadata {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

/// Type kind as declared in metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
    /// Stub types created for references outside the analyzed set.
    Unknown,
}

/// A reference to a type, possibly outside the analyzed set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,
}

impl TypeReference {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            assembly: None,
        }
    }

    pub fn in_assembly(full_name: impl Into<String>, assembly: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            assembly: Some(assembly.into()),
        }
    }

    /// Simple name: the last dotted segment, ignoring dots inside generic arguments.
    pub fn name(&self) -> &str {
        let (_, name) = split_namespace(&self.full_name);
        name
    }

    pub fn namespace(&self) -> &str {
        let (namespace, _) = split_namespace(&self.full_name);
        namespace
    }
}

fn split_namespace(full_name: &str) -> (&str, &str) {
    let head_end = full_name.find('<').unwrap_or(full_name.len());
    match full_name[..head_end].rfind('.') {
        Some(dot) => (&full_name[..dot], &full_name[dot + 1..]),
        None => ("", full_name),
    }
}

/// Builds `Ns.Type::member`.
pub fn member_full_name(declaring_type: &str, name: &str) -> String {
    format!("{}::{}", declaring_type, name)
}

/// Builds `Ns.Type::method(P1,P2)`.
pub fn method_full_name(declaring_type: &str, name: &str, parameters: &[TypeReference]) -> String {
    let params: Vec<&str> = parameters.iter().map(|p| p.full_name.as_str()).collect();
    format!("{}::{}({})", declaring_type, name, params.join(","))
}

/// A resolved reference to a method; the operand of call-like instructions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodReference {
    pub declaring_type: TypeReference,
    pub name: String,
    pub full_name: String,
    pub return_type: TypeReference,
    #[serde(default)]
    pub parameters: Vec<TypeReference>,
}

impl MethodReference {
    pub fn new(
        declaring_type: TypeReference,
        name: impl Into<String>,
        return_type: TypeReference,
        parameters: Vec<TypeReference>,
    ) -> Self {
        let name = name.into();
        let full_name = method_full_name(&declaring_type.full_name, &name, &parameters);
        Self {
            declaring_type,
            name,
            full_name,
            return_type,
            parameters,
        }
    }
}

/// A resolved reference to a field; the operand of field load/store instructions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldReference {
    pub declaring_type: TypeReference,
    pub name: String,
    pub full_name: String,
    pub field_type: TypeReference,
}

impl FieldReference {
    pub fn new(declaring_type: TypeReference, name: impl Into<String>, field_type: TypeReference) -> Self {
        let name = name.into();
        let full_name = member_full_name(&declaring_type.full_name, &name);
        Self {
            declaring_type,
            name,
            full_name,
            field_type,
        }
    }
}

/// Symbol operand of an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operand {
    Type(TypeReference),
    Field(FieldReference),
    Method(MethodReference),
}

/// The subset of CIL opcodes the extractor distinguishes. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpCode {
    Call,
    Callvirt,
    Newobj,
    Ldftn,
    Ldvirtftn,
    Ldfld,
    Ldflda,
    Stfld,
    Ldsfld,
    Ldsflda,
    Stsfld,
    Box,
    Castclass,
    Isinst,
    Newarr,
    Ldtoken,
    Initobj,
    Ret,
    Other,
}

impl OpCode {
    /// Store discriminant: the instruction assigns to its field operand.
    pub fn is_store(self) -> bool {
        matches!(self, OpCode::Stfld | OpCode::Stsfld)
    }

    pub fn is_method_call(self) -> bool {
        matches!(self, OpCode::Call | OpCode::Callvirt | OpCode::Newobj)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: OpCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand: Option<Operand>,
}

impl Instruction {
    pub fn new(opcode: OpCode, operand: Option<Operand>) -> Self {
        Self { opcode, operand }
    }

    pub fn is_store(&self) -> bool {
        self.opcode.is_store()
    }

    pub fn is_method_call(&self) -> bool {
        self.opcode.is_method_call()
    }

    pub fn method_operand(&self) -> Option<&MethodReference> {
        match &self.operand {
            Some(Operand::Method(method)) => Some(method),
            _ => None,
        }
    }

    pub fn field_operand(&self) -> Option<&FieldReference> {
        match &self.operand {
            Some(Operand::Field(field)) => Some(field),
            _ => None,
        }
    }

    pub fn type_operand(&self) -> Option<&TypeReference> {
        match &self.operand {
            Some(Operand::Type(ty)) => Some(ty),
            _ => None,
        }
    }

    /// The field this instruction assigns to, if it is a field store.
    pub fn stored_field(&self) -> Option<&FieldReference> {
        if self.is_store() {
            self.field_operand()
        } else {
            None
        }
    }
}

/// Decoded body of a method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBody {
    #[serde(default)]
    pub local_variable_types: Vec<TypeReference>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

impl MethodBody {
    /// Types referenced inside the body: locals first, then type operands in instruction order.
    /// Repeated references are yielded once per occurrence.
    pub fn referenced_types(&self) -> impl Iterator<Item = &TypeReference> {
        self.local_variable_types
            .iter()
            .chain(self.instructions.iter().filter_map(Instruction::type_operand))
    }
}

/// How a method relates to its declaring type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodForm {
    /// Unknown, e.g. a stub created for an external call target.
    #[default]
    None,
    Normal,
    Constructor,
    Getter,
    Setter,
}

impl MethodForm {
    pub fn is_accessor(self) -> bool {
        matches!(self, MethodForm::Getter | MethodForm::Setter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub declaring_type: TypeReference,
    pub name: String,
    pub full_name: String,
    pub return_type: TypeReference,
    #[serde(default)]
    pub parameters: Vec<TypeReference>,
    #[serde(default)]
    pub generic_parameters: Vec<TypeReference>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub is_getter: bool,
    #[serde(default)]
    pub is_setter: bool,
    #[serde(default)]
    pub body: Option<MethodBody>,
}

impl MethodDefinition {
    pub fn new(
        declaring_type: TypeReference,
        name: impl Into<String>,
        return_type: TypeReference,
        parameters: Vec<TypeReference>,
    ) -> Self {
        let name = name.into();
        let full_name = method_full_name(&declaring_type.full_name, &name, &parameters);
        Self {
            declaring_type,
            name,
            full_name,
            return_type,
            parameters,
            generic_parameters: Vec::new(),
            visibility: Visibility::Public,
            is_constructor: false,
            is_getter: false,
            is_setter: false,
            body: None,
        }
    }

    /// Metadata flags take precedence in the order constructor, getter, setter.
    pub fn form(&self) -> MethodForm {
        if self.is_constructor {
            MethodForm::Constructor
        } else if self.is_getter {
            MethodForm::Getter
        } else if self.is_setter {
            MethodForm::Setter
        } else {
            MethodForm::Normal
        }
    }

    pub fn is_accessor(&self) -> bool {
        self.is_getter || self.is_setter
    }

    /// The reference form of this definition, as it appears in call operands.
    pub fn reference(&self) -> MethodReference {
        MethodReference {
            declaring_type: self.declaring_type.clone(),
            name: self.name.clone(),
            full_name: self.full_name.clone(),
            return_type: self.return_type.clone(),
            parameters: self.parameters.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub full_name: String,
    pub field_type: TypeReference,
    #[serde(default)]
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    pub full_name: String,
    pub property_type: TypeReference,
    #[serde(default)]
    pub visibility: Visibility,
    /// Full name of the getter method, if any.
    #[serde(default)]
    pub getter: Option<String>,
    /// Full name of the setter method, if any.
    #[serde(default)]
    pub setter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub full_name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

impl TypeDefinition {
    pub fn new(full_name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            full_name: full_name.into(),
            kind,
            visibility: Visibility::Public,
            fields: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn reference(&self) -> TypeReference {
        TypeReference::new(self.full_name.clone())
    }
}
