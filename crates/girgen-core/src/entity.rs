//! Registered types and their callables.
//!
//! Every entity is keyed by its name inside a [`Namespace`](crate::Namespace).
//! Relations to other entities (parents, implemented interfaces, prerequisites)
//! are stored as [`EntityRef`] handles, so cycles in the data never turn into
//! cycles in ownership.

use serde::{Deserialize, Serialize};

use crate::types::{EntityRef, TypeInfo, TypeTag};

/// Entities stored by name in a namespace table.
pub trait Named {
    fn name(&self) -> &str;
}

/// Data flow direction of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    In,
    Out,
    InOut,
}

/// Ownership transferred across the call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transfer {
    /// The callee keeps ownership of everything.
    #[default]
    None,
    /// Only the container changes hands; elements stay with the previous owner.
    Container,
    /// The container and its elements change hands.
    Full,
}

/// One parameter of a callable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInfo,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub transfer: Transfer,
    /// Null is an accepted value.
    #[serde(default)]
    pub nullable: bool,
    /// For out parameters: the caller provides the storage.
    #[serde(default)]
    pub caller_allocates: bool,
    /// For out parameters: null may be passed to discard the value.
    #[serde(default)]
    pub optional: bool,
    /// Not exposed in the host signature.
    #[serde(default)]
    pub skip: bool,
}

impl ArgInfo {
    pub fn new(name: impl Into<String>, ty: TypeInfo) -> Self {
        Self {
            name: name.into(),
            ty,
            direction: Direction::In,
            transfer: Transfer::None,
            nullable: false,
            caller_allocates: false,
            optional: false,
            skip: false,
        }
    }

    pub fn out(mut self) -> Self {
        self.direction = Direction::Out;
        self
    }

    pub fn inout(mut self) -> Self {
        self.direction = Direction::InOut;
        self
    }

    pub fn transfer(mut self, transfer: Transfer) -> Self {
        self.transfer = transfer;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Role flags of a callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionFlags {
    /// Takes the owning entity as an implicit first parameter.
    #[serde(default)]
    pub is_method: bool,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub is_getter: bool,
    #[serde(default)]
    pub is_setter: bool,
    #[serde(default)]
    pub wraps_vfunc: bool,
    /// Reports failure through a trailing `GError **` parameter.
    #[serde(default)]
    pub throws: bool,
}

fn void_type() -> TypeInfo {
    TypeInfo::new(TypeTag::Void)
}

/// A native function: a namespace function, a method, or a constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    /// Exported C symbol.
    pub symbol: String,
    #[serde(default)]
    pub flags: FunctionFlags,
    #[serde(default)]
    pub args: Vec<ArgInfo>,
    #[serde(default = "void_type")]
    pub return_type: TypeInfo,
    #[serde(default)]
    pub return_transfer: Transfer,
    #[serde(default)]
    pub may_return_null: bool,
    /// The return value carries no information and is dropped.
    #[serde(default)]
    pub skip_return: bool,
    #[serde(default)]
    pub deprecated: bool,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            flags: FunctionFlags::default(),
            args: Vec::new(),
            return_type: void_type(),
            return_transfer: Transfer::None,
            may_return_null: false,
            skip_return: false,
            deprecated: false,
        }
    }

    pub fn method(mut self) -> Self {
        self.flags.is_method = true;
        self
    }

    pub fn constructor(mut self) -> Self {
        self.flags.is_constructor = true;
        self
    }

    pub fn throws(mut self) -> Self {
        self.flags.throws = true;
        self
    }

    pub fn arg(mut self, arg: ArgInfo) -> Self {
        self.args.push(arg);
        self
    }

    pub fn returns(mut self, ty: TypeInfo, transfer: Transfer) -> Self {
        self.return_type = ty;
        self.return_transfer = transfer;
        self
    }

    pub fn is_method(&self) -> bool {
        self.flags.is_method
    }
}

impl Named for FunctionInfo {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A signal. Modelled for inspection only; no host code is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalInfo {
    pub name: String,
    #[serde(default)]
    pub args: Vec<ArgInfo>,
    #[serde(default = "void_type")]
    pub return_type: TypeInfo,
    #[serde(default)]
    pub deprecated: bool,
}

/// A virtual function slot. Modelled for inspection only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VFuncInfo {
    pub name: String,
    #[serde(default)]
    pub args: Vec<ArgInfo>,
    #[serde(default = "void_type")]
    pub return_type: TypeInfo,
    /// Method that invokes this slot, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInfo,
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default)]
    pub writable: bool,
}

/// A field of a struct, union, or object instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInfo,
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default)]
    pub writable: bool,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, ty: TypeInfo) -> Self {
        Self {
            name: name.into(),
            ty,
            readable: true,
            writable: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Literal value of a constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInfo,
    pub value: ConstantValue,
    #[serde(default)]
    pub deprecated: bool,
}

impl Named for ConstantInfo {
    fn name(&self) -> &str {
        &self.name
    }
}

/// One member of an enumeration or flags set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueInfo {
    pub name: String,
    pub value: i64,
    /// Native constant name; derived from the namespace when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_identifier: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

impl ValueInfo {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            c_identifier: None,
            deprecated: false,
        }
    }
}

fn default_storage() -> TypeTag {
    TypeTag::Int32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumInfo {
    pub name: String,
    /// Integer tag of the underlying storage.
    #[serde(default = "default_storage")]
    pub storage: TypeTag,
    #[serde(default)]
    pub is_flags: bool,
    pub values: Vec<ValueInfo>,
    #[serde(default)]
    pub methods: Vec<FunctionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_domain: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

impl EnumInfo {
    pub fn new(name: impl Into<String>, values: Vec<ValueInfo>) -> Self {
        Self {
            name: name.into(),
            storage: default_storage(),
            is_flags: false,
            values,
            methods: Vec::new(),
            error_domain: None,
            deprecated: false,
        }
    }
}

impl Named for EnumInfo {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterfaceInfo {
    pub name: String,
    /// Types every implementor must also be.
    #[serde(default)]
    pub prerequisites: Vec<EntityRef>,
    #[serde(default)]
    pub methods: Vec<FunctionInfo>,
    #[serde(default)]
    pub signals: Vec<SignalInfo>,
    #[serde(default)]
    pub vfuncs: Vec<VFuncInfo>,
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,
    #[serde(default)]
    pub constants: Vec<ConstantInfo>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Named for InterfaceInfo {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityRef>,
    #[serde(default)]
    pub interfaces: Vec<EntityRef>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub fields: Vec<FieldInfo>,
    #[serde(default)]
    pub methods: Vec<FunctionInfo>,
    #[serde(default)]
    pub signals: Vec<SignalInfo>,
    #[serde(default)]
    pub vfuncs: Vec<VFuncInfo>,
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,
    #[serde(default)]
    pub constants: Vec<ConstantInfo>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Named for ObjectInfo {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructInfo {
    pub name: String,
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub alignment: usize,
    /// Class or interface vtable of another entity.
    #[serde(default)]
    pub is_gtype_struct: bool,
    /// Opaque type owned by a foreign library.
    #[serde(default)]
    pub is_foreign: bool,
    #[serde(default)]
    pub fields: Vec<FieldInfo>,
    #[serde(default)]
    pub methods: Vec<FunctionInfo>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Named for StructInfo {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnionInfo {
    pub name: String,
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub alignment: usize,
    #[serde(default)]
    pub fields: Vec<FieldInfo>,
    #[serde(default)]
    pub methods: Vec<FunctionInfo>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Named for UnionInfo {
    fn name(&self) -> &str {
        &self.name
    }
}
