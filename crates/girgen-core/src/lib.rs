#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Introspection data model for girgen.
//!
//! - [`TypeInfo`]: descriptor of one type occurrence
//! - [`Namespace`]: entity tables of one library, loaded from JSON
//! - [`utils`]: naming rules shared with the generator

pub mod colors;
mod entity;
mod namespace;
mod types;
pub mod utils;

pub use colors::Colors;
pub use entity::{
    ArgInfo, ConstantInfo, ConstantValue, Direction, EnumInfo, FieldInfo, FunctionFlags,
    FunctionInfo, InterfaceInfo, Named, ObjectInfo, PropertyInfo, SignalInfo, StructInfo,
    Transfer, UnionInfo, VFuncInfo, ValueInfo,
};
pub use namespace::{Entity, ModelError, Namespace};
pub use types::{ArrayInfo, ArrayType, EntityKind, EntityRef, TypeInfo, TypeTag};
