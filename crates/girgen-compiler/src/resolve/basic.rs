//! Primitive type table.
//!
//! Every [`TypeTag`] belongs to exactly one [`TagClass`]. Plain numeric tags
//! have a native and a host spelling in the table; boolean, the type handle,
//! and void are handled by explicit rules in the resolver because their host
//! form is not a plain renaming of the native one.

use girgen_core::TypeTag;

/// Coarse class of a tag; decides which resolver and marshalling rule applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagClass {
    Void,
    /// Numeric scalar with a direct host counterpart.
    Basic,
    Boolean,
    TypeHandle,
    String,
    Array,
    Named,
    List,
    Hash,
    Error,
}

pub fn classify(tag: TypeTag) -> TagClass {
    match tag {
        TypeTag::Void => TagClass::Void,
        TypeTag::Int8
        | TypeTag::UInt8
        | TypeTag::Int16
        | TypeTag::UInt16
        | TypeTag::Int32
        | TypeTag::UInt32
        | TypeTag::Int64
        | TypeTag::UInt64
        | TypeTag::Float
        | TypeTag::Double
        | TypeTag::Unichar => TagClass::Basic,
        TypeTag::Boolean => TagClass::Boolean,
        TypeTag::GType => TagClass::TypeHandle,
        TypeTag::Utf8 | TypeTag::Filename => TagClass::String,
        TypeTag::Array => TagClass::Array,
        TypeTag::Interface => TagClass::Named,
        TypeTag::GList | TypeTag::GSList => TagClass::List,
        TypeTag::GHash => TagClass::Hash,
        TypeTag::Error => TagClass::Error,
    }
}

/// Native spelling of a primitive tag.
///
/// Covers the numeric tags plus the type handle and the untyped pointer.
pub fn native_name(tag: TypeTag) -> Option<&'static str> {
    let name = match tag {
        TypeTag::Void => "C.gpointer",
        TypeTag::Boolean => "C.gboolean",
        TypeTag::Int8 => "C.gint8",
        TypeTag::UInt8 => "C.guint8",
        TypeTag::Int16 => "C.gint16",
        TypeTag::UInt16 => "C.guint16",
        TypeTag::Int32 => "C.gint32",
        TypeTag::UInt32 => "C.guint32",
        TypeTag::Int64 => "C.gint64",
        TypeTag::UInt64 => "C.guint64",
        TypeTag::Float => "C.gfloat",
        TypeTag::Double => "C.gdouble",
        TypeTag::GType => "C.GType",
        TypeTag::Unichar => "C.gunichar",
        _ => return None,
    };
    Some(name)
}

/// Host spelling of a numeric tag.
///
/// Boolean, the type handle, and void are deliberately absent.
pub fn host_name(tag: TypeTag) -> Option<&'static str> {
    let name = match tag {
        TypeTag::Int8 => "int8",
        TypeTag::UInt8 => "uint8",
        TypeTag::Int16 => "int16",
        TypeTag::UInt16 => "uint16",
        TypeTag::Int32 => "int32",
        TypeTag::UInt32 => "uint32",
        TypeTag::Int64 => "int64",
        TypeTag::UInt64 => "uint64",
        TypeTag::Float => "float32",
        TypeTag::Double => "float64",
        TypeTag::Unichar => "rune",
        _ => return None,
    };
    Some(name)
}
