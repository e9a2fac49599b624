//! Descriptor to type-token resolution.
//!
//! Two independent views of one descriptor: the native token names the cgo
//! type that crosses the call boundary, the host token names the Go type the
//! caller sees. Both are pure functions of the descriptor and the context.

use girgen_core::{ArrayInfo, ArrayType, EntityKind, EntityRef, TypeInfo, TypeTag};

use super::basic::{TagClass, classify, host_name, native_name};
use crate::{Error, GenContext, Result};

/// Structural check of a descriptor tree, reporting the innermost
/// defective descriptor.
pub fn check_shape(ty: &TypeInfo) -> Result<()> {
    ty.params.iter().try_for_each(check_shape)?;
    match ty.shape_error() {
        None => Ok(()),
        Some("array without array info") => Err(Error::MissingArrayInfo { ty: ty.to_string() }),
        Some(reason) => Err(Error::MalformedType {
            ty: ty.to_string(),
            reason,
        }),
    }
}

pub(crate) fn entity(ty: &TypeInfo) -> Result<&EntityRef> {
    ty.interface.as_ref().ok_or_else(|| Error::MalformedType {
        ty: ty.to_string(),
        reason: "named type without entity reference",
    })
}

pub(crate) fn array_info(ty: &TypeInfo) -> Result<&ArrayInfo> {
    ty.array
        .as_ref()
        .ok_or_else(|| Error::MissingArrayInfo { ty: ty.to_string() })
}

pub(crate) fn element(ty: &TypeInfo, index: usize) -> Result<&TypeInfo> {
    ty.param(index).ok_or_else(|| Error::MalformedType {
        ty: ty.to_string(),
        reason: "wrong number of element types",
    })
}

fn marker(ty: &TypeInfo) -> &'static str {
    if ty.is_pointer { "*" } else { "" }
}

fn table_native(ty: &TypeInfo) -> Result<&'static str> {
    native_name(ty.tag).ok_or_else(|| Error::unsupported("native type", ty))
}

/// Native (cgo) spelling of a descriptor. Void without indirection is empty.
pub fn resolve_native(ty: &TypeInfo) -> Result<String> {
    check_shape(ty)?;
    let native = match classify(ty.tag) {
        TagClass::Void => {
            if ty.is_pointer {
                "C.gpointer".to_string()
            } else {
                String::new()
            }
        }
        TagClass::Basic | TagClass::Boolean | TagClass::TypeHandle => {
            format!("{}{}", marker(ty), table_native(ty)?)
        }
        TagClass::String => "*C.gchar".to_string(),
        TagClass::Array => match array_info(ty)?.array_type {
            ArrayType::C => {
                let elem = resolve_native(element(ty, 0)?)?;
                if elem.is_empty() {
                    return Err(Error::unsupported("array element", ty));
                }
                format!("*{elem}")
            }
            ArrayType::Array => "*C.GArray".to_string(),
            ArrayType::PtrArray => "*C.GPtrArray".to_string(),
            ArrayType::ByteArray => "*C.GByteArray".to_string(),
        },
        TagClass::Named => format!("{}C.{}", marker(ty), entity(ty)?.c_type()),
        TagClass::List => match ty.tag {
            TypeTag::GSList => "*C.GSList".to_string(),
            _ => "*C.GList".to_string(),
        },
        TagClass::Hash => "*C.GHashTable".to_string(),
        TagClass::Error => "*C.GError".to_string(),
    };
    tracing::trace!(ty = %ty, native = %native, "resolved native type");
    Ok(native)
}

/// Host (Go) spelling of a descriptor.
///
/// In argument position an object is accepted through its mirroring
/// interface `I<Name>`, so any subclass can be passed.
pub fn resolve_host(ctx: &GenContext, ty: &TypeInfo, is_arg: bool) -> Result<String> {
    check_shape(ty)?;
    let host = match classify(ty.tag) {
        TagClass::Void => {
            if ty.is_pointer {
                "unsafe.Pointer".to_string()
            } else {
                String::new()
            }
        }
        TagClass::Basic => {
            let name = host_name(ty.tag).ok_or_else(|| Error::unsupported("host type", ty))?;
            format!("{}{name}", marker(ty))
        }
        TagClass::Boolean => format!("{}bool", marker(ty)),
        TagClass::TypeHandle => format!("{}{}", marker(ty), ctx.qualify("GObject", "GType")),
        TagClass::String => "string".to_string(),
        TagClass::Array => {
            let elem = element(ty, 0)?;
            match array_info(ty)?.array_type {
                ArrayType::C | ArrayType::Array => {
                    format!("[]{}", resolve_host(ctx, elem, false)?)
                }
                ArrayType::PtrArray => format!("[]{}", pointer_slot_host(ctx, elem)?),
                ArrayType::ByteArray => "[]byte".to_string(),
            }
        }
        TagClass::Named => named_host(ctx, entity(ty)?, ty.is_pointer, is_arg),
        TagClass::List => format!("[]{}", element_host(ctx, element(ty, 0)?)?),
        TagClass::Hash => format!(
            "map[{}]{}",
            element_host(ctx, element(ty, 0)?)?,
            element_host(ctx, element(ty, 1)?)?
        ),
        TagClass::Error => "error".to_string(),
    };
    tracing::trace!(ty = %ty, host = %host, is_arg, "resolved host type");
    Ok(host)
}

/// Host spelling of an element stored in a generic container.
///
/// Indirection is decided only by [`container_stores_pointer`], never by the
/// element descriptor's own pointer flag.
pub fn element_host(ctx: &GenContext, elem: &TypeInfo) -> Result<String> {
    if classify(elem.tag) != TagClass::Named {
        return resolve_host(ctx, elem, false);
    }
    let base = named_host(ctx, entity(elem)?, false, false);
    if container_stores_pointer(elem) {
        Ok(format!("*{base}"))
    } else {
        Ok(base)
    }
}

/// Host spelling of a pointer array slot: always one indirection over the
/// element's value type.
pub fn pointer_slot_host(ctx: &GenContext, elem: &TypeInfo) -> Result<String> {
    Ok(format!("*{}", resolve_host(ctx, &elem.clone().by_value(), false)?))
}

/// Whether a container element is held through a host pointer.
///
/// True for objects, structs, and unions. Enums are stored by value and
/// interfaces are already reference-like.
pub fn container_stores_pointer(elem: &TypeInfo) -> bool {
    match elem.entity_kind() {
        Some(EntityKind::Object | EntityKind::Struct | EntityKind::Union) => true,
        Some(EntityKind::Enum | EntityKind::Interface) | None => false,
    }
}

fn named_host(ctx: &GenContext, entity: &EntityRef, is_pointer: bool, is_arg: bool) -> String {
    let (name, reference_like) = match entity.kind {
        EntityKind::Object if is_arg => (format!("I{}", entity.name), true),
        EntityKind::Interface => (entity.name.clone(), true),
        _ => (entity.name.clone(), false),
    };
    let qualified = ctx.qualify(&entity.namespace, &name);
    if is_pointer && !reference_like {
        format!("*{qualified}")
    } else {
        qualified
    }
}
