//! Container marshalling: linked lists, hash tables, and the four array kinds.
//!
//! Generic containers (lists, hash tables, pointer arrays) hold one machine
//! word per element; typed arrays (C arrays, dynamic arrays) hold elements of
//! their native type. Element conversion comes in both flavours.
//!
//! Only string elements are copied on the way in. Unless the callee takes
//! full ownership, the container and the copies are released when the
//! wrapper returns.

use girgen_core::{ArrayInfo, ArrayType, EntityKind, Transfer, TypeInfo, TypeTag};

use super::code::Code;
use super::marshal::{Input, Output, Sink, heap_copy};
use crate::resolve::{
    TagClass, array_info, classify, container_stores_pointer, element, element_host, entity,
    resolve_host, resolve_native,
};
use crate::{Error, GenContext, Result};

/// Whether storing the element allocates a copy the container points to.
fn is_copied(elem: &TypeInfo) -> bool {
    classify(elem.tag) == TagClass::String
}

/// Indexable spelling of a host place: `*x` becomes `(*x)`.
fn indexable(target: &str) -> String {
    if target.starts_with('*') {
        format!("({target})")
    } else {
        target.to_string()
    }
}

/// Host value `v` boxed into a gpointer slot.
fn word_in(elem: &TypeInfo, v: &str) -> Result<String> {
    let word = match classify(elem.tag) {
        TagClass::Void if elem.is_pointer => format!("C.gpointer({v})"),
        TagClass::Basic | TagClass::TypeHandle => match elem.tag {
            TypeTag::Float => format!("C.gpointer(unsafe.Pointer(uintptr(math.Float32bits({v}))))"),
            TypeTag::Double => {
                format!("C.gpointer(unsafe.Pointer(uintptr(math.Float64bits({v}))))")
            }
            _ => format!("C.gpointer(unsafe.Pointer(uintptr({v})))"),
        },
        TagClass::Boolean => format!("C.gpointer(unsafe.Pointer(uintptr(toGboolean({v}))))"),
        TagClass::String => format!("C.gpointer(unsafe.Pointer(C.CString({v})))"),
        TagClass::Named => match entity(elem)?.kind {
            EntityKind::Enum => format!("C.gpointer(unsafe.Pointer(uintptr({v})))"),
            _ => format!("C.gpointer({v}.Native())"),
        },
        _ => return Err(Error::unsupported("container element", elem)),
    };
    Ok(word)
}

/// Host value unboxed from the gpointer expression `w`.
fn word_out(ctx: &GenContext, elem: &TypeInfo, w: &str) -> Result<String> {
    let value = match classify(elem.tag) {
        TagClass::Void if elem.is_pointer => format!("unsafe.Pointer({w})"),
        TagClass::Basic | TagClass::TypeHandle => match elem.tag {
            TypeTag::Float => format!("math.Float32frombits(uint32(uintptr({w})))"),
            TypeTag::Double => format!("math.Float64frombits(uint64(uintptr({w})))"),
            _ => format!("{}(uintptr({w}))", resolve_host(ctx, &elem.clone().by_value(), false)?),
        },
        TagClass::Boolean => format!("uintptr({w}) != 0"),
        TagClass::String => format!("C.GoString((*C.char)({w}))"),
        TagClass::Named => {
            let entity = entity(elem)?;
            match entity.kind {
                EntityKind::Enum => format!("{}(uintptr({w}))", element_host(ctx, elem)?),
                _ => format!("{}(unsafe.Pointer({w}))", ctx.wrap_fn(entity)),
            }
        }
        _ => return Err(Error::unsupported("container element", elem)),
    };
    Ok(value)
}

/// Host value `v` converted to the element's native type.
fn value_in(elem: &TypeInfo, v: &str) -> Result<String> {
    let native = resolve_native(elem)?;
    let value = match classify(elem.tag) {
        TagClass::Void if elem.is_pointer => format!("C.gpointer({v})"),
        TagClass::Basic | TagClass::TypeHandle if !elem.is_pointer => format!("{native}({v})"),
        TagClass::Boolean if !elem.is_pointer => format!("toGboolean({v})"),
        TagClass::String => format!("(*C.gchar)(unsafe.Pointer(C.CString({v})))"),
        TagClass::Named => match entity(elem)?.kind {
            EntityKind::Enum if !elem.is_pointer => format!("{native}({v})"),
            EntityKind::Enum => return Err(Error::unsupported("array element", elem)),
            _ if elem.is_pointer => format!("({native})({v}.Native())"),
            _ => format!("*(*{native})({v}.Native())"),
        },
        _ => return Err(Error::unsupported("array element", elem)),
    };
    Ok(value)
}

/// Host value of the native element held in `v`.
fn value_out(ctx: &GenContext, elem: &TypeInfo, v: &str) -> Result<String> {
    let value = match classify(elem.tag) {
        TagClass::Void if elem.is_pointer => format!("unsafe.Pointer({v})"),
        TagClass::Basic | TagClass::TypeHandle if !elem.is_pointer => {
            format!("{}({v})", resolve_host(ctx, elem, false)?)
        }
        TagClass::Boolean if !elem.is_pointer => format!("{v} != C.FALSE"),
        TagClass::String => format!("C.GoString((*C.char)(unsafe.Pointer({v})))"),
        TagClass::Named => {
            let entity = entity(elem)?;
            match entity.kind {
                EntityKind::Enum if !elem.is_pointer => {
                    format!("{}({v})", resolve_host(ctx, elem, false)?)
                }
                EntityKind::Enum => return Err(Error::unsupported("array element", elem)),
                _ if elem.is_pointer => format!("{}(unsafe.Pointer({v}))", ctx.wrap_fn(entity)),
                EntityKind::Struct | EntityKind::Union => format!("*{}", heap_copy(ctx, elem, v)?),
                EntityKind::Object | EntityKind::Interface => {
                    return Err(Error::unsupported("array element", elem));
                }
            }
        }
        _ => return Err(Error::unsupported("array element", elem)),
    };
    Ok(value)
}

pub(crate) fn list_input(
    sink: &mut Sink<'_>,
    ty: &TypeInfo,
    input: &Input<'_>,
) -> Result<()> {
    let elem = element(ty, 0)?;
    let (real, host) = (input.real, input.host);
    let prefix = list_prefix(ty.tag);
    let val = format!("{real}_val");
    sink.code
        .line(format!("var {real} {}", resolve_native(ty)?))
        .open(format!("for _, {val} := range {host}"))
        .line(format!(
            "{real} = C.{prefix}_prepend({real}, {})",
            word_in(elem, &val)?
        ))
        .close()
        .line(format!("{real} = C.{prefix}_reverse({real})"));

    if input.transfer != Transfer::Full {
        if is_copied(elem) {
            let node = format!("{real}_l");
            sink.release
                .open(format!(
                    "for {node} := {real}; {node} != nil; {node} = {node}.next"
                ))
                .line(format!("C.free(unsafe.Pointer({node}.data))"))
                .close();
        }
        sink.release.line(format!("C.{prefix}_free({real})"));
    }
    Ok(())
}

pub(crate) fn list_output(
    ctx: &GenContext,
    code: &mut Code,
    ty: &TypeInfo,
    out: &Output<'_>,
) -> Result<()> {
    let elem = element(ty, 0)?;
    let (real, target) = (out.real, out.target);
    let node = format!("{real}_l");
    code.line(format!("{target} = nil")).open(format!(
        "for {node} := {real}; {node} != nil; {node} = {node}.next"
    ));
    code.line(format!(
        "{target} = append({target}, {})",
        word_out(ctx, elem, &format!("{node}.data"))?
    ));
    if out.transfer == Transfer::Full && is_copied(elem) {
        code.line(format!("C.g_free({node}.data)"));
    }
    code.close();
    if out.transfer != Transfer::None {
        code.line(format!("C.{}_free({real})", list_prefix(ty.tag)));
    }
    Ok(())
}

fn list_prefix(tag: TypeTag) -> &'static str {
    match tag {
        TypeTag::GSList => "g_slist",
        _ => "g_list",
    }
}

/// Hash table iteration over `real`, binding `<real>_k` and `<real>_v`.
fn open_hash_walk(code: &mut Code, real: &str) {
    code.line(format!("var {real}_iter C.GHashTableIter"))
        .line(format!("var {real}_k, {real}_v C.gpointer"))
        .line(format!("C.g_hash_table_iter_init(&{real}_iter, {real})"))
        .open(format!(
            "for C.g_hash_table_iter_next(&{real}_iter, &{real}_k, &{real}_v) != C.FALSE"
        ));
}

pub(crate) fn hash_input(
    sink: &mut Sink<'_>,
    ty: &TypeInfo,
    input: &Input<'_>,
) -> Result<()> {
    let key = element(ty, 0)?;
    let value = element(ty, 1)?;
    let (real, host) = (input.real, input.host);
    let table = if is_copied(key) {
        "C.girgen_str_hash_table_new()"
    } else {
        "C.g_hash_table_new(nil, nil)"
    };
    let (k, v) = (format!("{real}_key"), format!("{real}_val"));
    sink.code
        .line(format!("{real} := {table}"))
        .open(format!("for {k}, {v} := range {host}"))
        .line(format!(
            "C.g_hash_table_insert({real}, {}, {})",
            word_in(key, &k)?,
            word_in(value, &v)?
        ))
        .close();

    if input.transfer != Transfer::Full {
        if is_copied(key) || is_copied(value) {
            open_hash_walk(sink.release, real);
            if is_copied(key) {
                sink.release
                    .line(format!("C.free(unsafe.Pointer({real}_k))"));
            }
            if is_copied(value) {
                sink.release
                    .line(format!("C.free(unsafe.Pointer({real}_v))"));
            }
            sink.release.close();
        }
        sink.release.line(format!("C.g_hash_table_unref({real})"));
    }
    Ok(())
}

pub(crate) fn hash_output(
    ctx: &GenContext,
    code: &mut Code,
    ty: &TypeInfo,
    out: &Output<'_>,
) -> Result<()> {
    let key = element(ty, 0)?;
    let value = element(ty, 1)?;
    let (real, target) = (out.real, out.target);
    code.line(format!("{target} = make({})", resolve_host(ctx, ty, false)?))
        .open(format!("if {real} != nil"));
    open_hash_walk(code, real);
    code.line(format!(
        "{}[{}] = {}",
        indexable(target),
        word_out(ctx, key, &format!("{real}_k"))?,
        word_out(ctx, value, &format!("{real}_v"))?
    ))
    .close();
    if out.transfer != Transfer::None {
        code.line(format!("C.g_hash_table_unref({real})"));
    }
    code.close();
    Ok(())
}

pub(crate) fn array_input(
    sink: &mut Sink<'_>,
    ty: &TypeInfo,
    input: &Input<'_>,
) -> Result<()> {
    let info = array_info(ty)?;
    let elem = element(ty, 0)?;
    let (real, host) = (input.real, input.host);
    let val = format!("{real}_val");
    let owned = input.transfer != Transfer::Full;
    match info.array_type {
        ArrayType::C => {
            let native = resolve_native(elem)?;
            let count = if info.zero_terminated {
                format!("len({host})+1")
            } else {
                format!("len({host})")
            };
            let view = format!("{real}_view");
            let index = format!("{real}_i");
            sink.code
                .line(format!(
                    "{real} := (*{native})(C.g_malloc0_n(C.gsize({count}), C.gsize(unsafe.Sizeof(*new({native})))))"
                ))
                .line(format!("{view} := unsafe.Slice({real}, {count})"))
                .open(format!("for {index}, {val} := range {host}"))
                .line(format!("{view}[{index}] = {}", value_in(elem, &val)?))
                .close();
            if owned {
                release_copies(sink.release, elem, real, &view, "C.free");
                sink.release
                    .line(format!("C.g_free(C.gpointer(unsafe.Pointer({real})))"));
            }
        }
        ArrayType::Array => {
            let native = resolve_native(elem)?;
            let zero_terminated = if info.zero_terminated { "TRUE" } else { "FALSE" };
            let item = format!("{real}_elem");
            sink.code
                .line(format!(
                    "{real} := C.g_array_sized_new(C.gboolean(C.{zero_terminated}), C.gboolean(C.TRUE), C.guint(unsafe.Sizeof(*new({native}))), C.guint(len({host})))"
                ))
                .open(format!("for _, {val} := range {host}"))
                .line(format!("{item} := {}", value_in(elem, &val)?))
                .line(format!(
                    "C.g_array_append_vals({real}, C.gconstpointer(unsafe.Pointer(&{item})), 1)"
                ))
                .close();
            if owned {
                let view = format!("unsafe.Slice((*{native})(unsafe.Pointer({real}.data)), int({real}.len))");
                release_copies(sink.release, elem, real, &view, "C.free");
                sink.release
                    .line(format!("C.g_array_free({real}, C.gboolean(C.TRUE))"));
            }
        }
        ArrayType::PtrArray => {
            sink.code
                .line(format!("{real} := C.g_ptr_array_sized_new(C.guint(len({host})))"))
                .open(format!("for _, {val} := range {host}"))
                .line(format!(
                    "C.g_ptr_array_add({real}, {})",
                    word_in(elem, &format!("(*{val})"))?
                ))
                .close();
            if owned {
                let view = format!("unsafe.Slice({real}.pdata, int({real}.len))");
                release_copies(sink.release, elem, real, &view, "C.free");
                sink.release
                    .line(format!("C.g_ptr_array_free({real}, C.gboolean(C.TRUE))"));
            }
        }
        ArrayType::ByteArray => {
            sink.code
                .line(format!("{real} := C.g_byte_array_sized_new(C.guint(len({host})))"))
                .open(format!("if len({host}) > 0"))
                .line(format!(
                    "C.g_byte_array_append({real}, (*C.guint8)(unsafe.Pointer(&{host}[0])), C.guint(len({host})))"
                ))
                .close();
            if owned {
                sink.release.line(format!("C.g_byte_array_unref({real})"));
            }
        }
    }
    Ok(())
}

/// Frees every copied element of the slice expression `view`.
fn release_copies(
    release: &mut Code,
    elem: &TypeInfo,
    real: &str,
    view: &str,
    free: &str,
) {
    if !is_copied(elem) {
        return;
    }
    let item = format!("{real}_e");
    release
        .open(format!("for _, {item} := range {view}"))
        .line(format!("{free}(unsafe.Pointer({item}))"))
        .close();
}

pub(crate) fn array_output(
    ctx: &GenContext,
    code: &mut Code,
    ty: &TypeInfo,
    out: &Output<'_>,
) -> Result<()> {
    let info = array_info(ty)?;
    let elem = element(ty, 0)?;
    let (real, target) = (out.real, out.target);
    let item = format!("{real}_e");
    let free_items = out.transfer == Transfer::Full && is_copied(elem);
    let free_array = out.transfer != Transfer::None;
    match info.array_type {
        ArrayType::C => {
            let native = resolve_native(elem)?;
            let count = c_array_length(code, elem, &native, info, out)?;
            let index = format!("{real}_i");
            code.line(format!(
                "{target} = make({}, {count})",
                resolve_host(ctx, ty, false)?
            ))
            .open(format!("if {real} != nil"))
            .open(format!(
                "for {index}, {item} := range unsafe.Slice({real}, {count})"
            ))
            .line(format!(
                "{}[{index}] = {}",
                indexable(target),
                value_out(ctx, elem, &item)?
            ));
            if free_items {
                code.line(format!("C.g_free(C.gpointer(unsafe.Pointer({item})))"));
            }
            code.close();
            if free_array {
                code.line(format!("C.g_free(C.gpointer(unsafe.Pointer({real})))"));
            }
            code.close();
        }
        ArrayType::Array => {
            let native = resolve_native(elem)?;
            code.line(format!("{target} = nil"))
                .open(format!("if {real} != nil"))
                .open(format!(
                    "for _, {item} := range unsafe.Slice((*{native})(unsafe.Pointer({real}.data)), int({real}.len))"
                ))
                .line(format!(
                    "{target} = append({target}, {})",
                    value_out(ctx, elem, &item)?
                ));
            if free_items {
                code.line(format!("C.g_free(C.gpointer(unsafe.Pointer({item})))"));
            }
            code.close();
            if free_array {
                code.line(format!("C.g_array_free({real}, C.gboolean(C.TRUE))"));
            }
            code.close();
        }
        ArrayType::PtrArray => {
            code.line(format!("{target} = nil"))
                .open(format!("if {real} != nil"))
                .open(format!(
                    "for _, {item} := range unsafe.Slice({real}.pdata, int({real}.len))"
                ));
            // Wrapped handles already are pointers; other values get a fresh slot.
            if container_stores_pointer(elem) {
                code.line(format!(
                    "{target} = append({target}, {})",
                    word_out(ctx, elem, &item)?
                ));
            } else {
                let slot = format!("{item}_v");
                code.line(format!("{slot} := {}", word_out(ctx, elem, &item)?))
                    .line(format!("{target} = append({target}, &{slot})"));
            }
            code.close();
            if free_array {
                code.line(format!("C.g_ptr_array_unref({real})"));
            }
            code.close();
        }
        ArrayType::ByteArray => {
            code.line(format!("{target} = nil"))
                .open(format!("if {real} != nil"))
                .line(format!(
                    "{target} = C.GoBytes(unsafe.Pointer({real}.data), C.int({real}.len))"
                ));
            if free_array {
                code.line(format!("C.g_byte_array_unref({real})"));
            }
            code.close();
        }
    }
    Ok(())
}

/// Element count expression of an output C array, emitting a terminator
/// walk when the array carries nothing better.
fn c_array_length(
    code: &mut Code,
    elem: &TypeInfo,
    native: &str,
    info: &ArrayInfo,
    out: &Output<'_>,
) -> Result<String> {
    if let Some(size) = info.fixed_size {
        return Ok(size.to_string());
    }
    if let Some(length) = out.length {
        return Ok(format!("int({length})"));
    }
    if !info.zero_terminated {
        return Err(Error::UnboundedArray {
            name: out.target.trim_start_matches('*').to_string(),
        });
    }
    let zero = terminator(elem, native)?;
    let real = out.real;
    let (count, cursor) = (format!("{real}_n"), format!("{real}_p"));
    code.line(format!("{count} := 0"))
        .open(format!(
            "for {cursor} := {real}; {cursor} != nil && *{cursor} != {zero}; {count}++"
        ))
        .line(format!(
            "{cursor} = (*{native})(unsafe.Add(unsafe.Pointer({cursor}), unsafe.Sizeof(*{cursor})))"
        ))
        .close();
    Ok(count)
}

/// Zero value ending a terminated array of `native` elements.
fn terminator(elem: &TypeInfo, native: &str) -> Result<&'static str> {
    if native.starts_with('*') || native == "C.gpointer" {
        return Ok("nil");
    }
    match classify(elem.tag) {
        TagClass::Basic | TagClass::Boolean | TagClass::TypeHandle => Ok("0"),
        TagClass::Named if entity(elem)?.kind == EntityKind::Enum => Ok("0"),
        _ => Err(Error::unsupported("terminated array element", elem)),
    }
}
