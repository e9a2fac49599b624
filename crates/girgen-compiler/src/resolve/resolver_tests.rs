use girgen_core::{ArrayInfo, ArrayType, EntityKind, EntityRef, TypeInfo, TypeTag};

use super::*;
use crate::test_utils::{basic, border, button, c_array, clickable, ctx, orientation};
use crate::{Error, GenContext};

fn host(ty: &TypeInfo) -> String {
    resolve_host(&ctx(), ty, false).unwrap()
}

fn host_arg(ty: &TypeInfo) -> String {
    resolve_host(&ctx(), ty, true).unwrap()
}

fn native(ty: &TypeInfo) -> String {
    resolve_native(ty).unwrap()
}

#[test]
fn void_resolves_to_nothing() {
    assert_eq!(native(&TypeInfo::void()), "");
    assert_eq!(host(&TypeInfo::void()), "");
    assert_eq!(native(&TypeInfo::void().pointer()), "C.gpointer");
    assert_eq!(host(&TypeInfo::void().pointer()), "unsafe.Pointer");
}

#[test]
fn scalars() {
    assert_eq!(native(&basic(TypeTag::Int32)), "C.gint32");
    assert_eq!(host(&basic(TypeTag::Int32)), "int32");
    assert_eq!(native(&basic(TypeTag::Boolean)), "C.gboolean");
    assert_eq!(host(&basic(TypeTag::Boolean)), "bool");
    assert_eq!(host(&basic(TypeTag::Float)), "float32");
    assert_eq!(native(&basic(TypeTag::UInt64).pointer()), "*C.guint64");
    assert_eq!(host(&basic(TypeTag::UInt64).pointer()), "*uint64");
}

#[test]
fn type_handle_is_qualified_outside_gobject() {
    let gtype = basic(TypeTag::GType);
    assert_eq!(native(&gtype), "C.GType");
    assert_eq!(host(&gtype), "gobject.GType");
    let gobject = GenContext::new("GObject");
    assert_eq!(resolve_host(&gobject, &gtype, false).unwrap(), "GType");
}

#[test]
fn strings_never_take_indirection() {
    assert_eq!(native(&TypeInfo::utf8()), "*C.gchar");
    assert_eq!(host(&TypeInfo::utf8()), "string");
    assert_eq!(host(&basic(TypeTag::Filename)), "string");
}

#[test]
fn named_types() {
    assert_eq!(native(&TypeInfo::named(button())), "*C.GtkButton");
    assert_eq!(host(&TypeInfo::named(button())), "*Button");
    assert_eq!(native(&TypeInfo::named(orientation())), "C.GtkOrientation");
    assert_eq!(host(&TypeInfo::named(orientation())), "Orientation");
    assert_eq!(native(&TypeInfo::named(border()).by_value()), "C.GtkBorder");
    assert_eq!(host(&TypeInfo::named(border()).by_value()), "Border");
}

#[test]
fn object_argument_uses_mirroring_interface() {
    assert_eq!(host_arg(&TypeInfo::named(button())), "IButton");
    assert_eq!(host_arg(&TypeInfo::named(border())), "*Border");
}

#[test]
fn interface_never_takes_indirection() {
    let ty = TypeInfo::named(clickable());
    assert!(ty.is_pointer);
    assert_eq!(native(&ty), "*C.GtkClickable");
    assert_eq!(host(&ty), "Clickable");
    assert_eq!(host_arg(&ty), "Clickable");
}

#[test]
fn foreign_types_are_qualified() {
    let object = TypeInfo::named(EntityRef::new("GObject", "Object", EntityKind::Object));
    assert_eq!(native(&object), "*C.GObject");
    assert_eq!(host(&object), "*gobject.Object");
    assert_eq!(host_arg(&object), "gobject.IObject");

    let rect = TypeInfo::named(EntityRef::new("Gdk", "Rectangle", EntityKind::Struct));
    assert_eq!(host(&rect), "*gdk.Rectangle");
}

#[test]
fn lists() {
    let list = TypeInfo::list(TypeInfo::named(button()));
    assert_eq!(native(&list), "*C.GList");
    assert_eq!(host(&list), "[]*Button");
    assert_eq!(host_arg(&list), "[]*Button");

    let slist = TypeInfo::slist(TypeInfo::utf8());
    assert_eq!(native(&slist), "*C.GSList");
    assert_eq!(host(&slist), "[]string");

    let enums = TypeInfo::list(TypeInfo::named(orientation()));
    assert_eq!(host(&enums), "[]Orientation");

    let ifaces = TypeInfo::list(TypeInfo::named(clickable()));
    assert_eq!(host(&ifaces), "[]Clickable");
}

#[test]
fn hash_tables() {
    let ty = TypeInfo::hash(TypeInfo::utf8(), TypeInfo::named(border()));
    assert_eq!(native(&ty), "*C.GHashTable");
    assert_eq!(host(&ty), "map[string]*Border");
}

#[test]
fn arrays() {
    let bytes = c_array(basic(TypeTag::UInt8));
    assert_eq!(native(&bytes), "*C.guint8");
    assert_eq!(host(&bytes), "[]uint8");

    let strv = c_array(TypeInfo::utf8());
    assert_eq!(native(&strv), "**C.gchar");
    assert_eq!(host(&strv), "[]string");

    let garray = TypeInfo::array(ArrayInfo::new(ArrayType::Array), basic(TypeTag::Double));
    assert_eq!(native(&garray), "*C.GArray");
    assert_eq!(host(&garray), "[]float64");

    let ptrs = TypeInfo::array(ArrayInfo::new(ArrayType::PtrArray), TypeInfo::named(button()));
    assert_eq!(native(&ptrs), "*C.GPtrArray");
    assert_eq!(host(&ptrs), "[]*Button");

    let strings = TypeInfo::array(ArrayInfo::new(ArrayType::PtrArray), TypeInfo::utf8());
    assert_eq!(host(&strings), "[]*string");
    let ints = TypeInfo::array(ArrayInfo::new(ArrayType::PtrArray), basic(TypeTag::Int32));
    assert_eq!(host(&ints), "[]*int32");
    let ifaces = TypeInfo::array(ArrayInfo::new(ArrayType::PtrArray), TypeInfo::named(clickable()));
    assert_eq!(host(&ifaces), "[]*Clickable");
    let enums = TypeInfo::array(
        ArrayInfo::new(ArrayType::PtrArray),
        TypeInfo::named(orientation()).by_value(),
    );
    assert_eq!(host(&enums), "[]*Orientation");

    let byte_array = TypeInfo::array(ArrayInfo::new(ArrayType::ByteArray), basic(TypeTag::UInt8));
    assert_eq!(native(&byte_array), "*C.GByteArray");
    assert_eq!(host(&byte_array), "[]byte");
}

#[test]
fn error_type() {
    assert_eq!(native(&TypeInfo::error()), "*C.GError");
    assert_eq!(host(&TypeInfo::error()), "error");
}

#[test]
fn store_pointer_by_entity_kind() {
    for kind in EntityKind::ALL {
        let elem = TypeInfo::named(EntityRef::new("Gtk", "T", kind));
        let expected = matches!(
            kind,
            EntityKind::Object | EntityKind::Struct | EntityKind::Union
        );
        assert_eq!(container_stores_pointer(&elem), expected, "{kind}");
        let host = element_host(&ctx(), &elem).unwrap();
        assert_eq!(host.starts_with('*'), expected, "{kind}: {host}");
    }
    assert!(!container_stores_pointer(&TypeInfo::utf8()));
}

#[test]
fn malformed_descriptors_are_rejected() {
    let mut list = TypeInfo::list(TypeInfo::utf8());
    list.params.push(TypeInfo::utf8());
    let err = resolve_native(&list).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedType {
            ty: "*glist<*utf8, *utf8>".to_string(),
            reason: "wrong number of element types",
        }
    );

    let mut named = TypeInfo::named(button());
    named.interface = None;
    assert!(matches!(
        resolve_host(&ctx(), &named, false),
        Err(Error::MalformedType { .. })
    ));

    let mut array = c_array(basic(TypeTag::Int32));
    array.array = None;
    assert!(matches!(
        resolve_native(&array),
        Err(Error::MissingArrayInfo { .. })
    ));
}

#[test]
fn array_info_on_scalar_is_rejected() {
    let mut int = basic(TypeTag::Int32);
    int.array = Some(ArrayInfo::new(ArrayType::C));
    let list = TypeInfo::list(int.clone());
    assert_eq!(
        check_shape(&list).unwrap_err(),
        Error::MalformedType {
            ty: int.to_string(),
            reason: "array info on a non-array type",
        }
    );
    assert!(resolve_host(&ctx(), &list, false).is_err());
}

#[test]
fn array_of_void_is_unsupported() {
    let ty = c_array(TypeInfo::void());
    assert!(matches!(
        resolve_native(&ty),
        Err(Error::Unsupported { .. })
    ));
}
