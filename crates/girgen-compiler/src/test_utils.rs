//! Shared fixtures for generator tests.

use girgen_core::{
    ArgInfo, ArrayInfo, ArrayType, EntityKind, EntityRef, EnumInfo, FieldInfo, FunctionInfo,
    InterfaceInfo, Namespace, ObjectInfo, StructInfo, Transfer, TypeInfo, TypeTag, ValueInfo,
};

use crate::GenContext;

pub fn ctx() -> GenContext {
    GenContext::new("Gtk")
}

pub fn gtk(name: &str, kind: EntityKind) -> EntityRef {
    EntityRef::new("Gtk", name, kind)
}

pub fn button() -> EntityRef {
    gtk("Button", EntityKind::Object)
}

pub fn widget() -> EntityRef {
    gtk("Widget", EntityKind::Object)
}

pub fn clickable() -> EntityRef {
    gtk("Clickable", EntityKind::Interface)
}

pub fn orientation() -> EntityRef {
    gtk("Orientation", EntityKind::Enum)
}

pub fn border() -> EntityRef {
    gtk("Border", EntityKind::Struct)
}

pub fn basic(tag: TypeTag) -> TypeInfo {
    TypeInfo::new(tag)
}

pub fn c_array(elem: TypeInfo) -> TypeInfo {
    TypeInfo::array(ArrayInfo::new(ArrayType::C), elem)
}

/// Generated code as it reads in an inline snapshot: tabs become four spaces.
pub fn show(code: &str) -> String {
    code.trim_end().replace('\t', "    ")
}

/// Small Gtk-like namespace exercising every entity kind.
pub fn gtk_namespace() -> Namespace {
    let clickable_iface = InterfaceInfo {
        name: "Clickable".to_string(),
        methods: vec![
            FunctionInfo::new("click", "gtk_clickable_click").method(),
            FunctionInfo::new("get_click_count", "gtk_clickable_get_click_count")
                .method()
                .returns(basic(TypeTag::Int32), Transfer::None),
        ],
        ..InterfaceInfo::default()
    };

    let widget_obj = ObjectInfo {
        name: "Widget".to_string(),
        parent: Some(EntityRef::new(
            "GObject",
            "InitiallyUnowned",
            EntityKind::Object,
        )),
        is_abstract: true,
        methods: vec![
            FunctionInfo::new("show", "gtk_widget_show").method(),
            FunctionInfo::new("set_visible", "gtk_widget_set_visible")
                .method()
                .arg(ArgInfo::new("visible", basic(TypeTag::Boolean))),
        ],
        ..ObjectInfo::default()
    };

    let button_obj = ObjectInfo {
        name: "Button".to_string(),
        parent: Some(widget()),
        interfaces: vec![clickable()],
        methods: vec![
            FunctionInfo::new("new_with_label", "gtk_button_new_with_label")
                .constructor()
                .arg(ArgInfo::new("label", TypeInfo::utf8()))
                .returns(TypeInfo::named(widget()), Transfer::None),
            FunctionInfo::new("set_label", "gtk_button_set_label")
                .method()
                .arg(ArgInfo::new("label", TypeInfo::utf8())),
            FunctionInfo::new("get_label", "gtk_button_get_label")
                .method()
                .returns(TypeInfo::utf8(), Transfer::None),
        ],
        ..ObjectInfo::default()
    };

    let orientation_enum = EnumInfo::new(
        "Orientation",
        vec![ValueInfo::new("horizontal", 0), ValueInfo::new("vertical", 1)],
    );

    let border_struct = StructInfo {
        name: "Border".to_string(),
        size: 8,
        alignment: 2,
        fields: vec![
            FieldInfo::new("left", basic(TypeTag::Int16)),
            FieldInfo::new("right", basic(TypeTag::Int16)),
        ],
        methods: vec![
            FunctionInfo::new("copy", "gtk_border_copy")
                .method()
                .returns(TypeInfo::named(border()), Transfer::Full),
        ],
        ..StructInfo::default()
    };

    Namespace::new("Gtk")
        .with_enum(orientation_enum)
        .with_interface(clickable_iface)
        .with_object(widget_obj)
        .with_object(button_obj)
        .with_struct(border_struct)
        .with_function(FunctionInfo::new("main_quit", "gtk_main_quit"))
}
