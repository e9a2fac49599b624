use girgen_core::{
    ArgInfo, ConstantInfo, ConstantValue, EntityKind, EntityRef, EnumInfo, FieldInfo,
    FunctionInfo, InterfaceInfo, Namespace, ObjectInfo, StructInfo, Transfer, TypeInfo, TypeTag,
    UnionInfo, ValueInfo,
};

use indoc::indoc;

use super::*;
use crate::test_utils::{basic, border, clickable, gtk, gtk_namespace, show};
use crate::{Config, Error};

fn fragments(ns: &Namespace, config: &Config) -> Vec<Fragment> {
    Emitter::new(ns, config).emit().unwrap()
}

/// Text of the single fragment declared by `owner` with the given kind.
fn fragment(ns: &Namespace, config: &Config, owner: &str, kind: FragmentKind) -> String {
    let found: Vec<_> = fragments(ns, config)
        .into_iter()
        .filter(|f| f.owner == owner && f.kind == kind)
        .collect();
    assert_eq!(found.len(), 1, "fragments of {owner}: {found:?}");
    show(&found[0].text)
}

fn owners(ns: &Namespace, config: &Config, kind: FragmentKind) -> Vec<String> {
    fragments(ns, config)
        .into_iter()
        .filter(|f| f.kind == kind)
        .map(|f| f.owner)
        .collect()
}

fn constant(name: &str, ty: TypeInfo, value: ConstantValue) -> ConstantInfo {
    ConstantInfo {
        name: name.to_string(),
        ty,
        value,
        deprecated: false,
    }
}

#[test]
fn fragment_order() {
    let kinds: Vec<_> = fragments(&gtk_namespace(), &Config::new())
        .into_iter()
        .map(|f| (f.owner, f.kind))
        .collect();
    let first: Vec<_> = kinds.iter().take(4).cloned().collect();
    assert_eq!(
        first,
        vec![
            ("Gtk.Orientation".to_string(), FragmentKind::Enum),
            ("Gtk.Clickable".to_string(), FragmentKind::Interface),
            ("Gtk.Clickable.click".to_string(), FragmentKind::Method),
            (
                "Gtk.Clickable.get_click_count".to_string(),
                FragmentKind::Method
            ),
        ]
    );
    assert_eq!(
        kinds.last(),
        Some(&("Gtk.main_quit".to_string(), FragmentKind::Function))
    );
}

#[test]
fn enumeration() {
    let out = fragment(
        &gtk_namespace(),
        &Config::new(),
        "Gtk.Orientation",
        FragmentKind::Enum,
    );
    insta::assert_snapshot!(out, @r"
    type Orientation int32

    const (
        Horizontal Orientation = C.GTK_ORIENTATION_HORIZONTAL
        Vertical Orientation = C.GTK_ORIENTATION_VERTICAL
    )
    ");
}

#[test]
fn ambiguous_enum_values_are_prefixed() {
    let mut shadow = EnumInfo::new(
        "ShadowType",
        vec![ValueInfo::new("none", 0), ValueInfo::new("in", 1)],
    );
    shadow.values[1].c_identifier = Some("GTK_SHADOW_IN".to_string());
    let wrap = EnumInfo::new(
        "WrapMode",
        vec![ValueInfo::new("none", 0), ValueInfo::new("word", 1)],
    );
    let justify = EnumInfo::new("Justification", vec![ValueInfo::new("left", 0)]);
    let ns = Namespace::new("Gtk")
        .with_enum(shadow)
        .with_enum(wrap)
        .with_enum(justify);
    let config = Config::new();

    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.ShadowType", FragmentKind::Enum), @r"
    type ShadowType int32

    const (
        ShadowNone ShadowType = C.GTK_SHADOW_TYPE_NONE
        ShadowIn ShadowType = C.GTK_SHADOW_IN
    )
    ");
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.WrapMode", FragmentKind::Enum), @r"
    type WrapMode int32

    const (
        WrapNone WrapMode = C.GTK_WRAP_MODE_NONE
        WrapWord WrapMode = C.GTK_WRAP_MODE_WORD
    )
    ");
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Justification", FragmentKind::Enum), @r"
    type Justification int32

    const (
        Left Justification = C.GTK_JUSTIFICATION_LEFT
    )
    ");
}

#[test]
fn interface_and_carrier() {
    let out = fragment(
        &gtk_namespace(),
        &Config::new(),
        "Gtk.Clickable",
        FragmentKind::Interface,
    );
    insta::assert_snapshot!(out, @r"
    type Clickable interface {
        Native() unsafe.Pointer
        Click()
        GetClickCount() (ret int32)
    }

    type clickable struct {
        native unsafe.Pointer
    }

    func (this *clickable) Native() unsafe.Pointer {
        return this.native
    }

    func WrapClickable(p unsafe.Pointer) Clickable {
        return &clickable{native: p}
    }
    ");
}

#[test]
fn interface_carrier_gets_prerequisite_methods() {
    let activatable = InterfaceInfo {
        name: "Activatable".to_string(),
        prerequisites: vec![
            EntityRef::new("GObject", "Object", EntityKind::Object),
            clickable(),
        ],
        methods: vec![FunctionInfo::new("activate", "gtk_activatable_activate").method()],
        ..InterfaceInfo::default()
    };
    let ns = gtk_namespace().with_interface(activatable);
    let config = Config::new();

    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Activatable", FragmentKind::Interface), @r"
    type Activatable interface {
        Native() unsafe.Pointer
        Clickable
        Activate()
    }

    type activatable struct {
        native unsafe.Pointer
    }

    func (this *activatable) Native() unsafe.Pointer {
        return this.native
    }

    func WrapActivatable(p unsafe.Pointer) Activatable {
        return &activatable{native: p}
    }
    ");
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Activatable.click", FragmentKind::Method), @r"
    func (this *activatable) Click() {
        real_this := (*C.GtkClickable)(this.Native())
        C.gtk_clickable_click(real_this)
    }
    ");
}

#[test]
fn object_embeds_parent() {
    let ns = gtk_namespace();
    let config = Config::new();
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Button", FragmentKind::Type), @r"
    type Button struct {
        Widget
    }

    func WrapButton(p unsafe.Pointer) *Button {
        return &Button{Widget: *WrapWidget(p)}
    }
    ");
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Widget", FragmentKind::Type), @r"
    type Widget struct {
        gobject.InitiallyUnowned
    }

    func WrapWidget(p unsafe.Pointer) *Widget {
        return &Widget{InitiallyUnowned: *gobject.WrapInitiallyUnowned(p)}
    }
    ");
}

#[test]
fn root_object_holds_handle() {
    let ns = Namespace::new("GObject").with_object(ObjectInfo {
        name: "Object".to_string(),
        ..ObjectInfo::default()
    });
    let config = Config::new();
    insta::assert_snapshot!(fragment(&ns, &config, "GObject.Object", FragmentKind::Type), @r"
    type Object struct {
        native unsafe.Pointer
    }

    func (this *Object) Native() unsafe.Pointer {
        return this.native
    }

    func WrapObject(p unsafe.Pointer) *Object {
        return &Object{native: p}
    }
    ");
    insta::assert_snapshot!(fragment(&ns, &config, "GObject.Object", FragmentKind::Mirror), @r"
    type IObject interface {
        Native() unsafe.Pointer
    }
    ");
}

#[test]
fn mirror_interface() {
    let ns = gtk_namespace();
    let config = Config::new();
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Button", FragmentKind::Mirror), @r"
    type IButton interface {
        IWidget
        Clickable
        SetLabel(label string)
        GetLabel() (ret string)
    }
    ");
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Widget", FragmentKind::Mirror), @r"
    type IWidget interface {
        gobject.IInitiallyUnowned
        Show()
        SetVisible(visible bool)
    }
    ");
}

#[test]
fn object_gets_interface_methods() {
    let ns = gtk_namespace();
    let config = Config::new();
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Button.get_click_count", FragmentKind::Method), @r"
    func (this *Button) GetClickCount() (ret int32) {
        real_this := (*C.GtkClickable)(this.Native())
        var real_ret C.gint32
        real_ret = C.gtk_clickable_get_click_count(real_this)
        ret = int32(real_ret)
        return ret
    }
    ");
}

#[test]
fn own_method_shadows_interface_method() {
    let mut ns = gtk_namespace();
    ns.objects["Button"]
        .methods
        .push(FunctionInfo::new("click", "gtk_button_click").method());
    let out = fragment(&ns, &Config::new(), "Gtk.Button.click", FragmentKind::Method);
    assert!(out.contains("C.gtk_button_click(real_this)"), "{out}");
}

#[test]
fn foreign_interface_is_left_out() {
    let mut ns = gtk_namespace();
    ns.objects["Button"]
        .interfaces
        .push(EntityRef::new("Gio", "ActionGroup", EntityKind::Interface));
    let out = fragment(&ns, &Config::new(), "Gtk.Button", FragmentKind::Mirror);
    assert!(!out.contains("ActionGroup"), "{out}");
}

#[test]
fn constructor_and_function() {
    let ns = gtk_namespace();
    let config = Config::new();
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Button.new_with_label", FragmentKind::Function), @r"
    func ButtonNewWithLabel(label string) (ret *Widget) {
        real_label := (*C.gchar)(unsafe.Pointer(C.CString(label)))
        var real_ret *C.GtkWidget
        defer C.free(unsafe.Pointer(real_label))
        real_ret = C.gtk_button_new_with_label(real_label)
        if real_ret != nil {
            ret = WrapWidget(unsafe.Pointer(real_ret))
        }
        return ret
    }
    ");
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.main_quit", FragmentKind::Function), @r"
    func MainQuit() {
        C.gtk_main_quit()
    }
    ");
}

#[test]
fn struct_with_field_getters() {
    let ns = gtk_namespace();
    let config = Config::new();
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Border", FragmentKind::Type), @r"
    type Border struct {
        native unsafe.Pointer
    }

    func (this *Border) Native() unsafe.Pointer {
        return this.native
    }

    func WrapBorder(p unsafe.Pointer) *Border {
        return &Border{native: p}
    }
    ");
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Border.left", FragmentKind::FieldGetter), @r"
    func (this *Border) Left() (ret int16) {
        real_this := (*C.GtkBorder)(this.Native())
        ret = int16(real_this.left)
        return ret
    }
    ");
}

#[test]
fn field_getters_skip_collisions_and_unconvertible_fields() {
    let rect = StructInfo {
        name: "Rect".to_string(),
        fields: vec![
            FieldInfo::new("width", basic(TypeTag::Int32)),
            FieldInfo::new("native", basic(TypeTag::Int32)),
            FieldInfo::new("names", TypeInfo::list(TypeInfo::utf8())),
            FieldInfo::new("type", TypeInfo::utf8()),
            FieldInfo {
                readable: false,
                ..FieldInfo::new("private", basic(TypeTag::Int32))
            },
        ],
        methods: vec![FunctionInfo::new("width", "gtk_rect_width")
            .method()
            .returns(basic(TypeTag::Int32), Transfer::None)],
        ..StructInfo::default()
    };
    let ns = Namespace::new("Gtk").with_struct(rect);
    let config = Config::new();

    assert_eq!(
        owners(&ns, &config, FragmentKind::FieldGetter),
        vec!["Gtk.Rect.type"]
    );
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Rect.type", FragmentKind::FieldGetter), @r"
    func (this *Rect) Type() (ret string) {
        real_this := (*C.GtkRect)(this.Native())
        ret = C.GoString((*C.char)(unsafe.Pointer(real_this._type)))
        return ret
    }
    ");
}

#[test]
fn field_getters_can_be_disabled() {
    let config = Config::new().field_getters(false);
    assert!(owners(&gtk_namespace(), &config, FragmentKind::FieldGetter).is_empty());
}

#[test]
fn union_record() {
    let ns = Namespace::new("Gtk").with_union(UnionInfo {
        name: "Event".to_string(),
        fields: vec![FieldInfo::new("kind", TypeInfo::named(gtk("EventType", EntityKind::Enum)))],
        ..UnionInfo::default()
    });
    let config = Config::new();
    insta::assert_snapshot!(fragment(&ns, &config, "Gtk.Event.kind", FragmentKind::FieldGetter), @r"
    func (this *Event) Kind() (ret EventType) {
        real_this := (*C.GtkEvent)(this.Native())
        ret = EventType(real_this.kind)
        return ret
    }
    ");
}

#[test]
fn class_structs_are_skipped() {
    let class = StructInfo {
        name: "ButtonClass".to_string(),
        is_gtype_struct: true,
        ..StructInfo::default()
    };
    let ns = Namespace::new("Gtk").with_struct(class);
    assert!(fragments(&ns, &Config::new()).is_empty());
}

#[test]
fn deprecated_items() {
    let mut ns = gtk_namespace();
    ns.objects["Button"].methods[1].deprecated = true;
    ns.enums["Orientation"].values[1].deprecated = true;

    let out = fragment(&ns, &Config::new(), "Gtk.Button.set_label", FragmentKind::Method);
    assert!(out.starts_with("// Deprecated.\nfunc (this *Button) SetLabel("), "{out}");

    let config = Config::new().skip_deprecated(true);
    assert!(
        fragments(&ns, &config)
            .iter()
            .all(|f| f.owner != "Gtk.Button.set_label")
    );
    let mirror = fragment(&ns, &config, "Gtk.Button", FragmentKind::Mirror);
    assert!(!mirror.contains("SetLabel"), "{mirror}");
    let orientation = fragment(&ns, &config, "Gtk.Orientation", FragmentKind::Enum);
    assert!(!orientation.contains("Vertical"), "{orientation}");
}

#[test]
fn header() {
    let config = Config::new()
        .include("gtk/gtk.h")
        .pkg_config("gtk4")
        .import_prefix("example.com/gir/");
    let out = generate(&gtk_namespace(), &config).unwrap();
    let end = out.find("type Orientation").unwrap();
    insta::assert_snapshot!(show(&out[..end]), @r#"
    // Code generated by girgen. DO NOT EDIT.

    package gtk

    /*
    #cgo pkg-config: gtk4
    #include <gtk/gtk.h>
    #include <stdlib.h>
    */
    import "C"

    import (
        "unsafe"

        "example.com/gir/gobject"
    )
    "#);
}

#[test]
fn header_helpers_follow_usage() {
    let hashing = FunctionInfo::new("set_table", "gtk_set_table").arg(ArgInfo::new(
        "table",
        TypeInfo::hash(TypeInfo::utf8(), TypeInfo::utf8()),
    ));
    let ns = Namespace::new("Gtk").with_function(hashing);
    let out = generate(&ns, &Config::new()).unwrap();
    assert!(out.contains("static GHashTable *girgen_str_hash_table_new(void)"));
    assert!(!out.contains("func toGboolean("));

    let flags = FunctionInfo::new("set_flags", "gtk_set_flags").arg(ArgInfo::new(
        "flags",
        TypeInfo::list(basic(TypeTag::Boolean)),
    ));
    let ns = Namespace::new("Gtk").with_function(flags);
    let out = generate(&ns, &Config::new()).unwrap();
    assert!(out.contains("func toGboolean(b bool) C.gboolean {"));
    assert!(!out.contains("girgen_str_hash_table_new"));
}

#[test]
fn constants_are_grouped() {
    let ns = Namespace::new("Gtk")
        .with_constant(constant(
            "MAJOR_VERSION",
            basic(TypeTag::Int32),
            ConstantValue::Int(4),
        ))
        .with_constant(constant(
            "STOCK_OK",
            TypeInfo::utf8(),
            ConstantValue::String("gtk-ok".to_string()),
        ));
    let out = generate(&ns, &Config::new()).unwrap();
    insta::assert_snapshot!(show(&out), @r#"
    // Code generated by girgen. DO NOT EDIT.

    package gtk

    /*
    #include <stdlib.h>
    */
    import "C"

    const MajorVersion int32 = 4
    const StockOk string = "gtk-ok"
    "#);
    assert!(out.ends_with("\"gtk-ok\"\n"));
}

#[test]
fn package_override() {
    let out = generate(&gtk_namespace(), &Config::new().package("gtk4")).unwrap();
    assert!(out.contains("\npackage gtk4\n"));
}

#[test]
fn failure_yields_no_output() {
    let bad = FunctionInfo::new("bad", "gtk_bad").arg(ArgInfo::new("e", TypeInfo::error()));
    let ns = gtk_namespace().with_function(bad);
    let err = generate(&ns, &Config::new()).unwrap_err();
    assert!(matches!(err.root(), Error::Unsupported { role: "input", .. }));
    assert!(err.to_string().starts_with("Gtk.bad: "), "{err}");
}

#[test]
fn bad_constant_names_the_constant() {
    let ns = Namespace::new("Gtk").with_constant(constant(
        "BROKEN",
        basic(TypeTag::Int32),
        ConstantValue::String("x".to_string()),
    ));
    let err = generate(&ns, &Config::new()).unwrap_err();
    assert!(err.to_string().starts_with("Gtk.BROKEN: "), "{err}");
}

#[test]
fn wrapped_types_agree_with_container_storage() {
    let getter = FunctionInfo::new("get_border", "gtk_get_border")
        .returns(TypeInfo::named(border()), Transfer::None);
    let lister = FunctionInfo::new("list_borders", "gtk_list_borders")
        .returns(TypeInfo::list(TypeInfo::named(border())), Transfer::None);
    let ns = gtk_namespace().with_function(getter).with_function(lister);
    let out = generate(&ns, &Config::new()).unwrap();
    assert!(out.contains("func WrapBorder(p unsafe.Pointer) *Border {"));
    assert!(out.contains("func GetBorder() (ret *Border) {"));
    assert!(out.contains("func ListBorders() (ret []*Border) {"));
}

#[test]
fn generation_is_deterministic() {
    let ns = gtk_namespace();
    let config = Config::new().include("gtk/gtk.h");
    assert_eq!(
        generate(&ns, &config).unwrap(),
        generate(&ns, &config).unwrap()
    );
}

#[test]
fn generate_from_json() {
    let ns = Namespace::from_json(indoc! {r#"
        {
            "name": "Gdk",
            "dependencies": ["GObject-2.0"],
            "functions": [
                {"name": "init_check", "symbol": "gdk_init_check",
                 "flags": {"throws": true},
                 "args": [{"name": "name", "type": {"tag": "utf8", "pointer": true}}],
                 "return_type": {"tag": "boolean"}}
            ]
        }
    "#})
    .unwrap();
    let out = generate(&ns, &Config::new().include("gdk/gdk.h")).unwrap();
    let expected = indoc! {r#"
        // Code generated by girgen. DO NOT EDIT.

        package gdk

        /*
        #include <gdk/gdk.h>
        #include <stdlib.h>
        */
        import "C"

        import (
            "errors"
            "unsafe"
        )

        func InitCheck(name string) (ret bool, err error) {
            real_name := (*C.gchar)(unsafe.Pointer(C.CString(name)))
            var real_err *C.GError
            var real_ret C.gboolean
            defer C.free(unsafe.Pointer(real_name))
            real_ret = C.gdk_init_check(real_name, &real_err)
            ret = real_ret != C.FALSE
            err = nil
            if real_err != nil {
                err = errors.New(C.GoString((*C.char)(unsafe.Pointer(real_err.message))))
                C.g_error_free(real_err)
            }
            return ret, err
        }
    "#};
    assert_eq!(show(&out), expected.trim_end());
}
