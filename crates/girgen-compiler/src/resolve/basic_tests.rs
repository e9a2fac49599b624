use girgen_core::TypeTag;

use super::basic::*;

#[test]
fn every_tag_has_a_class() {
    // `classify` is an exhaustive match; this pins the expected split.
    let basic: Vec<_> = TypeTag::ALL
        .into_iter()
        .filter(|t| classify(*t) == TagClass::Basic)
        .collect();
    assert_eq!(basic.len(), 11);
    assert_eq!(classify(TypeTag::Boolean), TagClass::Boolean);
    assert_eq!(classify(TypeTag::GType), TagClass::TypeHandle);
    assert_eq!(classify(TypeTag::Filename), TagClass::String);
    assert_eq!(classify(TypeTag::GSList), TagClass::List);
}

#[test]
fn basic_class_is_covered_by_both_tables() {
    for tag in TypeTag::ALL {
        let in_tables = native_name(tag).is_some() && host_name(tag).is_some();
        assert_eq!(classify(tag) == TagClass::Basic, in_tables, "{tag}");
    }
}

#[test]
fn special_scalars_are_not_in_the_host_table() {
    for tag in [TypeTag::Void, TypeTag::Boolean, TypeTag::GType] {
        assert!(host_name(tag).is_none(), "{tag}");
        assert!(native_name(tag).is_some(), "{tag}");
    }
}

#[test]
fn table_spellings() {
    assert_eq!(native_name(TypeTag::Int32), Some("C.gint32"));
    assert_eq!(host_name(TypeTag::Int32), Some("int32"));
    assert_eq!(native_name(TypeTag::Double), Some("C.gdouble"));
    assert_eq!(host_name(TypeTag::Double), Some("float64"));
    assert_eq!(native_name(TypeTag::Unichar), Some("C.gunichar"));
    assert_eq!(host_name(TypeTag::Unichar), Some("rune"));
    assert_eq!(native_name(TypeTag::GType), Some("C.GType"));
    assert_eq!(native_name(TypeTag::Utf8), None);
}
