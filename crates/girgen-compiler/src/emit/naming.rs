//! Host names of enumeration values and constant literals.

use std::collections::HashMap;

use girgen_core::utils::{c_value_name, first_word, quote, to_pascal_case};
use girgen_core::{ConstantInfo, ConstantValue, EnumInfo, Namespace};

use crate::resolve::{TagClass, classify};
use crate::{Error, Result};

/// Host and native names of the values of `info`, in declaration order.
///
/// Values share one scope across the package, so when any value name of an
/// enumeration occurs more than once in the namespace, every value of that
/// enumeration is prefixed with the first word of its type name.
pub fn enum_value_names(ns: &Namespace, info: &EnumInfo) -> Vec<(String, String)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in ns.enums.values().flat_map(|e| &e.values) {
        *counts.entry(to_pascal_case(&value.name)).or_default() += 1;
    }

    let ambiguous = info
        .values
        .iter()
        .any(|v| counts.get(&to_pascal_case(&v.name)).copied().unwrap_or(0) > 1);
    let prefix = if ambiguous { first_word(&info.name) } else { "" };

    info.values
        .iter()
        .map(|value| {
            let host = format!("{prefix}{}", to_pascal_case(&value.name));
            let native = value
                .c_identifier
                .clone()
                .unwrap_or_else(|| c_value_name(&ns.name, &info.name, &value.name));
            (host, native)
        })
        .collect()
}

/// Host literal of a constant's value.
pub fn constant_literal(constant: &ConstantInfo) -> Result<String> {
    let class = classify(constant.ty.tag);
    let literal = match (&constant.value, class) {
        (ConstantValue::Bool(b), TagClass::Boolean) => b.to_string(),
        (ConstantValue::Int(i), TagClass::Basic) => i.to_string(),
        (ConstantValue::Float(f), TagClass::Basic) if f.is_finite() => f.to_string(),
        (ConstantValue::String(s), TagClass::String) => quote(s),
        _ => return Err(Error::unsupported("constant", &constant.ty)),
    };
    Ok(literal)
}
