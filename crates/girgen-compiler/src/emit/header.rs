//! File header: package clause, cgo preamble, imports, and helpers.

use std::collections::BTreeSet;

use girgen_core::utils::package_name;
use girgen_core::{Entity, Namespace};

use crate::{Config, GenContext};

const STR_HASH_HELPER: &str = "girgen_str_hash_table_new";
const BOOL_HELPER: &str = "toGboolean";

pub(super) fn render(ns: &Namespace, config: &Config, ctx: &GenContext, body: &str) -> String {
    let mut out = String::from("// Code generated by girgen. DO NOT EDIT.\n\n");
    out.push_str(&format!("package {}\n\n", ctx.package()));

    out.push_str("/*\n");
    if !config.pkg_config.is_empty() {
        out.push_str(&format!("#cgo pkg-config: {}\n", config.pkg_config.join(" ")));
    }
    for include in &config.includes {
        out.push_str(&format!("#include {}\n", include_spelling(include)));
    }
    out.push_str("#include <stdlib.h>\n");
    if body.contains(STR_HASH_HELPER) {
        out.push_str(&format!(
            "\nstatic GHashTable *{STR_HASH_HELPER}(void)\n{{\n\treturn g_hash_table_new(g_str_hash, g_str_equal);\n}}\n"
        ));
    }
    out.push_str("*/\nimport \"C\"\n");

    let imports = imports(ns, ctx, body);
    if !imports.is_empty() {
        out.push_str("\nimport (\n");
        let (std, foreign): (Vec<&String>, Vec<&String>) =
            imports.iter().partition(|path| is_std(path));
        for path in &std {
            out.push_str(&format!("\t\"{path}\"\n"));
        }
        if !std.is_empty() && !foreign.is_empty() {
            out.push('\n');
        }
        for path in &foreign {
            out.push_str(&format!("\t\"{path}\"\n"));
        }
        out.push_str(")\n");
    }

    if body.contains(&format!("{BOOL_HELPER}(")) {
        out.push_str(&format!(
            "\nfunc {BOOL_HELPER}(b bool) C.gboolean {{\n\tif b {{\n\t\treturn C.gboolean(C.TRUE)\n\t}}\n\treturn C.gboolean(C.FALSE)\n}}\n"
        ));
    }
    out
}

/// `gtk/gtk.h` becomes `<gtk/gtk.h>`; quoted or bracketed spellings are kept.
fn include_spelling(header: &str) -> String {
    if header.starts_with('<') || header.starts_with('"') {
        header.to_string()
    } else {
        format!("<{header}>")
    }
}

fn is_std(path: &str) -> bool {
    matches!(path, "errors" | "math" | "unsafe")
}

/// Import paths the body refers to, sorted.
fn imports(ns: &Namespace, ctx: &GenContext, body: &str) -> BTreeSet<String> {
    let mut imports = BTreeSet::new();
    for std in ["errors", "math", "unsafe"] {
        if uses_package(body, std) {
            imports.insert(std.to_string());
        }
    }
    for namespace in referenced_namespaces(ns) {
        if ctx.is_local(&namespace) {
            continue;
        }
        if uses_package(body, &package_name(&namespace)) {
            imports.insert(ctx.import_path(&namespace));
        }
    }
    imports
}

/// Whether `pkg.` appears in `body` as a qualifier rather than inside a longer name.
pub(super) fn uses_package(body: &str, pkg: &str) -> bool {
    let needle = format!("{pkg}.");
    body.match_indices(&needle).any(|(at, _)| {
        body[..at]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '.'))
    })
}

/// Every namespace the model mentions, including declared dependencies.
fn referenced_namespaces(ns: &Namespace) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    // The type handle lives in GObject.
    found.insert("GObject".to_string());
    for dependency in &ns.dependencies {
        let name = dependency.split('-').next().unwrap_or(dependency);
        found.insert(name.to_string());
    }
    ns.for_each_type(|_, ty| {
        ty.walk(&mut |t| {
            if let Some(entity) = &t.interface {
                found.insert(entity.namespace.clone());
            }
        });
    });
    for entity in ns.entities() {
        let refs = match entity {
            Entity::Interface(i) => i.prerequisites.iter().collect::<Vec<_>>(),
            Entity::Object(o) => o.parent.iter().chain(&o.interfaces).collect(),
            _ => Vec::new(),
        };
        for r in refs {
            found.insert(r.namespace.clone());
        }
    }
    found
}
