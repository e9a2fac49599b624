//! Naming helpers shared by the model and the generator.

/// Namespaces whose package and symbol names drop the usual casing rules.
const GLIB_FAMILY: [&str; 5] = ["GLib", "GObject", "GModule", "Gio", "GIRepository"];

/// Convert snake_case or kebab-case to PascalCase.
///
/// Words are separated by `_`, `-`, or `.`. Input that is already PascalCase
/// (starts uppercase, has lowercase letters, no separators) is returned as is.
///
/// # Examples
/// ```
/// use girgen_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("new_with_label"), "NewWithLabel");
/// assert_eq!(to_pascal_case("MAJOR_VERSION"), "MajorVersion");
/// assert_eq!(to_pascal_case("WindowType"), "WindowType");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    fn is_separator(c: char) -> bool {
        matches!(c, '_' | '-' | '.')
    }

    let has_separator = s.chars().any(is_separator);
    let has_lowercase = s.chars().any(|c| c.is_ascii_lowercase());
    let starts_uppercase = s.chars().next().is_some_and(|c| c.is_ascii_uppercase());

    if starts_uppercase && has_lowercase && !has_separator {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if is_separator(c) {
            capitalize_next = true;
            continue;
        }
        if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c.to_ascii_lowercase());
        }
    }
    result
}

/// Convert PascalCase to snake_case, keeping runs of capitals together.
///
/// ```
/// use girgen_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("WindowType"), "window_type");
/// assert_eq!(to_snake_case("IOCondition"), "io_condition");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev_lower = i > 0 && chars[i - 1].is_ascii_lowercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_ascii_uppercase();
            if i > 0 && !result.ends_with('_') && (prev_lower || (prev_upper && next_lower)) {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Host package name of a namespace: `Gtk` becomes `gtk`, `GObject` becomes `gobject`.
pub fn package_name(namespace: &str) -> String {
    if GLIB_FAMILY.contains(&namespace) {
        return namespace.to_ascii_lowercase();
    }
    lower_first(namespace)
}

/// Lowercase the first character: `Clickable` becomes `clickable`.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// First PascalCase word of a name: `WindowType` becomes `Window`.
pub fn first_word(s: &str) -> &str {
    let end = s
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_ascii_uppercase())
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

/// Prefix of native type names: `Gtk` stays `Gtk`, the GLib family uses `G`.
pub fn c_type_prefix(namespace: &str) -> &str {
    if GLIB_FAMILY.contains(&namespace) {
        "G"
    } else {
        namespace
    }
}

/// Uppercase symbol prefix of a namespace: `Gtk` becomes `GTK`, `GObject` becomes `G`.
pub fn c_symbol_prefix(namespace: &str) -> String {
    if GLIB_FAMILY.contains(&namespace) {
        return "G".to_string();
    }
    to_snake_case(namespace).to_ascii_uppercase()
}

/// Native constant name of an enumeration member when the data omits one.
///
/// ```
/// use girgen_core::utils::c_value_name;
/// assert_eq!(c_value_name("Gtk", "WindowType", "toplevel"), "GTK_WINDOW_TYPE_TOPLEVEL");
/// ```
pub fn c_value_name(namespace: &str, enum_name: &str, value: &str) -> String {
    format!(
        "{}_{}_{}",
        c_symbol_prefix(namespace),
        to_snake_case(enum_name).to_ascii_uppercase(),
        value.to_ascii_uppercase().replace('-', "_")
    )
}

const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

pub fn is_keyword(s: &str) -> bool {
    GO_KEYWORDS.contains(&s)
}

/// Host identifier for a parameter name, with a trailing `_` on keywords.
pub fn safe_ident(name: &str) -> String {
    let mut ident = name.replace('-', "_");
    if is_keyword(&ident) {
        ident.push('_');
    }
    ident
}

/// Name under which cgo exposes a C struct field; keywords get a leading `_`.
pub fn c_field_name(name: &str) -> String {
    if is_keyword(name) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

/// Quote a string as a host string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
