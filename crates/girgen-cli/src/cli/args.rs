//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! This allows the same arg definition to be reused across commands with
//! different visibility settings (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Namespace JSON file (positional, `-` for stdin).
pub fn namespace_path_arg() -> Arg {
    Arg::new("namespace_path")
        .value_name("NAMESPACE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Namespace JSON file, or - for stdin")
}

/// Go package name override (--package).
pub fn package_arg() -> Arg {
    Arg::new("package")
        .long("package")
        .value_name("NAME")
        .help("Go package name (default: derived from the namespace)")
}

/// C header for the cgo preamble (--include), repeatable.
pub fn include_arg() -> Arg {
    Arg::new("include")
        .long("include")
        .value_name("HEADER")
        .action(ArgAction::Append)
        .help("C header included by the cgo preamble (repeatable)")
}

/// pkg-config package for the cgo preamble (--pkg-config), repeatable.
pub fn pkg_config_arg() -> Arg {
    Arg::new("pkg_config")
        .long("pkg-config")
        .value_name("PACKAGE")
        .action(ArgAction::Append)
        .help("pkg-config package named in the cgo preamble (repeatable)")
}

/// Import path prefix of sibling packages (--import-prefix).
pub fn import_prefix_arg() -> Arg {
    Arg::new("import_prefix")
        .long("import-prefix")
        .value_name("PATH")
        .help("Import path under which packages of other namespaces live")
}

/// Skip field getters (--no-field-getters).
pub fn no_field_getters_arg() -> Arg {
    Arg::new("no_field_getters")
        .long("no-field-getters")
        .action(ArgAction::SetTrue)
        .help("Don't emit getters for struct and union fields")
}

/// Leave out deprecated items (--skip-deprecated).
pub fn skip_deprecated_arg() -> Arg {
    Arg::new("skip_deprecated")
        .long("skip-deprecated")
        .action(ArgAction::SetTrue)
        .help("Leave out items marked deprecated")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .global(true)
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug, -vv for trace); RUST_LOG overrides")
}
