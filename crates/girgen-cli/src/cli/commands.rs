//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! All commands accept the generation flags, with the ones a command
//! ignores hidden from `--help`, so a flag set can be reused across modes.

use clap::Command;

use super::args::*;

/// Add hidden generation flags (for commands that don't emit Go).
fn with_hidden_generate_args(cmd: Command) -> Command {
    cmd.arg(include_arg().hide(true))
        .arg(pkg_config_arg().hide(true))
        .arg(no_field_getters_arg().hide(true))
        .arg(skip_deprecated_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("girgen")
        .about("Go/cgo bindings from GObject-Introspection data")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(generate_command())
        .subcommand(json_command())
        .subcommand(dump_command())
}

/// Generate Go bindings for a namespace.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate Go bindings for a namespace")
        .override_usage(
            "\
  girgen generate <NAMESPACE> [-o <FILE>]
  girgen generate - < Gtk.json",
        )
        .after_help(
            r#"EXAMPLES:
  girgen generate Gtk.json --include gtk/gtk.h --pkg-config gtk+-3.0
  girgen generate Gtk.json --import-prefix example.com/gir -o gtk/gtk.go
  girgen generate Gtk.json --skip-deprecated --no-field-getters"#,
        )
        .arg(namespace_path_arg())
        .arg(package_arg())
        .arg(include_arg())
        .arg(pkg_config_arg())
        .arg(import_prefix_arg())
        .arg(no_field_getters_arg())
        .arg(skip_deprecated_arg())
        .arg(output_file_arg())
        .arg(compact_arg().hide(true))
        .arg(color_arg().hide(true))
}

/// Print the validated namespace as normalized JSON.
pub fn json_command() -> Command {
    let cmd = Command::new("json")
        .about("Print the validated namespace as normalized JSON")
        .after_help(
            r#"EXAMPLES:
  girgen json Gtk.json                # pretty JSON
  girgen json Gtk.json --compact      # one line"#,
        )
        .arg(namespace_path_arg())
        .arg(compact_arg())
        .arg(output_file_arg())
        .arg(package_arg().hide(true))
        .arg(import_prefix_arg().hide(true))
        .arg(color_arg().hide(true));

    with_hidden_generate_args(cmd)
}

/// Show the namespace with resolved types.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the namespace with resolved native and host types")
        .after_help(
            r#"EXAMPLES:
  girgen dump Gtk.json                # entities, methods, types
  girgen dump Gtk.json --color never  # plain text"#,
        )
        .arg(namespace_path_arg())
        .arg(package_arg())
        .arg(import_prefix_arg())
        .arg(color_arg())
        .arg(output_file_arg())
        .arg(compact_arg().hide(true));

    with_hidden_generate_args(cmd)
}
